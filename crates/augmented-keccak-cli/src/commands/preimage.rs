//! Preimage command implementation.

use augmented_keccak::EncodingProfile;

use crate::input::{read_hint, read_value};

pub fn run(
    input: Option<String>,
    types: Option<String>,
    profile: EncodingProfile,
) -> Result<(), Box<dyn std::error::Error>> {
    let value = read_value(input.as_deref())?;
    let hint = read_hint(types.as_deref())?;

    let bytes = augmented_keccak::preimage(&value, &hint, &profile)
        .map_err(|e| format!("Encoding failed: {}", e))?;

    println!("{}", hex::encode(bytes));
    Ok(())
}
