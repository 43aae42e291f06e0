//! Hash command implementation.

use augmented_keccak::{EncodingProfile, Encoder};
use tracing::info;

use crate::input::{read_hint, read_value};
use crate::output;

pub fn run(
    input: Option<String>,
    types: Option<String>,
    profile: EncodingProfile,
    json: bool,
    bytes: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let value = read_value(input.as_deref())?;
    let hint = read_hint(types.as_deref())?;

    let mut encoder = Encoder::with_profile(profile);
    encoder
        .update_with(&value, &hint)
        .map_err(|e| format!("Encoding failed: {}", e))?;
    info!(absorbed = encoder.absorbed_len(), "hashed input");

    if json {
        println!("{}", output::format_json(&encoder.finalize_digest()));
    } else if bytes {
        println!("{}", output::format_bytes(&encoder.digest_as_array()));
    } else {
        println!("{}", encoder.digest());
    }
    Ok(())
}
