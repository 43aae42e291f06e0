//! Keccak-256 over loosely-typed structs.
//!
//! Values (booleans, numbers, strings, hex strings, big integers, sequences
//! and records) are turned into a canonical byte sequence, using Solidity-like
//! fixed-width integer slots, and absorbed into a Keccak-256 state. Two
//! logically equal inputs always produce the same bytes and the same digest.
//!
//! ```rust
//! use augmented_keccak::{Encoder, TypeHint, TypeTag, Value};
//!
//! let mut encoder = Encoder::new();
//! encoder.update(&Value::from("hello"))?;
//! assert_eq!(
//!     encoder.digest(),
//!     "1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8"
//! );
//!
//! let order = Value::record([("id", Value::from(7)), ("qty", Value::from(300))]);
//! let hint = TypeHint::record([("qty", TypeTag::Uint(16))]);
//! let mut encoder = Encoder::new();
//! encoder.update_with(&order, &hint)?;
//! # Ok::<(), augmented_keccak::EncodeError>(())
//! ```
#![deny(missing_docs)]

/// Incremental encoder and pre-image construction.
pub mod encoder;
/// Tagged digest output.
pub mod digest;
/// Fixed-width integer slots.
pub mod fixed_width;
/// Hex text validation and conversion.
pub mod hex_codec;
/// Numeric coercion.
pub mod numeric;
/// Defaults for untyped leaves.
pub mod profile;
/// Per-value encoding decisions.
pub mod resolver;
/// Type tags and hints.
pub mod type_tag;
/// Error kinds for single values.
pub mod validation;
/// Input value model.
pub mod value;

pub use digest::{Digest, DigestAlg};
pub use encoder::{preimage, EncodeError, Encoder};
pub use num_bigint::BigInt;
pub use profile::{EncodingProfile, ProfileError};
pub use resolver::{Leaf, Step, TypeResolver};
pub use type_tag::{TypeHint, TypeTag};
pub use validation::ValueError;
pub use value::Value;

/// Creates a Keccak-256 encoder with the default profile.
pub fn create() -> Encoder {
    Encoder::new()
}
