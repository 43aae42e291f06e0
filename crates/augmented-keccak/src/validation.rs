use thiserror::Error;

/// Reasons a single value cannot be encoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// The value or hint has no applicable encoding rule.
    #[error("unsupported type: {0}")]
    UnsupportedType(String),
    /// The hint structure disagrees with the value structure.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
    /// Odd length or non-hex characters.
    #[error("invalid hexadecimal string '{0}'")]
    InvalidHexString(String),
    /// A value required to be numeric could not be coerced.
    #[error("not a big number: {0}")]
    NotBigNumber(String),
    /// Negative magnitude assigned to an unsigned slot.
    #[error("type '{tag}' cannot be negative ({value})")]
    NegativeUnsigned {
        /// Declared tag, e.g. `uint8`.
        tag: String,
        /// Offending value in decimal.
        value: String,
    },
    /// The value does not fit the declared bit-width.
    #[error("{value} overflows '{tag}'")]
    Overflow {
        /// Declared tag, e.g. `int16`.
        tag: String,
        /// Offending value in decimal.
        value: String,
    },
}
