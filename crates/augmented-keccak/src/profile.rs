use serde::{Deserialize, Serialize};

use crate::type_tag::TypeTag;
use crate::validation::ValueError;

/// Defaults applied to leaves that carry no explicit type.
///
/// The default profile matches the classic encoding: untyped numbers and big
/// integers are `int256`, untyped booleans are `uint8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodingProfile {
    /// Tag for `number` leaves and untyped big integers.
    pub integer_default: TypeTag,
    /// Tag for untyped booleans.
    pub bool_tag: TypeTag,
}

impl Default for EncodingProfile {
    fn default() -> Self {
        Self {
            integer_default: TypeTag::Int(256),
            bool_tag: TypeTag::Uint(8),
        }
    }
}

impl EncodingProfile {
    /// Checks that both defaults are fixed-width integer tags.
    pub fn validate(&self) -> Result<(), ValueError> {
        for (field, tag) in [
            ("integer_default", self.integer_default),
            ("bool_tag", self.bool_tag),
        ] {
            if !tag.is_integer() {
                return Err(ValueError::UnsupportedType(format!(
                    "{} must be a uint/int type, got '{}'",
                    field, tag
                )));
            }
        }
        Ok(())
    }

    /// Returns a copy with a different default integer tag.
    pub fn with_integer_default(mut self, tag: TypeTag) -> Result<Self, ValueError> {
        self.integer_default = tag;
        self.validate()?;
        Ok(self)
    }

    /// Parses and validates a profile from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ProfileError> {
        let profile: EncodingProfile = serde_json::from_str(text)?;
        profile.validate()?;
        Ok(profile)
    }
}

/// Error returned when a profile document cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// The document is not a valid profile object.
    #[error("invalid profile document: {0}")]
    Parse(#[from] serde_json::Error),
    /// The document names a tag that cannot serve as a default.
    #[error("invalid profile: {0}")]
    Invalid(#[from] ValueError),
}
