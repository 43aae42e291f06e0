//! Reading values, hints and profiles from files or stdin.

use augmented_keccak::{EncodingProfile, ProfileError, TypeHint, TypeTag, Value, ValueError};
use serde_json::Value as Json;
use std::io::{self, Read};
use thiserror::Error;

/// Errors raised while loading CLI inputs.
#[derive(Debug, Error)]
pub enum CliError {
    /// A file or stdin could not be read.
    #[error("failed to read {source_name}: {err}")]
    Read {
        /// File path or `stdin`.
        source_name: String,
        /// Underlying I/O error.
        err: io::Error,
    },
    /// The text is not JSON.
    #[error("invalid JSON in {source_name}: {err}")]
    Json {
        /// File path or `stdin`.
        source_name: String,
        /// Parser error.
        err: serde_json::Error,
    },
    /// The JSON does not describe a value or hint.
    #[error("invalid {what}: {err}")]
    Shape {
        /// `value`, `types` or `--number-type`.
        what: &'static str,
        /// Conversion error.
        err: ValueError,
    },
    /// The profile file is not a valid profile.
    #[error("{path}: {err}")]
    Profile {
        /// Profile path.
        path: String,
        /// Profile error.
        err: ProfileError,
    },
}

fn read_text(path: Option<&str>) -> Result<(String, String), CliError> {
    match path {
        Some(path) if path != "-" => {
            let text = std::fs::read_to_string(path).map_err(|err| CliError::Read {
                source_name: path.to_string(),
                err,
            })?;
            Ok((path.to_string(), text))
        }
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|err| CliError::Read {
                    source_name: "stdin".to_string(),
                    err,
                })?;
            Ok(("stdin".to_string(), buffer))
        }
    }
}

fn read_json(path: Option<&str>) -> Result<Json, CliError> {
    let (source_name, text) = read_text(path)?;
    serde_json::from_str(&text).map_err(|err| CliError::Json { source_name, err })
}

/// Reads the input value from `path`, or stdin when absent or `-`.
pub fn read_value(path: Option<&str>) -> Result<Value, CliError> {
    Value::from_json(&read_json(path)?).map_err(|err| CliError::Shape { what: "value", err })
}

/// Reads type hints from `path`; no path means `auto`.
pub fn read_hint(path: Option<&str>) -> Result<TypeHint, CliError> {
    match path {
        Some(path) => TypeHint::from_json(&read_json(Some(path))?)
            .map_err(|err| CliError::Shape { what: "types", err }),
        None => Ok(TypeHint::default()),
    }
}

/// Builds the encoding profile from an optional file and `--number-type`.
pub fn load_profile(
    path: Option<&str>,
    number_type: Option<&str>,
) -> Result<EncodingProfile, CliError> {
    let mut profile = match path {
        Some(path) => {
            let (source_name, text) = read_text(Some(path))?;
            EncodingProfile::from_json_str(&text)
                .map_err(|err| CliError::Profile { path: source_name, err })?
        }
        None => EncodingProfile::default(),
    };

    if let Some(tag) = number_type {
        let shape_err = |err: ValueError| CliError::Shape {
            what: "--number-type",
            err,
        };
        let tag: TypeTag = tag.parse().map_err(shape_err)?;
        profile = profile.with_integer_default(tag).map_err(shape_err)?;
    }

    tracing::debug!(
        integer_default = %profile.integer_default,
        bool_tag = %profile.bool_tag,
        "using profile"
    );
    Ok(profile)
}
