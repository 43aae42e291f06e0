use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use crate::validation::ValueError;

/// Narrowest integer slot in bits.
pub const MIN_WIDTH: u16 = 8;
/// Widest integer slot in bits; also the width of a bare `uint`/`int`.
pub const MAX_WIDTH: u16 = 256;

/// Encoding rule for a single leaf value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeTag {
    /// Infer the rule from the runtime shape of the value.
    Auto,
    /// UTF-8 text.
    String,
    /// Hexadecimal text, absorbed in reversed byte order.
    Hex,
    /// Any numeric value, encoded with the profile's default integer tag.
    Number,
    /// Unsigned integer slot of the given bit-width.
    Uint(u16),
    /// Two's-complement integer slot of the given bit-width.
    Int(u16),
}

impl TypeTag {
    /// `uint<bits>`, validated.
    pub fn uint(bits: u16) -> Result<Self, ValueError> {
        check_width(bits)?;
        Ok(TypeTag::Uint(bits))
    }

    /// `int<bits>`, validated.
    pub fn int(bits: u16) -> Result<Self, ValueError> {
        check_width(bits)?;
        Ok(TypeTag::Int(bits))
    }

    /// Bit-width of integer tags.
    pub fn width(&self) -> Option<u16> {
        match self {
            TypeTag::Uint(bits) | TypeTag::Int(bits) => Some(*bits),
            _ => None,
        }
    }

    /// True for `uint<N>` and `int<N>`.
    pub fn is_integer(&self) -> bool {
        self.width().is_some()
    }
}

pub(crate) fn check_width(bits: u16) -> Result<(), ValueError> {
    if !(MIN_WIDTH..=MAX_WIDTH).contains(&bits) || bits % 8 != 0 {
        return Err(ValueError::UnsupportedType(format!(
            "bit-width {} is not a multiple of 8 between {} and {}",
            bits, MIN_WIDTH, MAX_WIDTH
        )));
    }
    Ok(())
}

fn integer_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(u?)int(\d*)$").expect("invalid regex"))
}

impl FromStr for TypeTag {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "auto" => return Ok(TypeTag::Auto),
            "string" => return Ok(TypeTag::String),
            "hex" => return Ok(TypeTag::Hex),
            "number" => return Ok(TypeTag::Number),
            _ => {}
        }

        let caps = integer_pattern()
            .captures(s)
            .ok_or_else(|| ValueError::UnsupportedType(format!("'{}' is not a type tag", s)))?;
        let bits = match &caps[2] {
            "" => MAX_WIDTH,
            digits => digits
                .parse::<u16>()
                .map_err(|_| ValueError::UnsupportedType(format!("'{}' is not a type tag", s)))?,
        };
        if &caps[1] == "u" {
            TypeTag::uint(bits)
        } else {
            TypeTag::int(bits)
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Auto => write!(f, "auto"),
            TypeTag::String => write!(f, "string"),
            TypeTag::Hex => write!(f, "hex"),
            TypeTag::Number => write!(f, "number"),
            TypeTag::Uint(bits) => write!(f, "uint{}", bits),
            TypeTag::Int(bits) => write!(f, "int{}", bits),
        }
    }
}

impl TryFrom<String> for TypeTag {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeTag> for String {
    fn from(tag: TypeTag) -> Self {
        tag.to_string()
    }
}

/// Caller-supplied type information, shaped like the value it describes.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeHint {
    /// A single tag for a leaf (or `auto` for a whole subtree).
    Tag(TypeTag),
    /// Positional hints for a sequence value.
    Sequence(Vec<TypeHint>),
    /// Named hints for a record value; unnamed fields are `auto`.
    Record(Vec<(String, TypeHint)>),
}

impl Default for TypeHint {
    fn default() -> Self {
        TypeHint::Tag(TypeTag::Auto)
    }
}

pub(crate) static AUTO: TypeHint = TypeHint::Tag(TypeTag::Auto);

impl TypeHint {
    /// Builds a record hint from `(name, hint)` pairs.
    pub fn record<K, H>(fields: impl IntoIterator<Item = (K, H)>) -> Self
    where
        K: Into<String>,
        H: Into<TypeHint>,
    {
        TypeHint::Record(
            fields
                .into_iter()
                .map(|(name, hint)| (name.into(), hint.into()))
                .collect(),
        )
    }

    /// Builds a sequence hint.
    pub fn sequence<H: Into<TypeHint>>(items: impl IntoIterator<Item = H>) -> Self {
        TypeHint::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// The tag this hint applies to a leaf, if it is not structural.
    pub fn tag(&self) -> Option<TypeTag> {
        match self {
            TypeHint::Tag(tag) => Some(*tag),
            TypeHint::Sequence(_) | TypeHint::Record(_) => None,
        }
    }

    /// True when the hint leaves everything to inference.
    pub fn is_auto(&self) -> bool {
        self.tag() == Some(TypeTag::Auto)
    }

    /// Hint for the named field of a record hint; `auto` when missing.
    pub fn field(&self, name: &str) -> &TypeHint {
        match self {
            TypeHint::Record(fields) => fields
                .iter()
                .find(|(field, _)| field == name)
                .map(|(_, hint)| hint)
                .unwrap_or(&AUTO),
            _ => &AUTO,
        }
    }

    /// Reads a hint from JSON: strings are tags, arrays are sequence hints,
    /// objects are record hints and `null` is `auto`.
    pub fn from_json(json: &Json) -> Result<Self, ValueError> {
        match json {
            Json::Null => Ok(TypeHint::Tag(TypeTag::Auto)),
            Json::String(tag) => Ok(TypeHint::Tag(tag.parse()?)),
            Json::Array(items) => Ok(TypeHint::Sequence(
                items
                    .iter()
                    .map(TypeHint::from_json)
                    .collect::<Result<_, _>>()?,
            )),
            Json::Object(map) => Ok(TypeHint::Record(
                map.iter()
                    .map(|(name, hint)| Ok((name.clone(), TypeHint::from_json(hint)?)))
                    .collect::<Result<_, ValueError>>()?,
            )),
            Json::Bool(_) | Json::Number(_) => Err(ValueError::UnsupportedType(format!(
                "hint {} is not a tag, array or object",
                json
            ))),
        }
    }
}

impl From<TypeTag> for TypeHint {
    fn from(tag: TypeTag) -> Self {
        TypeHint::Tag(tag)
    }
}

impl FromStr for TypeHint {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TypeHint::Tag(s.parse()?))
    }
}
