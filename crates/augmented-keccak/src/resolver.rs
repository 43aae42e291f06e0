use num_bigint::BigInt;

use crate::fixed_width;
use crate::hex_codec;
use crate::numeric;
use crate::profile::EncodingProfile;
use crate::type_tag::{TypeHint, TypeTag, AUTO};
use crate::validation::ValueError;
use crate::value::Value;

/// What to do with a value under a given hint.
#[derive(Debug)]
pub enum Step<'a> {
    /// Encode each element with its paired hint, in order.
    Sequence(Vec<(&'a Value, &'a TypeHint)>),
    /// Encode each field with its paired hint, in insertion order.
    Record(Vec<(&'a str, &'a Value, &'a TypeHint)>),
    /// Encode the inner value with its own tag.
    Retag(&'a Value, TypeTag),
    /// Emit the bytes of a single leaf.
    Leaf(Leaf),
}

/// A leaf value in normalized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leaf {
    /// Text, absorbed as UTF-8 without leading/trailing NULs.
    Text(String),
    /// Hex digits, already in the byte order they are absorbed in.
    Hex(String),
    /// Integer bound to a fixed-width tag.
    Integer {
        /// Normalized value.
        value: BigInt,
        /// `uint<N>` or `int<N>`.
        tag: TypeTag,
    },
}

impl Leaf {
    /// Canonical bytes of this leaf.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ValueError> {
        match self {
            Leaf::Text(text) => Ok(hex_codec::text_bytes(text)),
            Leaf::Hex(digits) => hex_codec::to_bytes(digits),
            Leaf::Integer { value, tag } => fixed_width::encode(value, *tag),
        }
    }

    /// Encoding rule that produced this leaf.
    pub fn tag(&self) -> TypeTag {
        match self {
            Leaf::Text(_) => TypeTag::String,
            Leaf::Hex(_) => TypeTag::Hex,
            Leaf::Integer { tag, .. } => *tag,
        }
    }
}

/// Chooses the encoding rule for each value.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeResolver {
    profile: EncodingProfile,
}

impl TypeResolver {
    /// Creates a resolver using `profile` for untyped numbers and booleans.
    pub fn new(profile: EncodingProfile) -> Self {
        Self { profile }
    }

    /// Profile in use.
    pub fn profile(&self) -> &EncodingProfile {
        &self.profile
    }

    /// Decides how `value` is encoded under `hint`.
    pub fn resolve<'a>(&self, value: &'a Value, hint: &'a TypeHint) -> Result<Step<'a>, ValueError> {
        match value {
            Value::Sequence(items) => match hint {
                TypeHint::Sequence(hints) if hints.len() == items.len() => {
                    Ok(Step::Sequence(items.iter().zip(hints.iter()).collect()))
                }
                TypeHint::Sequence(hints) => Err(ValueError::TypeMismatch(format!(
                    "sequence has {} elements but its hint has {}",
                    items.len(),
                    hints.len()
                ))),
                _ if hint.is_auto() => Ok(Step::Sequence(items.iter().map(|item| (item, &AUTO)).collect())),
                _ => Err(structural_mismatch(value, hint)),
            },
            Value::Record(fields) => match hint {
                TypeHint::Record(_) => Ok(Step::Record(
                    fields
                        .iter()
                        .map(|(name, child)| (name.as_str(), child, hint.field(name)))
                        .collect(),
                )),
                _ if hint.is_auto() => Ok(Step::Record(
                    fields
                        .iter()
                        .map(|(name, child)| (name.as_str(), child, &AUTO))
                        .collect(),
                )),
                _ => Err(structural_mismatch(value, hint)),
            },
            Value::Typed { ty, data } => match hint.tag() {
                Some(TypeTag::Auto) => Ok(Step::Retag(data.as_ref(), *ty)),
                Some(outer) if outer == *ty => Ok(Step::Retag(data.as_ref(), *ty)),
                _ => Err(structural_mismatch(value, hint)),
            },
            leaf => {
                let tag = hint.tag().ok_or_else(|| structural_mismatch(leaf, hint))?;
                Ok(Step::Leaf(self.leaf(leaf, tag)?))
            }
        }
    }

    /// Normalizes a leaf value under `tag`, inferring the rule for `auto`.
    pub fn leaf(&self, value: &Value, tag: TypeTag) -> Result<Leaf, ValueError> {
        match tag {
            TypeTag::Auto => self.infer(value),
            TypeTag::String => match value {
                Value::String(text) => Ok(Leaf::Text(text.clone())),
                Value::Number(n) => Ok(Leaf::Text(number_text(*n))),
                Value::Bool(b) => Ok(Leaf::Text(b.to_string())),
                Value::BigInteger(i) => Ok(Leaf::Text(i.to_str_radix(10))),
                other => Err(unsupported(other, tag)),
            },
            TypeTag::Hex => match value {
                Value::String(text) => Ok(Leaf::Hex(hex_codec::normalize_prefixed(text)?)),
                other => Err(unsupported(other, tag)),
            },
            TypeTag::Number => Ok(Leaf::Integer {
                value: numeric::normalize(value)?,
                tag: self.integer_default()?,
            }),
            TypeTag::Uint(_) | TypeTag::Int(_) => Ok(Leaf::Integer {
                value: numeric::normalize(value)?,
                tag,
            }),
        }
    }

    fn infer(&self, value: &Value) -> Result<Leaf, ValueError> {
        match value {
            Value::Bool(_) if self.profile.bool_tag.is_integer() => {
                self.leaf(value, self.profile.bool_tag)
            }
            Value::Bool(_) => Err(ValueError::UnsupportedType(format!(
                "boolean tag '{}' is not an integer type",
                self.profile.bool_tag
            ))),
            Value::Number(_) => self.leaf(value, TypeTag::Number),
            Value::String(text) => match hex_codec::strip_prefix(text) {
                Some(digits) => Ok(Leaf::Hex(hex_codec::reverse_byte_order(digits)?)),
                None => Ok(Leaf::Text(text.clone())),
            },
            Value::BigInteger(i) => Ok(Leaf::Integer {
                value: i.clone(),
                tag: self.integer_default()?,
            }),
            other => Err(ValueError::UnsupportedType(format!(
                "{} has no encoding",
                other.shape()
            ))),
        }
    }

    fn integer_default(&self) -> Result<TypeTag, ValueError> {
        let tag = self.profile.integer_default;
        if !tag.is_integer() {
            return Err(ValueError::UnsupportedType(format!(
                "default integer tag '{}' is not an integer type",
                tag
            )));
        }
        Ok(tag)
    }
}

/// Text of a number as script runtimes print it: shortest round-trip digits,
/// positional for magnitudes in `[1e-6, 1e21)`, otherwise `<mantissa>e±<exp>`.
/// Integral values carry no fraction and `-0` is `0`.
fn number_text(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    } else if n == f64::INFINITY {
        return "Infinity".to_string();
    } else if n == f64::NEG_INFINITY {
        return "-Infinity".to_string();
    }

    let scientific = format!("{:e}", n);
    let exponent = scientific
        .split_once('e')
        .and_then(|(mantissa, exp)| Some((mantissa, exp.parse::<i32>().ok()?)));
    match exponent {
        Some((mantissa, exp)) if exp >= 21 => format!("{}e+{}", mantissa, exp),
        Some((mantissa, exp)) if exp < -6 => format!("{}e{}", mantissa, exp),
        _ => n.to_string(),
    }
}

fn unsupported(value: &Value, tag: TypeTag) -> ValueError {
    ValueError::UnsupportedType(format!("{} cannot be encoded as '{}'", value.shape(), tag))
}

fn structural_mismatch(value: &Value, hint: &TypeHint) -> ValueError {
    let expected = match hint {
        TypeHint::Tag(tag) => format!("'{}'", tag),
        TypeHint::Sequence(_) => "a sequence hint".to_string(),
        TypeHint::Record(_) => "a record hint".to_string(),
    };
    ValueError::TypeMismatch(format!("{} cannot take {}", value.shape(), expected))
}
