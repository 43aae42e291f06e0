use num_bigint::BigInt;
use serde_json::Value as Json;

use crate::type_tag::TypeTag;
use crate::validation::ValueError;

/// Loosely-typed input accepted by the encoder.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value; has no encoding.
    Null,
    /// Boolean, encoded as `uint8` 0/1 unless hinted otherwise.
    Bool(bool),
    /// Floating-point literal; fractions are truncated when an integer is needed.
    Number(f64),
    /// Text. A `0x`/`0X` prefix marks hex text during inference.
    String(String),
    /// Arbitrary-precision integer.
    BigInteger(BigInt),
    /// Ordered elements.
    Sequence(Vec<Value>),
    /// Named fields in insertion order.
    Record(Vec<(String, Value)>),
    /// Value carrying its own type tag.
    Typed {
        /// Tag applied to `data`.
        ty: TypeTag,
        /// Wrapped value.
        data: Box<Value>,
    },
}

impl Value {
    /// Builds a record from `(name, value)` pairs, keeping their order.
    pub fn record<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Record(
            fields
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }

    /// Builds a sequence.
    pub fn sequence<V: Into<Value>>(items: impl IntoIterator<Item = V>) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Wraps `data` with an explicit tag.
    pub fn typed(ty: TypeTag, data: impl Into<Value>) -> Self {
        Value::Typed {
            ty,
            data: Box::new(data.into()),
        }
    }

    /// Short name of the runtime shape, for diagnostics.
    pub fn shape(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::BigInteger(_) => "big integer",
            Value::Sequence(_) => "sequence",
            Value::Record(_) => "record",
            Value::Typed { .. } => "typed value",
        }
    }

    /// Converts a JSON document.
    ///
    /// Integers become [`Value::BigInteger`] so no precision is lost, other
    /// numbers become [`Value::Number`]. An object with a string `type` member
    /// and a `data` member is a [`Value::Typed`]; any other object is a record
    /// in document order.
    pub fn from_json(json: &Json) -> Result<Self, ValueError> {
        match json {
            Json::Null => Ok(Value::Null),
            Json::Bool(b) => Ok(Value::Bool(*b)),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::BigInteger(i.into()))
                } else if let Some(u) = n.as_u64() {
                    Ok(Value::BigInteger(u.into()))
                } else {
                    n.as_f64()
                        .map(Value::Number)
                        .ok_or_else(|| ValueError::NotBigNumber(n.to_string()))
                }
            }
            Json::String(s) => Ok(Value::String(s.clone())),
            Json::Array(items) => Ok(Value::Sequence(
                items.iter().map(Value::from_json).collect::<Result<_, _>>()?,
            )),
            Json::Object(map) => match (map.get("type"), map.get("data")) {
                (Some(Json::String(ty)), Some(data)) => Ok(Value::Typed {
                    ty: ty.parse()?,
                    data: Box::new(Value::from_json(data)?),
                }),
                _ => Ok(Value::Record(
                    map.iter()
                        .map(|(name, child)| Ok((name.clone(), Value::from_json(child)?)))
                        .collect::<Result<_, ValueError>>()?,
                )),
            },
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::BigInteger(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Sequence(value)
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::BigInteger(BigInt::from(value))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_objects_keep_document_order() {
        let value = Value::from_json(&json!({"z": 1, "a": 2, "m": 3})).unwrap();
        let Value::Record(fields) = value else {
            panic!("expected record");
        };
        let names: Vec<&str> = fields.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn json_type_data_objects_are_typed() {
        let value = Value::from_json(&json!({"type": "uint64", "data": 666})).unwrap();
        assert_eq!(value, Value::typed(TypeTag::Uint(64), 666));
    }

    #[test]
    fn json_type_without_data_is_a_record() {
        let value = Value::from_json(&json!({"type": "uint64"})).unwrap();
        assert_eq!(value, Value::record([("type", "uint64")]));
    }

    #[test]
    fn json_typed_with_bad_tag_is_rejected() {
        assert!(matches!(
            Value::from_json(&json!({"type": "float", "data": 1})),
            Err(ValueError::UnsupportedType(_))
        ));
    }

    #[test]
    fn json_numbers_split_into_integers_and_floats() {
        assert_eq!(
            Value::from_json(&json!(18446744073709551615u64)).unwrap(),
            Value::BigInteger(BigInt::from(u64::MAX))
        );
        assert_eq!(Value::from_json(&json!(-3)).unwrap(), Value::from(-3));
        assert_eq!(Value::from_json(&json!(10.3)).unwrap(), Value::Number(10.3));
    }

    #[test]
    fn builders_nest() {
        let value = Value::record([
            ("list", Value::sequence([1, 2])),
            ("flag", Value::from(true)),
        ]);
        assert_eq!(
            value,
            Value::Record(vec![
                (
                    "list".into(),
                    Value::Sequence(vec![Value::from(1), Value::from(2)])
                ),
                ("flag".into(), Value::Bool(true)),
            ])
        );
    }
}
