//! Fixed-width integer slots (`uint<N>` / `int<N>`).
//!
//! A slot is `N / 8` bytes, least-significant byte first. It is produced from
//! the big-endian hex digits of the value: the digit pairs are reversed, the
//! redundant high digits (`0`, or `f` for negatives) are trimmed from the
//! right, the remainder is bounds-checked against `N / 4` digits and then
//! right-padded back to exactly `N / 4`.

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::One;

use crate::hex_codec;
use crate::type_tag::{check_width, TypeTag, MAX_WIDTH};
use crate::validation::ValueError;

/// Encodes `value` into the slot described by an integer `tag`.
pub fn encode(value: &BigInt, tag: TypeTag) -> Result<Vec<u8>, ValueError> {
    if let Some(bits) = tag.width() {
        check_width(bits)?;
    }
    let text = match tag {
        TypeTag::Uint(bits) => unsigned_digits(value, bits, tag)?,
        TypeTag::Int(bits) => signed_digits(value, bits, tag)?,
        other => {
            return Err(ValueError::UnsupportedType(format!(
                "'{}' is not a fixed-width integer type",
                other
            )))
        }
    };
    hex_codec::to_bytes(&text)
}

/// Reads a slot produced by [`encode`] back into an integer.
pub fn decode(bytes: &[u8], tag: TypeTag) -> Result<BigInt, ValueError> {
    let bits = tag.width().ok_or_else(|| {
        ValueError::UnsupportedType(format!("'{}' is not a fixed-width integer type", tag))
    })?;
    check_width(bits)?;
    if bytes.len() != usize::from(bits / 8) {
        return Err(ValueError::TypeMismatch(format!(
            "'{}' slot needs {} bytes, got {}",
            tag,
            bits / 8,
            bytes.len()
        )));
    }
    Ok(match tag {
        TypeTag::Int(_) => BigInt::from_signed_bytes_le(bytes),
        _ => BigInt::from(BigUint::from_bytes_le(bytes)),
    })
}

fn unsigned_digits(value: &BigInt, bits: u16, tag: TypeTag) -> Result<String, ValueError> {
    if value.sign() == Sign::Minus {
        return Err(ValueError::NegativeUnsigned {
            tag: tag.to_string(),
            value: value.to_string(),
        });
    }
    fit(value.to_str_radix(16), '0', bits, tag, value)
}

fn signed_digits(value: &BigInt, bits: u16, tag: TypeTag) -> Result<String, ValueError> {
    let max_bits = usize::from(MAX_WIDTH);
    let (digits, fill) = if value.sign() == Sign::Minus {
        // below -2^255 there is no 256-bit two's complement to start from
        if *value < -(BigInt::one() << (max_bits - 1)) {
            return Err(overflow(tag, value));
        }
        let twos = (BigInt::one() << max_bits) + value;
        (twos.to_str_radix(16), 'f')
    } else {
        (value.to_str_radix(16), '0')
    };

    let text = fit(digits, fill, bits, tag, value)?;

    // the most significant byte is the last pair; its top bit must match the sign
    let top_nibble = text.as_bytes()[text.len() - 2];
    let sign_bit = matches!(top_nibble, b'8'..=b'9' | b'a'..=b'f');
    if sign_bit != (fill == 'f') {
        return Err(overflow(tag, value));
    }
    Ok(text)
}

fn fit(
    big_endian: String,
    fill: char,
    bits: u16,
    tag: TypeTag,
    value: &BigInt,
) -> Result<String, ValueError> {
    let digits = usize::from(bits / 4);
    let mut aligned = big_endian;
    if aligned.len() % 2 == 1 {
        aligned.insert(0, fill);
    }

    let mut text = hex_codec::reverse_byte_order(&aligned)?;
    let kept = text.trim_end_matches(fill).len();
    text.truncate(kept);
    if text.len() > digits {
        return Err(overflow(tag, value));
    }

    let missing = digits - text.len();
    text.extend(std::iter::repeat(fill).take(missing));
    Ok(text)
}

fn overflow(tag: TypeTag, value: &BigInt) -> ValueError {
    ValueError::Overflow {
        tag: tag.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(text: &str) -> BigInt {
        text.parse().unwrap()
    }

    fn uint(bits: u16) -> TypeTag {
        TypeTag::uint(bits).unwrap()
    }

    fn int(bits: u16) -> TypeTag {
        TypeTag::int(bits).unwrap()
    }

    #[test]
    fn uint8_boundaries() {
        assert_eq!(encode(&big("255"), uint(8)).unwrap(), vec![0xff]);
        assert_eq!(encode(&big("0"), uint(8)).unwrap(), vec![0x00]);
        assert_eq!(encode(&big("16"), uint(8)).unwrap(), vec![0x10]);
        assert_eq!(
            encode(&big("256"), uint(8)),
            Err(ValueError::Overflow {
                tag: "uint8".into(),
                value: "256".into()
            })
        );
        assert_eq!(
            encode(&big("-1"), uint(8)),
            Err(ValueError::NegativeUnsigned {
                tag: "uint8".into(),
                value: "-1".into()
            })
        );
    }

    #[test]
    fn unsigned_slots_are_little_endian_and_padded() {
        assert_eq!(encode(&big("258"), uint(16)).unwrap(), vec![0x02, 0x01]);
        assert_eq!(
            encode(&big("258"), uint(64)).unwrap(),
            vec![0x02, 0x01, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(encode(&big("0"), uint(256)).unwrap(), vec![0u8; 32]);
        assert_eq!(encode(&big("4096"), uint(16)).unwrap(), vec![0x00, 0x10]);
        assert!(matches!(
            encode(&big("4096"), uint(8)),
            Err(ValueError::Overflow { .. })
        ));
    }

    #[test]
    fn uint256_accepts_full_range() {
        let max = (BigInt::one() << 256usize) - 1;
        assert_eq!(encode(&max, uint(256)).unwrap(), vec![0xff; 32]);
        assert!(matches!(
            encode(&(max + 1), uint(256)),
            Err(ValueError::Overflow { .. })
        ));
    }

    #[test]
    fn int8_boundaries() {
        assert_eq!(encode(&big("-1"), int(8)).unwrap(), vec![0xff]);
        assert_eq!(encode(&big("0"), int(8)).unwrap(), vec![0x00]);
        assert_eq!(encode(&big("127"), int(8)).unwrap(), vec![0x7f]);
        assert_eq!(encode(&big("-128"), int(8)).unwrap(), vec![0x80]);
        for out_of_range in ["128", "200", "-129", "-241", "255", "-256"] {
            assert!(
                matches!(
                    encode(&big(out_of_range), int(8)),
                    Err(ValueError::Overflow { .. })
                ),
                "{} should overflow int8",
                out_of_range
            );
        }
    }

    #[test]
    fn negative_values_sign_extend_with_ff() {
        assert_eq!(encode(&big("-258"), int(16)).unwrap(), vec![0xfe, 0xfe]);
        let mut expected = vec![0xfe, 0xfe];
        expected.extend([0xff; 30]);
        assert_eq!(encode(&big("-258"), int(256)).unwrap(), expected);
        assert_eq!(encode(&big("-16"), int(16)).unwrap(), vec![0xf0, 0xff]);
        assert_eq!(encode(&big("-4081"), int(16)).unwrap(), vec![0x0f, 0xf0]);
    }

    #[test]
    fn int256_extremes() {
        let min = -(BigInt::one() << 255usize);
        let mut expected = vec![0u8; 31];
        expected.push(0x80);
        assert_eq!(encode(&min, int(256)).unwrap(), expected);
        assert!(matches!(
            encode(&(min - 1), int(256)),
            Err(ValueError::Overflow { .. })
        ));

        let max = (BigInt::one() << 255usize) - 1;
        let mut expected = vec![0xff; 31];
        expected.push(0x7f);
        assert_eq!(encode(&max, int(256)).unwrap(), expected);
        assert!(matches!(
            encode(&(max + 1), int(256)),
            Err(ValueError::Overflow { .. })
        ));
    }

    #[test]
    fn decode_inverts_encode() {
        for (text, tag) in [("258", uint(16)), ("-258", int(256)), ("-1", int(8)), ("0", int(64))] {
            let value = big(text);
            let bytes = encode(&value, tag).unwrap();
            assert_eq!(decode(&bytes, tag).unwrap(), value);
        }
    }

    #[test]
    fn decode_checks_slot_length() {
        assert!(matches!(
            decode(&[0x01], uint(16)),
            Err(ValueError::TypeMismatch(_))
        ));
    }

    #[test]
    fn non_integer_tags_are_unsupported() {
        assert!(matches!(
            encode(&big("1"), TypeTag::Number),
            Err(ValueError::UnsupportedType(_))
        ));
    }

    #[test]
    fn unchecked_widths_are_unsupported() {
        for tag in [TypeTag::Int(4), TypeTag::Uint(0), TypeTag::Uint(12), TypeTag::Uint(512)] {
            assert!(
                matches!(encode(&big("0"), tag), Err(ValueError::UnsupportedType(_))),
                "{} was accepted",
                tag
            );
        }
        assert!(matches!(
            decode(&[0u8; 64], TypeTag::Uint(512)),
            Err(ValueError::UnsupportedType(_))
        ));
    }
}
