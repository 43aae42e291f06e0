use std::fmt;

use sha3::{Digest as Sha3Digest, Keccak256};
use tracing::{debug, trace};

use crate::digest::{Digest, DigestAlg};
use crate::profile::EncodingProfile;
use crate::resolver::{Step, TypeResolver};
use crate::type_tag::TypeHint;
use crate::validation::ValueError;
use crate::value::Value;

/// Error returned when a value cannot be encoded, with the location of the
/// offending element.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} (at {path})")]
pub struct EncodeError {
    path: String,
    #[source]
    kind: ValueError,
}

impl EncodeError {
    /// What went wrong.
    pub fn kind(&self) -> &ValueError {
        &self.kind
    }

    /// Location of the failing element, e.g. `root` or `items.[2].amount`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Drops the location.
    pub fn into_kind(self) -> ValueError {
        self.kind
    }
}

impl From<ValueError> for EncodeError {
    fn from(kind: ValueError) -> Self {
        Self {
            path: Path::root().to_string(),
            kind,
        }
    }
}

/// Helper for building value paths in errors and logs.
#[derive(Debug, Clone)]
struct Path {
    segments: Vec<String>,
}

impl Path {
    fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    fn push_field(&self, field: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(field.to_string());
        Self { segments }
    }

    fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(format!("[{}]", index));
        Self { segments }
    }

    fn error(&self, kind: ValueError) -> EncodeError {
        EncodeError {
            path: self.to_string(),
            kind,
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "root")
        } else {
            write!(f, "{}", self.segments.join("."))
        }
    }
}

/// Canonical pre-image of `value` under `hint`, without hashing it.
pub fn preimage(
    value: &Value,
    hint: &TypeHint,
    profile: &EncodingProfile,
) -> Result<Vec<u8>, EncodeError> {
    encode_subtree(&TypeResolver::new(*profile), value, hint, &Path::root())
}

fn encode_subtree(
    resolver: &TypeResolver,
    value: &Value,
    hint: &TypeHint,
    path: &Path,
) -> Result<Vec<u8>, EncodeError> {
    match resolver.resolve(value, hint).map_err(|e| path.error(e))? {
        Step::Sequence(items) => {
            let mut bytes = Vec::new();
            for (idx, (item, item_hint)) in items.into_iter().enumerate() {
                bytes.extend(encode_subtree(resolver, item, item_hint, &path.push_index(idx))?);
            }
            Ok(bytes)
        }
        Step::Record(fields) => {
            let mut bytes = Vec::new();
            for (name, child, child_hint) in fields {
                bytes.extend(encode_subtree(resolver, child, child_hint, &path.push_field(name))?);
            }
            Ok(bytes)
        }
        Step::Retag(data, tag) => encode_subtree(resolver, data, &TypeHint::Tag(tag), path),
        Step::Leaf(leaf) => {
            let bytes = leaf.to_bytes().map_err(|e| path.error(e))?;
            trace!(path = %path, tag = %leaf.tag(), len = bytes.len(), "encoded leaf");
            Ok(bytes)
        }
    }
}

/// Incremental hasher over encoded values.
///
/// Each [`update`](Encoder::update) encodes a whole value first and absorbs it
/// only if encoding succeeded, so a failed update leaves the accumulated state
/// untouched. Reading the digest finalizes a copy of the state and can be
/// repeated.
#[derive(Debug, Clone)]
pub struct Encoder<D = Keccak256> {
    hasher: D,
    resolver: TypeResolver,
    absorbed: usize,
}

impl Encoder<Keccak256> {
    /// Creates an encoder over a fresh Keccak-256 state with the default profile.
    pub fn new() -> Self {
        Self::with_profile(EncodingProfile::default())
    }

    /// Creates an encoder over a fresh Keccak-256 state.
    pub fn with_profile(profile: EncodingProfile) -> Self {
        Self::with_hasher(Keccak256::new(), profile)
    }

    /// Finalizes into a tagged [`Digest`].
    pub fn finalize_digest(&self) -> Digest {
        Digest {
            alg: DigestAlg::Keccak256,
            hex: self.digest(),
        }
    }
}

impl Default for Encoder<Keccak256> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Sha3Digest + Clone> Encoder<D> {
    /// Creates an encoder over an arbitrary hash state.
    pub fn with_hasher(hasher: D, profile: EncodingProfile) -> Self {
        Self {
            hasher,
            resolver: TypeResolver::new(profile),
            absorbed: 0,
        }
    }

    /// Encodes `value` with inferred types and absorbs the bytes.
    pub fn update(&mut self, value: &Value) -> Result<(), EncodeError> {
        self.update_with(value, &TypeHint::default())
    }

    /// Encodes `value` under `hint` and absorbs the bytes.
    pub fn update_with(&mut self, value: &Value, hint: &TypeHint) -> Result<(), EncodeError> {
        let bytes = encode_subtree(&self.resolver, value, hint, &Path::root())?;
        self.hasher.update(&bytes);
        self.absorbed += bytes.len();
        debug!(
            shape = value.shape(),
            len = bytes.len(),
            total = self.absorbed,
            "absorbed value"
        );
        Ok(())
    }

    /// Lowercase hex digest of everything absorbed so far.
    pub fn digest(&self) -> String {
        ::hex::encode(self.digest_as_array())
    }

    /// Digest bytes of everything absorbed so far.
    pub fn digest_as_array(&self) -> Vec<u8> {
        self.hasher.clone().finalize().to_vec()
    }

    /// Number of bytes absorbed so far.
    pub fn absorbed_len(&self) -> usize {
        self.absorbed
    }

    /// Profile used for untyped leaves.
    pub fn profile(&self) -> &EncodingProfile {
        self.resolver.profile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::type_tag::TypeTag;

    #[test]
    fn digest_is_repeatable() {
        let mut encoder = Encoder::new();
        encoder.update(&Value::from("hello")).unwrap();
        let first = encoder.digest();
        assert_eq!(encoder.digest(), first);
        assert_eq!(::hex::encode(encoder.digest_as_array()), first);
    }

    #[test]
    fn empty_encoder_hashes_empty_input() {
        assert_eq!(
            Encoder::new().digest(),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn failed_update_absorbs_nothing() {
        let mut encoder = Encoder::new();
        encoder.update(&Value::from("hello")).unwrap();
        let before = encoder.digest();

        let value = Value::sequence([Value::from(1), Value::from(-1)]);
        let hint = TypeHint::sequence([TypeTag::Uint(8), TypeTag::Uint(8)]);
        let err = encoder.update_with(&value, &hint).unwrap_err();

        assert_eq!(err.path(), "[1]");
        assert_eq!(encoder.digest(), before);
        assert_eq!(encoder.absorbed_len(), 5);
    }

    #[test]
    fn error_paths_name_fields_and_indices() {
        let value = Value::record([(
            "items",
            Value::sequence([Value::record([("amount", Value::from(300))])]),
        )]);
        let hint = TypeHint::record([(
            "items",
            TypeHint::sequence([TypeHint::record([("amount", TypeTag::Uint(8))])]),
        )]);
        let err = preimage(&value, &hint, &EncodingProfile::default()).unwrap_err();
        assert_eq!(err.path(), "items.[0].amount");
        assert!(matches!(err.kind(), ValueError::Overflow { .. }));
        assert!(err.to_string().contains("items.[0].amount"));
    }

    #[test]
    fn root_errors_say_root() {
        let err = preimage(&Value::Null, &TypeHint::default(), &EncodingProfile::default())
            .unwrap_err();
        assert_eq!(err.path(), "root");
    }

    #[test]
    fn typed_values_use_their_tag() {
        let bytes = preimage(
            &Value::typed(TypeTag::Uint(16), 258),
            &TypeHint::default(),
            &EncodingProfile::default(),
        )
        .unwrap();
        assert_eq!(bytes, vec![0x02, 0x01]);
    }

    #[test]
    fn hand_built_widths_are_rejected_before_absorbing() {
        let mut encoder = Encoder::new();
        for tag in [TypeTag::Int(4), TypeTag::Uint(512)] {
            let err = encoder
                .update_with(&Value::from(1), &TypeHint::Tag(tag))
                .unwrap_err();
            assert!(matches!(err.kind(), ValueError::UnsupportedType(_)));
        }
        assert_eq!(encoder.absorbed_len(), 0);
    }
}
