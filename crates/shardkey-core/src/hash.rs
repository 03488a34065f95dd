//! Stable hashing of derivation inputs.
//!
//! Every input is reduced to UTF-8 text — raw text as-is, structured values
//! through canonical JSON — and digested with SHA3-512, encoded as lowercase
//! hex. The digest length (128 characters) is always within the partition
//! key length cap, which is what makes length normalization converge.

use serde_json::Value;
use sha3::{Digest, Sha3_512};

use crate::canonical_json;
use crate::error::{Error, Result};
use crate::event::Event;

/// Length in characters of a hex-encoded SHA3-512 digest.
pub const DIGEST_LENGTH: usize = 128;

/// Input to [`hash`]: raw text, a validated event, or a bare JSON value.
#[derive(Debug, Clone, Copy)]
pub enum HashInput<'a> {
    /// Raw text, hashed as-is (no JSON quoting).
    Text(&'a str),
    /// A validated event record, hashed via its canonical JSON form.
    Record(&'a Event),
    /// A bare JSON value, hashed via its canonical JSON form.
    Json(&'a Value),
}

impl<'a> From<&'a str> for HashInput<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for HashInput<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a Event> for HashInput<'a> {
    fn from(event: &'a Event) -> Self {
        Self::Record(event)
    }
}

impl<'a> From<&'a Value> for HashInput<'a> {
    fn from(value: &'a Value) -> Self {
        Self::Json(value)
    }
}

/// Computes the lowercase hex SHA3-512 digest of the input.
///
/// Structured inputs are first rendered as canonical JSON, so two records
/// with the same fields always produce the same digest regardless of field
/// order. A JSON string value hashes its raw text, exactly like [`HashInput::Text`].
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for empty text or a null value. A null
/// marks an absent input and an empty string cannot identify anything, so
/// neither has a meaningful digest here; numeric zero and empty records are
/// ordinary values and hash normally.
///
/// # Example
///
/// ```rust
/// use shardkey_core::hash;
///
/// let digest = hash("dummy")?;
/// assert_eq!(digest.len(), 128);
/// # Ok::<(), shardkey_core::Error>(())
/// ```
pub fn hash<'a>(input: impl Into<HashInput<'a>>) -> Result<String> {
    match input.into() {
        HashInput::Text(text) => hash_text(text),
        HashInput::Record(event) => Ok(digest_hex(&event.canonical_string()?)),
        HashInput::Json(value) => match value {
            Value::Null => Err(Error::invalid_input("expected a string or an object")),
            Value::String(text) => hash_text(text),
            other => Ok(digest_hex(&canonical_json::to_canonical_string(other)?)),
        },
    }
}

fn hash_text(text: &str) -> Result<String> {
    if text.is_empty() {
        return Err(Error::invalid_input("expected a string or an object"));
    }
    Ok(digest_hex(text))
}

fn digest_hex(text: &str) -> String {
    hex::encode(Sha3_512::digest(text.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DUMMY_DIGEST: &str = "9624354fb5c52ee12dca2c1794003afcb8c2a150148bbe84f85f1ec608354f94f9fca96a59ad22e028ecb5f47d593da65c5fd77f281264e7fc970a7c2da705cc";

    #[test]
    fn text_digest_matches_known_vector() {
        let digest = hash("dummy").unwrap_or_else(|e| panic!("hash failed: {e}"));
        assert_eq!(digest, DUMMY_DIGEST);
        assert_eq!(digest.len(), DIGEST_LENGTH);
    }

    #[test]
    fn hashing_is_deterministic() {
        let first = hash("payload").unwrap_or_else(|e| panic!("hash failed: {e}"));
        let second = hash("payload").unwrap_or_else(|e| panic!("hash failed: {e}"));
        assert_eq!(first, second);
    }

    #[test]
    fn record_digest_equals_digest_of_canonical_text() {
        let event = Event::from_value(json!({"b": 1, "a": "x"}))
            .unwrap_or_else(|e| panic!("event should build: {e}"));
        let canonical = event
            .canonical_string()
            .unwrap_or_else(|e| panic!("canonicalize failed: {e}"));

        let from_record = hash(&event).unwrap_or_else(|e| panic!("hash failed: {e}"));
        let from_text = hash(canonical.as_str()).unwrap_or_else(|e| panic!("hash failed: {e}"));
        assert_eq!(from_record, from_text);
    }

    #[test]
    fn field_order_does_not_change_record_digest() {
        let first = Event::from_json(r#"{"a": "x", "b": 1}"#)
            .unwrap_or_else(|e| panic!("event should build: {e}"));
        let second = Event::from_json(r#"{"b": 1, "a": "x"}"#)
            .unwrap_or_else(|e| panic!("event should build: {e}"));

        assert_eq!(
            hash(&first).unwrap_or_else(|e| panic!("hash failed: {e}")),
            hash(&second).unwrap_or_else(|e| panic!("hash failed: {e}")),
        );
    }

    #[test]
    fn empty_text_is_rejected() {
        assert!(matches!(hash(""), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn null_value_is_rejected() {
        let null = Value::Null;
        assert!(matches!(hash(&null), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn empty_string_value_is_rejected() {
        let empty = json!("");
        assert!(matches!(hash(&empty), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn string_value_hashes_raw_text_without_quoting() {
        let value = json!("dummy");
        let digest = hash(&value).unwrap_or_else(|e| panic!("hash failed: {e}"));
        assert_eq!(digest, DUMMY_DIGEST);
    }

    #[test]
    fn zero_value_is_an_ordinary_input() {
        let zero = json!(0);
        let digest = hash(&zero).unwrap_or_else(|e| panic!("hash failed: {e}"));
        assert_eq!(digest.len(), DIGEST_LENGTH);
    }

    #[test]
    fn empty_record_is_an_ordinary_input() {
        let event = Event::new();
        let digest = hash(&event).unwrap_or_else(|e| panic!("hash failed: {e}"));
        assert_eq!(digest.len(), DIGEST_LENGTH);
    }
}
