//! Partition key derivation.
//!
//! The derivation pipeline is linear: pick a candidate from the event,
//! then cap its length.
//!
//! ```text
//! derive_partition_key(event)
//!   ├─ no event            -> TRIVIAL_PARTITION_KEY ("0")
//!   ├─ select_candidate    -> explicit field, or SHA3-512 of the event
//!   └─ normalize           -> candidate, or SHA3-512 if over 256 units
//! ```
//!
//! The same event always derives the same key, so a stream consumer can
//! rely on per-partition ordering for any one event source.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::canonical_json;
use crate::error::{Error, Result};
use crate::event::Event;
use crate::hash::hash;

/// Maximum partition key length, in UTF-16 code units.
pub const MAX_PARTITION_KEY_LENGTH: usize = 256;

/// Fixed fallback key used when no event is supplied.
pub const TRIVIAL_PARTITION_KEY: &str = "0";

/// Chooses the partition key candidate for an event.
///
/// An explicit, non-empty string `partitionKey` field wins and is returned
/// verbatim. An explicit field of any other non-null type is rendered as
/// canonical JSON (`42` becomes `"42"`). When the field is absent, `null`,
/// or an empty string, the candidate is the SHA3-512 digest of the whole
/// event — including the unroutable field itself, so the digest covers
/// exactly what the producer sent.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] when no event is supplied.
pub fn select_candidate(event: Option<&Event>) -> Result<String> {
    let Some(event) = event else {
        return Err(Error::invalid_input("expected an event object"));
    };

    match event.partition_key() {
        Some(Value::String(key)) if !key.is_empty() => Ok(key.clone()),
        Some(Value::Null | Value::String(_)) | None => {
            tracing::debug!("no routable partition key on event, hashing canonical form");
            hash(event)
        }
        Some(other) => Ok(canonical_json::to_canonical_string(other)?),
    }
}

/// Caps a candidate at [`MAX_PARTITION_KEY_LENGTH`] code units.
///
/// Candidates within the cap pass through unchanged; longer ones are
/// replaced by their SHA3-512 digest, which at 128 characters is always
/// within the cap. Applying `normalize` twice therefore equals applying it
/// once.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for an empty candidate.
pub fn normalize(candidate: &str) -> Result<String> {
    if candidate.is_empty() {
        return Err(Error::invalid_input("expected a string"));
    }

    let length = key_length(candidate);
    if length > MAX_PARTITION_KEY_LENGTH {
        tracing::debug!(length, "candidate exceeds length cap, hashing");
        return hash(candidate);
    }

    Ok(candidate.to_owned())
}

/// Derives the partition key for an event. Never fails.
///
/// An absent event routes to [`TRIVIAL_PARTITION_KEY`]; everything else
/// flows through [`select_candidate`] and [`normalize`].
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use shardkey_core::{derive_partition_key, Event};
///
/// let event = Event::from_value(json!({"partitionKey": "5"}))?;
/// assert_eq!(derive_partition_key(Some(&event)).as_str(), "5");
/// assert_eq!(derive_partition_key(None).as_str(), "0");
/// # Ok::<(), shardkey_core::Error>(())
/// ```
#[must_use]
pub fn derive_partition_key(event: Option<&Event>) -> PartitionKey {
    let Some(event) = event else {
        return PartitionKey(TRIVIAL_PARTITION_KEY.to_owned());
    };

    // A validated event always yields a non-empty candidate; the trivial
    // key stands in if that invariant is ever broken.
    let candidate = select_candidate(Some(event)).unwrap_or_else(|err| {
        tracing::warn!(%err, "candidate selection failed, using trivial key");
        TRIVIAL_PARTITION_KEY.to_owned()
    });

    let key = normalize(&candidate).unwrap_or_else(|err| {
        tracing::warn!(%err, "length normalization failed, using trivial key");
        TRIVIAL_PARTITION_KEY.to_owned()
    });

    PartitionKey(key)
}

/// Length in UTF-16 code units.
///
/// The cap is shared with sibling implementations in languages whose
/// strings count UTF-16 units, so the unit of measure must match here.
fn key_length(candidate: &str) -> usize {
    candidate.encode_utf16().count()
}

/// A derived partition key.
///
/// Guaranteed non-empty and at most [`MAX_PARTITION_KEY_LENGTH`] UTF-16
/// code units.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartitionKey(String);

impl PartitionKey {
    /// Derives the partition key for an event.
    ///
    /// Equivalent to [`derive_partition_key`].
    #[must_use]
    pub fn derive(event: Option<&Event>) -> Self {
        derive_partition_key(event)
    }

    /// Returns the key string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the key, returning the owned string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PartitionKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
