//! # shardkey-core
//!
//! Deterministic partition key derivation for event routing.
//!
//! Given an event record, this crate computes a stable string key used to
//! route the event to the same partition of a downstream stream or queue on
//! every delivery:
//!
//! - **Event model**: a validated JSON record, optionally carrying an
//!   explicit `partitionKey` field
//! - **Canonical JSON**: deterministic serialization used as the hashing
//!   input for structured values
//! - **Hashing**: SHA3-512, lowercase hex
//! - **Derivation**: candidate selection plus length normalization, composed
//!   into the infallible [`derive_partition_key`]
//!
//! ## Cross-Language Contract
//!
//! The derived keys are consumed by services written in other languages.
//! Canonical JSON output and the 256-unit length cap are pinned by golden
//! fixtures under `tests/golden/` so that sibling implementations (for
//! example `JSON.stringify` over key-sorted objects in JavaScript, or
//! `json.dumps(v, sort_keys=True, separators=(",", ":"))` in Python)
//! produce byte-identical hashing input.
//!
//! ## Example
//!
//! ```rust
//! use shardkey_core::prelude::*;
//! use serde_json::json;
//!
//! let event = Event::from_value(json!({
//!     "partitionKey": "order-1234",
//!     "amount": 1999,
//! }))?;
//!
//! let key = derive_partition_key(Some(&event));
//! assert_eq!(key.as_str(), "order-1234");
//!
//! // Without an event there is still a (trivial) routable key.
//! assert_eq!(derive_partition_key(None).as_str(), "0");
//! # Ok::<(), shardkey_core::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod canonical_json;
pub mod error;
pub mod event;
pub mod hash;
pub mod observability;
pub mod partition;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use shardkey_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::event::{Event, PARTITION_KEY_FIELD};
    pub use crate::hash::{hash, HashInput};
    pub use crate::partition::{
        derive_partition_key, normalize, select_candidate, PartitionKey,
        MAX_PARTITION_KEY_LENGTH, TRIVIAL_PARTITION_KEY,
    };
}

// Re-export key types at crate root for ergonomics
pub use canonical_json::{to_canonical_bytes, to_canonical_string, CanonicalJsonError};
pub use error::{Error, Result};
pub use event::{Event, PARTITION_KEY_FIELD};
pub use hash::{hash, HashInput};
pub use observability::{derive_span, init_logging, LogFormat};
pub use partition::{
    derive_partition_key, normalize, select_candidate, PartitionKey, MAX_PARTITION_KEY_LENGTH,
    TRIVIAL_PARTITION_KEY,
};
