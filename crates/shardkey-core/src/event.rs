//! The event record handed to partition key derivation.
//!
//! An [`Event`] is a JSON object (string keys, arbitrary JSON values) that
//! optionally carries an explicit [`PARTITION_KEY_FIELD`]. Constructors
//! validate the shape once — the value must be an object and must not
//! contain floats anywhere in its tree — so that every constructed event is
//! guaranteed to canonicalize and hash.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::canonical_json::{self, ensure_no_floats};
use crate::error::{Error, Result};

/// Field an event producer can set to pick the partition key explicitly.
pub const PARTITION_KEY_FIELD: &str = "partitionKey";

/// A validated event record.
///
/// Field insertion order is irrelevant: hashing always goes through
/// canonical JSON, which sorts keys.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Event(Map<String, Value>);

impl Event {
    /// Creates a new empty event.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an event from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the value is not a JSON object,
    /// or [`Error::Canonical`] if the object contains floats.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Self::from_map(map),
            _ => Err(Error::invalid_input("expected an event object")),
        }
    }

    /// Builds an event from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the text is not valid JSON, and the same
    /// errors as [`Event::from_value`] otherwise.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Builds an event from an already-parsed JSON object map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Canonical`] if any value in the map contains floats.
    pub fn from_map(map: Map<String, Value>) -> Result<Self> {
        for value in map.values() {
            ensure_no_floats(value)?;
        }
        Ok(Self(map))
    }

    /// Inserts a field into the event, replacing any existing value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Canonical`] if the value contains floats.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Result<()> {
        ensure_no_floats(&value)?;
        self.0.insert(key.into(), value);
        Ok(())
    }

    /// Gets a field value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the explicit partition key field, if the producer set one.
    ///
    /// A present-but-`null` field is reported as `Some(Value::Null)`;
    /// candidate selection decides what absence means.
    #[must_use]
    pub fn partition_key(&self) -> Option<&Value> {
        self.0.get(PARTITION_KEY_FIELD)
    }

    /// Returns true if the event has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns an iterator over the event's fields.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Returns the canonical JSON text of the whole event.
    ///
    /// This is the exact hashing input used when no explicit partition key
    /// is available.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Canonical`] if canonicalization fails; constructors
    /// reject the inputs that could make it fail, so this is not reachable
    /// through the public API.
    pub fn canonical_string(&self) -> Result<String> {
        Ok(canonical_json::to_canonical_string(&self.0)?)
    }
}

impl<'de> Deserialize<'de> for Event {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Self::from_map(map).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_value_accepts_objects_only() {
        assert!(Event::from_value(json!({"a": 1})).is_ok());
        assert!(Event::from_value(json!("text")).is_err());
        assert!(Event::from_value(json!([1, 2])).is_err());
        assert!(Event::from_value(json!(null)).is_err());
    }

    #[test]
    fn from_value_rejects_floats_anywhere() {
        let err = Event::from_value(json!({"nested": {"deep": [1, 2.5]}}));
        assert!(matches!(err, Err(Error::Canonical(_))));
    }

    #[test]
    fn from_json_rejects_malformed_text() {
        assert!(matches!(Event::from_json("{not json"), Err(Error::Json(_))));
    }

    #[test]
    fn partition_key_accessor_distinguishes_null_from_absent() {
        let with_null = Event::from_value(json!({"partitionKey": null}))
            .unwrap_or_else(|e| panic!("event should build: {e}"));
        assert_eq!(with_null.partition_key(), Some(&Value::Null));

        let without = Event::from_value(json!({"other": "x"}))
            .unwrap_or_else(|e| panic!("event should build: {e}"));
        assert_eq!(without.partition_key(), None);
    }

    #[test]
    fn insert_validates_values() {
        let mut event = Event::new();
        assert!(event.insert("count", json!(3)).is_ok());
        assert!(event.insert("ratio", json!(0.5)).is_err());
        assert_eq!(event.len(), 1);
    }

    #[test]
    fn canonical_string_sorts_fields() {
        let event = Event::from_value(json!({"b": 1, "a": "x"}))
            .unwrap_or_else(|e| panic!("event should build: {e}"));
        let canonical = event
            .canonical_string()
            .unwrap_or_else(|e| panic!("canonicalize failed: {e}"));
        assert_eq!(canonical, r#"{"a":"x","b":1}"#);
    }

    #[test]
    fn deserialize_validates_like_from_value() {
        let ok: std::result::Result<Event, _> = serde_json::from_str(r#"{"a": 1}"#);
        assert!(ok.is_ok());

        let bad: std::result::Result<Event, _> = serde_json::from_str(r#"{"a": 1.5}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn serialize_round_trips_through_json() {
        let event = Event::from_value(json!({"partitionKey": "5", "n": 7}))
            .unwrap_or_else(|e| panic!("event should build: {e}"));
        let text = serde_json::to_string(&event)
            .unwrap_or_else(|e| panic!("serialize failed: {e}"));
        let back = Event::from_json(&text)
            .unwrap_or_else(|e| panic!("round trip failed: {e}"));
        assert_eq!(event, back);
    }
}
