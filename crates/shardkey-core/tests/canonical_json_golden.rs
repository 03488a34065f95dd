//! Golden vector tests for cross-language canonical JSON verification.
//!
//! These vectors pin the exact hashing input text. A sibling implementation
//! can verify them with the Python reference:
//!
//! ```python
//! import json
//!
//! with open('tests/golden/canonical_json_vectors.json') as f:
//!     data = json.load(f)
//!
//! for vector in data['vectors']:
//!     canonical = json.dumps(vector['input'], sort_keys=True,
//!                            separators=(',', ':'), ensure_ascii=False)
//!     assert canonical == vector['expected_canonical'], vector['name']
//! ```
//!
//! `cargo xtask verify-goldens` runs exactly that check.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use serde_json::Value;
use shardkey_core::to_canonical_string;

#[derive(Debug, serde::Deserialize)]
struct VectorFile {
    vectors: Vec<Vector>,
}

#[derive(Debug, serde::Deserialize)]
struct Vector {
    name: String,
    input: Value,
    expected_canonical: String,
}

#[test]
fn canonical_json_golden_vectors() {
    let file: VectorFile =
        serde_json::from_str(include_str!("golden/canonical_json_vectors.json"))
            .expect("failed to parse golden vectors file");

    for vector in file.vectors {
        let canonical = to_canonical_string(&vector.input)
            .unwrap_or_else(|e| panic!("failed to canonicalize '{}': {e}", vector.name));
        assert_eq!(
            canonical, vector.expected_canonical,
            "vector '{}' mismatch:\n  got:      {}\n  expected: {}",
            vector.name, canonical, vector.expected_canonical
        );
    }
}
