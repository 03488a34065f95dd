//! Basic usage example demonstrating key derivation.
//!
//! Run with: `cargo run --example basic_usage`

use serde_json::json;
use shardkey_core::error::Result;
use shardkey_core::observability::{init_logging, LogFormat};
use shardkey_core::prelude::*;

fn main() -> Result<()> {
    init_logging(LogFormat::Pretty);

    // Producers that set an explicit partition key route by it directly
    let explicit = Event::from_value(json!({
        "partitionKey": "order-1234",
        "amount": 1999,
    }))?;
    println!("explicit key: {}", derive_partition_key(Some(&explicit)));

    // Without one, the key is the SHA3-512 digest of the canonical event
    let implicit = Event::from_value(json!({"dummyField": "dummyValue"}))?;
    println!("derived key:  {}", derive_partition_key(Some(&implicit)));

    // No event at all still yields a routable key
    println!("no event:     {}", derive_partition_key(None));

    Ok(())
}
