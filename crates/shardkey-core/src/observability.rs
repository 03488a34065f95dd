//! Observability helpers.
//!
//! Derivation itself is pure; the crate only emits `tracing` events on the
//! fallback paths (whole-event hashing, length capping). This module gives
//! embedding services a consistent way to initialize logging and to wrap
//! derivation calls in a span.

use std::sync::Once;
use tracing::Span;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Log output format.
#[derive(Debug, Clone, Copy, Default)]
pub enum LogFormat {
    /// JSON structured logs (for production).
    Json,
    /// Pretty-printed logs (for development).
    #[default]
    Pretty,
}

/// Initializes the logging subsystem.
///
/// Call once at application startup. Safe to call multiple times;
/// subsequent calls are no-ops.
///
/// # Environment Variables
///
/// - `RUST_LOG`: Controls log levels (e.g., `info`, `shardkey_core=debug`)
///
/// # Example
///
/// ```rust
/// use shardkey_core::observability::{init_logging, LogFormat};
///
/// init_logging(LogFormat::Pretty);
/// ```
pub fn init_logging(format: LogFormat) {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        match format {
            LogFormat::Json => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(tracing_subscriber::fmt::layer().json())
                    .init();
            }
            LogFormat::Pretty => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(tracing_subscriber::fmt::layer().pretty())
                    .init();
            }
        }
    });
}

/// Creates a span for a key derivation call.
///
/// `source` names the stream or producer the event came from, so fallback
/// warnings emitted during derivation carry their origin.
///
/// # Example
///
/// ```rust
/// use shardkey_core::observability::derive_span;
///
/// let span = derive_span("orders-stream");
/// let _guard = span.enter();
/// // ... derive keys for events from this source
/// ```
#[must_use]
pub fn derive_span(source: &str) -> Span {
    tracing::info_span!("derive_partition_key", source = source)
}
