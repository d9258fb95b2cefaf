//! Tracing initialization for embedders and tests.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. Calling this
/// more than once is harmless; later calls lose and keep the first
/// subscriber.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
