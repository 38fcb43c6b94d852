//! Tracing subscriber initialization.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a global `fmt` subscriber filtered by `RUST_LOG`, or by
/// `default_filter` when the variable is unset or invalid.
///
/// Returns false when a global subscriber was already installed.
pub fn try_init(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}

/// Like [`try_init`], ignoring whether a subscriber was already installed.
pub fn init(default_filter: &str) {
    let _ = try_init(default_filter);
}
