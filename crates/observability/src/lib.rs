//! Process-wide logging setup for hosts embedding the authorization core.
//!
//! The library crates only emit `tracing` events; installing a subscriber is
//! the host's call.

/// Tracing configuration (filters, layers).
pub mod tracing;

/// Initialize JSON logging with `RUST_LOG` (default `info`).
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init("info");
}

/// Like [`init`], with a custom default directive used when `RUST_LOG` is
/// unset (e.g. `"shopfloor_auth=debug"` to see every denial).
pub fn init_with_default(directive: &str) {
    tracing::init(directive);
}
