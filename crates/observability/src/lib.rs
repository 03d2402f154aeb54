//! Shared tracing/logging setup for backoffice binaries.

/// Initialize process-wide logging with the default filter (`info`).
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init("info");
}

/// Tracing subscriber configuration.
pub mod tracing;
