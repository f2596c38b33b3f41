//! Logger that forwards to `tracing`

use super::traits::Logger;

/// Target used for every event emitted by [`TracingLogger`]
pub const LOG_TARGET: &str = "micro_toolkit";

/// Forwards log messages to the `tracing` crate.
///
/// This is the default logger of the gateway client, so host applications
/// control output with their own subscriber (e.g. `RUST_LOG=micro_toolkit=debug`).
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(target: LOG_TARGET, "{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!(target: LOG_TARGET, "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: LOG_TARGET, "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: LOG_TARGET, "{}", message);
    }
}
