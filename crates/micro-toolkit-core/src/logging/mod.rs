//! Logging abstractions for the gateway client

mod traits;
mod noop;
mod tracing_logger;

pub use traits::{Logger, SharedLogger};
pub use noop::NoOpLogger;
pub use tracing_logger::{TracingLogger, LOG_TARGET};
