//! Tracing and logging setup shared by the server and the generator.

/// Tracing subscriber configuration (filters, output format).
pub mod subscriber;

pub use subscriber::{LogFormat, ParseLogFormatError};

/// Initialize process-wide tracing with the given output format.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init(format: LogFormat) {
    subscriber::init(format);
}
