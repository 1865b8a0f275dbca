//! Global log stream instance.

use crate::logging::LogStream;

/// Console event stream.
///
/// Fed by the console (single producer, it runs on one task) and drained
/// by whatever owns the diagnostic output.
pub static CONSOLE_LOG_STREAM: LogStream = LogStream::new();
