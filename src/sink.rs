use crate::error::SinkError;
use crate::severity::EventClass;

/// OS-level event log (Windows Event Log, syslog, journald, ...).
///
/// Implementations must be safe to call from any thread. Every call is
/// blocking and completes before the logging operation returns.
pub trait EventSink: Send + Sync {
    /// Make sure `source` exists as a named event source.
    ///
    /// Called once before the first write, and again after a failed
    /// registration. Must be idempotent and tolerate racing callers.
    /// Default implementation is a no-op.
    fn register_source(&self, _source: &str) -> Result<(), SinkError> {
        Ok(())
    }

    /// Submit one entry under `source` with the given classification.
    fn write(&self, source: &str, text: &str, class: EventClass) -> Result<(), SinkError>;

    /// Flush anything the backend buffers. Default implementation is a no-op.
    fn flush(&self) -> Result<(), SinkError> {
        Ok(())
    }
}
