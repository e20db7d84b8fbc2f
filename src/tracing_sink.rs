use crate::error::SinkError;
use crate::severity::EventClass;
use crate::sink::EventSink;

/// `tracing` target used for entries emitted by [`TracingEventSink`].
pub const EVENT_TARGET: &str = "tracefile::event";

/// Default event sink: re-emits entries as `tracing` events so whatever
/// subscriber the process installed (journald, syslog, stdout) records
/// them.
///
/// `Error` entries are emitted at `ERROR`, `Warning` at `WARN`, everything
/// else at `INFO`. The event source travels as the `source` field.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn register_source(&self, source: &str) -> Result<(), SinkError> {
        tracing::debug!(target: EVENT_TARGET, source, "event source registered");
        Ok(())
    }

    fn write(&self, source: &str, text: &str, class: EventClass) -> Result<(), SinkError> {
        match class {
            EventClass::Error => tracing::error!(target: EVENT_TARGET, source, "{text}"),
            EventClass::Warning => tracing::warn!(target: EVENT_TARGET, source, "{text}"),
            EventClass::Information => tracing::info!(target: EVENT_TARGET, source, "{text}"),
        }
        Ok(())
    }
}
