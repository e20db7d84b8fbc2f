use crate::error::SinkError;
use crate::severity::EventClass;
use crate::sink::EventSink;

/// An event sink that accepts and drops every entry.
///
/// Useful for measuring the cost of the file path alone, and for setups
/// where only the file sink matters.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn write(&self, _source: &str, _text: &str, _class: EventClass) -> Result<(), SinkError> {
        Ok(())
    }
}
