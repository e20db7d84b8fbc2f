use crate::error::SinkError;
use crate::severity::EventClass;
use crate::sink::EventSink;
use std::sync::{Mutex, MutexGuard};

/// One entry captured by [`MemoryEventSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
    pub source: String,
    pub text: String,
    pub class: EventClass,
}

/// Event sink that keeps entries in memory, for tests and diagnostics.
#[derive(Debug, Default)]
pub struct MemoryEventSink {
    events: Mutex<Vec<CapturedEvent>>,
    registrations: Mutex<Vec<String>>,
}

impl MemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far.
    pub fn events(&self) -> Vec<CapturedEvent> {
        lock(&self.events).clone()
    }

    /// Source names passed to `register_source`, in call order.
    pub fn registrations(&self) -> Vec<String> {
        lock(&self.registrations).clone()
    }
}

impl EventSink for MemoryEventSink {
    fn register_source(&self, source: &str) -> Result<(), SinkError> {
        lock(&self.registrations).push(source.to_string());
        Ok(())
    }

    fn write(&self, source: &str, text: &str, class: EventClass) -> Result<(), SinkError> {
        lock(&self.events).push(CapturedEvent {
            source: source.to_string(),
            text: text.to_string(),
            class,
        });
        Ok(())
    }
}

// A panic while holding the lock leaves the captured data intact.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
