use crate::config::Config;
use crate::error::ReportError;
use crate::fault::Fault;
use crate::flatten::{Flattener, Payload};
use crate::payload::Loggable;
use crate::record::{Caller, Field, LogRecord, Origin};
use crate::router::SinkRouter;
use crate::severity::Severity;
use crate::sink::EventSink;
use crate::tracing_sink::TracingEventSink;
use std::error::Error;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Message used by [`Logger::success`].
pub const SUCCESS_MESSAGE: &str = "Command Succeeded";

/// The logging facade.
///
/// Holds a read-only [`Config`] snapshot and the sinks. Every operation is
/// blocking and never fails from the caller's point of view: sink failures
/// and unreadable payload members are turned into exception reports.
///
/// When `trace` is off, the logging operations return before building a
/// record. [`Logger::report_exception`] is not affected by `trace`.
pub struct Logger {
    config: Config,
    router: SinkRouter,
    open: AtomicBool,
}

impl Logger {
    /// Logger whose event sink re-emits entries as `tracing` events.
    pub fn new(config: Config) -> Self {
        Self::with_event_sink(config, Arc::new(TracingEventSink))
    }

    pub fn with_event_sink(config: Config, events: Arc<dyn EventSink>) -> Self {
        Self {
            config,
            router: SinkRouter::new(events),
            open: AtomicBool::new(true),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether logging operations currently produce records.
    pub fn is_enabled(&self) -> bool {
        self.config.trace && self.open.load(Ordering::Acquire)
    }

    /// Stop producing records and flush the event sink.
    pub fn shutdown(&self) {
        if self.open.swap(false, Ordering::AcqRel) {
            if let Err(err) = self.router.flush() {
                tracing::warn!(error = %err, "event sink flush failed during shutdown");
            }
        }
    }

    /// Information record naming only the call site.
    pub fn info(&self, origin: &Origin, caller: Caller<'_>) {
        if !self.is_enabled() {
            return;
        }
        self.log(Severity::Information, origin, caller, None, None);
    }

    /// Information record carrying a typed payload.
    ///
    /// A structured payload is flattened into detail fields. A scalar
    /// payload is appended to the message instead (`origin:value`).
    pub fn info_payload<T: Loggable + ?Sized>(&self, origin: &Origin, caller: Caller<'_>, payload: &T) {
        if !self.is_enabled() {
            return;
        }
        let mut report = |err: &dyn Error| self.report_quietly(err, caller.username);
        let payload = Flattener::new(&mut report).flatten_payload(&payload);
        match payload {
            Payload::Scalar(value) => {
                self.log(Severity::Information, origin, caller, Some(value), None)
            }
            Payload::Fields(fields) => {
                self.log(Severity::Information, origin, caller, None, Some(fields))
            }
        }
    }

    /// Information record with a message.
    pub fn info_message(&self, origin: &Origin, caller: Caller<'_>, message: &str) {
        if !self.is_enabled() {
            return;
        }
        self.log(Severity::Information, origin, caller, Some(message.to_string()), None);
    }

    /// Information record with a message and raw `key:value` details.
    pub fn info_with<I, K, V>(&self, origin: &Origin, caller: Caller<'_>, message: &str, data: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: fmt::Display,
        V: fmt::Display,
    {
        if !self.is_enabled() {
            return;
        }
        let fields = collect_fields(data);
        self.log(Severity::Information, origin, caller, Some(message.to_string()), Some(fields));
    }

    /// Information record with raw `key:value` details and no message.
    pub fn info_data<I, K, V>(&self, origin: &Origin, caller: Caller<'_>, data: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: fmt::Display,
        V: fmt::Display,
    {
        if !self.is_enabled() {
            return;
        }
        let fields = collect_fields(data);
        self.log(Severity::Information, origin, caller, None, Some(fields));
    }

    pub fn warning(&self, origin: &Origin, caller: Caller<'_>, message: &str) {
        if !self.is_enabled() {
            return;
        }
        self.log(Severity::Warning, origin, caller, Some(message.to_string()), None);
    }

    pub fn error(&self, origin: &Origin, caller: Caller<'_>, message: &str) {
        if !self.is_enabled() {
            return;
        }
        self.log(Severity::Error, origin, caller, Some(message.to_string()), None);
    }

    pub fn debug(&self, origin: &Origin, caller: Caller<'_>, message: &str) {
        if !self.is_enabled() {
            return;
        }
        self.log(Severity::Debug, origin, caller, Some(message.to_string()), None);
    }

    /// Information record marking that the operation at `origin` completed.
    pub fn success(&self, origin: &Origin, caller: Caller<'_>) {
        if !self.is_enabled() {
            return;
        }
        self.log(
            Severity::Information,
            origin,
            caller,
            Some(SUCCESS_MESSAGE.to_string()),
            None,
        );
    }

    /// Build and dispatch a record of any severity.
    ///
    /// Returns without doing anything when logging is disabled. A sink
    /// failure is reported through [`Logger::report_exception`].
    pub fn log(
        &self,
        severity: Severity,
        origin: &Origin,
        caller: Caller<'_>,
        message: Option<String>,
        fields: Option<Vec<Field>>,
    ) {
        if !self.is_enabled() {
            return;
        }
        let mut record = LogRecord::new(severity, origin.clone(), caller);
        record.message = message;
        if let Some(fields) = fields {
            record = record.with_fields(fields);
        }

        if let Err(err) = self.router.dispatch(&record, &self.config) {
            self.report_quietly(&err, caller.username);
        }
    }

    /// Report an error and its whole `source()` chain.
    ///
    /// Written to the file sink when the destination includes it, and
    /// always to the event sink, regardless of `trace` and thresholds.
    /// Fails only when neither sink accepted the report.
    pub fn report_exception(
        &self,
        error: &(dyn Error + 'static),
        username: &str,
    ) -> Result<(), ReportError> {
        self.report_fault(&Fault::from_error(error), username)
    }

    /// Report a hand-built [`Fault`] chain.
    pub fn report_fault(&self, fault: &Fault, username: &str) -> Result<(), ReportError> {
        self.router.dispatch_fault(fault, username, &self.config)
    }

    fn report_quietly(&self, error: &(dyn Error + 'static), username: &str) {
        if let Err(err) = self.report_exception(error, username) {
            tracing::warn!(
                error = %error,
                report_error = %err,
                username,
                "failed to record exception report"
            );
        }
    }
}

fn collect_fields<I, K, V>(data: I) -> Vec<Field>
where
    I: IntoIterator<Item = (K, V)>,
    K: fmt::Display,
    V: fmt::Display,
{
    data.into_iter()
        .map(|(key, value)| Field::new(key.to_string(), value.to_string()))
        .collect()
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.config)
            .field("open", &self.open.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
