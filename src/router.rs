use crate::config::{Config, FilterPolicy};
use crate::error::{ReportError, SinkError};
use crate::fault::Fault;
use crate::file_sink::{destination_file, thread_tag, FileAppender};
use crate::filter::within_thresholds;
use crate::format::{fault_event_text, fault_file_text, format};
use crate::record::LogRecord;
use crate::severity::EventClass;
use crate::sink::EventSink;
use chrono::Local;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

/// Sends formatted records to the file sink and/or the event sink.
pub struct SinkRouter {
    files: FileAppender,
    events: Arc<dyn EventSink>,
    registered: OnceLock<()>,
}

impl SinkRouter {
    pub fn new(events: Arc<dyn EventSink>) -> Self {
        Self {
            files: FileAppender,
            events,
            registered: OnceLock::new(),
        }
    }

    /// Log file the calling thread writes to for `username` today.
    pub fn destination(config: &Config, username: &str) -> PathBuf {
        destination_file(
            &config.log_path,
            username,
            Local::now().date_naive(),
            thread_tag(),
        )
    }

    /// Write one record.
    ///
    /// The file write happens when the destination includes the file sink
    /// and the record is within the level/depth thresholds. The event
    /// write happens when the destination includes the event sink; the
    /// thresholds apply to it only under [`FilterPolicy::AllSinks`].
    ///
    /// Both sinks are attempted. When both fail, the returned
    /// [`SinkError::Both`] carries both failures.
    pub fn dispatch(&self, record: &LogRecord, config: &Config) -> Result<(), SinkError> {
        let admitted = within_thresholds(record.severity, record.depth, config);
        let rendered = format(record);

        let file = if config.destination.writes_file() && admitted {
            let path = Self::destination(config, &record.username);
            self.files.append(&path, &rendered.file)
        } else {
            Ok(())
        };

        let gate_events = config.filter_policy == FilterPolicy::AllSinks;
        let event = if config.destination.writes_events() && (admitted || !gate_events) {
            self.write_event(config, &rendered.event, record.severity.event_class())
        } else {
            Ok(())
        };

        match (file, event) {
            (Err(file), Err(event)) => Err(SinkError::Both {
                file: Box::new(file),
                event: Box::new(event),
            }),
            (file, event) => file.and(event),
        }
    }

    /// Write an exception report, ignoring thresholds and the enable flag.
    ///
    /// The file sink is used when the destination includes it; the event
    /// sink is always used. Fails only when no attempted sink accepted the
    /// report.
    pub fn dispatch_fault(
        &self,
        fault: &Fault,
        username: &str,
        config: &Config,
    ) -> Result<(), ReportError> {
        let file = if config.destination.writes_file() {
            let path = Self::destination(config, username);
            Some(self.files.append(&path, &fault_file_text(&Local::now(), fault)))
        } else {
            None
        };

        let event = self.write_event(config, &fault_event_text(fault), EventClass::Error);

        match (file, event) {
            (Some(Ok(())), _) | (_, Ok(())) => Ok(()),
            (file, Err(event)) => Err(ReportError {
                file: file.and_then(Result::err),
                event,
            }),
        }
    }

    pub fn flush(&self) -> Result<(), SinkError> {
        self.events.flush()
    }

    fn write_event(&self, config: &Config, text: &str, class: EventClass) -> Result<(), SinkError> {
        self.ensure_source(&config.event_source)?;
        self.events.write(&config.event_source, text, class)
    }

    fn ensure_source(&self, source: &str) -> Result<(), SinkError> {
        if self.registered.get().is_some() {
            return Ok(());
        }
        self.events.register_source(source)?;
        let _ = self.registered.set(());
        Ok(())
    }
}
