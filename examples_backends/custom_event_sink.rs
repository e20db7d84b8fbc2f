use std::sync::Arc;

use tracefile::{
    origin, Caller, Config, EventClass, EventSink, Fault, Logger, SinkError, SinkMode,
};

/// Example of plugging in a custom event log by implementing `EventSink`
/// directly. Imagine this talks to a platform event service for which this
/// crate does not provide a built-in sink.
struct StderrEventLog;

impl EventSink for StderrEventLog {
    fn register_source(&self, source: &str) -> Result<(), SinkError> {
        eprintln!("[event-log] registering source {source}");
        Ok(())
    }

    fn write(&self, source: &str, text: &str, class: EventClass) -> Result<(), SinkError> {
        eprintln!("[event-log] {source} {class:?}: {text}");
        Ok(())
    }
}

fn main() {
    let config = Config {
        trace: true,
        destination: SinkMode::Event,
        event_source: "custom-sink-example".to_string(),
        ..Config::default()
    };
    let logger = Logger::with_event_sink(config, Arc::new(StderrEventLog));
    let caller = Caller::new("demo", 1);

    logger.info_message(&origin!(), caller, "custom event sink example started");
    logger.warning(&origin!(), caller, "disk usage above 80%");

    let fault = Fault::new("simulated failure")
        .with_source("custom-sink-example")
        .with_cause(Fault::new("root cause"));
    if let Err(err) = logger.report_fault(&fault, "demo") {
        eprintln!("report was not recorded: {err}");
    }
}
