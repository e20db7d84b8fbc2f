//! Shared helpers for the integration tests.
//!
//! Import with `mod common; use common::*;`.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracefile::memory_sink::MemoryEventSink;
use tracefile::{Config, EventClass, EventSink, FilterPolicy, Logger, SinkError, SinkMode};

pub const SOURCE: &str = "tracefile-tests";

/// Logging on, level 2, depth 1, everything under `dir`.
pub fn config(dir: &Path, destination: SinkMode) -> Config {
    Config {
        trace: true,
        log_path: dir.to_path_buf(),
        destination,
        level: 2,
        depth: 1,
        event_source: SOURCE.to_string(),
        filter_policy: FilterPolicy::FileOnly,
    }
}

pub fn memory_logger(config: Config) -> (Logger, Arc<MemoryEventSink>) {
    let events = Arc::new(MemoryEventSink::new());
    let logger = Logger::with_event_sink(config, events.clone());
    (logger, events)
}

/// Every `.log` file in the user's directory, sorted.
pub fn log_files(dir: &Path, user: &str) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir.join(user)) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "log"))
        .collect();
    files.sort();
    files
}

/// Content of the user's only log file, or `None` when nothing was written.
pub fn read_user_log(dir: &Path, user: &str) -> Option<String> {
    let files = log_files(dir, user);
    assert!(files.len() <= 1, "expected at most one log file, found {files:?}");
    files.first().map(|p| fs::read_to_string(p).unwrap())
}

pub fn count_class(events: &MemoryEventSink, class: EventClass) -> usize {
    events.events().iter().filter(|e| e.class == class).count()
}

/// Event sink that rejects everything.
pub struct FailingEventSink;

impl EventSink for FailingEventSink {
    fn write(&self, _source: &str, _text: &str, _class: EventClass) -> Result<(), SinkError> {
        Err(SinkError::Event("event log unavailable".to_string()))
    }
}
