use crate::env::{
    env_var, TRACEFILE_DEPTH_ENV, TRACEFILE_DESTINATION_ENV, TRACEFILE_EVENT_SOURCE_ENV,
    TRACEFILE_GATE_EVENTS_ENV, TRACEFILE_LEVEL_ENV, TRACEFILE_LOG_PATH_ENV, TRACEFILE_TRACE_ENV,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Default severity rank threshold when none is configured.
pub const DEFAULT_LEVEL: i32 = 2;
/// Threshold used when the configured level or depth cannot be parsed.
pub const FALLBACK_THRESHOLD: i32 = 1;
/// Default depth threshold when none is configured.
pub const DEFAULT_DEPTH: i32 = 1;
/// Default root directory for log files.
pub const DEFAULT_LOG_PATH: &str = "logs";

/// Where records go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkMode {
    File,
    #[serde(alias = "windows")]
    Event,
    Both,
    /// Neither sink; selected by an unrecognised destination value.
    Off,
}

impl SinkMode {
    pub fn writes_file(self) -> bool {
        matches!(self, SinkMode::File | SinkMode::Both)
    }

    pub fn writes_events(self) -> bool {
        matches!(self, SinkMode::Event | SinkMode::Both)
    }
}

impl FromStr for SinkMode {
    type Err = std::convert::Infallible;

    /// Case-insensitive; unknown values select [`SinkMode::Off`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "file" => SinkMode::File,
            "event" | "windows" => SinkMode::Event,
            "both" => SinkMode::Both,
            _ => SinkMode::Off,
        })
    }
}

/// Which sinks the level/depth thresholds apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterPolicy {
    /// Thresholds gate the file write only; the event sink receives every
    /// record that passes the global enable check.
    #[default]
    FileOnly,
    /// Thresholds gate both sinks.
    AllSinks,
}

/// Read-only configuration snapshot owned by a [`Logger`](crate::Logger).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub trace: bool,
    pub log_path: PathBuf,
    pub destination: SinkMode,
    pub level: i32,
    pub depth: i32,
    pub event_source: String,
    pub filter_policy: FilterPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trace: false,
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            destination: SinkMode::Event,
            level: DEFAULT_LEVEL,
            depth: DEFAULT_DEPTH,
            event_source: default_event_source(),
            filter_policy: FilterPolicy::FileOnly,
        }
    }
}

impl Config {
    /// Load from the `TRACEFILE_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(env_var)
    }

    /// Load from any key/value source using the `TRACEFILE_*` names.
    ///
    /// Missing keys fall back to defaults and malformed thresholds fall back
    /// to [`FALLBACK_THRESHOLD`]; loading never fails.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config {
            trace: lookup(TRACEFILE_TRACE_ENV)
                .map(|v| is_true(&v))
                .unwrap_or(false),
            ..Config::default()
        };

        if let Some(path) = lookup(TRACEFILE_LOG_PATH_ENV).filter(|p| !p.trim().is_empty()) {
            config.log_path = PathBuf::from(path.trim());
        }
        if let Some(destination) = lookup(TRACEFILE_DESTINATION_ENV) {
            config.destination = match destination.parse() {
                Ok(mode) => mode,
                Err(never) => match never {},
            };
            if config.destination == SinkMode::Off {
                tracing::warn!(value = %destination, "unrecognised log destination; logging to no sink");
            }
        }
        if let Some(source) = lookup(TRACEFILE_EVENT_SOURCE_ENV).filter(|s| !s.trim().is_empty()) {
            config.event_source = source.trim().to_string();
        }
        config.level = threshold(lookup(TRACEFILE_LEVEL_ENV), DEFAULT_LEVEL, TRACEFILE_LEVEL_ENV);
        config.depth = threshold(lookup(TRACEFILE_DEPTH_ENV), DEFAULT_DEPTH, TRACEFILE_DEPTH_ENV);
        if lookup(TRACEFILE_GATE_EVENTS_ENV).is_some_and(|v| is_true(&v)) {
            config.filter_policy = FilterPolicy::AllSinks;
        }
        config
    }
}

fn is_true(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

fn threshold(raw: Option<String>, default: i32, key: &str) -> i32 {
    match raw {
        None => default,
        Some(raw) if raw.is_empty() => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "malformed threshold; using {FALLBACK_THRESHOLD}");
            FALLBACK_THRESHOLD
        }),
    }
}

fn default_event_source() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}
