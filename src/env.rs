//! Environment variable names read by [`Config::from_env`](crate::config::Config::from_env).
//!
//! Any other key/value source can be used through
//! [`Config::from_lookup`](crate::config::Config::from_lookup) with the same
//! names.

/// `true` enables logging; anything else (or absence) disables it.
pub const TRACEFILE_TRACE_ENV: &str = "TRACEFILE_TRACE";

/// Root directory under which per-user log directories are created.
pub const TRACEFILE_LOG_PATH_ENV: &str = "TRACEFILE_LOG_PATH";

/// `file`, `event` (or `windows`), `both`.
pub const TRACEFILE_DESTINATION_ENV: &str = "TRACEFILE_DESTINATION";

/// Highest severity rank written to the file sink.
pub const TRACEFILE_LEVEL_ENV: &str = "TRACEFILE_LEVEL";

/// Highest caller depth written to the file sink.
pub const TRACEFILE_DEPTH_ENV: &str = "TRACEFILE_DEPTH";

/// Name under which entries are submitted to the event sink.
pub const TRACEFILE_EVENT_SOURCE_ENV: &str = "TRACEFILE_EVENT_SOURCE";

/// `true` applies the level/depth thresholds to the event sink as well.
pub const TRACEFILE_GATE_EVENTS_ENV: &str = "TRACEFILE_GATE_EVENTS";

/// Read an environment variable, treating unset and non-UTF-8 values alike.
pub fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
