use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical importance of a log record.
///
/// The discriminants are the filtering ranks: a record is written to the
/// file sink only when its rank is at or below the configured level. The
/// order is `Critical, Information, Error, Warning, Debug`, so a level of
/// `1` admits informational records but not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Critical = 0,
    Information = 1,
    Error = 2,
    Warning = 3,
    Debug = 4,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Critical,
        Severity::Information,
        Severity::Error,
        Severity::Warning,
        Severity::Debug,
    ];

    /// Numeric rank compared against `Config::level`.
    pub fn rank(self) -> i32 {
        self as i32
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::Information => "Information",
            Severity::Error => "Error",
            Severity::Warning => "Warning",
            Severity::Debug => "Debug",
        }
    }

    /// Classification used when the record is handed to an event sink.
    pub fn event_class(self) -> EventClass {
        match self {
            Severity::Critical | Severity::Error => EventClass::Error,
            Severity::Warning => EventClass::Warning,
            _ => EventClass::Information,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry type understood by OS-level event sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventClass {
    Error,
    Warning,
    Information,
}
