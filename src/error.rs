use std::io;
use std::path::PathBuf;

/// Failure of a single sink write.
#[derive(thiserror::Error, Debug)]
pub enum SinkError {
    #[error("failed to create log directory {}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open log file {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to lock log file {}", .path.display())]
    Lock {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to append to log file {}", .path.display())]
    Append {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("event source {name:?} could not be registered: {reason}")]
    Register { name: String, reason: String },

    #[error("event sink rejected the entry: {0}")]
    Event(String),

    #[error("file and event sinks both failed; event sink: {event}")]
    Both {
        #[source]
        file: Box<SinkError>,
        event: Box<SinkError>,
    },
}

/// An exception report that no sink accepted.
#[derive(thiserror::Error, Debug)]
#[error("exception report was not recorded by any sink")]
pub struct ReportError {
    /// File sink failure, when the file sink was attempted.
    pub file: Option<SinkError>,
    #[source]
    pub event: SinkError,
}

/// Error type returned by the process-wide lifecycle helpers.
#[derive(thiserror::Error, Debug)]
pub enum InitError {
    #[error("the process-wide logger is already initialized")]
    AlreadyInitialized,

    #[error("a global tracing subscriber is already installed")]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}
