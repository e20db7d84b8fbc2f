//! Structured logging to per-user, per-day, per-thread files and an
//! OS-level event sink.
//!
//! Records are filtered by a severity rank and a caller depth, payloads of
//! any shape are flattened into `key:value` detail lines, and errors are
//! reported with their whole cause chain.
//!
//! ```no_run
//! use tracefile::{origin, Caller, Config, Logger, SinkMode};
//!
//! let logger = Logger::new(Config {
//!     trace: true,
//!     destination: SinkMode::File,
//!     ..Config::default()
//! });
//! logger.info_message(&origin!(), Caller::new("alice", 1), "start");
//! ```

pub mod config;
pub mod env;
pub mod error;
pub mod fault;
pub mod file_sink;
pub mod filter;
pub mod flatten;
pub mod format;
pub mod init;
#[cfg(feature = "json")]
pub mod json;
pub mod layer;
pub mod logger;
mod macros;
pub mod memory_sink;
pub mod noop_sink;
pub mod payload;
pub mod record;
pub mod router;
pub mod severity;
pub mod sink;
pub mod tracing_sink;

pub use config::{Config, FilterPolicy, SinkMode};
pub use error::{InitError, ReportError, SinkError};
pub use fault::Fault;
pub use logger::Logger;
pub use payload::{Identity, Loggable, Opaque, Visit};
pub use record::{Caller, Field, LogRecord, Origin};
pub use severity::{EventClass, Severity};
pub use sink::EventSink;
