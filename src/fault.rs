use serde::Serialize;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;
use std::fmt;

/// One level of an exception chain as it is written to the sinks.
///
/// Built by hand with the `with_*` methods or from any
/// [`std::error::Error`] through [`Fault::from_error`], which walks
/// `source()` all the way down.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Fault {
    pub message: String,
    pub source: Option<String>,
    pub data: Vec<(String, String)>,
    pub target_site: Option<String>,
    pub stack_trace: Option<String>,
    pub help_link: Option<String>,
    pub cause: Option<Box<Fault>>,
}

impl Fault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Convert an error and its whole `source()` chain.
    ///
    /// A level that is itself a [`Fault`] is kept as it is, with its
    /// details and causes. The outermost level carries a backtrace of the
    /// current call when `RUST_BACKTRACE`/`RUST_LIB_BACKTRACE` enable
    /// capturing and it has no stack trace of its own.
    pub fn from_error(error: &(dyn Error + 'static)) -> Self {
        let mut levels = Vec::new();
        let mut next = Some(error);
        while let Some(current) = next {
            if let Some(fault) = current.downcast_ref::<Fault>() {
                levels.push(fault.clone());
                break;
            }
            levels.push(Fault::new(current.to_string()));
            next = current.source();
        }

        let mut fault = levels
            .into_iter()
            .rev()
            .reduce(|cause, outer| outer.with_cause(cause))
            .unwrap_or_default();
        if fault.stack_trace.is_none() {
            let backtrace = Backtrace::capture();
            if backtrace.status() == BacktraceStatus::Captured {
                fault.stack_trace = Some(backtrace.to_string());
            }
        }
        fault
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.data.push((key.into(), value.to_string()));
        self
    }

    pub fn with_target_site(mut self, target_site: impl Into<String>) -> Self {
        self.target_site = Some(target_site.into());
        self
    }

    pub fn with_stack_trace(mut self, stack_trace: impl Into<String>) -> Self {
        self.stack_trace = Some(stack_trace.into());
        self
    }

    pub fn with_help_link(mut self, help_link: impl Into<String>) -> Self {
        self.help_link = Some(help_link.into());
        self
    }

    pub fn with_cause(mut self, cause: Fault) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// This level followed by every nested cause.
    pub fn chain(&self) -> impl Iterator<Item = &Fault> {
        std::iter::successors(Some(self), |fault| fault.cause.as_deref())
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for Fault {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_deref().map(|cause| cause as &(dyn Error + 'static))
    }
}
