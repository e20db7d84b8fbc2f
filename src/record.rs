use crate::severity::Severity;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// One flattened `key:value` pair of a structured payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub key: String,
    pub value: String,
}

impl Field {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Logical call site that produced a record: a unit (module path) and the
/// operation inside it.
///
/// Rendered as `unit:operation`. Use [`origin!`](crate::origin) to build
/// one from the enclosing function.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Origin {
    pub unit: Cow<'static, str>,
    pub operation: Cow<'static, str>,
}

impl Origin {
    pub fn new(unit: impl Into<Cow<'static, str>>, operation: impl Into<Cow<'static, str>>) -> Self {
        Self {
            unit: unit.into(),
            operation: operation.into(),
        }
    }

    /// Split a `::`-separated function path into unit and operation.
    ///
    /// Trailing closure segments are dropped so that code inside a closure
    /// is attributed to the function that defines it.
    pub fn from_path(path: &'static str) -> Self {
        let mut path = path;
        while let Some(stripped) = path.strip_suffix("::{{closure}}") {
            path = stripped;
        }
        match path.rsplit_once("::") {
            Some((unit, operation)) => Self::new(unit, operation),
            None => Self::new("", path),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.unit, self.operation)
    }
}

/// Identity of whoever is logging: the username picks the destination
/// directory, the depth is the second filtering axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller<'a> {
    pub username: &'a str,
    pub depth: i32,
}

impl<'a> Caller<'a> {
    pub fn new(username: &'a str, depth: i32) -> Self {
        Self { username, depth }
    }
}

/// A single logging event, built inside one logging call and consumed by
/// the formatter and the sinks before that call returns.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub timestamp: DateTime<Local>,
    pub severity: Severity,
    pub origin: Origin,
    pub message: Option<String>,
    pub fields: Option<Vec<Field>>,
    pub username: String,
    pub depth: i32,
}

impl LogRecord {
    pub fn new(severity: Severity, origin: Origin, caller: Caller<'_>) -> Self {
        Self {
            timestamp: Local::now(),
            severity,
            origin,
            message: None,
            fields: None,
            username: caller.username.to_string(),
            depth: caller.depth,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach flattened fields; an empty list is stored as no fields.
    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = if fields.is_empty() { None } else { Some(fields) };
        self
    }

    /// `origin` or `origin:message`.
    pub fn text(&self) -> String {
        match &self.message {
            Some(message) => format!("{}:{}", self.origin, message),
            None => self.origin.to_string(),
        }
    }
}
