//! Text encodings of records and exception reports.
//!
//! File lines look like
//!
//! ```text
//! Time-2026-10-18 09:15:02.114,Type-Information,Message-shop::orders:place:start
//! ```
//!
//! and, when the record carries fields,
//!
//! ```text
//! Time-2026-10-18 09:15:02.114,Type-Information,Message-shop::orders:place,"Details-id:7
//! lines#Line#0_sku:A-1
//! "
//! ```
//!
//! The first detail line shares the header line. This layout is kept
//! byte-for-byte so existing log readers keep working.

use crate::fault::Fault;
use crate::record::LogRecord;
use crate::severity::Severity;
use chrono::{DateTime, Local};
use std::fmt::Write;

/// `chrono` format of the `Time-` token.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Both encodings of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub file: String,
    pub event: String,
}

pub fn format(record: &LogRecord) -> Rendered {
    Rendered {
        file: file_text(record),
        event: record.text(),
    }
}

/// The file sink encoding of a record, newline-terminated.
pub fn file_text(record: &LogRecord) -> String {
    let mut out = header(&record.timestamp, record.severity);
    match &record.fields {
        Some(fields) if !fields.is_empty() => {
            let _ = write!(out, "Message-{},\"Details-", record.text());
            for field in fields {
                let _ = writeln!(out, "{}:{}", field.key, field.value);
            }
            out.push_str("\"\n");
        }
        _ => {
            let _ = writeln!(out, "Message-{}", record.text());
        }
    }
    out
}

/// The file sink encoding of an exception report: the outer level, then
/// one `Inner Exception-` block per cause, closed by a `"` line.
pub fn fault_file_text(at: &DateTime<Local>, fault: &Fault) -> String {
    let mut out = header(at, Severity::Critical);
    let _ = writeln!(out, "Message-{},\"Details-", fault.message);
    for (key, value) in &fault.data {
        let _ = writeln!(out, "{key}:{value}");
    }
    out.push('\n');
    write_trace(&mut out, fault);

    for inner in fault.chain().skip(1) {
        out.push_str("Inner Exception-\n");
        let _ = writeln!(out, "Message-{},Details-", inner.message);
        for (key, value) in &inner.data {
            let _ = writeln!(out, "{key}:{value};");
        }
        write_trace(&mut out, inner);
    }
    out.push_str("\"\n");
    out
}

/// The event sink encoding of an exception report: one block per level of
/// the chain.
pub fn fault_event_text(fault: &Fault) -> String {
    let mut out = String::new();
    for level in fault.chain() {
        let _ = writeln!(out, "Message-{}", level.message);
        let _ = writeln!(out, "Source-{}", opt(&level.source));
        for (key, value) in &level.data {
            let _ = writeln!(out, "Data-{key}:{value}");
        }
        let _ = writeln!(out, "TargetSite-{}", opt(&level.target_site));
        let _ = writeln!(out, "StackTrace-{}", opt(&level.stack_trace));
        let _ = writeln!(out, "HelpLink-{}", opt(&level.help_link));
    }
    out
}

fn header(at: &DateTime<Local>, severity: Severity) -> String {
    format!("Time-{},Type-{},", at.format(TIMESTAMP_FORMAT), severity)
}

fn write_trace(out: &mut String, fault: &Fault) {
    let _ = writeln!(
        out,
        "HelpLink-{};Source-{};StackTrace-\n{}",
        opt(&fault.help_link),
        opt(&fault.source),
        opt(&fault.stack_trace)
    );
    let _ = writeln!(out, "TargetSite-{}", opt(&fault.target_site));
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}
