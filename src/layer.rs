use crate::logger::Logger;
use crate::record::{Caller, Field, Origin};
use crate::severity::Severity;
use std::sync::Arc;
use tracing::field::{Field as TracingField, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

const OWN_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Events emitted by the facility itself are never bridged.
fn is_own_target(target: &str) -> bool {
    target
        .strip_prefix(OWN_TARGET)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

/// Caller context used for events that do not carry their own.
#[derive(Clone, Debug)]
pub struct BridgeConfig {
    /// Username when the event has no `user`/`username` field.
    pub default_user: String,
    /// Depth when the event has no `depth` field.
    pub default_depth: i32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            default_user: "system".to_string(),
            default_depth: 1,
        }
    }
}

/// `tracing_subscriber` layer that turns `tracing` events into
/// [`Logger`] records.
///
/// - `ERROR` → Error, `WARN` → Warning, `INFO` → Information,
///   `DEBUG`/`TRACE` → Debug;
/// - the `user` (or `username`) and `depth` fields select the caller;
/// - the remaining fields become detail fields in recorded order;
/// - the origin is the event target plus the current span name (or
///   `event` outside any span).
pub struct BridgeLayer {
    logger: Arc<Logger>,
    config: BridgeConfig,
}

impl BridgeLayer {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self::with_config(logger, BridgeConfig::default())
    }

    pub fn with_config(logger: Arc<Logger>, config: BridgeConfig) -> Self {
        Self { logger, config }
    }
}

fn severity_of(level: &Level) -> Severity {
    if *level == Level::ERROR {
        Severity::Error
    } else if *level == Level::WARN {
        Severity::Warning
    } else if *level == Level::INFO {
        Severity::Information
    } else {
        Severity::Debug
    }
}

impl<S> Layer<S> for BridgeLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let meta = event.metadata();
        if is_own_target(meta.target()) || !self.logger.is_enabled() {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let operation = ctx
            .event_span(event)
            .map(|span| span.name())
            .unwrap_or("event");
        let origin = Origin::new(meta.target().to_string(), operation);

        let username = visitor
            .username
            .unwrap_or_else(|| self.config.default_user.clone());
        let depth = visitor.depth.unwrap_or(self.config.default_depth);

        self.logger.log(
            severity_of(meta.level()),
            &origin,
            Caller::new(&username, depth),
            visitor.message,
            Some(visitor.fields),
        );
    }
}

/// Collects an event's fields, pulling out the ones with special meaning.
#[derive(Default)]
pub struct FieldVisitor {
    pub fields: Vec<Field>,
    pub message: Option<String>,
    pub username: Option<String>,
    pub depth: Option<i32>,
}

impl FieldVisitor {
    fn push(&mut self, field: &TracingField, value: String) {
        match field.name() {
            "message" => self.message = Some(value),
            "user" | "username" => self.username = Some(value),
            name => self.fields.push(Field::new(name, value)),
        }
    }
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &TracingField, value: &str) {
        self.push(field, value.to_string());
    }

    fn record_i64(&mut self, field: &TracingField, value: i64) {
        if field.name() == "depth" {
            self.depth = i32::try_from(value).ok();
        } else {
            self.push(field, value.to_string());
        }
    }

    fn record_u64(&mut self, field: &TracingField, value: u64) {
        if field.name() == "depth" {
            self.depth = i32::try_from(value).ok();
        } else {
            self.push(field, value.to_string());
        }
    }

    fn record_bool(&mut self, field: &TracingField, value: bool) {
        self.push(field, value.to_string());
    }

    fn record_error(&mut self, field: &TracingField, value: &(dyn std::error::Error + 'static)) {
        self.push(field, value.to_string());
    }

    fn record_debug(&mut self, field: &TracingField, value: &dyn std::fmt::Debug) {
        self.push(field, format!("{:?}", value));
    }
}
