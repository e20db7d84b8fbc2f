use crate::payload::{Identity, Loggable, Visit};
use crate::record::Field;
use std::error::Error;
use std::fmt;

/// Value written in place of a referenced value that is already being
/// flattened further up the same path.
pub const CYCLE_MARKER: &str = "<cycle>";

/// Result of flattening a top-level payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// The payload was a leaf; its rendered value.
    Scalar(String),
    /// The payload was a sequence or structured value.
    Fields(Vec<Field>),
}

/// Walks a [`Loggable`] value into an ordered list of [`Field`]s.
///
/// Keys are built as follows, starting from a prefix:
/// - a leaf yields one field keyed by the prefix itself;
/// - element `i` of a sequence is keyed `prefix#Label#i` (`Label#i` when the
///   prefix is empty), `Label` being the element's type label;
/// - member `name` of a structured value is keyed `prefix_name` (`name`
///   when the prefix is empty).
///
/// A member that fails to read is passed to the reporter and omitted. A
/// referenced or shared value met again on its own path yields a [`CYCLE_MARKER`] field
/// instead of being descended into.
pub struct Flattener<'r> {
    report: &'r mut dyn FnMut(&dyn Error),
    fields: Vec<Field>,
    path: Vec<Identity>,
    root: Option<String>,
}

impl<'r> Flattener<'r> {
    pub fn new(report: &'r mut dyn FnMut(&dyn Error)) -> Self {
        Self {
            report,
            fields: Vec::new(),
            path: Vec::new(),
            root: None,
        }
    }

    /// Flatten `value` under `prefix`.
    pub fn flatten(mut self, value: &dyn Loggable, prefix: &str) -> Vec<Field> {
        self.walk(prefix.to_string(), value, false);
        self.fields
    }

    /// Flatten a top-level payload, keeping a leaf payload apart from
    /// structured ones.
    pub fn flatten_payload(mut self, value: &dyn Loggable) -> Payload {
        self.walk(String::new(), value, true);
        match self.root {
            Some(scalar) if self.fields.is_empty() => Payload::Scalar(scalar),
            _ => Payload::Fields(self.fields),
        }
    }

    fn walk(&mut self, prefix: String, value: &dyn Loggable, root: bool) {
        let identity = value.identity();
        if let Some(id) = identity {
            if self.path.contains(&id) {
                self.fields.push(Field::new(prefix, CYCLE_MARKER));
                return;
            }
            self.path.push(id);
        }

        let mut frame = Frame {
            flattener: &mut *self,
            prefix,
            next_index: 0,
            root,
        };
        value.describe(&mut frame);

        if identity.is_some() {
            self.path.pop();
        }
    }
}

/// Convenience wrapper around [`Flattener::flatten`].
pub fn flatten(
    value: &dyn Loggable,
    prefix: &str,
    report: &mut dyn FnMut(&dyn Error),
) -> Vec<Field> {
    Flattener::new(report).flatten(value, prefix)
}

fn element_key(prefix: &str, label: &str, index: usize) -> String {
    if prefix.is_empty() {
        format!("{label}#{index}")
    } else {
        format!("{prefix}#{label}#{index}")
    }
}

fn member_key(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}_{name}")
    }
}

struct Frame<'f, 'r> {
    flattener: &'f mut Flattener<'r>,
    prefix: String,
    next_index: usize,
    root: bool,
}

impl Frame<'_, '_> {
    fn leaf(&mut self, value: String) {
        if self.root {
            self.flattener.root = Some(value);
        } else {
            self.flattener
                .fields
                .push(Field::new(self.prefix.clone(), value));
        }
    }
}

impl Visit for Frame<'_, '_> {
    fn visit_none(&mut self) {
        self.leaf(String::new());
    }

    fn visit_scalar(&mut self, value: &dyn fmt::Display) {
        self.leaf(value.to_string());
    }

    fn visit_element(&mut self, value: &dyn Loggable) {
        let key = element_key(&self.prefix, value.type_label(), self.next_index);
        self.next_index += 1;
        self.flattener.walk(key, value, false);
    }

    fn visit_member(&mut self, name: &str, value: &dyn Loggable) {
        let key = member_key(&self.prefix, name);
        self.flattener.walk(key, value, false);
    }

    fn visit_error(&mut self, error: &dyn Error) {
        (self.flattener.report)(error);
    }
}
