use crate::payload::{short_type_name, Loggable, Visit};
use serde::Serialize;
use serde_json::Value;

/// JSON values flatten like the shapes they hold: `null` is absent,
/// arrays are sequences, objects are structured values.
impl Loggable for Value {
    fn describe(&self, visit: &mut dyn Visit) {
        match self {
            Value::Null => visit.visit_none(),
            Value::Bool(b) => visit.visit_scalar(b),
            Value::Number(n) => visit.visit_scalar(n),
            Value::String(s) => visit.visit_scalar(s),
            Value::Array(items) => {
                for item in items {
                    visit.visit_element(item);
                }
            }
            Value::Object(map) => {
                for (key, value) in map {
                    visit.visit_member(key, value);
                }
            }
        }
    }

    fn type_label(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
        }
    }
}

/// Logs any `Serialize` value through its JSON form.
///
/// A value that fails to serialize is reported as a read failure.
pub struct Serialized<'a, T: ?Sized>(pub &'a T);

impl<T: Serialize + ?Sized> Loggable for Serialized<'_, T> {
    fn describe(&self, visit: &mut dyn Visit) {
        match serde_json::to_value(self.0) {
            Ok(value) => value.describe(visit),
            Err(error) => visit.visit_error(&error),
        }
    }

    fn type_label(&self) -> &'static str {
        short_type_name(std::any::type_name::<T>())
    }
}
