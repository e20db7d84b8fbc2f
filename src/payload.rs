//! The `Loggable` capability: how a value exposes its shape to the
//! flattener.
//!
//! A value describes itself by calling exactly one kind of [`Visit`]
//! callback: a single `visit_scalar`/`visit_none` for leaves, one
//! `visit_element` per item for sequences, one `visit_member` per field for
//! structured values, or `visit_error` when it cannot be read at all.
//! Structs usually get their impl from [`loggable!`](crate::loggable).

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::error::Error;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Arc, Mutex, RwLock};

/// Callbacks a [`Loggable`] value drives while describing itself.
pub trait Visit {
    /// The value is absent.
    fn visit_none(&mut self);

    /// The value is a leaf rendered through `Display`.
    fn visit_scalar(&mut self, value: &dyn fmt::Display);

    /// Next item of a sequence.
    fn visit_element(&mut self, value: &dyn Loggable);

    /// Named member of a structured value or mapping.
    fn visit_member(&mut self, name: &str, value: &dyn Loggable);

    /// The value (or the member being described) could not be read.
    fn visit_error(&mut self, error: &dyn Error);
}

/// A value that can be flattened into `key:value` detail fields.
pub trait Loggable {
    fn describe(&self, visit: &mut dyn Visit);

    /// Short type name used in sequence element keys (`Vec#Order#0`).
    fn type_label(&self) -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Where the value behind a pointer or reference lives, if any.
    ///
    /// Owned values report none. References and shared pointers report the
    /// value they point at; the flattener uses it to cut cycles.
    fn identity(&self) -> Option<Identity> {
        None
    }
}

/// Address of a value together with the type stored there.
///
/// A struct and its first member can share an address, so the type is part
/// of the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    addr: usize,
    type_name: &'static str,
}

impl Identity {
    pub fn of<T: ?Sized>(value: &T) -> Self {
        Self {
            addr: (value as *const T).cast::<()>() as usize,
            type_name: std::any::type_name::<T>(),
        }
    }
}

/// `alloc::vec::Vec<shop::Order>` -> `Vec`.
pub fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Logs any `Debug` value as a single opaque scalar.
#[derive(Clone, Copy)]
pub struct Opaque<T>(pub T);

impl<T: fmt::Debug> Loggable for Opaque<T> {
    fn describe(&self, visit: &mut dyn Visit) {
        visit.visit_scalar(&format_args!("{:?}", self.0));
    }

    fn type_label(&self) -> &'static str {
        short_type_name(std::any::type_name::<T>())
    }
}

macro_rules! display_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl Loggable for $ty {
            fn describe(&self, visit: &mut dyn Visit) {
                visit.visit_scalar(&self);
            }
        }
    )*};
}

display_scalar!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    str, String, IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, NaiveDate, NaiveDateTime, NaiveTime,
);

impl Loggable for Cow<'_, str> {
    fn describe(&self, visit: &mut dyn Visit) {
        let text: &str = self;
        visit.visit_scalar(&text);
    }
}

impl Loggable for Path {
    fn describe(&self, visit: &mut dyn Visit) {
        visit.visit_scalar(&self.display());
    }
}

impl Loggable for PathBuf {
    fn describe(&self, visit: &mut dyn Visit) {
        visit.visit_scalar(&self.display());
    }
}

impl<Tz: TimeZone> Loggable for DateTime<Tz>
where
    Tz::Offset: fmt::Display,
{
    fn describe(&self, visit: &mut dyn Visit) {
        visit.visit_scalar(self);
    }
}

impl<T: Loggable> Loggable for Option<T> {
    fn describe(&self, visit: &mut dyn Visit) {
        match self {
            Some(value) => value.describe(visit),
            None => visit.visit_none(),
        }
    }

    fn type_label(&self) -> &'static str {
        match self {
            Some(value) => value.type_label(),
            None => "Option",
        }
    }

    fn identity(&self) -> Option<Identity> {
        self.as_ref().and_then(Loggable::identity)
    }
}

impl<T: Loggable, E: Error> Loggable for Result<T, E> {
    fn describe(&self, visit: &mut dyn Visit) {
        match self {
            Ok(value) => value.describe(visit),
            Err(error) => visit.visit_error(error),
        }
    }

    fn type_label(&self) -> &'static str {
        match self {
            Ok(value) => value.type_label(),
            Err(_) => "Result",
        }
    }

    fn identity(&self) -> Option<Identity> {
        self.as_ref().ok().and_then(Loggable::identity)
    }
}

macro_rules! forward_pointer {
    ($($ptr:ident),*) => {$(
        impl<T: Loggable + ?Sized> Loggable for $ptr<T> {
            fn describe(&self, visit: &mut dyn Visit) {
                (**self).describe(visit)
            }

            fn type_label(&self) -> &'static str {
                (**self).type_label()
            }

            fn identity(&self) -> Option<Identity> {
                Some(Identity::of(&**self))
            }
        }
    )*};
}

forward_pointer!(Rc, Arc);

impl<T: Loggable + ?Sized> Loggable for Box<T> {
    fn describe(&self, visit: &mut dyn Visit) {
        (**self).describe(visit)
    }

    fn type_label(&self) -> &'static str {
        (**self).type_label()
    }

    fn identity(&self) -> Option<Identity> {
        (**self).identity()
    }
}

impl<T: Loggable + ?Sized> Loggable for &T {
    fn describe(&self, visit: &mut dyn Visit) {
        (**self).describe(visit)
    }

    fn type_label(&self) -> &'static str {
        (**self).type_label()
    }

    fn identity(&self) -> Option<Identity> {
        (**self).identity().or_else(|| Some(Identity::of(&**self)))
    }
}

impl<T: Loggable + Copy> Loggable for Cell<T> {
    fn describe(&self, visit: &mut dyn Visit) {
        self.get().describe(visit)
    }

    fn type_label(&self) -> &'static str {
        self.get().type_label()
    }

    fn identity(&self) -> Option<Identity> {
        self.get().identity()
    }
}

// A cell that is mutably borrowed elsewhere is reported as a read failure.
impl<T: Loggable + ?Sized> Loggable for RefCell<T> {
    fn describe(&self, visit: &mut dyn Visit) {
        match self.try_borrow() {
            Ok(value) => (*value).describe(visit),
            Err(error) => visit.visit_error(&error),
        }
    }

    fn type_label(&self) -> &'static str {
        match self.try_borrow() {
            Ok(value) => (*value).type_label(),
            Err(_) => "RefCell",
        }
    }

    fn identity(&self) -> Option<Identity> {
        self.try_borrow().ok().and_then(|value| (*value).identity())
    }
}

// Locks are only tried: a held or poisoned lock is a read failure, never a wait.
impl<T: Loggable> Loggable for Mutex<T> {
    fn describe(&self, visit: &mut dyn Visit) {
        match self.try_lock() {
            Ok(value) => (*value).describe(visit),
            Err(error) => visit.visit_error(&error),
        }
    }

    fn identity(&self) -> Option<Identity> {
        self.try_lock().ok().and_then(|value| (*value).identity())
    }
}

impl<T: Loggable> Loggable for RwLock<T> {
    fn describe(&self, visit: &mut dyn Visit) {
        match self.try_read() {
            Ok(value) => (*value).describe(visit),
            Err(error) => visit.visit_error(&error),
        }
    }

    fn identity(&self) -> Option<Identity> {
        self.try_read().ok().and_then(|value| (*value).identity())
    }
}

impl<T: Loggable> Loggable for [T] {
    fn describe(&self, visit: &mut dyn Visit) {
        for item in self {
            visit.visit_element(item);
        }
    }

    fn type_label(&self) -> &'static str {
        "Slice"
    }
}

impl<T: Loggable, const N: usize> Loggable for [T; N] {
    fn describe(&self, visit: &mut dyn Visit) {
        self.as_slice().describe(visit)
    }

    fn type_label(&self) -> &'static str {
        "Array"
    }
}

macro_rules! sequence {
    ($($seq:ident),*) => {$(
        impl<T: Loggable> Loggable for $seq<T> {
            fn describe(&self, visit: &mut dyn Visit) {
                for item in self.iter() {
                    visit.visit_element(item);
                }
            }
        }
    )*};
}

sequence!(Vec, VecDeque, LinkedList, BTreeSet);

impl<T: Loggable, S> Loggable for HashSet<T, S> {
    fn describe(&self, visit: &mut dyn Visit) {
        for item in self.iter() {
            visit.visit_element(item);
        }
    }
}

impl<K: fmt::Display, V: Loggable> Loggable for BTreeMap<K, V> {
    fn describe(&self, visit: &mut dyn Visit) {
        for (key, value) in self {
            visit.visit_member(&key.to_string(), value);
        }
    }
}

impl<K: fmt::Display, V: Loggable, S> Loggable for HashMap<K, V, S> {
    fn describe(&self, visit: &mut dyn Visit) {
        for (key, value) in self {
            visit.visit_member(&key.to_string(), value);
        }
    }
}
