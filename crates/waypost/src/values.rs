//! Heterogeneous named values carried into routed views.
//!
//! Bindings and user data are stored type-erased. Readers name the type they
//! expect; a missing name or a different stored type is reported as an error
//! rather than papered over with a default.

use std::{
    any::{Any, type_name},
    collections::HashMap,
    fmt::{self, Debug, Formatter},
    sync::Arc,
};

use parking_lot::Mutex;

use crate::{Error, Result};

/// A stored value plus the name of its concrete type for diagnostics.
#[derive(Clone)]
struct Entry {
    /// The erased value.
    value: Arc<dyn Any + Send + Sync>,
    /// `type_name` of the stored value.
    type_name: &'static str,
}

/// Map from names to values of arbitrary types.
#[derive(Clone, Default)]
pub struct ValueMap {
    /// Entries by name.
    entries: HashMap<String, Entry>,
}

impl ValueMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `name`, replacing any previous value.
    pub fn insert<T: Any + Send + Sync>(&mut self, name: impl Into<String>, value: T) {
        self.entries.insert(
            name.into(),
            Entry {
                value: Arc::new(value),
                type_name: type_name::<T>(),
            },
        );
    }

    /// Borrow the value stored under `name` as a `T`.
    pub fn get<T: Any>(&self, name: &str) -> Result<&T> {
        let entry = self.entries.get(name).ok_or_else(|| Error::MissingValue {
            name: name.to_string(),
        })?;
        entry
            .value
            .downcast_ref::<T>()
            .ok_or_else(|| Error::TypeMismatch {
                name: name.to_string(),
                expected: type_name::<T>(),
                found: entry.type_name,
            })
    }

    /// Clone out the value stored under `name` as a `T`.
    pub fn get_cloned<T: Any + Clone>(&self, name: &str) -> Result<T> {
        self.get::<T>(name).cloned()
    }

    /// Whether any value is stored under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Debug for ValueMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.entries.iter().collect();
        names.sort_unstable_by(|a, b| a.0.cmp(b.0));
        f.debug_map()
            .entries(names.into_iter().map(|(k, e)| (k, e.type_name)))
            .finish()
    }
}

/// A shared, mutable cell giving two-way access to a value.
///
/// The caller keeps one clone and passes another into a route; writes from
/// either side are visible to both.
pub struct Binding<T> {
    /// Shared storage.
    cell: Arc<Mutex<T>>,
}

impl<T> Binding<T> {
    /// Create a binding holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            cell: Arc::new(Mutex::new(value)),
        }
    }

    /// Overwrite the bound value.
    pub fn set(&self, value: T) {
        *self.cell.lock() = value;
    }

    /// Mutate the bound value in place.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.cell.lock());
    }

    /// Read the bound value through a closure.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.cell.lock())
    }

    /// True when both bindings share the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }
}

impl<T: Clone> Binding<T> {
    /// Clone out the bound value.
    pub fn get(&self) -> T {
        self.cell.lock().clone()
    }
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T: Debug> Debug for Binding<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Binding").field(&*self.cell.lock()).finish()
    }
}
