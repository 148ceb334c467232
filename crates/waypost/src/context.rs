//! Route parameters, bindings and user data handed to view factories.

use std::{any::Any, collections::BTreeMap, str::FromStr};

use crate::{Binding, Result, ValueMap};

/// Everything a route factory receives about the navigation that invoked it.
///
/// Query parameters are optional by nature and read as `Option`. Bindings
/// and user data are supplied deliberately by the caller, so reading one
/// asserts its presence and type: a miss is an `Err`, never a default.
#[derive(Clone, Debug, Default)]
pub struct PathContext {
    /// Query parameters from the route string.
    params: BTreeMap<String, String>,
    /// Two-way bindings supplied through a route builder.
    bindings: ValueMap,
    /// Arbitrary values supplied through a route builder.
    user_data: ValueMap,
}

impl PathContext {
    /// Context carrying only query parameters.
    pub fn new(params: BTreeMap<String, String>) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    /// Context carrying parameters, bindings and user data.
    pub fn with_values(
        params: BTreeMap<String, String>,
        bindings: ValueMap,
        user_data: ValueMap,
    ) -> Self {
        Self {
            params,
            bindings,
            user_data,
        }
    }

    /// All query parameters.
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// A single query parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// A query parameter parsed as `T`; `None` if absent or unparseable.
    pub fn param_as<T: FromStr>(&self, name: &str) -> Option<T> {
        self.param(name).and_then(|v| v.parse().ok())
    }

    /// The binding registered under `name`, which must hold a `T`.
    pub fn binding<T: Send + 'static>(&self, name: &str) -> Result<Binding<T>> {
        self.bindings.get_cloned::<Binding<T>>(name)
    }

    /// The user data value registered under `name`, which must be a `T`.
    pub fn user_data<T: Any + Clone>(&self, name: &str) -> Result<T> {
        self.user_data.get_cloned::<T>(name)
    }

    /// Borrow the user data value registered under `name`.
    pub fn user_data_ref<T: Any>(&self, name: &str) -> Result<&T> {
        self.user_data.get::<T>(name)
    }

    /// All bindings.
    pub fn bindings(&self) -> &ValueMap {
        &self.bindings
    }

    /// All user data.
    pub fn user_data_map(&self) -> &ValueMap {
        &self.user_data
    }
}
