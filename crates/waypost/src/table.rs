//! Route registration and resolution.

use std::{
    collections::{BTreeMap, HashMap},
    fmt::{self, Debug, Formatter},
    sync::Arc,
};

use parking_lot::RwLock;
use thiserror::Error;
use tracing::debug;

use crate::{
    PathContext, View,
    path::{self, ParseError, RouteKey},
};

/// A view factory registered for a route.
pub type Factory = Arc<dyn Fn(&PathContext) -> View + Send + Sync>;

/// Why a route string did not resolve.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The route string is not a valid route URL.
    #[error(transparent)]
    Invalid(#[from] ParseError),
    /// The route parsed, but nothing is registered under its key.
    #[error("no route registered for '{0}'")]
    Unregistered(RouteKey),
}

/// Outcome of a registration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registered {
    /// Key the factory was stored under.
    pub key: RouteKey,
    /// True when an earlier factory for the same key was replaced.
    pub replaced: bool,
}

/// A route string matched to its factory.
#[derive(Clone)]
pub struct Resolved {
    /// Matched key.
    pub key: RouteKey,
    /// Query parameters from the route string.
    pub params: BTreeMap<String, String>,
    /// Registered factory.
    factory: Factory,
}

impl Resolved {
    /// Invoke the factory.
    pub fn build(&self, ctx: &PathContext) -> View {
        (self.factory)(ctx)
    }

    /// Invoke the factory with a context holding only the query parameters.
    pub fn build_default(&self) -> View {
        self.build(&PathContext::new(self.params.clone()))
    }
}

impl Debug for Resolved {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolved")
            .field("key", &self.key)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Mapping from route keys to view factories.
///
/// Registering a key twice keeps the later factory.
#[derive(Default)]
pub struct RouteTable {
    /// Factories by key.
    routes: RwLock<HashMap<RouteKey, Factory>>,
}

impl RouteTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` for the route named by `pattern`. Any query in the
    /// pattern is ignored.
    pub fn register<F>(&self, pattern: &str, factory: F) -> Result<Registered, ParseError>
    where
        F: Fn(&PathContext) -> View + Send + Sync + 'static,
    {
        let key = path::key_of(pattern)?;
        Ok(self.register_key(key, Arc::new(factory)))
    }

    /// Register an already-normalized key.
    pub fn register_key(&self, key: RouteKey, factory: Factory) -> Registered {
        let replaced = self.routes.write().insert(key.clone(), factory).is_some();
        debug!(key = %key, replaced, "route_registered");
        Registered { key, replaced }
    }

    /// Resolve a route string, explaining failures.
    pub fn try_resolve(&self, route: &str) -> Result<Resolved, ResolveError> {
        let parsed = path::parse(route)?;
        let factory = self
            .routes
            .read()
            .get(&parsed.key)
            .cloned()
            .ok_or_else(|| ResolveError::Unregistered(parsed.key.clone()))?;
        Ok(Resolved {
            key: parsed.key,
            params: parsed.params,
            factory,
        })
    }

    /// Resolve a route string; `None` if it is malformed or unregistered.
    pub fn resolve(&self, route: &str) -> Option<Resolved> {
        self.try_resolve(route).ok()
    }

    /// Whether a factory is registered under `key`.
    pub fn contains(&self, key: &RouteKey) -> bool {
        self.routes.read().contains_key(key)
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.read().len()
    }

    /// True when no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.routes.read().is_empty()
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> Vec<RouteKey> {
        let mut keys: Vec<RouteKey> = self.routes.read().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl Debug for RouteTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("keys", &self.keys())
            .finish()
    }
}
