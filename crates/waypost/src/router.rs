//! The process-wide entry point: route table plus navigator registry.

use std::{
    fmt::{self, Debug, Formatter},
    sync::Arc,
};

use crate::{
    Diagnostic, DiagnosticSink, InstanceId, Navigator, NavigatorRegistry, PathContext, Presenter,
    Result, RootMount, RouteKey, RouteTable, RouterConfig, TracingSink, View, table::Resolved,
};

/// Services shared by every navigator of one router.
pub(crate) struct Shared {
    /// Registered routes.
    pub(crate) routes: RouteTable,
    /// Host presentation layer.
    pub(crate) presenter: Arc<dyn Presenter>,
    /// Where dropped requests are reported.
    pub(crate) diagnostics: Arc<dyn DiagnosticSink>,
    /// Router-wide defaults.
    pub(crate) config: RouterConfig,
}

/// Process-wide routing state: the route table and the navigator registry.
///
/// Construct one per application (or per test) and hand clones to whatever
/// needs to register routes or look up navigators.
#[derive(Clone)]
pub struct Router {
    /// Services shared with navigators.
    shared: Arc<Shared>,
    /// Live navigators.
    registry: Arc<NavigatorRegistry>,
}

impl Router {
    /// A router with default config that reports diagnostics to `tracing`.
    pub fn new(presenter: Arc<dyn Presenter>) -> Self {
        Self::with_config(presenter, RouterConfig::default())
    }

    /// A router with explicit config that reports diagnostics to `tracing`.
    pub fn with_config(presenter: Arc<dyn Presenter>, config: RouterConfig) -> Self {
        Self::with_parts(presenter, config, Arc::new(TracingSink))
    }

    /// A router with explicit config and diagnostic sink.
    pub fn with_parts(
        presenter: Arc<dyn Presenter>,
        config: RouterConfig,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        let shared = Arc::new(Shared {
            routes: RouteTable::new(),
            presenter,
            diagnostics,
            config,
        });
        let registry = Arc::new(NavigatorRegistry::new(Arc::clone(&shared)));
        Self { shared, registry }
    }

    /// Register `factory` for `pattern` (`scheme://host/path`). A later
    /// registration for the same key replaces this one.
    pub fn register<F>(&self, pattern: &str, factory: F) -> Result<RouteKey>
    where
        F: Fn(&PathContext) -> View + Send + Sync + 'static,
    {
        let registered = self.shared.routes.register(pattern, factory)?;
        if registered.replaced && self.shared.config.report_overwrites {
            self.shared.diagnostics.report(&Diagnostic::RouteOverwritten {
                key: registered.key.clone(),
            });
        }
        Ok(registered.key)
    }

    /// Resolve a route string against the table.
    pub fn resolve(&self, route: &str) -> Option<Resolved> {
        self.shared.routes.resolve(route)
    }

    /// Registered routes.
    pub fn routes(&self) -> &RouteTable {
        &self.shared.routes
    }

    /// Live navigators.
    pub fn registry(&self) -> &NavigatorRegistry {
        &self.registry
    }

    /// Router-wide defaults.
    pub fn config(&self) -> &RouterConfig {
        &self.shared.config
    }

    /// The navigator for `id`, created with an [`crate::EmptyRoot`] root if
    /// absent.
    pub fn navigator(&self, id: InstanceId) -> Navigator {
        self.registry.instance(id)
    }

    /// Create a navigator under a fresh id and mount the root produced by
    /// `root`, which receives the new navigator.
    pub fn mount(&self, root: impl FnOnce(&Navigator) -> View) -> RootMount {
        let id = InstanceId::new();
        let navigator = self.registry.create(id, root);
        RootMount::new(id, navigator.downgrade(), self.clone())
    }
}

impl Debug for Router {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.shared.routes)
            .field("registry", &self.registry)
            .field("config", &self.shared.config)
            .finish()
    }
}
