//! Mounting a navigation root and releasing it again.

use tracing::warn;

use crate::{InstanceId, Navigator, PathContext, Router, View, navigator::WeakNavigator};

/// A mounted navigation root.
///
/// Created by [`Router::mount`]. The host calls [`unmount`](Self::unmount)
/// when the root disappears from the screen; the navigator is released only
/// if nothing is left on top of the root, otherwise it stays registered.
/// The mount does not keep the navigator alive; the registry does.
#[derive(Clone, Debug)]
pub struct RootMount {
    /// Registry identity.
    id: InstanceId,
    /// The mounted navigator.
    navigator: WeakNavigator,
    /// Owning router.
    router: Router,
}

impl RootMount {
    pub(crate) fn new(id: InstanceId, navigator: WeakNavigator, router: Router) -> Self {
        Self {
            id,
            navigator,
            router,
        }
    }

    /// Registry identity of the mounted navigator.
    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// The mounted navigator, or `None` once it has been released and
    /// dropped.
    pub fn navigator(&self) -> Option<Navigator> {
        self.navigator.upgrade()
    }

    /// Register a route on the owning router, fluently. An invalid pattern
    /// is logged and skipped.
    #[must_use]
    pub fn path<F>(self, pattern: &str, factory: F) -> Self
    where
        F: Fn(&PathContext) -> View + Send + Sync + 'static,
    {
        if let Err(e) = self.router.register(pattern, factory) {
            warn!(pattern, error = %e, "route_pattern_rejected");
        }
        self
    }

    /// Release the navigator if its stack is no deeper than the configured
    /// release depth. Returns whether it was released.
    pub fn unmount(&self) -> bool {
        let depth = self.router.config().release_depth;
        self.router.registry().release_if_exhausted(self.id, depth)
    }
}
