//! Navigators keyed by instance id.

use std::{
    collections::HashMap,
    fmt::{self, Debug, Display, Formatter},
    sync::Arc,
};

use parking_lot::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::{EmptyRoot, Navigator, View, router::Shared};

/// Identity of a navigator in the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(Uuid);

impl InstanceId {
    /// A fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// The underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for InstanceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Table of live navigators, created on first lookup.
///
/// Release is cooperative: nothing is evicted unless the mount lifecycle (or
/// the application) asks for it.
pub struct NavigatorRegistry {
    /// Services handed to new navigators.
    shared: Arc<Shared>,
    /// Live navigators.
    navigators: Mutex<HashMap<InstanceId, Navigator>>,
}

impl NavigatorRegistry {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self {
            shared,
            navigators: Mutex::new(HashMap::new()),
        }
    }

    /// The navigator for `id`, created if absent.
    ///
    /// A created navigator is rooted at an [`EmptyRoot`] view so its stack is
    /// never empty.
    pub fn instance(&self, id: InstanceId) -> Navigator {
        if let Some(nav) = self.get(id) {
            return nav;
        }
        self.create(id, |_| View::new(EmptyRoot))
    }

    /// Create a navigator for `id`, mount the root produced by `root`, and
    /// register it. An existing navigator for `id` wins a creation race.
    pub(crate) fn create(
        &self,
        id: InstanceId,
        root: impl FnOnce(&Navigator) -> View,
    ) -> Navigator {
        let nav = Navigator::new(id, Arc::clone(&self.shared));
        let view = root(&nav);
        nav.mount_root(view);
        self.navigators
            .lock()
            .entry(id)
            .or_insert_with(|| {
                debug!(navigator = %id, "navigator_created");
                nav
            })
            .clone()
    }

    /// The navigator for `id`, if it exists.
    pub fn get(&self, id: InstanceId) -> Option<Navigator> {
        self.navigators.lock().get(&id).cloned()
    }

    /// Drop the navigator for `id`. Returns whether one was registered.
    pub fn remove(&self, id: InstanceId) -> bool {
        let removed = self.navigators.lock().remove(&id).is_some();
        if removed {
            debug!(navigator = %id, "navigator_released");
        }
        removed
    }

    /// Drop the navigator for `id` only if its stack is at most
    /// `release_depth` deep.
    pub fn release_if_exhausted(&self, id: InstanceId, release_depth: usize) -> bool {
        let Some(nav) = self.get(id) else {
            return false;
        };
        let depth = nav.depth();
        if depth > release_depth {
            debug!(navigator = %id, depth, "navigator_retained");
            return false;
        }
        self.remove(id)
    }

    /// Number of live navigators.
    pub fn len(&self) -> usize {
        self.navigators.lock().len()
    }

    /// True when no navigators are live.
    pub fn is_empty(&self) -> bool {
        self.navigators.lock().is_empty()
    }

    /// Identifiers of live navigators, sorted.
    pub fn ids(&self) -> Vec<InstanceId> {
        let mut ids: Vec<InstanceId> = self.navigators.lock().keys().copied().collect();
        ids.sort();
        ids
    }
}

impl Debug for NavigatorRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigatorRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}
