//! Type-erased view content and its environment.

use std::{
    any::{Any, type_name},
    fmt::{self, Debug, Formatter},
    sync::Arc,
};

use crate::{
    Navigator, PathContext, PresentationState, Result, ValueMap, navigator::WeakNavigator,
};

/// A type-erased view node plus the ambient values it is rendered with.
///
/// The router never looks inside the content; presenters downcast it to
/// whatever concrete view type the application renders.
pub struct View {
    /// Application content.
    content: Box<dyn Any + Send>,
    /// `type_name` of the content.
    content_type: &'static str,
    /// Ambient values.
    env: Environment,
}

impl View {
    /// Wrap application content.
    pub fn new<T: Any + Send>(content: T) -> Self {
        Self {
            content: Box::new(content),
            content_type: type_name::<T>(),
            env: Environment::default(),
        }
    }

    /// Borrow the content as a `T`.
    pub fn content<T: Any>(&self) -> Option<&T> {
        self.content.downcast_ref::<T>()
    }

    /// `type_name` of the content.
    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    /// Ambient values for this view.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Mutable ambient values for this view.
    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// Attach an ambient value, for use in injection closures.
    #[must_use]
    pub fn with_value<T: Any + Send + Sync>(mut self, name: impl Into<String>, value: T) -> Self {
        self.env.values.insert(name, value);
        self
    }
}

impl Debug for View {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("content", &self.content_type)
            .field("env", &self.env)
            .finish()
    }
}

/// Ambient values visible to presented content.
///
/// The navigator injects itself, the presentation state of the screen, and
/// (for routed views) the path context. Injection closures add free-form
/// values on top.
#[derive(Clone, Default)]
pub struct Environment {
    /// Navigator that presented the view.
    navigator: WeakNavigator,
    /// Presentation bookkeeping for the view's screen.
    presentation: Option<PresentationState>,
    /// Context the route factory was invoked with.
    path: Option<Arc<PathContext>>,
    /// Injected values.
    values: ValueMap,
}

impl Environment {
    /// Navigator that presented this view, if it is still alive.
    pub fn navigator(&self) -> Option<Navigator> {
        self.navigator.upgrade()
    }

    /// Presentation state of this view's screen; detached if the view was
    /// not presented by a navigator.
    pub fn presentation(&self) -> PresentationState {
        self.presentation
            .clone()
            .unwrap_or_else(PresentationState::detached)
    }

    /// Path context, for views produced by a route factory.
    pub fn path_context(&self) -> Option<&PathContext> {
        self.path.as_deref()
    }

    /// An injected value, which must be a `T`.
    pub fn value<T: Any>(&self, name: &str) -> Result<&T> {
        self.values.get::<T>(name)
    }

    /// Add an injected value.
    pub fn insert_value<T: Any + Send + Sync>(&mut self, name: impl Into<String>, value: T) {
        self.values.insert(name, value);
    }

    /// All injected values.
    pub fn values(&self) -> &ValueMap {
        &self.values
    }

    pub(crate) fn set_navigator(&mut self, navigator: WeakNavigator) {
        self.navigator = navigator;
    }

    pub(crate) fn set_presentation(&mut self, state: PresentationState) {
        self.presentation = Some(state);
    }

    pub(crate) fn set_path_context(&mut self, ctx: Arc<PathContext>) {
        self.path = Some(ctx);
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("navigator", &self.navigator.upgrade().map(|n| n.id()))
            .field("presentation", &self.presentation)
            .field("path", &self.path)
            .field("values", &self.values)
            .finish()
    }
}
