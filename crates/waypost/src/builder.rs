//! Fluent, string-routed navigation requests.

use std::{any::Any, sync::Arc};

use crate::{
    Binding, Diagnostic, DiagnosticSink, NavOptions, PresentationMode, PresentationState, Screen,
    TransitionStyle, ValueMap, View,
    navigator::{Injection, RouteRequest, WeakNavigator},
};

/// Fluent accumulator for one string-routed navigation.
///
/// Nothing is validated until [`submit`](Self::submit): an empty or unknown
/// route, or a missing presentation mode, makes the submit a no-op.
///
/// ```ignore
/// nav.builder()
///     .route("app://detail?id=42")
///     .presentation(PresentationMode::Sheet)
///     .binding("selected", selected.clone())
///     .user_data("source", "list")
///     .submit_with(|view| view.with_value("theme", Theme::Light));
/// ```
pub struct RouteBuilder {
    /// Target navigator; the builder does not keep it alive.
    navigator: WeakNavigator,
    /// Where to report dropped requests.
    diagnostics: Arc<dyn DiagnosticSink>,
    /// Route string.
    route: String,
    /// Presentation mode.
    mode: PresentationMode,
    /// Animation, transition and configure hook.
    options: NavOptions,
    /// Two-way bindings for the destination.
    bindings: ValueMap,
    /// Arbitrary values for the destination.
    user_data: ValueMap,
}

impl RouteBuilder {
    pub(crate) fn new(
        navigator: WeakNavigator,
        diagnostics: Arc<dyn DiagnosticSink>,
        options: NavOptions,
    ) -> Self {
        Self {
            navigator,
            diagnostics,
            route: String::new(),
            mode: PresentationMode::None,
            options,
            bindings: ValueMap::new(),
            user_data: ValueMap::new(),
        }
    }

    /// Set the route string.
    #[must_use]
    pub fn route(mut self, route: impl Into<String>) -> Self {
        self.route = route.into();
        self
    }

    /// Set the presentation mode.
    #[must_use]
    pub fn presentation(mut self, mode: PresentationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set whether to animate.
    #[must_use]
    pub fn animated(mut self, animated: bool) -> Self {
        self.options.animated = animated;
        self
    }

    /// Set the modal transition.
    #[must_use]
    pub fn transition(mut self, style: TransitionStyle) -> Self {
        self.options.transition = style;
        self
    }

    /// Pass a two-way binding to the destination under `name`.
    #[must_use]
    pub fn binding<T: Send + 'static>(mut self, name: impl Into<String>, value: Binding<T>) -> Self {
        self.bindings.insert(name, value);
        self
    }

    /// Pass an arbitrary value to the destination under `name`.
    #[must_use]
    pub fn user_data<T: Any + Send + Sync>(mut self, name: impl Into<String>, value: T) -> Self {
        self.user_data.insert(name, value);
        self
    }

    /// Set the hook run on the rendered screen before it is attached.
    #[must_use]
    pub fn configure(mut self, configure: impl FnOnce(&mut Screen) + Send + 'static) -> Self {
        self.options.set_configure(Some(Box::new(configure)));
        self
    }

    /// Route and present the destination.
    pub fn submit(self) -> Option<PresentationState> {
        self.dispatch(None)
    }

    /// Route, transform the destination with `injection`, and present the
    /// transformed view.
    pub fn submit_with<'a>(
        self,
        injection: impl FnOnce(View) -> View + 'a,
    ) -> Option<PresentationState> {
        self.dispatch(Some(Box::new(injection)))
    }

    /// Hand the accumulated request to the navigator, if it still exists.
    fn dispatch(self, injection: Option<Injection<'_>>) -> Option<PresentationState> {
        let Self {
            navigator,
            diagnostics,
            route,
            mode,
            options,
            bindings,
            user_data,
        } = self;
        let Some(nav) = navigator.upgrade() else {
            diagnostics.report(&Diagnostic::NavigatorGone { route });
            return None;
        };
        nav.route_request(
            RouteRequest {
                route,
                mode,
                options,
                bindings,
                user_data,
            },
            injection,
        )
    }
}
