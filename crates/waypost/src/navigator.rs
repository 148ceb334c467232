//! Navigation stacks and modal overlays.
//!
//! A [`Navigator`] keeps the logical stack and modal list and forwards each
//! change to the router's [`crate::Presenter`]. String routes are resolved
//! against the router's table before anything is rendered.

use std::{
    fmt::{self, Debug, Formatter},
    mem,
    sync::{Arc, Weak},
};

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::{
    Diagnostic, InstanceId, PathContext, PresentationMode, PresentationState, RouteBuilder,
    Screen, ScreenHandle, TransitionStyle, ValueMap, View, presenter::Completion,
    router::Shared, table::ResolveError,
};

/// Content of the root installed on a navigator created by lookup rather
/// than by [`crate::Router::mount`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmptyRoot;

/// Hook run on a freshly rendered screen before it is attached.
type Configure = Box<dyn FnOnce(&mut Screen) + Send>;

/// Transform applied to a routed view before it is presented.
pub(crate) type Injection<'a> = Box<dyn FnOnce(View) -> View + 'a>;

/// Per-request presentation options.
pub struct NavOptions {
    /// Animate the transition.
    pub animated: bool,
    /// Modal transition; ignored by push and replace.
    pub transition: TransitionStyle,
    /// Hook run on the rendered screen before it is attached.
    configure: Option<Configure>,
}

impl NavOptions {
    /// Animated, sliding up from the bottom, no configure hook.
    pub fn new() -> Self {
        Self {
            animated: true,
            transition: TransitionStyle::CoverVertical,
            configure: None,
        }
    }

    /// Options with animation disabled.
    pub fn instant() -> Self {
        Self::new().animated(false)
    }

    /// Set whether to animate.
    #[must_use]
    pub fn animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    /// Set the modal transition.
    #[must_use]
    pub fn transition(mut self, transition: TransitionStyle) -> Self {
        self.transition = transition;
        self
    }

    /// Set the hook run on the rendered screen before it is attached.
    #[must_use]
    pub fn configure(mut self, configure: impl FnOnce(&mut Screen) + Send + 'static) -> Self {
        self.configure = Some(Box::new(configure));
        self
    }

    pub(crate) fn set_configure(&mut self, configure: Option<Configure>) {
        self.configure = configure;
    }
}

impl Default for NavOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for NavOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavOptions")
            .field("animated", &self.animated)
            .field("transition", &self.transition)
            .field("configure", &self.configure.is_some())
            .finish()
    }
}

/// A fully accumulated string-routed navigation request.
pub(crate) struct RouteRequest {
    /// Route string to resolve.
    pub(crate) route: String,
    /// How to attach the resolved view.
    pub(crate) mode: PresentationMode,
    /// Presentation options.
    pub(crate) options: NavOptions,
    /// Bindings for the path context.
    pub(crate) bindings: ValueMap,
    /// User data for the path context.
    pub(crate) user_data: ValueMap,
}

/// Logical navigation state. The stack root sits at index 0.
#[derive(Debug, Default)]
struct NavState {
    /// Navigation stack.
    stack: Vec<ScreenHandle>,
    /// Modal overlays in presentation order.
    modals: Vec<ScreenHandle>,
}

/// Shared navigator internals.
pub(crate) struct Inner {
    /// Registry identity.
    id: InstanceId,
    /// Router services.
    shared: Arc<Shared>,
    /// Stack and modal list.
    state: Mutex<NavState>,
}

/// A rendered screen ready to attach.
struct Built {
    /// Rendered and configured screen.
    screen: Screen,
    /// State handed to the content.
    state: PresentationState,
    /// Whether to animate the attach.
    animated: bool,
}

/// One independent navigation stack plus its modal overlays.
///
/// Cheap to clone; clones share state. Presented content reaches its
/// navigator through [`crate::Environment::navigator`].
#[derive(Clone)]
pub struct Navigator {
    /// Shared internals.
    inner: Arc<Inner>,
}

/// Non-owning navigator reference held by builders, presentation states and
/// view environments.
#[derive(Clone, Default)]
pub(crate) struct WeakNavigator(Weak<Inner>);

impl Debug for WeakNavigator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakNavigator")
            .field("alive", &(self.0.strong_count() > 0))
            .finish()
    }
}

impl WeakNavigator {
    /// The navigator, if it is still alive.
    pub(crate) fn upgrade(&self) -> Option<Navigator> {
        self.0.upgrade().map(|inner| Navigator { inner })
    }
}

impl Navigator {
    /// A navigator with an empty stack. Callers mount a root before handing
    /// it out.
    pub(crate) fn new(id: InstanceId, shared: Arc<Shared>) -> Self {
        Self {
            inner: Arc::new(Inner {
                id,
                shared,
                state: Mutex::new(NavState::default()),
            }),
        }
    }

    pub(crate) fn downgrade(&self) -> WeakNavigator {
        WeakNavigator(Arc::downgrade(&self.inner))
    }

    /// Registry identity.
    pub fn id(&self) -> InstanceId {
        self.inner.id
    }

    /// Navigation options seeded from the router defaults.
    pub fn options(&self) -> NavOptions {
        self.inner.shared.config.nav_options()
    }

    /// Number of screens on the navigation stack, root included.
    pub fn depth(&self) -> usize {
        self.inner.state.lock().stack.len()
    }

    /// Navigation stack, root first.
    pub fn stack(&self) -> Vec<ScreenHandle> {
        self.inner.state.lock().stack.clone()
    }

    /// Root of the navigation stack.
    pub fn root(&self) -> Option<ScreenHandle> {
        self.inner.state.lock().stack.first().copied()
    }

    /// Top of the navigation stack.
    pub fn top(&self) -> Option<ScreenHandle> {
        self.inner.state.lock().stack.last().copied()
    }

    /// Presented modal screens, in presentation order.
    pub fn modals(&self) -> Vec<ScreenHandle> {
        self.inner.state.lock().modals.clone()
    }

    /// Whether `screen` is on the navigation stack.
    pub fn contains(&self, screen: ScreenHandle) -> bool {
        self.inner.state.lock().stack.contains(&screen)
    }

    /// Whether `screen` is currently presented modally.
    pub fn is_presented(&self, screen: ScreenHandle) -> bool {
        self.inner.state.lock().modals.contains(&screen)
    }

    /// True when both handles refer to the same navigator.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Start a string-routed request against this navigator.
    pub fn builder(&self) -> RouteBuilder {
        RouteBuilder::new(
            self.downgrade(),
            Arc::clone(&self.inner.shared.diagnostics),
            self.options(),
        )
    }

    /// Inject the navigator and a fresh presentation state into `view`, render
    /// it, and run the configure hook.
    fn build(&self, mut view: View, mode: PresentationMode, options: NavOptions) -> Built {
        let NavOptions {
            animated,
            transition,
            configure,
        } = options;
        let state = PresentationState::new(mode, self.downgrade());
        let env = view.env_mut();
        env.set_navigator(self.downgrade());
        env.set_presentation(state.clone());

        let handle = self.inner.shared.presenter.render(view);
        state.bind(handle);

        let mut screen = Screen::new(handle);
        if let Some(style) = mode.modal_style() {
            screen.set_modal_style(style);
            screen.set_transition(transition);
        }
        if let Some(configure) = configure {
            configure(&mut screen);
        }
        Built {
            screen,
            state,
            animated,
        }
    }

    /// Install `view` as the root of an empty or discarded stack.
    ///
    /// The root is not produced by a presentation mode, so its state is
    /// never visible and cannot be dismissed.
    pub fn mount_root(&self, view: View) -> PresentationState {
        let Built { screen, state, .. } =
            self.build(view, PresentationMode::None, NavOptions::instant());
        let discarded = mem::replace(&mut self.inner.state.lock().stack, vec![screen.handle()]);
        self.inner
            .shared
            .presenter
            .set_stack(&screen, &discarded, false);
        debug!(navigator = %self.id(), screen = screen.handle().raw(), "root_mounted");
        state
    }

    /// Attach `view` using `mode`. `None` attaches nothing.
    pub fn show(
        &self,
        view: View,
        mode: PresentationMode,
        options: NavOptions,
    ) -> Option<PresentationState> {
        match mode {
            PresentationMode::None => None,
            PresentationMode::Push => Some(self.push(view, options)),
            PresentationMode::Replace => Some(self.replace(view, options)),
            _ => Some(self.present_modal(view, mode, options)),
        }
    }

    /// Push `view` onto the navigation stack.
    pub fn push(&self, view: View, options: NavOptions) -> PresentationState {
        let Built {
            screen,
            state,
            animated,
        } = self.build(view, PresentationMode::Push, options);
        let depth = {
            let mut nav = self.inner.state.lock();
            nav.stack.push(screen.handle());
            nav.stack.len()
        };
        self.inner.shared.presenter.push(&screen, animated);
        debug!(navigator = %self.id(), screen = screen.handle().raw(), depth, "pushed");
        state
    }

    /// Push the view produced by `content`.
    pub fn push_with(
        &self,
        options: NavOptions,
        content: impl FnOnce() -> View,
    ) -> PresentationState {
        self.push(content(), options)
    }

    /// Pop the top of the stack. The root is never popped.
    pub fn pop(&self, animated: bool) -> Option<ScreenHandle> {
        let popped = {
            let mut nav = self.inner.state.lock();
            if nav.stack.len() > 1 {
                nav.stack.pop()
            } else {
                None
            }
        };
        match popped {
            Some(screen) => {
                self.inner.shared.presenter.pop(screen, animated);
                debug!(navigator = %self.id(), screen = screen.raw(), "popped");
            }
            None => trace!(navigator = %self.id(), "pop_at_root"),
        }
        popped
    }

    /// Pop everything above the root; returns the popped screens, bottom first.
    pub fn pop_to_root(&self, animated: bool) -> Vec<ScreenHandle> {
        let popped: Vec<ScreenHandle> = {
            let mut nav = self.inner.state.lock();
            if nav.stack.len() > 1 {
                nav.stack.drain(1..).collect()
            } else {
                Vec::new()
            }
        };
        if !popped.is_empty() {
            self.inner.shared.presenter.pop_to_root(&popped, animated);
            debug!(navigator = %self.id(), count = popped.len(), "popped_to_root");
        }
        popped
    }

    /// Discard the stack and install `view` as its only screen.
    pub fn replace(&self, view: View, options: NavOptions) -> PresentationState {
        let Built {
            screen,
            state,
            animated,
        } = self.build(view, PresentationMode::Replace, options);
        let discarded = mem::replace(&mut self.inner.state.lock().stack, vec![screen.handle()]);
        self.inner
            .shared
            .presenter
            .set_stack(&screen, &discarded, animated);
        debug!(
            navigator = %self.id(),
            screen = screen.handle().raw(),
            discarded = discarded.len(),
            "replaced"
        );
        state
    }

    /// Replace the stack with the view produced by `content`.
    pub fn replace_with(
        &self,
        options: NavOptions,
        content: impl FnOnce() -> View,
    ) -> PresentationState {
        self.replace(content(), options)
    }

    /// Present `view` as a modal overlay; the stack is untouched.
    fn present_modal(
        &self,
        view: View,
        mode: PresentationMode,
        options: NavOptions,
    ) -> PresentationState {
        let Built {
            screen,
            state,
            animated,
        } = self.build(view, mode, options);
        self.inner.state.lock().modals.push(screen.handle());
        self.inner.shared.presenter.present(&screen, animated);
        debug!(
            navigator = %self.id(),
            screen = screen.handle().raw(),
            mode = %mode,
            "presented"
        );
        state
    }

    /// Present `view` as a page sheet.
    pub fn sheet(&self, view: View, options: NavOptions) -> PresentationState {
        self.present_modal(view, PresentationMode::Sheet, options)
    }

    /// Present the view produced by `content` as a page sheet.
    pub fn sheet_with(&self, options: NavOptions, content: impl FnOnce() -> View) -> PresentationState {
        self.sheet(content(), options)
    }

    /// Present `view` full screen.
    pub fn full_screen(&self, view: View, options: NavOptions) -> PresentationState {
        self.present_modal(view, PresentationMode::FullScreen, options)
    }

    /// Present the view produced by `content` full screen.
    pub fn full_screen_with(
        &self,
        options: NavOptions,
        content: impl FnOnce() -> View,
    ) -> PresentationState {
        self.full_screen(content(), options)
    }

    /// Present `view` over the full screen, keeping what is underneath.
    pub fn over_full_screen(&self, view: View, options: NavOptions) -> PresentationState {
        self.present_modal(view, PresentationMode::OverFullScreen, options)
    }

    /// Present the view produced by `content` over the full screen.
    pub fn over_full_screen_with(
        &self,
        options: NavOptions,
        content: impl FnOnce() -> View,
    ) -> PresentationState {
        self.over_full_screen(content(), options)
    }

    /// Present `view` as a form sheet.
    pub fn form_sheet(&self, view: View, options: NavOptions) -> PresentationState {
        self.present_modal(view, PresentationMode::FormSheet, options)
    }

    /// Present the view produced by `content` as a form sheet.
    pub fn form_sheet_with(
        &self,
        options: NavOptions,
        content: impl FnOnce() -> View,
    ) -> PresentationState {
        self.form_sheet(content(), options)
    }

    /// Present `view` over the current context.
    pub fn current_context(&self, view: View, options: NavOptions) -> PresentationState {
        self.present_modal(view, PresentationMode::CurrentContext, options)
    }

    /// Present the view produced by `content` over the current context.
    pub fn current_context_with(
        &self,
        options: NavOptions,
        content: impl FnOnce() -> View,
    ) -> PresentationState {
        self.current_context(content(), options)
    }

    /// Present `view` over the current context, keeping what is underneath.
    pub fn over_current_context(&self, view: View, options: NavOptions) -> PresentationState {
        self.present_modal(view, PresentationMode::OverCurrentContext, options)
    }

    /// Present the view produced by `content` over the current context,
    /// keeping what is underneath.
    pub fn over_current_context_with(
        &self,
        options: NavOptions,
        content: impl FnOnce() -> View,
    ) -> PresentationState {
        self.over_current_context(content(), options)
    }

    /// Dismiss `screen` and every modal presented above it. Returns false,
    /// running `on_complete` immediately, if `screen` is not presented.
    pub(crate) fn dismiss_modal(
        &self,
        screen: ScreenHandle,
        animated: bool,
        on_complete: Completion,
    ) -> bool {
        let dismissed: Vec<ScreenHandle> = {
            let mut nav = self.inner.state.lock();
            match nav.modals.iter().position(|s| *s == screen) {
                Some(idx) => nav.modals.drain(idx..).collect(),
                None => Vec::new(),
            }
        };
        if dismissed.is_empty() {
            trace!(navigator = %self.id(), screen = screen.raw(), "dismiss_not_presented");
            on_complete();
            return false;
        }
        self.inner
            .shared
            .presenter
            .dismiss(&dismissed, animated, on_complete);
        debug!(
            navigator = %self.id(),
            screen = screen.raw(),
            count = dismissed.len(),
            "dismissed"
        );
        true
    }

    /// Dismiss the topmost modal overlay, if any.
    pub fn dismiss_top(&self, animated: bool) -> bool {
        let top = self.inner.state.lock().modals.last().copied();
        match top {
            Some(screen) => self.dismiss_modal(screen, animated, Box::new(|| {})),
            None => false,
        }
    }

    /// Resolve `route` and attach the resulting view using `mode`.
    ///
    /// Malformed or unregistered routes, and mode `None`, do nothing and
    /// return `None`; the reason goes to the router's diagnostic sink.
    pub fn route(
        &self,
        route: &str,
        mode: PresentationMode,
        options: NavOptions,
    ) -> Option<PresentationState> {
        self.route_request(
            RouteRequest {
                route: route.to_string(),
                mode,
                options,
                bindings: ValueMap::new(),
                user_data: ValueMap::new(),
            },
            None,
        )
    }

    /// Resolve a request, build its view with bindings and user data, apply
    /// the injection, and attach the injected view.
    pub(crate) fn route_request(
        &self,
        request: RouteRequest,
        injection: Option<Injection<'_>>,
    ) -> Option<PresentationState> {
        let RouteRequest {
            route,
            mode,
            options,
            bindings,
            user_data,
        } = request;
        let diagnostics = &self.inner.shared.diagnostics;
        if mode == PresentationMode::None {
            diagnostics.report(&Diagnostic::NoPresentation { route });
            return None;
        }
        let resolved = match self.inner.shared.routes.try_resolve(&route) {
            Ok(resolved) => resolved,
            Err(ResolveError::Invalid(error)) => {
                diagnostics.report(&Diagnostic::InvalidRoute { route, error });
                return None;
            }
            Err(ResolveError::Unregistered(key)) => {
                diagnostics.report(&Diagnostic::UnregisteredRoute { route, key });
                return None;
            }
        };

        let ctx = Arc::new(PathContext::with_values(
            resolved.params.clone(),
            bindings,
            user_data,
        ));
        let mut view = resolved.build(&ctx);
        view.env_mut().set_path_context(ctx);
        if let Some(inject) = injection {
            view = inject(view);
        }
        debug!(navigator = %self.id(), key = %resolved.key, mode = %mode, "route_dispatch");
        self.show(view, mode, options)
    }
}

impl Debug for Navigator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let nav = self.inner.state.lock();
        f.debug_struct("Navigator")
            .field("id", &self.inner.id)
            .field("stack", &nav.stack)
            .field("modals", &nav.modals)
            .finish()
    }
}
