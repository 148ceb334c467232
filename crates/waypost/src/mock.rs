//! Test doubles for the presentation layer and the diagnostic sink.
//!
//! Enabled for this crate's tests and, for other crates, with the
//! `test-utils` feature.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::{
    Diagnostic, DiagnosticSink, Presenter, Screen, ScreenHandle, View, presenter::Completion,
};

/// Everything the mock has seen.
#[derive(Default)]
struct MockState {
    /// Last allocated handle.
    next: u64,
    /// Call names in order.
    calls: Vec<String>,
    /// Rendered views by handle; never dropped so tests can inspect them.
    views: HashMap<ScreenHandle, View>,
    /// Mirror of the stack as seen through presenter calls.
    stack: Vec<ScreenHandle>,
    /// Mirror of the modal list as seen through presenter calls.
    modals: Vec<ScreenHandle>,
    /// Screens as they were attached (push, set_stack, present), in order.
    attached: Vec<Screen>,
    /// Animation flag of every attach or detach call, in order.
    animated: Vec<bool>,
}

/// Presenter that records calls and mirrors the stack it is told about.
#[derive(Default)]
pub struct MockPresenter {
    /// Recorded state.
    state: Mutex<MockState>,
}

impl MockPresenter {
    /// A fresh mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of presenter calls in order.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().calls.clone()
    }

    /// Whether a call named `name` was made.
    pub fn calls_contains(&self, name: &str) -> bool {
        self.state.lock().calls.iter().any(|c| c == name)
    }

    /// How many calls named `name` were made.
    pub fn count(&self, name: &str) -> usize {
        self.state.lock().calls.iter().filter(|c| *c == name).count()
    }

    /// Forget recorded calls, keeping views and mirrors.
    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    /// Stack as mirrored from presenter calls.
    pub fn stack(&self) -> Vec<ScreenHandle> {
        self.state.lock().stack.clone()
    }

    /// Modal list as mirrored from presenter calls.
    pub fn modals(&self) -> Vec<ScreenHandle> {
        self.state.lock().modals.clone()
    }

    /// Screens in attach order.
    pub fn attached(&self) -> Vec<Screen> {
        self.state.lock().attached.clone()
    }

    /// The most recently attached screen.
    pub fn last_attached(&self) -> Option<Screen> {
        self.state.lock().attached.last().cloned()
    }

    /// Animation flags of attach and detach calls in order.
    pub fn animation_flags(&self) -> Vec<bool> {
        self.state.lock().animated.clone()
    }

    /// Inspect the view rendered as `handle`.
    ///
    /// The mock's lock is held while `f` runs; `f` must not call into the
    /// presenter.
    pub fn with_view<R>(&self, handle: ScreenHandle, f: impl FnOnce(&View) -> R) -> Option<R> {
        self.state.lock().views.get(&handle).map(f)
    }
}

impl Presenter for MockPresenter {
    fn render(&self, view: View) -> ScreenHandle {
        let mut st = self.state.lock();
        st.next += 1;
        let handle = ScreenHandle::new(st.next);
        st.views.insert(handle, view);
        st.calls.push("render".into());
        handle
    }

    fn push(&self, screen: &Screen, animated: bool) {
        let mut st = self.state.lock();
        st.stack.push(screen.handle());
        st.attached.push(screen.clone());
        st.animated.push(animated);
        st.calls.push("push".into());
    }

    fn pop(&self, screen: ScreenHandle, animated: bool) {
        let mut st = self.state.lock();
        st.stack.retain(|s| *s != screen);
        st.animated.push(animated);
        st.calls.push("pop".into());
    }

    fn pop_to_root(&self, popped: &[ScreenHandle], animated: bool) {
        let mut st = self.state.lock();
        st.stack.retain(|s| !popped.contains(s));
        st.animated.push(animated);
        st.calls.push("pop_to_root".into());
    }

    fn set_stack(&self, root: &Screen, _discarded: &[ScreenHandle], animated: bool) {
        let mut st = self.state.lock();
        st.stack = vec![root.handle()];
        st.attached.push(root.clone());
        st.animated.push(animated);
        st.calls.push("set_stack".into());
    }

    fn present(&self, screen: &Screen, animated: bool) {
        let mut st = self.state.lock();
        st.modals.push(screen.handle());
        st.attached.push(screen.clone());
        st.animated.push(animated);
        st.calls.push("present".into());
    }

    fn dismiss(&self, dismissed: &[ScreenHandle], animated: bool, on_complete: Completion) {
        {
            let mut st = self.state.lock();
            st.modals.retain(|s| !dismissed.contains(s));
            st.animated.push(animated);
            st.calls.push("dismiss".into());
        }
        on_complete();
    }
}

/// Diagnostic sink that keeps everything it receives.
#[derive(Default)]
pub struct CollectingSink {
    /// Received diagnostics in order.
    seen: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    /// A fresh sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Received diagnostics in order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.seen.lock().clone()
    }

    /// True when nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.seen.lock().is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        self.seen.lock().push(diagnostic.clone());
    }
}
