//! The seam to the host's presentation layer.

use crate::{Screen, ScreenHandle, View};

/// Callback run once a dismissal has finished.
pub type Completion = Box<dyn FnOnce() + Send>;

/// Trait abstraction over the host presentation layer.
///
/// The navigator owns the logical stack and modal list; a presenter mirrors
/// those changes onto real screens. Calls arrive in the order the navigator
/// applies them and never while the navigator holds its own lock, so an
/// implementation may call back into the router.
pub trait Presenter: Send + Sync {
    /// Turn a view into a screen and return its handle.
    fn render(&self, view: View) -> ScreenHandle;

    /// Push `screen` onto the navigation stack.
    fn push(&self, screen: &Screen, animated: bool);

    /// Pop `screen`, the current top, off the navigation stack.
    fn pop(&self, screen: ScreenHandle, animated: bool);

    /// Pop everything above the root. `popped` is ordered bottom to top.
    fn pop_to_root(&self, popped: &[ScreenHandle], animated: bool);

    /// Replace the whole stack with `root`, discarding `discarded`.
    fn set_stack(&self, root: &Screen, discarded: &[ScreenHandle], animated: bool);

    /// Present `screen` modally above everything currently shown.
    fn present(&self, screen: &Screen, animated: bool);

    /// Dismiss modal screens. `dismissed[0]` is the screen being dismissed;
    /// the rest were presented above it and go with it. `on_complete` must be
    /// called exactly once.
    fn dismiss(&self, dismissed: &[ScreenHandle], animated: bool, on_complete: Completion);
}
