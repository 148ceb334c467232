//! Presentation modes and per-screen presentation state.

use std::{
    fmt::{self, Debug, Display, Formatter},
    sync::{Arc, OnceLock},
};

use serde::{Deserialize, Serialize};

use crate::{ModalStyle, ScreenHandle, navigator::WeakNavigator};

/// How a resolved view is attached to the visible hierarchy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationMode {
    /// Not attached.
    #[default]
    None,
    /// Appended to the navigation stack.
    Push,
    /// Installed as the single root of the navigation stack.
    Replace,
    /// Modal page sheet.
    Sheet,
    /// Modal, covering everything.
    FullScreen,
    /// Modal, covering everything with the content underneath kept visible.
    OverFullScreen,
    /// Modal form sheet.
    FormSheet,
    /// Modal, covering the current context.
    CurrentContext,
    /// Modal, over the current context with the content underneath kept visible.
    OverCurrentContext,
}

impl PresentationMode {
    /// Containment for modal modes, `None` for stack modes.
    pub const fn modal_style(self) -> Option<ModalStyle> {
        match self {
            Self::Sheet => Some(ModalStyle::PageSheet),
            Self::FullScreen => Some(ModalStyle::FullScreen),
            Self::OverFullScreen => Some(ModalStyle::OverFullScreen),
            Self::FormSheet => Some(ModalStyle::FormSheet),
            Self::CurrentContext => Some(ModalStyle::CurrentContext),
            Self::OverCurrentContext => Some(ModalStyle::OverCurrentContext),
            Self::None | Self::Push | Self::Replace => None,
        }
    }

    /// True for the six modal overlay modes.
    pub const fn is_modal(self) -> bool {
        self.modal_style().is_some()
    }

    /// Stable lowercase name, as used in scripts and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Push => "push",
            Self::Replace => "replace",
            Self::Sheet => "sheet",
            Self::FullScreen => "full_screen",
            Self::OverFullScreen => "over_full_screen",
            Self::FormSheet => "form_sheet",
            Self::CurrentContext => "current_context",
            Self::OverCurrentContext => "over_current_context",
        }
    }
}

impl Display for PresentationMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared state behind a [`PresentationState`].
struct StateInner {
    /// Mode that produced the screen; fixed at creation.
    mode: PresentationMode,
    /// Screen handle, bound once rendering has happened.
    screen: OnceLock<ScreenHandle>,
    /// Navigator that owns the screen.
    navigator: WeakNavigator,
}

/// Bookkeeping for one presented screen: its mode, whether it is still
/// showing, and how to take it down.
///
/// Content finds its own state through [`crate::Environment::presentation`]
/// and can dismiss itself without knowing how it was presented.
#[derive(Clone)]
pub struct PresentationState {
    /// Shared record.
    inner: Arc<StateInner>,
}

impl PresentationState {
    pub(crate) fn new(mode: PresentationMode, navigator: WeakNavigator) -> Self {
        Self {
            inner: Arc::new(StateInner {
                mode,
                screen: OnceLock::new(),
                navigator,
            }),
        }
    }

    /// State for content not presented by a navigator. Never visible;
    /// dismissing it does nothing.
    pub fn detached() -> Self {
        Self::new(PresentationMode::None, WeakNavigator::default())
    }

    /// Record the rendered screen. Only the first binding sticks.
    pub(crate) fn bind(&self, screen: ScreenHandle) {
        let _ignored = self.inner.screen.set(screen);
    }

    /// Mode that produced the screen.
    pub fn mode(&self) -> PresentationMode {
        self.inner.mode
    }

    /// Handle of the screen, once rendered.
    pub fn screen(&self) -> Option<ScreenHandle> {
        self.inner.screen.get().copied()
    }

    /// Whether the screen is currently showing, by the rule of its mode:
    /// a pushed screen must be top of the stack, a modal screen must still be
    /// presented, a replaced root is visible while its navigator lives.
    pub fn is_visible(&self) -> bool {
        let Some(screen) = self.screen() else {
            return false;
        };
        let mode = self.inner.mode;
        match mode {
            PresentationMode::None => false,
            PresentationMode::Replace => self.inner.navigator.upgrade().is_some(),
            PresentationMode::Push => self
                .inner
                .navigator
                .upgrade()
                .is_some_and(|nav| nav.top() == Some(screen)),
            _ => self
                .inner
                .navigator
                .upgrade()
                .is_some_and(|nav| nav.is_presented(screen)),
        }
    }

    /// Dismiss the screen.
    pub fn dismiss(&self, animated: bool) {
        self.dismiss_then(animated, || {});
    }

    /// Dismiss the screen and run `on_complete` afterwards.
    ///
    /// - push: if the screen is still on the stack, the top of the stack is
    ///   popped (whichever screen that is); `on_complete` always runs.
    /// - modal: the screen and anything presented above it is dismissed;
    ///   if it is already gone, `on_complete` runs immediately.
    /// - replace and none: cannot be dismissed; nothing happens and
    ///   `on_complete` is dropped.
    pub fn dismiss_then(&self, animated: bool, on_complete: impl FnOnce() + Send + 'static) {
        let mode = self.inner.mode;
        let navigator = self.inner.navigator.upgrade();
        let (Some(screen), Some(nav)) = (self.screen(), navigator) else {
            if mode == PresentationMode::Push || mode.is_modal() {
                on_complete();
            }
            return;
        };
        match mode {
            PresentationMode::None | PresentationMode::Replace => {}
            PresentationMode::Push => {
                if nav.contains(screen) {
                    nav.pop(animated);
                }
                on_complete();
            }
            _ => {
                nav.dismiss_modal(screen, animated, Box::new(on_complete));
            }
        }
    }
}

impl Default for PresentationState {
    fn default() -> Self {
        Self::detached()
    }
}

impl Debug for PresentationState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresentationState")
            .field("mode", &self.inner.mode)
            .field("screen", &self.screen())
            .finish()
    }
}
