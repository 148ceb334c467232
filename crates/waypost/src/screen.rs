//! Rendered screen handles and their modal attributes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Opaque identifier for a rendered screen, allocated by the presenter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScreenHandle(u64);

impl ScreenHandle {
    /// Wrap a presenter-allocated id.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The presenter-allocated id.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Visual transition used when presenting a modal screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionStyle {
    /// Slide up from the bottom edge.
    #[default]
    CoverVertical,
    /// Flip around the vertical axis.
    FlipHorizontal,
    /// Fade between screens.
    CrossDissolve,
    /// Curl the presenting screen away.
    PartialCurl,
}

/// How a modal screen is contained relative to what it covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalStyle {
    /// Card-style sheet.
    PageSheet,
    /// Centered, size-constrained sheet.
    FormSheet,
    /// Covers the presenting context only.
    CurrentContext,
    /// Covers everything; the content underneath is removed.
    FullScreen,
    /// Covers everything; the content underneath stays visible.
    OverFullScreen,
    /// Covers the presenting context; the content underneath stays visible.
    OverCurrentContext,
}

/// A rendered screen on its way to being attached.
///
/// The navigator fills in modal style and transition, then hands the screen
/// to the caller's `configure` hook before attaching it, so hooks can adjust
/// display properties or override the defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    /// Presenter handle.
    handle: ScreenHandle,
    /// Modal containment, for modal presentations only.
    modal_style: Option<ModalStyle>,
    /// Modal transition.
    transition: TransitionStyle,
    /// Display title.
    title: Option<String>,
    /// Free-form presenter attributes.
    attrs: BTreeMap<String, String>,
}

impl Screen {
    /// A screen with default display properties.
    pub fn new(handle: ScreenHandle) -> Self {
        Self {
            handle,
            modal_style: None,
            transition: TransitionStyle::default(),
            title: None,
            attrs: BTreeMap::new(),
        }
    }

    /// Presenter handle.
    pub fn handle(&self) -> ScreenHandle {
        self.handle
    }

    /// Modal containment, `None` for stack screens.
    pub fn modal_style(&self) -> Option<ModalStyle> {
        self.modal_style
    }

    /// Set the modal containment.
    pub fn set_modal_style(&mut self, style: ModalStyle) {
        self.modal_style = Some(style);
    }

    /// Modal transition.
    pub fn transition(&self) -> TransitionStyle {
        self.transition
    }

    /// Set the modal transition.
    pub fn set_transition(&mut self, transition: TransitionStyle) {
        self.transition = transition;
    }

    /// Display title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Set the display title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// A presenter attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Set a presenter attribute.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into(), value.into());
    }

    /// All presenter attributes.
    pub fn attrs(&self) -> &BTreeMap<String, String> {
        &self.attrs
    }
}
