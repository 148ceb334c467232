//! Simulator script schema.
//!
//! ```ron
//! (
//!     config: (default_animated: false),
//!     root: "Home",
//!     routes: [
//!         (pattern: "app://detail", title: "Detail"),
//!     ],
//!     steps: [
//!         route(path: "app://detail?id=1", mode: push),
//!         route(path: "app://detail?id=2", mode: sheet, transition: Some(cross_dissolve)),
//!         dismiss_last,
//!         pop,
//!     ],
//! )
//! ```

use std::{collections::BTreeMap, fs, path::Path};

use serde::Deserialize;
use waypost::{PresentationMode, RouterConfig, TransitionStyle, path};

use crate::error::{Error, Result};

/// A route the script registers before running.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteSpec {
    /// Route pattern, `scheme://host/path`.
    pub pattern: String,
    /// Title shown for screens built by this route.
    pub title: String,
}

/// One navigation step.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum Step {
    /// Resolve `path` and attach it with `mode`.
    Route {
        /// Route string, query included.
        path: String,
        /// Presentation mode.
        mode: PresentationMode,
        /// Overrides the configured animation default.
        #[serde(default)]
        animated: Option<bool>,
        /// Overrides the configured transition default.
        #[serde(default)]
        transition: Option<TransitionStyle>,
        /// String user data handed to the factory.
        #[serde(default)]
        user_data: BTreeMap<String, String>,
    },
    /// Pop the top of the stack.
    Pop,
    /// Pop everything above the root.
    PopToRoot,
    /// Dismiss the topmost modal.
    DismissTop,
    /// Dismiss whatever the most recent route step presented, through its
    /// presentation state.
    DismissLast,
}

impl Step {
    /// Short label for reports.
    pub fn label(&self) -> String {
        match self {
            Self::Route { path, mode, .. } => format!("route {path} ({mode})"),
            Self::Pop => "pop".into(),
            Self::PopToRoot => "pop_to_root".into(),
            Self::DismissTop => "dismiss_top".into(),
            Self::DismissLast => "dismiss_last".into(),
        }
    }
}

/// Default title of the mounted root.
fn default_root() -> String {
    "Root".into()
}

/// A complete simulator script.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Router defaults.
    #[serde(default)]
    pub config: RouterConfig,
    /// Title of the mounted root.
    #[serde(default = "default_root")]
    pub root: String,
    /// Routes to register.
    #[serde(default)]
    pub routes: Vec<RouteSpec>,
    /// Steps to run, in order.
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    /// Parse a script from RON text.
    pub fn from_ron(text: &str) -> Result<Self> {
        Ok(ron::from_str(text)?)
    }

    /// Read and parse a script file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_ron(&text)
    }

    /// Check that every route pattern and every route step parses.
    ///
    /// Unregistered step routes are not errors; running them exercises the
    /// no-op path.
    pub fn validate(&self) -> Result<()> {
        for spec in &self.routes {
            path::key_of(&spec.pattern).map_err(waypost::Error::from)?;
        }
        for (index, step) in self.steps.iter().enumerate() {
            if let Step::Route { path, .. } = step {
                path::parse(path).map_err(|source| Error::Step { index, source })?;
            }
        }
        Ok(())
    }
}
