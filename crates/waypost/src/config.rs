//! Router-wide defaults, loadable from RON.

use serde::{Deserialize, Serialize};

use crate::{Error, NavOptions, Result, TransitionStyle};

/// Router-wide defaults.
///
/// Every field is optional in RON; omitted fields take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouterConfig {
    /// Animate navigation unless a request says otherwise.
    pub default_animated: bool,
    /// Modal transition unless a request says otherwise.
    pub default_transition: TransitionStyle,
    /// A mounted navigator is released on unmount only when its stack is at
    /// most this deep.
    pub release_depth: usize,
    /// Report re-registration of an existing route key.
    pub report_overwrites: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            default_animated: true,
            default_transition: TransitionStyle::CoverVertical,
            release_depth: 1,
            report_overwrites: true,
        }
    }
}

impl RouterConfig {
    /// Parse a config from RON text, e.g. `(default_animated: false)`.
    pub fn from_ron(text: &str) -> Result<Self> {
        ron::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Navigation options seeded from these defaults.
    pub fn nav_options(&self) -> NavOptions {
        NavOptions::new()
            .animated(self.default_animated)
            .transition(self.default_transition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_ron_keeps_defaults() {
        let cfg = RouterConfig::from_ron("(default_transition: cross_dissolve)").unwrap();
        assert_eq!(cfg.default_transition, TransitionStyle::CrossDissolve);
        assert!(cfg.default_animated);
        assert_eq!(cfg.release_depth, 1);
    }

    #[test]
    fn empty_ron_is_default() {
        assert_eq!(RouterConfig::from_ron("()").unwrap(), RouterConfig::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(matches!(
            RouterConfig::from_ron("(bogus: 1)"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn nav_options_follow_defaults() {
        let cfg = RouterConfig {
            default_animated: false,
            ..RouterConfig::default()
        };
        let opts = cfg.nav_options();
        assert!(!opts.animated);
        assert_eq!(opts.transition, TransitionStyle::CoverVertical);
    }
}
