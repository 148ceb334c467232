//! Observability for navigation that silently does nothing.
//!
//! Unresolvable routes, `None` presentations and builders outliving their
//! navigator are no-ops for the end user. Each is still reported to a
//! [`DiagnosticSink`] so the failure can be found during development. The
//! default sink writes `tracing` events.

use std::fmt::{self, Display, Formatter};

use tracing::{debug, warn};

use crate::path::{ParseError, RouteKey};

/// A navigation request that was dropped, or a registration worth noting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// The route string did not parse.
    InvalidRoute {
        /// Requested route string.
        route: String,
        /// Parser error.
        error: ParseError,
    },
    /// The route parsed but nothing is registered under its key.
    UnregisteredRoute {
        /// Requested route string.
        route: String,
        /// Normalized key that missed.
        key: RouteKey,
    },
    /// A route was requested with presentation mode `None`.
    NoPresentation {
        /// Requested route string.
        route: String,
    },
    /// A builder was submitted after its navigator was released.
    NavigatorGone {
        /// Requested route string.
        route: String,
    },
    /// A registration replaced an earlier factory.
    RouteOverwritten {
        /// Replaced key.
        key: RouteKey,
    },
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRoute { route, error } => write!(f, "invalid route '{route}': {error}"),
            Self::UnregisteredRoute { route, key } => {
                write!(f, "no route registered for '{key}' (requested '{route}')")
            }
            Self::NoPresentation { route } => {
                write!(f, "route '{route}' requested without a presentation mode")
            }
            Self::NavigatorGone { route } => {
                write!(f, "navigator released before route '{route}' was submitted")
            }
            Self::RouteOverwritten { key } => write!(f, "route '{key}' registered again"),
        }
    }
}

/// Receiver for diagnostics.
pub trait DiagnosticSink: Send + Sync {
    /// Record one diagnostic.
    fn report(&self, diagnostic: &Diagnostic);
}

/// Sink that emits `tracing` events: malformed routes at `warn`, everything
/// else at `debug`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::InvalidRoute { route, error } => {
                warn!(route = %route, error = %error, "route_invalid");
            }
            Diagnostic::UnregisteredRoute { route, key } => {
                debug!(route = %route, key = %key, "route_unregistered");
            }
            Diagnostic::NoPresentation { route } => {
                debug!(route = %route, "route_without_presentation");
            }
            Diagnostic::NavigatorGone { route } => {
                debug!(route = %route, "route_navigator_gone");
            }
            Diagnostic::RouteOverwritten { key } => {
                debug!(key = %key, "route_overwritten");
            }
        }
    }
}
