//! waypost: string-addressed navigation over a pluggable presentation layer.
//!
//! Routes are registered as `scheme://host/path` patterns mapped to view
//! factories. A [`Navigator`] owns one navigation stack plus its modal
//! overlays and attaches resolved views through a host-supplied
//! [`Presenter`]. Every presented view carries a [`PresentationState`] in its
//! [`Environment`], so content can check whether it is showing and dismiss
//! itself without knowing how it was presented.
//!
//! ```ignore
//! let router = Router::new(presenter);
//! router.register("app://detail", |ctx| {
//!     View::new(Detail::new(ctx.param("id").unwrap_or_default()))
//! })?;
//! let mount = router.mount(|_| View::new(Home));
//! mount
//!     .navigator()
//!     .expect("mounted")
//!     .builder()
//!     .route("app://detail?id=42")
//!     .presentation(PresentationMode::Push)
//!     .submit();
//! ```

mod builder;
mod config;
mod context;
mod diagnostics;
mod error;
mod mount;
mod navigator;
pub mod path;
mod presentation;
mod presenter;
mod registry;
mod router;
mod screen;
mod table;
mod values;
mod view;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use builder::RouteBuilder;
pub use config::RouterConfig;
pub use context::PathContext;
pub use diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
pub use error::{Error, Result};
pub use mount::RootMount;
pub use navigator::{EmptyRoot, NavOptions, Navigator};
pub use path::{ParseError, RouteKey};
pub use presentation::{PresentationMode, PresentationState};
pub use presenter::{Completion, Presenter};
pub use registry::{InstanceId, NavigatorRegistry};
pub use router::Router;
pub use screen::{ModalStyle, Screen, ScreenHandle, TransitionStyle};
pub use table::{Factory, Registered, ResolveError, Resolved, RouteTable};
pub use values::{Binding, ValueMap};
pub use view::{Environment, View};
