//! In-memory capture of tracing events.
//!
//! Install a [`CaptureLayer`] in a scoped subscriber and inspect what was
//! logged afterwards:
//!
//! ```ignore
//! let capture = CaptureLayer::new();
//! let subscriber = tracing_subscriber::registry().with(capture.clone());
//! tracing::subscriber::with_default(subscriber, || run());
//! assert!(capture.contains("route_unregistered"));
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::fmt::{self, RenderedLog};

/// Tracing layer that keeps every event it sees. Clones share storage.
#[derive(Clone, Default)]
pub struct CaptureLayer {
    /// Rendered events in arrival order.
    records: Arc<Mutex<Vec<RenderedLog>>>,
}

impl CaptureLayer {
    /// An empty capture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered events in arrival order.
    pub fn records(&self) -> Vec<RenderedLog> {
        self.records.lock().clone()
    }

    /// Whether any event carried the message `message`.
    pub fn contains(&self, message: &str) -> bool {
        self.records.lock().iter().any(|r| r.message == message)
    }

    /// Events carrying the message `message`.
    pub fn matching(&self, message: &str) -> Vec<RenderedLog> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.message == message)
            .cloned()
            .collect()
    }

    /// Drop everything captured so far.
    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let rendered = fmt::render_event(event);
        self.records.lock().push(rendered);
    }
}

#[cfg(test)]
mod tests {
    use tracing::{info, subscriber};
    use tracing_subscriber::{layer::SubscriberExt, registry};

    use super::*;

    #[test]
    fn records_message_and_fields() {
        let capture = CaptureLayer::new();
        let sub = registry().with(capture.clone());
        subscriber::with_default(sub, || {
            info!(depth = 2, "pushed");
        });
        let recs = capture.matching("pushed");
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].level, "INFO");
        assert_eq!(recs[0].fields, "depth=2");
        assert!(!capture.contains("popped"));

        capture.clear();
        assert!(capture.records().is_empty());
    }
}
