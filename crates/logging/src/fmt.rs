//! Render `tracing` events into concise logfmt strings.
//!
//! Events in this workspace are named with a snake_case message and carry
//! their details as fields, so the rendered form keeps both: the message
//! first, then the remaining fields as `key=value`.

use std::fmt::{Debug, Write};

use tracing::{
    Event, Metadata,
    field::{Field, Visit},
};

/// Rendered fields extracted from a tracing Event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLog {
    /// Severity level (e.g., INFO, WARN) for the event.
    pub level: String,
    /// Event target (typically the module path).
    pub target: String,
    /// The `message` field, or empty if the event had none.
    pub message: String,
    /// Remaining fields rendered as `key=value`, space separated.
    pub fields: String,
}

impl RenderedLog {
    /// Message and fields as one logfmt line.
    pub fn line(&self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (false, false) => format!("{} {}", self.message, self.fields),
            (false, true) => self.message.clone(),
            _ => self.fields.clone(),
        }
    }
}

/// Visitor splitting the `message` field from the rest.
#[derive(Default)]
struct MsgVisitor {
    /// Captured `message` field, if present.
    msg: Option<String>,
    /// Accumulated non-message fields rendered as `key=value`.
    fields: String,
}

impl Visit for MsgVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.msg = Some(value.to_string());
        } else {
            let _ignored = write!(&mut self.fields, "{}=\"{}\" ", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "message" {
            self.msg = Some(format!("{:?}", value));
        } else {
            let _ignored = write!(&mut self.fields, "{}={:?} ", field.name(), value);
        }
    }
}

/// Extract level, target, message and fields from a tracing Event.
pub fn render_event(event: &Event<'_>) -> RenderedLog {
    let meta: &Metadata<'_> = event.metadata();
    let mut vis = MsgVisitor::default();
    event.record(&mut vis);
    RenderedLog {
        level: meta.level().to_string(),
        target: meta.target().to_string(),
        message: vis.msg.unwrap_or_default(),
        fields: vis.fields.trim_end().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(message: &str, fields: &str) -> RenderedLog {
        RenderedLog {
            level: "INFO".into(),
            target: "waypost".into(),
            message: message.into(),
            fields: fields.into(),
        }
    }

    #[test]
    fn line_joins_message_and_fields() {
        assert_eq!(rendered("pushed", "depth=2").line(), "pushed depth=2");
        assert_eq!(rendered("pushed", "").line(), "pushed");
        assert_eq!(rendered("", "depth=2").line(), "depth=2");
    }
}
