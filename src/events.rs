/// Structured event sink: every outbound HTTP call and state-machine
/// transition emits one named event with arbitrary key-value fields. The
/// core never imports a concrete logging backend directly; callers needing
/// metrics export or an audit log supply their own [`EventSink`].
pub trait EventSink: Send + Sync {
    /// Sensitive fields (private key PEM, full signatures) must never be
    /// passed here by callers of this trait.
    fn emit(&self, event: &str, fields: &[(&str, &str)]);
}

/// Forwards every event to `tracing`: `warn` for retries and cleanup
/// failures, `info` for everything else.
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: &str, fields: &[(&str, &str)]) {
        let level_is_warn = event.contains("retry") || event.contains("cleanup_failed");
        let rendered: Vec<String> = fields.iter().map(|(k, v)| format!("{k}={v}")).collect();
        if level_is_warn {
            tracing::warn!(event, fields = %rendered.join(" "), "acme event");
        } else {
            tracing::info!(event, fields = %rendered.join(" "), "acme event");
        }
    }
}

impl Default for TracingEventSink {
    fn default() -> Self {
        Self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingSink {
        events: Mutex<Vec<String>>,
    }

    impl EventSink for RecordingSink {
        fn emit(&self, event: &str, _fields: &[(&str, &str)]) {
            self.events.lock().unwrap().push(event.to_string());
        }
    }

    #[test]
    fn tracing_sink_accepts_empty_fields() {
        let sink = TracingEventSink;
        sink.emit("order_created", &[]);
    }

    #[test]
    fn custom_sink_receives_emitted_events() {
        let sink = RecordingSink {
            events: Mutex::new(Vec::new()),
        };
        sink.emit("challenge_notified", &[("domain", "example.com")]);
        assert_eq!(sink.events.lock().unwrap().as_slice(), ["challenge_notified"]);
    }
}
