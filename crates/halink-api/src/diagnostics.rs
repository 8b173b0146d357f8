//! Diagnostic trace records emitted along the delivery path.
//!
//! Fire-and-forget: a sink never influences control flow.

/// Receiver for labeled trace records (`"POST URL"`, `"fallback status"`, ...).
pub trait DiagnosticSink: Send + Sync {
    fn trace(&self, category: &str, payload: &str);
}

/// Forwards records to `tracing` at debug level, target `halink::transport`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn trace(&self, category: &str, payload: &str) {
        tracing::debug!(target: "halink::transport", category, payload, "transport trace");
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn trace(&self, _category: &str, _payload: &str) {}
}
