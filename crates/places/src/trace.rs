//! Request-trace observer for outbound Places calls.
//!
//! Production wires [`NoopTrace`]; tests wire [`MemoryTrace`] and assert on
//! the recorded entries. Correctness never depends on the trace: it is
//! evidence, not state. The API key is redacted to `"****"` before an entry
//! reaches the observer.

use parking_lot::Mutex;

/// One recorded outbound call.
#[derive(Debug, Clone)]
pub struct TraceEntry {
    pub url: String,
    pub params: Vec<(String, String)>,
}

impl TraceEntry {
    /// Look up a query parameter by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Observer for outbound Places requests.
pub trait RequestTrace: Send + Sync {
    fn record(&self, url: &str, params: &[(String, String)]);
}

/// Discards everything. The production wiring.
pub struct NoopTrace;

impl RequestTrace for NoopTrace {
    fn record(&self, _url: &str, _params: &[(String, String)]) {}
}

/// Appends every call to an in-memory list. The test wiring.
#[derive(Default)]
pub struct MemoryTrace {
    entries: Mutex<Vec<TraceEntry>>,
}

impl MemoryTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<TraceEntry> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl RequestTrace for MemoryTrace {
    fn record(&self, url: &str, params: &[(String, String)]) {
        self.entries.lock().push(TraceEntry {
            url: url.to_string(),
            params: params.to_vec(),
        });
    }
}
