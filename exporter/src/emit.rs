// emit.rs — Structured-output sinks for name components
//
// The canonicalizer emits one fixed shape per declaration: begin_array(n),
// n strings, end_array. Sinks adapt that stream to whatever the downstream
// serialization layer wants. `JsonSink` builds a serde_json array;
// `VecSink` collects raw components for tests and for joining into flat
// keys.
//
// Preconditions: callers balance begin_array/end_array and emit strings
//                only inside an open array.
// Postconditions: none.
// Failure modes: unbalanced calls leave `JsonSink::into_value` at Null.
// Side effects: none beyond the sink's own buffer.

use serde_json::Value;

/// Receiver for the canonicalizer's output stream.
pub trait NameSink {
    fn begin_array(&mut self, len: usize);
    fn emit_string(&mut self, s: &str);
    fn end_array(&mut self);
}

// ── VecSink ─────────────────────────────────────────────────────────────────

/// Collects emitted strings into a flat list.
#[derive(Debug, Default)]
pub struct VecSink {
    components: Vec<String>,
}

impl VecSink {
    pub fn new() -> VecSink {
        VecSink::default()
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    pub fn into_components(self) -> Vec<String> {
        self.components
    }
}

impl NameSink for VecSink {
    fn begin_array(&mut self, len: usize) {
        self.components.reserve(len);
    }

    fn emit_string(&mut self, s: &str) {
        self.components.push(s.to_string());
    }

    fn end_array(&mut self) {}
}

// ── JsonSink ────────────────────────────────────────────────────────────────

/// Builds a `serde_json::Value` array from the emitted stream. Nested
/// arrays are supported, though name printing only ever nests strings.
#[derive(Debug, Default)]
pub struct JsonSink {
    stack: Vec<Vec<Value>>,
    finished: Option<Value>,
}

impl JsonSink {
    pub fn new() -> JsonSink {
        JsonSink::default()
    }

    /// The completed top-level array, or Null if nothing was emitted.
    pub fn into_value(self) -> Value {
        self.finished.unwrap_or(Value::Null)
    }
}

impl NameSink for JsonSink {
    fn begin_array(&mut self, len: usize) {
        self.stack.push(Vec::with_capacity(len));
    }

    fn emit_string(&mut self, s: &str) {
        if let Some(top) = self.stack.last_mut() {
            top.push(Value::String(s.to_string()));
        }
    }

    fn end_array(&mut self) {
        if let Some(done) = self.stack.pop() {
            match self.stack.last_mut() {
                Some(parent) => parent.push(Value::Array(done)),
                None => self.finished = Some(Value::Array(done)),
            }
        }
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn vec_sink_collects_in_order() {
        let mut sink = VecSink::new();
        sink.begin_array(2);
        sink.emit_string("ns");
        sink.emit_string("foo");
        sink.end_array();
        assert_eq!(sink.into_components(), vec!["ns", "foo"]);
    }

    #[test]
    fn json_sink_builds_array() {
        let mut sink = JsonSink::new();
        sink.begin_array(2);
        sink.emit_string("ns");
        sink.emit_string("foo");
        sink.end_array();
        assert_eq!(sink.into_value(), json!(["ns", "foo"]));
    }

    #[test]
    fn json_sink_nests() {
        let mut sink = JsonSink::new();
        sink.begin_array(2);
        sink.emit_string("outer");
        sink.begin_array(1);
        sink.emit_string("inner");
        sink.end_array();
        sink.end_array();
        assert_eq!(sink.into_value(), json!(["outer", ["inner"]]));
    }

    #[test]
    fn json_sink_empty_is_null() {
        let sink = JsonSink::new();
        assert_eq!(sink.into_value(), Value::Null);
    }
}
