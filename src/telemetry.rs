//! Per-tick telemetry sink
//!
//! The sequencer emits an ordered batch of key/value pairs once per tick.
//! Telemetry is purely observational; nothing reads it back into control
//! flow.

/// Ordered key/value telemetry consumer
pub trait TelemetrySink {
    fn add_data(&mut self, key: &str, value: String);
}

/// Sink that forwards each pair to the logger at debug level
pub struct LogTelemetry;

impl TelemetrySink for LogTelemetry {
    fn add_data(&mut self, key: &str, value: String) {
        log::debug!("telemetry {}: {}", key, value);
    }
}

/// Sink that records pairs for inspection in tests
#[derive(Debug, Default)]
pub struct BufferTelemetry {
    pub entries: Vec<(String, String)>,
}

impl BufferTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent value recorded under `key`
    pub fn last_value(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value recorded under `key`, oldest first
    pub fn values(&self, key: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

impl TelemetrySink for BufferTelemetry {
    fn add_data(&mut self, key: &str, value: String) {
        self.entries.push((key.to_string(), value));
    }
}
