// ## src/telemetry/snapshot.rs

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::TelemetryCounters;

/// Immutable view of a session's counters and elapsed time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub frames: u64,
    pub bytes_plaintext: u64,
    pub bytes_ciphertext: u64,
    pub bytes_overhead: u64,
    pub throughput_plaintext_bytes_per_sec: f64,
    pub elapsed: Duration,
}

impl TelemetrySnapshot {
    pub fn from(counters: &TelemetryCounters, started: Instant) -> Self {
        let elapsed = started.elapsed();
        let throughput = if elapsed.as_secs_f64() > 0.0 {
            counters.bytes_plaintext as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            frames: counters.frames,
            bytes_plaintext: counters.bytes_plaintext,
            bytes_ciphertext: counters.bytes_ciphertext,
            bytes_overhead: counters.bytes_overhead,
            throughput_plaintext_bytes_per_sec: throughput,
            elapsed,
        }
    }

    /// Container bytes (header + frames).
    pub fn output_bytes(&self) -> u64 {
        self.bytes_ciphertext + self.bytes_overhead
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
