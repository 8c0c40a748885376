// ### `src/telemetry/counters.rs`

//! telemetry/counters.rs
//! Mutable counters collected while a session runs.
//!
//! Converted into an immutable `TelemetrySnapshot` on request.

use std::ops::AddAssign;

use crate::constants::FRAME_PREFIX_LEN;

#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct TelemetryCounters {
    pub frames: u64,
    pub bytes_plaintext: u64,
    /// AEAD output per frame: ciphertext + tag.
    pub bytes_ciphertext: u64,
    /// Container header + per-frame IV and length prefix.
    pub bytes_overhead: u64,
}

impl TelemetryCounters {
    /// Record the container header as overhead.
    pub fn add_header(&mut self, header_len: usize) {
        self.bytes_overhead += header_len as u64;
    }

    /// Record one frame.
    ///
    /// - `pt_len`: plaintext bytes in the frame
    /// - `wire_len`: full encoded frame (prefix + ciphertext + tag)
    pub fn add_frame(&mut self, pt_len: usize, wire_len: usize) {
        self.frames += 1;
        self.bytes_plaintext += pt_len as u64;
        self.bytes_ciphertext += wire_len.saturating_sub(FRAME_PREFIX_LEN) as u64;
        self.bytes_overhead += FRAME_PREFIX_LEN as u64;
    }

    /// Bytes the whole container occupies on the wire so far.
    pub fn wire_bytes(&self) -> u64 {
        self.bytes_ciphertext + self.bytes_overhead
    }
}

impl AddAssign for TelemetryCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.frames += rhs.frames;
        self.bytes_plaintext += rhs.bytes_plaintext;
        self.bytes_ciphertext += rhs.bytes_ciphertext;
        self.bytes_overhead += rhs.bytes_overhead;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TAG_LEN;

    #[test]
    fn ciphertext_includes_tag_overhead_is_prefix() {
        let mut c = TelemetryCounters::default();
        c.add_header(17);
        c.add_frame(100, FRAME_PREFIX_LEN + 100 + TAG_LEN);
        assert_eq!(c.frames, 1);
        assert_eq!(c.bytes_plaintext, 100);
        assert_eq!(c.bytes_ciphertext, 100 + TAG_LEN as u64);
        assert_eq!(c.bytes_overhead, 17 + FRAME_PREFIX_LEN as u64);
        assert_eq!(c.wire_bytes(), 17 + 16 + 100 + 16);
    }

    #[test]
    fn add_assign_merges() {
        let mut a = TelemetryCounters { frames: 1, bytes_plaintext: 2, bytes_ciphertext: 3, bytes_overhead: 4 };
        a += TelemetryCounters { frames: 10, bytes_plaintext: 20, bytes_ciphertext: 30, bytes_overhead: 40 };
        assert_eq!(a, TelemetryCounters { frames: 11, bytes_plaintext: 22, bytes_ciphertext: 33, bytes_overhead: 44 });
    }
}
