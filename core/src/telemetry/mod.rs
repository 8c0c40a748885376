//! telemetry/mod.rs
//! Per-session counters, immutable snapshots and progress reporting.
//!
//! - Counters are owned by one encoder or decoder session; no locks, no atomics.
//! - Snapshots are plain serializable values for logs and callers.
//! - Progress callbacks fire after every processed chunk.

pub mod counters;
pub mod snapshot;
pub mod progress;

pub use counters::*;
pub use snapshot::*;
pub use progress::*;
