//! headers/mod.rs
//! Container header: the fixed 17 bytes that open every container.
//!
//! Notes:
//! - Fixed size enables the decoder to ask for exactly 17 bytes up front.
//! - Magic and version reject foreign or future containers before any frame
//!   is touched.
//! - chunk_size and total_size let the decoder recover the original length
//!   and frame layout without side channels.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;

// Endianness: big-endian for every multi-byte integer. total_size is written
// as two u32 halves (high then low), which is byte-identical to a u64 BE.
