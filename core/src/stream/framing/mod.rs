//! Wire framing for container frames.
//!
//! Responsibilities:
//! - Define the frame prefix (IV + ciphertext length) and borrowed frame view
//! - Encode frames into the canonical byte layout
//! - Parse prefixes and whole frames with strict length checks
//!
//! Non-responsibilities:
//! - Cryptography
//! - Buffering across reads
//! - Ordering

pub mod types;
pub mod encode;
pub mod decode;

pub use types::{FrameError, FramePrefix, FrameView};
pub use encode::encode_frame;
pub use decode::{decode_frame, parse_frame_prefix};
