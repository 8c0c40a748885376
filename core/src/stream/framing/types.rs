use crate::constants::{FRAME_PREFIX_LEN, IV_LEN_12};

/// Fixed leading part of every frame.
///
/// ```text
/// [ iv (12) ][ ciphertext_len (4, BE) ]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePrefix {
    pub iv: [u8; IV_LEN_12],
    /// Length of ciphertext + tag that follows the prefix.
    pub ciphertext_len: u32,
}

impl FramePrefix {
    pub const LEN: usize = FRAME_PREFIX_LEN;

    /// Full on-wire length of the frame this prefix announces.
    #[inline]
    pub fn wire_len(&self) -> usize {
        Self::LEN + self.ciphertext_len as usize
    }
}

/// Borrowed view over one complete frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub prefix: FramePrefix,
    pub ciphertext: &'a [u8],
}

#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("truncated frame: have {have} bytes, need {need}")]
    Truncated { have: usize, need: usize },

    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("ciphertext too large for a frame: {len} bytes")]
    CiphertextTooLarge { len: usize },
}
