// ## 📂 File: `src/headers/types.rs`

//! headers/types.rs
//! Container header struct and its validation.
//!
//! Layout (17 bytes, big-endian):
//! ```text
//! [ magic (4) ][ version (1) ][ chunk_size (4) ][ total_size hi (4) ][ total_size lo (4) ]
//! ```

use num_enum::TryFromPrimitive;

use crate::constants::{CONTAINER_V1, DEFAULT_CHUNK_SIZE, HEADER_LEN, MAGIC_CVF1, MAX_CHUNK_SIZE};

/// Fixed header size in bytes.
pub const HEADER_LEN_V1: usize = HEADER_LEN;

/// Container versions this build understands.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive)]
pub enum ContainerVersion {
    V1 = CONTAINER_V1,
}

impl ContainerVersion {
    pub fn verify(raw: u8) -> Result<Self, HeaderError> {
        ContainerVersion::try_from(raw).map_err(|_| HeaderError::UnsupportedVersion { have: raw })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
    pub magic: [u8; 4],
    pub version: u8,
    /// Plaintext bytes per frame, except possibly the last.
    pub chunk_size: u32,
    /// Total plaintext length in bytes.
    pub total_size: u64,
}

impl Default for ContainerHeader {
    fn default() -> Self {
        Self {
            magic: MAGIC_CVF1,
            version: CONTAINER_V1,
            chunk_size: DEFAULT_CHUNK_SIZE as u32,
            total_size: 0,
        }
    }
}

impl ContainerHeader {
    pub const LEN: usize = HEADER_LEN_V1;

    pub fn new(chunk_size: u32, total_size: u64) -> Self {
        Self {
            chunk_size,
            total_size,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), HeaderError> {
        if self.magic != MAGIC_CVF1 {
            return Err(HeaderError::InvalidMagic {
                have: self.magic,
                need: MAGIC_CVF1,
            });
        }

        ContainerVersion::verify(self.version)?;

        if self.chunk_size == 0 {
            return Err(HeaderError::InvalidChunkSizeZero);
        }
        if self.chunk_size as usize > MAX_CHUNK_SIZE {
            return Err(HeaderError::InvalidChunkSizeTooLarge {
                have: self.chunk_size,
                max: MAX_CHUNK_SIZE as u32,
            });
        }

        Ok(())
    }

    /// Number of frames a container with this header holds.
    pub fn frame_count(&self) -> u64 {
        self.total_size.div_ceil(self.chunk_size.max(1) as u64)
    }

    /// Expected plaintext length of frame `index`, or `None` past the end.
    pub fn frame_plaintext_len(&self, index: u64) -> Option<usize> {
        let start = index.checked_mul(self.chunk_size as u64)?;
        if start >= self.total_size {
            return None;
        }
        Some((self.total_size - start).min(self.chunk_size as u64) as usize)
    }
}

pub fn fmt_bytes(b: &[u8]) -> String {
    if b.iter().all(|&c| c.is_ascii_graphic() || c == b' ') {
        format!("b\"{}\"", String::from_utf8_lossy(b))
    } else {
        format!("0x{}", hex::encode(b))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    /// Buffer too short to contain a header.
    #[error("header buffer too short: {have} < {need}")]
    BufferTooShort { have: usize, need: usize },

    /// Invalid magic marker.
    #[error("invalid magic: expected {}, got {}", fmt_bytes(need), fmt_bytes(have))]
    InvalidMagic { have: [u8; 4], need: [u8; 4] },

    /// Version byte this build does not understand.
    #[error("unsupported version: {have}")]
    UnsupportedVersion { have: u8 },

    #[error("invalid chunk_size: zero")]
    InvalidChunkSizeZero,

    #[error("invalid chunk_size: {have} > {max}")]
    InvalidChunkSizeTooLarge { have: u32, max: u32 },
}
