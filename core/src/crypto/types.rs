// ## 📂 File: `src/crypto/types.rs`

use zeroize::Zeroize;

use crate::constants::KEY_LEN_32;

#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    /// Invalid key length provided to cipher.
    #[error("invalid key length: expected={expected}, actual={actual}")]
    InvalidKeyLen { expected: usize, actual: usize },

    /// Requested KDF output length cannot be produced.
    #[error("invalid output length: requested={requested}, allowed=1..={max}")]
    InvalidOutputLen { requested: usize, max: usize },

    /// AEAD tag mismatch (authentication failure).
    #[error("AEAD tag mismatch")]
    TagMismatch,

    /// General runtime failure with context.
    #[error("crypto failure: {0}")]
    Failure(String),
}

/// Opaque 256-bit frame key supplied by the key-management collaborator.
///
/// The codec never generates or persists it; the bytes are wiped on drop.
#[derive(Clone)]
pub struct ContentKey {
    bytes: [u8; KEY_LEN_32],
}

impl ContentKey {
    pub fn from_bytes(bytes: [u8; KEY_LEN_32]) -> Self {
        Self { bytes }
    }

    /// Accept a raw buffer, rejecting anything that is not exactly 32 bytes.
    pub fn from_slice(raw: &[u8]) -> Result<Self, CryptoError> {
        let bytes: [u8; KEY_LEN_32] = raw.try_into().map_err(|_| CryptoError::InvalidKeyLen {
            expected: KEY_LEN_32,
            actual: raw.len(),
        })?;
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN_32] {
        &self.bytes
    }
}

impl Drop for ContentKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for ContentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
