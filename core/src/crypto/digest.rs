//! crypto/digest.rs
//! Content-addressing digest: legacy Keccak-256.
//!
//! This is the pre-standard Keccak padding used by Ethereum, not FIPS 202
//! SHA3-256. The two disagree on every input, and checksums recorded on-chain
//! are Keccak, so only `sha3::Keccak256` is used here.

use sha3::{Digest as _, Keccak256};

use crate::constants::DIGEST_LEN_32;

/// One-shot Keccak-256 of `data`.
#[inline]
pub fn keccak256(data: &[u8]) -> [u8; DIGEST_LEN_32] {
    let mut out = [0u8; DIGEST_LEN_32];
    out.copy_from_slice(&Keccak256::digest(data));
    out
}

/// Lowercase hex with `0x` prefix, the form ledgers display.
pub fn keccak256_hex(data: &[u8]) -> String {
    format!("0x{}", hex::encode(keccak256(data)))
}

/// Incremental hasher for content that arrives in pieces.
///
/// `update` in any split yields the same digest as one `keccak256` call.
#[derive(Clone, Default)]
pub struct ContentHasher {
    state: Keccak256,
    bytes: u64,
}

impl ContentHasher {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        self.state.update(data);
        self.bytes += data.len() as u64;
    }

    /// Total bytes fed so far.
    pub fn bytes_hashed(&self) -> u64 {
        self.bytes
    }

    pub fn finalize(self) -> [u8; DIGEST_LEN_32] {
        let mut out = [0u8; DIGEST_LEN_32];
        out.copy_from_slice(&self.state.finalize());
        out
    }
}
