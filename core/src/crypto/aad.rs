// ## 📂 File: `src/crypto/aad.rs`

//! Per-frame associated data.
//!
//! The AAD of frame *i* is the big-endian `u32` encoding of *i*. It binds each
//! frame to its position: a frame moved to another index, within one
//! container or from another sealed under the same key, fails authentication.
//! A frame swapped for the same index of another container is not detected.

/// AAD length in bytes.
pub const AAD_LEN: usize = 4;

#[inline]
pub fn build_aad(frame_index: u32) -> [u8; AAD_LEN] {
    frame_index.to_be_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aad_is_big_endian_index() {
        assert_eq!(build_aad(0), [0, 0, 0, 0]);
        assert_eq!(build_aad(1), [0, 0, 0, 1]);
        assert_eq!(build_aad(0x0102_0304), [1, 2, 3, 4]);
    }
}
