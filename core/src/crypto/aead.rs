// ## 📂 File: `src/crypto/aead.rs`

//! AES-256-GCM frame cipher.
//!
//! Design notes:
//! - 32-byte key, 12-byte IV, 16-byte tag appended to the ciphertext.
//! - Tag verification fails closed: no plaintext is returned on mismatch.
//! - Caller provides IV and AAD (built by the aad module) per frame.

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Nonce};

use crate::constants::{IV_LEN_12, KEY_LEN_32, TAG_LEN};
use crate::crypto::types::{ContentKey, CryptoError};

#[derive(Clone)]
pub struct FrameCipher {
    cipher: Aes256Gcm,
}

impl FrameCipher {
    pub fn new(key: &ContentKey) -> Result<Self, CryptoError> {
        let cipher = Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| {
            CryptoError::InvalidKeyLen {
                expected: KEY_LEN_32,
                actual: key.as_bytes().len(),
            }
        })?;
        Ok(Self { cipher })
    }

    /// AEAD seal. Returns `ciphertext || tag`.
    pub fn seal(
        &self,
        iv: &[u8; IV_LEN_12],
        aad: &[u8],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        self.cipher
            .encrypt(Nonce::from_slice(iv), Payload { msg: plaintext, aad })
            .map_err(|_| CryptoError::Failure("AES-GCM seal failed".into()))
    }

    /// AEAD open of `ciphertext || tag`.
    pub fn open(
        &self,
        iv: &[u8; IV_LEN_12],
        aad: &[u8],
        ciphertext_and_tag: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        if ciphertext_and_tag.len() < TAG_LEN {
            return Err(CryptoError::TagMismatch);
        }
        self.cipher
            .decrypt(Nonce::from_slice(iv), Payload { msg: ciphertext_and_tag, aad })
            .map_err(|_| CryptoError::TagMismatch)
    }
}

impl std::fmt::Debug for FrameCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FrameCipher(AES-256-GCM)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::aad::build_aad;

    fn cipher() -> FrameCipher {
        FrameCipher::new(&ContentKey::from_bytes([0x42; KEY_LEN_32])).unwrap()
    }

    #[test]
    fn seal_open_roundtrip() {
        let c = cipher();
        let iv = [7u8; IV_LEN_12];
        let sealed = c.seal(&iv, &build_aad(3), b"frame body").unwrap();
        assert_eq!(sealed.len(), b"frame body".len() + TAG_LEN);
        assert_eq!(c.open(&iv, &build_aad(3), &sealed).unwrap(), b"frame body");
    }

    #[test]
    fn wrong_aad_is_tag_mismatch() {
        let c = cipher();
        let iv = [7u8; IV_LEN_12];
        let sealed = c.seal(&iv, &build_aad(0), b"frame body").unwrap();
        assert!(matches!(
            c.open(&iv, &build_aad(1), &sealed),
            Err(CryptoError::TagMismatch)
        ));
    }

    #[test]
    fn short_input_is_tag_mismatch() {
        let c = cipher();
        assert!(matches!(
            c.open(&[0u8; IV_LEN_12], &build_aad(0), &[0u8; TAG_LEN - 1]),
            Err(CryptoError::TagMismatch)
        ));
    }
}
