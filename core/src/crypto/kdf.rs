// ## src/crypto/kdf.rs

//! crypto/kdf.rs
//! HKDF-SHA256 key derivation.
//!
//! Design:
//! - HKDF-Extract(salt, ikm) -> PRK
//! - HKDF-Expand(PRK, info) -> `length` bytes
//!
//! Deterministic: identical (ikm, salt, info, length) always yield identical
//! output. Lets one secret fan out into independent keys per purpose without
//! fresh entropy.

use hkdf::Hkdf;
use sha2::Sha256;
use tracing::debug;

use crate::constants::MAX_HKDF_SHA256_LEN;
use crate::crypto::types::CryptoError;

/// Derive `length` bytes from `ikm` with optional `salt` and `info`.
///
/// `salt = None` uses the RFC 5869 default (32 zero bytes); `info = None` is
/// the empty context.
///
/// Errors:
/// - `length == 0` or `length > 255 * 32` returns `CryptoError::InvalidOutputLen`.
pub fn derive_key(
    ikm: &[u8],
    salt: Option<&[u8]>,
    info: Option<&[u8]>,
    length: usize,
) -> Result<Vec<u8>, CryptoError> {
    if length == 0 || length > MAX_HKDF_SHA256_LEN {
        return Err(CryptoError::InvalidOutputLen {
            requested: length,
            max: MAX_HKDF_SHA256_LEN,
        });
    }

    let hk = Hkdf::<Sha256>::new(salt, ikm);
    let mut okm = vec![0u8; length];
    hk.expand(info.unwrap_or_default(), &mut okm)
        .map_err(|_| CryptoError::InvalidOutputLen {
            requested: length,
            max: MAX_HKDF_SHA256_LEN,
        })?;

    debug!(length, salted = salt.is_some(), "derived key material");
    Ok(okm)
}

/// Fixed-size convenience wrapper, e.g. for a 32-byte content key.
pub fn derive_key_array<const N: usize>(
    ikm: &[u8],
    salt: Option<&[u8]>,
    info: Option<&[u8]>,
) -> Result<[u8; N], CryptoError> {
    let okm = derive_key(ikm, salt, info, N)?;
    let mut out = [0u8; N];
    out.copy_from_slice(&okm);
    Ok(out)
}
