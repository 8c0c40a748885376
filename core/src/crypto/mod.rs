//! crypto/
//! Primitives behind the container codec: frame AEAD, per-frame AAD and IV,
//! HKDF key derivation and the legacy Keccak-256 hasher.

pub mod types;
pub mod aad;
pub mod aead;
pub mod kdf;
pub mod nonce;
pub mod digest;

pub use types::*;
pub use aad::*;
pub use aead::*;
pub use kdf::*;
pub use nonce::*;
pub use digest::*;
