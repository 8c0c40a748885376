//! constants.rs
//! Wire constants for the chunked container format.

/// Magic tag at the start of every container.
/// "CVF1" = ChunkVault Format 1
pub const MAGIC_CVF1: [u8; 4] = *b"CVF1";

/// Current container format version.
pub const CONTAINER_V1: u8 = 1;

/// Fixed container header length: magic(4) + version(1) + chunk_size(4) + total_size(8).
pub const HEADER_LEN: usize = 17;

/// Symmetric key length (AES-256).
pub const KEY_LEN_32: usize = 32;

/// Per-frame IV length.
pub const IV_LEN_12: usize = 12;

/// Big-endian u32 ciphertext length prefix.
pub const LEN_PREFIX: usize = 4;

/// IV + length prefix; the minimum number of bytes needed to size a frame.
pub const FRAME_PREFIX_LEN: usize = IV_LEN_12 + LEN_PREFIX;

/// AEAD tag length (bytes).
pub const TAG_LEN: usize = 16;

/// Defaults when the caller does not choose.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024; // 64 KiB

/// Max chunk size sanity bound (32 MiB).
pub const MAX_CHUNK_SIZE: usize = 32 * 1024 * 1024;

/// Request queue bound for the worker host.
pub const DEFAULT_QUEUE_CAP: usize = 16;

/// HKDF-SHA256 can expand to at most 255 blocks of 32 bytes.
pub const MAX_HKDF_SHA256_LEN: usize = 255 * 32;

/// Keccak-256 digest length.
pub const DIGEST_LEN_32: usize = 32;
