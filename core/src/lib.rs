//! chunkvault-core
//!
//! Chunked authenticated-encryption container codec.
//! Header + AES-256-GCM frames, incremental decoding over arbitrary read
//! splits, HKDF key derivation, legacy Keccak-256 hashing, and worker or
//! inline execution hosts over one shared codec.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod config;

pub mod headers;
pub mod crypto;
pub mod telemetry;

// Stream layers
pub mod stream;

// Execution hosts
pub mod host;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::config::{CodecConfig, HostMode};
    pub use crate::crypto::{derive_key, keccak256, keccak256_hex, ContentHasher, ContentKey};
    pub use crate::headers::ContainerHeader;
    pub use crate::host::{open_host, CryptoHost, HostError, InlineHost, Request, Response, WorkerHost};
    pub use crate::stream::{
        decrypt_from_slice, decrypt_stream, encrypt_stream, encrypt_to_vec, ChunkDecoder,
        ChunkEncoder, InputSource, OutputSink,
    };
    pub use crate::telemetry::{Progress, ProgressFn, TelemetrySnapshot};
    pub use crate::types::{CodecError, CodecResult, ErrorKind};
}
