// ## 📂 File: `src/host/protocol.rs`

//! Request/response contract shared by every execution host.
//!
//! Inputs are owned byte buffers so a request can cross a thread boundary
//! unchanged. Failures travel as a stable error name plus a message.

use crate::constants::{DIGEST_LEN_32, HEADER_LEN};
use crate::types::CodecError;

/// Error name for a worker that died or answered out of turn.
pub const WORKER_UNAVAILABLE: &str = "worker_unavailable";

#[derive(Clone, PartialEq, Eq)]
pub enum Request {
    DeriveKey {
        ikm: Vec<u8>,
        salt: Option<Vec<u8>>,
        info: Option<Vec<u8>>,
        length: usize,
    },
    Hash {
        data: Vec<u8>,
    },
    EncodeInit {
        key: Vec<u8>,
        chunk_size: usize,
        total_size: u64,
    },
    EncodeChunk {
        index: u32,
        plaintext: Vec<u8>,
    },
    EncodeFinal,
    DecodeInit {
        key: Vec<u8>,
    },
    DecodeHeader {
        header: Vec<u8>,
    },
    DecodeChunk {
        data: Vec<u8>,
    },
    /// End of the byte stream for the open decode session.
    DecodeFinish,
}

impl Request {
    /// Operation name as used in logs.
    pub fn op(&self) -> &'static str {
        match self {
            Request::DeriveKey { .. } => "derive-key",
            Request::Hash { .. } => "hash",
            Request::EncodeInit { .. } => "encode-init",
            Request::EncodeChunk { .. } => "encode-chunk",
            Request::EncodeFinal => "encode-final",
            Request::DecodeInit { .. } => "decode-init",
            Request::DecodeHeader { .. } => "decode-header",
            Request::DecodeChunk { .. } => "decode-chunk",
            Request::DecodeFinish => "decode-finish",
        }
    }
}

// Keys and plaintext stay out of debug output.
impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Request::DeriveKey { length, .. } => {
                f.debug_struct("DeriveKey").field("length", length).finish_non_exhaustive()
            }
            Request::Hash { data } => f.debug_struct("Hash").field("len", &data.len()).finish(),
            Request::EncodeInit { chunk_size, total_size, .. } => f
                .debug_struct("EncodeInit")
                .field("chunk_size", chunk_size)
                .field("total_size", total_size)
                .finish_non_exhaustive(),
            Request::EncodeChunk { index, plaintext } => f
                .debug_struct("EncodeChunk")
                .field("index", index)
                .field("len", &plaintext.len())
                .finish(),
            Request::EncodeFinal => f.write_str("EncodeFinal"),
            Request::DecodeInit { .. } => f.debug_struct("DecodeInit").finish_non_exhaustive(),
            Request::DecodeHeader { header } => {
                f.debug_struct("DecodeHeader").field("len", &header.len()).finish()
            }
            Request::DecodeChunk { data } => {
                f.debug_struct("DecodeChunk").field("len", &data.len()).finish()
            }
            Request::DecodeFinish => f.write_str("DecodeFinish"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Key(Vec<u8>),
    Digest([u8; DIGEST_LEN_32]),
    /// Encode session open; `frames` chunks are expected.
    EncodeReady { frames: u64 },
    Frame(Vec<u8>),
    Header([u8; HEADER_LEN]),
    /// Decode session open, waiting for the header.
    DecodeStarted,
    DecodeReady { chunk_size: u32, total_size: u64 },
    /// Plaintext released by this delivery; may be empty.
    Plaintext(Vec<u8>),
    DecodeDone { total_size: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{name}: {message}")]
pub struct HostError {
    pub name: &'static str,
    pub message: String,
}

impl HostError {
    pub fn worker_unavailable(message: impl Into<String>) -> Self {
        Self {
            name: WORKER_UNAVAILABLE,
            message: message.into(),
        }
    }
}

impl From<CodecError> for HostError {
    fn from(e: CodecError) -> Self {
        Self {
            name: e.name(),
            message: e.to_string(),
        }
    }
}
