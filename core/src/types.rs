//! types.rs
//! Unified codec error covering header, frame, crypto, I/O and session misuse.
//! - `From<T>` impls make `?` work across layers.
//! - `kind()` folds every variant into the five fatal classes callers act on.

use std::fmt;
use std::io;

pub use crate::crypto::CryptoError;
pub use crate::headers::HeaderError;
pub use crate::stream::framing::FrameError;

/// Failure class of a `CodecError`. Every class is fatal for its session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad magic, unknown version, malformed header or frame layout.
    Format,
    /// AEAD tag verification failed on some frame.
    Authentication,
    /// Stream ended early or with undecoded bytes pending.
    Truncated,
    /// Decoded plaintext is itself a container.
    SelfContained,
    /// Operation invoked out of order or with invalid arguments.
    Parameter,
    /// Underlying reader/writer failed (stream drivers only).
    Io,
}

impl ErrorKind {
    /// Stable name used on the execution host protocol.
    pub const fn name(self) -> &'static str {
        match self {
            ErrorKind::Format => "format_error",
            ErrorKind::Authentication => "authentication_failed",
            ErrorKind::Truncated => "truncated_stream",
            ErrorKind::SelfContained => "self_contained_payload",
            ErrorKind::Parameter => "parameter_error",
            ErrorKind::Io => "io_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("header error: {0}")]
    Header(#[from] HeaderError),

    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Stream ended before the container was complete.
    #[error("truncated stream: {0}")]
    Truncated(String),

    /// Bytes kept arriving after the declared plaintext was fully emitted.
    #[error("trailing data: {extra} bytes after end of container")]
    TrailingData { extra: usize },

    /// Structurally valid frames that contradict the header.
    #[error("malformed container: {0}")]
    Malformed(String),

    /// Plaintext starts with the container magic (wrong key or double encryption).
    #[error("decoded plaintext is itself a container")]
    SelfContained,

    /// Operation issued before the session was initialized.
    #[error("{0} called before initialization")]
    NotInitialized(&'static str),

    /// Caller-supplied argument is unusable.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The session already returned a fatal error.
    #[error("session already failed")]
    SessionFailed,

    #[error("config error: {0}")]
    Config(String),
}

impl CodecError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::Header(_) => ErrorKind::Format,
            CodecError::Frame(FrameError::Truncated { .. }) => ErrorKind::Truncated,
            CodecError::Frame(_) => ErrorKind::Format,
            CodecError::Crypto(CryptoError::TagMismatch) => ErrorKind::Authentication,
            CodecError::Crypto(_) => ErrorKind::Parameter,
            CodecError::Io(_) => ErrorKind::Io,
            CodecError::Truncated(_) => ErrorKind::Truncated,
            CodecError::TrailingData { .. } | CodecError::Malformed(_) => ErrorKind::Format,
            CodecError::SelfContained => ErrorKind::SelfContained,
            CodecError::NotInitialized(_)
            | CodecError::InvalidInput(_)
            | CodecError::SessionFailed
            | CodecError::Config(_) => ErrorKind::Parameter,
        }
    }

    /// Shorthand for `self.kind().name()`.
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }
}

pub type CodecResult<T> = Result<T, CodecError>;
