// ## 📂 File: `src/stream/encoder.rs`

//! Chunk Encoder.
//!
//! Turns plaintext chunks into frames of a self-describing container:
//!
//! ```text
//! [ header (17) ][ frame 0 ][ frame 1 ] ... [ frame n-1 ]
//! ```
//!
//! Only one chunk is held at a time. The header depends solely on
//! `(chunk_size, total_size)`, so it is fixed at construction and can be
//! fetched before or after the chunks; whoever assembles the stream writes it
//! first.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::constants::{HEADER_LEN, MAX_CHUNK_SIZE};
use crate::crypto::{build_aad, random_iv, ContentKey, FrameCipher};
use crate::headers::{encode_header, ContainerHeader};
use crate::stream::framing::encode_frame;
use crate::telemetry::{report, ProgressFn, TelemetryCounters, TelemetrySnapshot};
use crate::types::{CodecError, CodecResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderState {
    Encoding,
    Finalized,
    Errored,
}

pub struct ChunkEncoder {
    cipher: FrameCipher,
    header: ContainerHeader,
    state: EncoderState,
    next_index: u64,
    encoded: u64,
    counters: TelemetryCounters,
    started: Instant,
    progress: Option<ProgressFn>,
}

impl ChunkEncoder {
    /// Start an encode session for `total_size` plaintext bytes split into
    /// `chunk_size`-byte frames.
    pub fn new(key: &ContentKey, chunk_size: usize, total_size: u64) -> CodecResult<Self> {
        validate_chunk_size(chunk_size)?;

        let header = ContainerHeader::new(chunk_size as u32, total_size);
        // AAD is a u32 index, so a container cannot hold more frames than that.
        if header.frame_count() > u32::MAX as u64 + 1 {
            return Err(CodecError::InvalidInput(format!(
                "total_size {total_size} needs {} frames of {chunk_size} bytes; limit is 2^32",
                header.frame_count()
            )));
        }

        let mut counters = TelemetryCounters::default();
        counters.add_header(HEADER_LEN);

        info!(chunk_size, total_size, frames = header.frame_count(), "encode session started");

        Ok(Self {
            cipher: FrameCipher::new(key)?,
            header,
            state: EncoderState::Encoding,
            next_index: 0,
            encoded: 0,
            counters,
            started: Instant::now(),
            progress: None,
        })
    }

    pub fn with_progress(mut self, progress: ProgressFn) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn header(&self) -> &ContainerHeader {
        &self.header
    }

    pub fn state(&self) -> EncoderState {
        self.state
    }

    /// Encoded header bytes. Pure: may be called at any point in the session.
    pub fn header_bytes(&self) -> CodecResult<[u8; HEADER_LEN]> {
        Ok(encode_header(&self.header)?)
    }

    /// Index the next `encode_chunk` call must carry.
    pub fn next_index(&self) -> u64 {
        self.next_index
    }

    /// Plaintext bytes the next chunk must contain, or `None` once all
    /// `total_size` bytes have been encoded.
    pub fn next_chunk_len(&self) -> Option<usize> {
        self.header.frame_plaintext_len(self.next_index)
    }

    /// Seal the chunk at `index` into one wire frame.
    ///
    /// Chunks must arrive in index order, each exactly `chunk_size` bytes
    /// except the final one, which carries the remainder.
    pub fn encode_chunk(&mut self, index: u32, plaintext: &[u8]) -> CodecResult<Vec<u8>> {
        match self.state {
            EncoderState::Encoding => {}
            EncoderState::Finalized => {
                return Err(CodecError::InvalidInput("encode session already finalized".into()))
            }
            EncoderState::Errored => return Err(CodecError::SessionFailed),
        }

        let result = self.seal_chunk(index, plaintext);
        if let Err(e) = &result {
            warn!(index, error = %e, "encode session failed");
            self.state = EncoderState::Errored;
        }
        result
    }

    fn seal_chunk(&mut self, index: u32, plaintext: &[u8]) -> CodecResult<Vec<u8>> {
        if index as u64 != self.next_index {
            return Err(CodecError::InvalidInput(format!(
                "chunk index {index} out of order, expected {}",
                self.next_index
            )));
        }

        let expected = self.next_chunk_len().ok_or_else(|| {
            CodecError::InvalidInput(format!(
                "chunk {index} exceeds declared total_size {}",
                self.header.total_size
            ))
        })?;
        if plaintext.len() != expected {
            return Err(CodecError::InvalidInput(format!(
                "chunk {index} has {} bytes, expected {expected}",
                plaintext.len()
            )));
        }

        let iv = random_iv();
        let ciphertext = self.cipher.seal(&iv, &build_aad(index), plaintext)?;
        let wire = encode_frame(&iv, &ciphertext)?;

        self.next_index += 1;
        self.encoded += plaintext.len() as u64;
        self.counters.add_frame(plaintext.len(), wire.len());
        debug!(index, len = plaintext.len(), encoded = self.encoded, "sealed frame");
        report(self.progress.as_ref(), self.encoded, self.header.total_size);

        Ok(wire)
    }

    /// Close the session and return the header bytes.
    ///
    /// Fails if fewer than `total_size` bytes were encoded.
    pub fn finalize(&mut self) -> CodecResult<[u8; HEADER_LEN]> {
        match self.state {
            EncoderState::Encoding => {}
            EncoderState::Finalized => return self.header_bytes(),
            EncoderState::Errored => return Err(CodecError::SessionFailed),
        }

        if self.encoded != self.header.total_size {
            self.state = EncoderState::Errored;
            return Err(CodecError::InvalidInput(format!(
                "finalize after {} of {} bytes",
                self.encoded, self.header.total_size
            )));
        }

        self.state = EncoderState::Finalized;
        info!(frames = self.counters.frames, bytes = self.encoded, "encode session finalized");
        self.header_bytes()
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from(&self.counters, self.started)
    }
}

pub(crate) fn validate_chunk_size(chunk_size: usize) -> CodecResult<()> {
    if chunk_size == 0 || chunk_size > MAX_CHUNK_SIZE {
        return Err(CodecError::InvalidInput(format!(
            "chunk_size {chunk_size} outside 1..={MAX_CHUNK_SIZE}"
        )));
    }
    Ok(())
}

impl std::fmt::Debug for ChunkEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkEncoder")
            .field("header", &self.header)
            .field("state", &self.state)
            .field("next_index", &self.next_index)
            .field("encoded", &self.encoded)
            .finish()
    }
}
