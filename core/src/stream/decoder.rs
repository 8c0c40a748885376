// ## 📂 File: `src/stream/decoder.rs`

//! Chunk Decoder.
//!
//! Incremental decoder for a container that arrives in arbitrary read
//! boundaries. Modeled as an explicit state machine:
//!
//! ```text
//! AwaitingHeader --17 bytes--> AwaitingFrame --total_size emitted--> Done
//!        |                           |
//!        +--------- any error -------+--------> Errored
//! ```
//!
//! Bytes that cannot be parsed yet live in one growable `BytesMut` arena.
//! Every delivery drains the arena to a fixed point: no fully buffered frame
//! is ever left undecoded.
//!
//! Completion requires both conditions to agree: the declared `total_size`
//! has been emitted and the arena is empty when the byte source ends.

use std::time::Instant;

use bytes::BytesMut;
use tracing::{debug, info, warn};

use crate::constants::{HEADER_LEN, MAGIC_CVF1, TAG_LEN};
use crate::crypto::{build_aad, ContentKey, FrameCipher};
use crate::headers::{decode_header, ContainerHeader};
use crate::stream::framing::{decode_frame, parse_frame_prefix, FramePrefix};
use crate::telemetry::{report, ProgressFn, TelemetryCounters, TelemetrySnapshot};
use crate::types::{CodecError, CodecResult};

const MAGIC_LEN: usize = MAGIC_CVF1.len();
const MAX_FRAMES: u64 = 1 << 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    AwaitingHeader,
    AwaitingFrame,
    Done,
    Errored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Reject plaintext that starts with the container magic.
    ///
    /// Heuristic only: a legitimate file that begins with those four bytes
    /// is rejected too.
    pub reject_nested_container: bool,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            reject_nested_container: true,
        }
    }
}

pub struct ChunkDecoder {
    cipher: FrameCipher,
    options: DecoderOptions,
    state: DecoderState,
    header: Option<ContainerHeader>,
    pending: BytesMut,
    /// Sequence counter; AAD of the next frame.
    next_index: u64,
    /// Plaintext bytes decrypted so far.
    decrypted: u64,
    /// Leading plaintext withheld until the magic check can run.
    held: Vec<u8>,
    head_checked: bool,
    counters: TelemetryCounters,
    started: Instant,
    progress: Option<ProgressFn>,
}

impl ChunkDecoder {
    pub fn new(key: &ContentKey) -> CodecResult<Self> {
        Self::with_options(key, DecoderOptions::default())
    }

    pub fn with_options(key: &ContentKey, options: DecoderOptions) -> CodecResult<Self> {
        Ok(Self {
            cipher: FrameCipher::new(key)?,
            options,
            state: DecoderState::AwaitingHeader,
            header: None,
            pending: BytesMut::new(),
            next_index: 0,
            decrypted: 0,
            held: Vec::with_capacity(MAGIC_LEN),
            head_checked: !options.reject_nested_container,
            counters: TelemetryCounters::default(),
            started: Instant::now(),
            progress: None,
        })
    }

    pub fn with_progress(mut self, progress: ProgressFn) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    pub fn header(&self) -> Option<&ContainerHeader> {
        self.header.as_ref()
    }

    /// Frames successfully decrypted so far.
    pub fn frames_decoded(&self) -> u64 {
        self.next_index
    }

    /// Plaintext bytes decrypted so far.
    pub fn bytes_decrypted(&self) -> u64 {
        self.decrypted
    }

    /// Bytes buffered but not yet decodable.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from(&self.counters, self.started)
    }

    /// Header phase: parse exactly the first 17 bytes of the container.
    pub fn decode_header(&mut self, bytes: &[u8]) -> CodecResult<ContainerHeader> {
        self.expect_state(DecoderState::AwaitingHeader, "decode_header")?;
        // Bytes already buffered by `feed` would sit in front of the first frame.
        let result = if !self.pending.is_empty() {
            Err(CodecError::InvalidInput(format!(
                "decode_header after {} bytes were fed; use one of feed or decode_header",
                self.pending.len()
            )))
        } else if bytes.len() > HEADER_LEN {
            Err(CodecError::InvalidInput(format!(
                "header must be exactly {HEADER_LEN} bytes, got {}",
                bytes.len()
            )))
        } else {
            self.accept_header(bytes)
        };
        self.guard(result)
    }

    /// Streaming phase: append `data` and return all plaintext that became
    /// decodable.
    pub fn decode_chunk(&mut self, data: &[u8]) -> CodecResult<Vec<u8>> {
        match self.state {
            DecoderState::AwaitingHeader => return Err(CodecError::NotInitialized("decode_chunk")),
            DecoderState::Errored => return Err(CodecError::SessionFailed),
            DecoderState::AwaitingFrame | DecoderState::Done => {}
        }
        self.pending.extend_from_slice(data);
        let result = self.drain();
        self.guard(result)
    }

    /// Feed raw container bytes, header included, in any split.
    ///
    /// Collects the header from the first deliveries, then behaves like
    /// `decode_chunk`.
    pub fn feed(&mut self, data: &[u8]) -> CodecResult<Vec<u8>> {
        if self.state != DecoderState::AwaitingHeader {
            return self.decode_chunk(data);
        }

        self.pending.extend_from_slice(data);
        if self.pending.len() < HEADER_LEN {
            return Ok(Vec::new());
        }

        let header_bytes = self.pending.split_to(HEADER_LEN);
        let result = self.accept_header(&header_bytes).and_then(|_| self.drain());
        self.guard(result)
    }

    /// End of stream. Succeeds only if the container was fully decoded and
    /// nothing is left over; returns the total plaintext length.
    pub fn finish(&mut self) -> CodecResult<u64> {
        let result = match self.state {
            DecoderState::Errored => return Err(CodecError::SessionFailed),
            DecoderState::AwaitingHeader => Err(CodecError::Truncated(format!(
                "stream ended after {} of {HEADER_LEN} header bytes",
                self.pending.len()
            ))),
            DecoderState::AwaitingFrame => {
                let total = self.header.map(|h| h.total_size).unwrap_or_default();
                Err(CodecError::Truncated(format!(
                    "stream ended after {} of {total} plaintext bytes with {} bytes pending",
                    self.decrypted,
                    self.pending.len()
                )))
            }
            DecoderState::Done if !self.pending.is_empty() => Err(CodecError::TrailingData {
                extra: self.pending.len(),
            }),
            DecoderState::Done => Ok(self.decrypted),
        };

        if result.is_ok() {
            info!(frames = self.next_index, bytes = self.decrypted, "decode session finished");
        }
        self.guard(result)
    }

    fn expect_state(&self, want: DecoderState, op: &'static str) -> CodecResult<()> {
        match self.state {
            s if s == want => Ok(()),
            DecoderState::Errored => Err(CodecError::SessionFailed),
            _ => Err(CodecError::InvalidInput(format!(
                "{op} not valid in state {:?}",
                self.state
            ))),
        }
    }

    fn guard<T>(&mut self, result: CodecResult<T>) -> CodecResult<T> {
        if let Err(e) = &result {
            warn!(
                kind = e.name(),
                index = self.next_index,
                decrypted = self.decrypted,
                error = %e,
                "decode session failed"
            );
            self.state = DecoderState::Errored;
            self.pending.clear();
            self.held.clear();
        }
        result
    }

    fn accept_header(&mut self, bytes: &[u8]) -> CodecResult<ContainerHeader> {
        if bytes.len() < HEADER_LEN {
            return Err(CodecError::Truncated(format!(
                "header needs {HEADER_LEN} bytes, got {}",
                bytes.len()
            )));
        }

        let header = decode_header(bytes)?;
        if header.frame_count() > MAX_FRAMES {
            return Err(CodecError::Malformed(format!(
                "{} frames exceed the 32-bit frame index",
                header.frame_count()
            )));
        }
        self.header = Some(header);
        self.counters.add_header(HEADER_LEN);
        self.state = if header.total_size == 0 {
            DecoderState::Done
        } else {
            DecoderState::AwaitingFrame
        };

        info!(
            chunk_size = header.chunk_size,
            total_size = header.total_size,
            "decode session header accepted"
        );
        Ok(header)
    }

    /// Decode every frame that is fully buffered.
    fn drain(&mut self) -> CodecResult<Vec<u8>> {
        let header = self.header.ok_or(CodecError::NotInitialized("decode_chunk"))?;
        let mut out = Vec::new();

        loop {
            if self.state == DecoderState::Done {
                if !self.pending.is_empty() {
                    return Err(CodecError::TrailingData {
                        extra: self.pending.len(),
                    });
                }
                break;
            }

            if self.pending.len() < FramePrefix::LEN {
                break;
            }
            let prefix = parse_frame_prefix(&self.pending)?;

            // The header fixes every frame's size, so a bad length prefix is
            // rejected before waiting on bytes that may never come.
            let expected_pt = header
                .frame_plaintext_len(self.next_index)
                .ok_or_else(|| CodecError::Malformed(format!("frame {} beyond total_size", self.next_index)))?;
            let expected_ct = expected_pt + TAG_LEN;
            if prefix.ciphertext_len as usize != expected_ct {
                return Err(CodecError::Malformed(format!(
                    "frame {} declares {} ciphertext bytes, expected {expected_ct}",
                    self.next_index, prefix.ciphertext_len
                )));
            }

            let wire_len = prefix.wire_len();
            if self.pending.len() < wire_len {
                break;
            }

            let wire = self.pending.split_to(wire_len);
            let plaintext = self.open_frame(&wire, header.total_size)?;
            self.counters.add_frame(plaintext.len(), wire_len);
            out.extend_from_slice(&self.release(plaintext, header.total_size)?);
        }

        Ok(out)
    }

    fn open_frame(&mut self, wire: &[u8], total: u64) -> CodecResult<Vec<u8>> {
        let frame = decode_frame(wire)?;
        let index = u32::try_from(self.next_index)
            .map_err(|_| CodecError::Malformed("frame index overflow".into()))?;

        let plaintext = self
            .cipher
            .open(&frame.prefix.iv, &build_aad(index), frame.ciphertext)?;

        self.next_index += 1;
        self.decrypted += plaintext.len() as u64;
        debug!(index, len = plaintext.len(), decrypted = self.decrypted, "opened frame");

        if self.decrypted == total {
            self.state = DecoderState::Done;
        }
        report(self.progress.as_ref(), self.decrypted, total);
        Ok(plaintext)
    }

    /// Hold back leading bytes until the nested-container check has run.
    fn release(&mut self, plaintext: Vec<u8>, total: u64) -> CodecResult<Vec<u8>> {
        if self.head_checked {
            return Ok(plaintext);
        }

        self.held.extend_from_slice(&plaintext);
        if self.held.len() >= MAGIC_LEN {
            if self.options.reject_nested_container && self.held[..MAGIC_LEN] == MAGIC_CVF1 {
                return Err(CodecError::SelfContained);
            }
            self.head_checked = true;
            return Ok(std::mem::take(&mut self.held));
        }

        // Whole plaintext shorter than the magic cannot be a container.
        if self.decrypted == total {
            self.head_checked = true;
            return Ok(std::mem::take(&mut self.held));
        }

        Ok(Vec::new())
    }
}

impl std::fmt::Debug for ChunkDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkDecoder")
            .field("state", &self.state)
            .field("header", &self.header)
            .field("next_index", &self.next_index)
            .field("decrypted", &self.decrypted)
            .field("pending", &self.pending.len())
            .finish()
    }
}
