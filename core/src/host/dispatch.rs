// ## 📂 File: `src/host/dispatch.rs`

//! The one place host requests turn into codec calls.
//!
//! Both hosts own a `Dispatcher`; they differ only in which thread runs it.
//! It holds at most one encode and one decode session. An init request
//! replaces any previous session of its kind, and a completed session is
//! dropped.

use tracing::debug;
use zeroize::Zeroize;

use crate::config::CodecConfig;
use crate::crypto::{derive_key, keccak256, ContentKey};
use crate::host::protocol::{HostError, Request, Response};
use crate::stream::{ChunkDecoder, ChunkEncoder};
use crate::telemetry::ProgressFn;
use crate::types::{CodecError, CodecResult};

pub struct Dispatcher {
    config: CodecConfig,
    progress: Option<ProgressFn>,
    encoder: Option<ChunkEncoder>,
    decoder: Option<ChunkDecoder>,
}

impl Dispatcher {
    pub fn new(config: CodecConfig, progress: Option<ProgressFn>) -> Self {
        Self {
            config,
            progress,
            encoder: None,
            decoder: None,
        }
    }

    pub fn handle(&mut self, request: Request) -> Result<Response, HostError> {
        let op = request.op();
        debug!(op, "host request");
        self.execute(request).map_err(HostError::from)
    }

    fn execute(&mut self, request: Request) -> CodecResult<Response> {
        match request {
            Request::DeriveKey { ikm, salt, info, length } => {
                let okm = derive_key(&ikm, salt.as_deref(), info.as_deref(), length)?;
                Ok(Response::Key(okm))
            }

            Request::Hash { data } => Ok(Response::Digest(keccak256(&data))),

            Request::EncodeInit { key, chunk_size, total_size } => {
                self.encoder = None;
                let key = take_key(key)?;
                let mut encoder = ChunkEncoder::new(&key, chunk_size, total_size)?;
                if let Some(p) = &self.progress {
                    encoder = encoder.with_progress(p.clone());
                }
                let frames = encoder.header().frame_count();
                self.encoder = Some(encoder);
                Ok(Response::EncodeReady { frames })
            }

            Request::EncodeChunk { index, plaintext } => {
                let encoder = self.encoder.as_mut().ok_or(CodecError::NotInitialized("encode-chunk"))?;
                Ok(Response::Frame(encoder.encode_chunk(index, &plaintext)?))
            }

            Request::EncodeFinal => {
                let encoder = self.encoder.as_mut().ok_or(CodecError::NotInitialized("encode-final"))?;
                let header = encoder.finalize()?;
                self.encoder = None;
                Ok(Response::Header(header))
            }

            Request::DecodeInit { key } => {
                self.decoder = None;
                let key = take_key(key)?;
                let mut decoder = ChunkDecoder::with_options(&key, self.config.decoder_options())?;
                if let Some(p) = &self.progress {
                    decoder = decoder.with_progress(p.clone());
                }
                self.decoder = Some(decoder);
                Ok(Response::DecodeStarted)
            }

            Request::DecodeHeader { header } => {
                let decoder = self.decoder.as_mut().ok_or(CodecError::NotInitialized("decode-header"))?;
                let header = decoder.decode_header(&header)?;
                Ok(Response::DecodeReady {
                    chunk_size: header.chunk_size,
                    total_size: header.total_size,
                })
            }

            Request::DecodeChunk { data } => {
                let decoder = self.decoder.as_mut().ok_or(CodecError::NotInitialized("decode-chunk"))?;
                Ok(Response::Plaintext(decoder.decode_chunk(&data)?))
            }

            Request::DecodeFinish => {
                let decoder = self.decoder.as_mut().ok_or(CodecError::NotInitialized("decode-finish"))?;
                let total_size = decoder.finish()?;
                self.decoder = None;
                Ok(Response::DecodeDone { total_size })
            }
        }
    }
}

/// Copy the raw key into a `ContentKey` and wipe the request buffer.
fn take_key(mut raw: Vec<u8>) -> CodecResult<ContentKey> {
    let key = ContentKey::from_slice(&raw);
    raw.zeroize();
    Ok(key?)
}
