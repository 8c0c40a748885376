// ## 📂 File: `src/stream/io.rs`
// ## Normalized I/O + whole-stream encrypt/decrypt drivers

use std::io::{self, Cursor, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::config::CodecConfig;
use crate::crypto::ContentKey;
use crate::stream::decoder::ChunkDecoder;
use crate::stream::encoder::ChunkEncoder;
use crate::telemetry::{ProgressFn, TelemetrySnapshot};
use crate::types::{CodecError, CodecResult};

/// Canonical input abstraction.
///
/// The header carries the plaintext length up front, so an encrypting reader
/// must declare it.
pub enum InputSource {
    Reader { reader: Box<dyn Read + Send>, len: u64 },
    File(PathBuf),
    Memory(Vec<u8>),
}

/// Canonical output abstraction.
pub enum OutputSink {
    Writer(Box<dyn Write + Send>),
    File(PathBuf),
    /// Collect into a buffer returned in `StreamReport::output`.
    Memory,
}

/// Normalize an input source into a boxed reader and its length.
pub fn open_input(src: InputSource) -> CodecResult<(Box<dyn Read + Send>, u64)> {
    Ok(match src {
        InputSource::Reader { reader, len } => (reader, len),
        InputSource::File(p) => {
            let file = std::fs::File::open(p)?;
            let len = file.metadata()?.len();
            (Box::new(file), len)
        }
        InputSource::Memory(b) => {
            let len = b.len() as u64;
            (Box::new(Cursor::new(b)), len)
        }
    })
}

/// Normalize an output sink into a boxed writer. For `Memory` the shared
/// buffer is returned alongside.
pub fn open_output(
    sink: OutputSink,
) -> CodecResult<(Box<dyn Write + Send>, Option<Arc<Mutex<Vec<u8>>>>)> {
    match sink {
        OutputSink::Writer(w) => Ok((w, None)),
        OutputSink::File(p) => Ok((Box::new(io::BufWriter::new(std::fs::File::create(p)?)), None)),
        OutputSink::Memory => {
            let buf = Arc::new(Mutex::new(Vec::new()));
            let writer = SharedBufferWriter { buf: buf.clone() };
            Ok((Box::new(writer), Some(buf)))
        }
    }
}

pub struct SharedBufferWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl Write for SharedBufferWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .buf
            .lock()
            .map_err(|_| io::Error::other("output buffer lock poisoned"))?;
        guard.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Result of a whole-stream run.
#[derive(Debug)]
pub struct StreamReport {
    pub snapshot: TelemetrySnapshot,
    /// Collected bytes when the sink was `OutputSink::Memory`.
    pub output: Option<Vec<u8>>,
}

fn take_buffer(buf: Option<Arc<Mutex<Vec<u8>>>>) -> CodecResult<Option<Vec<u8>>> {
    match buf {
        None => Ok(None),
        Some(buf) => {
            let mut guard = buf
                .lock()
                .map_err(|_| io::Error::other("output buffer lock poisoned"))?;
            Ok(Some(std::mem::take(&mut *guard)))
        }
    }
}

/// Run a driver against `sink`.
///
/// A `File` sink is written through a temp file in the same directory and
/// only renamed onto the target once `run` succeeds, so a failed session
/// leaves nothing at the target path.
fn write_to_sink<F>(sink: OutputSink, run: F) -> CodecResult<StreamReport>
where
    F: FnOnce(&mut dyn Write) -> CodecResult<TelemetrySnapshot>,
{
    match sink {
        OutputSink::File(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let mut tmp = NamedTempFile::new_in(dir)?;
            let snapshot = {
                let mut writer = io::BufWriter::new(tmp.as_file_mut());
                let snapshot = run(&mut writer)?;
                writer.flush()?;
                snapshot
            };
            tmp.persist(&path).map_err(|e| CodecError::Io(e.error))?;
            Ok(StreamReport { snapshot, output: None })
        }
        other => {
            let (mut writer, buf) = open_output(other)?;
            let snapshot = run(&mut writer)?;
            drop(writer);
            Ok(StreamReport { snapshot, output: take_buffer(buf)? })
        }
    }
}

// ================= Encrypt =================

pub fn encrypt_stream(
    input: InputSource,
    output: OutputSink,
    key: &ContentKey,
    config: &CodecConfig,
) -> CodecResult<StreamReport> {
    encrypt_stream_with_progress(input, output, key, config, None)
}

pub fn encrypt_stream_with_progress(
    input: InputSource,
    output: OutputSink,
    key: &ContentKey,
    config: &CodecConfig,
    progress: Option<ProgressFn>,
) -> CodecResult<StreamReport> {
    let (mut reader, len) = open_input(input)?;
    write_to_sink(output, |writer| {
        encrypt_reader(&mut reader, len, writer, key, config, progress)
    })
}

/// Encrypt exactly `len` bytes from `reader` into `writer`, header first.
pub fn encrypt_reader<R: Read + ?Sized, W: Write + ?Sized>(
    reader: &mut R,
    len: u64,
    writer: &mut W,
    key: &ContentKey,
    config: &CodecConfig,
    progress: Option<ProgressFn>,
) -> CodecResult<TelemetrySnapshot> {
    config.validate()?;
    let mut encoder = ChunkEncoder::new(key, config.chunk_size, len)?;
    if let Some(p) = progress {
        encoder = encoder.with_progress(p);
    }

    writer.write_all(&encoder.header_bytes()?)?;

    let mut chunk = vec![0u8; config.chunk_size];
    while let Some(want) = encoder.next_chunk_len() {
        let index = u32::try_from(encoder.next_index())
            .map_err(|_| CodecError::InvalidInput("frame index overflow".into()))?;
        read_exact_or_truncated(reader, &mut chunk[..want], encoder.header().total_size)?;
        let frame = encoder.encode_chunk(index, &chunk[..want])?;
        writer.write_all(&frame)?;
    }

    // The declared length must match the source exactly.
    let mut probe = [0u8; 1];
    if read_some(reader, &mut probe)? != 0 {
        return Err(CodecError::InvalidInput(format!(
            "input longer than declared length {len}"
        )));
    }

    encoder.finalize()?;
    writer.flush()?;
    let snapshot = encoder.snapshot();
    debug!(frames = snapshot.frames, "encrypt stream complete");
    Ok(snapshot)
}

fn read_exact_or_truncated<R: Read + ?Sized>(
    reader: &mut R,
    buf: &mut [u8],
    declared: u64,
) -> CodecResult<()> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => CodecError::Truncated(format!(
            "input shorter than declared length {declared}"
        )),
        _ => CodecError::Io(e),
    })
}

fn read_some<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> CodecResult<usize> {
    loop {
        match reader.read(buf) {
            Ok(n) => return Ok(n),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}

// ================= Decrypt =================

pub fn decrypt_stream(
    input: InputSource,
    output: OutputSink,
    key: &ContentKey,
    config: &CodecConfig,
) -> CodecResult<StreamReport> {
    decrypt_stream_with_progress(input, output, key, config, None)
}

pub fn decrypt_stream_with_progress(
    input: InputSource,
    output: OutputSink,
    key: &ContentKey,
    config: &CodecConfig,
    progress: Option<ProgressFn>,
) -> CodecResult<StreamReport> {
    let (mut reader, _) = open_input(input)?;
    write_to_sink(output, |writer| decrypt_reader(&mut reader, writer, key, config, progress))
}

/// Decrypt a container from `reader`, whatever sizes its reads return,
/// writing plaintext as soon as each frame authenticates.
pub fn decrypt_reader<R: Read + ?Sized, W: Write + ?Sized>(
    reader: &mut R,
    writer: &mut W,
    key: &ContentKey,
    config: &CodecConfig,
    progress: Option<ProgressFn>,
) -> CodecResult<TelemetrySnapshot> {
    config.validate()?;
    let mut decoder = ChunkDecoder::with_options(key, config.decoder_options())?;
    if let Some(p) = progress {
        decoder = decoder.with_progress(p);
    }

    let mut buf = vec![0u8; config.chunk_size];
    loop {
        let n = read_some(reader, &mut buf)?;
        if n == 0 {
            break;
        }
        let plaintext = decoder.feed(&buf[..n])?;
        if !plaintext.is_empty() {
            writer.write_all(&plaintext)?;
        }
    }

    let total = decoder.finish()?;
    writer.flush()?;
    debug!(total, "decrypt stream complete");
    Ok(decoder.snapshot())
}

// ================= In-memory =================

pub fn encrypt_to_vec(plaintext: &[u8], key: &ContentKey, config: &CodecConfig) -> CodecResult<Vec<u8>> {
    let mut out = Vec::new();
    let mut reader = plaintext;
    encrypt_reader(&mut reader, plaintext.len() as u64, &mut out, key, config, None)?;
    Ok(out)
}

pub fn decrypt_from_slice(container: &[u8], key: &ContentKey, config: &CodecConfig) -> CodecResult<Vec<u8>> {
    config.validate()?;
    let mut decoder = ChunkDecoder::with_options(key, config.decoder_options())?;
    let mut out = decoder.feed(container)?;
    decoder.finish()?;
    out.shrink_to_fit();
    Ok(out)
}
