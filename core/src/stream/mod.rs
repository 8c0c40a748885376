//! stream/
//! Chunked container codec: frame wire format, encoder and decoder sessions,
//! and whole-stream drivers over `std::io`.

pub mod framing;
pub mod encoder;
pub mod decoder;
pub mod io;

pub use encoder::{ChunkEncoder, EncoderState};
pub use decoder::{ChunkDecoder, DecoderOptions, DecoderState};
pub use io::{
    decrypt_from_slice, decrypt_reader, decrypt_stream, decrypt_stream_with_progress,
    encrypt_reader, encrypt_stream, encrypt_stream_with_progress, encrypt_to_vec, open_input,
    open_output, InputSource, OutputSink, StreamReport,
};
