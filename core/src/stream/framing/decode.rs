use byteorder::{BigEndian, ByteOrder};

use crate::constants::IV_LEN_12;
use crate::stream::framing::types::{FrameError, FramePrefix, FrameView};

/// Parse the 16-byte prefix at the start of `wire`.
///
/// Only the prefix has to be present; the ciphertext may still be in flight.
#[inline]
pub fn parse_frame_prefix(wire: &[u8]) -> Result<FramePrefix, FrameError> {
    if wire.len() < FramePrefix::LEN {
        return Err(FrameError::Truncated {
            have: wire.len(),
            need: FramePrefix::LEN,
        });
    }

    let mut iv = [0u8; IV_LEN_12];
    iv.copy_from_slice(&wire[..IV_LEN_12]);
    let ciphertext_len = BigEndian::read_u32(&wire[IV_LEN_12..FramePrefix::LEN]);

    Ok(FramePrefix { iv, ciphertext_len })
}

/// Decode a single complete frame.
///
/// Caller guarantees `wire` holds exactly one frame; extra or missing bytes
/// are a `LengthMismatch`.
pub fn decode_frame(wire: &[u8]) -> Result<FrameView<'_>, FrameError> {
    let prefix = parse_frame_prefix(wire)?;

    let expected = prefix.wire_len();
    if wire.len() != expected {
        return Err(FrameError::LengthMismatch {
            expected,
            actual: wire.len(),
        });
    }

    Ok(FrameView {
        prefix,
        ciphertext: &wire[FramePrefix::LEN..],
    })
}
