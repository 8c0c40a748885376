use byteorder::{BigEndian, ByteOrder};

use crate::constants::{IV_LEN_12, LEN_PREFIX};
use crate::stream::framing::types::{FrameError, FramePrefix};

/// Encode one frame into canonical wire format.
///
/// Layout:
///
/// ```text
/// [ iv (12) ]
/// [ ciphertext_len (4, BE) ]
/// [ ciphertext + tag (ciphertext_len) ]
/// ```
pub fn encode_frame(iv: &[u8; IV_LEN_12], ciphertext: &[u8]) -> Result<Vec<u8>, FrameError> {
    let ciphertext_len = u32::try_from(ciphertext.len())
        .map_err(|_| FrameError::CiphertextTooLarge { len: ciphertext.len() })?;

    let expected = FramePrefix::LEN + ciphertext.len();
    let mut out = Vec::with_capacity(expected);

    let mut len_be = [0u8; LEN_PREFIX];
    BigEndian::write_u32(&mut len_be, ciphertext_len);

    out.extend_from_slice(iv);
    out.extend_from_slice(&len_be);
    out.extend_from_slice(ciphertext);

    if out.len() != expected {
        return Err(FrameError::LengthMismatch {
            expected,
            actual: out.len(),
        });
    }

    Ok(out)
}
