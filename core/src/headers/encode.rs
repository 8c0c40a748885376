// ## 📂 File: `src/headers/encode.rs`
//! src/headers/encode.rs
//!
//! Serializes `ContainerHeader` into its fixed 17-byte big-endian form.
//! The header is validated first so an encoder can never emit a container
//! its own decoder would refuse.

use byteorder::{BigEndian, ByteOrder};

use crate::headers::types::{ContainerHeader, HeaderError, HEADER_LEN_V1};

#[inline]
pub fn encode_header(h: &ContainerHeader) -> Result<[u8; HEADER_LEN_V1], HeaderError> {
    h.validate()?;

    let mut out = [0u8; HEADER_LEN_V1];
    out[0..4].copy_from_slice(&h.magic); // 0..4   magic
    out[4] = h.version; // 4      version
    BigEndian::write_u32(&mut out[5..9], h.chunk_size); // 5..9   chunk size
    BigEndian::write_u32(&mut out[9..13], (h.total_size >> 32) as u32); // 9..13  total size, high half
    BigEndian::write_u32(&mut out[13..17], h.total_size as u32); // 13..17 total size, low half

    Ok(out)
}
