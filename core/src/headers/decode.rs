// ## 📂 File: `src/headers/decode.rs`
//! src/headers/decode.rs
//!
//! Parses the first 17 bytes of a container. Magic and version are checked
//! before any other field is trusted; bytes past the header are ignored.

use byteorder::{BigEndian, ByteOrder};

use crate::headers::types::{ContainerHeader, HeaderError, HEADER_LEN_V1};

#[inline]
pub fn decode_header(buf: &[u8]) -> Result<ContainerHeader, HeaderError> {
    if buf.len() < HEADER_LEN_V1 {
        return Err(HeaderError::BufferTooShort {
            have: buf.len(),
            need: HEADER_LEN_V1,
        });
    }

    let mut magic = [0u8; 4];
    magic.copy_from_slice(&buf[0..4]);

    let hi = BigEndian::read_u32(&buf[9..13]) as u64;
    let lo = BigEndian::read_u32(&buf[13..17]) as u64;

    let h = ContainerHeader {
        magic,
        version: buf[4],
        chunk_size: BigEndian::read_u32(&buf[5..9]),
        total_size: (hi << 32) | lo,
    };

    h.validate()?;
    Ok(h)
}
