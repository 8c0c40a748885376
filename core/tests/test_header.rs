#[cfg(test)]
mod tests {
    use chunkvault_core::constants::{HEADER_LEN, MAGIC_CVF1, MAX_CHUNK_SIZE};
    use chunkvault_core::headers::{decode_header, encode_header, ContainerHeader, HeaderError};
    use proptest::prelude::*;

    #[test]
    fn layout_is_big_endian_17_bytes() {
        let h = ContainerHeader::new(65536, 150_000);
        let wire = encode_header(&h).unwrap();

        assert_eq!(wire.len(), HEADER_LEN);
        assert_eq!(&wire[0..4], b"CVF1");
        assert_eq!(wire[4], 1);
        assert_eq!(&wire[5..9], &[0x00, 0x01, 0x00, 0x00]);
        assert_eq!(&wire[9..13], &[0, 0, 0, 0]);
        assert_eq!(&wire[13..17], &150_000u32.to_be_bytes());
    }

    #[test]
    fn total_size_high_half_is_written() {
        let total = (7u64 << 32) | 0xdead_beef;
        let wire = encode_header(&ContainerHeader::new(4096, total)).unwrap();
        assert_eq!(&wire[9..17], &total.to_be_bytes());
        assert_eq!(decode_header(&wire).unwrap().total_size, total);
    }

    #[test]
    fn decode_ignores_bytes_past_header() {
        let mut wire = encode_header(&ContainerHeader::new(1024, 10)).unwrap().to_vec();
        wire.extend_from_slice(&[0xAA; 32]);
        let h = decode_header(&wire).unwrap();
        assert_eq!((h.chunk_size, h.total_size), (1024, 10));
    }

    #[test]
    fn short_buffer_rejected() {
        let wire = encode_header(&ContainerHeader::new(1024, 10)).unwrap();
        let err = decode_header(&wire[..16]).unwrap_err();
        assert!(matches!(err, HeaderError::BufferTooShort { have: 16, need: 17 }));
    }

    #[test]
    fn wrong_magic_rejected() {
        let mut wire = encode_header(&ContainerHeader::new(1024, 10)).unwrap();
        wire[0] ^= 0xFF;
        let err = decode_header(&wire).unwrap_err();
        assert!(matches!(err, HeaderError::InvalidMagic { need, .. } if need == MAGIC_CVF1));
    }

    #[test]
    fn unknown_version_rejected() {
        let mut wire = encode_header(&ContainerHeader::new(1024, 10)).unwrap();
        wire[4] = 2;
        let err = decode_header(&wire).unwrap_err();
        assert!(matches!(err, HeaderError::UnsupportedVersion { have: 2 }));
    }

    #[test]
    fn magic_checked_before_version() {
        let mut wire = encode_header(&ContainerHeader::new(1024, 10)).unwrap();
        wire[0] = b'X';
        wire[4] = 9;
        assert!(matches!(decode_header(&wire), Err(HeaderError::InvalidMagic { .. })));
    }

    #[test]
    fn chunk_size_bounds() {
        assert!(matches!(
            encode_header(&ContainerHeader::new(0, 10)),
            Err(HeaderError::InvalidChunkSizeZero)
        ));
        assert!(matches!(
            encode_header(&ContainerHeader::new(MAX_CHUNK_SIZE as u32 + 1, 10)),
            Err(HeaderError::InvalidChunkSizeTooLarge { .. })
        ));
        assert!(encode_header(&ContainerHeader::new(MAX_CHUNK_SIZE as u32, 10)).is_ok());
    }

    #[test]
    fn frame_layout_from_header() {
        let h = ContainerHeader::new(65536, 150_000);
        assert_eq!(h.frame_count(), 3);
        assert_eq!(h.frame_plaintext_len(0), Some(65536));
        assert_eq!(h.frame_plaintext_len(1), Some(65536));
        assert_eq!(h.frame_plaintext_len(2), Some(18_848));
        assert_eq!(h.frame_plaintext_len(3), None);

        let empty = ContainerHeader::new(65536, 0);
        assert_eq!(empty.frame_count(), 0);
        assert_eq!(empty.frame_plaintext_len(0), None);

        let exact = ContainerHeader::new(100, 300);
        assert_eq!(exact.frame_count(), 3);
        assert_eq!(exact.frame_plaintext_len(2), Some(100));
    }

    proptest! {
        #[test]
        fn prop_header_fields_survive(chunk in 1u32..=MAX_CHUNK_SIZE as u32, total in any::<u64>()) {
            let h = ContainerHeader::new(chunk, total);
            let decoded = decode_header(&encode_header(&h).unwrap()).unwrap();
            prop_assert_eq!(decoded, h);
        }

        #[test]
        fn prop_frame_lengths_sum_to_total(chunk in 1u32..4096, total in 0u64..100_000) {
            let h = ContainerHeader::new(chunk, total);
            let sum: u64 = (0..h.frame_count())
                .map(|i| h.frame_plaintext_len(i).unwrap() as u64)
                .sum();
            prop_assert_eq!(sum, total);
            prop_assert_eq!(h.frame_plaintext_len(h.frame_count()), None);
        }
    }
}
