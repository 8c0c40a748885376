// Worker and inline hosts must agree request for request.

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chunkvault_core::config::{CodecConfig, HostMode};
    use chunkvault_core::constants::HEADER_LEN;
    use chunkvault_core::crypto::{derive_key, keccak256};
    use chunkvault_core::host::{
        open_host, open_host_with_progress, CryptoHost, HostError, InlineHost, Request, Response,
        WorkerHost,
    };
    use chunkvault_core::telemetry::{Progress, ProgressFn};

    const KEY: [u8; 32] = [0x5a; 32];

    fn hosts() -> Vec<Box<dyn CryptoHost>> {
        let config = CodecConfig::default();
        vec![
            Box::new(WorkerHost::spawn(&config).unwrap()),
            Box::new(InlineHost::new(&config)),
        ]
    }

    /// Encode `plaintext` through the host and return header + frames.
    fn encode(host: &mut dyn CryptoHost, plaintext: &[u8], chunk_size: usize) -> Vec<u8> {
        let init = Request::EncodeInit {
            key: KEY.to_vec(),
            chunk_size,
            total_size: plaintext.len() as u64,
        };
        assert!(matches!(host.call(init).unwrap(), Response::EncodeReady { .. }));

        let mut frames = Vec::new();
        for (i, chunk) in plaintext.chunks(chunk_size).enumerate() {
            match host.call(Request::EncodeChunk { index: i as u32, plaintext: chunk.to_vec() }) {
                Ok(Response::Frame(f)) => frames.extend(f),
                other => panic!("unexpected {other:?}"),
            }
        }
        let Ok(Response::Header(header)) = host.call(Request::EncodeFinal) else {
            panic!("encode-final did not return a header");
        };

        let mut wire = header.to_vec();
        wire.extend(frames);
        wire
    }

    fn decode(host: &mut dyn CryptoHost, wire: &[u8], read: usize) -> Result<Vec<u8>, HostError> {
        host.call(Request::DecodeInit { key: KEY.to_vec() })?;
        host.call(Request::DecodeHeader { header: wire[..HEADER_LEN].to_vec() })?;

        let mut out = Vec::new();
        for piece in wire[HEADER_LEN..].chunks(read) {
            match host.call(Request::DecodeChunk { data: piece.to_vec() })? {
                Response::Plaintext(p) => out.extend(p),
                other => panic!("unexpected {other:?}"),
            }
        }
        match host.call(Request::DecodeFinish)? {
            Response::DecodeDone { total_size } => assert_eq!(total_size, out.len() as u64),
            other => panic!("unexpected {other:?}"),
        }
        Ok(out)
    }

    /// Outcome of a request with the randomized parts (IVs) removed.
    fn outcome(result: Result<Response, HostError>) -> Result<String, &'static str> {
        match result {
            Ok(Response::Frame(f)) => Ok(format!("frame:{}", f.len())),
            Ok(other) => Ok(format!("{other:?}")),
            Err(e) => Err(e.name),
        }
    }

    fn script() -> Vec<Request> {
        vec![
            Request::DeriveKey { ikm: b"secret".to_vec(), salt: None, info: Some(b"file".to_vec()), length: 32 },
            Request::DeriveKey { ikm: b"secret".to_vec(), salt: None, info: None, length: 0 },
            Request::Hash { data: b"abc".to_vec() },
            Request::EncodeChunk { index: 0, plaintext: b"early".to_vec() },
            Request::EncodeInit { key: vec![1; 16], chunk_size: 4, total_size: 6 },
            Request::EncodeInit { key: KEY.to_vec(), chunk_size: 4, total_size: 6 },
            Request::EncodeChunk { index: 1, plaintext: b"abcd".to_vec() },
            Request::EncodeChunk { index: 0, plaintext: b"abcd".to_vec() },
            Request::EncodeInit { key: KEY.to_vec(), chunk_size: 4, total_size: 6 },
            Request::EncodeChunk { index: 0, plaintext: b"abcd".to_vec() },
            Request::EncodeChunk { index: 1, plaintext: b"ef".to_vec() },
            Request::EncodeFinal,
            Request::EncodeFinal,
            Request::DecodeChunk { data: vec![0; 4] },
            Request::DecodeInit { key: KEY.to_vec() },
            Request::DecodeChunk { data: vec![0; 4] },
            Request::DecodeInit { key: KEY.to_vec() },
            Request::DecodeHeader { header: b"NOPE\x01\0\0\0\x04\0\0\0\0\0\0\0\x06".to_vec() },
            Request::DecodeFinish,
            Request::DecodeInit { key: KEY.to_vec() },
            Request::DecodeHeader { header: b"CVF1\x01\0\0\0\x04\0\0\0\0\0\0\0\x06".to_vec() },
            Request::DecodeChunk { data: vec![0; 16] },
            Request::DecodeFinish,
        ]
    }

    #[test]
    fn identical_script_identical_outcomes() {
        let mut results = Vec::new();
        for mut host in hosts() {
            let outcomes: Vec<_> = script().into_iter().map(|r| outcome(host.call(r))).collect();
            results.push(outcomes);
        }
        assert_eq!(results[0], results[1]);

        let names: Vec<_> = results[0].iter().filter_map(|r| r.as_ref().err().copied()).collect();
        assert_eq!(
            names,
            vec![
                "parameter_error",   // zero-length derive
                "parameter_error",   // chunk before init
                "parameter_error",   // 16-byte key
                "parameter_error",   // out-of-order index
                "parameter_error",   // session already failed
                "parameter_error",   // second encode-final: session closed
                "parameter_error",   // decode-chunk without session
                "parameter_error",   // decode-chunk before header
                "format_error",      // bad magic
                "parameter_error",   // finish on failed session
                "format_error",      // frame length contradicts header
                "parameter_error",   // finish on failed session
            ]
        );
    }

    #[test]
    fn derive_and_hash_match_library() {
        for mut host in hosts() {
            let r = host
                .call(Request::DeriveKey {
                    ikm: b"ikm".to_vec(),
                    salt: Some(b"salt".to_vec()),
                    info: Some(b"info".to_vec()),
                    length: 48,
                })
                .unwrap();
            let expected = derive_key(b"ikm", Some(b"salt"), Some(b"info"), 48).unwrap();
            assert_eq!(r, Response::Key(expected));

            let r = host.call(Request::Hash { data: b"payload".to_vec() }).unwrap();
            assert_eq!(r, Response::Digest(keccak256(b"payload")));
        }
    }

    #[test]
    fn cross_host_roundtrip() {
        let plaintext: Vec<u8> = (0..10_000u32).map(|i| (i * 31 % 251) as u8).collect();
        let config = CodecConfig::default();
        let mut worker = WorkerHost::spawn(&config).unwrap();
        let mut inline = InlineHost::new(&config);

        let from_worker = encode(&mut worker, &plaintext, 1024);
        let from_inline = encode(&mut inline, &plaintext, 1024);
        assert_eq!(from_worker.len(), from_inline.len());

        assert_eq!(decode(&mut inline, &from_worker, 3).unwrap(), plaintext);
        assert_eq!(decode(&mut worker, &from_inline, 777).unwrap(), plaintext);
    }

    #[test]
    fn tamper_reported_identically() {
        let config = CodecConfig::default();
        let mut worker = WorkerHost::spawn(&config).unwrap();
        let mut wire = encode(&mut worker, b"tamper me please", 8);
        let last = wire.len() - 1;
        wire[last] ^= 1;

        for mut host in hosts() {
            let err = decode(host.as_mut(), &wire, 5).unwrap_err();
            assert_eq!(err.name, "authentication_failed");
        }
    }

    #[test]
    fn open_host_respects_mode() {
        let worker = open_host(&CodecConfig::default()).unwrap();
        assert_eq!(worker.mode(), HostMode::Worker);

        let inline = open_host(&CodecConfig::default().with_host_mode(HostMode::Inline)).unwrap();
        assert_eq!(inline.mode(), HostMode::Inline);

        let bad = CodecConfig { queue_capacity: 0, ..CodecConfig::default() };
        assert!(open_host(&bad).is_err());
    }

    #[test]
    fn progress_reported_from_worker_thread() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let progress: ProgressFn =
            Arc::new(move |p: Progress| sink.lock().unwrap().push((p.processed, p.total)));

        let mut host = open_host_with_progress(&CodecConfig::default(), Some(progress)).unwrap();
        let wire = encode(host.as_mut(), &[7u8; 10], 4);
        decode(host.as_mut(), &wire, 1).unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(*seen, vec![(4, 10), (8, 10), (10, 10), (4, 10), (8, 10), (10, 10)]);
    }

    #[test]
    fn dropping_worker_host_joins_thread() {
        let mut host = WorkerHost::spawn(&CodecConfig::default()).unwrap();
        host.call(Request::Hash { data: vec![] }).unwrap();
        drop(host);
    }
}
