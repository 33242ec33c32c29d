//! zlib compression for stored records.

use flate2::{Compression, Decompress, FlushDecompress, Status};
use skinsystem_core::{Error, Result};
use std::io::Write;

/// Compress data into a zlib stream.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| Error::Compression(format!("Zlib write failed: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| Error::Compression(format!("Zlib finish failed: {}", e)))
}

/// Decompress a complete zlib stream.
///
/// Fails on an empty input, a bad header or checksum, or a stream that ends
/// before its final block. Bytes after the end of the stream are ignored.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Err(Error::Compression("Zlib stream is empty".to_string()));
    }

    let mut decoder = Decompress::new(true);
    let mut output = Vec::with_capacity(data.len().saturating_mul(4).max(64));

    loop {
        let consumed = decoder.total_in() as usize;
        let produced = decoder.total_out();
        if output.len() == output.capacity() {
            output.reserve(output.capacity());
        }

        let status = decoder
            .decompress_vec(&data[consumed..], &mut output, FlushDecompress::None)
            .map_err(|e| Error::Compression(format!("Zlib read failed: {}", e)))?;

        if status == Status::StreamEnd {
            return Ok(output);
        }

        let input_exhausted = decoder.total_in() as usize == data.len();
        let stalled = decoder.total_in() as usize == consumed && decoder.total_out() == produced;
        if (input_exhausted || stalled) && output.len() < output.capacity() {
            return Err(Error::Compression("Zlib stream is truncated".to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // "serialized-string" as written by another zlib implementation
    const FOREIGN_STREAM: [u8; 29] = [
        0x78, 0x9c, 0x2a, 0x4e, 0x2d, 0xca, 0x4c, 0xcc, 0xc9, 0xac, 0x4a, 0x4d, 0xd1, 0x2d, 0x2e,
        0x29, 0xca, 0xcc, 0x4b, 0x07, 0x04, 0x00, 0x00, 0xff, 0xff, 0x3e, 0xd8, 0x06, 0xf1,
    ];

    #[test]
    fn test_zlib_roundtrip() {
        let data = b"Hello, World! This is a test of compression.";
        let compressed = compress(data).unwrap();
        let decompressed = decompress(&compressed).unwrap();
        assert_eq!(data.as_slice(), decompressed.as_slice());
    }

    #[test]
    fn test_zlib_header() {
        let compressed = compress(b"serialized-string").unwrap();
        assert_eq!(&compressed[..2], &[0x78, 0x9c]);
    }

    #[test]
    fn test_empty_roundtrip() {
        let compressed = compress(b"").unwrap();
        assert!(!compressed.is_empty());
        assert_eq!(decompress(&compressed).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_large_roundtrip() {
        let data: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
        let compressed = compress(&data).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), data);
    }

    #[test]
    fn test_decompress_foreign_stream() {
        assert_eq!(decompress(&FOREIGN_STREAM).unwrap(), b"serialized-string");
    }

    #[test]
    fn test_decompress_ignores_trailing_bytes() {
        let mut data = FOREIGN_STREAM.to_vec();
        data.extend_from_slice(b"garbage");
        assert_eq!(decompress(&data).unwrap(), b"serialized-string");
    }

    #[test]
    fn test_decompress_invalid_header() {
        let err = decompress(b"mock").unwrap_err();
        assert!(matches!(err, Error::Compression(_)));
    }

    #[test]
    fn test_decompress_empty_input() {
        assert!(matches!(decompress(b"").unwrap_err(), Error::Compression(_)));
    }

    #[test]
    fn test_decompress_truncated_stream() {
        let compressed = compress(b"Hello, World! This is a test of compression.").unwrap();
        for len in [2, compressed.len() / 2, compressed.len() - 1] {
            let err = decompress(&compressed[..len]).unwrap_err();
            assert!(matches!(err, Error::Compression(_)), "length {}", len);
        }
    }

    #[test]
    fn test_decompress_checksum_mismatch() {
        let mut data = FOREIGN_STREAM.to_vec();
        let last = data.len() - 1;
        data[last] ^= 0xff;
        assert!(matches!(decompress(&data).unwrap_err(), Error::Compression(_)));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_roundtrip_any_bytes(data in proptest::collection::vec(any::<u8>(), 0..8192)) {
                let compressed = compress(&data).unwrap();
                prop_assert_eq!(decompress(&compressed).unwrap(), data);
            }

            #[test]
            fn test_truncated_stream_is_rejected(
                data in proptest::collection::vec(any::<u8>(), 0..1024),
                cut in any::<prop::sample::Index>(),
            ) {
                let compressed = compress(&data).unwrap();
                let len = cut.index(compressed.len());
                let result = decompress(&compressed[..len]);
                prop_assert!(matches!(result, Err(Error::Compression(_))));
            }
        }
    }
}
