// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Payload selection and compression.
//!
//! The payload is raw deflate (RFC 1951, no zlib or gzip wrapper) at
//! maximum compression. The envelope length and hash both refer to the
//! compressed bytes.

use std::io::{Read, Write};

use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;

use crate::stego::error::StegoError;

/// Select `length` bytes of `data` starting at `offset`.
///
/// A `length` of 0, or one reaching past the end, selects everything from
/// `offset` to the end.
///
/// # Errors
/// Returns [`StegoError::InvalidInputRange`] if `offset` lies past the end.
pub fn select_input(data: &[u8], offset: usize, length: usize) -> Result<&[u8], StegoError> {
    if offset > data.len() {
        return Err(StegoError::InvalidInputRange { offset, len: data.len() });
    }
    let rest = &data[offset..];
    if length == 0 || length > rest.len() {
        Ok(rest)
    } else {
        Ok(&rest[..length])
    }
}

/// Deflate `data` at maximum compression.
pub fn compress(data: &[u8]) -> Result<Vec<u8>, StegoError> {
    let mut encoder = DeflateEncoder::new(Vec::with_capacity(data.len() / 2 + 16), Compression::best());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Inflate a raw deflate stream.
///
/// With `lenient` set, a corrupt stream yields whatever was inflated before
/// the error instead of failing; extraction uses this once the hash has
/// already flagged the payload as damaged.
///
/// # Errors
/// Returns [`StegoError::PayloadCorrupted`] on a corrupt stream when not
/// lenient.
pub fn decompress(data: &[u8], lenient: bool) -> Result<Vec<u8>, StegoError> {
    let mut output = Vec::new();
    match DeflateDecoder::new(data).read_to_end(&mut output) {
        Ok(_) => Ok(output),
        Err(_) if lenient => Ok(output),
        Err(_) => Err(StegoError::PayloadCorrupted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_roundtrip() {
        let compressed = compress(&[]).unwrap();
        assert!(!compressed.is_empty(), "empty input still produces a final block");
        assert_eq!(decompress(&compressed, false).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn short_payload_roundtrip() {
        let compressed = compress(b"Hi").unwrap();
        assert_eq!(decompress(&compressed, false).unwrap(), b"Hi");
    }

    #[test]
    fn repetitive_payload_shrinks() {
        let text = "abcdefghij".repeat(100);
        let compressed = compress(text.as_bytes()).unwrap();
        assert!(compressed.len() < text.len() / 4);
        assert_eq!(decompress(&compressed, false).unwrap(), text.as_bytes());
    }

    #[test]
    fn raw_deflate_has_no_zlib_header() {
        let compressed = compress(b"hello hello hello").unwrap();
        // A zlib stream would start with 0x78.
        assert_ne!(compressed[0], 0x78);
    }

    #[test]
    fn corrupt_stream_strict_and_lenient() {
        // Block type 0b11 is reserved and always invalid.
        let bad = [0xFFu8, 0xFF, 0xFF];
        assert!(matches!(decompress(&bad, false), Err(StegoError::PayloadCorrupted)));
        assert!(decompress(&bad, true).is_ok());
    }

    #[test]
    fn input_selection() {
        let data = [0u8, 1, 2, 3, 4, 5];
        assert_eq!(select_input(&data, 0, 0).unwrap(), &data);
        assert_eq!(select_input(&data, 2, 0).unwrap(), &[2, 3, 4, 5]);
        assert_eq!(select_input(&data, 2, 3).unwrap(), &[2, 3, 4]);
        assert_eq!(select_input(&data, 4, 100).unwrap(), &[4, 5]);
        assert_eq!(select_input(&data, 6, 0).unwrap(), &[] as &[u8]);
        assert!(matches!(
            select_input(&data, 7, 0),
            Err(StegoError::InvalidInputRange { offset: 7, len: 6 })
        ));
    }
}
