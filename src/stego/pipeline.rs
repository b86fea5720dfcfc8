// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Embed/extract pipelines.
//!
//! Embedding runs one way:
//! 1. Select the input range and deflate it
//! 2. Wrap it in an envelope (version, content type, length, MD5)
//! 3. Encrypt with AES-256-CBC when a passphrase is set
//! 4. Write the result into the eligible channel bytes inside the window
//!
//! Extraction mirrors it and returns the hash check result next to the data
//! instead of failing on a mismatch.

use crate::stego::capacity;
use crate::stego::channel::{self, PixelGrid};
use crate::stego::config::{EmbedOptions, ExtractOptions, Verbosity};
use crate::stego::crypto;
use crate::stego::error::StegoError;
use crate::stego::frame::{self, ContentType};
use crate::stego::payload;

/// Result of a successful [`embed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedSummary {
    /// Source bytes taken from the input (after offset/length selection).
    pub input_len: usize,
    /// Deflate output length, as stored in the envelope.
    pub compressed_len: usize,
    /// Bytes written into the image (IV + envelope, padded if encrypted).
    pub envelope_len: usize,
    /// Eligible bytes available inside the window.
    pub capacity: usize,
    /// Bytes after the envelope overwritten with random filler.
    pub filled: usize,
}

/// Data recovered by [`extract`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub version: u8,
    pub content_type: ContentType,
    /// The recovered raw bytes.
    pub data: Vec<u8>,
    /// Whether the stored MD5 matched the recovered compressed payload.
    /// When false, `data` is a best-effort result.
    pub hash_matches: bool,
}

/// Build the exact byte sequence [`embed`] writes for `data`.
///
/// Compresses, wraps and (with a non-empty passphrase) encrypts.
pub fn encode_envelope(
    data: &[u8],
    content_type: ContentType,
    passphrase: &str,
) -> Result<Vec<u8>, StegoError> {
    encode_with(data, content_type, passphrase, Verbosity::Silent).map(|(bytes, _)| bytes)
}

fn encode_with(
    data: &[u8],
    content_type: ContentType,
    passphrase: &str,
    verbosity: Verbosity,
) -> Result<(Vec<u8>, usize), StegoError> {
    let encrypted = crypto::is_enabled(passphrase);

    verbosity.detail(format_args!("compressing {} bytes", data.len()));
    let compressed = payload::compress(data)?;
    let compressed_len = compressed.len();
    verbosity.detail(format_args!("compressed data size: {compressed_len}"));

    verbosity.detail(format_args!(
        "format version: {}, content type: {content_type}",
        frame::FORMAT_VERSION
    ));
    let envelope = frame::build_frame(content_type, &compressed, encrypted)?;

    let stream = if encrypted {
        verbosity.detail(format_args!("encrypting {} envelope bytes", envelope.len() - crypto::IV_LEN));
        crypto::encrypt(envelope, passphrase)?
    } else {
        verbosity.detail(format_args!("empty key, not applying encryption"));
        envelope
    };
    debug_assert_eq!(stream.len(), capacity::envelope_len(compressed_len, encrypted));
    verbosity.detail(format_args!("total size to embed: {}", stream.len()));

    Ok((stream, compressed_len))
}

/// Hide `data` in the eligible pixels of `grid`.
///
/// The grid is modified in place; persisting it is up to the caller.
///
/// # Errors
/// - [`StegoError::InvalidInputRange`] if the input offset is past the data.
/// - [`StegoError::MessageTooLarge`] if the envelope does not fit the
///   window. The grid is left untouched in that case.
pub fn embed<G: PixelGrid + ?Sized>(
    grid: &mut G,
    data: &[u8],
    opts: &EmbedOptions,
) -> Result<EmbedSummary, StegoError> {
    let verbosity = opts.verbosity;
    let input = payload::select_input(data, opts.input_offset, opts.input_length)?;
    verbosity.detail(format_args!(
        "embedding {} bytes from offset {}",
        input.len(),
        opts.input_offset
    ));

    let (stream, compressed_len) = encode_with(input, opts.content_type, &opts.passphrase, verbosity)?;

    verbosity.detail(format_args!(
        "writing into eligible bytes, threshold = {}, window = {:?}",
        opts.threshold, opts.window
    ));
    let written = channel::write_stream(grid, &stream, opts.threshold, opts.window, opts.random_fill)?;
    verbosity.detail(format_args!(
        "wrote {} bytes, {} filler bytes, {} available",
        written.written, written.filled, written.capacity
    ));

    Ok(EmbedSummary {
        input_len: input.len(),
        compressed_len,
        envelope_len: stream.len(),
        capacity: written.capacity,
        filled: written.filled,
    })
}

/// Decode a raw eligible byte stream (IV/envelope followed by filler).
///
/// # Errors
/// - [`StegoError::DecryptionFailed`] on bad padding or a truncated stream.
/// - [`StegoError::UnsupportedVersion`] for a newer format version.
/// - [`StegoError::FrameMalformed`] for a truncated envelope.
/// - [`StegoError::PayloadCorrupted`] if the hash matched but the payload
///   does not inflate.
pub fn decode_envelope(stream: &[u8], passphrase: &str) -> Result<Extracted, StegoError> {
    decode_with(stream, passphrase, Verbosity::Silent)
}

fn decode_with(stream: &[u8], passphrase: &str, verbosity: Verbosity) -> Result<Extracted, StegoError> {
    let parsed = if crypto::is_enabled(passphrase) {
        verbosity.detail(format_args!("decrypting {} bytes", stream.len()));
        let plain = crypto::decrypt(stream, passphrase)?;
        frame::parse_frame(&plain)?
    } else {
        verbosity.detail(format_args!("empty key, not using encryption"));
        frame::parse_frame(stream)?
    };

    verbosity.detail(format_args!(
        "format version: {}, content type: {}, compressed length: {}",
        parsed.version,
        parsed.content_type,
        parsed.payload.len()
    ));
    if parsed.hash_matches {
        verbosity.detail(format_args!("hash matches data"));
    } else {
        verbosity.warn(format_args!("hash mismatch in embedded data"));
    }

    let data = payload::decompress(&parsed.payload, !parsed.hash_matches)?;
    verbosity.detail(format_args!("extracted {} bytes", data.len()));

    Ok(Extracted {
        version: parsed.version,
        content_type: parsed.content_type,
        data,
        hash_matches: parsed.hash_matches,
    })
}

/// Recover data hidden by [`embed`].
///
/// Threshold, window and passphrase must match the embedding call.
///
/// # Errors
/// See [`decode_envelope`].
pub fn extract<G: PixelGrid + ?Sized>(grid: &G, opts: &ExtractOptions) -> Result<Extracted, StegoError> {
    let verbosity = opts.verbosity;
    let stream = channel::read_stream(grid, opts.threshold, opts.window);
    verbosity.detail(format_args!(
        "read {} bytes from image (including filler), threshold = {}",
        stream.len(),
        opts.threshold
    ));
    decode_with(&stream, &opts.passphrase, verbosity)
}
