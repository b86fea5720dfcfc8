// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Envelope construction and parsing.
//!
//! The envelope is the container written into the eligible byte stream:
//!
//! ```text
//! [16 bytes] AES-CBC IV (only when a passphrase is set, stored in clear)
//! [1 byte  ] format version (1)
//! [1 byte  ] content type
//! [4 bytes ] compressed payload length (little-endian u32)
//! [16 bytes] MD5 of the compressed payload
//! [N bytes ] deflate-compressed payload
//! ```
//!
//! Everything after the IV is encrypted when a passphrase is set. The hash
//! covers the compressed payload only. A hash mismatch is reported, not
//! rejected.

use md5::{Digest, Md5};

use crate::stego::crypto::IV_LEN;
use crate::stego::error::StegoError;

/// Newest envelope format version this build reads and the one it writes.
pub const FORMAT_VERSION: u8 = 0x01;

/// Length of the MD5 digest.
pub const HASH_LEN: usize = 16;

/// version(1) + content type(1) + length(4) + hash(16) = 22 bytes.
pub const HEADER_LEN: usize = 1 + 1 + 4 + HASH_LEN;

/// What the embedded payload represents. Not interpreted by the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ContentType {
    #[default]
    Invalid = 0x00,
    Data = 0x01,
    File = 0x02,
    Text = 0x03,
}

impl From<u8> for ContentType {
    /// Unknown tags decode as [`ContentType::Invalid`].
    fn from(tag: u8) -> Self {
        match tag {
            0x01 => ContentType::Data,
            0x02 => ContentType::File,
            0x03 => ContentType::Text,
            _ => ContentType::Invalid,
        }
    }
}

impl core::fmt::Display for ContentType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            ContentType::Invalid => "Invalid",
            ContentType::Data => "Data",
            ContentType::File => "File",
            ContentType::Text => "Text",
        };
        write!(f, "{name} ({})", *self as u8)
    }
}

/// MD5 digest of the compressed payload.
pub fn payload_hash(compressed: &[u8]) -> [u8; HASH_LEN] {
    Md5::digest(compressed).into()
}

/// Build an envelope around an already compressed payload.
///
/// With `reserve_iv` the buffer starts with a zeroed [`IV_LEN`]-byte slot
/// that the encryption stage fills in.
///
/// # Errors
/// Returns [`StegoError::MessageTooLarge`] if the payload length does not
/// fit the 4-byte length field.
pub fn build_frame(
    content_type: ContentType,
    compressed: &[u8],
    reserve_iv: bool,
) -> Result<Vec<u8>, StegoError> {
    let len = u32::try_from(compressed.len()).map_err(|_| StegoError::MessageTooLarge {
        needed: compressed.len(),
        available: u32::MAX as usize,
    })?;
    let slot = if reserve_iv { IV_LEN } else { 0 };

    let mut frame = Vec::with_capacity(slot + HEADER_LEN + compressed.len());
    frame.resize(slot, 0);
    frame.push(FORMAT_VERSION);
    frame.push(content_type as u8);
    frame.extend_from_slice(&len.to_le_bytes());
    frame.extend_from_slice(&payload_hash(compressed));
    frame.extend_from_slice(compressed);
    Ok(frame)
}

/// A parsed envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFrame {
    pub version: u8,
    pub content_type: ContentType,
    /// Hash stored in the header.
    pub hash: [u8; HASH_LEN],
    /// Compressed payload, exactly as many bytes as the length field declares.
    pub payload: Vec<u8>,
    /// Whether the MD5 of `payload` equals `hash`.
    pub hash_matches: bool,
}

/// Validate the leading header bytes and return the full envelope length
/// (header + declared payload).
///
/// `header` must hold at least the version and length fields.
pub fn frame_len(header: &[u8]) -> Result<usize, StegoError> {
    if header.len() < 6 {
        return Err(StegoError::FrameMalformed);
    }
    let version = header[0];
    if version > FORMAT_VERSION {
        return Err(StegoError::UnsupportedVersion(version));
    }
    let len = u32::from_le_bytes([header[2], header[3], header[4], header[5]]) as usize;
    HEADER_LEN.checked_add(len).ok_or(StegoError::FrameMalformed)
}

/// Parse an envelope starting at its version byte.
///
/// `data` may be longer than the envelope (random filler follows it in the
/// pixel stream); the declared length decides where the payload ends.
///
/// # Errors
/// - [`StegoError::UnsupportedVersion`] if the version is newer than
///   [`FORMAT_VERSION`].
/// - [`StegoError::FrameMalformed`] if `data` is shorter than the header or
///   than the declared payload.
pub fn parse_frame(data: &[u8]) -> Result<ParsedFrame, StegoError> {
    if data.len() < HEADER_LEN {
        return Err(StegoError::FrameMalformed);
    }
    let total = frame_len(data)?;
    if data.len() < total {
        return Err(StegoError::FrameMalformed);
    }

    let mut hash = [0u8; HASH_LEN];
    hash.copy_from_slice(&data[6..HEADER_LEN]);
    let payload = data[HEADER_LEN..total].to_vec();
    let hash_matches = payload_hash(&payload) == hash;

    Ok(ParsedFrame {
        version: data[0],
        content_type: ContentType::from(data[1]),
        hash,
        payload,
        hash_matches,
    })
}
