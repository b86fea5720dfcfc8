// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for the embed/extract pipeline.
//!
//! [`StegoError`] covers all failure modes from loading the carrier image
//! through decryption and envelope parsing. A hash mismatch is not an error:
//! it is reported through [`Extracted::hash_matches`](crate::Extracted).

use core::fmt;

/// Errors that can occur during embedding or extraction.
#[derive(Debug)]
pub enum StegoError {
    /// The carrier bytes could not be decoded as an image.
    InvalidImage(image::ImageError),
    /// The envelope is larger than the eligible bytes inside the window.
    MessageTooLarge {
        /// Bytes that had to be written.
        needed: usize,
        /// Eligible bytes available inside the window.
        available: usize,
    },
    /// The envelope declares a format version newer than this build reads.
    UnsupportedVersion(u8),
    /// The envelope is truncated or its length field points past the data.
    FrameMalformed,
    /// AES-CBC decryption failed (bad padding or truncated ciphertext).
    DecryptionFailed,
    /// The compressed payload could not be inflated although its hash matched.
    PayloadCorrupted,
    /// The requested input offset lies past the end of the source data.
    InvalidInputRange {
        /// Requested offset.
        offset: usize,
        /// Length of the source data.
        len: usize,
    },
    /// Compression or image encoding I/O failed.
    Io(std::io::Error),
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidImage(e) => write!(f, "invalid image: {e}"),
            Self::MessageTooLarge { needed, available } => write!(
                f,
                "not enough transparent pixels: need {needed} bytes, {available} available"
            ),
            Self::UnsupportedVersion(v) => write!(
                f,
                "data is invalid or uses newer format version {v} (only {} and below supported)",
                crate::stego::frame::FORMAT_VERSION
            ),
            Self::FrameMalformed => write!(f, "embedded envelope is truncated or malformed"),
            Self::DecryptionFailed => write!(f, "decryption failed (wrong key?)"),
            Self::PayloadCorrupted => write!(f, "compressed payload could not be inflated"),
            Self::InvalidInputRange { offset, len } => {
                write!(f, "input offset {offset} is past the end of {len} bytes of data")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for StegoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidImage(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<image::ImageError> for StegoError {
    fn from(e: image::ImageError) -> Self {
        Self::InvalidImage(e)
    }
}

impl From<std::io::Error> for StegoError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
