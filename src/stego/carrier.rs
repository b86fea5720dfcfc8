// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Carrier image adapter.
//!
//! Decodes image file bytes into an RGBA8 grid with the `image` crate, runs
//! the pipeline on it and re-encodes the result as PNG. PNG is lossless and
//! keeps the alpha channel, so the hidden bytes survive a save/load cycle.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::stego::capacity::{self, CapacityInfo};
use crate::stego::config::{EmbedOptions, ExtractOptions, Window};
use crate::stego::error::StegoError;
use crate::stego::pipeline::{self, EmbedSummary, Extracted};

/// Decode image bytes (any supported format) into an RGBA8 grid.
pub fn decode_rgba(bytes: &[u8]) -> Result<RgbaImage, StegoError> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

/// Encode an RGBA8 grid as PNG bytes.
pub fn encode_png(img: RgbaImage) -> Result<Vec<u8>, StegoError> {
    let mut out = Vec::new();
    DynamicImage::ImageRgba8(img).write_to(&mut Cursor::new(&mut out), ImageFormat::Png)?;
    Ok(out)
}

/// Embed `data` into a cover image and return the stego image as PNG bytes.
///
/// # Errors
/// - [`StegoError::InvalidImage`] if `cover` cannot be decoded.
/// - Everything [`embed`](crate::embed) returns.
pub fn embed_image(
    cover: &[u8],
    data: &[u8],
    opts: &EmbedOptions,
) -> Result<(Vec<u8>, EmbedSummary), StegoError> {
    let mut img = decode_rgba(cover)?;
    opts.verbosity.detail(format_args!(
        "loaded {}x{} cover image",
        img.width(),
        img.height()
    ));
    let summary = pipeline::embed(&mut img, data, opts)?;
    Ok((encode_png(img)?, summary))
}

/// Extract data hidden in a stego image.
pub fn extract_image(stego: &[u8], opts: &ExtractOptions) -> Result<Extracted, StegoError> {
    let img = decode_rgba(stego)?;
    pipeline::extract(&img, opts)
}

/// Eligible capacity of an image file at `threshold`.
pub fn image_capacity(bytes: &[u8], threshold: u8) -> Result<CapacityInfo, StegoError> {
    let img = decode_rgba(bytes)?;
    Ok(capacity::capacity_info(&img, threshold, Window::FULL))
}
