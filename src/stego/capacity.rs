// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Capacity estimation.
//!
//! Counts eligible pixels and converts between compressed payload sizes and
//! the number of eligible bytes the final envelope occupies.

use crate::stego::channel::{PixelGrid, CHANNELS_PER_PIXEL};
use crate::stego::config::Window;
use crate::stego::crypto::{BLOCK_LEN, IV_LEN};
use crate::stego::frame::HEADER_LEN;

/// Eligible capacity of a pixel grid at a given threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityInfo {
    /// Pixels with alpha at or below the threshold.
    pub eligible_pixels: usize,
    /// `eligible_pixels * 3`.
    pub eligible_bytes: usize,
    /// Eligible bytes inside the requested window.
    pub window_bytes: usize,
}

/// Count pixels whose alpha is at or below `threshold`.
pub fn count_eligible_pixels<G: PixelGrid + ?Sized>(grid: &G, threshold: u8) -> usize {
    let mut count = 0usize;
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if grid.rgba(x, y)[3] <= threshold {
                count += 1;
            }
        }
    }
    count
}

pub fn capacity_info<G: PixelGrid + ?Sized>(grid: &G, threshold: u8, window: Window) -> CapacityInfo {
    let eligible_pixels = count_eligible_pixels(grid, threshold);
    let eligible_bytes = eligible_pixels * CHANNELS_PER_PIXEL;
    CapacityInfo {
        eligible_pixels,
        eligible_bytes,
        window_bytes: window.len_within(eligible_bytes),
    }
}

/// Size of the embedded stream for a compressed payload of `compressed_len`
/// bytes.
///
/// Unencrypted: header + payload. Encrypted: IV + PKCS#7-padded
/// (header + payload), which always adds 1–16 bytes of padding.
pub fn envelope_len(compressed_len: usize, encrypted: bool) -> usize {
    let plain = HEADER_LEN + compressed_len;
    if encrypted {
        IV_LEN + (plain / BLOCK_LEN + 1) * BLOCK_LEN
    } else {
        plain
    }
}

/// Largest compressed payload whose envelope fits in `capacity` bytes.
///
/// Returns 0 when not even an empty payload fits.
pub fn max_compressed_payload(capacity: usize, encrypted: bool) -> usize {
    if encrypted {
        if capacity < IV_LEN + BLOCK_LEN {
            return 0;
        }
        let blocks = (capacity - IV_LEN) / BLOCK_LEN;
        // At least one padding byte in the last block.
        (blocks * BLOCK_LEN).saturating_sub(HEADER_LEN + 1)
    } else {
        capacity.saturating_sub(HEADER_LEN)
    }
}
