// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Eligible-channel walker.
//!
//! Pixels are visited in raster order (row by row, left to right). A pixel
//! is *eligible* when its alpha is at or below the threshold; its R, G and
//! B bytes, in that order, form the next three bytes of the eligible byte
//! stream. Ineligible pixels are never read or written and do not advance
//! the stream position. Alpha is never modified.
//!
//! Window positions are eligible-stream positions, so a pixel can straddle
//! a window edge and have only some of its channels written.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::stego::config::Window;
use crate::stego::error::StegoError;

/// Color channels per pixel that carry data.
pub const CHANNELS_PER_PIXEL: usize = 3;

/// Read/write access to an RGBA pixel grid.
pub trait PixelGrid {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// The `[r, g, b, a]` channels of the pixel at `(x, y)`.
    fn rgba(&self, x: u32, y: u32) -> [u8; 4];
    /// Overwrite the color channels of the pixel at `(x, y)`, keeping alpha.
    fn set_rgb(&mut self, x: u32, y: u32, rgb: [u8; 3]);
}

impl PixelGrid for image::RgbaImage {
    fn width(&self) -> u32 {
        image::RgbaImage::width(self)
    }

    fn height(&self) -> u32 {
        image::RgbaImage::height(self)
    }

    fn rgba(&self, x: u32, y: u32) -> [u8; 4] {
        self.get_pixel(x, y).0
    }

    fn set_rgb(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        self.get_pixel_mut(x, y).0[..3].copy_from_slice(&rgb);
    }
}

/// Outcome of a [`write_stream`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteSummary {
    /// Data bytes written.
    pub written: usize,
    /// In-window bytes past the data that were overwritten with random filler.
    pub filled: usize,
    /// In-window bytes available in total.
    pub capacity: usize,
}

/// Number of eligible bytes (3 per eligible pixel) in the grid.
pub fn eligible_len<G: PixelGrid + ?Sized>(grid: &G, threshold: u8) -> usize {
    crate::stego::capacity::count_eligible_pixels(grid, threshold) * CHANNELS_PER_PIXEL
}

/// Number of eligible bytes that fall inside `window`.
pub fn window_capacity<G: PixelGrid + ?Sized>(grid: &G, threshold: u8, window: Window) -> usize {
    window.len_within(eligible_len(grid, threshold))
}

/// Read the in-window eligible bytes.
pub fn read_stream<G: PixelGrid + ?Sized>(grid: &G, threshold: u8, window: Window) -> Vec<u8> {
    let mut out = Vec::with_capacity(window_capacity(grid, threshold, window));
    let mut pos = 0usize;
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let px = grid.rgba(x, y);
            if px[3] > threshold {
                continue;
            }
            for &byte in &px[..CHANNELS_PER_PIXEL] {
                if window.contains(pos) {
                    out.push(byte);
                }
                pos += 1;
            }
            if window.end().is_some_and(|end| pos >= end) {
                return out;
            }
        }
    }
    out
}

/// Write `data` into the in-window eligible bytes.
///
/// Once `data` is exhausted the rest of the window is overwritten with
/// random bytes when `random_fill` is set, and left untouched otherwise.
///
/// # Errors
/// Returns [`StegoError::MessageTooLarge`] if `data` is longer than the
/// window capacity. The check runs before any pixel is modified.
pub fn write_stream<G: PixelGrid + ?Sized>(
    grid: &mut G,
    data: &[u8],
    threshold: u8,
    window: Window,
    random_fill: bool,
) -> Result<WriteSummary, StegoError> {
    let capacity = window_capacity(grid, threshold, window);
    if data.len() > capacity {
        return Err(StegoError::MessageTooLarge { needed: data.len(), available: capacity });
    }

    let mut filler = random_fill.then(ChaCha20Rng::from_entropy);
    let mut src = data.iter().copied();
    let mut summary = WriteSummary { written: 0, filled: 0, capacity };
    let mut pos = 0usize;

    'rows: for y in 0..grid.height() {
        for x in 0..grid.width() {
            let px = grid.rgba(x, y);
            if px[3] > threshold {
                continue;
            }
            let mut rgb = [px[0], px[1], px[2]];
            let mut touched = false;
            for channel in rgb.iter_mut() {
                if window.contains(pos) {
                    if let Some(byte) = src.next() {
                        *channel = byte;
                        summary.written += 1;
                        touched = true;
                    } else if let Some(rng) = filler.as_mut() {
                        *channel = rng.gen();
                        summary.filled += 1;
                        touched = true;
                    }
                }
                pos += 1;
            }
            if touched {
                grid.set_rgb(x, y, rgb);
            }
            let window_done = window.end().is_some_and(|end| pos >= end);
            if window_done || (filler.is_none() && summary.written == data.len()) {
                break 'rows;
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    /// 4×2 grid; pixels at odd x are opaque, the rest fully transparent.
    fn striped() -> RgbaImage {
        RgbaImage::from_fn(4, 2, |x, y| {
            let base = (y * 4 + x) as u8 * 10;
            let alpha = if x % 2 == 1 { 255 } else { 0 };
            Rgba([base, base + 1, base + 2, alpha])
        })
    }

    #[test]
    fn reads_only_eligible_pixels_in_raster_order() {
        let img = striped();
        let stream = read_stream(&img, 0, Window::FULL);
        // Eligible pixels: (0,0)=0, (2,0)=20, (0,1)=40, (2,1)=60.
        assert_eq!(stream, vec![0, 1, 2, 20, 21, 22, 40, 41, 42, 60, 61, 62]);
        assert_eq!(eligible_len(&img, 0), 12);
    }

    #[test]
    fn threshold_admits_more_pixels() {
        let img = striped();
        assert_eq!(eligible_len(&img, 254), 12);
        assert_eq!(eligible_len(&img, 255), 24);
    }

    #[test]
    fn window_read_counts_eligible_bytes() {
        let img = striped();
        let w = Window::new(2, 7).unwrap();
        assert_eq!(read_stream(&img, 0, w), vec![2, 20, 21, 22, 40]);
    }

    #[test]
    fn write_then_read_roundtrip() {
        let mut img = striped();
        let data = [9u8, 8, 7, 6, 5];
        let summary = write_stream(&mut img, &data, 0, Window::FULL, false).unwrap();
        assert_eq!(summary.written, 5);
        assert_eq!(summary.filled, 0);
        assert_eq!(summary.capacity, 12);

        let stream = read_stream(&img, 0, Window::FULL);
        assert_eq!(&stream[..5], &data);
        // Without random fill the remainder keeps its original values.
        assert_eq!(&stream[5..], &[22, 40, 41, 42, 60, 61, 62]);
    }

    #[test]
    fn opaque_pixels_and_alpha_untouched() {
        let original = striped();
        let mut img = original.clone();
        write_stream(&mut img, &[0xAA; 12], 0, Window::FULL, true).unwrap();
        for (x, y, px) in img.enumerate_pixels() {
            let before = original.get_pixel(x, y);
            assert_eq!(px[3], before[3]);
            if before[3] > 0 {
                assert_eq!(px, before);
            }
        }
    }

    #[test]
    fn random_fill_covers_rest_of_window() {
        let mut img = striped();
        let summary = write_stream(&mut img, &[1, 2], 0, Window::FULL, true).unwrap();
        assert_eq!(summary.written, 2);
        assert_eq!(summary.filled, 10);
    }

    #[test]
    fn window_edges_respected_within_a_pixel() {
        let original = striped();
        let mut img = original.clone();
        let w = Window::new(1, 5).unwrap();
        write_stream(&mut img, &[0xF0, 0xF1], 0, w, true).unwrap();

        let before = read_stream(&original, 0, Window::FULL);
        let after = read_stream(&img, 0, Window::FULL);
        assert_eq!(after[0], before[0]);
        assert_eq!(&after[1..3], &[0xF0, 0xF1]);
        assert_eq!(&after[5..], &before[5..]);
    }

    #[test]
    fn capacity_error_leaves_grid_unmodified() {
        let original = striped();
        let mut img = original.clone();
        let result = write_stream(&mut img, &[0u8; 13], 0, Window::FULL, true);
        assert!(matches!(
            result,
            Err(StegoError::MessageTooLarge { needed: 13, available: 12 })
        ));
        assert_eq!(img, original);
    }

    #[test]
    fn window_past_stream_has_no_capacity() {
        let mut img = striped();
        let w = Window::new(50, 0).unwrap();
        assert_eq!(window_capacity(&img, 0, w), 0);
        assert!(write_stream(&mut img, &[1], 0, w, false).is_err());
        assert!(write_stream(&mut img, &[], 0, w, true).is_ok());
    }
}
