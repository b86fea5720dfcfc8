// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! # transparent-embed
//!
//! Hides arbitrary bytes in the color channels of (nearly) transparent
//! pixels and recovers them later. A pixel whose alpha is at or below a
//! threshold is invisible, so its R, G and B bytes are free to carry data.
//!
//! The payload is deflate-compressed, wrapped in a small envelope with an
//! MD5 integrity hash and, when a passphrase is given, encrypted with
//! AES-256-CBC under a PBKDF2-derived key. The envelope is then spread over
//! the eligible channel bytes in raster order; unused bytes are filled with
//! random data so the used region does not stand out.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use transparent_embed::{embed_image, extract_image, EmbedOptions, ExtractOptions};
//!
//! let cover = std::fs::read("sprite.png").unwrap();
//! let opts = EmbedOptions::default().with_passphrase("passphrase");
//! let (stego_png, _) = embed_image(&cover, b"secret bytes", &opts).unwrap();
//! let out = extract_image(&stego_png, &ExtractOptions::from(&opts)).unwrap();
//! assert_eq!(out.data, b"secret bytes");
//! assert!(out.hash_matches);
//! ```

pub mod stego;

pub use stego::{embed, extract, encode_envelope, decode_envelope, EmbedSummary, Extracted, StegoError};
pub use stego::{embed_image, extract_image, image_capacity};
pub use stego::{capacity_info, count_eligible_pixels, CapacityInfo};
pub use stego::{ConfigError, EmbedOptions, ExtractOptions, Verbosity, Window, DEFAULT_PASSPHRASE};
pub use stego::{ContentType, PixelGrid, FORMAT_VERSION};
