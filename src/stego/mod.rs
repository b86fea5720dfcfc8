// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Transparent-pixel embedding and extraction.
//!
//! The codec layers, leaves first:
//!
//! - [`channel`]: the eligible byte stream (R, G, B of every pixel whose
//!   alpha is at or below the threshold), with an optional window.
//! - [`frame`]: the envelope header (version, content type, length, MD5).
//! - [`payload`]: input range selection and raw deflate.
//! - [`crypto`]: PBKDF2-HMAC-SHA1 key derivation and AES-256-CBC.
//! - `pipeline`: [`embed`] / [`extract`] orchestration.
//!
//! [`carrier`] adapts image file bytes to the pipeline and [`capacity`]
//! answers "how much fits".

pub mod error;
pub mod config;
pub mod channel;
pub mod frame;
pub mod payload;
pub mod crypto;
pub mod capacity;
mod pipeline;
pub mod carrier;

pub use error::StegoError;
pub use config::{ConfigError, EmbedOptions, ExtractOptions, Verbosity, Window, DEFAULT_PASSPHRASE};
pub use channel::PixelGrid;
pub use frame::{ContentType, FORMAT_VERSION};
pub use capacity::{capacity_info, count_eligible_pixels, CapacityInfo};
pub use pipeline::{decode_envelope, embed, encode_envelope, extract, EmbedSummary, Extracted};
pub use carrier::{embed_image, extract_image, image_capacity};
