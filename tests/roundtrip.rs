// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Round-trip integration tests for embed/extract.

use image::{Rgba, RgbaImage};
use transparent_embed::stego::capacity::envelope_len;
use transparent_embed::stego::channel::read_stream;
use transparent_embed::stego::frame::HEADER_LEN;
use transparent_embed::{
    embed, encode_envelope, extract, ContentType, EmbedOptions, ExtractOptions, StegoError,
    Window,
};

fn transparent(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_pixel(w, h, Rgba([10, 20, 30, 0]))
}

/// A photo-like cover: a soft gradient with a transparent border band.
fn sprite(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| {
        let edge = x < 4 || y < 4 || x >= w - 4 || y >= h - 4;
        let alpha = if edge { (x + y) as u8 % 3 } else { 255 };
        Rgba([(x * 3) as u8, (y * 5) as u8, ((x + y) * 2) as u8, alpha])
    })
}

fn plain(content_type: ContentType) -> EmbedOptions {
    EmbedOptions::default()
        .with_passphrase("")
        .with_content_type(content_type)
}

#[test]
fn two_byte_payload_fits_three_by_three() {
    // "Hi" deflates to 4 bytes: 22-byte header + 4 = 26 <= 27.
    let mut img = transparent(3, 3);
    let opts = plain(ContentType::Data);
    let summary = embed(&mut img, &[0x48, 0x69], &opts).unwrap();
    assert_eq!(summary.envelope_len, HEADER_LEN + summary.compressed_len);
    assert!(summary.envelope_len <= 27);

    let out = extract(&img, &ExtractOptions::from(&opts)).unwrap();
    assert_eq!(out.data, vec![0x48, 0x69]);
    assert_eq!(out.content_type, ContentType::Data);
    assert!(out.hash_matches);
}

#[test]
fn two_byte_payload_rejected_with_three_eligible_bytes() {
    let mut img = RgbaImage::from_fn(2, 2, |x, y| {
        Rgba([1, 2, 3, if x == 0 && y == 0 { 0 } else { 255 }])
    });
    let original = img.clone();
    let result = embed(&mut img, &[0x48, 0x69], &plain(ContentType::Data));
    assert!(matches!(
        result,
        Err(StegoError::MessageTooLarge { available: 3, .. })
    ));
    assert_eq!(img, original);
}

#[test]
fn capacity_boundary_is_exact() {
    let payload = b"boundary payload".to_vec();
    let n = encode_envelope(&payload, ContentType::Text, "").unwrap().len();

    let mut img = transparent(20, 20);
    let exact = plain(ContentType::Text).with_window(Window::new(0, n).unwrap());
    embed(&mut img, &payload, &exact).unwrap();
    let out = extract(&img, &ExtractOptions::from(&exact)).unwrap();
    assert_eq!(out.data, payload);

    let mut img = transparent(20, 20);
    let short = plain(ContentType::Text).with_window(Window::new(0, n - 1).unwrap());
    assert!(matches!(
        embed(&mut img, &payload, &short),
        Err(StegoError::MessageTooLarge { available, needed }) if available == n - 1 && needed == n
    ));
}

#[test]
fn encrypted_capacity_boundary_is_exact() {
    let payload = vec![0x42u8; 64];
    let n = encode_envelope(&payload, ContentType::Data, "key").unwrap().len();

    let opts = EmbedOptions::default()
        .with_passphrase("key")
        .with_window(Window::new(0, n).unwrap());
    let mut img = transparent(20, 20);
    embed(&mut img, &payload, &opts).unwrap();
    assert_eq!(extract(&img, &ExtractOptions::from(&opts)).unwrap().data, payload);

    let opts = opts.with_window(Window::new(0, n - 1).unwrap());
    let mut img = transparent(20, 20);
    assert!(embed(&mut img, &payload, &opts).is_err());
}

#[test]
fn roundtrip_every_content_type() {
    for ct in [ContentType::Invalid, ContentType::Data, ContentType::File, ContentType::Text] {
        let mut img = transparent(12, 12);
        let opts = EmbedOptions::default().with_content_type(ct);
        embed(&mut img, b"typed", &opts).unwrap();
        let out = extract(&img, &ExtractOptions::from(&opts)).unwrap();
        assert_eq!(out.content_type, ct);
        assert_eq!(out.data, b"typed");
    }
}

#[test]
fn roundtrip_empty_payload() {
    for passphrase in ["", "pass"] {
        let mut img = transparent(8, 8);
        let opts = EmbedOptions::default().with_passphrase(passphrase);
        embed(&mut img, &[], &opts).unwrap();
        let out = extract(&img, &ExtractOptions::from(&opts)).unwrap();
        assert!(out.data.is_empty());
        assert!(out.hash_matches);
    }
}

#[test]
fn roundtrip_large_compressible_payload() {
    let text = "The quick brown fox jumps over the lazy dog. ".repeat(200);
    let mut img = transparent(40, 40);
    let opts = EmbedOptions::default().with_content_type(ContentType::Text);
    let summary = embed(&mut img, text.as_bytes(), &opts).unwrap();
    assert!(summary.compressed_len < text.len() / 10);
    let out = extract(&img, &ExtractOptions::from(&opts)).unwrap();
    assert_eq!(out.data, text.as_bytes());
}

#[test]
fn roundtrip_with_threshold_in_sprite_border() {
    let mut img = sprite(64, 48);
    let opts = EmbedOptions::default()
        .with_passphrase("border")
        .with_threshold(2);
    embed(&mut img, b"hidden in the border", &opts).unwrap();

    let out = extract(&img, &ExtractOptions::from(&opts)).unwrap();
    assert_eq!(out.data, b"hidden in the border");
    assert!(out.hash_matches);
}

#[test]
fn mismatched_threshold_does_not_recover_payload() {
    let mut img = sprite(64, 48);
    let opts = plain(ContentType::Text).with_threshold(0);
    embed(&mut img, b"threshold matters", &opts).unwrap();

    let wrong = ExtractOptions::from(&opts).with_threshold(2);
    match extract(&img, &wrong) {
        Err(_) => {}
        Ok(out) => assert!(!out.hash_matches || out.data != b"threshold matters"),
    }
}

#[test]
fn empty_key_stream_has_no_iv() {
    let mut img = transparent(10, 10);
    let opts = plain(ContentType::File).with_random_fill(false);
    embed(&mut img, b"no iv here", &opts).unwrap();

    let stream = read_stream(&img, 0, Window::FULL);
    // The envelope starts directly with the version and content type.
    assert_eq!(stream[0], transparent_embed::FORMAT_VERSION);
    assert_eq!(stream[1], ContentType::File as u8);

    let out = extract(&img, &ExtractOptions::default().with_passphrase("")).unwrap();
    assert_eq!(out.data, b"no iv here");
}

#[test]
fn encrypted_stream_length_matches_envelope_len() {
    let mut img = transparent(10, 10);
    let opts = EmbedOptions::default().with_passphrase("k");
    let summary = embed(&mut img, b"sized", &opts).unwrap();
    assert_eq!(summary.envelope_len, envelope_len(summary.compressed_len, true));
}

#[test]
fn wrong_key_fails_or_mismatches() {
    let mut img = transparent(16, 16);
    let opts = EmbedOptions::default().with_passphrase("correct");
    embed(&mut img, b"secret msg", &opts).unwrap();

    let wrong = ExtractOptions::from(&opts).with_passphrase("wrong");
    match extract(&img, &wrong) {
        Err(
            StegoError::DecryptionFailed
            | StegoError::UnsupportedVersion(_)
            | StegoError::FrameMalformed
            | StegoError::PayloadCorrupted,
        ) => {}
        Err(other) => panic!("unexpected error {other:?}"),
        Ok(out) => assert!(!out.hash_matches),
    }
}

#[test]
fn encrypted_data_with_empty_key_is_rejected_or_flagged() {
    let mut img = transparent(16, 16);
    let opts = EmbedOptions::default().with_passphrase("set");
    embed(&mut img, b"needs a key", &opts).unwrap();

    match extract(&img, &ExtractOptions::default().with_passphrase("")) {
        Err(_) => {}
        Ok(out) => assert!(!out.hash_matches),
    }
}

#[test]
fn tampered_payload_is_flagged_not_rejected() {
    let mut img = transparent(10, 10);
    let opts = plain(ContentType::Data).with_random_fill(false);
    let payload = b"tamper evident payload, tamper evident payload".to_vec();
    embed(&mut img, &payload, &opts).unwrap();

    // First eligible byte of the compressed payload sits at stream position
    // HEADER_LEN; with all pixels eligible that is pixel HEADER_LEN / 3.
    let pos = HEADER_LEN + 1;
    let (x, y, c) = ((pos / 3) as u32 % 10, (pos / 3) as u32 / 10, pos % 3);
    img.get_pixel_mut(x, y).0[c] ^= 0x55;

    let out = extract(&img, &ExtractOptions::from(&opts)).unwrap();
    assert!(!out.hash_matches);
}

#[test]
fn newer_version_is_rejected() {
    let mut img = transparent(10, 10);
    let opts = plain(ContentType::Data);
    embed(&mut img, b"v", &opts).unwrap();
    img.get_pixel_mut(0, 0).0[0] = 2;

    assert!(matches!(
        extract(&img, &ExtractOptions::from(&opts)),
        Err(StegoError::UnsupportedVersion(2))
    ));
}

#[test]
fn no_embedded_data_is_an_error_or_mismatch() {
    let img = transparent(4, 4);
    match extract(&img, &ExtractOptions::default().with_passphrase("")) {
        Err(_) => {}
        Ok(out) => assert!(!out.hash_matches),
    }
}
