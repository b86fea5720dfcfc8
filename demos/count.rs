// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Example: report how many bytes an image can hide.
use std::fs;
use std::process::exit;

use transparent_embed::stego::capacity::max_compressed_payload;
use transparent_embed::stego::config::parse_threshold;
use transparent_embed::image_capacity;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut threshold = 0u8;
    let mut files = Vec::new();

    let mut it = args.iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-t" | "--threshold" => {
                let Some(v) = it.next() else {
                    eprintln!("No argument provided for {arg}");
                    exit(1);
                };
                threshold = parse_threshold(v).unwrap_or_else(|e| {
                    eprintln!("Could not read value for threshold: {e}");
                    exit(1);
                });
            }
            _ => files.push(arg),
        }
    }
    if files.is_empty() {
        eprintln!("Usage: count [-t <threshold>] <image>...");
        exit(1);
    }

    for path in files {
        let info = fs::read(path)
            .map_err(|e| e.to_string())
            .and_then(|bytes| image_capacity(&bytes, threshold).map_err(|e| e.to_string()));
        match info {
            Ok(info) => println!(
                "{path}: {} eligible pixels, {} bytes; up to {} compressed bytes plain, {} encrypted",
                info.eligible_pixels,
                info.eligible_bytes,
                max_compressed_payload(info.eligible_bytes, false),
                max_compressed_payload(info.eligible_bytes, true),
            ),
            Err(e) => eprintln!("{path}: {e}"),
        }
    }
}
