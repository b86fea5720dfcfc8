// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Example: recover data hidden by the `embed` example.
//!
//! Several images can be chained with `--append` (or listed in a file with
//! `--list`); their payloads are concatenated in order.
use std::fs;
use std::process::exit;

use transparent_embed::stego::config::parse_threshold;
use transparent_embed::{extract_image, ExtractOptions, Verbosity};

const USAGE: &str = "\
Usage: extract [options] <inputImage> [outputFile]
  -k, --key <key>        encryption key
  -t, --threshold <n>    maximum alpha of a data pixel (0)
  -l, --list             treat inputImage as a newline-separated list of images
  -a, --append <image>   also extract this image and append its data (repeatable)
  -p, --print            print the data as UTF-8 instead of writing a file
  -v, --verbose          print per-stage detail
  -s, --silent           print nothing but --print output";

fn fail(msg: impl std::fmt::Display, usage: bool) -> ! {
    eprintln!("{msg}");
    if usage {
        eprintln!("{USAGE}");
    }
    exit(1);
}

fn value<'a>(args: &mut impl Iterator<Item = &'a String>, flag: &str) -> &'a str {
    match args.next() {
        Some(v) => v,
        None => fail(format!("No argument provided for {flag}"), false),
    }
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut opts = ExtractOptions::default();
    let mut is_list = false;
    let mut print = false;
    let mut appended: Vec<String> = Vec::new();
    let mut positional = Vec::new();

    let mut it = args.iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-k" | "--key" => opts = opts.with_passphrase(value(&mut it, arg)),
            "-t" | "--threshold" => {
                let t = parse_threshold(value(&mut it, arg)).unwrap_or_else(|e| fail(e, false));
                opts = opts.with_threshold(t);
            }
            "-l" | "--list" => is_list = true,
            "-a" | "--append" => appended.push(value(&mut it, arg).to_string()),
            "-p" | "--print" => print = true,
            "-v" | "--verbose" => opts = opts.with_verbosity(Verbosity::Verbose),
            "-s" | "--silent" => opts = opts.with_verbosity(Verbosity::Silent),
            s if s.starts_with('-') => fail(format!("Unrecognized option: {s}"), true),
            _ => positional.push(arg.clone()),
        }
    }

    let (input, output) = match positional.as_slice() {
        [input] if print => (input.clone(), None),
        [input, output] => (input.clone(), (!print).then(|| output.clone())),
        [] => fail("No input file specified!", true),
        [_] => fail("No output file specified!", true),
        _ => fail("Too many arguments specified.", true),
    };

    env_logger::Builder::new()
        .filter_level(match opts.verbosity {
            Verbosity::Silent => log::LevelFilter::Off,
            Verbosity::Normal => log::LevelFilter::Warn,
            Verbosity::Verbose => log::LevelFilter::Debug,
        })
        .init();

    let mut images = Vec::new();
    if is_list {
        let list = fs::read_to_string(&input).unwrap_or_else(|e| fail(format!("Could not read {input}: {e}"), false));
        images.extend(list.lines().map(str::trim).filter(|l| !l.is_empty()).map(String::from));
        if images.is_empty() {
            fail(format!("{input} lists no images"), false);
        }
    } else {
        images.push(input);
    }
    images.extend(appended);
    log::debug!("extracting from {} image(s): {images:?}", images.len());

    let mut data = Vec::new();
    for (i, path) in images.iter().enumerate() {
        let bytes = fs::read(path).unwrap_or_else(|e| fail(format!("Could not read {path}: {e}"), false));
        let out = match extract_image(&bytes, &opts) {
            Ok(out) => out,
            Err(e) => fail(format!("Failed to extract from {path}: {e}"), false),
        };
        if !out.hash_matches && opts.verbosity != Verbosity::Silent {
            eprintln!("WARNING: hash does not match data in image #{} ({path})", i + 1);
        }
        log::debug!("{path}: {} bytes of {}", out.data.len(), out.content_type);
        data.extend_from_slice(&out.data);
    }

    match output {
        None => println!("{}", String::from_utf8_lossy(&data)),
        Some(output) => {
            fs::write(&output, &data).unwrap_or_else(|e| fail(format!("Could not write {output}: {e}"), false));
            if opts.verbosity != Verbosity::Silent {
                println!("Embedded data extracted to '{output}'.");
            }
        }
    }
}
