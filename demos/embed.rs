// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Example: hide a file in the transparent pixels of an image.
use std::fs;
use std::process::exit;

use transparent_embed::stego::config::{parse_count, parse_threshold};
use transparent_embed::{embed_image, ContentType, EmbedOptions, Verbosity, Window};

const USAGE: &str = "\
Usage: embed [options] <inputImage> <fileToEmbed> <output.png>
  -k, --key <key>        encryption key (empty string disables encryption)
  -c, --content <type>   content type: file, text or data (file)
  -t, --threshold <n>    maximum alpha of a data pixel (0)
  -o, --offset <n>       first byte of fileToEmbed to read (0)
  -l, --length <n>       bytes of fileToEmbed to read, 0 for all (0)
  -b, --begin <n>        skip the first n eligible bytes (0)
  -e, --end <n>          do not write at or beyond eligible byte n, 0 for no limit (0)
      --no-fill          leave unused eligible bytes untouched
  -v, --verbose          print per-stage detail
  -s, --silent           print nothing on success";

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
    let mut opts = EmbedOptions::default();
    let (mut begin, mut end) = (0, 0);
    let mut positional = Vec::new();

    let mut it = args.iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-k" | "--key" => opts = opts.with_passphrase(value(&mut it, arg)),
            "-c" | "--content" => {
                let ct: ContentType = value(&mut it, arg).parse().unwrap_or_else(|e| fail(e, false));
                opts = opts.with_content_type(ct);
            }
            "-t" | "--threshold" => {
                let t = parse_threshold(value(&mut it, arg)).unwrap_or_else(|e| fail(e, false));
                opts = opts.with_threshold(t);
            }
            "-o" | "--offset" => {
                opts.input_offset = parse_count(value(&mut it, arg)).unwrap_or_else(|e| fail(e, false));
            }
            "-l" | "--length" => {
                opts.input_length = parse_count(value(&mut it, arg)).unwrap_or_else(|e| fail(e, false));
            }
            "-b" | "--begin" => begin = parse_count(value(&mut it, arg)).unwrap_or_else(|e| fail(e, false)),
            "-e" | "--end" => end = parse_count(value(&mut it, arg)).unwrap_or_else(|e| fail(e, false)),
            "--no-fill" => opts = opts.with_random_fill(false),
            "-v" | "--verbose" => opts = opts.with_verbosity(Verbosity::Verbose),
            "-s" | "--silent" => opts = opts.with_verbosity(Verbosity::Silent),
            s if s.starts_with('-') => fail(format!("Unrecognized option: {s}"), true),
            _ => positional.push(arg.as_str()),
        }
    }

    let [input, to_embed, output] = positional[..] else {
        fail("Expected exactly three file arguments.", true);
    };
    let window = Window::new(begin, end).unwrap_or_else(|e| fail(e, false));
    opts = opts.with_window(window);

    env_logger::Builder::new()
        .filter_level(match opts.verbosity {
            Verbosity::Silent => log::LevelFilter::Off,
            Verbosity::Normal => log::LevelFilter::Warn,
            Verbosity::Verbose => log::LevelFilter::Debug,
        })
        .init();

    let cover = fs::read(input).unwrap_or_else(|e| fail(format!("Could not read {input}: {e}"), false));
    let data = fs::read(to_embed).unwrap_or_else(|e| fail(format!("Could not read {to_embed}: {e}"), false));

    let (stego, summary) = match embed_image(&cover, &data, &opts) {
        Ok(r) => r,
        Err(e) => fail(format!("Failed to embed file: {e}"), false),
    };
    fs::write(output, &stego).unwrap_or_else(|e| fail(format!("Could not write {output}: {e}"), false));

    if opts.verbosity != Verbosity::Silent {
        println!(
            "Embedded '{to_embed}' ({} bytes, {} compressed) into '{input}' and wrote '{output}'.",
            summary.input_len, summary.compressed_len
        );
        println!(
            "Envelope: {} of {} window bytes, {} filled.",
            summary.envelope_len, summary.capacity, summary.filled
        );
    }
}
