// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Embed/extract options and typed parsing of textual option values.
//!
//! Everything that influences a single call travels in [`EmbedOptions`] or
//! [`ExtractOptions`]; there is no process-wide state. Front ends that read
//! options as strings (command lines, config files) go through the
//! `parse_*` helpers, which fail with [`ConfigError`] rather than
//! [`StegoError`](crate::StegoError).

use core::fmt;
use core::str::FromStr;

use crate::stego::frame::ContentType;

/// Passphrase used when the caller asks for the "default" key.
///
/// Pass an empty passphrase to embed without encryption.
pub const DEFAULT_PASSPHRASE: &str = "SecureBeneathTheWatchfulEyes";

/// Errors raised while validating option values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The value is not a number.
    NotANumber(String),
    /// The number is outside the accepted range.
    OutOfRange { value: i64, min: i64, max: i64 },
    /// Unknown content type name.
    UnknownContentType(String),
    /// `end` is non-zero and lies before `begin`.
    InvalidWindow { begin: usize, end: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber(s) => write!(f, "'{s}' is not a number"),
            Self::OutOfRange { value, min, max } => {
                write!(f, "{value} is out of range ({min}..={max})")
            }
            Self::UnknownContentType(s) => {
                write!(f, "unknown content type '{s}' (expected file, text or data)")
            }
            Self::InvalidWindow { begin, end } => {
                write!(f, "window end {end} lies before begin {begin}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse an alpha threshold (0–255).
pub fn parse_threshold(s: &str) -> Result<u8, ConfigError> {
    let value = parse_i64(s)?;
    u8::try_from(value).map_err(|_| ConfigError::OutOfRange { value, min: 0, max: 255 })
}

/// Parse a non-negative byte count or position.
pub fn parse_count(s: &str) -> Result<usize, ConfigError> {
    let value = parse_i64(s)?;
    usize::try_from(value).map_err(|_| ConfigError::OutOfRange {
        value,
        min: 0,
        max: i64::MAX,
    })
}

fn parse_i64(s: &str) -> Result<i64, ConfigError> {
    s.trim()
        .parse::<i64>()
        .map_err(|_| ConfigError::NotANumber(s.to_string()))
}

impl FromStr for ContentType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "file" => Ok(ContentType::File),
            "text" => Ok(ContentType::Text),
            "data" => Ok(ContentType::Data),
            _ => Err(ConfigError::UnknownContentType(s.to_string())),
        }
    }
}

/// A `[begin, end)` range of eligible-byte-stream positions.
///
/// `end == 0` leaves the window open to the end of the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Window {
    begin: usize,
    end: usize,
}

impl Window {
    /// The whole eligible byte stream.
    pub const FULL: Window = Window { begin: 0, end: 0 };

    /// Build a window, rejecting a bounded `end` before `begin`.
    pub fn new(begin: usize, end: usize) -> Result<Self, ConfigError> {
        if end != 0 && end < begin {
            return Err(ConfigError::InvalidWindow { begin, end });
        }
        Ok(Self { begin, end })
    }

    pub fn begin(&self) -> usize {
        self.begin
    }

    /// Exclusive end, or `None` when unbounded.
    pub fn end(&self) -> Option<usize> {
        (self.end != 0).then_some(self.end)
    }

    /// Whether stream position `pos` falls inside the window.
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.begin && self.end().map_or(true, |end| pos < end)
    }

    /// Number of window positions inside a stream of `stream_len` bytes.
    pub fn len_within(&self, stream_len: usize) -> usize {
        let end = self.end().map_or(stream_len, |end| end.min(stream_len));
        end.saturating_sub(self.begin)
    }
}

/// How much the pipeline reports through the `log` facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Nothing, not even hash-mismatch warnings.
    Silent,
    /// Warnings only.
    #[default]
    Normal,
    /// Warnings plus per-stage detail at debug level.
    Verbose,
}

impl Verbosity {
    pub(crate) fn detail(self, args: fmt::Arguments<'_>) {
        if self == Verbosity::Verbose {
            log::debug!("{args}");
        }
    }

    pub(crate) fn warn(self, args: fmt::Arguments<'_>) {
        if self != Verbosity::Silent {
            log::warn!("{args}");
        }
    }
}

/// Options for [`embed`](crate::embed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedOptions {
    /// Encryption passphrase; empty disables encryption.
    pub passphrase: String,
    pub content_type: ContentType,
    /// Maximum alpha of a pixel that may carry data.
    pub threshold: u8,
    /// First byte of the source data to embed.
    pub input_offset: usize,
    /// Number of source bytes to embed; 0 means up to the end.
    pub input_length: usize,
    pub window: Window,
    /// Overwrite unused in-window bytes with random data.
    pub random_fill: bool,
    pub verbosity: Verbosity,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            passphrase: DEFAULT_PASSPHRASE.to_string(),
            content_type: ContentType::File,
            threshold: 0,
            input_offset: 0,
            input_length: 0,
            window: Window::FULL,
            random_fill: true,
            verbosity: Verbosity::Normal,
        }
    }
}

impl EmbedOptions {
    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = passphrase.into();
        self
    }

    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_input_range(mut self, offset: usize, length: usize) -> Self {
        self.input_offset = offset;
        self.input_length = length;
        self
    }

    pub fn with_window(mut self, window: Window) -> Self {
        self.window = window;
        self
    }

    pub fn with_random_fill(mut self, random_fill: bool) -> Self {
        self.random_fill = random_fill;
        self
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }
}

/// Options for [`extract`](crate::extract).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Decryption passphrase; empty means the data was embedded unencrypted.
    pub passphrase: String,
    pub threshold: u8,
    /// Must match the window used when embedding.
    pub window: Window,
    pub verbosity: Verbosity,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            passphrase: DEFAULT_PASSPHRASE.to_string(),
            threshold: 0,
            window: Window::FULL,
            verbosity: Verbosity::Normal,
        }
    }
}

impl ExtractOptions {
    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = passphrase.into();
        self
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_window(mut self, window: Window) -> Self {
        self.window = window;
        self
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }
}

impl From<&EmbedOptions> for ExtractOptions {
    /// Extraction options matching an embed call.
    fn from(opts: &EmbedOptions) -> Self {
        Self {
            passphrase: opts.passphrase.clone(),
            threshold: opts.threshold,
            window: opts.window,
            verbosity: opts.verbosity,
        }
    }
}
