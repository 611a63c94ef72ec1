// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

use std::path::PathBuf;

/// Errors that can occur while reading or producing an image.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("line {line}: record does not start with ':'")]
    MissingStartCode { line: usize },
    #[error("line {line}: invalid hex digit")]
    InvalidHex { line: usize },
    #[error("line {line}: record is too short")]
    Truncated { line: usize },
    #[error("line {line}: byte count does not match record length")]
    LengthMismatch { line: usize },
    #[error("line {line}: checksum is {found:#04x}, expected {expected:#04x}")]
    Checksum { line: usize, expected: u8, found: u8 },
    #[error("line {line}: address record must carry two bytes")]
    InvalidAddress { line: usize },
    #[error("no end of file record")]
    MissingEndOfFile,
    #[error("image of {words} words does not fit in 16-bit record addresses")]
    ImageTooLarge { words: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
