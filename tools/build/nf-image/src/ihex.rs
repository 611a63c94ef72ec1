// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Intel HEX records.
//!
//! A record is one text line, `:LLAAAATT<data>CC`, where `LL` is the number
//! of data bytes, `AAAA` a 16-bit offset, `TT` the record type and `CC` the
//! two's complement of the sum of every preceding byte.

use crate::error::{Error, Result};

/// Record closing every file.
pub const END_OF_FILE: &str = ":00000001FF";

/// Largest image `encode_words` can address with 16-bit offsets.
const MAX_WORDS: usize = 0x1_0000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Data,
    EndOfFile,
    ExtendedLinearAddress,
    Other(u8),
}

impl From<u8> for RecordKind {
    fn from(kind: u8) -> Self {
        match kind {
            0x00 => RecordKind::Data,
            0x01 => RecordKind::EndOfFile,
            0x04 => RecordKind::ExtendedLinearAddress,
            other => RecordKind::Other(other),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Record {
    pub kind: RecordKind,
    pub offset: u16,
    pub data: Vec<u8>,
}

impl Record {
    /// Parses one record. `line` is only used for error reporting.
    pub fn parse(text: &str, line: usize) -> Result<Record> {
        let body = text
            .trim_end()
            .strip_prefix(':')
            .ok_or(Error::MissingStartCode { line })?;
        let bytes = decode_hex(body).ok_or(Error::InvalidHex { line })?;

        // count, offset (2), type and checksum
        if bytes.len() < 5 {
            return Err(Error::Truncated { line });
        }
        let count = usize::from(bytes[0]);
        if bytes.len() != count + 5 {
            return Err(Error::LengthMismatch { line });
        }

        let (payload, found) = bytes.split_at(bytes.len() - 1);
        let expected = checksum(payload);
        if found[0] != expected {
            return Err(Error::Checksum {
                line,
                expected,
                found: found[0],
            });
        }

        Ok(Record {
            kind: RecordKind::from(bytes[3]),
            offset: u16::from_be_bytes([bytes[1], bytes[2]]),
            data: payload[4..].to_vec(),
        })
    }
}

/// Two's complement of the byte sum.
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes
        .iter()
        .fold(0u8, |sum, byte| sum.wrapping_add(*byte))
        .wrapping_neg()
}

fn decode_hex(text: &str) -> Option<Vec<u8>> {
    let digits = text.as_bytes();
    if digits.len() % 2 != 0 {
        return None;
    }
    digits
        .chunks(2)
        .map(|pair| Some((nibble(pair[0])? << 4) | nibble(pair[1])?))
        .collect()
}

fn nibble(digit: u8) -> Option<u8> {
    char::from(digit).to_digit(16).map(|value| value as u8)
}

/// Encodes `binary` with one record per little-endian 32-bit word.
///
/// The offset field counts words, not bytes, which is what the FPGA memory
/// initialization expects. A trailing partial word is zero padded.
pub fn encode_words(binary: &[u8]) -> Result<String> {
    let words = binary.len().div_ceil(4);
    if words > MAX_WORDS {
        return Err(Error::ImageTooLarge { words });
    }

    let mut out = String::with_capacity(words * 20 + END_OF_FILE.len());
    for (index, chunk) in binary.chunks(4).enumerate() {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        let value = u32::from_le_bytes(word);
        let [addr_hi, addr_lo] = (index as u16).to_be_bytes();
        let [d3, d2, d1, d0] = value.to_be_bytes();
        let sum = checksum(&[0x04, addr_hi, addr_lo, 0x00, d3, d2, d1, d0]);

        out.push_str(&format!(":04{index:04X}00{value:08X}{sum:02X}\n"));
    }
    out.push_str(END_OF_FILE);

    Ok(out)
}
