// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Memory images built from Intel HEX, rendered for the HDL sources.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::ihex::{Record, RecordKind};

/// Bytes of one data record, placed at an absolute byte address.
#[derive(Debug, PartialEq, Eq)]
pub struct Segment {
    pub address: u64,
    pub data: Vec<u8>,
}

/// Data records in file order.
#[derive(Debug, Default)]
pub struct MemoryImage {
    segments: Vec<Segment>,
}

impl MemoryImage {
    /// Collects the data records of `text` up to its end of file record.
    pub fn from_ihex(text: &str) -> Result<MemoryImage> {
        let mut image = MemoryImage::default();
        let mut upper: u64 = 0;

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            if raw.trim().is_empty() {
                continue;
            }

            let record = Record::parse(raw, line)?;
            match record.kind {
                RecordKind::Data => image.segments.push(Segment {
                    address: (upper << 16) + u64::from(record.offset),
                    data: record.data,
                }),
                RecordKind::ExtendedLinearAddress => {
                    let &[hi, lo] = record.data.as_slice() else {
                        return Err(Error::InvalidAddress { line });
                    };
                    upper = u64::from(u16::from_be_bytes([hi, lo]));
                    log::debug!("line {line}: upper address {upper:#06x}");
                }
                RecordKind::EndOfFile => return Ok(image),
                RecordKind::Other(kind) => {
                    log::warn!("line {line}: ignoring record type {kind:#04x}");
                }
            }
        }

        Err(Error::MissingEndOfFile)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn byte_count(&self) -> usize {
        self.segments.iter().map(|s| s.data.len()).sum()
    }

    /// Renders the `nf_program` VHDL package, one entry per byte.
    ///
    /// `depth` is inserted verbatim, so it may name a VHDL constant.
    pub fn to_vhdl_package(&self, depth: &str) -> String {
        let mut out = format!(
            "library ieee;
use ieee.std_logic_1164.all;
use ieee.numeric_std.all;
library work;
use work.nf_mem_pkg.all;

package nf_program is

    constant program : mem_t({depth}*4-1 downto 0)(7 downto 0) :=
    (
"
        );

        for segment in &self.segments {
            for (i, byte) in segment.data.iter().enumerate() {
                let address = segment.address + i as u64;
                out.push_str(&format!("        {address} => X\"{byte:02X}\",\n"));
            }
        }

        out.push_str(
            "        others => X\"XX\"
    );

end package nf_program;
",
        );
        out
    }

    /// Renders one entry per 32-bit word, indexed by word address.
    ///
    /// Bytes are merged into their word by byte address, so records that
    /// start or end mid-word share one entry. Bytes no record covers are 0.
    pub fn to_word_table(&self) -> String {
        let mut words: BTreeMap<u64, [u8; 4]> = BTreeMap::new();

        for segment in &self.segments {
            for (i, byte) in segment.data.iter().enumerate() {
                let address = segment.address + i as u64;
                let word = words.entry(address >> 2).or_default();
                word[(address & 3) as usize] = *byte;
            }
        }

        let mut out = String::new();
        for (address, word) in &words {
            let value = u32::from_le_bytes(*word);
            out.push_str(&format!("        {address} => X\"{value:08X}\",\n"));
        }

        out.push_str("        others => X\"00000000\"");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROGRAM: &str = "\
:0800000013050000B702020025
:020000040001F9
:0400100001020304E2
:00000001FF
";

    #[test]
    fn collects_segments_with_upper_address() {
        let image = MemoryImage::from_ihex(PROGRAM).unwrap();
        assert_eq!(
            image.segments(),
            &[
                Segment {
                    address: 0x0,
                    data: vec![0x13, 0x05, 0x00, 0x00, 0xB7, 0x02, 0x02, 0x00],
                },
                Segment {
                    address: 0x1_0010,
                    data: vec![0x01, 0x02, 0x03, 0x04],
                },
            ]
        );
        assert_eq!(image.byte_count(), 12);
    }

    #[test]
    fn stops_at_end_of_file() {
        let text = format!("{PROGRAM}:0400000011223344??\n");
        let image = MemoryImage::from_ihex(&text).unwrap();
        assert_eq!(image.segments().len(), 2);
    }

    #[test]
    fn missing_end_of_file_is_an_error() {
        let text = ":0400000001020304F2\n";
        assert!(matches!(
            MemoryImage::from_ihex(text),
            Err(Error::MissingEndOfFile)
        ));
    }

    #[test]
    fn other_record_types_are_skipped() {
        let text = ":0400000300000000F9\n:0100000055AA\n:00000001FF\n";
        let image = MemoryImage::from_ihex(text).unwrap();
        assert_eq!(
            image.segments(),
            &[Segment {
                address: 0,
                data: vec![0x55],
            }]
        );
    }

    #[test]
    fn bad_address_record() {
        let text = ":0100000401FA\n:00000001FF\n";
        assert!(matches!(
            MemoryImage::from_ihex(text),
            Err(Error::InvalidAddress { line: 1 })
        ));
    }

    #[test]
    fn vhdl_package_lists_bytes() {
        let image = MemoryImage::from_ihex(":0200000013AA41\n:00000001FF\n").unwrap();
        let vhdl = image.to_vhdl_package("1024");

        assert!(vhdl.starts_with("library ieee;\n"));
        assert!(vhdl.contains("use work.nf_mem_pkg.all;\n"));
        assert!(vhdl.contains("constant program : mem_t(1024*4-1 downto 0)(7 downto 0) :=\n"));
        assert!(vhdl.ends_with(
            "    (
        0 => X\"13\",
        1 => X\"AA\",
        others => X\"XX\"
    );

end package nf_program;
"
        ));
    }

    #[test]
    fn word_table_uses_word_addresses() {
        let image = MemoryImage::from_ihex(PROGRAM).unwrap();
        assert_eq!(
            image.to_word_table(),
            "        0 => X\"00000513\",
        1 => X\"000202B7\",
        16388 => X\"04030201\",
        others => X\"00000000\""
        );
    }

    #[test]
    fn word_table_pads_partial_word() {
        let image = MemoryImage::from_ihex(":0200080013AA39\n:00000001FF\n").unwrap();
        assert_eq!(
            image.to_word_table(),
            "        2 => X\"0000AA13\",\n        others => X\"00000000\""
        );
    }

    #[test]
    fn word_table_merges_records_within_a_word() {
        let text = ":02000000AABB99\n:02000200CCDD53\n:00000001FF\n";
        let image = MemoryImage::from_ihex(text).unwrap();
        assert_eq!(
            image.to_word_table(),
            "        0 => X\"DDCCBBAA\",\n        others => X\"00000000\""
        );
    }

    #[test]
    fn word_table_places_unaligned_bytes() {
        // Three bytes at 0x6 straddle words 1 and 2.
        let text = ":0300060011223391\n:00000001FF\n";
        let image = MemoryImage::from_ihex(text).unwrap();
        assert_eq!(
            image.to_word_table(),
            "        1 => X\"22110000\",\n        2 => X\"00000033\",\n        others => X\"00000000\""
        );
    }
}
