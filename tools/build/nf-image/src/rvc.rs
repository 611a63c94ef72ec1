// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Simulator run script for the RISC-V compliance (rvc) tests.
//!
//! Each test leaves its results between the `begin_signature` and
//! `end_signature` symbols. The script compiles the HDL sources, runs the
//! testbench and dumps that range of data memory so it can be compared with
//! the reference signature.

const COMPILE: &str = "\
vcom -2008 ../inc/*.vhd                     -work nf
vcom -2008 ../program_file/*.vhd            -work nf

vcom -2008  ../rtl/core/*.vhd
vcom -2008  ../rtl/common/*.vhd
vcom -2008  ../rtl/periphery/*.vhd
vcom -2008  ../rtl/periphery/pwm/*.vhd
vcom -2008  ../rtl/periphery/gpio/*.vhd
vcom -2008  ../rtl/periphery/uart/*.vhd
vcom -2008  ../rtl/bus/ahb/*.vhd
vcom -2008  ../rtl/top/*.vhd

vcom -2008  ../tb/nf_tb_def.vhd             -work nf
vcom -2008  ../tb/nf_tb.vhd

vsim -novopt work.nf_tb
";

const WAVES: &str = "\
add wave -divider  \"pipeline stages\"
add wave -position insertpoint sim:/nf_tb/instruction_if_stage
add wave -position insertpoint sim:/nf_tb/instruction_id_stage
add wave -position insertpoint sim:/nf_tb/instruction_iexe_stage
add wave -position insertpoint sim:/nf_tb/instruction_imem_stage
add wave -position insertpoint sim:/nf_tb/instruction_iwb_stage
add wave -divider  \"load store unit\"
add wave -position insertpoint sim:/nf_tb/nf_top_ahb_0/nf_cpu_0/nf_i_lsu_0/*
add wave -divider  \"core signals\"
add wave -position insertpoint sim:/nf_tb/nf_top_ahb_0/nf_cpu_0/*
add wave -divider  \"hazard stall & flush signals\"
add wave -position insertpoint sim:/nf_tb/nf_top_ahb_0/nf_cpu_0/nf_hz_stall_unit_0/*
add wave -divider  \"cc unit signals\"
add wave -position insertpoint sim:/nf_tb/nf_top_ahb_0/nf_cpu_cc_0/*
add wave -divider  \"instruction fetch unit\"
add wave -position insertpoint sim:/nf_tb/nf_top_ahb_0/nf_cpu_0/nf_i_fu_0/*
add wave -divider  \"csr signals\"
add wave -position insertpoint sim:/nf_tb/nf_top_ahb_0/nf_cpu_0/nf_csr_0/*
add wave -divider  \"testbench signals\"
add wave -position insertpoint sim:/nf_tb/*

run -all
";

const RAM: &str = "/nf_tb/nf_top_ahb_0/nf_ram_i_d_0/ram";

/// Byte addresses bounding a test's signature in data memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignatureRange {
    pub start: u64,
    pub end: u64,
}

impl Default for SignatureRange {
    fn default() -> Self {
        SignatureRange {
            start: 0x2030,
            end: 0x20e0,
        }
    }
}

impl SignatureRange {
    /// Reads the signature symbols from a linker map.
    ///
    /// A symbol that does not appear keeps its default address. If a symbol
    /// appears more than once the last line wins.
    pub fn from_map(map: &str) -> SignatureRange {
        let mut range = SignatureRange::default();

        for line in map.lines() {
            if line.contains("begin_signature") {
                match first_address(line) {
                    Some(address) => range.start = address,
                    None => log::warn!("no address on begin_signature line: {}", line.trim()),
                }
            }
            if line.contains("end_signature") {
                match first_address(line) {
                    Some(address) => range.end = address,
                    None => log::warn!("no address on end_signature line: {}", line.trim()),
                }
            }
        }

        range
    }
}

fn first_address(line: &str) -> Option<u64> {
    line.split_whitespace().find_map(|token| {
        token
            .strip_prefix("0x")
            .and_then(|digits| u64::from_str_radix(digits, 16).ok())
    })
}

/// Renders the run script for `test`, dumping `range` into
/// `../program_file/<test>/mem.hex`.
pub fn render_script(test: &str, range: SignatureRange) -> String {
    format!(
        "{COMPILE}{WAVES}mem save -o ../program_file/{test}/mem.hex -f hex -noaddress \
         -startaddress {} -endaddress {} {RAM}\nquit",
        range.start, range.end
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: &str = "\
 .data          0x0000000000002000       0x30 main.o
                0x0000000000002040                begin_signature
 *fill*         0x0000000000002044        0x4
                0x0000000000002100                end_signature
";

    #[test]
    fn range_from_map() {
        assert_eq!(
            SignatureRange::from_map(MAP),
            SignatureRange {
                start: 0x2040,
                end: 0x2100
            }
        );
    }

    #[test]
    fn range_defaults_without_symbols() {
        assert_eq!(
            SignatureRange::from_map(" .text 0x0 0x100 main.o\n"),
            SignatureRange::default()
        );
    }

    #[test]
    fn last_symbol_wins() {
        let map = format!("{MAP}                0x0000000000003000                begin_signature\n");
        assert_eq!(SignatureRange::from_map(&map).start, 0x3000);
    }

    #[test]
    fn short_addresses_parse() {
        let map = "0x00002050 begin_signature\n";
        assert_eq!(SignatureRange::from_map(map).start, 0x2050);
    }

    #[test]
    fn script_dumps_signature() {
        let script = render_script("I-ADD-01", SignatureRange::from_map(MAP));

        assert!(script.starts_with("vcom -2008 ../inc/*.vhd"));
        assert!(script.contains("vsim -novopt work.nf_tb\n"));
        assert!(script.contains("\nrun -all\n"));
        assert!(script.ends_with(
            "mem save -o ../program_file/I-ADD-01/mem.hex -f hex -noaddress \
             -startaddress 8256 -endaddress 8448 /nf_tb/nf_top_ahb_0/nf_ram_i_d_0/ram\nquit"
        ));
    }
}
