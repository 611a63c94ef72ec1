// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Memory image helpers for the nanoFOX HDL flow.
//!
//! Usage:
//!
//! ```shell
//! nf-image bin2ihex main.bin program_file/program_32.ihex
//! nf-image ihex2hex --depth MEM_DEPTH
//! nf-image ihex2hex --format words program_file/program.ihex program_file/program.hex
//! nf-image rvc-script I-ADD-01
//! ```
//!
//! Set `RUST_LOG=debug` for per-record output.

mod error;
mod ihex;
mod memory_image;
mod rvc;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use crate::error::{Error, Result};
use crate::memory_image::MemoryImage;
use crate::rvc::SignatureRange;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a raw binary into word-addressed Intel HEX.
    #[command(name = "bin2ihex")]
    Bin2Ihex { input: PathBuf, output: PathBuf },

    /// Convert Intel HEX into a memory image for the HDL sources.
    #[command(name = "ihex2hex")]
    Ihex2Hex {
        #[arg(long, value_enum, default_value_t = Format::Vhdl)]
        format: Format,

        /// Memory depth in words, copied verbatim into the VHDL package.
        #[arg(long, default_value = "MEM_DEPTH")]
        depth: String,

        #[arg(default_value = "program_file/program.ihex")]
        input: PathBuf,

        /// Defaults to `program_file/nf_program.vhd` or
        /// `program_file/program.hex` depending on the format.
        output: Option<PathBuf>,
    },

    /// Generate the simulator script that runs an rvc test.
    #[command(name = "rvc-script")]
    RvcScript {
        /// Test name, used for the signature dump directory.
        test: String,

        #[arg(long, default_value = "program_file/main.map")]
        map: PathBuf,

        #[arg(long, default_value = "run/rvc_run.tcl")]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// VHDL package with one entry per byte.
    Vhdl,
    /// One entry per 32-bit word.
    Words,
}

impl Format {
    fn default_output(self) -> &'static str {
        match self {
            Format::Vhdl => "program_file/nf_program.vhd",
            Format::Words => "program_file/program.hex",
        }
    }
}

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })
}

fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })
}

fn write(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Bin2Ihex { input, output } => {
            log::info!("bin2ihex: {} -> {}", input.display(), output.display());
            let binary = read(&input)?;
            let ihex = ihex::encode_words(&binary)?;
            write(&output, &ihex)?;
            log::info!("bin2ihex: wrote {} words", binary.len().div_ceil(4));
        }
        Command::Ihex2Hex {
            format,
            depth,
            input,
            output,
        } => {
            let output = output.unwrap_or_else(|| PathBuf::from(format.default_output()));
            log::info!("ihex2hex: {} -> {}", input.display(), output.display());
            let image = MemoryImage::from_ihex(&read_to_string(&input)?)?;
            let rendered = match format {
                Format::Vhdl => image.to_vhdl_package(&depth),
                Format::Words => image.to_word_table(),
            };
            write(&output, &rendered)?;
            log::info!(
                "ihex2hex: wrote {} bytes from {} records",
                image.byte_count(),
                image.segments().len()
            );
        }
        Command::RvcScript { test, map, output } => {
            let range = SignatureRange::from_map(&read_to_string(&map)?);
            log::info!(
                "rvc-script: {test} signature {:#x}..{:#x}",
                range.start,
                range.end
            );
            write(&output, &rvc::render_script(&test, range))?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse().command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
