use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use lisprims_protocol::Protocol;

use crate::exit::{io_error, CliResult};
use crate::output::OutputFormat;

pub mod checksum;
pub mod decode;
pub mod encode;
pub mod validate;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a captured transmission and print its records.
    Decode(DecodeArgs),
    /// Serialize JSON records into a transmission.
    Encode(EncodeArgs),
    /// Parse and validate a transmission.
    Validate(ValidateArgs),
    /// Compute the frame checksum of a text.
    Checksum(ChecksumArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, protocol: &Protocol, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Decode(args) => decode::run(args, protocol, format),
        Command::Encode(args) => encode::run(args, protocol),
        Command::Validate(args) => validate::run(args, protocol, format),
        Command::Checksum(args) => checksum::run(args, protocol, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Transmission file, or `-` for stdin.
    #[arg(default_value = "-")]
    pub input: PathBuf,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// JSON array of records, or `-` for stdin.
    #[arg(default_value = "-")]
    pub input: PathBuf,
    /// Write the transmission here instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Transmission file, or `-` for stdin.
    #[arg(default_value = "-")]
    pub input: PathBuf,
    /// Input is a JSON array of records rather than wire bytes.
    #[arg(long)]
    pub records: bool,
}

#[derive(Args, Debug)]
pub struct ChecksumArgs {
    /// Text to checksum.
    pub text: String,
    /// Also print the complete frame built with this frame number.
    #[arg(long, value_name = "N")]
    pub wrap: Option<u8>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Read a file, or stdin when the path is `-`.
pub fn read_input(path: &Path) -> CliResult<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .map_err(|err| io_error("failed reading stdin", err))?;
        return Ok(buf);
    }
    fs::read(path).map_err(|err| io_error(&format!("failed reading {}", path.display()), err))
}
