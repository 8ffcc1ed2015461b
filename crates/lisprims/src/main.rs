mod cmd;
mod exit;
mod logging;
mod output;

use chrono::NaiveDateTime;
use clap::Parser;
use lisprims_frame::DeviceProfile;
use lisprims_protocol::{Protocol, ProtocolVariant};
use lisprims_record::parse_timestamp;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "lisprims",
    version,
    about = "Laboratory instrument transmission tooling"
)]
struct Cli {
    /// Protocol variant: base, ordered or session.
    #[arg(
        long,
        value_name = "VARIANT",
        env = "LISPRIMS_VARIANT",
        default_value = "base",
        value_parser = parse_variant,
        global = true
    )]
    variant: ProtocolVariant,

    /// Report session rule violations as warnings and skip frames with bad checksums.
    #[arg(long, env = "LISPRIMS_LENIENT", global = true)]
    lenient: bool,

    /// Device profile selecting the checksum strategy.
    #[arg(
        long,
        value_name = "DEVICE",
        env = "LISPRIMS_DEVICE",
        default_value = "generic",
        value_parser = parse_device,
        global = true
    )]
    device: DeviceProfile,

    /// Judge record dates against this instant (YYYYMMDDHHMMSS) instead of the clock.
    #[arg(long, value_name = "TIMESTAMP", value_parser = parse_reference_time, global = true)]
    reference_time: Option<NaiveDateTime>,

    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn protocol(&self) -> Protocol {
        let mut builder = Protocol::builder()
            .variant(self.variant)
            .strict(!self.lenient)
            .device(self.device);
        if let Some(reference) = self.reference_time {
            builder = builder.reference_time(reference);
        }
        builder.build()
    }
}

fn parse_variant(value: &str) -> Result<ProtocolVariant, String> {
    value.parse()
}

fn parse_device(value: &str) -> Result<DeviceProfile, String> {
    DeviceProfile::from_name(value).ok_or_else(|| {
        let known: Vec<&str> = DeviceProfile::ALL.iter().map(|d| d.name()).collect();
        format!("unknown device '{value}' (expected one of: {})", known.join(", "))
    })
}

fn parse_reference_time(value: &str) -> Result<NaiveDateTime, String> {
    parse_timestamp(value).ok_or_else(|| format!("invalid timestamp '{value}' (expected YYYYMMDDHHMMSS)"))
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let protocol = cli.protocol();
    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, &protocol, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decode_with_globals() {
        let cli = Cli::try_parse_from([
            "lisprims",
            "--variant",
            "session",
            "--lenient",
            "--device",
            "Roche",
            "decode",
            "capture.bin",
        ])
        .expect("decode args should parse");

        assert!(matches!(cli.command, Command::Decode(_)));
        let protocol = cli.protocol();
        assert_eq!(protocol.variant(), ProtocolVariant::Session);
        assert!(!protocol.config().strict);
        assert_eq!(protocol.config().device, DeviceProfile::Roche);
    }

    #[test]
    fn globals_accepted_after_subcommand() {
        let cli = Cli::try_parse_from(["lisprims", "validate", "-", "--variant", "ordered"])
            .expect("validate args should parse");
        assert_eq!(cli.variant, ProtocolVariant::Ordered);
        assert!(matches!(cli.command, Command::Validate(_)));
    }

    #[test]
    fn rejects_unknown_variant() {
        let err = Cli::try_parse_from(["lisprims", "--variant", "z", "checksum", "ABC"])
            .expect_err("unknown variant should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn reference_time_is_parsed() {
        let cli = Cli::try_parse_from([
            "lisprims",
            "--reference-time",
            "20240101120000",
            "version",
        ])
        .expect("reference time should parse");
        assert!(cli.protocol().config().reference_time.is_some());

        assert!(Cli::try_parse_from(["lisprims", "--reference-time", "yesterday", "version"]).is_err());
    }
}
