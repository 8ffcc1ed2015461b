use std::fmt;
use std::io;

use lisprims_frame::FrameError;
use lisprims_protocol::ProtocolError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const NOT_FOUND: i32 = 66;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::NotFound => NOT_FOUND,
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => DATA_INVALID,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::Io(source) => io_error(context, source),
        FrameError::FrameNumberOutOfRange(_) => CliError::new(USAGE, format!("{context}: {err}")),
        FrameError::ConnectionClosed => CliError::new(FAILURE, format!("{context}: {err}")),
        other => CliError::new(DATA_INVALID, format!("{context}: {other}")),
    }
}

pub fn protocol_error(context: &str, err: ProtocolError) -> CliError {
    match err {
        ProtocolError::Frame(err) => frame_error(context, err),
        ProtocolError::Checksum { .. } => CliError::new(DATA_INVALID, format!("{context}: {err}")),
        ProtocolError::Cancelled => CliError::new(FAILURE, format!("{context}: {err}")),
        ProtocolError::MissingChecksumStrategy => {
            CliError::new(INTERNAL, format!("{context}: {err}"))
        }
    }
}

pub fn json_error(context: &str, err: serde_json::Error) -> CliError {
    CliError::new(DATA_INVALID, format!("{context}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_failure_is_data_invalid() {
        let err = ProtocolError::Checksum {
            frame_index: 2,
            source: FrameError::ChecksumMismatch {
                expected: "A1".to_string(),
                provided: "00".to_string(),
            },
        };
        let cli = protocol_error("decode failed", err);
        assert_eq!(cli.code, DATA_INVALID);
        assert!(cli.message.starts_with("decode failed: checksum failure in frame 2"));
    }

    #[test]
    fn bad_frame_number_is_usage() {
        let cli = protocol_error(
            "wrap failed",
            ProtocolError::Frame(FrameError::FrameNumberOutOfRange(9)),
        );
        assert_eq!(cli.code, USAGE);
    }

    #[test]
    fn missing_file_is_not_found() {
        let cli = io_error("read failed", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(cli.code, NOT_FOUND);
    }
}
