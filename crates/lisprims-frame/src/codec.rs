use bytes::{BufMut, Bytes, BytesMut};

use crate::checksum::ChecksumStrategy;
use crate::error::{FrameError, Result};
use crate::markers::{is_valid_frame_number, CHECKSUM_LEN, ETX, MIN_FRAME_LEN, STX};
use crate::scan::ScanOptions;

/// Default cap on bytes buffered by a [`FrameReader`](crate::FrameReader): 64 KiB.
pub const DEFAULT_MAX_BUFFERED: usize = 64 * 1024;

/// A frame whose markers and checksum have been verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    /// Frame number digit, if the byte after STX was an ASCII digit.
    pub frame_number: Option<u8>,
    /// Record text between the frame number and ETX.
    pub body: String,
}

/// Outcome of [`unwrap_frame`]: the body text and whether the frame was valid.
///
/// Any structural or checksum failure yields an empty body and `valid == false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Unwrapped {
    pub body: String,
    pub valid: bool,
}

/// Encode a record body into a frame.
///
/// Wire format:
/// ```text
/// ┌──────┬────────┬──────────────┬──────┬──────────┐
/// │ STX  │ FN     │ Body         │ ETX  │ Checksum │
/// │ 0x02 │ '1'-'7'│ (n bytes)    │ 0x03 │ 2 hex    │
/// └──────┴────────┴──────────────┴──────┴──────────┘
/// ```
///
/// The checksum covers the frame number, the body and ETX.
pub fn encode_frame(
    body: &str,
    frame_number: u8,
    checksum: &dyn ChecksumStrategy,
    dst: &mut BytesMut,
) -> Result<()> {
    if !is_valid_frame_number(frame_number) {
        return Err(FrameError::FrameNumberOutOfRange(frame_number));
    }

    let mut content = BytesMut::with_capacity(body.len() + 2);
    content.put_u8(b'0' + frame_number);
    content.put_slice(body.as_bytes());
    content.put_u8(ETX);
    let cs = checksum.calculate(&content);

    dst.reserve(1 + content.len() + CHECKSUM_LEN);
    dst.put_u8(STX);
    dst.put_slice(&content);
    dst.put_slice(cs.as_bytes());
    Ok(())
}

/// Wrap a record body into a standalone frame.
pub fn wrap_frame(body: &str, frame_number: u8, checksum: &dyn ChecksumStrategy) -> Result<Bytes> {
    let mut dst = BytesMut::new();
    encode_frame(body, frame_number, checksum, &mut dst)?;
    Ok(dst.freeze())
}

/// Decode a single frame, verifying markers and checksum.
///
/// Bytes after the two checksum characters are ignored.
pub fn decode_frame(frame: &[u8], checksum: &dyn ChecksumStrategy) -> Result<DecodedFrame> {
    if frame.is_empty() {
        return Err(FrameError::Empty);
    }
    if frame[0] != STX {
        return Err(FrameError::MissingStart);
    }
    if frame.len() < MIN_FRAME_LEN {
        return Err(FrameError::TooShort {
            len: frame.len(),
            min: MIN_FRAME_LEN,
        });
    }

    // ETX directly after STX leaves no room for the frame number.
    let etx = match frame[1..].iter().position(|b| *b == ETX) {
        Some(offset) if offset >= 1 => offset + 1,
        _ => return Err(FrameError::MissingEnd),
    };
    if frame.len() < etx + 1 + CHECKSUM_LEN {
        return Err(FrameError::TruncatedChecksum);
    }

    let content = &frame[1..=etx];
    let provided = String::from_utf8_lossy(&frame[etx + 1..etx + 1 + CHECKSUM_LEN]);
    if !checksum.verify(content, &provided) {
        return Err(FrameError::ChecksumMismatch {
            expected: checksum.calculate(content),
            provided: provided.into_owned(),
        });
    }

    let digit = frame[1];
    let frame_number = digit.is_ascii_digit().then(|| digit - b'0');
    let body = String::from_utf8_lossy(&frame[2..etx]).into_owned();

    Ok(DecodedFrame { frame_number, body })
}

/// Unwrap a frame into its body text and a validity flag.
pub fn unwrap_frame(frame: &[u8], checksum: &dyn ChecksumStrategy) -> Unwrapped {
    match decode_frame(frame, checksum) {
        Ok(decoded) => Unwrapped {
            body: decoded.body,
            valid: true,
        },
        Err(err) => {
            tracing::trace!(error = %err, "frame rejected");
            Unwrapped::default()
        }
    }
}

/// Configuration for streaming frame extraction.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Maximum bytes held while waiting for a complete frame. Default: 64 KiB.
    pub max_buffered: usize,
    /// How the stream is scanned for frames.
    pub scan: ScanOptions,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_buffered: DEFAULT_MAX_BUFFERED,
            scan: ScanOptions::default(),
        }
    }
}
