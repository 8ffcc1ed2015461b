/// Errors that can occur during frame wrapping, unwrapping and stream reads.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// Frame numbers cycle through 1..=7; anything else is a caller bug.
    #[error("frame number {0} out of range (expected 1..=7)")]
    FrameNumberOutOfRange(u8),

    /// The frame buffer is empty.
    #[error("frame is empty")]
    Empty,

    /// The frame does not begin with the STX start marker.
    #[error("frame does not start with STX")]
    MissingStart,

    /// The frame is shorter than the minimum wire size.
    #[error("frame too short ({len} bytes, min {min})")]
    TooShort { len: usize, min: usize },

    /// No ETX end marker was found after the frame number.
    #[error("frame has no ETX end marker")]
    MissingEnd,

    /// Fewer than two checksum characters follow the end marker.
    #[error("frame checksum truncated")]
    TruncatedChecksum,

    /// The transmitted checksum does not match the computed one.
    #[error("checksum mismatch (expected {expected}, got {provided})")]
    ChecksumMismatch { expected: String, provided: String },

    /// Buffered bytes exceeded the configured limit without yielding a frame.
    #[error("frame buffer overflow ({size} bytes, max {max})")]
    BufferOverflow { size: usize, max: usize },

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream was closed before a complete frame was received.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, FrameError>;
