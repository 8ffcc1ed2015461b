use lisprims_frame::FrameError;

/// Errors raised by protocol operations.
///
/// Data-quality problems never surface here: they are either dropped during
/// parsing or collected by validation.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Frame-level precondition violation (e.g. frame number out of range).
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// A frame failed checksum verification under an aborting policy.
    #[error("checksum failure in frame {frame_index}: {source}")]
    Checksum {
        frame_index: usize,
        #[source]
        source: FrameError,
    },

    /// No checksum strategy was supplied.
    #[error("a checksum strategy is required")]
    MissingChecksumStrategy,

    /// The operation observed a cancellation request.
    #[error("operation cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, ProtocolError>;
