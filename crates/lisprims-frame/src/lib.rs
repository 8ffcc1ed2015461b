//! STX/ETX frame transport codec for laboratory instrument links.
//!
//! Every record travels in its own frame:
//! - STX (`0x02`) start marker
//! - a frame number digit cycling `1..=7`
//! - the record text
//! - ETX (`0x03`) end marker
//! - a two-character checksum over frame number, text and ETX
//!
//! The checksum algorithm is pluggable per device profile.

#[cfg(feature = "async")]
pub mod async_codec;
pub mod checksum;
pub mod codec;
pub mod error;
pub mod markers;
pub mod reader;
pub mod scan;

#[cfg(feature = "async")]
pub use async_codec::LisFrameCodec;
pub use checksum::{checksum_for, ChecksumStrategy, DeviceChecksum, DeviceProfile, ModuloSumChecksum};
pub use codec::{
    decode_frame, encode_frame, unwrap_frame, wrap_frame, DecodedFrame, FrameConfig, Unwrapped,
    DEFAULT_MAX_BUFFERED,
};
pub use error::{FrameError, Result};
pub use reader::{FrameReader, StreamItem};
pub use scan::{scan_frames, ScanOptions, ScanOutcome};
