//! Laboratory instrument framing, records and validation.
//!
//! lisprims speaks the line protocol used between clinical analysers and
//! laboratory information systems: checksummed STX/ETX frames, each carrying
//! one `|`-separated record, optionally wrapped in an ENQ/EOT session.
//!
//! # Crate Structure
//!
//! - [`frame`]: Frame codec, checksum strategies and stream reader
//! - [`record`]: Typed records and the field escaping codec
//! - [`validate`]: Structural validation of record sequences
//! - [`protocol`]: Protocol variants tying the layers together
//!
//! The most used types are also re-exported at the crate root.

/// Re-export frame types.
pub mod frame {
    pub use lisprims_frame::*;
}

/// Re-export record types.
pub mod record {
    pub use lisprims_record::*;
}

/// Re-export validation types.
pub mod validate {
    pub use lisprims_validate::*;
}

/// Re-export protocol types.
pub mod protocol {
    pub use lisprims_protocol::*;
}

pub use lisprims_frame::{ChecksumStrategy, DeviceProfile};
pub use lisprims_protocol::{
    CancellationToken, Protocol, ProtocolBuilder, ProtocolConfig, ProtocolError, ProtocolVariant,
};
pub use lisprims_record::{Record, RecordKind};
pub use lisprims_validate::ValidationResult;
