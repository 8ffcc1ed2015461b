//! Protocol variants over framed laboratory records.
//!
//! A [`Protocol`] ties the frame codec, the record model and the validation
//! engine together. Its [`ProtocolVariant`] decides how bad checksums are
//! handled, whether ENQ/EOT session markers wrap a transmission, and which
//! sequence-level checks validation runs.
//!
//! ```no_run
//! use lisprims_protocol::{Protocol, ProtocolVariant};
//!
//! let protocol = Protocol::builder()
//!     .variant(ProtocolVariant::Session)
//!     .strict(false)
//!     .build();
//! let records = protocol.parse(b"\x05\r\n\x04")?;
//! let report = protocol.validate(&records);
//! # Ok::<(), lisprims_protocol::ProtocolError>(())
//! ```

pub mod config;
pub mod error;
pub mod protocol;

pub use config::{ChecksumPolicy, Policy, ProtocolConfig, ProtocolVariant};
pub use error::{ProtocolError, Result};
pub use protocol::{Protocol, ProtocolBuilder};

pub use tokio_util::sync::CancellationToken;
