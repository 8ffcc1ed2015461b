//! Typed laboratory records and their positional field codec.
//!
//! A transmission is a sequence of records: one Header, then Patient, Order,
//! Result and Comment records, and a closing Terminator. Each record is a flat
//! list of `|`-separated fields led by a one-character kind tag.
//!
//! Parsing is tolerant: short field lists leave trailing fields unset,
//! unparseable dates and unknown codes read as absent, and unknown kind tags
//! yield no record at all.

pub mod codec;
pub mod comment;
pub mod enums;
pub mod header;
pub mod kind;
pub mod order;
pub mod patient;
pub mod record;
pub mod result;
pub mod terminator;
pub mod timestamp;

pub use codec::{escape, split_fields, unescape, FieldCode, FieldReader, FieldWriter};
pub use comment::Comment;
pub use enums::{ProcessingId, Sex, TerminationCode, COMMENT_SOURCES};
pub use header::{Header, DEFAULT_DELIMITER_DEFINITION, DEFAULT_VERSION};
pub use kind::RecordKind;
pub use order::Order;
pub use patient::Patient;
pub use record::{Record, RecordBody, MAX_SEQUENCE_NUMBER};
pub use result::TestResult;
pub use terminator::Terminator;
pub use timestamp::{format_timestamp, parse_timestamp, TIMESTAMP_FORMAT};
