use chrono::NaiveDateTime;
use lisprims_frame::markers::FIELD_SEPARATOR;
use serde::{Deserialize, Serialize};

use crate::codec::{FieldReader, FieldWriter};
use crate::enums::ProcessingId;
use crate::kind::RecordKind;
use crate::record::RecordBody;

/// Field, repeat, component and escape delimiters as sent in the header.
pub const DEFAULT_DELIMITER_DEFINITION: &str = "|\\^&";

/// Version number stamped by [`Header::new`].
pub const DEFAULT_VERSION: &str = "LIS2-A2";

/// Opens a transmission and identifies sender, receiver and delimiters.
///
/// The header carries no sequence number on the wire; parsed headers get 1
/// whatever was set before serializing.
/// The delimiter definition is sent unescaped directly after the `H` tag,
/// its leading `|` doubling as the first field separator. A definition that
/// does not start with `|` fails [`check`](RecordBody::check) and would come
/// back with one prepended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Header {
    pub sequence_number: u32,
    pub delimiter_definition: Option<String>,
    pub message_control_id: Option<String>,
    pub access_password: Option<String>,
    pub sender_id: Option<String>,
    pub sender_address: Option<String>,
    pub reserved: Option<String>,
    pub sender_phone: Option<String>,
    pub sender_characteristics: Option<String>,
    pub receiver_id: Option<String>,
    pub comment: Option<String>,
    pub processing_id: Option<ProcessingId>,
    pub version: Option<String>,
    pub timestamp: Option<NaiveDateTime>,
}

impl Header {
    /// Header for a message created at `timestamp`, with default delimiters,
    /// production processing and the default version number.
    pub fn new(timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp: Some(timestamp),
            ..Self::default()
        }
    }

    pub fn with_sender(mut self, sender_id: impl Into<String>) -> Self {
        self.sender_id = Some(sender_id.into());
        self
    }

    pub fn with_receiver(mut self, receiver_id: impl Into<String>) -> Self {
        self.receiver_id = Some(receiver_id.into());
        self
    }

    pub fn with_message_control_id(mut self, id: impl Into<String>) -> Self {
        self.message_control_id = Some(id.into());
        self
    }
}

impl Default for Header {
    /// Sequence 1, default delimiters, production, default version, no timestamp.
    fn default() -> Self {
        Self {
            sequence_number: 1,
            delimiter_definition: Some(DEFAULT_DELIMITER_DEFINITION.to_string()),
            message_control_id: None,
            access_password: None,
            sender_id: None,
            sender_address: None,
            reserved: None,
            sender_phone: None,
            sender_characteristics: None,
            receiver_id: None,
            comment: None,
            processing_id: Some(ProcessingId::Production),
            version: Some(DEFAULT_VERSION.to_string()),
            timestamp: None,
        }
    }
}

impl RecordBody for Header {
    const KIND: RecordKind = RecordKind::Header;

    fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    fn set_sequence_number(&mut self, sequence_number: u32) {
        self.sequence_number = sequence_number;
    }

    fn write_fields(&self, w: &mut FieldWriter) {
        let delimiters = self.delimiter_definition.as_deref().unwrap_or_default();
        w.raw(delimiters.strip_prefix(FIELD_SEPARATOR).unwrap_or(delimiters))
            .text(self.message_control_id.as_deref())
            .text(self.access_password.as_deref())
            .text(self.sender_id.as_deref())
            .text(self.sender_address.as_deref())
            .text(self.reserved.as_deref())
            .text(self.sender_phone.as_deref())
            .text(self.sender_characteristics.as_deref())
            .text(self.receiver_id.as_deref())
            .text(self.comment.as_deref())
            .code(self.processing_id)
            .text(self.version.as_deref())
            .timestamp(self.timestamp.as_ref());
    }

    fn read_fields(r: &FieldReader<'_>) -> Self {
        Self {
            sequence_number: 1,
            delimiter_definition: r.raw(1).map(|d| format!("{FIELD_SEPARATOR}{d}")),
            message_control_id: r.text(2),
            access_password: r.text(3),
            sender_id: r.text(4),
            sender_address: r.text(5),
            reserved: r.text(6),
            sender_phone: r.text(7),
            sender_characteristics: r.text(8),
            receiver_id: r.text(9),
            comment: r.text(10),
            processing_id: r.code(11),
            version: r.text(12),
            timestamp: r.timestamp(13),
        }
    }

    fn check(&self, _reference: NaiveDateTime, errors: &mut Vec<String>) {
        match self.delimiter_definition.as_deref() {
            None | Some("") => errors.push("Delimiter definition is required".to_string()),
            Some(d) if d.chars().count() < 4 => {
                errors.push("Delimiter definition must be at least 4 characters".to_string())
            }
            Some(d) if !d.starts_with(FIELD_SEPARATOR) => {
                errors.push(format!("Delimiter definition must start with '{FIELD_SEPARATOR}'"))
            }
            Some(_) => {}
        }
        if self.version.as_deref().is_none_or(str::is_empty) {
            errors.push("Version number is required".to_string());
        }
    }
}
