use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::codec::{FieldReader, FieldWriter};
use crate::enums::COMMENT_SOURCES;
use crate::kind::RecordKind;
use crate::record::RecordBody;

/// Free text attached to the preceding record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    pub sequence_number: u32,
    /// `P` (practice) or `L` (laboratory); kept as text so invalid sources
    /// survive parsing and surface in validation.
    pub source: Option<String>,
    pub text: Option<String>,
    pub comment_type: Option<String>,
}

impl Comment {
    pub fn new(sequence_number: u32, source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sequence_number,
            source: Some(source.into()),
            text: Some(text.into()),
            comment_type: None,
        }
    }
}

impl Default for Comment {
    fn default() -> Self {
        Self {
            sequence_number: 1,
            source: None,
            text: None,
            comment_type: None,
        }
    }
}

impl RecordBody for Comment {
    const KIND: RecordKind = RecordKind::Comment;

    fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    fn set_sequence_number(&mut self, sequence_number: u32) {
        self.sequence_number = sequence_number;
    }

    fn write_fields(&self, w: &mut FieldWriter) {
        w.number(self.sequence_number)
            .text(self.source.as_deref())
            .text(self.text.as_deref())
            .text(self.comment_type.as_deref());
    }

    fn read_fields(r: &FieldReader<'_>) -> Self {
        Self {
            sequence_number: r.sequence(1),
            source: r.text(2),
            text: r.text(3),
            comment_type: r.text(4),
        }
    }

    fn check(&self, _reference: NaiveDateTime, errors: &mut Vec<String>) {
        if self.text.as_deref().is_none_or(str::is_empty) {
            errors.push("Comment text is required".to_string());
        }
        if let Some(source) = self.source.as_deref() {
            if !COMMENT_SOURCES
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(source))
            {
                errors.push(format!("Comment source '{source}' must be 'P' or 'L'"));
            }
        }
    }
}
