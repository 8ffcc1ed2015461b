//! Field escaping and positional field access.
//!
//! A record body is its kind tag followed by field values joined with `|`.
//! Reserved characters inside values are replaced by escape sequences:
//!
//! | Character | Sequence |
//! |---|---|
//! | `\` | `\E\` |
//! | `|` | `\F\` |
//! | component (GS) | `\S\` |
//! | repeat (RS) | `\R\` |
//! | CR | `\X0D\` |
//! | LF | `\X0A\` |

use chrono::NaiveDateTime;
use lisprims_frame::markers::{COMPONENT_SEPARATOR, ESCAPE_CHAR, FIELD_SEPARATOR, REPEAT_SEPARATOR};

use crate::kind::RecordKind;
use crate::timestamp::{format_timestamp, parse_timestamp};

const ESCAPE_SEQUENCES: [(&str, char); 6] = [
    ("\\E\\", ESCAPE_CHAR),
    ("\\F\\", FIELD_SEPARATOR),
    ("\\S\\", COMPONENT_SEPARATOR),
    ("\\R\\", REPEAT_SEPARATOR),
    ("\\X0D\\", '\r'),
    ("\\X0A\\", '\n'),
];

/// Escape reserved characters in a field value.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            ESCAPE_CHAR => out.push_str("\\E\\"),
            FIELD_SEPARATOR => out.push_str("\\F\\"),
            COMPONENT_SEPARATOR => out.push_str("\\S\\"),
            REPEAT_SEPARATOR => out.push_str("\\R\\"),
            '\r' => out.push_str("\\X0D\\"),
            '\n' => out.push_str("\\X0A\\"),
            other => out.push(other),
        }
    }
    out
}

/// Reverse [`escape`].
///
/// Sequences are recognised in a single left-to-right pass, so a restored
/// escape character never starts a second substitution. Unknown sequences are
/// kept verbatim.
pub fn unescape(value: &str) -> String {
    if !value.contains(ESCAPE_CHAR) {
        return value.to_string();
    }

    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(idx) = rest.find(ESCAPE_CHAR) {
        out.push_str(&rest[..idx]);
        rest = &rest[idx..];
        match ESCAPE_SEQUENCES
            .iter()
            .find(|(seq, _)| rest.starts_with(seq))
        {
            Some((seq, ch)) => {
                out.push(*ch);
                rest = &rest[seq.len()..];
            }
            None => {
                out.push(ESCAPE_CHAR);
                rest = &rest[ESCAPE_CHAR.len_utf8()..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Split a record body on the field separator.
pub fn split_fields(body: &str) -> Vec<&str> {
    body.split(FIELD_SEPARATOR).collect()
}

/// Builds a record body one positional field at a time.
///
/// Trailing empty fields are dropped on [`finish`](Self::finish).
#[derive(Debug)]
pub struct FieldWriter {
    fields: Vec<String>,
}

impl FieldWriter {
    pub fn new(kind: RecordKind) -> Self {
        Self {
            fields: vec![kind.tag().to_string()],
        }
    }

    /// Append a value without escaping.
    pub fn raw(&mut self, value: &str) -> &mut Self {
        self.fields.push(value.to_string());
        self
    }

    pub fn text(&mut self, value: Option<&str>) -> &mut Self {
        self.fields.push(value.map(escape).unwrap_or_default());
        self
    }

    pub fn number(&mut self, value: u32) -> &mut Self {
        self.fields.push(value.to_string());
        self
    }

    pub fn timestamp(&mut self, value: Option<&NaiveDateTime>) -> &mut Self {
        self.fields.push(value.map(format_timestamp).unwrap_or_default());
        self
    }

    pub fn code<C: FieldCode>(&mut self, value: Option<C>) -> &mut Self {
        self.fields
            .push(value.map(|c| c.code().to_string()).unwrap_or_default());
        self
    }

    pub fn finish(mut self) -> String {
        while self.fields.len() > 1 && self.fields.last().is_some_and(|f| f.is_empty()) {
            self.fields.pop();
        }
        let separator = FIELD_SEPARATOR.to_string();
        self.fields.join(separator.as_str())
    }
}

/// Positional access to a split record body.
///
/// Indices past the end and empty fields read as absent.
#[derive(Debug)]
pub struct FieldReader<'a> {
    fields: Vec<&'a str>,
}

impl<'a> FieldReader<'a> {
    pub fn new(body: &'a str) -> Self {
        Self {
            fields: split_fields(body),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field value as transmitted, without unescaping.
    ///
    /// Empty and missing fields both read as `None`: the wire has no way to
    /// tell an empty value from an absent one, so `Some("")` never comes back.
    pub fn raw(&self, index: usize) -> Option<&'a str> {
        self.fields.get(index).copied().filter(|f| !f.is_empty())
    }

    pub fn text(&self, index: usize) -> Option<String> {
        self.raw(index).map(unescape)
    }

    /// Sequence number field; absent or unparseable values read as 0.
    pub fn sequence(&self, index: usize) -> u32 {
        match self.raw(index) {
            Some(value) => value.trim().parse().unwrap_or_else(|_| {
                tracing::debug!(field = index, value, "unparseable sequence number");
                0
            }),
            None => 0,
        }
    }

    /// Timestamp field; unparseable values are ignored.
    pub fn timestamp(&self, index: usize) -> Option<NaiveDateTime> {
        let value = self.raw(index)?;
        let parsed = parse_timestamp(value);
        if parsed.is_none() {
            tracing::debug!(field = index, value, "ignoring unparseable timestamp");
        }
        parsed
    }

    /// Closed-set code field; unknown codes are ignored.
    pub fn code<C: FieldCode>(&self, index: usize) -> Option<C> {
        let value = self.raw(index)?;
        let parsed = C::from_code(value);
        if parsed.is_none() {
            tracing::debug!(field = index, value, "ignoring unknown code");
        }
        parsed
    }
}

/// A closed enumeration transmitted as a short code.
pub trait FieldCode: Copy + Sized {
    fn code(self) -> &'static str;
    fn from_code(code: &str) -> Option<Self>;
}
