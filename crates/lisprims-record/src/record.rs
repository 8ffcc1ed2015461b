use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::codec::{FieldReader, FieldWriter};
use crate::comment::Comment;
use crate::header::Header;
use crate::kind::RecordKind;
use crate::order::Order;
use crate::patient::Patient;
use crate::result::TestResult;
use crate::terminator::Terminator;

/// Highest sequence number a record may carry.
pub const MAX_SEQUENCE_NUMBER: u32 = 999_999;

/// Per-kind payload: positional layout and kind-specific validation.
pub trait RecordBody: Sized {
    const KIND: RecordKind;

    fn sequence_number(&self) -> u32;

    fn set_sequence_number(&mut self, sequence_number: u32);

    /// Append every field after the kind tag, in wire order.
    fn write_fields(&self, writer: &mut FieldWriter);

    /// Build from a split body whose first field is the kind tag.
    fn read_fields(reader: &FieldReader<'_>) -> Self;

    /// Kind-specific structural errors, beyond the sequence number range.
    fn check(&self, reference: NaiveDateTime, errors: &mut Vec<String>);

    /// Serialize to body text.
    fn to_body(&self) -> String {
        let mut writer = FieldWriter::new(Self::KIND);
        self.write_fields(&mut writer);
        writer.finish()
    }

    /// Parse body text, or `None` if it does not carry this kind's tag.
    fn from_body(body: &str) -> Option<Self> {
        let reader = FieldReader::new(body);
        let tag = reader.raw(0)?;
        let mut chars = tag.chars();
        if chars.next() != Some(Self::KIND.tag()) || chars.next().is_some() {
            return None;
        }
        Some(Self::read_fields(&reader))
    }
}

/// A typed laboratory record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    Header(Header),
    Patient(Patient),
    Order(Order),
    Result(TestResult),
    Comment(Comment),
    Terminator(Terminator),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Header(_) => RecordKind::Header,
            Record::Patient(_) => RecordKind::Patient,
            Record::Order(_) => RecordKind::Order,
            Record::Result(_) => RecordKind::Result,
            Record::Comment(_) => RecordKind::Comment,
            Record::Terminator(_) => RecordKind::Terminator,
        }
    }

    pub fn sequence_number(&self) -> u32 {
        match self {
            Record::Header(r) => r.sequence_number(),
            Record::Patient(r) => r.sequence_number(),
            Record::Order(r) => r.sequence_number(),
            Record::Result(r) => r.sequence_number(),
            Record::Comment(r) => r.sequence_number(),
            Record::Terminator(r) => r.sequence_number(),
        }
    }

    pub fn set_sequence_number(&mut self, sequence_number: u32) {
        match self {
            Record::Header(r) => r.set_sequence_number(sequence_number),
            Record::Patient(r) => r.set_sequence_number(sequence_number),
            Record::Order(r) => r.set_sequence_number(sequence_number),
            Record::Result(r) => r.set_sequence_number(sequence_number),
            Record::Comment(r) => r.set_sequence_number(sequence_number),
            Record::Terminator(r) => r.set_sequence_number(sequence_number),
        }
    }

    /// Serialize to field-joined body text.
    pub fn serialize(&self) -> String {
        match self {
            Record::Header(r) => r.to_body(),
            Record::Patient(r) => r.to_body(),
            Record::Order(r) => r.to_body(),
            Record::Result(r) => r.to_body(),
            Record::Comment(r) => r.to_body(),
            Record::Terminator(r) => r.to_body(),
        }
    }

    /// Parse body text, dispatching on its leading character.
    ///
    /// Unknown or missing kind tags yield `None`; the body is dropped.
    pub fn parse(body: &str) -> Option<Record> {
        let Some(tag) = body.chars().next() else {
            tracing::debug!("dropping empty record body");
            return None;
        };
        let Some(kind) = RecordKind::from_tag(tag) else {
            tracing::debug!(%tag, "dropping record with unknown kind");
            return None;
        };

        let reader = FieldReader::new(body);
        let record = match kind {
            RecordKind::Header => Record::Header(Header::read_fields(&reader)),
            RecordKind::Patient => Record::Patient(Patient::read_fields(&reader)),
            RecordKind::Order => Record::Order(Order::read_fields(&reader)),
            RecordKind::Result => Record::Result(TestResult::read_fields(&reader)),
            RecordKind::Comment => Record::Comment(Comment::read_fields(&reader)),
            RecordKind::Terminator => Record::Terminator(Terminator::read_fields(&reader)),
        };
        Some(record)
    }

    /// Structural errors, judging dates against `reference`.
    pub fn validate_at(&self, reference: NaiveDateTime) -> Vec<String> {
        let mut errors = Vec::new();
        let sequence_number = self.sequence_number();
        if sequence_number > MAX_SEQUENCE_NUMBER {
            errors.push(format!(
                "Sequence number {sequence_number} is out of range (0-{MAX_SEQUENCE_NUMBER})"
            ));
        }

        match self {
            Record::Header(r) => r.check(reference, &mut errors),
            Record::Patient(r) => r.check(reference, &mut errors),
            Record::Order(r) => r.check(reference, &mut errors),
            Record::Result(r) => r.check(reference, &mut errors),
            Record::Comment(r) => r.check(reference, &mut errors),
            Record::Terminator(r) => r.check(reference, &mut errors),
        }
        errors
    }

    /// Structural errors, judging dates against the local clock.
    pub fn validate(&self) -> Vec<String> {
        self.validate_at(chrono::Local::now().naive_local())
    }
}

macro_rules! impl_from_body {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Record {
                fn from(value: $ty) -> Self {
                    Record::$variant(value)
                }
            }
        )*
    };
}

impl_from_body!(
    Header => Header,
    Patient => Patient,
    Order => Order,
    Result => TestResult,
    Comment => Comment,
    Terminator => Terminator,
);
