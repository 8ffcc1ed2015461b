use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::codec::{FieldReader, FieldWriter};
use crate::kind::RecordKind;
use crate::record::RecordBody;

/// One measured value for an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestResult {
    pub sequence_number: u32,
    pub universal_test_id: Option<String>,
    pub data_value: Option<String>,
    pub units: Option<String>,
    pub reference_ranges: Option<String>,
    pub abnormal_flags: Option<String>,
    pub abnormality_nature: Option<String>,
    pub result_status: Option<String>,
    pub normative_change_date: Option<String>,
    pub operator_id: Option<String>,
    pub started_at: Option<NaiveDateTime>,
    pub completed_at: Option<NaiveDateTime>,
    pub instrument_id: Option<String>,
}

impl TestResult {
    pub fn new(
        sequence_number: u32,
        universal_test_id: impl Into<String>,
        data_value: impl Into<String>,
    ) -> Self {
        Self {
            sequence_number,
            universal_test_id: Some(universal_test_id.into()),
            data_value: Some(data_value.into()),
            ..Self::default()
        }
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }
}

impl Default for TestResult {
    fn default() -> Self {
        Self {
            sequence_number: 1,
            universal_test_id: None,
            data_value: None,
            units: None,
            reference_ranges: None,
            abnormal_flags: None,
            abnormality_nature: None,
            result_status: None,
            normative_change_date: None,
            operator_id: None,
            started_at: None,
            completed_at: None,
            instrument_id: None,
        }
    }
}

impl RecordBody for TestResult {
    const KIND: RecordKind = RecordKind::Result;

    fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    fn set_sequence_number(&mut self, sequence_number: u32) {
        self.sequence_number = sequence_number;
    }

    fn write_fields(&self, w: &mut FieldWriter) {
        w.number(self.sequence_number)
            .text(self.universal_test_id.as_deref())
            .text(self.data_value.as_deref())
            .text(self.units.as_deref())
            .text(self.reference_ranges.as_deref())
            .text(self.abnormal_flags.as_deref())
            .text(self.abnormality_nature.as_deref())
            .text(self.result_status.as_deref())
            .text(self.normative_change_date.as_deref())
            .text(self.operator_id.as_deref())
            .timestamp(self.started_at.as_ref())
            .timestamp(self.completed_at.as_ref())
            .text(self.instrument_id.as_deref());
    }

    fn read_fields(r: &FieldReader<'_>) -> Self {
        Self {
            sequence_number: r.sequence(1),
            universal_test_id: r.text(2),
            data_value: r.text(3),
            units: r.text(4),
            reference_ranges: r.text(5),
            abnormal_flags: r.text(6),
            abnormality_nature: r.text(7),
            result_status: r.text(8),
            normative_change_date: r.text(9),
            operator_id: r.text(10),
            started_at: r.timestamp(11),
            completed_at: r.timestamp(12),
            instrument_id: r.text(13),
        }
    }

    fn check(&self, _reference: NaiveDateTime, errors: &mut Vec<String>) {
        if self.universal_test_id.as_deref().is_none_or(str::is_empty) {
            errors.push("Universal test ID is required".to_string());
        }
        if self.data_value.as_deref().is_none_or(str::is_empty) {
            errors.push("Data value is required".to_string());
        }
        if let (Some(started), Some(completed)) = (self.started_at, self.completed_at) {
            if started > completed {
                errors.push("Test start date/time cannot be after completion date/time".to_string());
            }
        }
    }
}
