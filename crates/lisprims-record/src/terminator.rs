use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::codec::{FieldReader, FieldWriter};
use crate::enums::TerminationCode;
use crate::kind::RecordKind;
use crate::record::RecordBody;

/// Closes a transmission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Terminator {
    pub sequence_number: u32,
    pub termination_code: Option<TerminationCode>,
    pub error_description: Option<String>,
}

impl Terminator {
    pub fn new(sequence_number: u32) -> Self {
        Self {
            sequence_number,
            ..Self::default()
        }
    }

    /// Terminator reporting an error, with its description.
    pub fn error(sequence_number: u32, description: impl Into<String>) -> Self {
        Self {
            sequence_number,
            termination_code: Some(TerminationCode::Error),
            error_description: Some(description.into()),
        }
    }
}

impl Default for Terminator {
    /// Sequence 1, normal termination.
    fn default() -> Self {
        Self {
            sequence_number: 1,
            termination_code: Some(TerminationCode::Normal),
            error_description: None,
        }
    }
}

impl RecordBody for Terminator {
    const KIND: RecordKind = RecordKind::Terminator;

    fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    fn set_sequence_number(&mut self, sequence_number: u32) {
        self.sequence_number = sequence_number;
    }

    fn write_fields(&self, w: &mut FieldWriter) {
        w.number(self.sequence_number)
            .code(self.termination_code)
            .text(self.error_description.as_deref());
    }

    fn read_fields(r: &FieldReader<'_>) -> Self {
        Self {
            sequence_number: r.sequence(1),
            termination_code: r.code(2),
            error_description: r.text(3),
        }
    }

    fn check(&self, _reference: NaiveDateTime, errors: &mut Vec<String>) {
        if self.termination_code == Some(TerminationCode::Error)
            && self.error_description.as_deref().is_none_or(str::is_empty)
        {
            errors.push("Error description is required when termination code is Error".to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn check(t: &Terminator) -> Vec<String> {
        let reference = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let mut errors = Vec::new();
        t.check(reference, &mut errors);
        errors
    }

    #[test]
    fn default_is_normal_sequence_one() {
        let t = Terminator::default();
        assert_eq!(t.to_body(), "L|1|N");
        assert!(check(&t).is_empty());
    }

    #[test]
    fn parses_code() {
        let t = Terminator::from_body("L|1|F").unwrap();
        assert_eq!(t.termination_code, Some(TerminationCode::Final));
        assert_eq!(Terminator::from_body("L|1").unwrap().termination_code, None);
    }

    #[test]
    fn error_requires_description() {
        let t = Terminator {
            termination_code: Some(TerminationCode::Error),
            ..Terminator::default()
        };
        assert_eq!(check(&t).len(), 1);
        assert!(check(&Terminator::error(1, "analyser jam")).is_empty());
    }
}
