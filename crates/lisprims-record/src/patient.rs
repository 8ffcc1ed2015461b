use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::codec::{FieldReader, FieldWriter};
use crate::enums::Sex;
use crate::kind::RecordKind;
use crate::record::RecordBody;

/// Patient demographics preceding that patient's orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Patient {
    pub sequence_number: u32,
    pub practice_patient_id: Option<String>,
    pub laboratory_patient_id: Option<String>,
    pub patient_id_3: Option<String>,
    pub name: Option<String>,
    pub mothers_maiden_name: Option<String>,
    pub birth_date: Option<NaiveDateTime>,
    pub sex: Option<Sex>,
    pub race: Option<String>,
    pub address: Option<String>,
    pub reserved: Option<String>,
    pub phone: Option<String>,
    pub attending_physician: Option<String>,
    pub special_field_1: Option<String>,
    pub special_field_2: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub diagnosis: Option<String>,
    pub medications: Option<String>,
    pub diet: Option<String>,
    pub practice_field_1: Option<String>,
    pub practice_field_2: Option<String>,
    pub admission_dates: Option<String>,
    pub admission_status: Option<String>,
    pub location: Option<String>,
}

impl Patient {
    pub fn new(sequence_number: u32) -> Self {
        Self {
            sequence_number,
            ..Self::default()
        }
    }

    pub fn with_laboratory_id(mut self, id: impl Into<String>) -> Self {
        self.laboratory_patient_id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl Default for Patient {
    fn default() -> Self {
        Self {
            sequence_number: 1,
            practice_patient_id: None,
            laboratory_patient_id: None,
            patient_id_3: None,
            name: None,
            mothers_maiden_name: None,
            birth_date: None,
            sex: None,
            race: None,
            address: None,
            reserved: None,
            phone: None,
            attending_physician: None,
            special_field_1: None,
            special_field_2: None,
            height: None,
            weight: None,
            diagnosis: None,
            medications: None,
            diet: None,
            practice_field_1: None,
            practice_field_2: None,
            admission_dates: None,
            admission_status: None,
            location: None,
        }
    }
}

impl RecordBody for Patient {
    const KIND: RecordKind = RecordKind::Patient;

    fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    fn set_sequence_number(&mut self, sequence_number: u32) {
        self.sequence_number = sequence_number;
    }

    fn write_fields(&self, w: &mut FieldWriter) {
        w.number(self.sequence_number)
            .text(self.practice_patient_id.as_deref())
            .text(self.laboratory_patient_id.as_deref())
            .text(self.patient_id_3.as_deref())
            .text(self.name.as_deref())
            .text(self.mothers_maiden_name.as_deref())
            .timestamp(self.birth_date.as_ref())
            .code(self.sex)
            .text(self.race.as_deref())
            .text(self.address.as_deref())
            .text(self.reserved.as_deref())
            .text(self.phone.as_deref())
            .text(self.attending_physician.as_deref())
            .text(self.special_field_1.as_deref())
            .text(self.special_field_2.as_deref())
            .text(self.height.as_deref())
            .text(self.weight.as_deref())
            .text(self.diagnosis.as_deref())
            .text(self.medications.as_deref())
            .text(self.diet.as_deref())
            .text(self.practice_field_1.as_deref())
            .text(self.practice_field_2.as_deref())
            .text(self.admission_dates.as_deref())
            .text(self.admission_status.as_deref())
            .text(self.location.as_deref());
    }

    fn read_fields(r: &FieldReader<'_>) -> Self {
        Self {
            sequence_number: r.sequence(1),
            practice_patient_id: r.text(2),
            laboratory_patient_id: r.text(3),
            patient_id_3: r.text(4),
            name: r.text(5),
            mothers_maiden_name: r.text(6),
            birth_date: r.timestamp(7),
            sex: r.code(8),
            race: r.text(9),
            address: r.text(10),
            reserved: r.text(11),
            phone: r.text(12),
            attending_physician: r.text(13),
            special_field_1: r.text(14),
            special_field_2: r.text(15),
            height: r.text(16),
            weight: r.text(17),
            diagnosis: r.text(18),
            medications: r.text(19),
            diet: r.text(20),
            practice_field_1: r.text(21),
            practice_field_2: r.text(22),
            admission_dates: r.text(23),
            admission_status: r.text(24),
            location: r.text(25),
        }
    }

    fn check(&self, reference: NaiveDateTime, errors: &mut Vec<String>) {
        let has_id = [
            &self.practice_patient_id,
            &self.laboratory_patient_id,
            &self.patient_id_3,
        ]
        .iter()
        .any(|id| id.as_deref().is_some_and(|v| !v.is_empty()));
        if !has_id {
            errors.push("At least one patient identifier is required".to_string());
        }

        if let Some(birth_date) = self.birth_date {
            if birth_date > reference {
                errors.push("Birth date cannot be in the future".to_string());
            }
        }
    }
}
