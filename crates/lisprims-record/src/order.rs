use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::codec::{FieldReader, FieldWriter};
use crate::kind::RecordKind;
use crate::record::RecordBody;

/// A test order for one specimen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Order {
    pub sequence_number: u32,
    pub specimen_id: Option<String>,
    pub instrument_specimen_id: Option<String>,
    pub universal_test_id: Option<String>,
    pub priority: Option<String>,
    pub requested_at: Option<NaiveDateTime>,
    pub collected_at: Option<NaiveDateTime>,
    pub collection_end_time: Option<String>,
    pub collection_volume: Option<String>,
    pub collector_id: Option<String>,
    pub action_code: Option<String>,
    pub danger_code: Option<String>,
    pub clinical_info: Option<String>,
    pub received_at: Option<NaiveDateTime>,
    pub specimen_descriptor: Option<String>,
    pub ordering_physician: Option<String>,
    pub physician_phone: Option<String>,
    pub user_field_1: Option<String>,
    pub user_field_2: Option<String>,
    pub lab_field_1: Option<String>,
    pub lab_field_2: Option<String>,
    pub reported_at: Option<NaiveDateTime>,
    pub instrument_charge: Option<String>,
    pub instrument_section_id: Option<String>,
    pub report_types: Option<String>,
}

impl Order {
    pub fn new(
        sequence_number: u32,
        specimen_id: impl Into<String>,
        universal_test_id: impl Into<String>,
    ) -> Self {
        Self {
            sequence_number,
            specimen_id: Some(specimen_id.into()),
            universal_test_id: Some(universal_test_id.into()),
            ..Self::default()
        }
    }
}

impl Default for Order {
    fn default() -> Self {
        Self {
            sequence_number: 1,
            specimen_id: None,
            instrument_specimen_id: None,
            universal_test_id: None,
            priority: None,
            requested_at: None,
            collected_at: None,
            collection_end_time: None,
            collection_volume: None,
            collector_id: None,
            action_code: None,
            danger_code: None,
            clinical_info: None,
            received_at: None,
            specimen_descriptor: None,
            ordering_physician: None,
            physician_phone: None,
            user_field_1: None,
            user_field_2: None,
            lab_field_1: None,
            lab_field_2: None,
            reported_at: None,
            instrument_charge: None,
            instrument_section_id: None,
            report_types: None,
        }
    }
}

impl RecordBody for Order {
    const KIND: RecordKind = RecordKind::Order;

    fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    fn set_sequence_number(&mut self, sequence_number: u32) {
        self.sequence_number = sequence_number;
    }

    fn write_fields(&self, w: &mut FieldWriter) {
        w.number(self.sequence_number)
            .text(self.specimen_id.as_deref())
            .text(self.instrument_specimen_id.as_deref())
            .text(self.universal_test_id.as_deref())
            .text(self.priority.as_deref())
            .timestamp(self.requested_at.as_ref())
            .timestamp(self.collected_at.as_ref())
            .text(self.collection_end_time.as_deref())
            .text(self.collection_volume.as_deref())
            .text(self.collector_id.as_deref())
            .text(self.action_code.as_deref())
            .text(self.danger_code.as_deref())
            .text(self.clinical_info.as_deref())
            .timestamp(self.received_at.as_ref())
            .text(self.specimen_descriptor.as_deref())
            .text(self.ordering_physician.as_deref())
            .text(self.physician_phone.as_deref())
            .text(self.user_field_1.as_deref())
            .text(self.user_field_2.as_deref())
            .text(self.lab_field_1.as_deref())
            .text(self.lab_field_2.as_deref())
            .timestamp(self.reported_at.as_ref())
            .text(self.instrument_charge.as_deref())
            .text(self.instrument_section_id.as_deref())
            .text(self.report_types.as_deref());
    }

    fn read_fields(r: &FieldReader<'_>) -> Self {
        Self {
            sequence_number: r.sequence(1),
            specimen_id: r.text(2),
            instrument_specimen_id: r.text(3),
            universal_test_id: r.text(4),
            priority: r.text(5),
            requested_at: r.timestamp(6),
            collected_at: r.timestamp(7),
            collection_end_time: r.text(8),
            collection_volume: r.text(9),
            collector_id: r.text(10),
            action_code: r.text(11),
            danger_code: r.text(12),
            clinical_info: r.text(13),
            received_at: r.timestamp(14),
            specimen_descriptor: r.text(15),
            ordering_physician: r.text(16),
            physician_phone: r.text(17),
            user_field_1: r.text(18),
            user_field_2: r.text(19),
            lab_field_1: r.text(20),
            lab_field_2: r.text(21),
            reported_at: r.timestamp(22),
            instrument_charge: r.text(23),
            instrument_section_id: r.text(24),
            report_types: r.text(25),
        }
    }

    fn check(&self, _reference: NaiveDateTime, errors: &mut Vec<String>) {
        if self.specimen_id.as_deref().is_none_or(str::is_empty) {
            errors.push("Specimen ID is required".to_string());
        }
        if self.universal_test_id.as_deref().is_none_or(str::is_empty) {
            errors.push("Universal test ID is required".to_string());
        }
        if let (Some(requested), Some(collected)) = (self.requested_at, self.collected_at) {
            if requested > collected {
                errors.push("Requested date/time cannot be after collection date/time".to_string());
            }
        }
        if let (Some(collected), Some(received)) = (self.collected_at, self.received_at) {
            if collected > received {
                errors.push("Collection date/time cannot be after received date/time".to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 30)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn errors_for(order: &Order) -> Vec<String> {
        let mut errors = Vec::new();
        order.check(at(23), &mut errors);
        errors
    }

    #[test]
    fn parses_instrument_order() {
        let o = Order::from_body("O|1|S-100||^^^GLU\u{1E}^^^NA|R|20240530070000|20240530080000|||||||20240530090000").unwrap();
        assert_eq!(o.specimen_id.as_deref(), Some("S-100"));
        assert_eq!(o.universal_test_id.as_deref(), Some("^^^GLU\u{1E}^^^NA"));
        assert_eq!(o.priority.as_deref(), Some("R"));
        assert_eq!(o.requested_at, Some(at(7)));
        assert_eq!(o.collected_at, Some(at(8)));
        assert_eq!(o.received_at, Some(at(9)));
    }

    #[test]
    fn required_fields() {
        assert_eq!(
            errors_for(&Order::default()),
            vec![
                "Specimen ID is required".to_string(),
                "Universal test ID is required".to_string()
            ]
        );
        assert!(errors_for(&Order::new(1, "S-1", "^^^GLU")).is_empty());
    }

    #[test]
    fn timestamps_must_be_chronological() {
        let order = Order {
            requested_at: Some(at(9)),
            collected_at: Some(at(8)),
            received_at: Some(at(7)),
            ..Order::new(1, "S-1", "^^^GLU")
        };
        assert_eq!(
            errors_for(&order),
            vec![
                "Requested date/time cannot be after collection date/time".to_string(),
                "Collection date/time cannot be after received date/time".to_string()
            ]
        );
    }

    #[test]
    fn partial_timestamps_not_compared() {
        let order = Order {
            requested_at: Some(at(9)),
            received_at: Some(at(7)),
            ..Order::new(1, "S-1", "^^^GLU")
        };
        assert!(errors_for(&order).is_empty());
    }
}
