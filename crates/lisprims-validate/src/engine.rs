use chrono::NaiveDateTime;
use lisprims_record::{Record, RecordKind};

use crate::result::ValidationResult;
use crate::rules::{Severity, ValidationRules};

/// Validate a record sequence against `rules`, judging dates against `reference`.
///
/// Never fails: every problem found is collected into the result.
pub fn validate_records(
    records: &[Record],
    rules: &ValidationRules,
    reference: NaiveDateTime,
) -> ValidationResult {
    let mut result = ValidationResult::new();

    let (Some(first), Some(last)) = (records.first(), records.last()) else {
        result.error("Record collection cannot be empty");
        return result;
    };

    if first.kind() != RecordKind::Header {
        result.error(format!(
            "First record must be a Header record (found {})",
            first.kind()
        ));
    }
    if last.kind() != RecordKind::Terminator {
        result.error(format!(
            "Last record must be a Terminator record (found {})",
            last.kind()
        ));
    }

    if let Some(severity) = rules.ordering {
        check_ordering(records, rules, severity, &mut result);
    }
    if let Some(severity) = rules.relationships {
        check_relationships(records, severity, &mut result);
    }
    if let Some(severity) = rules.sequence {
        check_sequence(records, severity, &mut result);
    }

    for record in records {
        let prefix = format!("{}|{}: ", record.kind().tag(), record.sequence_number());
        for error in record.validate_at(reference) {
            result.error(format!("{prefix}{error}"));
        }
    }

    tracing::debug!(
        records = records.len(),
        errors = result.errors().len(),
        warnings = result.warnings().len(),
        "validated record sequence"
    );
    result
}

/// Flags records whose kind falls behind the highest kind seen so far.
fn check_ordering(
    records: &[Record],
    rules: &ValidationRules,
    severity: Severity,
    result: &mut ValidationResult,
) {
    let mut highest = 0usize;
    for (index, record) in records.iter().enumerate() {
        let kind = record.kind();
        let position = kind.order_index();
        if position < highest && !rules.is_repeatable(kind) {
            result.report(
                severity,
                format!(
                    "Record {} ({kind}) is out of order: {kind} cannot follow {}",
                    index + 1,
                    RecordKind::ORDER[highest]
                ),
            );
            continue;
        }
        highest = highest.max(position);
    }
}

/// Orders need a patient before them, results an order.
fn check_relationships(records: &[Record], severity: Severity, result: &mut ValidationResult) {
    let mut seen_patient = false;
    let mut seen_order = false;
    let mut seen_result = false;

    for record in records {
        match record.kind() {
            RecordKind::Patient => seen_patient = true,
            RecordKind::Order => {
                if !seen_patient {
                    result.report(
                        severity,
                        format!(
                            "Order record {} must follow a Patient record",
                            record.sequence_number()
                        ),
                    );
                }
                seen_order = true;
            }
            RecordKind::Result => {
                if !seen_order {
                    result.report(
                        severity,
                        format!(
                            "Result record {} must follow an Order record",
                            record.sequence_number()
                        ),
                    );
                }
                seen_result = true;
            }
            _ => {}
        }
    }

    if seen_result && !seen_order {
        result.warning("Result records present without any Order record");
    }
}

/// Sequence numbers must count up from 1.
///
/// The expected value resynchronises to `actual + 1` after every record, so a
/// single gap is reported once rather than on every following record.
fn check_sequence(records: &[Record], severity: Severity, result: &mut ValidationResult) {
    let mut expected: u64 = 1;
    for (index, record) in records.iter().enumerate() {
        let actual = u64::from(record.sequence_number());
        if actual != expected {
            result.report(
                severity,
                format!(
                    "Record {} ({}) has sequence number {actual}, expected {expected}",
                    index + 1,
                    record.kind()
                ),
            );
        }
        expected = actual + 1;
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use lisprims_record::{Comment, Header, Order, Patient, Terminator, TestResult};

    use super::*;

    fn reference() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn header(seq: u32) -> Record {
        let mut header = Header::new(reference());
        header.sequence_number = seq;
        header.into()
    }

    fn patient(seq: u32) -> Record {
        Patient::new(seq).with_laboratory_id("LAB-1").into()
    }

    fn order(seq: u32) -> Record {
        Order::new(seq, "S-1", "^^^GLU").into()
    }

    fn test_result(seq: u32) -> Record {
        TestResult::new(seq, "^^^GLU", "5.4").into()
    }

    fn terminator(seq: u32) -> Record {
        Terminator::new(seq).into()
    }

    fn validate(records: &[Record], rules: &ValidationRules) -> ValidationResult {
        validate_records(records, rules, reference())
    }

    #[test]
    fn empty_sequence_single_error() {
        let result = validate(&[], &ValidationRules::session(true));
        assert!(!result.is_valid());
        assert_eq!(result.errors().len(), 1);
        assert!(result.errors()[0].contains("empty"));
        assert!(result.warnings().is_empty());
    }

    #[test]
    fn complete_message_is_valid_everywhere() {
        let records = [header(1), patient(2), order(3), test_result(4), terminator(5)];
        for rules in [
            ValidationRules::base(),
            ValidationRules::ordered(),
            ValidationRules::session(true),
            ValidationRules::session(false),
        ] {
            let result = validate(&records, &rules);
            assert!(result.is_valid(), "{rules:?}: {:?}", result.errors());
            assert!(result.warnings().is_empty(), "{:?}", result.warnings());
        }
    }

    #[test]
    fn first_must_be_header() {
        let result = validate(&[patient(1), terminator(2)], &ValidationRules::base());
        assert!(result.errors().iter().any(|e| e.contains("must be a Header")));
    }

    #[test]
    fn last_must_be_terminator() {
        let result = validate(&[header(1), patient(2)], &ValidationRules::base());
        assert!(result
            .errors()
            .iter()
            .any(|e| e.contains("must be a Terminator")));
    }

    #[test]
    fn header_out_of_order() {
        let records = [header(1), patient(2), header(3), terminator(4)];

        let base = validate(&records, &ValidationRules::base());
        assert!(base.is_valid());
        assert!(base.warnings().is_empty());

        let ordered = validate(&records, &ValidationRules::ordered());
        assert!(ordered.is_valid());
        assert_eq!(ordered.warnings().len(), 1);
        assert!(ordered.warnings()[0].contains("out of order"));

        let strict = validate(&records, &ValidationRules::session(true));
        assert!(strict.errors().iter().any(|e| e.contains("out of order")));
    }

    #[test]
    fn repeatable_kinds_may_reappear() {
        let records = [
            header(1),
            patient(2),
            order(3),
            test_result(4),
            Comment::new(5, "L", "note").into(),
            patient(6),
            order(7),
            test_result(8),
            terminator(9),
        ];
        let result = validate(&records, &ValidationRules::session(true));
        assert!(result.is_valid(), "{:?}", result.errors());
    }

    #[test]
    fn order_before_patient_only_flagged_by_session() {
        let records = [header(1), order(2), terminator(3)];

        let strict = validate(&records, &ValidationRules::session(true));
        assert!(strict
            .errors()
            .iter()
            .any(|e| e == "Order record 2 must follow a Patient record"));

        let lenient = validate(&records, &ValidationRules::session(false));
        assert!(lenient.is_valid());
        assert!(lenient
            .warnings()
            .iter()
            .any(|w| w.contains("must follow a Patient record")));

        for rules in [ValidationRules::base(), ValidationRules::ordered()] {
            let result = validate(&records, &rules);
            assert!(!result
                .errors()
                .iter()
                .chain(result.warnings())
                .any(|m| m.contains("must follow a Patient")));
        }
    }

    #[test]
    fn result_without_order() {
        let records = [header(1), patient(2), test_result(3), terminator(4)];
        let result = validate(&records, &ValidationRules::session(true));
        assert!(result
            .errors()
            .iter()
            .any(|e| e == "Result record 3 must follow an Order record"));
        assert!(result
            .warnings()
            .iter()
            .any(|w| w.contains("without any Order")));
    }

    #[test]
    fn sequence_gaps_resynchronise() {
        // 1, 2, 5, 6, 7: only the jump to 5 is flagged.
        let records = [header(1), patient(2), order(5), test_result(6), terminator(7)];

        let strict = validate(&records, &ValidationRules::session(true));
        let flagged: Vec<&String> = strict
            .errors()
            .iter()
            .filter(|e| e.contains("sequence number"))
            .collect();
        assert_eq!(flagged.len(), 1);
        assert!(flagged[0].contains("has sequence number 5, expected 3"));

        let lenient = validate(&records, &ValidationRules::session(false));
        assert!(lenient.is_valid());
        assert_eq!(lenient.warnings().len(), 1);

        let ordered = validate(&records, &ValidationRules::ordered());
        assert!(ordered.is_valid());
        assert!(ordered.warnings().is_empty());
    }

    #[test]
    fn record_errors_are_prefixed() {
        let records = [
            header(1),
            Patient::new(2).into(),
            Comment {
                sequence_number: 3,
                ..Comment::default()
            }
            .into(),
            terminator(4),
        ];
        let result = validate(&records, &ValidationRules::base());
        assert_eq!(
            result.errors(),
            [
                "P|2: At least one patient identifier is required".to_string(),
                "C|3: Comment text is required".to_string(),
            ]
        );
    }

    #[test]
    fn collection_continues_after_errors() {
        let records = [patient(1), Order::default().into(), test_result(7)];
        let result = validate(&records, &ValidationRules::session(true));
        assert!(result.errors().len() >= 5, "{:?}", result.errors());
    }
}
