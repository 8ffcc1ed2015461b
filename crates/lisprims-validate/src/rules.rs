use lisprims_record::RecordKind;
use serde::Serialize;

/// How a rule violation is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    /// `Error` when strict, `Warning` otherwise.
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            Severity::Error
        } else {
            Severity::Warning
        }
    }
}

/// Kinds that may legitimately appear again after a later kind
/// (a second patient, another order after results, comments anywhere).
pub const REPEATABLE_KINDS: [RecordKind; 4] = [
    RecordKind::Patient,
    RecordKind::Order,
    RecordKind::Result,
    RecordKind::Comment,
];

/// Which sequence-level checks run, and at what severity.
///
/// `None` disables a check. The first/last record checks and each record's
/// own validation always run and always report errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRules {
    /// Records must follow the canonical H, P, O, R, C, L order.
    pub ordering: Option<Severity>,
    /// Orders need a preceding patient, results a preceding order.
    pub relationships: Option<Severity>,
    /// Sequence numbers must count up from 1 without gaps.
    pub sequence: Option<Severity>,
    /// Kinds exempt from the ordering check when they reappear.
    pub repeatable: Vec<RecordKind>,
}

impl ValidationRules {
    /// Only the first/last record and per-record checks.
    pub fn base() -> Self {
        Self {
            ordering: None,
            relationships: None,
            sequence: None,
            repeatable: REPEATABLE_KINDS.to_vec(),
        }
    }

    /// Out-of-order records are reported as warnings.
    pub fn ordered() -> Self {
        Self {
            ordering: Some(Severity::Warning),
            ..Self::base()
        }
    }

    /// All checks, as errors when `strict` and warnings otherwise.
    pub fn session(strict: bool) -> Self {
        let severity = Severity::from_strict(strict);
        Self {
            ordering: Some(severity),
            relationships: Some(severity),
            sequence: Some(severity),
            ..Self::base()
        }
    }

    pub fn is_repeatable(&self, kind: RecordKind) -> bool {
        self.repeatable.contains(&kind)
    }
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self::base()
    }
}
