use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of record kinds, in canonical transmission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Header,
    Patient,
    Order,
    Result,
    Comment,
    Terminator,
}

impl RecordKind {
    /// Canonical order: H, P, O, R, C, L.
    pub const ORDER: [RecordKind; 6] = [
        RecordKind::Header,
        RecordKind::Patient,
        RecordKind::Order,
        RecordKind::Result,
        RecordKind::Comment,
        RecordKind::Terminator,
    ];

    /// One-character tag leading the record body.
    pub fn tag(self) -> char {
        match self {
            RecordKind::Header => 'H',
            RecordKind::Patient => 'P',
            RecordKind::Order => 'O',
            RecordKind::Result => 'R',
            RecordKind::Comment => 'C',
            RecordKind::Terminator => 'L',
        }
    }

    pub fn from_tag(tag: char) -> Option<Self> {
        Self::ORDER.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Position in the canonical order.
    pub fn order_index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            RecordKind::Header => "Header",
            RecordKind::Patient => "Patient",
            RecordKind::Order => "Order",
            RecordKind::Result => "Result",
            RecordKind::Comment => "Comment",
            RecordKind::Terminator => "Terminator",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_roundtrip() {
        for kind in RecordKind::ORDER {
            assert_eq!(RecordKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(RecordKind::from_tag('Q'), None);
        assert_eq!(RecordKind::from_tag('h'), None);
    }

    #[test]
    fn canonical_order_indices() {
        let indices: Vec<usize> = RecordKind::ORDER.iter().map(|k| k.order_index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
    }
}
