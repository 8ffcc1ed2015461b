//! Closed code sets carried in record fields.

use serde::{Deserialize, Serialize};

use crate::codec::FieldCode;

/// Patient sex (`M`, `F`, `U`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
    Unknown,
}

impl FieldCode for Sex {
    fn code(self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
            Sex::Unknown => "U",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "M" => Some(Sex::Male),
            "F" => Some(Sex::Female),
            "U" => Some(Sex::Unknown),
            _ => None,
        }
    }
}

/// How the receiver should treat the message (`P`, `T`, `D`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingId {
    Production,
    Test,
    Debug,
}

impl FieldCode for ProcessingId {
    fn code(self) -> &'static str {
        match self {
            ProcessingId::Production => "P",
            ProcessingId::Test => "T",
            ProcessingId::Debug => "D",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "P" => Some(ProcessingId::Production),
            "T" => Some(ProcessingId::Test),
            "D" => Some(ProcessingId::Debug),
            _ => None,
        }
    }
}

/// Why a transmission ended (`N`, `F`, `E`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationCode {
    #[default]
    Normal,
    Final,
    Error,
}

impl FieldCode for TerminationCode {
    fn code(self) -> &'static str {
        match self {
            TerminationCode::Normal => "N",
            TerminationCode::Final => "F",
            TerminationCode::Error => "E",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "N" => Some(TerminationCode::Normal),
            "F" => Some(TerminationCode::Final),
            "E" => Some(TerminationCode::Error),
            _ => None,
        }
    }
}

/// Comment sources accepted by validation: practice and laboratory.
pub const COMMENT_SOURCES: [&str; 2] = ["P", "L"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_roundtrip() {
        for sex in [Sex::Male, Sex::Female, Sex::Unknown] {
            assert_eq!(Sex::from_code(sex.code()), Some(sex));
        }
        for id in [ProcessingId::Production, ProcessingId::Test, ProcessingId::Debug] {
            assert_eq!(ProcessingId::from_code(id.code()), Some(id));
        }
        for code in [TerminationCode::Normal, TerminationCode::Final, TerminationCode::Error] {
            assert_eq!(TerminationCode::from_code(code.code()), Some(code));
        }
    }

    #[test]
    fn codes_ignore_case() {
        assert_eq!(Sex::from_code("f"), Some(Sex::Female));
        assert_eq!(TerminationCode::from_code("e"), Some(TerminationCode::Error));
        assert_eq!(ProcessingId::from_code("X"), None);
    }
}
