//! Structural validation of record sequences.
//!
//! Validation never fails: it collects errors and warnings into a
//! [`ValidationResult`]. [`ValidationRules`] selects which sequence-level
//! checks run and whether their findings are errors or warnings.

pub mod engine;
pub mod result;
pub mod rules;

pub use engine::validate_records;
pub use result::ValidationResult;
pub use rules::{Severity, ValidationRules, REPEATABLE_KINDS};
