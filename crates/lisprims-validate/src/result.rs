use serde::Serialize;

use crate::rules::Severity;

/// Errors and warnings collected by one validation pass.
///
/// Valid iff there are no errors; warnings never affect validity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub(crate) fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub(crate) fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub(crate) fn report(&mut self, severity: Severity, message: impl Into<String>) {
        match severity {
            Severity::Error => self.error(message),
            Severity::Warning => self.warning(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_do_not_affect_validity() {
        let mut result = ValidationResult::new();
        assert!(result.is_valid());

        result.report(Severity::Warning, "odd but fine");
        assert!(result.is_valid());
        assert_eq!(result.warnings(), ["odd but fine".to_string()]);

        result.report(Severity::Error, "broken");
        assert!(!result.is_valid());
        assert_eq!(result.errors(), ["broken".to_string()]);
    }
}
