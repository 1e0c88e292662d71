//! Validation reports and request sequencing.
//!
//! The server answers a validation request with `{errors, warnings}`. The
//! client adds one error per field flagged invalid at the time of the call.
//! Responses can arrive out of order, so each request gets a monotonic id per
//! section and only the latest id's response is applied.

use crate::form::SectionKey;
use serde::Deserialize;
use std::collections::HashMap;

/// Body returned by the validation endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidationOutput {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationStatus {
    Pending,
    Passed,
    Failed(usize),
    /// The request itself failed; the message describes the transport error.
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub status: ValidationStatus,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::pending()
    }
}

/// Message shown for a field that failed its format check.
pub fn invalid_field_message(name: &str) -> String {
    format!("Value for {} is invalid", name)
}

impl ValidationReport {
    pub fn pending() -> Self {
        Self {
            status: ValidationStatus::Pending,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Merge the server's answer with the client-side format errors.
    pub fn from_output(output: ValidationOutput, invalid_fields: &[&str]) -> Self {
        let mut errors = output.errors;
        errors.extend(invalid_fields.iter().map(|name| invalid_field_message(name)));
        let status = if errors.is_empty() {
            ValidationStatus::Passed
        } else {
            ValidationStatus::Failed(errors.len())
        };
        Self {
            status,
            errors,
            warnings: output.warnings,
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            status: ValidationStatus::Unavailable(message.into()),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// The warnings panel is hidden when there is nothing to show.
    pub fn show_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Short text for the status indicator.
    pub fn summary(&self) -> String {
        match &self.status {
            ValidationStatus::Pending => "validating...".to_string(),
            ValidationStatus::Passed => "valid".to_string(),
            ValidationStatus::Failed(1) => "1 error".to_string(),
            ValidationStatus::Failed(n) => format!("{} errors", n),
            ValidationStatus::Unavailable(_) => "validation unavailable".to_string(),
        }
    }
}

/// Issues request ids per section and tells whether a response is current.
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    latest: HashMap<SectionKey, u64>,
    next: u64,
}

impl RequestSequencer {
    pub fn issue(&mut self, key: SectionKey) -> u64 {
        self.next += 1;
        self.latest.insert(key, self.next);
        self.next
    }

    pub fn is_latest(&self, key: SectionKey, id: u64) -> bool {
        self.latest.get(&key) == Some(&id)
    }

    /// Drop keys of sections that no longer exist.
    pub fn retain(&mut self, mut keep: impl FnMut(&SectionKey) -> bool) {
        self.latest.retain(|key, _| keep(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_errors_are_counted_with_remote_ones() {
        let report = ValidationReport::from_output(ValidationOutput::default(), &["amount_value"]);
        assert_eq!(report.status, ValidationStatus::Failed(1));
        assert_eq!(report.errors, vec!["Value for amount_value is invalid"]);
        assert_eq!(report.summary(), "1 error");
    }

    #[test]
    fn clean_output_passes_and_hides_warnings() {
        let report = ValidationReport::from_output(ValidationOutput::default(), &[]);
        assert_eq!(report.status, ValidationStatus::Passed);
        assert!(!report.show_warnings());
    }

    #[test]
    fn warnings_do_not_fail_validation() {
        let output: ValidationOutput =
            serde_json::from_str(r#"{"errors":[],"warnings":["Reaction has no inputs"]}"#).unwrap();
        let report = ValidationReport::from_output(output, &[]);
        assert_eq!(report.status, ValidationStatus::Passed);
        assert!(report.show_warnings());
    }

    #[test]
    fn remote_and_local_errors_are_itemized() {
        let output = ValidationOutput {
            errors: vec!["Missing units".into()],
            warnings: vec![],
        };
        let report = ValidationReport::from_output(output, &["outcome_time_value"]);
        assert_eq!(report.summary(), "2 errors");
        assert_eq!(report.errors[0], "Missing units");
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut sequencer = RequestSequencer::default();
        let first = sequencer.issue(SectionKey::Notes);
        let second = sequencer.issue(SectionKey::Notes);
        // The second response arrives first and is applied.
        assert!(sequencer.is_latest(SectionKey::Notes, second));
        // The first arrives late and is dropped.
        assert!(!sequencer.is_latest(SectionKey::Notes, first));
    }

    #[test]
    fn sequences_are_per_section() {
        let mut sequencer = RequestSequencer::default();
        let notes = sequencer.issue(SectionKey::Notes);
        let flow = sequencer.issue(SectionKey::Flow);
        assert!(sequencer.is_latest(SectionKey::Notes, notes));
        assert!(sequencer.is_latest(SectionKey::Flow, flow));
        sequencer.retain(|key| *key != SectionKey::Flow);
        assert!(!sequencer.is_latest(SectionKey::Flow, flow));
    }
}
