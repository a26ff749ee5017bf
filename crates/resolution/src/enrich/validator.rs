//! Candidate validation.
//!
//! Validates enriched candidates before they are surfaced:
//! - Empty primary values are rejected (the only hard rule)
//! - Missing dimensions or alt text on backed candidates are soft warnings

use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::ResolutionError;
use crate::models::Candidate;

/// Validation severity levels.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValidationSeverity {
    /// Hard failure - reject the candidate.
    Hard,
    /// Soft warning - accept the candidate but log a warning.
    Soft,
}

/// Validation result details.
#[derive(Clone, Debug)]
pub struct ValidationIssue {
    /// Severity of the issue.
    pub severity: ValidationSeverity,
    /// Description of the issue.
    pub message: String,
}

/// Candidate validator configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidatorConfig {
    /// Warn when a candidate backed by an item has no dimensions.
    pub warn_on_missing_dimensions: bool,
    /// Warn when a candidate backed by an item has no alt text.
    pub warn_on_missing_alt: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            warn_on_missing_dimensions: true,
            warn_on_missing_alt: false,
        }
    }
}

/// Candidate validator.
#[derive(Clone, Debug, Default)]
pub struct CandidateValidator {
    config: ValidatorConfig,
}

impl CandidateValidator {
    /// Create a new validator with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator with custom configuration.
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Validate a candidate.
    ///
    /// Returns Ok(()) if the candidate may be surfaced. Warnings are logged
    /// but do not cause rejection.
    pub fn validate(&self, candidate: &Candidate) -> Result<(), ResolutionError> {
        let issues = self.issues(candidate);

        let errors: Vec<_> = issues
            .iter()
            .filter(|i| i.severity == ValidationSeverity::Hard)
            .map(|i| i.message.as_str())
            .collect();

        if !errors.is_empty() {
            return Err(ResolutionError::CandidateRejected {
                producer: candidate.source.to_string(),
                reason: errors.join("; "),
            });
        }

        for issue in issues.iter().filter(|i| i.severity == ValidationSeverity::Soft) {
            warn!(
                "Candidate validation warning for '{}' from '{}': {}",
                candidate.value, candidate.source, issue.message
            );
        }

        Ok(())
    }

    /// Collect every issue found on a candidate.
    pub fn issues(&self, candidate: &Candidate) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if !candidate.is_valid() {
            issues.push(ValidationIssue {
                severity: ValidationSeverity::Hard,
                message: "Empty primary value".to_string(),
            });
            return issues;
        }

        if candidate.source_id.is_some() {
            if self.config.warn_on_missing_dimensions && !candidate.attributes.has_dimensions() {
                issues.push(ValidationIssue {
                    severity: ValidationSeverity::Soft,
                    message: "Missing dimensions".to_string(),
                });
            }
            if self.config.warn_on_missing_alt && candidate.attributes.alt.is_empty() {
                issues.push(ValidationIssue {
                    severity: ValidationSeverity::Soft,
                    message: "Missing alt text".to_string(),
                });
            }
        }

        issues
    }
}
