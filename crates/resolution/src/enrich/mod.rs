//! Candidate enrichment and validation.
//!
//! Every raw candidate passes through the [`Enricher`] and then the
//! [`CandidateValidator`] before the walker accepts it.

mod enricher;
mod validator;

pub use enricher::Enricher;
pub use validator::{CandidateValidator, ValidationIssue, ValidationSeverity, ValidatorConfig};
