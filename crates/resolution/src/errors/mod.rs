//! Error types and recovery classification for the resolution engine.
//!
//! This module provides:
//! - [`ResolutionError`]: The error enum for all resolution operations
//! - [`RecoveryClass`]: Classification for determining how an error is absorbed

mod recovery;

pub use recovery::RecoveryClass;

use thiserror::Error;

/// Errors that can occur while resolving a metadata field.
///
/// Each variant is classified into a [`RecoveryClass`] via the
/// [`recovery_class`](Self::recovery_class) method. Only [`RecoveryClass::Fatal`]
/// errors ever leave the resolution pipeline; everything else degrades to
/// fewer or emptier candidates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// The target descriptor is malformed or has conflicting fields.
    /// This is a caller contract violation; the engine never guesses.
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    /// A candidate producer raised an error.
    /// The producer is treated as drained and the chain continues.
    #[error("Producer failure: {producer} - {message}")]
    ProducerFailure {
        /// Name of the source descriptor that failed
        producer: String,
        /// The error message from the producer
        message: String,
    },

    /// An attribute lookup for a backing item failed.
    /// The attribute keeps its zero value.
    #[error("Enrichment miss: {attribute} for source {source_id}")]
    EnrichmentMiss {
        /// The backing item id the lookup was keyed by
        source_id: u64,
        /// The attribute that could not be looked up
        attribute: &'static str,
    },

    /// A candidate failed validation.
    #[error("Candidate rejected from {producer}: {reason}")]
    CandidateRejected {
        /// Name of the source descriptor that yielded the candidate
        producer: String,
        /// Why the candidate was rejected
        reason: String,
    },
}

impl ResolutionError {
    /// Shorthand for building a [`ResolutionError::ProducerFailure`].
    pub fn producer(producer: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProducerFailure {
            producer: producer.into(),
            message: message.into(),
        }
    }

    /// Returns the recovery classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use metafield_resolution::errors::{RecoveryClass, ResolutionError};
    ///
    /// let error = ResolutionError::InvalidTarget("taxonomy and type archive".to_string());
    /// assert_eq!(error.recovery_class(), RecoveryClass::Fatal);
    ///
    /// let error = ResolutionError::producer("content-scan", "render failed");
    /// assert_eq!(error.recovery_class(), RecoveryClass::SkipProducer);
    /// ```
    pub fn recovery_class(&self) -> RecoveryClass {
        match self {
            Self::InvalidTarget(_) => RecoveryClass::Fatal,
            Self::ProducerFailure { .. } => RecoveryClass::SkipProducer,
            Self::EnrichmentMiss { .. } => RecoveryClass::DefaultAttribute,
            Self::CandidateRejected { .. } => RecoveryClass::SkipCandidate,
        }
    }

    /// Whether this error must be surfaced to the caller.
    pub fn is_fatal(&self) -> bool {
        self.recovery_class() == RecoveryClass::Fatal
    }
}
