//! Per-resolution diagnostics.

use std::borrow::Cow;

use serde::Serialize;

use crate::errors::RecoveryClass;
use crate::models::SourceName;
use crate::source::ChainRole;

/// Source name used for attempts served from a cursor cache.
pub const CACHE_SOURCE: &str = "cursor-cache";

/// Which tier produced a resolution.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionOrigin {
    /// Authoritative override.
    Override,
    /// Generated chain.
    Generated,
    /// Fallback chain.
    Fallback,
    /// Nothing resolved.
    Empty,
}

/// What happened during one step of a chain walk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// Candidates served from an existing cursor without pulling.
    CacheHit { served: usize },
    /// A candidate was accepted.
    Accepted,
    /// A candidate failed validation.
    Rejected { reason: String, recovery: RecoveryClass },
    /// The producer failed to open or raised mid-stream.
    Failed { error: String, recovery: RecoveryClass },
    /// The producer's stream ended.
    Drained,
    /// The producer was abandoned after too many consecutive rejections.
    Abandoned { rejections: usize },
}

/// Record of a single step during a resolution.
#[derive(Clone, Debug, Serialize)]
pub struct SourceAttempt {
    pub source: SourceName,
    pub role: ChainRole,
    #[serde(flatten)]
    pub outcome: AttemptOutcome,
}

/// Detailed record of a resolution.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ResolutionDiagnostics {
    pub attempts: Vec<SourceAttempt>,
    pub origin: Option<ResolutionOrigin>,
}

impl ResolutionDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, source: SourceName, role: ChainRole, outcome: AttemptOutcome) {
        self.attempts.push(SourceAttempt {
            source,
            role,
            outcome,
        });
    }

    pub fn record_cache_hit(&mut self, role: ChainRole, served: usize) {
        self.record(
            Cow::Borrowed(CACHE_SOURCE),
            role,
            AttemptOutcome::CacheHit { served },
        );
    }

    pub fn set_origin(&mut self, origin: ResolutionOrigin) {
        self.origin = Some(origin);
    }

    /// Summary for logging/debugging.
    pub fn summary(&self) -> String {
        self.attempts
            .iter()
            .map(|a| match &a.outcome {
                AttemptOutcome::CacheHit { served } => format!("{}: CACHED ({})", a.source, served),
                AttemptOutcome::Accepted => format!("{}: ACCEPTED", a.source),
                AttemptOutcome::Rejected { reason, .. } => format!("{}: REJECTED ({})", a.source, reason),
                AttemptOutcome::Failed { error, .. } => format!("{}: FAILED ({})", a.source, error),
                AttemptOutcome::Drained => format!("{}: DRAINED", a.source),
                AttemptOutcome::Abandoned { rejections } => {
                    format!("{}: ABANDONED ({} rejections)", a.source, rejections)
                }
            })
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    /// Number of accepted candidates recorded.
    pub fn accepted_count(&self) -> usize {
        self.attempts
            .iter()
            .filter(|a| a.outcome == AttemptOutcome::Accepted)
            .count()
    }

    /// Get all failures.
    pub fn failures(&self) -> Vec<(&str, &str)> {
        self.attempts
            .iter()
            .filter_map(|a| match &a.outcome {
                AttemptOutcome::Failed { error, .. } => Some((a.source.as_ref(), error.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Recovery class of every failed or rejected step, in order.
    pub fn recoveries(&self) -> Vec<(&str, RecoveryClass)> {
        self.attempts
            .iter()
            .filter_map(|a| match &a.outcome {
                AttemptOutcome::Failed { recovery, .. } | AttemptOutcome::Rejected { recovery, .. } => {
                    Some((a.source.as_ref(), *recovery))
                }
                _ => None,
            })
            .collect()
    }

    /// Whether any step was served from a cursor cache.
    pub fn used_cache(&self) -> bool {
        self.attempts
            .iter()
            .any(|a| matches!(a.outcome, AttemptOutcome::CacheHit { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostics_summary() {
        let mut diag = ResolutionDiagnostics::new();
        diag.record(Cow::Borrowed("featured"), ChainRole::Generated, AttemptOutcome::Drained);
        diag.record(
            Cow::Borrowed("content-scan"),
            ChainRole::Generated,
            AttemptOutcome::Failed {
                error: "render failed".to_string(),
                recovery: RecoveryClass::SkipProducer,
            },
        );
        diag.record(
            Cow::Borrowed("site-default"),
            ChainRole::Fallback,
            AttemptOutcome::Accepted,
        );

        let summary = diag.summary();
        assert!(summary.contains("featured: DRAINED"));
        assert!(summary.contains("content-scan: FAILED (render failed)"));
        assert!(summary.contains("site-default: ACCEPTED"));
    }

    #[test]
    fn test_failures_and_counts() {
        let mut diag = ResolutionDiagnostics::new();
        diag.record_cache_hit(ChainRole::Generated, 1);
        diag.record(Cow::Borrowed("a"), ChainRole::Generated, AttemptOutcome::Accepted);
        diag.record(
            Cow::Borrowed("b"),
            ChainRole::Generated,
            AttemptOutcome::Failed {
                error: "x".to_string(),
                recovery: RecoveryClass::Fatal,
            },
        );

        assert!(diag.used_cache());
        assert_eq!(diag.accepted_count(), 1);
        assert_eq!(diag.failures(), vec![("b", "x")]);
        assert_eq!(diag.recoveries(), vec![("b", RecoveryClass::Fatal)]);
    }

    #[test]
    fn test_serializes_flat_outcome() {
        let mut diag = ResolutionDiagnostics::new();
        diag.record(
            Cow::Borrowed("a"),
            ChainRole::Fallback,
            AttemptOutcome::Rejected {
                reason: "Empty primary value".to_string(),
                recovery: RecoveryClass::SkipCandidate,
            },
        );
        diag.set_origin(ResolutionOrigin::Empty);

        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["attempts"][0]["outcome"], "rejected");
        assert_eq!(json["attempts"][0]["recovery"], "skip_candidate");
        assert_eq!(json["attempts"][0]["role"], "fallback");
        assert_eq!(json["origin"], "empty");
    }
}
