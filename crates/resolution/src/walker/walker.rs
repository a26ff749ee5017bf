//! Chain walker: drives one source chain lazily.

use log::{debug, error, warn};
use serde::{Deserialize, Serialize};

use super::cache::CursorKey;
use super::cursor::{ProducerState, ResumableCursor};
use super::diagnostics::{AttemptOutcome, ResolutionDiagnostics};
use super::scope::OperationScope;
use crate::enrich::{CandidateValidator, Enricher};
use crate::errors::{RecoveryClass, ResolutionError};
use crate::models::{Candidate, TargetKey, TargetKind};
use crate::source::{ChainRole, SourceChain, SourceDescriptor};

/// Default number of consecutive rejected candidates after which a producer
/// is abandoned.
const DEFAULT_MAX_CONSECUTIVE_REJECTIONS: usize = 64;

/// Chain walker configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WalkerConfig {
    /// Consecutive invalid candidates tolerated from one producer before it
    /// is treated as drained. `0` disables the limit.
    pub max_consecutive_rejections: usize,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            max_consecutive_rejections: DEFAULT_MAX_CONSECUTIVE_REJECTIONS,
        }
    }
}

/// Pulls candidates from a source chain until a cardinality need is met.
///
/// For ambient targets, progress is stored in the scope's cursor cache and
/// resumed by later calls; explicit targets are always walked from scratch.
#[derive(Clone, Default)]
pub struct ChainWalker {
    enricher: Enricher,
    validator: CandidateValidator,
    config: WalkerConfig,
}

impl ChainWalker {
    pub fn new(enricher: Enricher, validator: CandidateValidator) -> Self {
        Self::with_config(enricher, validator, WalkerConfig::default())
    }

    pub fn with_config(enricher: Enricher, validator: CandidateValidator, config: WalkerConfig) -> Self {
        Self {
            enricher,
            validator,
            config,
        }
    }

    pub fn enricher(&self) -> &Enricher {
        &self.enricher
    }

    pub fn validator(&self) -> &CandidateValidator {
        &self.validator
    }

    /// Take up to `max_count` accepted candidates from `chain` for `target`.
    pub fn take(
        &self,
        scope: &mut OperationScope,
        chain: &SourceChain,
        target: &TargetKey,
        max_count: usize,
    ) -> Result<Vec<Candidate>, ResolutionError> {
        let mut diagnostics = ResolutionDiagnostics::new();
        self.take_with_diagnostics(scope, chain, target, max_count, &mut diagnostics)
    }

    /// Like [`take`](Self::take), recording every step into `diagnostics`.
    ///
    /// The only error is [`ResolutionError::InvalidTarget`] from resolving
    /// the ambient target; producer failures are absorbed.
    pub fn take_with_diagnostics(
        &self,
        scope: &mut OperationScope,
        chain: &SourceChain,
        target: &TargetKey,
        max_count: usize,
        diagnostics: &mut ResolutionDiagnostics,
    ) -> Result<Vec<Candidate>, ResolutionError> {
        if max_count == 0 {
            return Ok(Vec::new());
        }

        let concrete = scope.concrete_kind(&target.kind)?;

        if !target.is_ambient() {
            let mut cursor = ResumableCursor::new();
            self.advance(&mut cursor, chain, &concrete, max_count, diagnostics);
            return Ok(cursor.into_accepted());
        }

        let key = CursorKey {
            target: target.clone(),
            chain: chain.id(),
        };
        let cursor = scope.cursor_mut(key);

        let cached = cursor.accepted().len();
        if cached >= max_count {
            debug!(
                "Serving {} cached candidates for {} from {}",
                max_count,
                target.profile,
                chain.id()
            );
            diagnostics.record_cache_hit(chain.role(), max_count);
            return Ok(cursor.accepted()[..max_count].to_vec());
        }

        if cached > 0 || cursor.is_suspended() || cursor.is_exhausted() {
            diagnostics.record_cache_hit(chain.role(), cached);
            debug!(
                "Resuming cursor for {} at producer {} with {} accepted",
                chain.id(),
                cursor.producer_index(),
                cached
            );
        }

        self.advance(cursor, chain, &concrete, max_count, diagnostics);

        Ok(cursor.accepted().iter().take(max_count).cloned().collect())
    }

    fn advance(
        &self,
        cursor: &mut ResumableCursor,
        chain: &SourceChain,
        target: &TargetKind,
        max_count: usize,
        diagnostics: &mut ResolutionDiagnostics,
    ) {
        let role = chain.role();

        while cursor.accepted.len() < max_count && !cursor.exhausted {
            let Some(descriptor) = chain.descriptors().get(cursor.producer_index) else {
                debug!(
                    "Chain {} exhausted with {} accepted",
                    chain.id(),
                    cursor.accepted.len()
                );
                cursor.exhausted = true;
                cursor.producer_state = None;
                break;
            };

            if cursor.producer_state.is_none() {
                match descriptor.open(target) {
                    Ok(stream) => {
                        cursor.producer_state = Some(ProducerState::new(stream));
                    }
                    Err(e) => {
                        self.absorb(cursor, descriptor, role, target, e, diagnostics);
                        continue;
                    }
                }
            }

            let Some(state) = cursor.producer_state.as_mut() else {
                continue;
            };

            match state.stream.next() {
                Some(Ok(raw)) => {
                    state.pulled += 1;
                    cursor.total_pulls += 1;

                    let candidate = self.enricher.enrich(descriptor.source_name(), raw);
                    match self.validator.validate(&candidate) {
                        Ok(()) => {
                            state.consecutive_rejections = 0;
                            diagnostics.record(
                                descriptor.source_name().clone(),
                                role,
                                AttemptOutcome::Accepted,
                            );
                            cursor.accepted.push(candidate);
                        }
                        Err(e) => self.absorb(cursor, descriptor, role, target, e, diagnostics),
                    }
                }
                Some(Err(e)) => self.absorb(cursor, descriptor, role, target, e, diagnostics),
                None => {
                    debug!(
                        "Source '{}' drained after {} candidates",
                        descriptor.name(),
                        state.pulled
                    );
                    diagnostics.record(
                        descriptor.source_name().clone(),
                        role,
                        AttemptOutcome::Drained,
                    );
                    cursor.advance_producer();
                }
            }
        }
    }

    /// Apply the recovery policy of `error` to the active producer.
    ///
    /// Nothing escapes a chain walk: fatal errors raised by a producer are
    /// logged and the producer is skipped.
    fn absorb(
        &self,
        cursor: &mut ResumableCursor,
        descriptor: &SourceDescriptor,
        role: ChainRole,
        target: &TargetKind,
        error: ResolutionError,
        diagnostics: &mut ResolutionDiagnostics,
    ) {
        let recovery = error.recovery_class();

        if recovery == RecoveryClass::SkipCandidate {
            debug!("{}", error);
            diagnostics.record(
                descriptor.source_name().clone(),
                role,
                AttemptOutcome::Rejected {
                    reason: error.to_string(),
                    recovery,
                },
            );

            // A source that fails to open has no stream to keep pulling from.
            let Some(state) = cursor.producer_state.as_mut() else {
                cursor.advance_producer();
                return;
            };
            state.consecutive_rejections += 1;
            let rejections = state.consecutive_rejections;

            let limit = self.config.max_consecutive_rejections;
            if limit > 0 && rejections >= limit {
                warn!(
                    "Source '{}' abandoned after {} consecutive rejected candidates",
                    descriptor.name(),
                    rejections
                );
                diagnostics.record(
                    descriptor.source_name().clone(),
                    role,
                    AttemptOutcome::Abandoned { rejections },
                );
                cursor.advance_producer();
            }
            return;
        }

        let pulled = cursor.producer_state.as_ref().map_or(0, |s| s.pulled);
        match recovery {
            RecoveryClass::Fatal => error!(
                "Source '{}' raised a fatal error for {} after {} candidates, skipping it: {}",
                descriptor.name(),
                target,
                pulled,
                error
            ),
            _ => warn!(
                "Source '{}' failed for {} after {} candidates: {}",
                descriptor.name(),
                target,
                pulled,
                error
            ),
        }
        diagnostics.record(
            descriptor.source_name().clone(),
            role,
            AttemptOutcome::Failed {
                error: error.to_string(),
                recovery,
            },
        );
        cursor.advance_producer();
    }
}
