//! Resolution pipeline: override, then generated, then fallback.

use std::borrow::Cow;
use std::sync::Arc;

use log::debug;

use super::filters::{FilterContext, FilterSet, ResolutionFilter};
use super::registry::{ChainRegistry, ProfileChains};
use super::resolution::Resolution;
use crate::collaborators::OverrideStore;
use crate::errors::ResolutionError;
use crate::models::{normalize, Candidate, TargetArgs, TargetKey, TargetKind};
use crate::walker::{ChainWalker, OperationScope, ResolutionDiagnostics, ResolutionOrigin};

/// Source name given to override candidates.
pub const OVERRIDE_SOURCE: &str = "override";

/// Resolves fields through the three-tier policy.
///
/// 1. An authoritative override, if one exists, is returned alone
/// 2. Otherwise up to `max_count` candidates from the generated chain
/// 3. Otherwise at most one candidate from the fallback chain
///
/// # Example
///
/// ```ignore
/// let pipeline = ResolutionPipeline::new(overrides, registry, ChainWalker::default());
/// let mut scope = OperationScope::new(ambient);
///
/// let images = pipeline.resolve(&mut scope, None, "social", 5)?;
/// ```
pub struct ResolutionPipeline {
    overrides: Arc<dyn OverrideStore>,
    chains: ChainRegistry,
    walker: ChainWalker,
    filters: FilterSet,
}

impl ResolutionPipeline {
    pub fn new(overrides: Arc<dyn OverrideStore>, chains: ChainRegistry, walker: ChainWalker) -> Self {
        Self {
            overrides,
            chains,
            walker,
            filters: FilterSet::new(),
        }
    }

    /// Add an extension filter. Filters run in registration order.
    pub fn add_filter(&mut self, filter: Arc<dyn ResolutionFilter>) {
        self.filters.add(filter);
    }

    pub fn chains(&self) -> &ChainRegistry {
        &self.chains
    }

    pub fn walker(&self) -> &ChainWalker {
        &self.walker
    }

    /// Resolve up to `max_count` candidates for `profile`.
    ///
    /// `args` of `None` targets the ambient target of `scope`. The only
    /// error is [`ResolutionError::InvalidTarget`]; an empty list means no
    /// value is available.
    pub fn resolve(
        &self,
        scope: &mut OperationScope,
        args: Option<&TargetArgs>,
        profile: &str,
        max_count: usize,
    ) -> Result<Vec<Candidate>, ResolutionError> {
        Ok(self
            .resolve_detailed(scope, args, profile, max_count)?
            .into_candidates())
    }

    /// Like [`resolve`](Self::resolve), keeping the resolution origin.
    pub fn resolve_detailed(
        &self,
        scope: &mut OperationScope,
        args: Option<&TargetArgs>,
        profile: &str,
        max_count: usize,
    ) -> Result<Resolution, ResolutionError> {
        let mut diagnostics = ResolutionDiagnostics::new();
        self.resolve_with_diagnostics(scope, args, profile, max_count, &mut diagnostics)
    }

    /// Like [`resolve_detailed`](Self::resolve_detailed), recording every step.
    pub fn resolve_with_diagnostics(
        &self,
        scope: &mut OperationScope,
        args: Option<&TargetArgs>,
        profile: &str,
        max_count: usize,
        diagnostics: &mut ResolutionDiagnostics,
    ) -> Result<Resolution, ResolutionError> {
        let target = normalize(args, Cow::Owned(profile.to_string()))?;
        let chains = self.chains.chains_for(profile);
        self.resolve_key(scope, &target, &chains, max_count, diagnostics)
    }

    /// Resolve an already-normalized key against explicit chains.
    ///
    /// Used by callers that derive chains per call (e.g., from option flags)
    /// instead of reading them from the registry.
    pub fn resolve_key(
        &self,
        scope: &mut OperationScope,
        target: &TargetKey,
        chains: &ProfileChains,
        max_count: usize,
        diagnostics: &mut ResolutionDiagnostics,
    ) -> Result<Resolution, ResolutionError> {
        let concrete = scope.concrete_kind(&target.kind)?;
        let ctx = FilterContext {
            target,
            concrete: &concrete,
        };

        let resolution = match self.lookup_override(target, &concrete, &ctx) {
            Some(candidate) => Resolution {
                candidates: vec![candidate],
                origin: ResolutionOrigin::Override,
            },
            None => self.generate(scope, target, chains, max_count, &ctx, diagnostics)?,
        };

        diagnostics.set_origin(resolution.origin);
        debug!(
            "Resolved '{}' for {} via {:?} ({} candidates): {}",
            target.profile,
            concrete,
            resolution.origin,
            resolution.candidates.len(),
            diagnostics.summary()
        );

        Ok(self.filters.apply_resolution(resolution, &ctx))
    }

    fn lookup_override(
        &self,
        target: &TargetKey,
        concrete: &TargetKind,
        ctx: &FilterContext<'_>,
    ) -> Option<Candidate> {
        let candidate = self
            .overrides
            .lookup_override(concrete, &target.profile)
            .map(|raw| {
                self.walker
                    .enricher()
                    .enrich(&Cow::Borrowed(OVERRIDE_SOURCE), raw)
            })
            .filter(|candidate| match self.walker.validator().validate(candidate) {
                Ok(()) => true,
                Err(e) => {
                    debug!(
                        "Ignoring override for {} ({:?}): {}",
                        concrete,
                        e.recovery_class(),
                        e
                    );
                    false
                }
            });

        self.filters.apply_override(candidate, ctx)
    }

    fn generate(
        &self,
        scope: &mut OperationScope,
        target: &TargetKey,
        chains: &ProfileChains,
        max_count: usize,
        ctx: &FilterContext<'_>,
        diagnostics: &mut ResolutionDiagnostics,
    ) -> Result<Resolution, ResolutionError> {
        let generated = self.filters.apply_chain(chains.generated.clone(), ctx);
        let candidates =
            self.walker
                .take_with_diagnostics(scope, &generated, target, max_count, diagnostics)?;
        if !candidates.is_empty() {
            return Ok(Resolution {
                candidates,
                origin: ResolutionOrigin::Generated,
            });
        }

        let fallback = self.filters.apply_chain(chains.fallback.clone(), ctx);
        let candidates = self
            .walker
            .take_with_diagnostics(scope, &fallback, target, 1, diagnostics)?;
        if !candidates.is_empty() {
            return Ok(Resolution {
                candidates,
                origin: ResolutionOrigin::Fallback,
            });
        }

        Ok(Resolution::empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{FixedAmbient, NoOverrides};
    use crate::models::RawCandidate;
    use crate::source::{stream, SourceDescriptor};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct MapOverrides(HashMap<(TargetKind, String), String>);

    impl OverrideStore for MapOverrides {
        fn lookup_override(&self, target: &TargetKind, profile: &str) -> Option<RawCandidate> {
            self.0
                .get(&(target.clone(), profile.to_string()))
                .map(|v| RawCandidate::new(v.clone()))
        }
    }

    fn scope() -> OperationScope {
        OperationScope::new(Arc::new(FixedAmbient(TargetKind::ContentItem { id: 10 })))
    }

    fn counted(name: &'static str, values: &'static [&'static str], opens: Arc<AtomicUsize>) -> SourceDescriptor {
        SourceDescriptor::from_fn(name, move |_| {
            opens.fetch_add(1, Ordering::SeqCst);
            Ok(stream::from_vec(
                values.iter().map(|v| RawCandidate::new(*v)).collect(),
            ))
        })
    }

    #[test]
    fn test_override_wins_and_skips_chains() {
        let opens = Arc::new(AtomicUsize::new(0));
        let registry = ChainRegistry::new().with_profile(
            "title",
            vec![counted("generated", &["Generated"], opens.clone())],
            vec![counted("fallback", &["Site"], opens.clone())],
        );
        let mut overrides = MapOverrides::default();
        overrides.0.insert(
            (TargetKind::ContentItem { id: 10 }, "title".to_string()),
            "Custom".to_string(),
        );
        let pipeline = ResolutionPipeline::new(Arc::new(overrides), registry, ChainWalker::default());
        let mut scope = scope();

        let resolution = pipeline
            .resolve_detailed(&mut scope, None, "title", 5)
            .unwrap();

        assert_eq!(resolution.values(), vec!["Custom"]);
        assert_eq!(resolution.origin, ResolutionOrigin::Override);
        assert_eq!(resolution.candidates[0].source, OVERRIDE_SOURCE);
        assert_eq!(opens.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_empty_override_is_ignored() {
        let registry = ChainRegistry::new().with_profile(
            "title",
            vec![counted("generated", &["Generated"], Arc::new(AtomicUsize::new(0)))],
            vec![],
        );
        let mut overrides = MapOverrides::default();
        overrides.0.insert(
            (TargetKind::ContentItem { id: 10 }, "title".to_string()),
            "  ".to_string(),
        );
        let pipeline = ResolutionPipeline::new(Arc::new(overrides), registry, ChainWalker::default());

        let values = pipeline
            .resolve_detailed(&mut scope(), None, "title", 1)
            .unwrap();
        assert_eq!(values.values(), vec!["Generated"]);
    }

    #[test]
    fn test_fallback_only_when_generated_empty() {
        let opens = Arc::new(AtomicUsize::new(0));
        let registry = ChainRegistry::new().with_profile(
            "social",
            vec![counted("scan", &["img-A"], Arc::new(AtomicUsize::new(0)))],
            vec![counted("site-default", &["img-default"], opens.clone())],
        );
        let pipeline = ResolutionPipeline::new(Arc::new(NoOverrides), registry, ChainWalker::default());

        let values = pipeline.resolve(&mut scope(), None, "social", 3).unwrap();

        assert_eq!(values.len(), 1);
        assert_eq!(values[0].value, "img-A");
        assert_eq!(opens.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_fallback_takes_single_candidate() {
        let registry = ChainRegistry::new().with_profile(
            "social",
            vec![],
            vec![
                counted("first", &["d1", "d2"], Arc::new(AtomicUsize::new(0))),
                counted("second", &["d3"], Arc::new(AtomicUsize::new(0))),
            ],
        );
        let pipeline = ResolutionPipeline::new(Arc::new(NoOverrides), registry, ChainWalker::default());

        let resolution = pipeline
            .resolve_detailed(&mut scope(), None, "social", 5)
            .unwrap();

        assert_eq!(resolution.values(), vec!["d1"]);
        assert_eq!(resolution.origin, ResolutionOrigin::Fallback);
    }

    #[test]
    fn test_nothing_resolves_to_empty() {
        let pipeline = ResolutionPipeline::new(
            Arc::new(NoOverrides),
            ChainRegistry::new(),
            ChainWalker::default(),
        );

        let resolution = pipeline
            .resolve_detailed(&mut scope(), None, "unknown", 1)
            .unwrap();

        assert!(resolution.is_empty());
        assert_eq!(resolution.origin, ResolutionOrigin::Empty);
    }

    #[test]
    fn test_invalid_target_propagates() {
        let pipeline = ResolutionPipeline::new(
            Arc::new(NoOverrides),
            ChainRegistry::new(),
            ChainWalker::default(),
        );
        let args = TargetArgs {
            id: Some(1),
            taxonomy: Some(Arc::from("category")),
            type_archive: Some(Arc::from("post")),
            user_context: false,
        };

        let result = pipeline.resolve(&mut scope(), Some(&args), "title", 1);
        assert!(matches!(result, Err(ResolutionError::InvalidTarget(_))));
    }

    #[test]
    fn test_override_for_explicit_target() {
        let registry = ChainRegistry::new().with_profile(
            "title",
            vec![counted("generated", &["Generated"], Arc::new(AtomicUsize::new(0)))],
            vec![],
        );
        let mut overrides = MapOverrides::default();
        overrides.0.insert(
            (TargetKind::ContentItem { id: 77 }, "title".to_string()),
            "Explicit".to_string(),
        );
        let pipeline = ResolutionPipeline::new(Arc::new(overrides), registry, ChainWalker::default());
        let mut scope = scope();

        let explicit = pipeline
            .resolve(&mut scope, Some(&TargetArgs::content(77)), "title", 1)
            .unwrap();
        let ambient = pipeline.resolve(&mut scope, None, "title", 1).unwrap();

        assert_eq!(explicit[0].value, "Explicit");
        assert_eq!(ambient[0].value, "Generated");
    }
}
