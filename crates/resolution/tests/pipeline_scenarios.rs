//! End-to-end resolution scenarios against in-test sources.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use metafield_resolution::{
    stream, AttemptOutcome, ChainRegistry, ChainWalker, FixedAmbient, NoOverrides,
    OperationScope, OverrideStore, RawCandidate, ResolutionDiagnostics, ResolutionError,
    ResolutionOrigin, ResolutionPipeline, SourceDescriptor, TargetArgs, TargetKind,
};

// =============================================================================
// Fixtures
// =============================================================================

const AMBIENT_POST: TargetKind = TargetKind::ContentItem { id: 42 };

/// Counts opens and pulls of one source.
#[derive(Default)]
struct Counters {
    opens: AtomicUsize,
    pulls: AtomicUsize,
}

impl Counters {
    fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    fn pulls(&self) -> usize {
        self.pulls.load(Ordering::SeqCst)
    }
}

/// Descriptor yielding `values` one pull at a time.
fn source(name: &'static str, values: &[&str], counters: Arc<Counters>) -> SourceDescriptor {
    let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    SourceDescriptor::from_fn(name, move |_| {
        counters.opens.fetch_add(1, Ordering::SeqCst);
        let counters = counters.clone();
        Ok(stream::from_iter(values.clone().into_iter().map(move |v| {
            counters.pulls.fetch_add(1, Ordering::SeqCst);
            Ok(RawCandidate::new(v))
        })))
    })
}

/// Descriptor whose stream yields one value, then fails.
fn flaky(name: &'static str, first: &'static str) -> SourceDescriptor {
    SourceDescriptor::from_fn(name, move |_| {
        let mut pulled = 0;
        Ok(stream::from_iter(std::iter::from_fn(move || {
            pulled += 1;
            match pulled {
                1 => Some(Ok(RawCandidate::new(first))),
                2 => Some(Err(ResolutionError::producer(name, "scan aborted"))),
                _ => None,
            }
        })))
    })
}

#[derive(Default)]
struct Overrides(HashMap<(TargetKind, String), String>);

impl OverrideStore for Overrides {
    fn lookup_override(&self, target: &TargetKind, profile: &str) -> Option<RawCandidate> {
        self.0
            .get(&(target.clone(), profile.to_string()))
            .map(|v| RawCandidate::new(v.clone()))
    }
}

struct ImageFixture {
    featured: Arc<Counters>,
    scan: Arc<Counters>,
    default: Arc<Counters>,
    pipeline: ResolutionPipeline,
}

fn image_fixture(overrides: Overrides) -> ImageFixture {
    let featured = Arc::new(Counters::default());
    let scan = Arc::new(Counters::default());
    let default = Arc::new(Counters::default());

    let registry = ChainRegistry::new().with_profile(
        "social",
        vec![
            source("featured", &[], featured.clone()),
            source("content-scan", &["img-A", "img-B"], scan.clone()),
        ],
        vec![source("site-default", &["img-default"], default.clone())],
    );

    ImageFixture {
        featured,
        scan,
        default,
        pipeline: ResolutionPipeline::new(Arc::new(overrides), registry, ChainWalker::default()),
    }
}

fn scope() -> OperationScope {
    OperationScope::new(Arc::new(FixedAmbient(AMBIENT_POST)))
}

fn values(pipeline: &ResolutionPipeline, scope: &mut OperationScope, max: usize) -> Vec<String> {
    pipeline
        .resolve(scope, None, "social", max)
        .unwrap()
        .into_iter()
        .map(|c| c.value)
        .collect()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_generated_chain_resumes_on_larger_request() {
    let fixture = image_fixture(Overrides::default());
    let mut scope = scope();

    assert_eq!(values(&fixture.pipeline, &mut scope, 1), vec!["img-A"]);
    assert_eq!(
        values(&fixture.pipeline, &mut scope, 5),
        vec!["img-A", "img-B"]
    );

    // Each source is opened once and pulled once per yielded item.
    assert_eq!(fixture.featured.opens(), 1);
    assert_eq!(fixture.scan.opens(), 1);
    assert_eq!(fixture.scan.pulls(), 2);
    assert_eq!(fixture.default.opens(), 0);
}

#[test]
fn test_empty_generated_chain_uses_fallback() {
    let default = Arc::new(Counters::default());
    let registry = ChainRegistry::new().with_profile(
        "social",
        vec![],
        vec![source("site-default", &["img-default"], default.clone())],
    );
    let pipeline = ResolutionPipeline::new(Arc::new(NoOverrides), registry, ChainWalker::default());
    let mut scope = scope();

    let resolution = pipeline
        .resolve_detailed(&mut scope, None, "social", 1)
        .unwrap();

    assert_eq!(resolution.values(), vec!["img-default"]);
    assert_eq!(resolution.origin, ResolutionOrigin::Fallback);
}

#[test]
fn test_override_short_circuits_every_chain() {
    let mut overrides = Overrides::default();
    overrides
        .0
        .insert((AMBIENT_POST, "social".to_string()), "img-custom".to_string());
    let fixture = image_fixture(overrides);
    let mut scope = scope();

    for max in [0, 1, 5] {
        assert_eq!(values(&fixture.pipeline, &mut scope, max), vec!["img-custom"]);
    }

    assert_eq!(fixture.featured.opens(), 0);
    assert_eq!(fixture.scan.opens(), 0);
    assert_eq!(fixture.default.opens(), 0);
}

#[test]
fn test_repeated_single_resolution_is_identical() {
    let fixture = image_fixture(Overrides::default());
    let mut scope = scope();

    let first = fixture.pipeline.resolve(&mut scope, None, "social", 1).unwrap();
    let second = fixture.pipeline.resolve(&mut scope, None, "social", 1).unwrap();

    assert_eq!(first, second);
    assert_eq!(fixture.scan.pulls(), 1);
}

#[test]
fn test_failing_producer_falls_through() {
    let tail = Arc::new(Counters::default());
    let registry = ChainRegistry::new().with_profile(
        "social",
        vec![
            flaky("content-scan", "img-A"),
            source("attached", &["img-C"], tail.clone()),
        ],
        vec![],
    );
    let pipeline = ResolutionPipeline::new(Arc::new(NoOverrides), registry, ChainWalker::default());
    let mut scope = scope();
    let mut diagnostics = ResolutionDiagnostics::new();

    let resolution = pipeline
        .resolve_with_diagnostics(&mut scope, None, "social", 3, &mut diagnostics)
        .unwrap();

    assert_eq!(resolution.values(), vec!["img-A", "img-C"]);
    assert_eq!(diagnostics.failures().len(), 1);
    assert!(diagnostics
        .attempts
        .iter()
        .any(|a| a.source == "content-scan" && matches!(a.outcome, AttemptOutcome::Failed { .. })));
}

#[test]
fn test_explicit_target_bypasses_cursor_cache() {
    let fixture = image_fixture(Overrides::default());
    let mut scope = scope();
    let explicit = TargetArgs::content(7);

    fixture
        .pipeline
        .resolve(&mut scope, Some(&explicit), "social", 1)
        .unwrap();
    fixture
        .pipeline
        .resolve(&mut scope, Some(&explicit), "social", 1)
        .unwrap();

    assert!(scope.cursors().is_empty());
    assert_eq!(fixture.scan.opens(), 2);
}

#[test]
fn test_reset_discards_ambient_progress() {
    let fixture = image_fixture(Overrides::default());
    let mut scope = scope();

    values(&fixture.pipeline, &mut scope, 1);
    scope.reset_ambient_caches();
    values(&fixture.pipeline, &mut scope, 1);

    assert_eq!(fixture.scan.opens(), 2);
    assert_eq!(scope.generation(), 1);
}

#[test]
fn test_conflicting_target_is_rejected() {
    let fixture = image_fixture(Overrides::default());
    let mut scope = scope();
    let args = TargetArgs {
        id: Some(3),
        taxonomy: Some(Arc::from("genre")),
        type_archive: Some(Arc::from("book")),
        user_context: false,
    };

    let result = fixture.pipeline.resolve(&mut scope, Some(&args), "social", 1);

    assert!(matches!(result, Err(ResolutionError::InvalidTarget(_))));
    assert_eq!(fixture.featured.opens(), 0);
}
