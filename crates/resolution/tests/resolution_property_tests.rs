//! Property-based tests for target normalization and cursor resumption.
//!
//! Uses the `proptest` crate for random test case generation.

use std::sync::Arc;

use proptest::prelude::*;
use metafield_resolution::{
    normalize, stream, ChainRole, ChainWalker, FixedAmbient, OperationScope, RawCandidate,
    ResolutionError, SourceChain, SourceDescriptor, TargetArgs, TargetKey, TargetKind,
};

// =============================================================================
// Generators
// =============================================================================

fn arb_name() -> impl Strategy<Value = Option<Arc<str>>> {
    proptest::option::of("[a-z_]{0,8}".prop_map(|s| Arc::<str>::from(s.as_str())))
}

/// Arbitrary, possibly conflicting, caller arguments.
fn arb_args() -> impl Strategy<Value = TargetArgs> {
    (
        proptest::option::of(0u64..50),
        arb_name(),
        arb_name(),
        any::<bool>(),
    )
        .prop_map(|(id, taxonomy, type_archive, user_context)| TargetArgs {
            id,
            taxonomy,
            type_archive,
            user_context,
        })
}

/// A chain of sources with the given values, where empty strings are
/// rejected by validation.
fn arb_chain_values() -> impl Strategy<Value = Vec<Vec<String>>> {
    proptest::collection::vec(
        proptest::collection::vec(prop_oneof![Just(String::new()), "[a-z]{1,4}"], 0..5),
        0..4,
    )
}

fn chain_from(values: &[Vec<String>]) -> SourceChain {
    let descriptors = values
        .iter()
        .enumerate()
        .map(|(i, vals)| {
            let vals = vals.clone();
            SourceDescriptor::from_fn(format!("source-{}", i), move |_| {
                Ok(stream::from_vec(
                    vals.iter().map(|v| RawCandidate::new(v.clone())).collect(),
                ))
            })
        })
        .collect();
    SourceChain::new("social", ChainRole::Generated, descriptors)
}

fn new_scope() -> OperationScope {
    OperationScope::new(Arc::new(FixedAmbient(TargetKind::ContentItem { id: 9 })))
}

// =============================================================================
// Normalization
// =============================================================================

proptest! {
    /// Normalizing an already-normalized key yields the same key.
    #[test]
    fn prop_normalize_is_idempotent(args in arb_args()) {
        if let Ok(key) = normalize(Some(&args), "title") {
            prop_assert_eq!(key.normalized().unwrap(), key);
        }
    }

    /// The same input always yields the same outcome.
    #[test]
    fn prop_normalize_is_deterministic(args in arb_args()) {
        prop_assert_eq!(normalize(Some(&args), "title"), normalize(Some(&args), "title"));
    }

    /// Taxonomy and type archive together are always rejected.
    #[test]
    fn prop_taxonomy_with_type_archive_is_invalid(
        id in proptest::option::of(1u64..50),
        taxonomy in "[a-z]{1,8}",
        post_type in "[a-z]{1,8}",
        user_context in any::<bool>(),
    ) {
        let args = TargetArgs {
            id,
            taxonomy: Some(Arc::from(taxonomy.as_str())),
            type_archive: Some(Arc::from(post_type.as_str())),
            user_context,
        };

        let result = normalize(Some(&args), "title");
        prop_assert!(matches!(result, Err(ResolutionError::InvalidTarget(_))));
    }

    /// A bare id always names a content item.
    #[test]
    fn prop_bare_id_is_content_item(id in 1u64..10_000) {
        let key = normalize(Some(&TargetArgs::content(id)), "title").unwrap();
        prop_assert_eq!(key.kind, TargetKind::ContentItem { id });
    }
}

// =============================================================================
// Cursor resumption
// =============================================================================

proptest! {
    /// Growing requests against one ambient cursor only ever extend the
    /// previously returned prefix, and match a single fresh walk.
    #[test]
    fn prop_resumed_walk_is_prefix_stable(
        values in arb_chain_values(),
        counts in proptest::collection::vec(0usize..8, 1..5),
    ) {
        let chain = chain_from(&values);
        let walker = ChainWalker::default();
        let target = TargetKey::ambient("social");
        let mut scope = new_scope();

        let mut previous: Vec<String> = Vec::new();
        for count in counts {
            let taken: Vec<String> = walker
                .take(&mut scope, &chain, &target, count)
                .unwrap()
                .into_iter()
                .map(|c| c.value)
                .collect();

            prop_assert!(taken.len() <= count);
            let common = taken.len().min(previous.len());
            prop_assert_eq!(&taken[..common], &previous[..common]);

            let mut fresh_scope = new_scope();
            let fresh: Vec<String> = walker
                .take(&mut fresh_scope, &chain, &target, count)
                .unwrap()
                .into_iter()
                .map(|c| c.value)
                .collect();
            prop_assert_eq!(&taken, &fresh);

            if taken.len() > previous.len() {
                previous = taken;
            }
        }
    }

    /// Accepted candidates are exactly the non-empty values in chain order.
    #[test]
    fn prop_walk_keeps_chain_order(values in arb_chain_values(), count in 0usize..10) {
        let chain = chain_from(&values);
        let expected: Vec<String> = values
            .iter()
            .flatten()
            .filter(|v| !v.is_empty())
            .take(count)
            .cloned()
            .collect();

        let taken: Vec<String> = ChainWalker::default()
            .take(&mut new_scope(), &chain, &TargetKey::ambient("social"), count)
            .unwrap()
            .into_iter()
            .map(|c| c.value)
            .collect();

        prop_assert_eq!(taken, expected);
    }
}
