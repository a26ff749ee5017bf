//! Extension points.
//!
//! Filters let external code inspect or replace in-flight values. They are
//! called synchronously, in registration order, and are assumed to be free
//! of side effects.

use std::fmt;
use std::sync::Arc;

use super::resolution::Resolution;
use crate::models::{Candidate, TargetKey, TargetKind};
use crate::source::SourceChain;

/// What a filter is being asked about.
#[derive(Clone, Copy, Debug)]
pub struct FilterContext<'a> {
    /// The normalized key (may be ambient)
    pub target: &'a TargetKey,
    /// The concrete target the key resolved to
    pub concrete: &'a TargetKind,
}

/// Hooks into the resolution pipeline. Every hook defaults to identity.
pub trait ResolutionFilter: Send + Sync {
    /// Called after the override lookup, before deciding whether to generate.
    fn filter_override(&self, value: Option<Candidate>, _ctx: &FilterContext<'_>) -> Option<Candidate> {
        value
    }

    /// Called when assembling a chain for a profile.
    ///
    /// Changing the chain's sources changes its identity, so a modified
    /// chain never resumes a cursor built for the original.
    fn filter_chain(&self, chain: SourceChain, _ctx: &FilterContext<'_>) -> SourceChain {
        chain
    }

    /// Called with the final resolution.
    fn filter_resolution(&self, resolution: Resolution, _ctx: &FilterContext<'_>) -> Resolution {
        resolution
    }
}

/// Ordered collection of filters.
#[derive(Clone, Default)]
pub struct FilterSet {
    filters: Vec<Arc<dyn ResolutionFilter>>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, filter: Arc<dyn ResolutionFilter>) {
        self.filters.push(filter);
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn apply_override(&self, value: Option<Candidate>, ctx: &FilterContext<'_>) -> Option<Candidate> {
        self.filters
            .iter()
            .fold(value, |value, f| f.filter_override(value, ctx))
    }

    pub fn apply_chain(&self, chain: SourceChain, ctx: &FilterContext<'_>) -> SourceChain {
        self.filters
            .iter()
            .fold(chain, |chain, f| f.filter_chain(chain, ctx))
    }

    pub fn apply_resolution(&self, resolution: Resolution, ctx: &FilterContext<'_>) -> Resolution {
        self.filters
            .iter()
            .fold(resolution, |resolution, f| f.filter_resolution(resolution, ctx))
    }
}

impl fmt::Debug for FilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterSet")
            .field("filters", &self.filters.len())
            .finish()
    }
}
