//! Collaborator traits.
//!
//! The engine never persists overrides, never inspects requests and never
//! reads media metadata itself. Those concerns are supplied by the
//! surrounding system through the traits below.

use crate::models::{RawCandidate, SourceId, TargetKind};

/// Read-only access to authoritative per-target overrides.
pub trait OverrideStore: Send + Sync {
    /// Look up the override for a concrete target and profile.
    ///
    /// `target` is never [`TargetKind::Ambient`].
    fn lookup_override(&self, target: &TargetKind, profile: &str) -> Option<RawCandidate>;
}

/// Determines what the current operation is about.
pub trait AmbientQuery: Send + Sync {
    /// Resolve the ambient target to a concrete kind.
    ///
    /// Returning [`TargetKind::Ambient`] is a contract violation and is
    /// surfaced as an invalid target.
    fn resolve_ambient(&self) -> TargetKind;
}

/// Attribute lookups keyed by a candidate's backing item.
///
/// Unknown ids return `None`; implementations never error.
pub trait AttributeLookup: Send + Sync {
    /// Width and height in pixels.
    fn dimensions(&self, source_id: SourceId) -> Option<(u32, u32)>;

    fn alt_text(&self, source_id: SourceId) -> Option<String>;

    fn caption(&self, source_id: SourceId) -> Option<String>;

    /// Byte size of the backing file.
    fn filesize(&self, source_id: SourceId) -> Option<u64>;
}

/// Attribute lookup that knows nothing. Every candidate gets zero defaults.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAttributes;

impl AttributeLookup for NoAttributes {
    fn dimensions(&self, _source_id: SourceId) -> Option<(u32, u32)> {
        None
    }

    fn alt_text(&self, _source_id: SourceId) -> Option<String> {
        None
    }

    fn caption(&self, _source_id: SourceId) -> Option<String> {
        None
    }

    fn filesize(&self, _source_id: SourceId) -> Option<u64> {
        None
    }
}

/// Override store without any overrides.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOverrides;

impl OverrideStore for NoOverrides {
    fn lookup_override(&self, _target: &TargetKind, _profile: &str) -> Option<RawCandidate> {
        None
    }
}

/// Ambient query that always answers with the same target.
#[derive(Clone, Debug)]
pub struct FixedAmbient(pub TargetKind);

impl AmbientQuery for FixedAmbient {
    fn resolve_ambient(&self) -> TargetKind {
        self.0.clone()
    }
}
