//! Resolution models
//!
//! This module contains the core data types for field resolution:
//! - `types` - Type aliases for common identifiers (Profile, SourceName, SourceId)
//! - `target` - Target identity (TargetKind, TargetKey) and normalization of raw arguments
//! - `candidate` - Raw and enriched candidates with their descriptive attributes

mod candidate;
mod target;
mod types;

pub use candidate::{Candidate, CandidateAttributes, RawCandidate};
pub use target::{normalize, TargetArgs, TargetKey, TargetKind};
pub use types::{Profile, SourceId, SourceName};
