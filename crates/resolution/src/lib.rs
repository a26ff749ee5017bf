//! Metafield Resolution Crate
//!
//! Lazy, memoized resolution of metadata field values (titles, descriptions,
//! images, robots directives) from ordered chains of candidate sources.
//!
//! # Overview
//!
//! A field is resolved for a target (a content item, taxonomy term, content
//! type archive or user, or whatever the current operation is about) and a
//! profile naming the field's role. Resolution follows a fixed policy:
//!
//! - An authoritative override wins outright
//! - Otherwise candidates are pulled lazily from the profile's generated chain
//! - Otherwise at most one candidate comes from the fallback chain
//!
//! Work done for the ambient target is kept in an [`OperationScope`] so a
//! later request for more candidates resumes where the last one stopped.
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |   TargetArgs     | --> |    TargetKey     |  (normalize)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                         +-------------------+
//!                         | ResolutionPipeline|  (override -> generated -> fallback)
//!                         +-------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |   ChainWalker    |  (resumable cursors per scope)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          | CandidateSource  |  (lazy producers)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |    Candidate     |  (enriched + validated)
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`TargetKind`] / [`TargetKey`] - what a field is resolved for
//! - [`SourceChain`] - ordered candidate sources for a profile
//! - [`Candidate`] - an enriched, validated value
//! - [`OperationScope`] - owns the ambient target and the cursor cache
//! - [`ResolutionError`] - the engine's error type

pub mod collaborators;
pub mod enrich;
pub mod errors;
pub mod models;
pub mod pipeline;
pub mod source;
pub mod walker;

pub use collaborators::{
    AmbientQuery, AttributeLookup, FixedAmbient, NoAttributes, NoOverrides, OverrideStore,
};

pub use enrich::{CandidateValidator, Enricher, ValidationIssue, ValidationSeverity, ValidatorConfig};

pub use errors::{RecoveryClass, ResolutionError};

pub use models::{
    normalize, Candidate, CandidateAttributes, Profile, RawCandidate, SourceId, SourceName,
    TargetArgs, TargetKey, TargetKind,
};

pub use pipeline::{
    ChainRegistry, FilterContext, FilterSet, ProfileChains, Resolution, ResolutionFilter,
    ResolutionPipeline, OVERRIDE_SOURCE,
};

pub use source::{
    stream, CandidateSource, CandidateStream, ChainId, ChainRole, SourceChain, SourceDescriptor,
    StreamItem,
};

pub use walker::{
    AttemptOutcome, ChainWalker, CursorCache, CursorKey, CursorSnapshot, OperationScope,
    ResolutionDiagnostics, ResolutionOrigin, ResumableCursor, SourceAttempt, WalkerConfig,
};
