//! Chain walking and ambient-scoped memoization.
//!
//! This module provides:
//! - [`ChainWalker`] - pulls candidates from a chain until `max_count` are accepted
//! - [`ResumableCursor`] - saved progress for one (target, chain) pair
//! - [`CursorCache`] - cursors for ambient targets, owned by an [`OperationScope`]
//! - [`ResolutionDiagnostics`] - per-step record of what each source did

mod cache;
mod cursor;
mod diagnostics;
mod scope;
mod walker;

pub use cache::{CursorCache, CursorKey};
pub use cursor::{CursorSnapshot, ResumableCursor};
pub use diagnostics::{
    AttemptOutcome, ResolutionDiagnostics, ResolutionOrigin, SourceAttempt, CACHE_SOURCE,
};
pub use scope::OperationScope;
pub use walker::{ChainWalker, WalkerConfig};
