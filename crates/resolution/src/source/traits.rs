//! Candidate source trait definitions.
//!
//! A source opens a lazy stream of raw candidates for a concrete target.
//! The stream is the producer's resumable state: the walker keeps it
//! suspended inside a cursor and pulls from it again on a later call.

use crate::errors::ResolutionError;
use crate::models::{RawCandidate, TargetKind};

/// Item yielded by a candidate stream.
pub type StreamItem = Result<RawCandidate, ResolutionError>;

/// Lazy, possibly-infinite sequence of raw candidates.
///
/// Each `next()` is one pull. A stream that yields `Some(Err(..))` is
/// considered failed and is never pulled again.
pub type CandidateStream = Box<dyn Iterator<Item = StreamItem> + Send>;

/// Trait for candidate producers.
///
/// Implement this trait to add a new place candidates can come from
/// (a featured image, a content scan, a settings value, ...).
///
/// # Example
///
/// ```ignore
/// struct SiteDefaultSource {
///     url: String,
/// }
///
/// impl CandidateSource for SiteDefaultSource {
///     fn name(&self) -> &str {
///         "site-default"
///     }
///
///     fn open(&self, _target: &TargetKind) -> Result<CandidateStream, ResolutionError> {
///         Ok(stream::once(RawCandidate::new(self.url.clone())))
///     }
/// }
/// ```
pub trait CandidateSource: Send + Sync {
    /// Stable identifier for this source.
    ///
    /// Used for logging, diagnostics and chain identity.
    fn name(&self) -> &str;

    /// Open a fresh stream of candidates for a concrete target.
    ///
    /// `target` is never [`TargetKind::Ambient`]; the walker resolves the
    /// ambient target before opening any source. Opening should be cheap:
    /// expensive work belongs in the first pull, so a cached cursor that is
    /// already satisfied never pays for it.
    fn open(&self, target: &TargetKind) -> Result<CandidateStream, ResolutionError>;
}

/// Helpers for building candidate streams.
pub mod stream {
    use super::{CandidateStream, StreamItem};
    use crate::models::RawCandidate;

    /// A stream that yields nothing.
    pub fn empty() -> CandidateStream {
        Box::new(std::iter::empty())
    }

    /// A single-shot stream.
    pub fn once(candidate: RawCandidate) -> CandidateStream {
        Box::new(std::iter::once(Ok(candidate)))
    }

    /// A single-shot stream when a value is present, empty otherwise.
    pub fn maybe(candidate: Option<RawCandidate>) -> CandidateStream {
        Box::new(candidate.into_iter().map(Ok))
    }

    /// A stream over already-known candidates.
    pub fn from_vec(candidates: Vec<RawCandidate>) -> CandidateStream {
        Box::new(candidates.into_iter().map(Ok))
    }

    /// A stream that pulls lazily from any iterator of results.
    pub fn from_iter<I>(iter: I) -> CandidateStream
    where
        I: Iterator<Item = StreamItem> + Send + 'static,
    {
        Box::new(iter)
    }
}
