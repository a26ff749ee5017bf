//! Candidate sources and source chains.
//!
//! A [`SourceChain`] is an ordered list of [`SourceDescriptor`]s for one
//! profile and [`ChainRole`]. Each descriptor wraps a [`CandidateSource`]
//! that opens a lazy [`CandidateStream`] for a concrete target.

mod chain;
mod descriptor;
mod traits;

pub use chain::{ChainId, ChainRole, SourceChain};
pub use descriptor::SourceDescriptor;
pub use traits::{stream, CandidateSource, CandidateStream, StreamItem};
