//! Resumable cursors: saved progress through one source chain.

use std::fmt;

use serde::Serialize;

use crate::models::Candidate;
use crate::source::CandidateStream;

/// Suspended position of the active producer.
pub(crate) struct ProducerState {
    pub(crate) stream: CandidateStream,
    /// Items pulled from this producer so far.
    pub(crate) pulled: usize,
    /// Consecutive candidates rejected by validation.
    pub(crate) consecutive_rejections: usize,
}

impl ProducerState {
    pub(crate) fn new(stream: CandidateStream) -> Self {
        Self {
            stream,
            pulled: 0,
            consecutive_rejections: 0,
        }
    }
}

/// Progress through a source chain for one target.
///
/// `accepted` is append-only: once a candidate has been returned its
/// position never changes for the lifetime of the cursor.
#[derive(Default)]
pub struct ResumableCursor {
    pub(crate) accepted: Vec<Candidate>,
    pub(crate) producer_index: usize,
    pub(crate) producer_state: Option<ProducerState>,
    pub(crate) exhausted: bool,
    pub(crate) total_pulls: usize,
}

impl ResumableCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Candidates accepted so far, in acceptance order.
    pub fn accepted(&self) -> &[Candidate] {
        &self.accepted
    }

    /// Index of the active source descriptor.
    pub fn producer_index(&self) -> usize {
        self.producer_index
    }

    /// Whether every producer in the chain has been drained.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Whether a producer is suspended mid-stream.
    pub fn is_suspended(&self) -> bool {
        self.producer_state.is_some()
    }

    /// Total raw candidates pulled from all producers.
    pub fn total_pulls(&self) -> usize {
        self.total_pulls
    }

    /// Inspectable, serializable view of this cursor.
    pub fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot {
            accepted: self.accepted.iter().map(|c| c.value.clone()).collect(),
            producer_index: self.producer_index,
            active_pulls: self.producer_state.as_ref().map(|s| s.pulled),
            total_pulls: self.total_pulls,
            exhausted: self.exhausted,
        }
    }

    pub(crate) fn into_accepted(self) -> Vec<Candidate> {
        self.accepted
    }

    /// Drop the active producer and move to the next descriptor.
    pub(crate) fn advance_producer(&mut self) {
        self.producer_state = None;
        self.producer_index += 1;
    }
}

impl fmt::Debug for ResumableCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResumableCursor")
            .field("accepted", &self.accepted.len())
            .field("producer_index", &self.producer_index)
            .field("suspended", &self.is_suspended())
            .field("exhausted", &self.exhausted)
            .finish()
    }
}

/// Serializable view of a [`ResumableCursor`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorSnapshot {
    pub accepted: Vec<String>,
    pub producer_index: usize,
    /// Pulls from the suspended producer, if one is suspended
    pub active_pulls: Option<usize>,
    pub total_pulls: usize,
    pub exhausted: bool,
}
