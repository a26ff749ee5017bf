use serde::Serialize;

use crate::models::Candidate;
use crate::walker::ResolutionOrigin;

/// Outcome of resolving one field.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Resolution {
    pub candidates: Vec<Candidate>,
    pub origin: ResolutionOrigin,
}

impl Resolution {
    /// Nothing could be resolved.
    pub fn empty() -> Self {
        Self {
            candidates: Vec::new(),
            origin: ResolutionOrigin::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn first(&self) -> Option<&Candidate> {
        self.candidates.first()
    }

    /// Primary value of the first candidate, if any.
    pub fn first_value(&self) -> Option<&str> {
        self.first().map(|c| c.value.as_str())
    }

    pub fn values(&self) -> Vec<&str> {
        self.candidates.iter().map(|c| c.value.as_str()).collect()
    }

    pub fn into_candidates(self) -> Vec<Candidate> {
        self.candidates
    }
}
