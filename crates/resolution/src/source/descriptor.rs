use std::fmt;
use std::sync::Arc;

use super::traits::{CandidateSource, CandidateStream};
use crate::errors::ResolutionError;
use crate::models::{SourceName, TargetKind};

/// Named entry of a source chain.
#[derive(Clone)]
pub struct SourceDescriptor {
    name: SourceName,
    producer: Arc<dyn CandidateSource>,
}

impl SourceDescriptor {
    /// Wrap a source, naming the descriptor after it.
    pub fn new(producer: Arc<dyn CandidateSource>) -> Self {
        Self {
            name: SourceName::Owned(producer.name().to_string()),
            producer,
        }
    }

    /// Wrap a source under an explicit descriptor name.
    pub fn named(name: impl Into<SourceName>, producer: Arc<dyn CandidateSource>) -> Self {
        Self {
            name: name.into(),
            producer,
        }
    }

    /// Build a descriptor from a closure.
    pub fn from_fn<F>(name: impl Into<SourceName>, open: F) -> Self
    where
        F: Fn(&TargetKind) -> Result<CandidateStream, ResolutionError> + Send + Sync + 'static,
    {
        let name = name.into();
        Self {
            producer: Arc::new(FnSource {
                name: name.to_string(),
                open,
            }),
            name,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn source_name(&self) -> &SourceName {
        &self.name
    }

    pub fn open(&self, target: &TargetKind) -> Result<CandidateStream, ResolutionError> {
        self.producer.open(target)
    }
}

impl fmt::Debug for SourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceDescriptor")
            .field("name", &self.name)
            .finish()
    }
}

/// Candidate source backed by a closure.
struct FnSource<F> {
    name: String,
    open: F,
}

impl<F> CandidateSource for FnSource<F>
where
    F: Fn(&TargetKind) -> Result<CandidateStream, ResolutionError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&self, target: &TargetKind) -> Result<CandidateStream, ResolutionError> {
        (self.open)(target)
    }
}
