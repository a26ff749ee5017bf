//! Concrete candidate sources for the metadata profiles.
//!
//! Opening a source is cheap everywhere: repository lookups and HTML parsing
//! happen on the first pull, so a satisfied cursor never pays for them.

pub mod image_sources;
pub mod robots_sources;
pub mod text_sources;

pub use image_sources::{ContentScanSource, FeaturedImageSource, SiteImageSource};
pub use robots_sources::{DirectiveSettingsSource, ProtectionSource, SiteWideDirectiveSource};
pub use text_sources::{FieldOverrideSource, StaticTextSource, TargetDescriptionSource, TargetTitleSource};

use metafield_resolution::{stream, CandidateStream, RawCandidate, ResolutionError};

/// Single-shot stream whose candidate is computed on the first pull.
pub(crate) fn deferred<F>(produce: F) -> CandidateStream
where
    F: FnOnce() -> Result<Option<RawCandidate>, ResolutionError> + Send + 'static,
{
    let mut produce = Some(produce);
    stream::from_iter(std::iter::from_fn(move || {
        let produce = produce.take()?;
        produce().transpose()
    }))
}

/// Convert a repository failure into a producer failure of `source`.
pub(crate) fn producer_error(source: &str) -> impl Fn(crate::errors::Error) -> ResolutionError + '_ {
    move |e| ResolutionError::producer(source, e.to_string())
}

/// `Some(value)` unless it is blank.
pub(crate) fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
