//! Image candidate sources.
//!
//! Every source here yields absolute http(s) URLs only. Candidates carry the
//! backing attachment id when one is known, so the enricher can fill in
//! dimensions, alt text and file size.

use std::sync::Arc;

use log::debug;
use metafield_resolution::{
    stream, CandidateSource, CandidateStream, RawCandidate, ResolutionError, StreamItem,
    TargetKind,
};
use url::Url;

use super::{deferred, producer_error};
use crate::constants::{SOURCE_CONTENT_SCAN, SOURCE_FEATURED_IMAGE};
use crate::content::ContentRepositoryTrait;
use crate::settings::SiteImage;
use crate::utils::html_utils::{extract_images, http_url, InlineImage};

/// The featured image (thumbnail) of a content item.
pub struct FeaturedImageSource {
    content: Arc<dyn ContentRepositoryTrait>,
}

impl FeaturedImageSource {
    pub fn new(content: Arc<dyn ContentRepositoryTrait>) -> Self {
        Self { content }
    }
}

impl CandidateSource for FeaturedImageSource {
    fn name(&self) -> &str {
        SOURCE_FEATURED_IMAGE
    }

    fn open(&self, target: &TargetKind) -> Result<CandidateStream, ResolutionError> {
        let TargetKind::ContentItem { id } = *target else {
            return Ok(stream::empty());
        };
        let content = self.content.clone();

        Ok(deferred(move || {
            let to_failure = producer_error(SOURCE_FEATURED_IMAGE);
            let Some(attachment_id) = content
                .content_item(id)
                .map_err(&to_failure)?
                .and_then(|item| item.featured_image)
            else {
                return Ok(None);
            };

            let Some(attachment) = content.attachment(attachment_id).map_err(&to_failure)? else {
                debug!("Featured image {} of item {} does not exist", attachment_id, id);
                return Ok(None);
            };

            Ok(http_url(&attachment.url, None)
                .map(|url| RawCandidate::new(url.to_string()).with_source_id(attachment_id)))
        }))
    }
}

/// Images embedded in a content item's rendered body, in document order.
///
/// The body is parsed on the first pull, never on open.
pub struct ContentScanSource {
    content: Arc<dyn ContentRepositoryTrait>,
    base_url: Option<Url>,
}

impl ContentScanSource {
    pub fn new(content: Arc<dyn ContentRepositoryTrait>, base_url: Option<Url>) -> Self {
        Self { content, base_url }
    }
}

impl CandidateSource for ContentScanSource {
    fn name(&self) -> &str {
        SOURCE_CONTENT_SCAN
    }

    fn open(&self, target: &TargetKind) -> Result<CandidateStream, ResolutionError> {
        let TargetKind::ContentItem { id } = *target else {
            return Ok(stream::empty());
        };
        Ok(Box::new(ScanStream {
            state: ScanState::Pending {
                content: self.content.clone(),
                id,
                base_url: self.base_url.clone(),
            },
        }))
    }
}

enum ScanState {
    Pending {
        content: Arc<dyn ContentRepositoryTrait>,
        id: u64,
        base_url: Option<Url>,
    },
    Scanning(std::vec::IntoIter<RawCandidate>),
    Done,
}

/// Resumable scan over one item's inline images.
struct ScanStream {
    state: ScanState,
}

impl ScanStream {
    fn scan(
        content: &dyn ContentRepositoryTrait,
        id: u64,
        base_url: Option<&Url>,
    ) -> Result<Vec<RawCandidate>, ResolutionError> {
        let Some(item) = content
            .content_item(id)
            .map_err(producer_error(SOURCE_CONTENT_SCAN))?
        else {
            return Ok(Vec::new());
        };

        let images = extract_images(&item.content, base_url);
        debug!("Content scan of item {} found {} images", id, images.len());
        Ok(images.into_iter().map(to_candidate).collect())
    }
}

fn to_candidate(image: InlineImage) -> RawCandidate {
    let mut candidate = RawCandidate::new(image.url.to_string())
        .with_alt(image.alt)
        .with_dimensions(image.width, image.height);
    candidate.source_id = image.attachment_id;
    candidate
}

impl Iterator for ScanStream {
    type Item = StreamItem;

    fn next(&mut self) -> Option<StreamItem> {
        loop {
            match std::mem::replace(&mut self.state, ScanState::Done) {
                ScanState::Pending {
                    content,
                    id,
                    base_url,
                } => match Self::scan(content.as_ref(), id, base_url.as_ref()) {
                    Ok(found) => self.state = ScanState::Scanning(found.into_iter()),
                    Err(e) => return Some(Err(e)),
                },
                ScanState::Scanning(mut images) => {
                    let next = images.next();
                    if next.is_some() {
                        self.state = ScanState::Scanning(images);
                    }
                    return next.map(Ok);
                }
                ScanState::Done => return None,
            }
        }
    }
}

/// An image configured in settings (site logo, default social image).
pub struct SiteImageSource {
    name: &'static str,
    image: Option<SiteImage>,
}

impl SiteImageSource {
    pub fn new(name: &'static str, image: Option<SiteImage>) -> Self {
        Self { name, image }
    }
}

impl CandidateSource for SiteImageSource {
    fn name(&self) -> &str {
        self.name
    }

    fn open(&self, _target: &TargetKind) -> Result<CandidateStream, ResolutionError> {
        let candidate = self.image.as_ref().and_then(|image| {
            let url = http_url(&image.url, None)?;
            let mut candidate = RawCandidate::new(url.to_string());
            candidate.source_id = image.attachment_id;
            Some(candidate)
        });
        Ok(stream::maybe(candidate))
    }
}
