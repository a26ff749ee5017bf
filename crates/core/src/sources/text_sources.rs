//! Sources for single-valued text fields.

use std::sync::Arc;

use metafield_resolution::{
    stream, CandidateSource, CandidateStream, OverrideStore, RawCandidate, ResolutionError,
    TargetKind,
};

use super::{deferred, non_blank, producer_error};
use crate::constants::{SOURCE_TARGET_DESCRIPTION, SOURCE_TARGET_TITLE};
use crate::content::ContentRepositoryTrait;
use crate::errors::Result;
use crate::utils::html_utils::extract_text;
use crate::utils::text_utils::summarize;

/// The target's own title: item title, term name, archive label or user
/// display name.
pub struct TargetTitleSource {
    content: Arc<dyn ContentRepositoryTrait>,
}

impl TargetTitleSource {
    pub fn new(content: Arc<dyn ContentRepositoryTrait>) -> Self {
        Self { content }
    }
}

fn lookup_title(content: &dyn ContentRepositoryTrait, target: &TargetKind) -> Result<Option<String>> {
    let title = match target {
        TargetKind::Ambient => None,
        TargetKind::ContentItem { id } => content.content_item(*id)?.map(|i| i.title),
        TargetKind::TaxonomyTerm { id, taxonomy } => content.term(taxonomy, *id)?.map(|t| t.name),
        TargetKind::TypeArchive { post_type } => content.type_archive(post_type)?.map(|a| a.label),
        TargetKind::User { id } => content.user(*id)?.map(|u| u.display_name),
    };
    Ok(title.map(|t| t.trim().to_string()).and_then(non_blank))
}

impl CandidateSource for TargetTitleSource {
    fn name(&self) -> &str {
        SOURCE_TARGET_TITLE
    }

    fn open(&self, target: &TargetKind) -> std::result::Result<CandidateStream, ResolutionError> {
        let content = self.content.clone();
        let target = target.clone();
        Ok(deferred(move || {
            let title = lookup_title(content.as_ref(), &target)
                .map_err(producer_error(SOURCE_TARGET_TITLE))?;
            Ok(title.map(RawCandidate::new))
        }))
    }
}

/// The target's own description, normalized and shortened.
///
/// Content items use their excerpt, or the text of their body when the
/// excerpt is empty.
pub struct TargetDescriptionSource {
    content: Arc<dyn ContentRepositoryTrait>,
    max_length: usize,
}

impl TargetDescriptionSource {
    pub fn new(content: Arc<dyn ContentRepositoryTrait>, max_length: usize) -> Self {
        Self { content, max_length }
    }
}

fn lookup_description(content: &dyn ContentRepositoryTrait, target: &TargetKind) -> Result<Option<String>> {
    let description = match target {
        TargetKind::Ambient => None,
        TargetKind::ContentItem { id } => content.content_item(*id)?.map(|item| {
            if item.excerpt.trim().is_empty() {
                extract_text(&item.content)
            } else {
                item.excerpt
            }
        }),
        TargetKind::TaxonomyTerm { id, taxonomy } => {
            content.term(taxonomy, *id)?.map(|t| extract_text(&t.description))
        }
        TargetKind::TypeArchive { post_type } => content.type_archive(post_type)?.map(|a| a.description),
        TargetKind::User { id } => content.user(*id)?.map(|u| u.bio),
    };
    Ok(description.and_then(non_blank))
}

impl CandidateSource for TargetDescriptionSource {
    fn name(&self) -> &str {
        SOURCE_TARGET_DESCRIPTION
    }

    fn open(&self, target: &TargetKind) -> std::result::Result<CandidateStream, ResolutionError> {
        let content = self.content.clone();
        let target = target.clone();
        let max_length = self.max_length;
        Ok(deferred(move || {
            let description = lookup_description(content.as_ref(), &target)
                .map_err(producer_error(SOURCE_TARGET_DESCRIPTION))?;
            Ok(description.map(|d| RawCandidate::new(summarize(&d, max_length))))
        }))
    }
}

/// A fixed, target-independent value such as the site title or tagline.
pub struct StaticTextSource {
    name: &'static str,
    value: String,
}

impl StaticTextSource {
    pub fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

impl CandidateSource for StaticTextSource {
    fn name(&self) -> &str {
        self.name
    }

    fn open(&self, _target: &TargetKind) -> std::result::Result<CandidateStream, ResolutionError> {
        Ok(stream::maybe(
            non_blank(self.value.trim().to_string()).map(RawCandidate::new),
        ))
    }
}

/// The override stored for another profile of the same target.
///
/// Lets a social field reuse a custom value of its generic counterpart.
pub struct FieldOverrideSource {
    overrides: Arc<dyn OverrideStore>,
    profile: &'static str,
    name: String,
}

impl FieldOverrideSource {
    pub fn new(overrides: Arc<dyn OverrideStore>, profile: &'static str) -> Self {
        Self {
            overrides,
            profile,
            name: format!("{}-override", profile),
        }
    }
}

impl CandidateSource for FieldOverrideSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&self, target: &TargetKind) -> std::result::Result<CandidateStream, ResolutionError> {
        let overrides = self.overrides.clone();
        let target = target.clone();
        let profile = self.profile;
        Ok(deferred(move || Ok(overrides.lookup_override(&target, profile))))
    }
}
