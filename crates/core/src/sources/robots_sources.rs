//! Sources for robots directives.
//!
//! Each yields `"1"` when it asserts its directive. Only the site-wide
//! fallback ever yields `"0"`.

use std::sync::Arc;

use metafield_resolution::{
    stream, CandidateSource, CandidateStream, RawCandidate, ResolutionError, TargetKind,
};

use super::{deferred, producer_error};
use crate::constants::{ROBOTS_OFF, ROBOTS_ON, SOURCE_PROTECTION, SOURCE_SETTINGS, SOURCE_SETTINGS_SITE};
use crate::content::ContentRepositoryTrait;
use crate::settings::DirectiveSettings;

/// Asserts a directive for protected content items.
pub struct ProtectionSource {
    content: Arc<dyn ContentRepositoryTrait>,
}

impl ProtectionSource {
    pub fn new(content: Arc<dyn ContentRepositoryTrait>) -> Self {
        Self { content }
    }
}

impl CandidateSource for ProtectionSource {
    fn name(&self) -> &str {
        SOURCE_PROTECTION
    }

    fn open(&self, target: &TargetKind) -> Result<CandidateStream, ResolutionError> {
        let TargetKind::ContentItem { id } = *target else {
            return Ok(stream::empty());
        };
        let content = self.content.clone();
        Ok(deferred(move || {
            let protected = content
                .content_item(id)
                .map_err(producer_error(SOURCE_PROTECTION))?
                .is_some_and(|item| item.protected);
            Ok(protected.then(|| RawCandidate::new(ROBOTS_ON)))
        }))
    }
}

/// Asserts a directive when the settings cover the target's content type,
/// taxonomy, type archive or author archive.
pub struct DirectiveSettingsSource {
    content: Arc<dyn ContentRepositoryTrait>,
    settings: DirectiveSettings,
}

impl DirectiveSettingsSource {
    pub fn new(content: Arc<dyn ContentRepositoryTrait>, settings: DirectiveSettings) -> Self {
        Self { content, settings }
    }
}

impl CandidateSource for DirectiveSettingsSource {
    fn name(&self) -> &str {
        SOURCE_SETTINGS
    }

    fn open(&self, target: &TargetKind) -> Result<CandidateStream, ResolutionError> {
        let settings = &self.settings;
        let covered = match target {
            TargetKind::Ambient => false,
            TargetKind::ContentItem { id } => {
                if settings.post_types.is_empty() {
                    false
                } else {
                    let content = self.content.clone();
                    let post_types = settings.post_types.clone();
                    let id = *id;
                    return Ok(deferred(move || {
                        let covered = content
                            .content_item(id)
                            .map_err(producer_error(SOURCE_SETTINGS))?
                            .is_some_and(|item| post_types.contains(&item.post_type));
                        Ok(covered.then(|| RawCandidate::new(ROBOTS_ON)))
                    }));
                }
            }
            TargetKind::TaxonomyTerm { taxonomy, .. } => {
                settings.taxonomies.iter().any(|t| t.as_str() == &**taxonomy)
            }
            TargetKind::TypeArchive { post_type } => {
                settings.type_archives.iter().any(|t| t.as_str() == &**post_type)
            }
            TargetKind::User { .. } => settings.author_archives,
        };
        Ok(stream::maybe(covered.then(|| RawCandidate::new(ROBOTS_ON))))
    }
}

/// Site-wide default for a directive: always yields `"1"` or `"0"`.
pub struct SiteWideDirectiveSource {
    enabled: bool,
}

impl SiteWideDirectiveSource {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl CandidateSource for SiteWideDirectiveSource {
    fn name(&self) -> &str {
        SOURCE_SETTINGS_SITE
    }

    fn open(&self, _target: &TargetKind) -> Result<CandidateStream, ResolutionError> {
        let value = if self.enabled { ROBOTS_ON } else { ROBOTS_OFF };
        Ok(stream::once(RawCandidate::new(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentItem, MemoryContentRepository};

    fn repository() -> Arc<MemoryContentRepository> {
        let repo = MemoryContentRepository::new();
        repo.insert_item(ContentItem {
            id: 1,
            post_type: "attachment".to_string(),
            protected: true,
            ..Default::default()
        })
        .unwrap();
        repo.insert_item(ContentItem {
            id: 2,
            post_type: "post".to_string(),
            ..Default::default()
        })
        .unwrap();
        Arc::new(repo)
    }

    fn values(source: &dyn CandidateSource, target: &TargetKind) -> Vec<String> {
        source
            .open(target)
            .unwrap()
            .map(|item| item.unwrap().value)
            .collect()
    }

    #[test]
    fn test_protection() {
        let source = ProtectionSource::new(repository());

        assert_eq!(values(&source, &TargetKind::ContentItem { id: 1 }), vec!["1"]);
        assert!(values(&source, &TargetKind::ContentItem { id: 2 }).is_empty());
        assert!(values(&source, &TargetKind::User { id: 1 }).is_empty());
    }

    #[test]
    fn test_settings_coverage() {
        let source = DirectiveSettingsSource::new(
            repository(),
            DirectiveSettings {
                post_types: vec!["attachment".to_string()],
                taxonomies: vec!["post_tag".to_string()],
                author_archives: true,
                ..Default::default()
            },
        );

        assert_eq!(values(&source, &TargetKind::ContentItem { id: 1 }), vec!["1"]);
        assert!(values(&source, &TargetKind::ContentItem { id: 2 }).is_empty());
        assert_eq!(
            values(
                &source,
                &TargetKind::TaxonomyTerm {
                    id: 3,
                    taxonomy: Arc::from("post_tag")
                }
            ),
            vec!["1"]
        );
        assert!(values(
            &source,
            &TargetKind::TypeArchive {
                post_type: Arc::from("post")
            }
        )
        .is_empty());
        assert_eq!(values(&source, &TargetKind::User { id: 4 }), vec!["1"]);
    }

    #[test]
    fn test_site_wide() {
        let target = TargetKind::ContentItem { id: 2 };
        assert_eq!(values(&SiteWideDirectiveSource::new(true), &target), vec!["1"]);
        assert_eq!(values(&SiteWideDirectiveSource::new(false), &target), vec!["0"]);
    }
}
