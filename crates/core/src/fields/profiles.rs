//! Source chains for the metadata profiles.

use std::sync::Arc;

use metafield_resolution::{ChainRegistry, OverrideStore, SourceDescriptor};

use crate::constants::*;
use crate::content::ContentRepositoryTrait;
use crate::settings::{DirectiveSettings, MetaSettings};
use crate::sources::{
    ContentScanSource, DirectiveSettingsSource, FeaturedImageSource, FieldOverrideSource,
    ProtectionSource, SiteImageSource, SiteWideDirectiveSource, StaticTextSource,
    TargetDescriptionSource, TargetTitleSource,
};

fn descriptor<S>(source: S) -> SourceDescriptor
where
    S: metafield_resolution::CandidateSource + 'static,
{
    SourceDescriptor::new(Arc::new(source))
}

/// Build the chain registry for every profile from `settings`.
///
/// | Profile              | Generated                              | Fallback                 |
/// |----------------------|----------------------------------------|--------------------------|
/// | `title`              | target title                           | site title               |
/// | `description`        | target description                     | tagline                  |
/// | `social:title`       | title override, target title           | site title               |
/// | `social:description` | description override, target desc.     | tagline                  |
/// | `social`             | featured image, content scan           | site default image       |
/// | `structured-data`    | featured image, content scan           | site logo, default image |
/// | `embed`              | featured image                         | site default image       |
/// | `robots:*`           | protection (noindex only), settings    | site-wide setting        |
pub fn build_registry(
    settings: &MetaSettings,
    content: Arc<dyn ContentRepositoryTrait>,
    overrides: Arc<dyn OverrideStore>,
) -> ChainRegistry {
    let title = descriptor(TargetTitleSource::new(content.clone()));
    let site_title = descriptor(StaticTextSource::new(SOURCE_SITE_TITLE, settings.site_title.clone()));
    let tagline = descriptor(StaticTextSource::new(SOURCE_TAGLINE, settings.tagline.clone()));

    let featured = descriptor(FeaturedImageSource::new(content.clone()));
    let scan = descriptor(ContentScanSource::new(content.clone(), settings.base_url()));
    let default_image = descriptor(SiteImageSource::new(
        SOURCE_SITE_DEFAULT_IMAGE,
        settings.images.default_image.clone(),
    ));
    let site_logo = descriptor(SiteImageSource::new(
        SOURCE_SITE_LOGO,
        settings.images.site_logo.clone(),
    ));

    let mut registry = ChainRegistry::new()
        .with_profile(PROFILE_TITLE, vec![title.clone()], vec![site_title.clone()])
        .with_profile(
            PROFILE_DESCRIPTION,
            vec![descriptor(TargetDescriptionSource::new(
                content.clone(),
                settings.description.max_length,
            ))],
            vec![tagline.clone()],
        )
        .with_profile(
            PROFILE_SOCIAL_TITLE,
            vec![descriptor(FieldOverrideSource::new(overrides.clone(), PROFILE_TITLE))],
            vec![site_title],
        )
        .with_profile(
            PROFILE_SOCIAL_DESCRIPTION,
            vec![descriptor(FieldOverrideSource::new(overrides, PROFILE_DESCRIPTION))],
            vec![tagline],
        )
        .with_profile(
            PROFILE_SOCIAL_IMAGE,
            vec![featured.clone(), scan.clone()],
            vec![default_image.clone()],
        )
        .with_profile(
            PROFILE_STRUCTURED_DATA_IMAGE,
            vec![featured.clone(), scan],
            vec![site_logo, default_image.clone()],
        )
        .with_profile(PROFILE_EMBED_IMAGE, vec![featured], vec![default_image]);

    // Social text falls back to the generic generated value.
    registry.append_generated(PROFILE_SOCIAL_TITLE, title);
    registry.append_generated(
        PROFILE_SOCIAL_DESCRIPTION,
        descriptor(TargetDescriptionSource::new(
            content.clone(),
            settings.description.social_max_length,
        )),
    );

    let robots = &settings.robots;
    let mut noindex = Vec::new();
    if robots.protected_noindex {
        noindex.push(descriptor(ProtectionSource::new(content.clone())));
    }
    noindex.push(directive_settings(&content, &robots.noindex));
    registry.register(
        PROFILE_ROBOTS_NOINDEX,
        noindex,
        vec![descriptor(SiteWideDirectiveSource::new(robots.noindex.site_wide))],
    );
    for (profile, directive) in [
        (PROFILE_ROBOTS_NOFOLLOW, &robots.nofollow),
        (PROFILE_ROBOTS_NOARCHIVE, &robots.noarchive),
    ] {
        registry.register(
            profile,
            vec![directive_settings(&content, directive)],
            vec![descriptor(SiteWideDirectiveSource::new(directive.site_wide))],
        );
    }

    registry
}

fn directive_settings(
    content: &Arc<dyn ContentRepositoryTrait>,
    settings: &DirectiveSettings,
) -> SourceDescriptor {
    descriptor(DirectiveSettingsSource::new(content.clone(), settings.clone()))
}
