use std::sync::Arc;

use log::{debug, info};
use metafield_resolution::{
    normalize, AmbientQuery, AttributeLookup, CandidateValidator, ChainWalker, Enricher,
    OperationScope, OverrideStore, ResolutionDiagnostics, ResolutionFilter, ResolutionOrigin,
    ResolutionPipeline, TargetArgs,
};

use super::images::{ImageDetails, ImageProfile};
use super::profiles::build_registry;
use super::robots::{DirectiveState, RobotsDirective, RobotsMeta, RobotsOptions, RobotsOverrideFilter};
use crate::constants::{
    PROFILE_DESCRIPTION, PROFILE_SOCIAL_DESCRIPTION, PROFILE_SOCIAL_TITLE, PROFILE_TITLE,
    ROBOTS_ON, SOURCE_PROTECTION, SOURCE_SETTINGS, SOURCE_SETTINGS_SITE,
};
use crate::content::{ContentRepositoryTrait, MemoryContentRepository};
use crate::errors::Result;
use crate::overrides::MemoryOverrideStore;
use crate::settings::MetaSettings;
use crate::utils::text_utils::brand_title;

/// Resolves the metadata fields of a site.
///
/// Every call takes the [`OperationScope`] of the current operation (see
/// [`begin_operation`](Self::begin_operation)) and optional target
/// arguments; `None` means the target the operation is about.
pub struct MetaService {
    settings: Arc<MetaSettings>,
    ambient: Arc<dyn AmbientQuery>,
    pipeline: ResolutionPipeline,
}

impl MetaService {
    pub fn new(
        settings: MetaSettings,
        content: Arc<dyn ContentRepositoryTrait>,
        attributes: Arc<dyn AttributeLookup>,
        overrides: Arc<dyn OverrideStore>,
        ambient: Arc<dyn AmbientQuery>,
    ) -> Self {
        let registry = build_registry(&settings, content, overrides.clone());
        let walker = ChainWalker::with_config(
            Enricher::new(attributes),
            CandidateValidator::with_config(settings.validator.clone()),
            settings.walker.clone(),
        );

        let mut pipeline = ResolutionPipeline::new(overrides, registry, walker);
        pipeline.add_filter(Arc::new(RobotsOverrideFilter));

        Self {
            settings: Arc::new(settings),
            ambient,
            pipeline,
        }
    }

    /// Service over in-memory content and overrides.
    pub fn in_memory(
        settings: MetaSettings,
        content: Arc<MemoryContentRepository>,
        overrides: Arc<MemoryOverrideStore>,
        ambient: Arc<dyn AmbientQuery>,
    ) -> Self {
        Self::new(settings, content.clone(), content, overrides, ambient)
    }

    pub fn settings(&self) -> &MetaSettings {
        &self.settings
    }

    pub fn pipeline(&self) -> &ResolutionPipeline {
        &self.pipeline
    }

    /// Register an extension filter on every resolution.
    pub fn add_filter(&mut self, filter: Arc<dyn ResolutionFilter>) {
        self.pipeline.add_filter(filter);
    }

    /// Start a new operation (e.g. one request).
    pub fn begin_operation(&self) -> OperationScope {
        let scope = OperationScope::new(self.ambient.clone());
        info!("Operation {} started", scope.id());
        scope
    }

    fn text(
        &self,
        scope: &mut OperationScope,
        args: Option<&TargetArgs>,
        profile: &str,
    ) -> Result<Option<String>> {
        let candidates = self.pipeline.resolve(scope, args, profile, 1)?;
        Ok(candidates.into_iter().next().map(|c| c.value))
    }

    pub fn title(&self, scope: &mut OperationScope, args: Option<&TargetArgs>) -> Result<Option<String>> {
        self.text(scope, args, PROFILE_TITLE)
    }

    /// Title for the document head, branded with the site title.
    ///
    /// A title that already is the site title (the fallback) is not branded.
    pub fn document_title(
        &self,
        scope: &mut OperationScope,
        args: Option<&TargetArgs>,
    ) -> Result<Option<String>> {
        let resolution = self.pipeline.resolve_detailed(scope, args, PROFILE_TITLE, 1)?;
        let Some(title) = resolution.first_value() else {
            return Ok(None);
        };

        let title_settings = &self.settings.title;
        if !title_settings.branding || resolution.origin == ResolutionOrigin::Fallback {
            return Ok(Some(title.to_string()));
        }
        Ok(Some(brand_title(
            title,
            &title_settings.separator,
            &self.settings.site_title,
        )))
    }

    pub fn description(
        &self,
        scope: &mut OperationScope,
        args: Option<&TargetArgs>,
    ) -> Result<Option<String>> {
        self.text(scope, args, PROFILE_DESCRIPTION)
    }

    pub fn social_title(
        &self,
        scope: &mut OperationScope,
        args: Option<&TargetArgs>,
    ) -> Result<Option<String>> {
        self.text(scope, args, PROFILE_SOCIAL_TITLE)
    }

    pub fn social_description(
        &self,
        scope: &mut OperationScope,
        args: Option<&TargetArgs>,
    ) -> Result<Option<String>> {
        self.text(scope, args, PROFILE_SOCIAL_DESCRIPTION)
    }

    /// Up to `max_count` images for `profile`, best first.
    pub fn image_details(
        &self,
        scope: &mut OperationScope,
        args: Option<&TargetArgs>,
        profile: ImageProfile,
        max_count: usize,
    ) -> Result<Vec<ImageDetails>> {
        let candidates = self
            .pipeline
            .resolve(scope, args, profile.profile(), max_count)?;
        Ok(candidates.into_iter().map(ImageDetails::from).collect())
    }

    /// Resolve every robots directive.
    pub fn robots(
        &self,
        scope: &mut OperationScope,
        args: Option<&TargetArgs>,
        options: RobotsOptions,
    ) -> Result<RobotsMeta> {
        let ignore_settings = options.contains(RobotsOptions::IGNORE_SETTINGS);
        let ignore_protection = options.contains(RobotsOptions::IGNORE_PROTECTION);
        let assert = options.contains(RobotsOptions::ASSERT);

        let mut directives = Vec::with_capacity(RobotsDirective::ALL.len());
        for directive in RobotsDirective::ALL {
            let target = normalize(args, directive.profile())?;
            let chains = self
                .pipeline
                .chains()
                .chains_for(directive.profile())
                .retain(|d| {
                    let settings = d.name() == SOURCE_SETTINGS || d.name() == SOURCE_SETTINGS_SITE;
                    let protection = d.name() == SOURCE_PROTECTION;
                    !(ignore_settings && settings) && !(ignore_protection && protection)
                });

            let mut diagnostics = ResolutionDiagnostics::new();
            let resolution = self
                .pipeline
                .resolve_key(scope, &target, &chains, 1, &mut diagnostics)?;

            let asserting = resolution.first().filter(|c| c.value == ROBOTS_ON);
            if let Some(candidate) = asserting {
                debug!("{} asserted by '{}'", directive, candidate.source);
            }
            directives.push(DirectiveState {
                directive,
                enabled: asserting.is_some(),
                asserted_by: asserting
                    .filter(|_| assert)
                    .map(|c| c.source.to_string()),
            });
        }

        Ok(RobotsMeta { directives })
    }
}
