use metafield_resolution::{ValidatorConfig, WalkerConfig};
use serde::{Deserialize, Serialize};

/// Site-wide metadata settings.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct MetaSettings {
    pub site_title: String,
    pub tagline: String,
    /// Base for resolving relative URLs found in content
    pub site_url: Option<String>,
    pub title: TitleSettings,
    pub description: DescriptionSettings,
    pub images: ImageSettings,
    pub robots: RobotsSettings,
    pub walker: WalkerConfig,
    pub validator: ValidatorConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default, rename_all = "camelCase")]
pub struct TitleSettings {
    pub separator: String,
    /// Append the site title to document titles
    pub branding: bool,
}

impl Default for TitleSettings {
    fn default() -> Self {
        Self {
            separator: "|".to_string(),
            branding: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default, rename_all = "camelCase")]
pub struct DescriptionSettings {
    pub max_length: usize,
    pub social_max_length: usize,
}

impl Default for DescriptionSettings {
    fn default() -> Self {
        Self {
            max_length: 155,
            social_max_length: 200,
        }
    }
}

/// An image configured in settings rather than found in content.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SiteImage {
    pub url: String,
    /// Attachment backing the image, for dimension lookups
    #[serde(default)]
    pub attachment_id: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageSettings {
    pub default_image: Option<SiteImage>,
    pub site_logo: Option<SiteImage>,
}

/// Which targets a robots directive applies to.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct DirectiveSettings {
    pub site_wide: bool,
    pub post_types: Vec<String>,
    pub taxonomies: Vec<String>,
    pub type_archives: Vec<String>,
    pub author_archives: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default, rename_all = "camelCase")]
pub struct RobotsSettings {
    pub noindex: DirectiveSettings,
    pub nofollow: DirectiveSettings,
    pub noarchive: DirectiveSettings,
    /// Apply noindex to protected content items
    pub protected_noindex: bool,
}

impl Default for RobotsSettings {
    fn default() -> Self {
        Self {
            noindex: DirectiveSettings::default(),
            nofollow: DirectiveSettings::default(),
            noarchive: DirectiveSettings::default(),
            protected_noindex: true,
        }
    }
}
