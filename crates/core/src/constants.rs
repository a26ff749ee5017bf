/// Environment variable naming the settings file
pub const SETTINGS_PATH_ENV: &str = "METAFIELD_SETTINGS_PATH";

/// Field profiles
pub const PROFILE_TITLE: &str = "title";
pub const PROFILE_DESCRIPTION: &str = "description";
pub const PROFILE_SOCIAL_TITLE: &str = "social:title";
pub const PROFILE_SOCIAL_DESCRIPTION: &str = "social:description";
pub const PROFILE_SOCIAL_IMAGE: &str = "social";
pub const PROFILE_STRUCTURED_DATA_IMAGE: &str = "structured-data";
pub const PROFILE_EMBED_IMAGE: &str = "embed";
pub const PROFILE_ROBOTS_NOINDEX: &str = "robots:noindex";
pub const PROFILE_ROBOTS_NOFOLLOW: &str = "robots:nofollow";
pub const PROFILE_ROBOTS_NOARCHIVE: &str = "robots:noarchive";

/// Source names
pub const SOURCE_TARGET_TITLE: &str = "target-title";
pub const SOURCE_TARGET_DESCRIPTION: &str = "target-description";
pub const SOURCE_SITE_TITLE: &str = "site-title";
pub const SOURCE_TAGLINE: &str = "tagline";
pub const SOURCE_FEATURED_IMAGE: &str = "featured-image";
pub const SOURCE_CONTENT_SCAN: &str = "content-scan";
pub const SOURCE_SITE_LOGO: &str = "site-logo";
pub const SOURCE_SITE_DEFAULT_IMAGE: &str = "site-default-image";
pub const SOURCE_PROTECTION: &str = "protection";
pub const SOURCE_SETTINGS: &str = "settings";
pub const SOURCE_SETTINGS_SITE: &str = "settings-site";

/// Robots override values
pub const ROBOTS_ON: &str = "1";
pub const ROBOTS_OFF: &str = "0";

/// Appended to descriptions cut at a word boundary
pub const ELLIPSIS: &str = "\u{2026}";
