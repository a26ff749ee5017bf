//! Loading [`MetaSettings`] from JSON.

use std::path::Path;

use log::{debug, info};

use super::MetaSettings;
use crate::constants::SETTINGS_PATH_ENV;
use crate::errors::{Error, Result};

impl MetaSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: MetaSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading settings from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from the file named by `METAFIELD_SETTINGS_PATH`, or defaults
    /// when the variable is unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var(SETTINGS_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path.trim()),
            _ => {
                info!("{} not set, using default settings", SETTINGS_PATH_ENV);
                Ok(Self::default())
            }
        }
    }

    /// Check values serde cannot.
    pub fn validate(&self) -> Result<()> {
        if let Some(site_url) = &self.site_url {
            let url = url::Url::parse(site_url)
                .map_err(|e| Error::Settings(format!("siteUrl '{}': {}", site_url, e)))?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(Error::Settings(format!(
                    "siteUrl '{}' must use http or https",
                    site_url
                )));
            }
        }
        if self.description.max_length == 0 || self.description.social_max_length == 0 {
            return Err(Error::Settings(
                "description lengths must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// The parsed site URL, if configured.
    pub fn base_url(&self) -> Option<url::Url> {
        self.site_url
            .as_deref()
            .and_then(|s| url::Url::parse(s).ok())
    }
}
