use metafield_resolution::Candidate;
use serde::{Deserialize, Serialize};

use crate::constants::{PROFILE_EMBED_IMAGE, PROFILE_SOCIAL_IMAGE, PROFILE_STRUCTURED_DATA_IMAGE};

/// Where an image is going to be used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageProfile {
    Social,
    StructuredData,
    Embed,
}

impl ImageProfile {
    pub fn profile(&self) -> &'static str {
        match self {
            Self::Social => PROFILE_SOCIAL_IMAGE,
            Self::StructuredData => PROFILE_STRUCTURED_DATA_IMAGE,
            Self::Embed => PROFILE_EMBED_IMAGE,
        }
    }
}

/// A resolved image with its descriptive attributes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDetails {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
    pub caption: String,
    pub filesize: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_id: Option<u64>,
    /// Source that produced the image
    pub source: String,
}

impl From<Candidate> for ImageDetails {
    fn from(candidate: Candidate) -> Self {
        let attributes = candidate.attributes;
        Self {
            url: candidate.value,
            width: attributes.width,
            height: attributes.height,
            alt: attributes.alt,
            caption: attributes.caption,
            filesize: attributes.filesize,
            attachment_id: candidate.source_id,
            source: candidate.source.into_owned(),
        }
    }
}
