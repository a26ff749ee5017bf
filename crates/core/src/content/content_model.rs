use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentItem {
    pub id: u64,
    pub post_type: String,
    pub title: String,
    pub excerpt: String,
    /// Rendered HTML body
    pub content: String,
    pub featured_image: Option<u64>,
    /// Password-protected or private
    pub protected: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Term {
    pub id: u64,
    pub taxonomy: String,
    pub name: String,
    pub description: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct TypeArchive {
    pub post_type: String,
    pub label: String,
    pub description: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub display_name: String,
    pub bio: String,
}

/// Media item backing image candidates.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Attachment {
    pub id: u64,
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
    pub caption: String,
    pub filesize: u64,
}
