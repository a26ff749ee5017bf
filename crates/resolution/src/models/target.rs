use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::types::Profile;
use crate::errors::ResolutionError;

/// What a resolution is performed for.
///
/// `Ambient` is a sentinel for "whatever the current operation is about";
/// it is resolved to one of the concrete variants once per operation.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetKind {
    /// The ambient target of the current operation
    Ambient,

    /// A single content item (post, page, attachment, ...)
    ContentItem { id: u64 },

    /// A term within a taxonomy
    TaxonomyTerm { id: u64, taxonomy: Arc<str> },

    /// The archive listing of a content type
    TypeArchive { post_type: Arc<str> },

    /// A user (author archive)
    User { id: u64 },
}

impl TargetKind {
    /// Returns true for the ambient sentinel.
    pub fn is_ambient(&self) -> bool {
        matches!(self, Self::Ambient)
    }

    /// Short label used in logs and diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ambient => "ambient",
            Self::ContentItem { .. } => "content_item",
            Self::TaxonomyTerm { .. } => "taxonomy_term",
            Self::TypeArchive { .. } => "type_archive",
            Self::User { .. } => "user",
        }
    }

    /// Checks a concrete kind built outside [`normalize`].
    ///
    /// Id `0` never names an item, so concrete kinds carrying it are
    /// rejected rather than silently turning into the ambient target.
    pub fn validate(&self) -> Result<(), ResolutionError> {
        match self {
            Self::ContentItem { id: 0 } | Self::TaxonomyTerm { id: 0, .. } | Self::User { id: 0 } => {
                Err(ResolutionError::InvalidTarget(format!(
                    "{} has no id",
                    self.label()
                )))
            }
            Self::TaxonomyTerm { taxonomy, .. } if taxonomy.is_empty() => Err(
                ResolutionError::InvalidTarget("taxonomy name is empty".to_string()),
            ),
            Self::TypeArchive { post_type } if post_type.is_empty() => Err(
                ResolutionError::InvalidTarget("type archive name is empty".to_string()),
            ),
            _ => Ok(()),
        }
    }

    /// The raw arguments that normalize back to this kind.
    ///
    /// `Ambient` maps to `None`, which is how callers ask for the ambient target.
    pub fn to_args(&self) -> Option<TargetArgs> {
        match self {
            Self::Ambient => None,
            Self::ContentItem { id } => Some(TargetArgs::content(*id)),
            Self::TaxonomyTerm { id, taxonomy } => Some(TargetArgs::term(*id, taxonomy.clone())),
            Self::TypeArchive { post_type } => Some(TargetArgs::type_archive(post_type.clone())),
            Self::User { id } => Some(TargetArgs::user(*id)),
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ambient => write!(f, "ambient"),
            Self::ContentItem { id } => write!(f, "content_item:{}", id),
            Self::TaxonomyTerm { id, taxonomy } => write!(f, "taxonomy_term:{}:{}", taxonomy, id),
            Self::TypeArchive { post_type } => write!(f, "type_archive:{}", post_type),
            Self::User { id } => write!(f, "user:{}", id),
        }
    }
}

/// Partially-filled target descriptor as supplied by field callers.
///
/// An `id` of `0` is treated as absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetArgs {
    /// Content item id, term id (with `taxonomy`) or user id (with `user_context`)
    #[serde(default)]
    pub id: Option<u64>,

    /// Taxonomy name; when set, `id` is a term id
    #[serde(default)]
    pub taxonomy: Option<Arc<str>>,

    /// Content type whose archive is targeted
    #[serde(default)]
    pub type_archive: Option<Arc<str>>,

    /// Whether `id` refers to a user
    #[serde(default)]
    pub user_context: bool,
}

impl TargetArgs {
    pub fn content(id: u64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn term(id: u64, taxonomy: impl Into<Arc<str>>) -> Self {
        Self {
            id: Some(id),
            taxonomy: Some(taxonomy.into()),
            ..Self::default()
        }
    }

    pub fn type_archive(post_type: impl Into<Arc<str>>) -> Self {
        Self {
            type_archive: Some(post_type.into()),
            ..Self::default()
        }
    }

    pub fn user(id: u64) -> Self {
        Self {
            id: Some(id),
            user_context: true,
            ..Self::default()
        }
    }
}

/// Normalized, hashable descriptor of what a resolution is for.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TargetKey {
    pub kind: TargetKind,
    pub profile: Profile,
}

impl TargetKey {
    /// Key for the ambient target of the current operation.
    pub fn ambient(profile: impl Into<Profile>) -> Self {
        Self {
            kind: TargetKind::Ambient,
            profile: profile.into(),
        }
    }

    pub fn is_ambient(&self) -> bool {
        self.kind.is_ambient()
    }

    /// Re-normalizes this key. A valid key always yields an identical key.
    pub fn normalized(&self) -> Result<Self, ResolutionError> {
        self.kind.validate()?;
        normalize(self.kind.to_args().as_ref(), self.profile.clone())
    }

    /// Same target, different profile.
    pub fn with_profile(&self, profile: impl Into<Profile>) -> Self {
        Self {
            kind: self.kind.clone(),
            profile: profile.into(),
        }
    }
}

/// Normalize raw caller arguments into a [`TargetKey`].
///
/// Precedence:
/// 1. `taxonomy` set -> `TaxonomyTerm`
/// 2. `type_archive` set -> `TypeArchive`
/// 3. `id` set -> `ContentItem`, or `User` when flagged `user_context`
/// 4. otherwise -> `Ambient`
///
/// Conflicting or malformed descriptors fail with
/// [`ResolutionError::InvalidTarget`].
pub fn normalize(
    args: Option<&TargetArgs>,
    profile: impl Into<Profile>,
) -> Result<TargetKey, ResolutionError> {
    let profile = profile.into();

    let Some(args) = args else {
        return Ok(TargetKey::ambient(profile));
    };

    let id = args.id.filter(|id| *id != 0);

    if let Some(taxonomy) = &args.taxonomy {
        if taxonomy.is_empty() {
            return Err(ResolutionError::InvalidTarget(
                "taxonomy name is empty".to_string(),
            ));
        }
    }
    if let Some(post_type) = &args.type_archive {
        if post_type.is_empty() {
            return Err(ResolutionError::InvalidTarget(
                "type archive name is empty".to_string(),
            ));
        }
    }

    let kind = match (&args.taxonomy, &args.type_archive) {
        (Some(taxonomy), Some(post_type)) => {
            return Err(ResolutionError::InvalidTarget(format!(
                "both taxonomy '{}' and type archive '{}' are set",
                taxonomy, post_type
            )));
        }
        (Some(taxonomy), None) => {
            if args.user_context {
                return Err(ResolutionError::InvalidTarget(format!(
                    "taxonomy '{}' cannot be combined with a user context",
                    taxonomy
                )));
            }
            let id = id.ok_or_else(|| {
                ResolutionError::InvalidTarget(format!(
                    "taxonomy '{}' is set without a term id",
                    taxonomy
                ))
            })?;
            TargetKind::TaxonomyTerm {
                id,
                taxonomy: taxonomy.clone(),
            }
        }
        (None, Some(post_type)) => {
            if args.user_context {
                return Err(ResolutionError::InvalidTarget(format!(
                    "type archive '{}' cannot be combined with a user context",
                    post_type
                )));
            }
            TargetKind::TypeArchive {
                post_type: post_type.clone(),
            }
        }
        (None, None) => match (id, args.user_context) {
            (Some(id), false) => TargetKind::ContentItem { id },
            (Some(id), true) => TargetKind::User { id },
            (None, true) => {
                return Err(ResolutionError::InvalidTarget(
                    "user context is set without a user id".to_string(),
                ));
            }
            (None, false) => TargetKind::Ambient,
        },
    };

    Ok(TargetKey { kind, profile })
}
