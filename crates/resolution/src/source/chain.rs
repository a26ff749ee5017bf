//! Source chains: ordered lists of descriptors for one profile and role.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::descriptor::SourceDescriptor;
use crate::models::{Profile, SourceName};

/// Which tier of the pipeline a chain serves.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainRole {
    /// Computed candidates; may yield many.
    Generated,
    /// Last resort; the pipeline takes at most one candidate from it.
    Fallback,
}

impl fmt::Display for ChainRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generated => write!(f, "generated"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// Identity of a source chain.
///
/// The signature is the ordered list of descriptor names, so two chains for
/// the same profile and role that differ in their sources never share a
/// cursor, whatever characters the names contain.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ChainId {
    pub profile: Profile,
    pub role: ChainRole,
    pub signature: Vec<SourceName>,
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}[{}]", self.profile, self.role, self.signature.join(">"))
    }
}

/// Ordered list of candidate sources, tried strictly in order.
#[derive(Clone, Debug)]
pub struct SourceChain {
    profile: Profile,
    role: ChainRole,
    descriptors: Vec<SourceDescriptor>,
}

impl SourceChain {
    pub fn new(profile: impl Into<Profile>, role: ChainRole, descriptors: Vec<SourceDescriptor>) -> Self {
        Self {
            profile: profile.into(),
            role,
            descriptors,
        }
    }

    /// A chain with no sources.
    pub fn empty(profile: impl Into<Profile>, role: ChainRole) -> Self {
        Self::new(profile, role, Vec::new())
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn role(&self) -> ChainRole {
        self.role
    }

    pub fn descriptors(&self) -> &[SourceDescriptor] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Append a descriptor at the end of the chain.
    pub fn push(&mut self, descriptor: SourceDescriptor) {
        self.descriptors.push(descriptor);
    }

    /// Insert a descriptor ahead of all others.
    pub fn prepend(&mut self, descriptor: SourceDescriptor) {
        self.descriptors.insert(0, descriptor);
    }

    /// Keep only the descriptors matching `keep`, preserving order.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&SourceDescriptor) -> bool,
    {
        self.descriptors.retain(|d| keep(d));
    }

    /// Identity used to key resumable cursors.
    pub fn id(&self) -> ChainId {
        let signature = self
            .descriptors
            .iter()
            .map(|d| d.source_name().clone())
            .collect();

        ChainId {
            profile: self.profile.clone(),
            role: self.role,
            signature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::stream;

    fn descriptor(name: &'static str) -> SourceDescriptor {
        SourceDescriptor::from_fn(name, |_| Ok(stream::empty()))
    }

    #[test]
    fn test_chain_id_covers_sources() {
        let chain = SourceChain::new(
            "social",
            ChainRole::Generated,
            vec![descriptor("featured"), descriptor("content-scan")],
        );
        let id = chain.id();

        assert_eq!(id.signature, vec!["featured", "content-scan"]);
        assert_eq!(id.to_string(), "social/generated[featured>content-scan]");
    }

    #[test]
    fn test_separator_in_name_does_not_collide() {
        let joined = SourceChain::new("embed", ChainRole::Generated, vec![descriptor("a>b")]);
        let split = SourceChain::new(
            "embed",
            ChainRole::Generated,
            vec![descriptor("a"), descriptor("b")],
        );

        assert_ne!(joined.id(), split.id());
    }

    #[test]
    fn test_retain_changes_identity() {
        let mut chain = SourceChain::new(
            "robots:noindex",
            ChainRole::Generated,
            vec![descriptor("protection"), descriptor("settings")],
        );
        let before = chain.id();

        chain.retain(|d| d.name() != "settings");

        assert_eq!(chain.len(), 1);
        assert_ne!(chain.id(), before);
    }

    #[test]
    fn test_prepend_and_push_order() {
        let mut chain = SourceChain::empty("title", ChainRole::Generated);
        assert!(chain.is_empty());

        chain.push(descriptor("b"));
        chain.prepend(descriptor("a"));
        chain.push(descriptor("c"));

        let names: Vec<_> = chain.descriptors().iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_roles_do_not_share_identity() {
        let generated = SourceChain::new("social", ChainRole::Generated, vec![descriptor("x")]);
        let fallback = SourceChain::new("social", ChainRole::Fallback, vec![descriptor("x")]);
        assert_ne!(generated.id(), fallback.id());
    }
}
