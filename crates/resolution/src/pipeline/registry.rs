//! Chain registry: which sources serve which profile.

use std::collections::HashMap;

use log::debug;

use crate::models::Profile;
use crate::source::{ChainRole, SourceChain, SourceDescriptor};

/// Generated and fallback chains for one profile.
#[derive(Clone, Debug)]
pub struct ProfileChains {
    pub generated: SourceChain,
    pub fallback: SourceChain,
}

impl ProfileChains {
    pub fn new(
        profile: impl Into<Profile>,
        generated: Vec<SourceDescriptor>,
        fallback: Vec<SourceDescriptor>,
    ) -> Self {
        let profile = profile.into();
        Self {
            generated: SourceChain::new(profile.clone(), ChainRole::Generated, generated),
            fallback: SourceChain::new(profile, ChainRole::Fallback, fallback),
        }
    }

    /// Chains without any sources.
    pub fn empty(profile: impl Into<Profile>) -> Self {
        Self::new(profile, Vec::new(), Vec::new())
    }

    /// A copy keeping only the descriptors matching `keep` in both chains.
    pub fn retain<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&SourceDescriptor) -> bool,
    {
        let mut chains = self.clone();
        chains.generated.retain(&mut keep);
        chains.fallback.retain(&mut keep);
        chains
    }
}

/// Maps profiles to their source chains.
///
/// Unknown profiles resolve to empty chains, so only overrides can answer
/// for them.
#[derive(Clone, Debug, Default)]
pub struct ChainRegistry {
    profiles: HashMap<Profile, ProfileChains>,
}

impl ChainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the chains of a profile.
    pub fn register(
        &mut self,
        profile: impl Into<Profile>,
        generated: Vec<SourceDescriptor>,
        fallback: Vec<SourceDescriptor>,
    ) {
        let profile = profile.into();
        let chains = ProfileChains::new(profile.clone(), generated, fallback);
        self.profiles.insert(profile, chains);
    }

    /// Builder form of [`register`](Self::register).
    pub fn with_profile(
        mut self,
        profile: impl Into<Profile>,
        generated: Vec<SourceDescriptor>,
        fallback: Vec<SourceDescriptor>,
    ) -> Self {
        self.register(profile, generated, fallback);
        self
    }

    /// Append a descriptor to a profile's generated chain.
    pub fn append_generated(&mut self, profile: impl Into<Profile>, descriptor: SourceDescriptor) {
        let profile = profile.into();
        self.profiles
            .entry(profile.clone())
            .or_insert_with(|| ProfileChains::empty(profile))
            .generated
            .push(descriptor);
    }

    pub fn get(&self, profile: &str) -> Option<&ProfileChains> {
        self.profiles.get(profile)
    }

    /// Chains for a profile, empty if the profile is unknown.
    pub fn chains_for(&self, profile: &str) -> ProfileChains {
        match self.profiles.get(profile) {
            Some(chains) => chains.clone(),
            None => {
                debug!("No chains registered for profile '{}'", profile);
                ProfileChains::empty(Profile::Owned(profile.to_string()))
            }
        }
    }

    pub fn profiles(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.keys()
    }
}
