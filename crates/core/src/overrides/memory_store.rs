//! In-memory override store.

use std::collections::HashMap;
use std::sync::RwLock;

use log::{debug, warn};
use metafield_resolution::{OverrideStore, RawCandidate, TargetKind};

use crate::errors::{Error, Result};

type OverrideKey = (TargetKind, String);

/// Per-target field overrides held in memory.
///
/// Overrides are authoritative: a stored value replaces everything the
/// source chains would generate.
#[derive(Default)]
pub struct MemoryOverrideStore {
    values: RwLock<HashMap<OverrideKey, RawCandidate>>,
}

impl MemoryOverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a text override.
    pub fn set(&self, target: TargetKind, profile: &str, value: impl Into<String>) -> Result<()> {
        self.set_candidate(target, profile, RawCandidate::new(value))
    }

    /// Store an override with a backing item, e.g. a chosen image.
    pub fn set_candidate(&self, target: TargetKind, profile: &str, candidate: RawCandidate) -> Result<()> {
        if target.is_ambient() {
            return Err(Error::Repository(
                "overrides must name a concrete target".to_string(),
            ));
        }
        debug!("Storing override for {} '{}'", target, profile);
        self.values
            .write()
            .map_err(|_| Error::Repository("override store lock poisoned".to_string()))?
            .insert((target, profile.to_string()), candidate);
        Ok(())
    }

    pub fn remove(&self, target: &TargetKind, profile: &str) -> Result<bool> {
        let removed = self
            .values
            .write()
            .map_err(|_| Error::Repository("override store lock poisoned".to_string()))?
            .remove(&(target.clone(), profile.to_string()));
        Ok(removed.is_some())
    }
}

impl OverrideStore for MemoryOverrideStore {
    fn lookup_override(&self, target: &TargetKind, profile: &str) -> Option<RawCandidate> {
        match self.values.read() {
            Ok(values) => values.get(&(target.clone(), profile.to_string())).cloned(),
            Err(_) => {
                warn!("Override store lock poisoned, ignoring overrides");
                None
            }
        }
    }
}
