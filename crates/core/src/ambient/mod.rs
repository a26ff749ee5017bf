//! Ambient target collaborators.

use std::sync::RwLock;

use log::warn;
use metafield_resolution::{AmbientQuery, TargetKind};

pub use metafield_resolution::FixedAmbient;

/// Ambient target set by the request router.
///
/// Scopes resolve the ambient target once; after [`set`](Self::set) the
/// caller resets open scopes with `reset_ambient_caches`.
pub struct RoutedAmbient {
    current: RwLock<TargetKind>,
}

impl RoutedAmbient {
    pub fn new(initial: TargetKind) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    pub fn set(&self, target: TargetKind) {
        match self.current.write() {
            Ok(mut current) => *current = target,
            Err(poisoned) => *poisoned.into_inner() = target,
        }
    }
}

impl AmbientQuery for RoutedAmbient {
    fn resolve_ambient(&self) -> TargetKind {
        match self.current.read() {
            Ok(current) => current.clone(),
            Err(poisoned) => {
                warn!("Ambient target lock poisoned, using last value");
                poisoned.into_inner().clone()
            }
        }
    }
}
