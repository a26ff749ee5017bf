use std::collections::HashMap;

use super::cursor::ResumableCursor;
use crate::models::TargetKey;
use crate::source::ChainId;

/// Key of a cached cursor.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct CursorKey {
    pub target: TargetKey,
    pub chain: ChainId,
}

/// Cursors for ambient targets, owned by one operation scope.
///
/// Only the chain walker creates or advances entries.
#[derive(Debug, Default)]
pub struct CursorCache {
    cursors: HashMap<CursorKey, ResumableCursor>,
}

impl CursorCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CursorKey) -> Option<&ResumableCursor> {
        self.cursors.get(key)
    }

    pub fn len(&self) -> usize {
        self.cursors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &CursorKey> {
        self.cursors.keys()
    }

    pub(crate) fn entry(&mut self, key: CursorKey) -> &mut ResumableCursor {
        self.cursors.entry(key).or_default()
    }

    /// Drop every cursor. Returns how many were dropped.
    pub(crate) fn clear(&mut self) -> usize {
        let count = self.cursors.len();
        self.cursors.clear();
        count
    }
}
