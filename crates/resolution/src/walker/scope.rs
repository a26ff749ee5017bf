//! Operation scope: the lifetime of ambient-scoped state.
//!
//! One scope is created at the start of an ambient operation (a request,
//! a render pass) and dropped at its end. It owns the resolved ambient
//! target and every resumable cursor created for it.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info};
use uuid::Uuid;

use super::cache::{CursorCache, CursorKey};
use super::cursor::ResumableCursor;
use crate::collaborators::AmbientQuery;
use crate::errors::ResolutionError;
use crate::models::{TargetKey, TargetKind};
use crate::source::SourceChain;

/// Handle owning ambient-scoped caches for one operation.
pub struct OperationScope {
    id: Uuid,
    started_at: DateTime<Utc>,
    generation: u64,
    context: Option<String>,
    ambient_query: Arc<dyn AmbientQuery>,
    ambient: Option<TargetKind>,
    cursors: CursorCache,
}

impl OperationScope {
    pub fn new(ambient_query: Arc<dyn AmbientQuery>) -> Self {
        let id = Uuid::new_v4();
        debug!("Operation scope {} started", id);
        Self {
            id,
            started_at: Utc::now(),
            generation: 0,
            context: None,
            ambient_query,
            ambient: None,
            cursors: CursorCache::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Number of resets since the scope was created.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Label of the ambient ownership context (site, tenant), if any.
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// The concrete ambient target, resolved at most once between resets.
    pub fn ambient_target(&mut self) -> Result<TargetKind, ResolutionError> {
        if let Some(kind) = &self.ambient {
            return Ok(kind.clone());
        }

        let kind = self.ambient_query.resolve_ambient();
        if kind.is_ambient() {
            return Err(ResolutionError::InvalidTarget(
                "ambient query resolved to the ambient sentinel".to_string(),
            ));
        }
        kind.validate()?;

        debug!("Operation {}: ambient target resolved to {}", self.id, kind);
        self.ambient = Some(kind.clone());
        Ok(kind)
    }

    /// Map a target kind to the concrete kind producers receive.
    pub fn concrete_kind(&mut self, kind: &TargetKind) -> Result<TargetKind, ResolutionError> {
        match kind {
            TargetKind::Ambient => self.ambient_target(),
            other => {
                other.validate()?;
                Ok(other.clone())
            }
        }
    }

    /// Read-only view of the cursors owned by this scope.
    pub fn cursors(&self) -> &CursorCache {
        &self.cursors
    }

    /// The cursor for an ambient key and chain, if one was created.
    pub fn cursor(&self, target: &TargetKey, chain: &SourceChain) -> Option<&ResumableCursor> {
        self.cursors.get(&CursorKey {
            target: target.clone(),
            chain: chain.id(),
        })
    }

    pub(crate) fn cursor_mut(&mut self, key: CursorKey) -> &mut ResumableCursor {
        self.cursors.entry(key)
    }

    /// Forget the resolved ambient target and every cursor.
    ///
    /// Call at the start and end of each ambient operation, and whenever
    /// the ambient identity changes mid-process.
    pub fn reset_ambient_caches(&mut self) {
        let dropped = self.cursors.clear();
        self.ambient = None;
        self.generation += 1;
        info!(
            "Operation {}: ambient caches reset (generation {}, {} cursors dropped, {}ms since start)",
            self.id,
            self.generation,
            dropped,
            (Utc::now() - self.started_at).num_milliseconds()
        );
    }

    /// Switch the ambient ownership context (e.g., the active site).
    ///
    /// Always resets, even when switching to the same label.
    pub fn switch_context(&mut self, context: impl Into<String>) {
        let context = context.into();
        info!(
            "Operation {}: switching context {:?} -> '{}'",
            self.id, self.context, context
        );
        self.context = Some(context);
        self.reset_ambient_caches();
    }
}

impl fmt::Debug for OperationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationScope")
            .field("id", &self.id)
            .field("started_at", &self.started_at)
            .field("generation", &self.generation)
            .field("context", &self.context)
            .field("ambient", &self.ambient)
            .field("cursors", &self.cursors.len())
            .finish()
    }
}
