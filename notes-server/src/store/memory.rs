//! Volatile note store
//!
//! All state sits behind one async mutex, held for the whole of each
//! operation. That linearizes concurrent callers: two creates never share
//! an id, and a finished delete is visible to every later read.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, MutexGuard};

use super::NoteStore;
use crate::context::RequestContext;
use crate::error::{StoreError, StoreResult};
use crate::model::{Note, NoteId, NoteInput};

const BACKEND: &str = "memory";

#[derive(Debug, Default)]
struct MemoryState {
    /// Keyed by id; ids grow with creation order
    notes: BTreeMap<NoteId, Note>,
    last_id: NoteId,
    closed: bool,
}

/// In-process store for tests and local development
#[derive(Debug, Default)]
pub struct MemoryNoteStore {
    state: Mutex<MemoryState>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the state lock, giving up when the deadline passes.
    async fn lock(&self, ctx: &RequestContext) -> StoreResult<MutexGuard<'_, MemoryState>> {
        let guard = ctx
            .run(async { Ok::<_, StoreError>(self.state.lock().await) })
            .await?;
        if guard.closed {
            return Err(StoreError::Closed);
        }
        Ok(guard)
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    async fn create(&self, ctx: &RequestContext, input: NoteInput) -> StoreResult<Note> {
        let mut state = self.lock(ctx).await?;

        state.last_id += 1;
        let now = Utc::now();
        let note = Note {
            id: state.last_id,
            title: input.title,
            content: input.content,
            created_at: now,
            updated_at: Some(now),
        };
        state.notes.insert(note.id, note.clone());

        tracing::debug!(backend = BACKEND, note_id = note.id, "note created");
        Ok(note)
    }

    async fn get_all(&self, ctx: &RequestContext) -> StoreResult<Vec<Note>> {
        let state = self.lock(ctx).await?;
        // Copies, so callers never observe later mutation
        Ok(state.notes.values().rev().cloned().collect())
    }

    async fn get(&self, ctx: &RequestContext, id: NoteId) -> StoreResult<Note> {
        let state = self.lock(ctx).await?;
        state
            .notes
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id))
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        id: NoteId,
        input: NoteInput,
    ) -> StoreResult<Note> {
        let mut state = self.lock(ctx).await?;
        let note = state
            .notes
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(id))?;

        // updated_at never moves backwards, even if the wall clock does
        let floor = note
            .updated_at
            .map_or(note.created_at, |prev| prev.max(note.created_at));
        note.title = input.title;
        note.content = input.content;
        note.updated_at = Some(Utc::now().max(floor));

        tracing::debug!(backend = BACKEND, note_id = id, "note updated");
        Ok(note.clone())
    }

    async fn delete(&self, ctx: &RequestContext, id: NoteId) -> StoreResult<()> {
        let mut state = self.lock(ctx).await?;
        state
            .notes
            .remove(&id)
            .ok_or_else(|| StoreError::not_found(id))?;

        tracing::debug!(backend = BACKEND, note_id = id, "note deleted");
        Ok(())
    }

    async fn shutdown(&self) -> StoreResult<()> {
        let mut state = self.state.lock().await;
        if state.closed {
            return Ok(());
        }

        state.closed = true;
        let dropped = state.notes.len();
        state.notes.clear();

        tracing::info!(backend = BACKEND, dropped, "note store closed");
        Ok(())
    }
}
