//! Note store contract and the in-memory backend
//!
//! Both backends behave identically from the caller's side:
//! - `get_all` returns notes newest first
//! - an expired [`RequestContext`] fails with [`StoreError::Timeout`]
//! - missing ids fail with [`StoreError::NotFound`], never a partial result
//! - after `shutdown`, operations fail with [`StoreError::Closed`]
//!
//! [`StoreError::Timeout`]: crate::StoreError::Timeout
//! [`StoreError::NotFound`]: crate::StoreError::NotFound
//! [`StoreError::Closed`]: crate::StoreError::Closed

pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;

use crate::context::RequestContext;
use crate::error::StoreResult;
use crate::model::{Note, NoteId, NoteInput};

pub use memory::MemoryNoteStore;

/// Store handle shared by all request handlers
pub type SharedStore = Arc<dyn NoteStore>;

/// CRUD over notes, selected once at startup and shared across requests.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Short backend name for logs and health output
    fn backend(&self) -> &'static str;

    /// Persist a new note, assigning `id`, `created_at` and `updated_at`.
    async fn create(&self, ctx: &RequestContext, input: NoteInput) -> StoreResult<Note>;

    /// Every live note, newest first.
    async fn get_all(&self, ctx: &RequestContext) -> StoreResult<Vec<Note>>;

    async fn get(&self, ctx: &RequestContext, id: NoteId) -> StoreResult<Note>;

    /// Replace title and content, refresh `updated_at`.
    async fn update(&self, ctx: &RequestContext, id: NoteId, input: NoteInput)
        -> StoreResult<Note>;

    async fn delete(&self, ctx: &RequestContext, id: NoteId) -> StoreResult<()>;

    /// Release backend resources. Calling it twice is a no-op.
    async fn shutdown(&self) -> StoreResult<()>;
}
