//! notes-server: note CRUD over HTTP
//!
//! One resource, two interchangeable stores:
//! - [`store::MemoryNoteStore`] keeps notes in process memory
//! - [`db::PgNoteStore`] persists them in PostgreSQL
//!
//! Every store call carries a [`RequestContext`] whose deadline bounds
//! the operation.

pub mod context;
pub mod db;
pub mod error;
pub mod http;
pub mod model;
pub mod store;

pub use context::RequestContext;
pub use error::{ErrorKind, StoreError, StoreResult};
pub use model::{Note, NoteId, NoteInput};
pub use store::{MemoryNoteStore, NoteStore};
