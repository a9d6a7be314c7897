//! PostgreSQL layer - connection pool, schema bootstrap, note store
//!
//! - One statement per operation; no check-then-act
//! - Missing rows come back as NotFound from the statement itself
//! - Every statement runs under the caller's deadline

pub mod migrations;
pub mod notes;
pub mod pool;

pub use notes::PgNoteStore;
pub use pool::{create_pool, create_pool_with_options, PoolOptions};
