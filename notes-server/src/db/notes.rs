//! PostgreSQL note store
//!
//! Each operation is a single parameterized statement:
//! - get/update: `fetch_optional`, an empty result is NotFound
//! - delete: zero rows affected is NotFound
//! - timestamps come from the database clock, so `created_at` and
//!   `updated_at` are identical at creation
//!
//! The statement runs in a short transaction whose `statement_timeout` is
//! the time left on the caller's deadline, so the server cancels it on
//! expiry. `RequestContext::run` still bounds the client side.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use crate::context::RequestContext;
use crate::error::{StoreError, StoreResult};
use crate::model::{Note, NoteId, NoteInput};
use crate::store::NoteStore;

use super::pool::{create_pool_with_options, PoolOptions};

const BACKEND: &str = "postgres";

/// Durable note store over a shared connection pool
#[derive(Debug, Clone)]
pub struct PgNoteStore {
    pool: PgPool,
}

impl PgNoteStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a fresh pool. The schema must already exist
    /// (see [`super::migrations::run`]).
    pub async fn connect(database_url: &str, options: PoolOptions) -> StoreResult<Self> {
        let pool = create_pool_with_options(database_url, options).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Open a transaction whose statements the server aborts once the
    /// caller's deadline passes.
    async fn begin_bounded(
        &self,
        ctx: &RequestContext,
    ) -> StoreResult<Transaction<'static, Postgres>> {
        let mut tx = self.pool.begin().await?;

        // Measured after checkout so pool wait time is not counted twice
        let budget_ms = ctx.remaining().as_millis().clamp(1, i32::MAX as u128);
        sqlx::query("SELECT set_config('statement_timeout', $1, true)")
            .bind(format!("{}ms", budget_ms))
            .execute(&mut *tx)
            .await?;

        Ok(tx)
    }
}

#[async_trait]
impl NoteStore for PgNoteStore {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    async fn create(&self, ctx: &RequestContext, input: NoteInput) -> StoreResult<Note> {
        let note = ctx
            .run(async {
                let mut tx = self.begin_bounded(ctx).await?;
                let note: Note = sqlx::query_as(
                    r#"
                    INSERT INTO notes (title, content, created_at, updated_at)
                    VALUES ($1, $2, NOW(), NOW())
                    RETURNING id, title, content, created_at, updated_at
                    "#,
                )
                .bind(&input.title)
                .bind(&input.content)
                .fetch_one(&mut *tx)
                .await?;
                tx.commit().await?;
                Ok::<_, StoreError>(note)
            })
            .await?;

        tracing::debug!(backend = BACKEND, note_id = note.id, "note created");
        Ok(note)
    }

    async fn get_all(&self, ctx: &RequestContext) -> StoreResult<Vec<Note>> {
        // Any undecodable row fails the whole call
        ctx.run(async {
            let mut tx = self.begin_bounded(ctx).await?;
            let notes: Vec<Note> = sqlx::query_as(
                r#"
                SELECT id, title, content, created_at, updated_at
                FROM notes
                ORDER BY created_at DESC, id DESC
                "#,
            )
            .fetch_all(&mut *tx)
            .await?;
            tx.commit().await?;
            Ok::<_, StoreError>(notes)
        })
        .await
    }

    async fn get(&self, ctx: &RequestContext, id: NoteId) -> StoreResult<Note> {
        ctx.run(async {
            let mut tx = self.begin_bounded(ctx).await?;
            let note: Option<Note> = sqlx::query_as(
                r#"
                SELECT id, title, content, created_at, updated_at
                FROM notes
                WHERE id = $1
                "#,
            )
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
            tx.commit().await?;
            note.ok_or_else(|| StoreError::not_found(id))
        })
        .await
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        id: NoteId,
        input: NoteInput,
    ) -> StoreResult<Note> {
        let note = ctx
            .run(async {
                let mut tx = self.begin_bounded(ctx).await?;
                let note: Option<Note> = sqlx::query_as(
                    r#"
                    UPDATE notes
                    SET title = $1,
                        content = $2,
                        updated_at = GREATEST(NOW(), updated_at, created_at)
                    WHERE id = $3
                    RETURNING id, title, content, created_at, updated_at
                    "#,
                )
                .bind(&input.title)
                .bind(&input.content)
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
                tx.commit().await?;
                note.ok_or_else(|| StoreError::not_found(id))
            })
            .await?;

        tracing::debug!(backend = BACKEND, note_id = id, "note updated");
        Ok(note)
    }

    async fn delete(&self, ctx: &RequestContext, id: NoteId) -> StoreResult<()> {
        ctx.run(async {
            let mut tx = self.begin_bounded(ctx).await?;
            let result = sqlx::query("DELETE FROM notes WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            tx.commit().await?;

            if result.rows_affected() == 0 {
                return Err(StoreError::not_found(id));
            }
            Ok::<_, StoreError>(())
        })
        .await?;

        tracing::debug!(backend = BACKEND, note_id = id, "note deleted");
        Ok(())
    }

    async fn shutdown(&self) -> StoreResult<()> {
        if self.pool.is_closed() {
            return Ok(());
        }

        // Waits for checked-out connections to come back before closing them
        self.pool.close().await;
        tracing::info!(backend = BACKEND, "connection pool closed");
        Ok(())
    }
}
