//! Schema bootstrap for the notes table

use sqlx::PgPool;

/// Create the notes table and its index if they do not exist yet.
///
/// Safe to run on every startup.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running notes migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS notes (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_notes_created_at ON notes (created_at DESC)")
        .execute(pool)
        .await?;

    tracing::info!("Notes migrations complete");
    Ok(())
}
