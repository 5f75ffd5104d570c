//! Schema creation for the books table

use sqlx::PgPool;

use crate::Result;

/// Create the books table if it does not exist.
pub async fn run(pool: &PgPool) -> Result<()> {
    tracing::info!("Running books migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL DEFAULT '',
            author TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Books migrations complete");
    Ok(())
}
