pub mod repositories;

pub use repositories::MockCareStore;

use eyre::{Result, WrapErr};
use tokio::sync::OnceCell;

use crate::DbPool;

static TEST_SCHEMA: OnceCell<()> = OnceCell::const_new();

/// Connects to `TEST_DATABASE_URL` and makes sure the schema exists.
///
/// Returns `None` when the variable is unset so database tests can be
/// skipped on machines without Postgres.
pub async fn create_test_pool() -> Result<Option<DbPool>> {
    let Ok(database_url) = std::env::var("TEST_DATABASE_URL") else {
        return Ok(None);
    };

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .wrap_err("Failed to connect to test database")?;

    // Concurrent CREATE TABLE IF NOT EXISTS can still collide in Postgres
    TEST_SCHEMA
        .get_or_try_init(|| crate::schema::initialize_database(&pool))
        .await
        .wrap_err("Failed to initialize test database schema")?;

    Ok(Some(pool))
}
