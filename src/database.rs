use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

use crate::configuration::DatabaseSettings;
use crate::error::DatabaseError;

/// Open the connection pool and fail fast if Postgres is unreachable.
pub async fn connect_pool(settings: &DatabaseSettings) -> Result<PgPool, DatabaseError> {
    tracing::info!(
        max_connections = settings.max_connections,
        "Attempting to connect to database"
    );

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_seconds))
        .connect(settings.connection_string())
        .await
        .map_err(|e| DatabaseError::ConnectionPool(e.to_string()))?;

    tracing::info!("Database connection pool created successfully");
    Ok(pool)
}

/// Apply the embedded migrations in `./migrations`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DatabaseError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// Connect and, when enabled, migrate. A pool whose migrations fail is closed
/// before the error is returned.
pub async fn open_pool(settings: &DatabaseSettings) -> Result<PgPool, DatabaseError> {
    let pool = connect_pool(settings).await?;

    if settings.run_migrations {
        if let Err(e) = run_migrations(&pool).await {
            close_pool(&pool).await;
            return Err(e);
        }
    }

    Ok(pool)
}

pub async fn close_pool(pool: &PgPool) {
    pool.close().await;
    tracing::info!("Database connections closed");
}
