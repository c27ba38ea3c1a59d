//! Connection pool utilities

use crate::error::{DbError, DbResult};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use tokio_postgres::NoTls;

/// Create a connection pool from a database URL.
///
/// Convenience helper using `NoTls` and a small default size, suitable for
/// local/dev. Use [`create_pool_with_config`] to size the pool from your
/// application configuration.
///
/// # Example
///
/// ```ignore
/// let pool = pgboard::create_pool(&std::env::var("DATABASE_URL")?)?;
/// let client = pool.get().await?;
/// ```
pub fn create_pool(database_url: &str) -> DbResult<Pool> {
    create_pool_with_config(database_url, 16)
}

/// Create a connection pool with a custom maximum size.
pub fn create_pool_with_config(database_url: &str, max_size: usize) -> DbResult<Pool> {
    let pg_config: tokio_postgres::Config = database_url
        .parse()
        .map_err(|e: tokio_postgres::Error| DbError::Connection(e.to_string()))?;

    let mgr = Manager::from_config(
        pg_config,
        NoTls,
        ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        },
    );
    Pool::builder(mgr)
        .max_size(max_size)
        .build()
        .map_err(|e| DbError::Pool(e.to_string()))
}
