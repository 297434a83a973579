use crate::error::CoreError;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::path::Path;

// Re-export the pool for use in other parts of the core crate
pub use sqlx::SqlitePool as DbPool;

/// Establishes a connection pool to the SQLite database and runs migrations.
///
/// # Arguments
///
/// * `database_url` - A plain file path (`teletask.db`) or a sqlx SQLite URL
///   such as `sqlite::memory:`.
///
/// # Returns
///
/// A `Result` containing the `SqlitePool` or a `CoreError` if the connection
/// fails or migrations cannot be run.
pub async fn establish_connection(database_url: &str) -> Result<SqlitePool, CoreError> {
    // URLs with an explicit scheme go to sqlx untouched. Bare file paths get
    // their parent directory and file created first so the pool can open them.
    if !database_url.starts_with("sqlite:") {
        if let Some(parent) = Path::new(database_url).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        if !Path::new(database_url).exists() {
            tokio::fs::File::create(database_url).await?;
        }
    }

    // Pooled in-memory connections would each open their own empty database,
    // so pin a single long-lived connection for `:memory:` URLs.
    let options = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    let pool = options.connect(database_url).await?;

    // Run migrations
    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
