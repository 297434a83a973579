//! Shared application state injected into every handler.

use minijinja::Environment;

use teletask_core::catalog::CatalogClient;
use teletask_core::db::DbPool;
use teletask_core::repository::SqliteRepository;

use crate::config::Config;
use crate::templates;

pub struct AppState {
    pub config: Config,
    pub repo: SqliteRepository,
    pub catalog: CatalogClient,
    pub templates: Environment<'static>,
}

impl AppState {
    /// Fails when the HTTP client or the template environment cannot be
    /// built.
    pub fn new(config: Config, pool: DbPool) -> anyhow::Result<Self> {
        let catalog = CatalogClient::new(config.tmdb.catalog_config())?;
        Ok(Self {
            repo: SqliteRepository::new(pool),
            catalog,
            templates: templates::environment()?,
            config,
        })
    }
}
