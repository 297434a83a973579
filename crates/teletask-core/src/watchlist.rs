//! Watchlist import workflow: pull top-rated series for a provider from the
//! catalog and persist the ones not already tracked.

use thiserror::Error;

use crate::catalog::{CatalogClient, CatalogError};
use crate::error::CoreError;
use crate::models::ImportedTaskData;
use crate::providers::Provider;
use crate::repository::TaskRepository;

/// How many series a single import run tries to add.
pub const DEFAULT_IMPORT_LIMIT: usize = 10;

/// Failures along the import path, kept separate so callers can tell a
/// catalog problem from a storage problem.
#[derive(Debug, Error)]
pub enum WatchlistError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Imports up to `limit` new series for `provider` and returns how many tasks
/// were actually created.
///
/// Series already imported for this provider are excluded before the catalog
/// is queried, so repeated imports extend the watchlist instead of reporting
/// the same titles again. The unique index on (provider, series) backstops
/// the exclusion set against concurrent imports.
pub async fn import_provider_watchlist(
    repo: &impl TaskRepository,
    catalog: &CatalogClient,
    provider: &Provider,
    limit: usize,
) -> Result<usize, WatchlistError> {
    let excluded = repo.imported_series_ids(provider.tmdb_id).await?;
    let series = catalog
        .fetch_top_rated_series(provider.tmdb_id, limit, &excluded)
        .await?;

    let mut created = 0;
    for summary in series {
        let inserted = repo
            .import_series(ImportedTaskData {
                title: format!("[{}] {}", provider.label, summary.name),
                provider_slug: provider.slug.to_string(),
                provider_service_id: provider.tmdb_id.to_string(),
                tmdb_series_id: summary.id,
            })
            .await?;
        if inserted {
            created += 1;
        }
    }

    Ok(created)
}
