use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single watchlist entry. Manually created tasks carry only a title and a
/// completion flag; tasks created by a catalog import also record where the
/// series came from.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub complete: bool,
    /// Provider slug the task was imported from (`netflix`, `amazon-prime`, ...).
    pub provider_slug: Option<String>,
    /// TMDB watch-provider identifier, stored as the string sent on the wire.
    pub provider_service_id: Option<String>,
    /// TMDB series identifier. Together with `provider_service_id` this pair
    /// is unique across the table; both are NULL for manual tasks.
    pub tmdb_series_id: Option<i64>,
    pub created: DateTime<Utc>,
}

impl Task {
    /// Whether this task was created by a watchlist import.
    pub fn is_imported(&self) -> bool {
        self.tmdb_series_id.is_some()
    }
}

/// Data for creating a task by hand.
#[derive(Debug, Clone, Default)]
pub struct NewTaskData {
    pub title: String,
    pub complete: bool,
}

/// Data for overwriting an existing task's editable fields.
#[derive(Debug, Clone, Default)]
pub struct UpdateTaskData {
    pub title: String,
    pub complete: bool,
}

/// Data for inserting a task produced by a catalog import.
#[derive(Debug, Clone)]
pub struct ImportedTaskData {
    pub title: String,
    pub provider_slug: String,
    pub provider_service_id: String,
    pub tmdb_series_id: i64,
}

/// The slice of a catalog entry the import pipeline cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub id: i64,
    pub name: String,
}
