use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{ImportedTaskData, NewTaskData, Task, UpdateTaskData};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;

/// Data access layer for watchlist tasks.
#[async_trait]
pub trait TaskRepository {
    /// All tasks in insertion order.
    async fn list_tasks(&self) -> Result<Vec<Task>, CoreError>;
    async fn find_task_by_id(&self, id: i64) -> Result<Option<Task>, CoreError>;
    async fn add_task(&self, data: NewTaskData) -> Result<Task, CoreError>;
    /// Overwrites title and completion state, leaving `created` and any
    /// import metadata untouched.
    async fn update_task(&self, id: i64, data: UpdateTaskData) -> Result<Task, CoreError>;
    async fn delete_task(&self, id: i64) -> Result<(), CoreError>;
    /// TMDB series ids already imported for the given watch provider.
    async fn imported_series_ids(
        &self,
        provider_service_id: &str,
    ) -> Result<HashSet<i64>, CoreError>;
    /// Inserts an imported series if its (provider, series) pair is not
    /// already present. Returns whether a row was created.
    async fn import_series(&self, data: ImportedTaskData) -> Result<bool, CoreError>;
}

/// SQLite implementation of the repository pattern
pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for SqliteRepository {
    async fn list_tasks(&self) -> Result<Vec<Task>, CoreError> {
        let tasks = sqlx::query_as("SELECT * FROM tasks ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(tasks)
    }

    async fn find_task_by_id(&self, id: i64) -> Result<Option<Task>, CoreError> {
        let task = sqlx::query_as("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn add_task(&self, data: NewTaskData) -> Result<Task, CoreError> {
        let task = sqlx::query_as(
            "INSERT INTO tasks (title, complete, created) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.title)
        .bind(data.complete)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(task)
    }

    async fn update_task(&self, id: i64, data: UpdateTaskData) -> Result<Task, CoreError> {
        let task = sqlx::query_as(
            "UPDATE tasks SET title = $1, complete = $2 WHERE id = $3 RETURNING *",
        )
        .bind(&data.title)
        .bind(data.complete)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| CoreError::NotFound(id.to_string()))?;
        Ok(task)
    }

    async fn delete_task(&self, id: i64) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn imported_series_ids(
        &self,
        provider_service_id: &str,
    ) -> Result<HashSet<i64>, CoreError> {
        let ids: Vec<i64> = sqlx::query_scalar(
            "SELECT tmdb_series_id FROM tasks \
             WHERE provider_service_id = $1 AND tmdb_series_id IS NOT NULL",
        )
        .bind(provider_service_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids.into_iter().collect())
    }

    async fn import_series(&self, data: ImportedTaskData) -> Result<bool, CoreError> {
        // The unique index on (provider_service_id, tmdb_series_id) makes the
        // insert-if-absent atomic; a concurrent duplicate simply reports zero
        // affected rows instead of failing.
        let result = sqlx::query(
            "INSERT INTO tasks (title, complete, provider_slug, provider_service_id, tmdb_series_id, created) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (provider_service_id, tmdb_series_id) DO NOTHING",
        )
        .bind(&data.title)
        .bind(false)
        .bind(&data.provider_slug)
        .bind(&data.provider_service_id)
        .bind(data.tmdb_series_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::establish_connection;

    async fn setup() -> SqliteRepository {
        let pool = establish_connection("sqlite::memory:").await.unwrap();
        SqliteRepository::new(pool)
    }

    #[tokio::test]
    async fn test_add_and_find_task() {
        let repo = setup().await;
        let task = repo
            .add_task(NewTaskData {
                title: "Watch The Wire".to_string(),
                complete: false,
            })
            .await
            .unwrap();

        assert_eq!(task.title, "Watch The Wire");
        assert!(!task.complete);
        assert!(!task.is_imported());

        let fetched = repo.find_task_by_id(task.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, task.id);
        assert_eq!(fetched.title, "Watch The Wire");
    }

    #[tokio::test]
    async fn test_list_tasks_in_insertion_order() {
        let repo = setup().await;
        for title in ["first", "second", "third"] {
            repo.add_task(NewTaskData {
                title: title.to_string(),
                complete: false,
            })
            .await
            .unwrap();
        }

        let tasks = repo.list_tasks().await.unwrap();
        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_update_task_preserves_created() {
        let repo = setup().await;
        let task = repo
            .add_task(NewTaskData {
                title: "before".to_string(),
                complete: false,
            })
            .await
            .unwrap();

        let updated = repo
            .update_task(
                task.id,
                UpdateTaskData {
                    title: "after".to_string(),
                    complete: true,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "after");
        assert!(updated.complete);
        assert_eq!(updated.created, task.created);
    }

    #[tokio::test]
    async fn test_update_missing_task_is_not_found() {
        let repo = setup().await;
        let result = repo
            .update_task(
                9999,
                UpdateTaskData {
                    title: "ghost".to_string(),
                    complete: false,
                },
            )
            .await;
        assert!(matches!(result, Err(CoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_task() {
        let repo = setup().await;
        let task = repo
            .add_task(NewTaskData {
                title: "to delete".to_string(),
                complete: false,
            })
            .await
            .unwrap();

        repo.delete_task(task.id).await.unwrap();
        assert!(repo.find_task_by_id(task.id).await.unwrap().is_none());

        let result = repo.delete_task(task.id).await;
        assert!(matches!(result, Err(CoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_import_series_is_idempotent() {
        let repo = setup().await;
        let data = ImportedTaskData {
            title: "[Netflix] Dark".to_string(),
            provider_slug: "netflix".to_string(),
            provider_service_id: "8".to_string(),
            tmdb_series_id: 70523,
        };

        assert!(repo.import_series(data.clone()).await.unwrap());
        assert!(!repo.import_series(data).await.unwrap());

        let tasks = repo.list_tasks().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "[Netflix] Dark");
        assert!(!tasks[0].complete);
        assert!(tasks[0].is_imported());
    }

    #[tokio::test]
    async fn test_same_series_allowed_for_different_providers() {
        let repo = setup().await;
        let netflix = ImportedTaskData {
            title: "[Netflix] Dark".to_string(),
            provider_slug: "netflix".to_string(),
            provider_service_id: "8".to_string(),
            tmdb_series_id: 70523,
        };
        let prime = ImportedTaskData {
            title: "[Amazon Prime Video] Dark".to_string(),
            provider_slug: "amazon-prime".to_string(),
            provider_service_id: "9".to_string(),
            tmdb_series_id: 70523,
        };

        assert!(repo.import_series(netflix).await.unwrap());
        assert!(repo.import_series(prime).await.unwrap());
        assert_eq!(repo.list_tasks().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_manual_tasks_not_constrained_by_unique_index() {
        let repo = setup().await;
        for _ in 0..3 {
            repo.add_task(NewTaskData {
                title: "duplicate title".to_string(),
                complete: false,
            })
            .await
            .unwrap();
        }
        assert_eq!(repo.list_tasks().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_imported_series_ids_filters_by_provider() {
        let repo = setup().await;
        repo.import_series(ImportedTaskData {
            title: "[Netflix] Dark".to_string(),
            provider_slug: "netflix".to_string(),
            provider_service_id: "8".to_string(),
            tmdb_series_id: 70523,
        })
        .await
        .unwrap();
        repo.import_series(ImportedTaskData {
            title: "[Amazon Prime Video] The Boys".to_string(),
            provider_slug: "amazon-prime".to_string(),
            provider_service_id: "9".to_string(),
            tmdb_series_id: 76479,
        })
        .await
        .unwrap();
        repo.add_task(NewTaskData {
            title: "manual entry".to_string(),
            complete: false,
        })
        .await
        .unwrap();

        let netflix_ids = repo.imported_series_ids("8").await.unwrap();
        assert_eq!(netflix_ids, HashSet::from([70523]));

        let prime_ids = repo.imported_series_ids("9").await.unwrap();
        assert_eq!(prime_ids, HashSet::from([76479]));

        assert!(repo.imported_series_ids("350").await.unwrap().is_empty());
    }
}
