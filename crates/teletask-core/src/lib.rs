//! # Teletask Core Library
//!
//! Storage and import logic for the Teletask watchlist tracker: a SQLite-backed
//! task list where entries are either created by hand or imported from the
//! TMDB catalog, one task per (provider, series) pair.
//!
//! ## Core Modules
//!
//! - [`db`]: Database connection and migration management
//! - [`models`]: Core data structures and transfer objects
//! - [`repository`]: Data access layer with Repository pattern
//! - [`providers`]: The streaming platforms accepted as import sources
//! - [`catalog`]: TMDB discover client with pagination and dedup
//! - [`watchlist`]: The import workflow tying catalog and repository together
//! - [`error`]: Error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use teletask_core::{
//!     db,
//!     models::NewTaskData,
//!     repository::{SqliteRepository, TaskRepository},
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), teletask_core::error::CoreError> {
//!     let pool = db::establish_connection("teletask.db").await?;
//!     let repo = SqliteRepository::new(pool);
//!
//!     let task = repo
//!         .add_task(NewTaskData {
//!             title: "Watch The Wire".to_string(),
//!             complete: false,
//!         })
//!         .await?;
//!     println!("Created task: {}", task.title);
//!
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod db;
pub mod error;
pub mod models;
pub mod providers;
pub mod repository;
pub mod watchlist;
