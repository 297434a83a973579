use std::time::Duration;

use clap::Parser;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

use teletask_core::catalog::{
    CatalogConfig, DEFAULT_BASE_URL, DEFAULT_LANGUAGE, DEFAULT_TIMEOUT_SECS, DEFAULT_WATCH_REGION,
};

/// Web frontend for the Teletask watchlist tracker
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[clap(long, default_value = "teletask.toml")]
    pub config: String,
    /// Override the TCP address to bind
    #[clap(long)]
    pub bind: Option<String>,
    /// Override the SQLite database path
    #[clap(long)]
    pub database_url: Option<String>,
}

/// Runtime configuration, merged from the TOML file, `TELETASK_*` environment
/// variables and command-line overrides. Every field has a default so the
/// server starts with no configuration at all.
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// TCP address to bind.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// SQLite database path, created on first start if missing.
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// TMDB catalog settings for watchlist imports.
    #[serde(default)]
    pub tmdb: TmdbConfig,
}

/// Configuration for the TMDB catalog client
#[derive(Deserialize, Debug, Clone)]
pub struct TmdbConfig {
    /// TMDB v4 Read Access Token, sent as a bearer token. Also read from the
    /// plain `TMDB_READ_ACCESS_TOKEN` environment variable.
    #[serde(default)]
    pub read_access_token: String,
    /// BCP 47 tag for localized series titles
    #[serde(default = "default_language")]
    pub language: String,
    /// Region whose provider availability is queried
    #[serde(default = "default_watch_region")]
    pub watch_region: String,
    /// Catalog API root
    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,
    /// Upper bound on each catalog request, in seconds
    #[serde(default = "default_tmdb_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            read_access_token: String::new(),
            language: default_language(),
            watch_region: default_watch_region(),
            base_url: default_tmdb_base_url(),
            timeout_secs: default_tmdb_timeout_secs(),
        }
    }
}

impl TmdbConfig {
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            read_access_token: self.read_access_token.clone(),
            language: self.language.clone(),
            watch_region: self.watch_region.clone(),
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

impl Config {
    pub fn new(config_path: &str) -> Result<Self, figment::Error> {
        Self::figment(config_path).extract()
    }

    /// Precedence, lowest to highest: TOML file, `TELETASK_*` variables
    /// (with `__` separating nesting levels), then the bare
    /// `TMDB_READ_ACCESS_TOKEN` variable the import feature documents.
    fn figment(config_path: &str) -> Figment {
        Figment::new()
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("TELETASK_").split("__"))
            .merge(
                Env::raw()
                    .only(&["TMDB_READ_ACCESS_TOKEN"])
                    .map(|_| "tmdb.read_access_token".into()),
            )
    }
}

fn default_bind_address() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_database_url() -> String {
    "teletask.db".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_watch_region() -> String {
    DEFAULT_WATCH_REGION.to_string()
}

fn default_tmdb_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_tmdb_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
