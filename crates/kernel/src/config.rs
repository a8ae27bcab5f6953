//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Route definition file, YAML or JSON (default: ./routes.yaml).
    pub routes_file: PathBuf,

    /// Permission endpoint response to read actor tokens from.
    /// When None, tokens come from the command line only.
    pub permissions_file: Option<PathBuf>,

    /// Maximum number of distinct permission sets with a cached menu (default: 64).
    pub menu_cache_capacity: u64,

    /// Heading shown above the navigation outline.
    pub app_title: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let routes_file = lookup("ROUTES_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./routes.yaml"));

        let permissions_file = lookup("PERMISSIONS_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let menu_cache_capacity = lookup("MENU_CACHE_CAPACITY")
            .unwrap_or_else(|| "64".to_string())
            .parse()
            .context("MENU_CACHE_CAPACITY must be a valid u64")?;

        let app_title = lookup("APP_TITLE").unwrap_or_default();

        Ok(Self {
            routes_file,
            permissions_file,
            menu_cache_capacity,
            app_title,
        })
    }
}
