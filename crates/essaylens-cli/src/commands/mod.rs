//! Subcommand implementations and shared wiring.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use uuid::Uuid;

use essaylens_core::model::{Level, Status};
use essaylens_store::SqliteStore;

use crate::config::{load_config_from, EssaylensConfig};

pub mod delete;
pub mod evaluate;
pub mod health;
pub mod init;
pub mod list;
pub mod show;
pub mod stats;
pub mod update;

/// Global options resolved before dispatch.
pub struct Settings {
    pub db: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

impl Settings {
    pub fn load_config(&self) -> Result<EssaylensConfig> {
        load_config_from(self.config.as_deref())
    }

    /// Open the configured SQLite store, `--db` taking precedence.
    pub fn open_store(&self) -> Result<Arc<SqliteStore>> {
        let config = self.load_config()?;
        let path = self.db.clone().unwrap_or(config.db_path);
        let store = SqliteStore::open(&path)
            .with_context(|| format!("failed to open store at {}", path.display()))?;
        Ok(Arc::new(store))
    }
}

pub fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).with_context(|| format!("invalid submission id: {raw}"))
}

pub fn parse_level(raw: &str) -> Result<Level> {
    Level::from_str(raw).map_err(anyhow::Error::msg)
}

pub fn parse_status(raw: &str) -> Result<Status> {
    Status::from_str(raw).map_err(anyhow::Error::msg)
}
