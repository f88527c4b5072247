//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level essaylens configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EssaylensConfig {
    /// SQLite database path.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
    /// Level applied when a submission doesn't specify one.
    #[serde(default = "default_level")]
    pub default_level: String,
    /// Max concurrent evaluations in multi-file runs.
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./essaylens.db")
}
fn default_level() -> String {
    "undergrad".to_string()
}
fn default_parallelism() -> usize {
    4
}

impl Default for EssaylensConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            default_level: default_level(),
            parallelism: default_parallelism(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `essaylens.toml` in the current directory
/// 2. `~/.config/essaylens/config.toml`
///
/// `ESSAYLENS_DB` overrides the database path from either source.
pub fn load_config_from(path: Option<&Path>) -> Result<EssaylensConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("essaylens.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<EssaylensConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => EssaylensConfig::default(),
    };

    if let Ok(db) = std::env::var("ESSAYLENS_DB") {
        config.db_path = PathBuf::from(db);
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("essaylens"))
}
