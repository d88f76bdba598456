//! Configuration resolution: flags and environment override the optional
//! TOML config file, which overrides built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use serde::Deserialize;

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  api_key: Option<String>,
  #[serde(default)]
  db_path: Option<PathBuf>,
}

/// Fully-resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
  pub api_key: Option<String>,
  pub db_path: PathBuf,
}

impl Settings {
  /// Merge an explicit config file (or the default location, if it exists)
  /// with flag/env overrides already extracted by clap.
  pub fn resolve(
    config_path: Option<&Path>,
    db_override: Option<PathBuf>,
    api_key_override: Option<String>,
  ) -> Result<Self> {
    let file = match config_path {
      // An explicitly named file must exist.
      Some(path) => {
        let text = std::fs::read_to_string(path)
          .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&text)
          .with_context(|| format!("parsing {}", path.display()))?
      }
      None => match default_config_path() {
        Some(path) if path.exists() => {
          let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
          toml::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?
        }
        _ => ConfigFile::default(),
      },
    };

    Ok(Self {
      api_key: api_key_override.or(file.api_key),
      db_path: db_override
        .or(file.db_path)
        .unwrap_or_else(default_db_path),
    })
  }
}

fn default_config_path() -> Option<PathBuf> {
  dirs::config_dir().map(|d| d.join("reel").join("config.toml"))
}

fn default_db_path() -> PathBuf {
  dirs::data_dir()
    .unwrap_or_else(|| PathBuf::from("."))
    .join("reel")
    .join("library.db")
}
