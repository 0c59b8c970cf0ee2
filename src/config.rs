//! Startup configuration.
//!
//! Key precedence: `--key` > `TIANAPI_KEY` env > `key:` in the YAML config
//! file. The config file itself comes from `--config` or `TIANXING_CONFIG`.
//! A missing or blank key is fatal before any command runs.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::api::DEFAULT_BASE_URL;

pub const KEY_ENV: &str = "TIANAPI_KEY";
pub const CONFIG_ENV: &str = "TIANXING_CONFIG";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// On-disk shape (YAML). Every field optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Values supplied on the command line (or their env fallbacks).
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub key: Option<String>,
    pub config: Option<PathBuf>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Config {
    /// Resolve from CLI overrides, environment, and the optional config file.
    pub fn resolve(mut overrides: Overrides) -> Result<Self> {
        if overrides.key.is_none() {
            overrides.key = non_blank_env(KEY_ENV);
        }
        if overrides.config.is_none() {
            overrides.config = non_blank_env(CONFIG_ENV).map(PathBuf::from);
        }
        let file = match overrides.config.as_deref() {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };
        Self::merge(overrides, file)
    }

    /// Pure precedence merge: overrides win over file values.
    pub fn merge(overrides: Overrides, file: ConfigFile) -> Result<Self> {
        let key = overrides
            .key
            .or(file.key)
            .map(|k| k.trim().to_string())
            .unwrap_or_default();
        if key.is_empty() {
            bail!(
                "missing API key: pass --key, set {KEY_ENV}, or put `key:` in the config file"
            );
        }

        let base_url = overrides
            .base_url
            .or(file.base_url)
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        url::Url::parse(&base_url).with_context(|| format!("Invalid base URL '{base_url}'"))?;

        let timeout = Duration::from_secs(file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));

        Ok(Self {
            key,
            base_url,
            timeout,
        })
    }
}

fn non_blank_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.trim().is_empty())
}
