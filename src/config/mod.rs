//! Configuration module for the policy page renderer.
//!
//! Settings are read from environment variables (optionally through a
//! `.env` file loaded by the binary) and may be overridden by CLI flags.

mod source_config;

pub use source_config::{DEFAULT_BASE_URL, SourceEnvConfig};

use crate::domain::ports::{DocumentSource, PreferenceStore};
use crate::infrastructure::documents::http::parse_base_url;
use crate::infrastructure::{
    DirectoryDocumentSource, FilePreferenceStore, HttpDocumentSource, MemoryPreferenceStore,
};
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub source: SourceEnvConfig,
    /// Overrides `~/.ai-lazy-pack/preferences.json`
    pub preferences_path: Option<PathBuf>,
}

/// Values given on the command line, applied over the environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub source: Option<SourceEnvConfig>,
    pub preferences_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(ConfigOverrides::default())
    }

    /// Load configuration from environment variables, then apply overrides.
    pub fn from_env_with(overrides: ConfigOverrides) -> Result<Self> {
        Self::from_vars_with(|key| env::var(key).ok(), overrides)
    }

    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_vars_with(var, ConfigOverrides::default())
    }

    /// Overrides replace environment values before anything is validated,
    /// so a bad value that is overridden never fails the load.
    pub fn from_vars_with<F>(var: F, overrides: ConfigOverrides) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source = overrides
            .source
            .unwrap_or_else(|| SourceEnvConfig::from_vars(&var));
        if let SourceEnvConfig::Http { base_url } = &source {
            parse_base_url(base_url).context("Failed to load document source config")?;
        }

        let preferences_path = overrides.preferences_path.or_else(|| {
            var("POLICY_PREFERENCES_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from)
        });

        Ok(Self {
            source,
            preferences_path,
        })
    }

    pub fn document_source(&self) -> Result<Arc<dyn DocumentSource>> {
        let source: Arc<dyn DocumentSource> = match &self.source {
            SourceEnvConfig::Http { base_url } => Arc::new(HttpDocumentSource::new(base_url)?),
            SourceEnvConfig::Directory { path } => Arc::new(DirectoryDocumentSource::new(path)),
        };
        Ok(source)
    }

    /// Durable store, falling back to memory when no home directory exists
    pub fn preference_store(&self) -> Arc<dyn PreferenceStore> {
        if let Some(path) = &self.preferences_path {
            return Arc::new(FilePreferenceStore::at(path));
        }

        let store: Arc<dyn PreferenceStore> = match FilePreferenceStore::new() {
            Ok(store) => Arc::new(store),
            Err(e) => {
                warn!("Language preference will not persist: {:#}", e);
                Arc::new(MemoryPreferenceStore::new())
            }
        };
        store
    }
}
