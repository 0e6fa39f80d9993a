//! Document source configuration parsing from environment variables.
//!
//! Locale documents come either from a web server (`POLICY_BASE_URL`) or,
//! when `POLICY_LOCALES_DIR` is set, straight from a local directory.

use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/";

/// Where locale documents are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceEnvConfig {
    Http { base_url: String },
    Directory { path: PathBuf },
}

impl Default for SourceEnvConfig {
    fn default() -> Self {
        SourceEnvConfig::Http {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl SourceEnvConfig {
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = var("POLICY_LOCALES_DIR").filter(|d| !d.trim().is_empty()) {
            return SourceEnvConfig::Directory {
                path: PathBuf::from(dir),
            };
        }

        SourceEnvConfig::Http {
            base_url: var("POLICY_BASE_URL")
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}
