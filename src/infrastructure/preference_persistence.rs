use crate::domain::ports::PreferenceStore;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::{info, warn};

const APP_DIR: &str = ".ai-lazy-pack";
const PREFERENCES_FILE: &str = "preferences.json";

/// Preferences stored as a flat JSON object of string values.
///
/// Reads go to disk every time so that separate sessions see each other's
/// writes. A missing, unreadable or corrupt file reads as empty.
pub struct FilePreferenceStore {
    file_path: PathBuf,
    // Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FilePreferenceStore {
    /// Store under `~/.ai-lazy-pack/preferences.json`
    pub fn new() -> Result<Self> {
        let home = std::env::var("HOME").context("Could not find HOME directory")?;
        Ok(Self::at(PathBuf::from(home).join(APP_DIR).join(PREFERENCES_FILE)))
    }

    pub fn at(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.file_path.exists() {
            return Ok(BTreeMap::new());
        }

        let content =
            fs::read_to_string(&self.file_path).context("Failed to read preferences file")?;
        serde_json::from_str(&content).context("Failed to parse preferences JSON")
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(dir) = self.file_path.parent()
            && !dir.as_os_str().is_empty()
            && !dir.exists()
        {
            fs::create_dir_all(dir).context("Failed to create preferences directory")?;
        }

        let content =
            serde_json::to_string_pretty(entries).context("Failed to serialize preferences")?;

        // Atomic write: write to temp file then rename
        let temp_path = self.file_path.with_extension("tmp");
        fs::write(&temp_path, content).context("Failed to write temp preferences file")?;
        fs::rename(&temp_path, &self.file_path).context("Failed to rename preferences file")?;

        info!("Saved preferences to {:?}", self.file_path);
        Ok(())
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.load() {
            Ok(mut entries) => entries.remove(key),
            Err(e) => {
                warn!("Ignoring preferences at {:?}: {:#}", self.file_path, e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        // A corrupt file is replaced rather than blocking the write
        let mut entries = self.load().unwrap_or_else(|e| {
            warn!("Overwriting unreadable preferences at {:?}: {:#}", self.file_path, e);
            BTreeMap::new()
        });
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }
}
