//! JSON-file [`PreferenceStore`] holding recent searches and the theme.
//!
//! The file is a single object:
//!
//! ```json
//! { "searchHistory": ["octocat", "torvalds"], "theme": "dark" }
//! ```
//!
//! A missing file reads as an empty store. A corrupt file fails reads, and
//! the next write replaces it with a fresh document. Writes go to a sibling
//! temp file that is then renamed over the target, so a crash never leaves a
//! partially written state file behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use ghview_core::{PreferenceStore, StoreError, Theme};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StateDocument {
    #[serde(default)]
    search_history: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    theme: Option<Theme>,
}

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles between concurrent lookups.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<StateDocument, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(StateDocument::default()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(StateDocument::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn update(&self, apply: impl FnOnce(&mut StateDocument)) -> Result<(), StoreError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut doc = match self.read() {
            Ok(doc) => doc,
            Err(StoreError::Json(e)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "state file is not valid JSON; replacing it"
                );
                StateDocument::default()
            }
            Err(e) => return Err(e),
        };
        apply(&mut doc);
        self.write(&doc)
    }

    fn write(&self, doc: &StateDocument) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let bytes = serde_json::to_vec_pretty(doc)?;
        let tmp = self.temp_path();
        fs::write(&tmp, bytes)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                tracing::debug!(path = %tmp.display(), error = %cleanup, "temp state file cleanup failed");
            }
            return Err(e.into());
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map_or_else(|| "state.json".into(), |n| n.to_string_lossy());
        self.path
            .with_file_name(format!(".{file_name}.tmp.{}", std::process::id()))
    }
}

impl PreferenceStore for JsonFileStore {
    fn load_history(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.read()?.search_history)
    }

    fn save_history(&self, history: &[String]) -> Result<(), StoreError> {
        self.update(|doc| doc.search_history = history.to_vec())
    }

    fn clear_history(&self) -> Result<(), StoreError> {
        self.update(|doc| doc.search_history.clear())
    }

    fn load_theme(&self) -> Result<Option<Theme>, StoreError> {
        Ok(self.read()?.theme)
    }

    fn save_theme(&self, theme: Theme) -> Result<(), StoreError> {
        self.update(|doc| doc.theme = Some(theme))
    }
}
