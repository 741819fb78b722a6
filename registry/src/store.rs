//! Durable settings store seam.

use std::io;
use std::path::{Path, PathBuf};

use mcpman_types::ServerRecord;
use mcpman_utils::{atomic_write, PersistMode};

/// Where the settings file lives by default: `~/.mcpman/servers.json`.
///
/// `None` when the home directory cannot be determined.
#[must_use]
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".mcpman").join("servers.json"))
}

/// Failure talking to the backing store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read settings: {0}")]
    Read(#[source] io::Error),
    #[error("failed to write settings: {0}")]
    Write(#[source] io::Error),
    #[error("settings file is not valid JSON: {0}")]
    Corrupt(#[source] serde_json::Error),
    #[error("failed to encode settings: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Durable key-value seam the registry persists through.
///
/// Contract: `read` returns the current full list (empty when nothing has
/// been configured yet) and `write` replaces it wholesale, with writes
/// visible to subsequent reads in the same process.
pub trait SettingsStore {
    fn read(&self) -> Result<Vec<ServerRecord>, StoreError>;
    fn write(&self, servers: &[ServerRecord]) -> Result<(), StoreError>;
}

/// JSON-file-backed settings store.
///
/// Reads fresh from disk on every call (no in-memory caching) and writes
/// atomically with owner-only permissions, since records may carry API keys.
/// A missing file reads as an empty list; an unreadable or malformed file is
/// a [`StoreError`], never a panic and never silently treated as empty.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonFileStore {
    fn read(&self) -> Result<Vec<ServerRecord>, StoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Read(e)),
        };
        serde_json::from_slice(&bytes).map_err(StoreError::Corrupt)
    }

    fn write(&self, servers: &[ServerRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(StoreError::Write)?;
            }
        }

        let json = serde_json::to_vec_pretty(servers).map_err(StoreError::Encode)?;
        atomic_write(&self.path, &json, PersistMode::SensitiveOwnerOnly)
            .map_err(StoreError::Write)?;

        tracing::debug!(
            path = %self.path.display(),
            count = servers.len(),
            "Persisted server list"
        );
        Ok(())
    }
}
