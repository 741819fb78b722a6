//! Atomic file write helper.
//!
//! Uses a temp file + rename pattern. On Windows, rename-over-existing fails,
//! so we use a backup-and-restore fallback to avoid data loss when
//! overwriting. The settings file carries API keys, so callers can request
//! owner-only permissions on the written file.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistMode {
    /// Allow the file to inherit the default umask.
    #[default]
    Default,
    /// Strictly enforce owner-only read/write permissions (0o600 on Unix).
    SensitiveOwnerOnly,
}

impl PersistMode {
    #[cfg(unix)]
    fn mode(self) -> Option<u32> {
        match self {
            Self::Default => None,
            Self::SensitiveOwnerOnly => Some(0o600),
        }
    }
}

/// Write `bytes` to `path` atomically: write a temp file in the same
/// directory, sync it, then rename it over the destination.
pub fn atomic_write(path: impl AsRef<Path>, bytes: &[u8], mode: PersistMode) -> io::Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent)?;
    set_unix_mode(tmp.path(), mode)?;

    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;

    // Persist (rename) - handle Windows where rename fails if target exists.
    if let Err(err) = tmp.persist(path) {
        if path.exists() {
            let backup_path = path.with_extension("bak");
            let _ = fs::remove_file(&backup_path);
            fs::rename(path, &backup_path)?;

            if let Err(rename_err) = err.file.persist(path) {
                let _ = fs::rename(&backup_path, path);
                return Err(rename_err.error);
            }
            if let Err(e) = fs::remove_file(&backup_path) {
                tracing::warn!(
                    path = %backup_path.display(),
                    "Failed to remove .bak after atomic write: {e}"
                );
            }
        } else {
            return Err(err.error);
        }
    }

    set_unix_mode(path, mode)?;
    Ok(())
}

#[cfg(unix)]
fn set_unix_mode(path: &Path, mode: PersistMode) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    if let Some(bits) = mode.mode() {
        fs::set_permissions(path, fs::Permissions::from_mode(bits))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn set_unix_mode(_path: &Path, _mode: PersistMode) -> io::Result<()> {
    Ok(())
}
