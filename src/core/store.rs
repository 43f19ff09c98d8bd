//! JSON Store
//!
//! Reads and writes whole JSON documents on disk. Every overwrite first
//! copies the previous file to a single `.<ext>.backup` sibling, so only the
//! immediately prior version is ever recoverable.
//!
//! Backup-then-write is two filesystem calls with no locking. Two clients
//! saving the same file at once race: the last writer wins and the backup
//! may hold either predecessor. That is accepted for a single-user tool.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use super::error::{EditorError, Result};

/// Backup location for `path`: its extension replaced by `<ext>.backup`.
///
/// `quests.json` with `ext = "json"` becomes `quests.json.backup`.
pub fn backup_path(path: &Path, ext: &str) -> PathBuf {
    path.with_extension(format!("{ext}.backup"))
}

/// Copy an existing file to its backup location, replacing any older backup.
///
/// Returns the backup path if a copy was made, `None` if there was nothing
/// to back up.
pub fn snapshot(path: &Path, ext: &str) -> Result<Option<PathBuf>> {
    if !path.is_file() {
        return Ok(None);
    }
    let backup = backup_path(path, ext);
    fs::copy(path, &backup)?;
    log::debug!("Backed up {} to {}", path.display(), backup.display());
    Ok(Some(backup))
}

/// Read a JSON document.
///
/// `Ok(None)` means the file does not exist, which callers may answer with a
/// default. Content that fails to parse is [`EditorError::MalformedJson`].
pub fn read_json(path: &Path) -> Result<Option<Value>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|source| EditorError::MalformedJson {
            path: path.to_path_buf(),
            source,
        })
}

/// Pretty-print with two-space indentation. Non-ASCII text stays literal.
pub fn to_pretty_json<T: Serialize + ?Sized>(data: &T) -> Result<String> {
    serde_json::to_string_pretty(data).map_err(EditorError::Serialize)
}

/// Overwrite `path` with `data`, backing up the previous content first.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    // Serialize before touching the disk so a failure leaves both files alone.
    let text = to_pretty_json(data)?;
    snapshot(path, "json")?;
    fs::write(path, text)?;
    Ok(())
}
