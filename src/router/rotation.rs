//! Size-based rotation of a category file
//!
//! `max_files` counts the active file, so a category keeps at most
//! `max_files - 1` numbered backups: `svc.log.1` (newest) through
//! `svc.log.<max_files - 1>` (oldest). Anything older is deleted.

use crate::core::error::{LoggerError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Get backup file path for given index (`svc.log` → `svc.log.3`)
pub fn backup_path(base: &Path, index: usize) -> PathBuf {
    let mut path = base.to_path_buf();
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("default.log")
        .to_string();
    path.set_file_name(format!("{}.{}", filename, index));
    path
}

/// Shift backups up by one and move the base file to backup 1
///
/// The caller must have closed the base file. The first failing rename or
/// remove aborts the remaining steps and is returned as `RotationFailed`.
pub fn rotate_files(base: &Path, max_files: usize) -> Result<()> {
    if max_files <= 1 {
        // No backups retained: the active file is simply discarded
        return remove_if_exists(base);
    }

    let oldest = max_files - 1;
    remove_if_exists(&backup_path(base, oldest))?;

    for i in (1..oldest).rev() {
        rename_if_exists(&backup_path(base, i), &backup_path(base, i + 1))?;
    }

    rename_if_exists(base, &backup_path(base, 1))
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(LoggerError::rotation(
            path,
            format!("Failed to remove oldest backup: {}", e),
        )),
    }
}

fn rename_if_exists(from: &Path, to: &Path) -> Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(LoggerError::rotation(
            from,
            format!("Failed to rename to '{}': {}", to.display(), e),
        )),
    }
}
