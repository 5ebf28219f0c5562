//! Filesystem operations used by the config scanner and generator

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// List the entry names of a directory.
///
/// Names come back in whatever order the operating system yields them;
/// callers that need a stable order sort the result themselves.
pub fn list_entries(dir: &NormalizedPath) -> Result<Vec<String>> {
    let native = dir.to_native();
    if !native.is_dir() {
        return Err(Error::NotADirectory { path: native });
    }

    let entries = fs::read_dir(&native).map_err(|e| Error::io(&native, e))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(&native, e))?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

/// Create a directory and any missing parents.
///
/// Succeeds if the directory already exists.
pub fn create_dir(path: &NormalizedPath) -> Result<()> {
    let native = path.to_native();
    fs::create_dir_all(&native).map_err(|e| Error::io(&native, e))?;
    tracing::debug!(path = %path, "created directory");
    Ok(())
}

/// Write content atomically to a file with locking.
///
/// The content goes to a hidden sibling `.<name>.<pid>.tmp` which is then
/// renamed over the target, so readers never observe a half-written
/// config. Any existing file at `path` is replaced. On failure the
/// sibling is removed again and the target is left untouched.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let target = path.to_native();

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let file_name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let staging = target.with_file_name(format!(".{file_name}.{}.tmp", std::process::id()));

    let result = stage(&staging, &target, content)
        .and_then(|()| fs::rename(&staging, &target).map_err(|e| Error::io(&target, e)));

    if result.is_err() && staging.exists() {
        if let Err(e) = fs::remove_file(&staging) {
            tracing::warn!(path = %staging.display(), error = %e, "failed to remove staging file");
        }
    }
    result
}

/// Write `content` to `staging` under an exclusive lock and flush it.
fn stage(staging: &Path, target: &Path, content: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(staging)
        .map_err(|e| Error::io(staging, e))?;

    file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: target.to_path_buf(),
    })?;
    file.write_all(content).map_err(|e| Error::io(staging, e))?;
    file.sync_all().map_err(|e| Error::io(staging, e))?;
    file.unlock().map_err(|_| Error::LockFailed {
        path: target.to_path_buf(),
    })
}

/// Read the raw bytes of a file.
///
/// Markup declares its own encoding, so documents are read as bytes and
/// decoded by the parser.
pub fn read_bytes(path: &NormalizedPath) -> Result<Vec<u8>> {
    let native_path = path.to_native();
    fs::read(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}
