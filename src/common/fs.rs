//! Common file system operations with unified error handling

use std::fs::{self, File, FileTimes};
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Result, fs as fs_error};

/// Read a whole text file, mapping a missing file to `FileMissing`
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| fs_error::read_failed(path, &e))
}

/// Replace `path` with `content` in one step.
///
/// The content is written to a sibling temp file which is then renamed over
/// the target, so readers never observe a half-written file.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| fs_error::write_denied(path, e))?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| fs_error::write_denied(path, e))?;

    if let Ok(meta) = fs::metadata(path) {
        // Keep the original mode; NamedTempFile creates 0600 files.
        if let Err(e) = fs::set_permissions(tmp.path(), meta.permissions()) {
            tracing::debug!(path = %path.display(), error = %e, "could not preserve permissions");
        }
    }

    tmp.persist(path)
        .map_err(|e| fs_error::write_denied(path, e.error))?;
    Ok(())
}

/// Copy `source` to `target`, replacing any existing file and keeping the
/// source's access and modification times.
pub fn replace_file(source: &Path, target: &Path) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| fs_error::write_denied(parent, e))?;
    }

    if target.exists() {
        tracing::debug!(path = %target.display(), "removing existing file");
        fs::remove_file(target).map_err(|e| fs_error::write_denied(target, e))?;
    }

    fs::copy(source, target).map_err(|e| fs_error::write_denied(target, e))?;
    copy_times(source, target);
    Ok(())
}

/// Best effort: some file systems refuse to set times, the copy stands anyway.
fn copy_times(source: &Path, target: &Path) {
    let Ok(meta) = fs::metadata(source) else {
        return;
    };
    let mut times = FileTimes::new();
    if let Ok(modified) = meta.modified() {
        times = times.set_modified(modified);
    }
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }
    let result = File::options()
        .write(true)
        .open(target)
        .and_then(|f| f.set_times(times));
    if let Err(e) = result {
        tracing::debug!(path = %target.display(), error = %e, "could not preserve file times");
    }
}
