//! File system errors

use std::io::ErrorKind;
use std::path::Path;

use super::RiggerError;

/// Creates a missing-file error for `path`
pub fn missing(path: &Path) -> RiggerError {
    RiggerError::FileMissing {
        path: path.display().to_string(),
    }
}

/// Maps a read failure, turning `NotFound` into [`RiggerError::FileMissing`]
pub fn read_failed(path: &Path, err: &std::io::Error) -> RiggerError {
    if err.kind() == ErrorKind::NotFound {
        return missing(path);
    }
    RiggerError::FileReadFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Maps any write-side failure (create, copy, rename, persist)
pub fn write_denied(path: &Path, err: impl std::fmt::Display) -> RiggerError {
    RiggerError::WriteDenied {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}
