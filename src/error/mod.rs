//! Error types and handling for rigger
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Constructors that attach a path and an underlying I/O failure live in
//! [`fs`], so call sites stay a single `map_err`.

pub mod fs;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for rigger operations
#[derive(Error, Diagnostic, Debug)]
pub enum RiggerError {
    // Locator errors
    #[error("Path not found: {path}")]
    #[diagnostic(
        code(rigger::locate::not_found),
        help("Pass the installation directory, its executable, or the .app bundle")
    )]
    NotFound { path: String },

    #[error("Not an installation: {path} ({reason})")]
    #[diagnostic(
        code(rigger::locate::not_an_installation),
        help("Point at the directory that contains the application's executable")
    )]
    NotAnInstallation { path: String, reason: String },

    // Metadata errors
    #[error("No `version = X.Y.Z` entry in {path}")]
    #[diagnostic(code(rigger::metadata::malformed_version))]
    MalformedVersion { path: String },

    #[error("No `id = <token>` entry in {path}")]
    #[diagnostic(code(rigger::metadata::malformed_product_id))]
    MalformedProductId { path: String },

    #[error("Invalid artifact pattern '{pattern}': {reason}")]
    #[diagnostic(
        code(rigger::artifact::invalid_pattern),
        help("Artifact patterns are regular expressions with exactly one capture group")
    )]
    InvalidPattern { pattern: String, reason: String },

    // File system errors
    #[error("File not found: {path}")]
    #[diagnostic(code(rigger::fs::file_missing))]
    FileMissing { path: String },

    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(rigger::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(
        code(rigger::fs::write_denied),
        help("Installations under system directories usually need elevated permissions")
    )]
    WriteDenied { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(rigger::fs::io_error))]
    IoError { message: String },

    // Build tool errors
    #[error("Build tool not available (tried: {tried})")]
    #[diagnostic(
        code(rigger::build::tool_unavailable),
        help("{hint}")
    )]
    ToolUnavailable { tried: String, hint: String },

    #[error("Build failed in {project}")]
    #[diagnostic(code(rigger::build::failed), help("{log}"))]
    BuildFailed { project: String, log: String },

    #[error("Build produced no file matching '{pattern}' in {dir}")]
    #[diagnostic(code(rigger::build::output_missing))]
    BuildOutputMissing { pattern: String, dir: String },

    #[error("`{command}` timed out after {seconds}s")]
    #[diagnostic(code(rigger::process::timeout))]
    Timeout { command: String, seconds: u64 },

    // Configuration errors
    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(rigger::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(rigger::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("No installation path provided")]
    #[diagnostic(
        code(rigger::cli::no_path),
        help("Pass the installation path as an argument, e.g. `rigger deploy /usr/share/dbeaver`")
    )]
    NoPathProvided,

    #[error("Unknown shell: {shell}")]
    #[diagnostic(
        code(rigger::cli::unknown_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnknownShell { shell: String },

    #[error("Prompt failed: {message}")]
    #[diagnostic(code(rigger::cli::prompt_failed))]
    PromptFailed { message: String },
}

impl From<std::io::Error> for RiggerError {
    fn from(err: std::io::Error) -> Self {
        RiggerError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for RiggerError {
    fn from(err: inquire::InquireError) -> Self {
        RiggerError::PromptFailed {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for RiggerError {
    fn from(err: serde_json::Error) -> Self {
        RiggerError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, RiggerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RiggerError::NotFound {
            path: "/opt/missing".to_string(),
        };
        assert_eq!(err.to_string(), "Path not found: /opt/missing");

        let err = RiggerError::Timeout {
            command: "mvn -version".to_string(),
            seconds: 5,
        };
        assert_eq!(err.to_string(), "`mvn -version` timed out after 5s");
    }

    #[test]
    fn test_error_codes() {
        let err = RiggerError::MalformedVersion {
            path: ".eclipseproduct".to_string(),
        };
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("rigger::metadata::malformed_version"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let err: RiggerError = io.into();
        assert!(matches!(err, RiggerError::IoError { message } if message == "disk on fire"));
    }

    #[test]
    fn test_build_failed_carries_log_in_help() {
        let err = RiggerError::BuildFailed {
            project: "/work".to_string(),
            log: "[ERROR] cannot find symbol".to_string(),
        };
        let help = err.help().map(|h| h.to_string());
        assert_eq!(help.as_deref(), Some("[ERROR] cannot find symbol"));
    }
}
