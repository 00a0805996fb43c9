//! `dbeaver.ini` launcher argument edits
//!
//! The file holds one launcher argument per line. Everything after the
//! `-vmargs` line is passed to the JVM, which is where the agent reference
//! and extra system properties go.

use std::path::Path;

use serde::Serialize;

use crate::common::fs::{read_text, write_atomic};
use crate::error::Result;

/// Line that starts the JVM argument section
pub const VMARGS_SENTINEL: &str = "-vmargs";
/// Launcher flag whose next line names an explicit runtime
pub const VM_FLAG: &str = "-vm";
/// Prefix of agent arguments
pub const AGENT_PREFIX: &str = "-javaagent:";

/// Desired state of the startup file
#[derive(Debug, Clone)]
pub struct StartupPatch {
    /// Agent jar path relative to the launcher, as `-javaagent:` takes it
    pub agent_reference: String,
    /// Whole-line JVM flags to be present after `-vmargs`
    pub extra_flags: Vec<String>,
    /// Drop `-vm <path>` so the system runtime is used
    pub drop_vm_override: bool,
}

impl StartupPatch {
    pub fn agent_line(&self) -> String {
        format!("{AGENT_PREFIX}{}", self.agent_reference)
    }
}

/// Outcome of patching the startup file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StartupReport {
    /// Lines dropped, without terminators
    pub removed: Vec<String>,
    /// Lines added, without terminators
    pub inserted: Vec<String>,
    /// `-vmargs` was missing and had to be appended
    pub sentinel_appended: bool,
    /// Whether the file was rewritten
    pub written: bool,
}

impl StartupReport {
    pub fn is_noop(&self) -> bool {
        self.removed.is_empty() && self.inserted.is_empty() && !self.sentinel_appended
    }
}

/// Bring the startup file at `path` to the state described by `patch`.
///
/// The file is left untouched, modification time included, when it already
/// matches.
pub fn patch_startup_config(path: &Path, patch: &StartupPatch) -> Result<StartupReport> {
    let original = read_text(path)?;
    let (patched, mut report) = apply(&original, patch);

    if !report.is_noop() {
        write_atomic(path, &patched)?;
        report.written = true;
    }

    for line in &report.removed {
        tracing::info!(%line, "removed startup argument");
    }
    for line in &report.inserted {
        tracing::info!(%line, "added startup argument");
    }
    Ok(report)
}

/// Apply every pass to `content` without touching the file system
pub fn apply(content: &str, patch: &StartupPatch) -> (String, StartupReport) {
    let eol = line_ending(content);
    let mut lines = split_lines(content);
    let mut report = StartupReport::default();

    if patch.drop_vm_override {
        report.removed = drop_vm_override(&mut lines);
    }

    let wanted = missing_lines(&lines, patch);
    if !wanted.is_empty() {
        let sentinel = match find_sentinel(&lines) {
            Some(index) => index,
            None => {
                tracing::warn!("no {VMARGS_SENTINEL} line in startup file, appending one");
                report.sentinel_appended = true;
                append_line(&mut lines, VMARGS_SENTINEL, eol)
            }
        };
        insert_after(&mut lines, sentinel, &wanted, eol);
        report.inserted = wanted;
    }

    (lines.concat(), report)
}

/// Remove every `-vm` line together with the value line after it
pub fn drop_vm_override(lines: &mut Vec<String>) -> Vec<String> {
    let mut removed = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        if lines[i].trim() != VM_FLAG {
            i += 1;
            continue;
        }
        removed.push(lines.remove(i).trim().to_string());
        if i < lines.len() {
            removed.push(lines.remove(i).trim().to_string());
        }
    }
    removed
}

/// Lines from `patch` not yet present, in insertion order
pub fn missing_lines(lines: &[String], patch: &StartupPatch) -> Vec<String> {
    let mut wanted = Vec::new();

    let has_agent = lines.iter().any(|l| l.contains(&patch.agent_reference));
    if !has_agent {
        wanted.push(patch.agent_line());
    }

    for flag in &patch.extra_flags {
        let flag = flag.trim();
        let present = lines.iter().any(|l| l.trim() == flag);
        if !present && !wanted.iter().any(|w| w == flag) {
            wanted.push(flag.to_string());
        }
    }
    wanted
}

/// Index of the first `-vmargs` line
pub fn find_sentinel(lines: &[String]) -> Option<usize> {
    lines.iter().position(|l| l.trim() == VMARGS_SENTINEL)
}

/// Insert `new` right after `index`, terminating that line first if needed
fn insert_after(lines: &mut Vec<String>, index: usize, new: &[String], eol: &str) {
    if !new.is_empty() && !lines[index].ends_with('\n') {
        lines[index].push_str(eol);
    }
    for (offset, line) in new.iter().enumerate() {
        lines.insert(index + 1 + offset, format!("{line}{eol}"));
    }
}

/// Append a line, terminating an unterminated last line first; returns its index
fn append_line(lines: &mut Vec<String>, line: &str, eol: &str) -> usize {
    if let Some(last) = lines.last_mut() {
        if !last.ends_with('\n') {
            last.push_str(eol);
        }
    }
    lines.push(format!("{line}{eol}"));
    lines.len() - 1
}

/// Split into lines, each keeping its own terminator
fn split_lines(content: &str) -> Vec<String> {
    content.split_inclusive('\n').map(str::to_string).collect()
}

/// Terminator of the first terminated line, defaulting to `\n`
fn line_ending(content: &str) -> &'static str {
    match content.find('\n') {
        Some(i) if i > 0 && content.as_bytes()[i - 1] == b'\r' => "\r\n",
        _ => "\n",
    }
}
