//! Shared file plumbing for the site maintenance tools.
//!
//! Provides the HTML tree walk, whole-file UTF-8 read/write helpers,
//! the read-transform-write step used by every tool, and the per-run
//! summary that collects per-file outcomes and failures.

use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory names never descended into during a walk.
const SKIPPED_DIRS: &[&str] = &[".git"];

// ─── Tree walk ───────────────────────────────────────────────────────────────

/// A walk entry that could not be read, with the path it was found at.
pub type WalkFailure = (PathBuf, anyhow::Error);

/// Collect every `.html` file under `root`, in walk order (siblings sorted by name).
///
/// Version-control metadata directories are pruned. Symlinked pages are
/// included; symlinked directories are not descended into. Entries that
/// cannot be read are returned as errors in place so the caller can report
/// them and keep going.
pub fn html_files(root: &Path) -> Vec<std::result::Result<PathBuf, WalkFailure>> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            !(entry.file_type().is_dir()
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| SKIPPED_DIRS.contains(&name)))
        })
        .filter_map(|entry| match entry {
            Ok(entry) => {
                let is_html = entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| name.ends_with(".html"))
                    && entry.path().is_file();
                is_html.then(|| Ok(entry.into_path()))
            }
            Err(e) => {
                let at = e.path().unwrap_or(root).to_path_buf();
                let err = anyhow::Error::new(e).context(format!("Failed to walk {}", at.display()));
                Some(Err((at, err)))
            }
        })
        .collect()
}

// ─── Whole-file I/O ──────────────────────────────────────────────────────────

/// Read a whole file as UTF-8 text.
pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Overwrite a whole file with `content`. No backup is kept.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

// ─── Read / transform / write ────────────────────────────────────────────────

/// What happened to a single file during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Content differed after the transform (and was written unless dry-run).
    Changed,
    /// Transform ran but produced identical content; nothing was written.
    Unchanged,
    /// Transform declined the file.
    Skipped,
}

/// Read `path`, run `transform` over its content and write the result back.
///
/// `transform` returns `None` to skip the file. The file is only written when
/// the content actually changed and `dry_run` is false.
pub fn rewrite_file(
    path: &Path,
    dry_run: bool,
    transform: impl FnOnce(&str) -> Option<String>,
) -> Result<FileOutcome> {
    let original = read_text(path)?;
    let Some(updated) = transform(&original) else {
        return Ok(FileOutcome::Skipped);
    };
    if updated == original {
        return Ok(FileOutcome::Unchanged);
    }
    if !dry_run {
        write_text(path, &updated)?;
    }
    Ok(FileOutcome::Changed)
}

// ─── Run summary ─────────────────────────────────────────────────────────────

/// Counts of per-file outcomes for one run, plus every failure with its reason.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub changed: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchSummary {
    /// Record the outcome for `path`, logging it.
    pub fn record(&mut self, path: &Path, outcome: Result<FileOutcome>) {
        match outcome {
            Ok(FileOutcome::Changed) => {
                log::info!("Updated {}", path.display());
                self.changed += 1;
            }
            Ok(FileOutcome::Unchanged) => {
                log::debug!("No changes: {}", path.display());
                self.unchanged += 1;
            }
            Ok(FileOutcome::Skipped) => {
                log::debug!("Skipped {}", path.display());
                self.skipped += 1;
            }
            Err(e) => {
                let reason = format!("{:#}", e);
                log::warn!("{}: {}", path.display(), reason);
                self.failed.push((path.to_path_buf(), reason));
            }
        }
    }

    /// Number of files looked at, including failures.
    pub fn total(&self) -> usize {
        self.changed + self.unchanged + self.skipped + self.failed.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} changed, {} unchanged, {} skipped, {} failed",
            self.changed,
            self.unchanged,
            self.skipped,
            self.failed.len()
        )
    }
}
