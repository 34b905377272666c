//! Widen a single `querySelectorAll` selector in a JavaScript asset.
//!
//! Only lines containing the exact guard statement are touched; every other
//! line (and every line ending) is written back byte-for-byte.

use crate::site_files::{rewrite_file, FileOutcome};
use anyhow::Result;
use std::path::Path;

/// Which assignment to look for and which classes to add to its selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorWidening {
    /// Variable the node list is assigned to (`cards`).
    pub variable: String,
    /// Selector currently passed to `querySelectorAll` (`.unified-card`).
    pub selector: String,
    /// Selectors appended after the original one.
    pub extra: Vec<String>,
}

impl Default for SelectorWidening {
    fn default() -> Self {
        Self {
            variable: "cards".to_string(),
            selector: ".unified-card".to_string(),
            extra: vec![
                ".unified-method-card".to_string(),
                ".unified-form-side".to_string(),
            ],
        }
    }
}

impl SelectorWidening {
    /// The full statement a line must contain to be rewritten.
    pub fn guard(&self) -> String {
        format!(
            "const {} = document.querySelectorAll('{}');",
            self.variable, self.selector
        )
    }

    fn needle(&self) -> String {
        format!("('{}')", self.selector)
    }

    fn widened(&self) -> String {
        let mut selectors = vec![self.selector.as_str()];
        selectors.extend(self.extra.iter().map(String::as_str));
        format!("('{}')", selectors.join(", "))
    }

    /// Rewrite every guarded line in `content`, returning the new text and
    /// the number of lines changed.
    pub fn widen_lines(&self, content: &str) -> (String, usize) {
        let guard = self.guard();
        let needle = self.needle();
        let widened = self.widened();

        let mut count = 0;
        let mut result = String::with_capacity(content.len() + widened.len());
        for line in content.split_inclusive('\n') {
            if line.contains(&guard) {
                result.push_str(&line.replace(&needle, &widened));
                count += 1;
            } else {
                result.push_str(line);
            }
        }
        (result, count)
    }
}

/// Apply `widening` to the script at `path`, writing it back unless `dry_run`.
pub fn widen_file(path: &Path, widening: &SelectorWidening, dry_run: bool) -> Result<FileOutcome> {
    let mut lines_changed = 0;
    let outcome = rewrite_file(path, dry_run, |content| {
        let (updated, count) = widening.widen_lines(content);
        lines_changed = count;
        Some(updated)
    })?;
    if lines_changed == 0 {
        log::warn!(
            "No line in {} contains `{}`",
            path.display(),
            widening.guard()
        );
    }
    Ok(outcome)
}
