//! Fixes for the per-course pages under `courses/<slug>/index.html`.
//!
//! Two passes, run separately:
//! - links: related course links move from `slug.html` to `../slug/`, and the
//!   mis-encoded glyph in the "Intermediate" heading becomes a Font Awesome icon
//! - icons: related course cards get the icon and gradient that match the
//!   course they point at

use crate::site_files::{rewrite_file, BatchSummary};
use anyhow::{Context, Result};
use regex::{Captures, NoExpand, Regex};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Course slugs whose pages moved from `slug.html` to `slug/index.html`.
pub const COURSE_SLUGS: &[&str] = &[
    "graphic-design",
    "full-stack",
    "resume-interview",
    "ui-ux",
    "python",
    "java",
    "react",
    "data-analytics",
    "devops",
    "aws",
    "azure",
    "salesforce",
    "soft-skills",
    "spoken-english",
];

const INTERMEDIATE_HEADING: &str = r#"<h3><i class="fas fa-cogs"></i> Intermediate"#;

lazy_static::lazy_static! {
    static ref BROKEN_INTERMEDIATE: Regex =
        Regex::new(r"<h3>\s*[^\x00-\x7F]+\s*Intermediate").unwrap();
}

/// Every `index.html` directly inside a subdirectory of `courses_dir`, sorted.
pub fn course_index_pages(courses_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(courses_dir)
        .with_context(|| format!("Failed to read courses directory: {}", courses_dir.display()))?;
    let mut pages = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("Failed to list {}", courses_dir.display()))?;
        let page = entry.path().join("index.html");
        if entry.path().is_dir() && page.is_file() {
            pages.push(page);
        }
    }
    pages.sort();
    Ok(pages)
}

// ─── Links pass ──────────────────────────────────────────────────────────────

/// Point `href="slug.html"` links at the directory-style `../slug/` URL.
pub fn fix_related_links(content: &str) -> (String, usize) {
    let mut result = content.to_string();
    let mut count = 0;
    for slug in COURSE_SLUGS {
        let old = format!("href=\"{}.html\"", slug);
        let hits = result.matches(&old).count();
        if hits > 0 {
            result = result.replace(&old, &format!("href=\"../{}/\"", slug));
            count += hits;
        }
    }
    (result, count)
}

/// Replace the garbled glyph before "Intermediate" in `<h3>` headings.
pub fn fix_intermediate_icon(content: &str) -> (String, usize) {
    let count = BROKEN_INTERMEDIATE.find_iter(content).count();
    let result = BROKEN_INTERMEDIATE.replace_all(content, NoExpand(INTERMEDIATE_HEADING));
    (result.into_owned(), count)
}

/// Run the links pass over every course page.
pub fn fix_course_links(courses_dir: &Path, dry_run: bool) -> Result<BatchSummary> {
    let mut summary = BatchSummary::default();
    for page in course_index_pages(courses_dir)? {
        let outcome = rewrite_file(&page, dry_run, |content| {
            let (content, links) = fix_related_links(content);
            let (content, icons) = fix_intermediate_icon(&content);
            log::debug!("{}: {} links, {} headings", page.display(), links, icons);
            Some(content)
        });
        summary.record(&page, outcome);
    }
    Ok(summary)
}

// ─── Icons pass ──────────────────────────────────────────────────────────────

/// Icon and card gradient for one course title.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CourseIcon {
    /// Title as shown in the card's `<h4>`.
    pub name: String,
    /// Font Awesome classes, e.g. `fab fa-python`.
    pub icon: String,
    /// CSS background for the icon tile.
    pub gradient: String,
}

impl CourseIcon {
    fn new(name: &str, icon: &str, gradient: &str) -> Self {
        Self {
            name: name.to_string(),
            icon: icon.to_string(),
            gradient: gradient.to_string(),
        }
    }
}

const PURPLE: &str = "linear-gradient(135deg, #6c5ce7, #a29bfe)";
const TEAL: &str = "linear-gradient(135deg, #00b894, #00cec9)";
const BLUE: &str = "linear-gradient(135deg, #0984e3, #74b9ff)";
const AMBER: &str = "linear-gradient(135deg, #fdcb6e, #e17055)";

/// Icons matching the course catalogue in `assets/js/main.js`.
pub fn default_course_icons() -> Vec<CourseIcon> {
    vec![
        CourseIcon::new("Graphic Design", "fas fa-palette", PURPLE),
        CourseIcon::new("UI/UX Design", "fas fa-window-maximize", PURPLE),
        CourseIcon::new("Full Stack Development", "fas fa-layer-group", TEAL),
        CourseIcon::new("Full Stack", "fas fa-layer-group", TEAL),
        CourseIcon::new("DevOps Engineering", "fas fa-server", BLUE),
        CourseIcon::new("DevOps", "fas fa-server", BLUE),
        CourseIcon::new("AWS Cloud", "fab fa-aws", "linear-gradient(135deg, #ff7675, #fd79a8)"),
        CourseIcon::new("Python Programming", "fab fa-python", AMBER),
        CourseIcon::new("Resume & Interview", "fas fa-file-invoice", "linear-gradient(135deg, #00cec9, #81ecec)"),
        CourseIcon::new("Spoken English", "fas fa-microphone", "linear-gradient(135deg, #a29bfe, #dfe6e9)"),
        CourseIcon::new("Soft Skills", "fas fa-users", "linear-gradient(135deg, #55efc4, #00b894)"),
        CourseIcon::new("Data Analytics", "fas fa-chart-bar", BLUE),
        CourseIcon::new("Java Programming", "fab fa-java", "linear-gradient(135deg, #e17055, #fdcb6e)"),
        CourseIcon::new("React Development", "fab fa-react", TEAL),
        CourseIcon::new("Azure Cloud", "fab fa-microsoft", BLUE),
        CourseIcon::new("Salesforce", "fab fa-salesforce", TEAL),
        CourseIcon::new("DSA", "fas fa-code", PURPLE),
        CourseIcon::new("Git & GitHub", "fab fa-github", "linear-gradient(135deg, #2d3436, #636e72)"),
        CourseIcon::new("Handwriting", "fas fa-pen-fancy", AMBER),
        CourseIcon::new("DevSecOps", "fas fa-shield-alt", "linear-gradient(135deg, #e17055, #fd79a8)"),
        CourseIcon::new("Automation Python", "fab fa-python", AMBER),
        CourseIcon::new("Python", "fab fa-python", AMBER),
    ]
}

/// Load an icon table from a CSV with `name,icon,gradient` columns.
pub fn load_course_icons(path: &Path) -> Result<Vec<CourseIcon>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open icon table: {}", path.display()))?;
    let mut icons = Vec::new();
    for (i, row) in reader.deserialize().enumerate() {
        let icon: CourseIcon =
            row.with_context(|| format!("Bad row {} in {}", i + 1, path.display()))?;
        icons.push(icon);
    }
    Ok(icons)
}

/// Card titles are HTML text, so a bare `&` appears as `&amp;`.
fn html_title(name: &str) -> String {
    if name.contains("&amp;") {
        name.to_string()
    } else {
        name.replace('&', "&amp;")
    }
}

/// Compiled card patterns for an icon table.
pub struct RelatedIconRules {
    rules: Vec<(Regex, String)>,
}

impl RelatedIconRules {
    pub fn new(icons: &[CourseIcon]) -> Result<Self> {
        let mut rules = Vec::with_capacity(icons.len());
        for icon in icons {
            let title = html_title(&icon.name);
            let pattern = format!(
                r#"<div[^>]*class="related-course-icon"[^>]*>\s*<i class="[^"]*"></i>\s*</div>\s*<h4>{}</h4>"#,
                regex::escape(&title)
            );
            let re = Regex::new(&pattern)
                .with_context(|| format!("Bad card pattern for {:?}", icon.name))?;
            let card = format!(
                "<div class=\"related-course-icon\" style=\"background: {}\">\n            <i class=\"{}\"></i> </div>\n          <h4>{}</h4>",
                icon.gradient, icon.icon, title
            );
            rules.push((re, card));
        }
        Ok(Self { rules })
    }

    /// Normalise every matching card, returning the number of cards that
    /// actually changed.
    pub fn apply(&self, content: &str) -> (String, usize) {
        let mut result = content.to_string();
        let mut count = 0;
        for (re, card) in &self.rules {
            let replaced = re.replace_all(&result, |caps: &Captures| {
                if &caps[0] != card.as_str() {
                    count += 1;
                }
                card.clone()
            });
            result = replaced.into_owned();
        }
        (result, count)
    }
}

/// Run the icons pass over every course page.
pub fn fix_course_icons(
    courses_dir: &Path,
    icons: &[CourseIcon],
    dry_run: bool,
) -> Result<BatchSummary> {
    let rules = RelatedIconRules::new(icons)?;
    let mut summary = BatchSummary::default();
    for page in course_index_pages(courses_dir)? {
        let outcome = rewrite_file(&page, dry_run, |content| {
            let (content, cards) = rules.apply(content);
            log::debug!("{}: {} cards", page.display(), cards);
            Some(content)
        });
        summary.record(&page, outcome);
    }
    Ok(summary)
}
