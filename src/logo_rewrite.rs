//! Migrate hardcoded logo markup to the shared `logo-signature` component.
//!
//! Every HTML page under the site root carries up to three hand-written copies
//! of the brand logo (navbar, mobile menu header, footer). Each is replaced by
//! a `<div class="logo-signature-component">` placeholder that the component
//! script hydrates client-side, and the component's stylesheet and script are
//! linked right after the site's master stylesheet.
//!
//! Rules run in a fixed order over the raw page text:
//!
//! 1. [`inject_component_assets`]
//! 2. [`replace_navbar_logo`]
//! 3. [`replace_mobile_logo`]
//! 4. [`replace_footer_logo`]
//!
//! Converted pages no longer match any legacy pattern, so a second run is a
//! no-op.

use crate::site_files::{html_files, rewrite_file, BatchSummary, FileOutcome};
use anyhow::Result;
use regex::{Captures, Regex};
use std::ops::AddAssign;
use std::path::{Component, Path};

/// Present in a page once the component assets have been linked.
pub const ASSET_MARKER: &str = "logo-signature.css";

const COMPONENT_DIR: &str = "assets/components/logo-signature";

// Fragments shared by the legacy logo patterns.
const LOGO_ICON: &str =
    r#"<div class="logo-placeholder">\s*<i class="fas fa-graduation-cap"></i>\s*</div>"#;
const LOGO_TEXT: &str = r#"<span class="logo-text"><span class="logo-signature">Abhi's</span>\s*<span\s+class="highlight">Craft\s+Soft</span></span>"#;

const FOOTER_BRAND_OPEN: &str = r#"<div class="footer-brand">"#;

lazy_static::lazy_static! {
    static ref MASTER_STYLESHEET: Regex =
        Regex::new(r#"<link rel="stylesheet" href="[^"]*master\.css[^"]*">"#).unwrap();

    // Siblings inside the anchor are separated by whitespace only, so a match
    // never runs past the anchor's own `</a>`.
    static ref NAVBAR_LOGO: Regex = Regex::new(&format!(
        r#"<a(?: href="([^"]*)")? class="logo">\s*{}\s*{}\s*</a>"#,
        LOGO_ICON, LOGO_TEXT
    ))
    .unwrap();

    static ref MOBILE_LOGO: Regex = Regex::new(&format!(
        r#"<div class="logo">\s*{}\s*{}\s*</div>"#,
        LOGO_ICON, LOGO_TEXT
    ))
    .unwrap();

    // Covers both footer shapes: text only, or icon followed by text.
    static ref FOOTER_LOGO: Regex = Regex::new(&format!(
        r#"{}\s*<a(?: href="([^"]*)")? class="logo">\s*(?:{}\s*)?{}\s*</a>"#,
        FOOTER_BRAND_OPEN, LOGO_ICON, LOGO_TEXT
    ))
    .unwrap();
}

// ─── Page location ───────────────────────────────────────────────────────────

/// Where a page sits relative to the site root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    /// Directory levels between the root and the page (file name excluded).
    pub depth: usize,
    /// Relative path from the page back to the root: `./`, `../`, `../../`, ...
    pub prefix: String,
}

impl PageContext {
    pub fn at_depth(depth: usize) -> Self {
        let prefix = if depth == 0 {
            "./".to_string()
        } else {
            "../".repeat(depth)
        };
        Self { depth, prefix }
    }

    /// Locate `file` relative to `root`.
    ///
    /// Files lexically under `root` are measured from it directly. Otherwise
    /// the first path segment equal to the root directory's name is used.
    /// Returns `None` when the page is not under the root at all.
    pub fn locate(root: &Path, file: &Path) -> Option<Self> {
        if let Ok(rest) = file.strip_prefix(root) {
            let segments = rest.components().count();
            return segments.checked_sub(1).map(Self::at_depth);
        }

        let root_name = root.file_name()?;
        let segments: Vec<Component> = file.components().collect();
        let root_idx = segments
            .iter()
            .position(|c| c.as_os_str() == root_name)?;
        segments
            .len()
            .checked_sub(root_idx + 2)
            .map(Self::at_depth)
    }
}

// ─── Rules ───────────────────────────────────────────────────────────────────

/// Per-rule replacement counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RuleHits {
    pub assets: usize,
    pub navbar: usize,
    pub mobile: usize,
    pub footer: usize,
}

impl RuleHits {
    pub fn total(&self) -> usize {
        self.assets + self.navbar + self.mobile + self.footer
    }
}

impl AddAssign for RuleHits {
    fn add_assign(&mut self, other: Self) {
        self.assets += other.assets;
        self.navbar += other.navbar;
        self.mobile += other.mobile;
        self.footer += other.footer;
    }
}

fn component_div(link: &str, footer: bool) -> String {
    if footer {
        format!(
            r#"<div class="logo-signature-component" data-link="{}" data-footer></div>"#,
            link
        )
    } else {
        format!(r#"<div class="logo-signature-component" data-link="{}"></div>"#, link)
    }
}

fn href_or_prefix<'a>(caps: &'a Captures, ctx: &'a PageContext) -> &'a str {
    caps.get(1).map_or(ctx.prefix.as_str(), |m| m.as_str())
}

/// Rule 1: link the component stylesheet and script after the master stylesheet.
///
/// No-op when [`ASSET_MARKER`] already occurs anywhere in the page or there is
/// no master stylesheet link. Only the first master link gets the snippet.
pub fn inject_component_assets(content: &str, ctx: &PageContext) -> (String, usize) {
    if content.contains(ASSET_MARKER) {
        return (content.to_string(), 0);
    }
    let Some(master) = MASTER_STYLESHEET.find(content) else {
        return (content.to_string(), 0);
    };

    let snippet = format!(
        "\n    <!-- Logo Component Assets -->\n    \
         <link rel=\"stylesheet\" href=\"{p}{dir}/logo-signature.css\">\n    \
         <script src=\"{p}{dir}/logo-signature.js\"></script>",
        p = ctx.prefix,
        dir = COMPONENT_DIR
    );
    let mut result = String::with_capacity(content.len() + snippet.len());
    result.push_str(&content[..master.end()]);
    result.push_str(&snippet);
    result.push_str(&content[master.end()..]);
    (result, 1)
}

/// Rule 2: replace the navbar logo anchor with a component placeholder.
///
/// The anchor's href becomes `data-link`, falling back to the page prefix.
/// Logo anchors sitting directly inside the footer brand wrapper are left for
/// [`replace_footer_logo`].
pub fn replace_navbar_logo(content: &str, ctx: &PageContext) -> (String, usize) {
    let mut count = 0;
    let result = NAVBAR_LOGO.replace_all(content, |caps: &Captures| {
        let start = caps.get(0).map_or(0, |m| m.start());
        if content[..start].trim_end().ends_with(FOOTER_BRAND_OPEN) {
            return caps[0].to_string();
        }
        count += 1;
        component_div(href_or_prefix(caps, ctx), false)
    });
    (result.into_owned(), count)
}

/// Rule 3: replace the mobile menu header logo. It has no anchor, so the
/// placeholder always links to the page prefix.
pub fn replace_mobile_logo(content: &str, ctx: &PageContext) -> (String, usize) {
    let mut count = 0;
    let result = MOBILE_LOGO.replace_all(content, |_: &Captures| {
        count += 1;
        component_div(&ctx.prefix, false)
    });
    (result.into_owned(), count)
}

/// Rule 4: replace the footer logo anchor, keeping the `footer-brand` wrapper.
pub fn replace_footer_logo(content: &str, ctx: &PageContext) -> (String, usize) {
    let mut count = 0;
    let result = FOOTER_LOGO.replace_all(content, |caps: &Captures| {
        count += 1;
        format!(
            "{}\n                    {}",
            FOOTER_BRAND_OPEN,
            component_div(href_or_prefix(caps, ctx), true)
        )
    });
    (result.into_owned(), count)
}

/// Run all four rules in order over one page.
pub fn rewrite_document(content: &str, ctx: &PageContext) -> (String, RuleHits) {
    let mut hits = RuleHits::default();
    let (content, n) = inject_component_assets(content, ctx);
    hits.assets = n;
    let (content, n) = replace_navbar_logo(&content, ctx);
    hits.navbar = n;
    let (content, n) = replace_mobile_logo(&content, ctx);
    hits.mobile = n;
    let (content, n) = replace_footer_logo(&content, ctx);
    hits.footer = n;
    (content, hits)
}

// ─── Tree walk ───────────────────────────────────────────────────────────────

/// Options for [`rewrite_site`].
#[derive(Debug, Default, Clone)]
pub struct RewriteOptions {
    /// Report what would change without writing anything.
    pub dry_run: bool,
}

/// Result of a whole-site run.
#[derive(Debug, Default)]
pub struct RewriteReport {
    pub summary: BatchSummary,
    pub hits: RuleHits,
}

/// Rewrite every HTML page under `root` in place.
///
/// Per-file failures are recorded in the report and the walk continues.
/// Pages that cannot be located under `root` are skipped without being read.
pub fn rewrite_site(root: &Path, options: &RewriteOptions) -> Result<RewriteReport> {
    if !root.is_dir() {
        anyhow::bail!("Site root is not a directory: {}", root.display());
    }

    let mut report = RewriteReport::default();
    for entry in html_files(root) {
        let path = match entry {
            Ok(path) => path,
            Err((at, e)) => {
                report.summary.record(&at, Err(e));
                continue;
            }
        };

        let Some(ctx) = PageContext::locate(root, &path) else {
            report.summary.record(&path, Ok(FileOutcome::Skipped));
            continue;
        };

        let mut page_hits = RuleHits::default();
        let outcome = rewrite_file(&path, options.dry_run, |content| {
            let (updated, hits) = rewrite_document(content, &ctx);
            page_hits = hits;
            Some(updated)
        });
        if outcome.is_ok() {
            log::debug!("{} (depth {}): {:?}", path.display(), ctx.depth, page_hits);
            report.hits += page_hits;
        }
        report.summary.record(&path, outcome);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAVBAR: &str = r#"<nav class="navbar">
            <a href="../../contact.html" class="logo">
                <div class="logo-placeholder">
                    <i class="fas fa-graduation-cap"></i>
                </div>
                <span class="logo-text"><span class="logo-signature">Abhi's</span> <span class="highlight">Craft Soft</span></span>
            </a>
            <ul class="nav-links"></ul>"#;

    const MOBILE: &str = r#"<div class="mobile-menu-header">
                <div class="logo">
                    <div class="logo-placeholder"><i class="fas fa-graduation-cap"></i></div>
                    <span class="logo-text"><span class="logo-signature">Abhi's</span> <span class="highlight">Craft Soft</span></span>
                </div>
            </div>"#;

    const FOOTER_TEXT_ONLY: &str = r#"<div class="footer-brand">
                    <a href="../index.html" class="logo"><span class="logo-text"><span class="logo-signature">Abhi's</span> <span
                                class="highlight">Craft Soft</span></span>
                    </a>
                    <p>Training institute</p>"#;

    const FOOTER_WITH_ICON: &str = r#"<div class="footer-brand">
                    <a href="./" class="logo">
                        <div class="logo-placeholder"><i class="fas fa-graduation-cap"></i></div>
                        <span class="logo-text"><span class="logo-signature">Abhi's</span> <span class="highlight">Craft Soft</span></span>
                    </a>"#;

    #[test]
    fn test_prefix_for_depth() {
        assert_eq!(PageContext::at_depth(0).prefix, "./");
        assert_eq!(PageContext::at_depth(1).prefix, "../");
        assert_eq!(PageContext::at_depth(3).prefix, "../../../");
    }

    #[test]
    fn test_locate_under_root() {
        let root = Path::new("/srv/Website");
        assert_eq!(
            PageContext::locate(root, Path::new("/srv/Website/index.html")),
            Some(PageContext::at_depth(0))
        );
        assert_eq!(
            PageContext::locate(root, Path::new("/srv/Website/courses/ui-ux/index.html")),
            Some(PageContext::at_depth(2))
        );
    }

    #[test]
    fn test_locate_by_root_name_segment() {
        let root = Path::new("Website");
        assert_eq!(
            PageContext::locate(root, Path::new("/mnt/e/Craft soft/Website/about/index.html")),
            Some(PageContext::at_depth(1))
        );
    }

    #[test]
    fn test_locate_outside_root() {
        let root = Path::new("/srv/Website");
        assert_eq!(
            PageContext::locate(root, Path::new("/srv/other/index.html")),
            None
        );
        assert_eq!(PageContext::locate(root, root), None);
    }

    #[test]
    fn test_inject_assets_after_master_stylesheet() {
        let page = "<head>\n    <link rel=\"stylesheet\" href=\"../assets/css/master.css?v=3\">\n</head>";
        let (out, n) = inject_component_assets(page, &PageContext::at_depth(1));
        assert_eq!(n, 1);
        assert_eq!(
            out,
            "<head>\n    <link rel=\"stylesheet\" href=\"../assets/css/master.css?v=3\">\n    \
             <!-- Logo Component Assets -->\n    \
             <link rel=\"stylesheet\" href=\"../assets/components/logo-signature/logo-signature.css\">\n    \
             <script src=\"../assets/components/logo-signature/logo-signature.js\"></script>\n</head>"
        );
    }

    #[test]
    fn test_inject_assets_only_first_master_link() {
        let page = "<link rel=\"stylesheet\" href=\"master.css\">\n<link rel=\"stylesheet\" href=\"master.css\">";
        let (out, n) = inject_component_assets(page, &PageContext::at_depth(0));
        assert_eq!(n, 1);
        assert_eq!(out.matches(ASSET_MARKER).count(), 1);
        assert!(out.ends_with("</script>\n<link rel=\"stylesheet\" href=\"master.css\">"));
    }

    #[test]
    fn test_inject_assets_skipped_when_marker_present() {
        let page = "<link rel=\"stylesheet\" href=\"master.css\">\n<link href=\"x/logo-signature.css\">";
        let (out, n) = inject_component_assets(page, &PageContext::at_depth(0));
        assert_eq!(n, 0);
        assert_eq!(out, page);
    }

    #[test]
    fn test_inject_assets_without_master_link() {
        let page = "<head><title>x</title></head>";
        assert_eq!(
            inject_component_assets(page, &PageContext::at_depth(0)),
            (page.to_string(), 0)
        );
    }

    #[test]
    fn test_navbar_keeps_href() {
        let (out, n) = replace_navbar_logo(NAVBAR, &PageContext::at_depth(2));
        assert_eq!(n, 1);
        assert_eq!(
            out,
            "<nav class=\"navbar\">\n            \
             <div class=\"logo-signature-component\" data-link=\"../../contact.html\"></div>\n            \
             <ul class=\"nav-links\"></ul>"
        );
    }

    #[test]
    fn test_navbar_without_href_uses_prefix() {
        let page = NAVBAR.replace(r#"<a href="../../contact.html" class="logo">"#, r#"<a class="logo">"#);
        let (out, n) = replace_navbar_logo(&page, &PageContext::at_depth(1));
        assert_eq!(n, 1);
        assert!(out.contains(r#"<div class="logo-signature-component" data-link="../"></div>"#));
    }

    #[test]
    fn test_navbar_href_inserted_literally() {
        let page = NAVBAR.replace("../../contact.html", "$1/contact.html");
        let (out, _) = replace_navbar_logo(&page, &PageContext::at_depth(0));
        assert!(out.contains(r#"data-link="$1/contact.html""#));
    }

    #[test]
    fn test_navbar_rule_leaves_footer_anchor() {
        let (out, n) = replace_navbar_logo(FOOTER_WITH_ICON, &PageContext::at_depth(0));
        assert_eq!(n, 0);
        assert_eq!(out, FOOTER_WITH_ICON);
    }

    #[test]
    fn test_navbar_stays_inside_its_anchor() {
        let page = format!(
            "<a href=\"index.html\" class=\"logo\"><span>Brand</span></a>\n\
             <ul class=\"nav-links\"><li><a href=\"about.html\">About</a></li></ul>\n{}\n\
             <a href=\"contact.html\">Contact</a>",
            MOBILE
        );
        let ctx = PageContext::at_depth(0);
        let (out, n) = replace_navbar_logo(&page, &ctx);
        assert_eq!(n, 0);
        assert_eq!(out, page);

        let (out, n) = replace_mobile_logo(&out, &ctx);
        assert_eq!(n, 1);
        assert!(out.starts_with(r#"<a href="index.html" class="logo"><span>Brand</span></a>"#));
        assert!(out.contains(r#"<a href="about.html">About</a>"#));
        assert!(out.ends_with(r#"<a href="contact.html">Contact</a>"#));
    }

    #[test]
    fn test_mobile_uses_prefix() {
        let (out, n) = replace_mobile_logo(MOBILE, &PageContext::at_depth(1));
        assert_eq!(n, 1);
        assert_eq!(
            out,
            "<div class=\"mobile-menu-header\">\n                \
             <div class=\"logo-signature-component\" data-link=\"../\"></div>\n            </div>"
        );
    }

    #[test]
    fn test_footer_text_only() {
        let (out, n) = replace_footer_logo(FOOTER_TEXT_ONLY, &PageContext::at_depth(1));
        assert_eq!(n, 1);
        assert_eq!(
            out,
            "<div class=\"footer-brand\">\n                    \
             <div class=\"logo-signature-component\" data-link=\"../index.html\" data-footer></div>\n                    \
             <p>Training institute</p>"
        );
    }

    #[test]
    fn test_footer_with_icon() {
        let (out, n) = replace_footer_logo(FOOTER_WITH_ICON, &PageContext::at_depth(0));
        assert_eq!(n, 1);
        assert_eq!(
            out,
            "<div class=\"footer-brand\">\n                    \
             <div class=\"logo-signature-component\" data-link=\"./\" data-footer></div>"
        );
    }

    #[test]
    fn test_footer_without_href_uses_prefix() {
        let page = FOOTER_TEXT_ONLY.replace(r#" href="../index.html""#, "");
        let (out, n) = replace_footer_logo(&page, &PageContext::at_depth(2));
        assert_eq!(n, 1);
        assert!(out.contains(r#"data-link="../../" data-footer"#));
    }

    #[test]
    fn test_partial_match_left_alone() {
        let page = MOBILE.replace("Craft Soft", "CraftSoft");
        assert_eq!(
            replace_mobile_logo(&page, &PageContext::at_depth(0)),
            (page.clone(), 0)
        );
    }

    #[test]
    fn test_rewrite_document_full_page_and_idempotence() {
        let page = format!(
            "<head>\n    <link rel=\"stylesheet\" href=\"../../assets/css/master.css\">\n</head>\n<body>\n{}\n{}\n<footer>{}</footer>\n</body>",
            NAVBAR, MOBILE, FOOTER_WITH_ICON
        );
        let ctx = PageContext::at_depth(2);
        let (once, hits) = rewrite_document(&page, &ctx);
        assert_eq!(
            hits,
            RuleHits {
                assets: 1,
                navbar: 1,
                mobile: 1,
                footer: 1
            }
        );
        assert!(!once.contains("logo-placeholder"));
        assert!(once.contains(r#"data-link="../../contact.html"></div>"#));
        assert!(once.contains(r#"data-link="./" data-footer></div>"#));

        let (twice, hits) = rewrite_document(&once, &ctx);
        assert_eq!(twice, once);
        assert_eq!(hits.total(), 0);
    }
}
