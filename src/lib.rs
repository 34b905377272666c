//! Craft Soft site tools
//!
//! Maintenance passes over the static website source tree.
//!
//! This library provides:
//! - `site_files`: Shared walk/read/write plumbing and per-run summaries
//! - `logo_rewrite`: Legacy logo markup -> `logo-signature` component migration
//! - `selector_widen`: Single-line selector widening in a JavaScript asset
//! - `course_pages`: Related-course link and icon fixes on course pages
//!
//! Binaries:
//! - `fix-logos`: Rewrite every HTML page under a site root
//! - `widen-selector`: Widen the unified card selector in `main.js`
//! - `fix-courses`: Repair course page links and related course icons

pub mod course_pages;
pub mod logo_rewrite;
pub mod selector_widen;
pub mod site_files;
