//! Replace the hardcoded brand logo on every page of the site with the shared
//! `logo-signature` component and link the component's CSS/JS.
//!
//! Usage:
//!   fix-logos --root "/path/to/Website" [--dry-run]

use anyhow::Result;
use clap::Parser;
use craftsoft_site_tools::logo_rewrite::{rewrite_site, RewriteOptions};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "fix-logos",
    about = "Swap legacy logo markup for the logo-signature component"
)]
struct Cli {
    /// Website root directory (pages are linked relative to it)
    #[arg(long, env = "SITE_ROOT")]
    root: PathBuf,

    /// Report what would change without writing any file
    #[arg(long)]
    dry_run: bool,
}

fn run(cli: &Cli) -> Result<()> {
    let options = RewriteOptions {
        dry_run: cli.dry_run,
    };
    let report = rewrite_site(&cli.root, &options)?;

    for (path, reason) in &report.summary.failed {
        eprintln!("  Error: {}: {}", path.display(), reason);
    }

    let hits = &report.hits;
    println!(
        "Rules fired: {} asset links, {} navbar, {} mobile menu, {} footer",
        hits.assets, hits.navbar, hits.mobile, hits.footer
    );
    if cli.dry_run {
        println!("Dry run: {}", report.summary);
    } else {
        println!("Done: {}", report.summary);
    }
    if report.summary.total() > 0 && hits.total() == 0 {
        log::warn!(
            "No legacy logo markup found under {}; is --root correct?",
            cli.root.display()
        );
    }

    if report.summary.has_failures() {
        anyhow::bail!("{} file(s) could not be processed", report.summary.failed.len());
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    run(&cli)
}
