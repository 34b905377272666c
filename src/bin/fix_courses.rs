//! Course page fixes for `courses/<slug>/index.html`.
//!
//! Two passes:
//!
//! 1. **links**: point related course links at `../slug/` and repair the
//!    broken glyph in the "Intermediate" heading.
//!    fix-courses links --courses-dir Website/courses
//!
//! 2. **icons**: restore the icon and gradient of each related course card.
//!    fix-courses icons --courses-dir Website/courses [--icons icons.csv]

use anyhow::Result;
use clap::{Parser, Subcommand};
use craftsoft_site_tools::course_pages::{
    default_course_icons, fix_course_icons, fix_course_links, load_course_icons,
};
use craftsoft_site_tools::site_files::BatchSummary;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fix-courses")]
#[command(about = "Repair related course links and icons on course pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fix related course links and the Intermediate heading icon
    Links {
        /// Directory holding one subdirectory per course
        #[arg(long)]
        courses_dir: PathBuf,

        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Restore related course card icons and gradients
    Icons {
        /// Directory holding one subdirectory per course
        #[arg(long)]
        courses_dir: PathBuf,

        /// Icon table CSV (name,icon,gradient); built-in table if omitted
        #[arg(long)]
        icons: Option<PathBuf>,

        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },
}

fn report(label: &str, summary: &BatchSummary) -> Result<()> {
    for (path, reason) in &summary.failed {
        eprintln!("  Error: {}: {}", path.display(), reason);
    }
    println!("{}: {}", label, summary);
    if summary.has_failures() {
        anyhow::bail!("{} course page(s) could not be processed", summary.failed.len());
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Links {
            courses_dir,
            dry_run,
        } => {
            let summary = fix_course_links(&courses_dir, dry_run)?;
            report("Course links", &summary)?;
        }
        Commands::Icons {
            courses_dir,
            icons,
            dry_run,
        } => {
            let table = match icons {
                Some(path) => load_course_icons(&path)?,
                None => default_course_icons(),
            };
            let summary = fix_course_icons(&courses_dir, &table, dry_run)?;
            report("Course icons", &summary)?;
        }
    }

    Ok(())
}
