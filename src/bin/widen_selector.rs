//! Widen the card selector in the site's `main.js` so the scroll/hover
//! effects also apply to method cards and the form side panel.
//!
//! Usage:
//!   widen-selector --file assets/js/main.js [--dry-run]
//!   widen-selector --file main.js --variable items --selector .item --add .item-alt

use anyhow::Result;
use clap::Parser;
use craftsoft_site_tools::selector_widen::{widen_file, SelectorWidening};
use craftsoft_site_tools::site_files::FileOutcome;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "widen-selector",
    about = "Add classes to a querySelectorAll selector in a script"
)]
struct Cli {
    /// Script to rewrite
    #[arg(long)]
    file: PathBuf,

    /// Variable the selection is assigned to
    #[arg(long, default_value = "cards")]
    variable: String,

    /// Selector currently passed to querySelectorAll
    #[arg(long, default_value = ".unified-card")]
    selector: String,

    /// Selector to append (repeatable)
    #[arg(
        long = "add",
        default_values_t = [".unified-method-card".to_string(), ".unified-form-side".to_string()]
    )]
    extra: Vec<String>,

    /// Report what would change without writing the file
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let widening = SelectorWidening {
        variable: cli.variable,
        selector: cli.selector,
        extra: cli.extra,
    };
    match widen_file(&cli.file, &widening, cli.dry_run)? {
        FileOutcome::Changed if cli.dry_run => {
            println!("Would update {}", cli.file.display())
        }
        FileOutcome::Changed => println!("Replacement successful: {}", cli.file.display()),
        FileOutcome::Unchanged | FileOutcome::Skipped => {
            println!("Nothing to replace in {}", cli.file.display())
        }
    }
    Ok(())
}
