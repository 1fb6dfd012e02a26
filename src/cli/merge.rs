use std::path::{Path, PathBuf};

use clap::Parser;
use docstruct::{Config, MergeOptions, Merger};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Merge multiple markdown documents into a single file")]
pub struct Merge {
    /// Directory containing markdown files to merge
    input_dir: PathBuf,

    /// Output filename
    #[arg(long, short, default_value = "merged-docs.md")]
    output: PathBuf,

    /// File pattern to match (default: *.md)
    #[arg(long, value_name = "GLOB")]
    pattern: Option<String>,

    /// File names to exclude from merging
    #[arg(long, value_name = "NAME", value_delimiter = ',')]
    exclude: Vec<String>,

    /// Search subdirectories recursively
    #[arg(long)]
    recursive: bool,

    /// Don't generate a table of contents
    #[arg(long)]
    no_toc: bool,

    /// Don't add section dividers between files
    #[arg(long)]
    no_dividers: bool,

    /// Don't rewrite internal links for the merged context
    #[arg(long)]
    no_links: bool,

    /// Don't add a summary section at the end
    #[arg(long)]
    no_summary: bool,

    /// Don't add Claude Code optimization markers
    #[arg(long)]
    no_claude_markers: bool,
}

impl Merge {
    #[instrument]
    pub fn run(self) -> anyhow::Result<()> {
        let defaults = Config::discover(Path::new(".")).merge;
        let mut exclude = defaults.exclude;
        exclude.extend(self.exclude);

        let options = MergeOptions {
            pattern: self.pattern.unwrap_or(defaults.pattern),
            recursive: self.recursive || defaults.recursive,
            exclude,
            add_toc: !self.no_toc,
            add_dividers: !self.no_dividers,
            rewrite_links: !self.no_links,
            add_summary: !self.no_summary,
            claude_markers: !self.no_claude_markers,
        };

        let merger = Merger::new(self.input_dir, self.output.clone(), options);
        let report = merger.run()?;

        if report.files_merged == 0 && report.skipped.is_empty() {
            println!("No markdown files found to merge.");
            return Ok(());
        }

        for path in &report.skipped {
            println!("{}", format!("Skipped: {}", path.display()).dim());
        }
        println!(
            "{}",
            format!(
                "Merged {} documents into {}",
                report.files_merged,
                self.output.display()
            )
            .success()
        );
        println!("Total size: {} characters", report.characters);

        Ok(())
    }
}
