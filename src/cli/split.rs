use std::path::{Path, PathBuf};

use clap::Parser;
use docstruct::{Config, SplitStrategy, Splitter};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Split large documents into smaller, manageable sections")]
pub struct Split {
    /// Input markdown file to split
    input_file: PathBuf,

    /// Output directory for split files (default: same as input file)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Prefix for generated filenames
    #[arg(long, value_name = "PREFIX")]
    prefix: Option<String>,

    /// Split by markdown headers (default)
    #[arg(long, conflicts_with_all = ["by_lines", "by_size"])]
    by_headers: bool,

    /// Split by number of lines
    #[arg(long, conflicts_with = "by_size")]
    by_lines: bool,

    /// Split by file size
    #[arg(long)]
    by_size: bool,

    /// Maximum number of sections when splitting by headers (default: 10)
    #[arg(long, value_name = "N")]
    max_sections: Option<usize>,

    /// Header level to split on (default: 2, for `##`)
    #[arg(long, value_name = "N")]
    header_level: Option<usize>,

    /// Lines per file when splitting by lines (default: 200)
    #[arg(long, value_name = "N")]
    lines_per_file: Option<usize>,

    /// Maximum file size in KB when splitting by size (default: 100)
    #[arg(long, value_name = "KB")]
    max_size_kb: Option<usize>,

    /// Don't add navigation links between sections
    #[arg(long)]
    no_navigation: bool,
}

impl Split {
    #[instrument]
    pub fn run(self) -> anyhow::Result<()> {
        if !self.input_file.is_file() {
            anyhow::bail!("input file not found: {}", self.input_file.display());
        }

        let defaults = Config::discover(Path::new(".")).split;
        let strategy = if self.by_lines {
            SplitStrategy::Lines {
                lines_per_file: self.lines_per_file.unwrap_or(defaults.lines_per_file),
            }
        } else if self.by_size {
            SplitStrategy::Size {
                max_size_kb: self.max_size_kb.unwrap_or(defaults.max_size_kb),
            }
        } else {
            SplitStrategy::Headers {
                level: self.header_level.unwrap_or(defaults.header_level),
                max_sections: self.max_sections.unwrap_or(defaults.max_sections),
            }
        };

        let splitter = Splitter::new(
            self.input_file,
            self.output_dir,
            self.prefix.unwrap_or(defaults.prefix),
            strategy,
            !self.no_navigation,
        );
        let outcome = splitter.run()?;

        if let Some(total) = outcome.total_found {
            eprintln!(
                "{}",
                format!(
                    "Warning: document has {total} sections, limiting to {}",
                    outcome.written.len() - 1
                )
                .warning()
            );
        }
        for path in &outcome.written {
            println!("Created: {}", path.display());
        }
        println!(
            "\n{}",
            format!(
                "Split complete! Created {} files in {}",
                outcome.written.len(),
                outcome.output_dir.display()
            )
            .success()
        );

        Ok(())
    }
}
