use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use clap::Parser;
use serde::Serialize;
use tracing::instrument;
use walkdir::WalkDir;

use super::terminal::{Colorize, width};

/// CLAUDE.md files shorter than this are probably placeholders.
const MIN_CLAUDE_MD_LEN: usize = 200;

#[derive(Debug, Parser)]
#[command(about = "Validate Claude documentation structure")]
pub struct Validate {
    /// Directory to validate
    #[arg(default_value = ".")]
    directory: PathBuf,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Only report issues, not recommendations
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Default, Serialize)]
struct Report {
    issues: Vec<String>,
    recommendations: Vec<String>,
    markdown_files: usize,
}

impl Validate {
    #[instrument]
    pub fn run(self) -> anyhow::Result<()> {
        if !self.directory.is_dir() {
            anyhow::bail!("directory not found: {}", self.directory.display());
        }

        let report = inspect(&self.directory);

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Table => self.print_table(&report),
        }

        // Exit 2 signals structural issues, for CI use.
        if !report.issues.is_empty() {
            std::process::exit(2);
        }
        Ok(())
    }

    fn print_table(&self, report: &Report) {
        println!(
            "Validating documentation structure in: {}",
            self.directory.display()
        );
        let rule_width = usize::from(width().unwrap_or(70).min(70));
        println!("{}", "─".repeat(rule_width).dim());

        if !report.issues.is_empty() {
            println!("\n{}", "Issues found:".error());
            for issue in &report.issues {
                println!("  - {issue}");
            }
        }

        if !self.quiet && !report.recommendations.is_empty() {
            println!("\n{}", "Recommendations:".warning());
            for recommendation in &report.recommendations {
                println!("  - {recommendation}");
            }
        }

        if report.issues.is_empty() && report.recommendations.is_empty() {
            println!("\n{}", "Documentation structure looks good!".success());
        }

        println!("\nScanned {} markdown files", report.markdown_files);
    }
}

fn inspect(directory: &Path) -> Report {
    let mut report = Report::default();

    let claude_md = directory.join("CLAUDE.md");
    if claude_md.is_file() {
        if let Ok(content) = std::fs::read_to_string(&claude_md) {
            if content.len() < MIN_CLAUDE_MD_LEN {
                report.recommendations.push(
                    "CLAUDE.md seems quite short - consider adding more project context"
                        .to_string(),
                );
            }
            if !content.contains("Project Overview") {
                report.recommendations.push(
                    "Consider adding a 'Project Overview' section to CLAUDE.md".to_string(),
                );
            }
        }
    } else {
        report
            .issues
            .push("Missing CLAUDE.md file (main project context)".to_string());
    }

    let specs = directory.join("specs");
    if specs.is_dir() {
        let has_markdown = std::fs::read_dir(&specs).is_ok_and(|entries| {
            entries
                .filter_map(Result::ok)
                .any(|entry| entry.path().extension() == Some(OsStr::new("md")))
        });
        if !has_markdown {
            report
                .recommendations
                .push("specs/ directory exists but contains no markdown files".to_string());
        }
    } else {
        report.recommendations.push(
            "Consider creating a 'specs/' directory for detailed specifications".to_string(),
        );
    }

    if !directory.join(".claude").is_dir() {
        report.recommendations.push(
            "Consider creating a '.claude/' directory for Claude-specific assets".to_string(),
        );
    }

    report.markdown_files = WalkDir::new(directory)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(OsStr::to_str)
                .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
        })
        .count();

    report
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_claude_md_is_an_issue() {
        let tmp = TempDir::new().unwrap();
        let report = inspect(tmp.path());
        assert_eq!(report.issues.len(), 1);
        assert!(report.issues[0].contains("CLAUDE.md"));
    }

    #[test]
    fn short_claude_md_is_a_recommendation() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("CLAUDE.md"), "# tiny\n\nProject Overview\n").unwrap();

        let report = inspect(tmp.path());
        assert!(report.issues.is_empty());
        assert!(
            report
                .recommendations
                .iter()
                .any(|r| r.contains("quite short"))
        );
        assert!(
            !report
                .recommendations
                .iter()
                .any(|r| r.contains("'Project Overview'"))
        );
    }

    #[test]
    fn empty_specs_directory_is_flagged() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("specs")).unwrap();

        let report = inspect(tmp.path());
        assert!(
            report
                .recommendations
                .iter()
                .any(|r| r.contains("no markdown files"))
        );
    }

    #[test]
    fn initialized_structure_passes_cleanly() {
        let tmp = TempDir::new().unwrap();
        let init = crate::cli::Init {
            project_name: Some("demo".to_string()),
        };
        init.run(tmp.path()).unwrap();

        let report = inspect(tmp.path());
        assert!(report.issues.is_empty(), "{:?}", report.issues);
        assert!(
            report.recommendations.is_empty(),
            "{:?}",
            report.recommendations
        );
        assert_eq!(report.markdown_files, 3);
    }

    #[test]
    fn markdown_files_are_counted_recursively() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("CLAUDE.md"), "x".repeat(300)).unwrap();
        std::fs::create_dir_all(tmp.path().join("specs").join("deep")).unwrap();
        std::fs::write(tmp.path().join("specs").join("a.md"), "# A").unwrap();
        std::fs::write(tmp.path().join("specs").join("deep").join("b.MD"), "# B").unwrap();

        let report = inspect(tmp.path());
        assert_eq!(report.markdown_files, 3);
    }
}
