//! Merging a directory of markdown files into one comprehensive document.
//!
//! The merged document is assembled as an ordered list of immutable text
//! blocks — metadata comments, optimization header, table of contents, one
//! block per source file, trailing summary — concatenated once at the end.
//! Optimization markers are emitted at block boundaries, never located by
//! re-searching rendered text.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use regex::Regex;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::document::{links, title};

/// Leading comment lines announcing a Claude-optimized document.
const CLAUDE_HEADER: &str = "<!-- Optimized for Claude Code -->\n\
                             <!-- This is a comprehensive merged document -->\n\
                             <!-- Use Ctrl+F to search for specific sections -->\n\n";

/// Toggles controlling what the merged document contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOptions {
    /// Glob pattern matched against file names.
    pub pattern: String,
    /// Search subdirectories recursively.
    pub recursive: bool,
    /// File names excluded from merging (exact-name matches).
    pub exclude: Vec<String>,
    /// Generate a table of contents after the metadata block.
    pub add_toc: bool,
    /// Insert a divider (rule, heading, source attribution) before each file.
    pub add_dividers: bool,
    /// Rewrite intra-repository markdown links to in-document anchors.
    pub rewrite_links: bool,
    /// Append a trailing summary block.
    pub add_summary: bool,
    /// Emit Claude Code optimization comments and per-file START/END markers.
    pub claude_markers: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            pattern: "*.md".to_string(),
            recursive: false,
            exclude: Vec::new(),
            add_toc: true,
            add_dividers: true,
            rewrite_links: true,
            add_summary: true,
            claude_markers: true,
        }
    }
}

/// One table-of-contents entry per merged file, in file-processing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    /// Title derived from the file content (or its name).
    pub title: String,
    /// File name of the source file.
    pub source_name: String,
    /// Full path of the source file.
    pub source_path: PathBuf,
}

/// Outcome of a merge run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    /// Number of files whose content made it into the document.
    pub files_merged: usize,
    /// Files skipped because they were unreadable or blank.
    pub skipped: Vec<PathBuf>,
    /// Character count of the written document; zero when nothing was
    /// written.
    pub characters: usize,
}

/// Errors that abort a merge.
///
/// Per-file read failures are not here: they are recovered by skipping the
/// file, so one bad file never aborts the batch. Failures writing the final
/// document abort immediately since partial output is worse than none.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// The input directory does not exist or is not a directory.
    #[error("input directory not found: {}", path.display())]
    InputDir {
        /// The missing directory.
        path: PathBuf,
    },
    /// The merged document (or its parent directory) could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Output {
        /// The output file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Merges every matching markdown file under a directory into one document.
#[derive(Debug, Clone)]
pub struct Merger {
    input_dir: PathBuf,
    output_file: PathBuf,
    options: MergeOptions,
}

impl Merger {
    /// Creates a merger reading from `input_dir` and writing `output_file`.
    #[must_use]
    pub const fn new(input_dir: PathBuf, output_file: PathBuf, options: MergeOptions) -> Self {
        Self {
            input_dir,
            output_file,
            options,
        }
    }

    /// Runs the merge.
    ///
    /// Zero matching files is a no-op: nothing is written and the report
    /// records zero merged files. Unreadable or blank files are skipped with
    /// a logged warning.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::InputDir`] when the input directory is missing
    /// and [`MergeError::Output`] when the final document cannot be written.
    pub fn run(&self) -> Result<MergeReport, MergeError> {
        if !self.input_dir.is_dir() {
            return Err(MergeError::InputDir {
                path: self.input_dir.clone(),
            });
        }

        let files = self.discover();
        if files.is_empty() {
            debug!(
                "no files matching {} under {}",
                self.options.pattern,
                self.input_dir.display()
            );
            return Ok(MergeReport {
                files_merged: 0,
                skipped: Vec::new(),
                characters: 0,
            });
        }

        let generated_at = chrono::Local::now()
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        let (document, report) = self.assemble(&files, &generated_at);

        if let Some(parent) = self.output_file.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| MergeError::Output {
                    path: self.output_file.clone(),
                    source,
                })?;
            }
        }
        fs::write(&self.output_file, &document).map_err(|source| MergeError::Output {
            path: self.output_file.clone(),
            source,
        })?;

        Ok(report)
    }

    /// Resolves the ordered FileSet: matching files, deduplicated, with the
    /// output file excluded, sorted lexicographically by path string.
    fn discover(&self) -> Vec<PathBuf> {
        let matcher = glob_to_regex(&self.options.pattern);
        let output_abs = std::path::absolute(&self.output_file).ok();

        let mut files: Vec<PathBuf> = if self.options.recursive {
            WalkDir::new(&self.input_dir)
                .into_iter()
                .filter_map(Result::ok)
                .filter(|entry| entry.file_type().is_file())
                .map(walkdir::DirEntry::into_path)
                .collect()
        } else {
            fs::read_dir(&self.input_dir).map_or_else(
                |_| Vec::new(),
                |entries| {
                    entries
                        .filter_map(Result::ok)
                        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
                        .map(|entry| entry.path())
                        .collect()
                },
            )
        };

        files.retain(|path| {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                return false;
            };
            if !matcher.is_match(name) {
                return false;
            }
            if self.options.exclude.iter().any(|excluded| excluded == name) {
                debug!("excluding {}", path.display());
                return false;
            }
            // Never merge the output file into itself.
            match (&output_abs, std::path::absolute(path).ok()) {
                (Some(output), Some(abs)) => abs != *output,
                _ => true,
            }
        });

        files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
        files.dedup();
        files
    }

    fn assemble(&self, files: &[PathBuf], generated_at: &str) -> (String, MergeReport) {
        let mut toc: Vec<TocEntry> = Vec::new();
        let mut skipped: Vec<PathBuf> = Vec::new();
        let mut sections: Vec<String> = Vec::new();

        for path in files {
            let content = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    warn!("skipping {}: {e}", path.display());
                    skipped.push(path.clone());
                    continue;
                }
            };
            if content.trim().is_empty() {
                warn!("skipping empty file: {}", path.display());
                skipped.push(path.clone());
                continue;
            }

            let name = path
                .file_name()
                .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
            let doc_title = title::derive_title(&content, &name);
            let content = if self.options.rewrite_links {
                links::rewrite_for_merge(&content, path.parent().unwrap_or(Path::new("")))
            } else {
                content
            };

            sections.push(self.render_section(&doc_title, &name, &content));
            toc.push(TocEntry {
                title: doc_title,
                source_name: name,
                source_path: path.clone(),
            });
        }

        // Leading blocks are rendered after the loop so the metadata records
        // the real merged-file count.
        let mut blocks: Vec<String> = Vec::new();
        blocks.push(render_metadata(&self.input_dir, toc.len(), generated_at));
        if self.options.claude_markers {
            blocks.push(CLAUDE_HEADER.to_string());
        }
        if self.options.add_toc && !toc.is_empty() {
            blocks.push(render_toc(&toc));
        }
        blocks.extend(sections);

        let mut document = blocks.concat();
        if self.options.add_summary {
            let summary = render_summary(&document, &self.input_dir, &toc, generated_at);
            document.push_str(&summary);
        }

        let characters = document.chars().count();
        (
            document,
            MergeReport {
                files_merged: toc.len(),
                skipped,
                characters,
            },
        )
    }

    fn render_section(&self, doc_title: &str, name: &str, content: &str) -> String {
        let mut block = String::new();
        if self.options.claude_markers {
            block.push_str(&format!("<!-- START: {name} -->\n"));
        }
        if self.options.add_dividers {
            let rule = "=".repeat(80);
            block.push_str(&format!(
                "\n\n{rule}\n# {doc_title}\n*Source: {name}*\n{rule}\n\n"
            ));
        }
        block.push_str(content);
        // Exactly one blank line of separation before the next section.
        if !content.ends_with("\n\n") {
            block.push_str("\n\n");
        }
        if self.options.claude_markers {
            block.push_str(&format!("<!-- END: {name} -->\n"));
        }
        block
    }
}

fn render_metadata(input_dir: &Path, file_count: usize, generated_at: &str) -> String {
    format!(
        "<!-- Merged Documentation -->\n\
         <!-- Generated on: {generated_at} -->\n\
         <!-- Source directory: {} -->\n\
         <!-- Files merged: {file_count} -->\n\n",
        input_dir.display()
    )
}

fn render_toc(entries: &[TocEntry]) -> String {
    let mut toc = String::from("# Table of Contents\n\n");
    for (i, entry) in entries.iter().enumerate() {
        let stem = entry
            .source_name
            .strip_suffix(".md")
            .unwrap_or(&entry.source_name);
        toc.push_str(&format!(
            "{}. [{}](#{})\n",
            i + 1,
            entry.title,
            title::anchor(stem)
        ));
    }
    toc.push_str("\n---\n\n");
    toc
}

/// Renders the trailing summary. Word and character counts cover `document`
/// as passed in — everything assembled so far, including the metadata,
/// optimization header, and table of contents, but not the summary itself.
fn render_summary(
    document: &str,
    input_dir: &Path,
    entries: &[TocEntry],
    generated_at: &str,
) -> String {
    let rule = "=".repeat(80);
    let words = document.split_whitespace().count();
    let characters = document.chars().count();

    let mut summary = format!("\n\n{rule}\n# Document Summary\n{rule}\n\n");
    summary.push_str(&format!("**Total files merged:** {}\n", entries.len()));
    summary.push_str(&format!("**Source directory:** {}\n", input_dir.display()));
    summary.push_str(&format!("**Generated on:** {generated_at}\n\n"));
    summary.push_str("## Files included:\n\n");
    for (i, entry) in entries.iter().enumerate() {
        summary.push_str(&format!(
            "{}. {} ({})\n",
            i + 1,
            entry.source_name,
            entry.source_path.display()
        ));
    }
    summary.push_str(&format!("\n**Total word count:** {words}\n"));
    summary.push_str(&format!("**Total character count:** {characters}\n"));
    summary
}

fn glob_to_regex(pattern: &str) -> Regex {
    let mut translated = String::with_capacity(pattern.len() + 8);
    translated.push('^');
    for c in pattern.chars() {
        match c {
            '*' => translated.push_str(".*"),
            '?' => translated.push('.'),
            other => translated.push_str(&regex::escape(&other.to_string())),
        }
    }
    translated.push('$');
    Regex::new(&translated).expect("translated glob pattern is valid")
}
