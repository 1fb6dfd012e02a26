//! Splitting one large markdown document into linked section files.
//!
//! Planning is pure — content in, a [`SplitPlan`] of filenames and contents
//! out — and persistence is a separate step, so the navigation and naming
//! logic is testable without touching the filesystem.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::document::{
    section::{Section, Segments, SplitStrategy, segment},
    title::section_filename,
};

/// A single output file planned by the splitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    /// File name within the output directory.
    pub filename: String,
    /// Full file content.
    pub content: String,
}

/// The pure output of split planning: section files plus an index document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPlan {
    /// One planned file per section, in document order.
    pub files: Vec<PlannedFile>,
    /// The index document listing every section.
    pub index: PlannedFile,
    /// When the section count was truncated, the number of sections the
    /// document actually contained.
    pub total_found: Option<usize>,
}

/// Outcome of a split run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOutcome {
    /// Paths of every file written, in section order with the index last.
    pub written: Vec<PathBuf>,
    /// Directory the files were written into.
    pub output_dir: PathBuf,
    /// When the section count was truncated, the number of sections the
    /// document actually contained.
    pub total_found: Option<usize>,
}

/// Errors that abort a split.
///
/// Split has exactly one input, so an unreadable input is fatal — unlike
/// merge, there is nothing to continue with. Output failures abort
/// immediately since partial output is worse than none.
#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    /// The input file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// The input file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Segmentation produced no sections (blank input).
    #[error("{} contains no content to split", path.display())]
    NoSections {
        /// The input file path.
        path: PathBuf,
    },
    /// The output directory could not be created.
    #[error("failed to create output directory {}: {source}", path.display())]
    OutputDir {
        /// The output directory path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A section or index file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// The file path that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Splits one markdown document into per-section files plus an index.
#[derive(Debug, Clone)]
pub struct Splitter {
    input_file: PathBuf,
    output_dir: Option<PathBuf>,
    prefix: String,
    strategy: SplitStrategy,
    navigation: bool,
}

impl Splitter {
    /// Creates a splitter. `output_dir` of `None` writes next to the input
    /// file.
    #[must_use]
    pub const fn new(
        input_file: PathBuf,
        output_dir: Option<PathBuf>,
        prefix: String,
        strategy: SplitStrategy,
        navigation: bool,
    ) -> Self {
        Self {
            input_file,
            output_dir,
            prefix,
            strategy,
            navigation,
        }
    }

    /// Reads the input document, plans the split, and writes every planned
    /// file plus the index.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::Read`] when the input cannot be read,
    /// [`SplitError::NoSections`] when the document is blank,
    /// [`SplitError::OutputDir`] when the output directory cannot be
    /// created, and [`SplitError::Write`] when any output file fails.
    pub fn run(&self) -> Result<SplitOutcome, SplitError> {
        let content = fs::read_to_string(&self.input_file).map_err(|source| SplitError::Read {
            path: self.input_file.clone(),
            source,
        })?;

        let source_name = self
            .input_file
            .file_name()
            .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
        let generated_at = chrono::Local::now()
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        let plan = self.plan(&content, &source_name, &generated_at)?;

        let output_dir = self.output_dir.clone().unwrap_or_else(|| {
            self.input_file
                .parent()
                .unwrap_or(Path::new("."))
                .to_path_buf()
        });
        fs::create_dir_all(&output_dir).map_err(|source| SplitError::OutputDir {
            path: output_dir.clone(),
            source,
        })?;

        let mut written = Vec::with_capacity(plan.files.len() + 1);
        for file in plan.files.iter().chain(std::iter::once(&plan.index)) {
            let path = output_dir.join(&file.filename);
            fs::write(&path, &file.content).map_err(|source| SplitError::Write {
                path: path.clone(),
                source,
            })?;
            written.push(path);
        }

        Ok(SplitOutcome {
            written,
            output_dir,
            total_found: plan.total_found,
        })
    }

    /// Plans the split without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::NoSections`] when segmentation yields nothing.
    pub fn plan(
        &self,
        content: &str,
        source_name: &str,
        generated_at: &str,
    ) -> Result<SplitPlan, SplitError> {
        let Segments {
            sections,
            total_found,
        } = segment(content, self.strategy);
        if sections.is_empty() {
            return Err(SplitError::NoSections {
                path: self.input_file.clone(),
            });
        }

        // Computed up front so neighbour links and actual output names can
        // never disagree.
        let filenames: Vec<String> = sections
            .iter()
            .enumerate()
            .map(|(i, section)| section_filename(&self.prefix, &section.title, i + 1))
            .collect();

        let files = sections
            .iter()
            .enumerate()
            .map(|(i, section)| {
                let mut body = section.content.clone();
                if self.navigation {
                    body.push_str(&self.navigation_links(&sections, &filenames, i));
                }
                PlannedFile {
                    filename: filenames[i].clone(),
                    content: normalized(&section.title, &body),
                }
            })
            .collect();

        let index = self.index_file(&sections, &filenames, source_name, generated_at);
        Ok(SplitPlan {
            files,
            index,
            total_found,
        })
    }

    fn navigation_links(&self, sections: &[Section], filenames: &[String], i: usize) -> String {
        let mut nav = String::from("\n\n---\n\n");
        if i > 0 {
            nav.push_str(&format!(
                "← Previous: [{}]({}) | ",
                sections[i - 1].title,
                filenames[i - 1]
            ));
        }
        nav.push_str(&format!("[📑 Index]({}index.md)", self.prefix));
        if i + 1 < sections.len() {
            nav.push_str(&format!(
                " | Next: [{}]({}) →",
                sections[i + 1].title,
                filenames[i + 1]
            ));
        }
        nav
    }

    fn index_file(
        &self,
        sections: &[Section],
        filenames: &[String],
        source_name: &str,
        generated_at: &str,
    ) -> PlannedFile {
        let stem = Path::new(source_name)
            .file_stem()
            .map_or_else(|| source_name.to_string(), |s| s.to_string_lossy().into_owned());

        let mut content = format!("# {stem} - Split Documentation\n\n");
        content.push_str("This document has been split into the following sections:\n\n");
        for (i, (section, filename)) in sections.iter().zip(filenames).enumerate() {
            content.push_str(&format!("{}. [{}]({})\n", i + 1, section.title, filename));
        }
        content.push_str("\n---\n\n");
        content.push_str(&format!("*Split from: {source_name}*\n"));
        content.push_str(&format!("*Generated on: {generated_at}*\n"));

        PlannedFile {
            filename: format!("{}index.md", self.prefix),
            content,
        }
    }
}

/// Prepends a fresh `# title` heading. When the raw content itself starts
/// with a header line, that line is dropped to avoid duplication; every other
/// line is preserved verbatim.
fn normalized(title: &str, body: &str) -> String {
    let mut content = format!("# {title}\n\n");
    if body.starts_with('#') {
        if let Some((_, rest)) = body.split_once('\n') {
            content.push_str(rest);
        }
    } else {
        content.push_str(body);
    }
    content
}
