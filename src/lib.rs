//! Documentation scaffolding toolkit for Claude Code projects.
//!
//! Two independent pipelines share a common shape: read input text, segment
//! it into logical sections, derive titles and machine-safe identifiers,
//! rewrite cross-references, and reassemble the output — either one merged
//! document ([`Merger`]) or a set of smaller linked files ([`Splitter`]).

pub mod config;
pub use config::Config;

pub mod document;
pub use document::{Section, Segments, SplitStrategy};

/// Merging a directory of markdown files into one document.
pub mod merge;
pub use merge::{MergeOptions, MergeReport, Merger};

/// Splitting one document into a set of linked section files.
pub mod split;
pub use split::{SplitOutcome, SplitPlan, Splitter};
