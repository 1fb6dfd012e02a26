//! Cross-reference rewriting for merged documents.
//!
//! Merging collapses many files into one addressable document, so links that
//! pointed at sibling markdown files must become in-document anchors. The
//! split pipeline never rewrites existing links; it generates fresh
//! navigation instead.

use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::{Captures, Regex};

use super::title::anchor;

static INLINE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("inline link pattern is valid"));

/// Rewrites markdown inline links so they stay valid after merging.
///
/// For every `[text](target)`:
///
/// - targets starting with `http://`, `https://`, or `#` pass through
///   untouched;
/// - a target naming a markdown file is resolved against `doc_dir` when
///   relative and rewritten to the in-document anchor of the file's stem,
///   since after merging that file is a section of the same document;
/// - every other target (images, non-markdown paths) is left unchanged.
///
/// A target carrying both a path and a fragment (`file.md#section`) is
/// rewritten to the file's section anchor with the fragment dropped; the `#`
/// exemption applies only to targets that *start* with `#`. The per-file
/// section anchor is the one anchor the merge guarantees to exist.
#[must_use]
pub fn rewrite_for_merge(content: &str, doc_dir: &Path) -> String {
    INLINE_LINK
        .replace_all(content, |caps: &Captures<'_>| {
            let text = &caps[1];
            let target = &caps[2];

            if target.starts_with("http://")
                || target.starts_with("https://")
                || target.starts_with('#')
            {
                return caps[0].to_string();
            }

            let path_part = target.split('#').next().unwrap_or(target);
            if !path_part.ends_with(".md") {
                return caps[0].to_string();
            }

            let mut resolved = PathBuf::from(path_part);
            if resolved.is_relative() {
                resolved = doc_dir.join(resolved);
            }
            let stem = resolved
                .file_stem()
                .map_or_else(String::new, |s| s.to_string_lossy().into_owned());

            format!("[{text}](#{})", anchor(&stem))
        })
        .into_owned()
}
