//! Title extraction and identifier derivation.
//!
//! Titles come from the first markdown heading in a block of text; slugs are
//! the filesystem-safe and anchor-safe identifiers derived from them. The
//! filename and anchor rules overlap but are distinct, and both are depended
//! on for link integrity.

/// Maximum length of a filename slug before the index is appended.
const MAX_SLUG_LEN: usize = 50;

/// Extracts a human-readable title from markdown text.
///
/// Scans lines in order and returns the content of the first line beginning
/// with one or more `#` characters, with the header markers and surrounding
/// whitespace stripped. Lines whose heading text is empty are skipped.
///
/// When no heading is found, falls back to `fallback_name` with its final
/// extension removed, `-`/`_` replaced by spaces, and each word capitalized.
/// Returns `fallback_name` verbatim if even that cleanup produces nothing, so
/// the result is non-empty whenever the fallback is.
#[must_use]
pub fn derive_title(text: &str, fallback_name: &str) -> String {
    for line in text.lines() {
        if line.starts_with('#') {
            let heading = line.trim_start_matches('#').trim();
            if !heading.is_empty() {
                return heading.to_string();
            }
        }
    }

    let stem = fallback_name
        .rsplit_once('.')
        .map_or(fallback_name, |(stem, _)| stem);
    let title = stem
        .replace(['-', '_'], " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");

    if title.is_empty() {
        fallback_name.to_string()
    } else {
        title
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
    })
}

/// Converts a title into a filesystem-safe filename slug.
///
/// Lowercases, replaces runs of whitespace, underscores, and dashes with a
/// single `-`, strips every other character outside `[a-z0-9]`, trims
/// leading/trailing dashes, and truncates to 50 characters.
///
/// Idempotent: `slugify(slugify(x)) == slugify(x)`.
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.to_lowercase().chars() {
        if c.is_whitespace() || c == '_' || c == '-' {
            pending_dash = true;
        } else if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        }
    }

    slug.truncate(MAX_SLUG_LEN);
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Converts text into an in-document anchor slug.
///
/// Lowercases, turns each space and underscore into `-`, and removes `.` and
/// `,`. Merge table-of-contents entries and rewritten links both go through
/// this function so the two sides can never disagree.
#[must_use]
pub fn anchor(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' | '_' => Some('-'),
            '.' | ',' => None,
            other => Some(other),
        })
        .collect()
}

/// Builds the output filename for a split section.
///
/// Format is `{prefix}{index:02}-{slug}.md` with a 1-based, zero-padded
/// two-digit index. The index keeps filenames unique even when two section
/// titles collapse to the same slug.
#[must_use]
pub fn section_filename(prefix: &str, title: &str, index: usize) -> String {
    format!("{prefix}{index:02}-{}.md", slugify(title))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_from_first_heading() {
        let text = "some preamble\n## Getting Started\n\nbody\n";
        assert_eq!(derive_title(text, "file.md"), "Getting Started");
    }

    #[test]
    fn title_skips_empty_headings() {
        let text = "#\n##   \n### Real Title\n";
        assert_eq!(derive_title(text, "file.md"), "Real Title");
    }

    #[test]
    fn title_falls_back_to_cleaned_filename() {
        assert_eq!(derive_title("no headings here", "api_reference.md"), "Api Reference");
        assert_eq!(derive_title("", "getting-started.md"), "Getting Started");
    }

    #[test]
    fn title_fallback_strips_only_final_extension() {
        assert_eq!(derive_title("", "notes.v2.md"), "Notes.v2");
    }

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Getting Started"), "getting-started");
        assert_eq!(slugify("API (v2) Reference!"), "api-v2-reference");
        assert_eq!(slugify("snake_case_title"), "snake-case-title");
    }

    #[test]
    fn slugify_collapses_and_trims() {
        assert_eq!(slugify("  --  spaced  --  "), "spaced");
        assert_eq!(slugify("a - ! - b"), "a-b");
    }

    #[test]
    fn slugify_truncates_to_fifty() {
        let long = "word ".repeat(30);
        let slug = slugify(&long);
        assert!(slug.len() <= 50);
        assert!(!slug.ends_with('-'));
    }

    // Testable property 3: slugify is idempotent, and distinct titles in one
    // batch never collide after index-prefixing.
    #[test]
    fn slugify_is_idempotent() {
        for title in ["Getting Started", "API (v2)!", "  odd -- spacing  ", "", "..."] {
            let once = slugify(title);
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn distinct_titles_never_collide_after_index_prefixing() {
        let titles = ["Intro", "Intro!", "Usage", "Usage Notes"];
        let filenames: Vec<String> = titles
            .iter()
            .enumerate()
            .map(|(i, t)| section_filename("", t, i + 1))
            .collect();
        let mut deduped = filenames.clone();
        deduped.dedup();
        assert_eq!(filenames, deduped);
    }

    #[test]
    fn anchor_replaces_and_strips() {
        assert_eq!(anchor("api"), "api");
        assert_eq!(anchor("getting started"), "getting-started");
        assert_eq!(anchor("my_file"), "my-file");
        assert_eq!(anchor("v1.2, final"), "v12-final");
    }

    #[test]
    fn section_filename_format() {
        assert_eq!(section_filename("", "Introduction", 1), "01-introduction.md");
        assert_eq!(section_filename("part-", "Deep Dive", 12), "part-12-deep-dive.md");
    }

    #[test]
    fn degenerate_title_keeps_index_unique() {
        assert_eq!(section_filename("", "???", 3), "03-.md");
    }
}
