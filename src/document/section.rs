//! Document segmentation.
//!
//! A [`Section`] is a contiguous, ordered slice of a document treated as one
//! logical unit. [`segment`] carves a document into sections using one of
//! three strategies: header boundaries, fixed line counts, or cumulative byte
//! size.

use regex::Regex;

/// Default header depth for [`SplitStrategy::Headers`].
pub const DEFAULT_HEADER_LEVEL: usize = 2;
/// Default section cap for [`SplitStrategy::Headers`].
pub const DEFAULT_MAX_SECTIONS: usize = 10;
/// Default chunk length for [`SplitStrategy::Lines`].
pub const DEFAULT_LINES_PER_FILE: usize = 200;
/// Default size ceiling for [`SplitStrategy::Size`].
pub const DEFAULT_MAX_SIZE_KB: usize = 100;

/// A contiguous, ordered slice of a document's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Human-readable section title. Empty for preamble text preceding the
    /// first qualifying header.
    pub title: String,
    /// Raw text, newline-terminated. Concatenating every section of a
    /// [`Segments`] in order reproduces the input document (modulo the final
    /// newline).
    pub content: String,
    /// Structural depth. Only meaningful for header-based segmentation.
    pub level: usize,
}

/// Strategy for carving a document into sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitStrategy {
    /// Split on lines carrying exactly `level` leading `#` characters
    /// followed by non-empty text. Headers at any other depth are ordinary
    /// content.
    Headers {
        /// Header depth that forms a boundary.
        level: usize,
        /// Upper bound on the number of sections produced.
        max_sections: usize,
    },
    /// Partition the line sequence into consecutive fixed-size chunks; the
    /// last chunk may be shorter.
    Lines {
        /// Number of lines per chunk.
        lines_per_file: usize,
    },
    /// Accumulate blank-line-delimited paragraphs until the next paragraph
    /// would push the section past the size ceiling.
    Size {
        /// Size ceiling in kilobytes (UTF-8 encoded).
        max_size_kb: usize,
    },
}

impl Default for SplitStrategy {
    fn default() -> Self {
        Self::Headers {
            level: DEFAULT_HEADER_LEVEL,
            max_sections: DEFAULT_MAX_SECTIONS,
        }
    }
}

/// The result of segmenting a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segments {
    /// Ordered sections, document order.
    pub sections: Vec<Section>,
    /// When `max_sections` truncated the output, the number of sections the
    /// document actually contained.
    pub total_found: Option<usize>,
}

/// Segments `content` according to `strategy`.
///
/// Blank input produces zero sections regardless of strategy; callers treat
/// that as "nothing to do" rather than an error. Non-blank input always
/// produces at least one section.
#[must_use]
pub fn segment(content: &str, strategy: SplitStrategy) -> Segments {
    if content.trim().is_empty() {
        return Segments {
            sections: Vec::new(),
            total_found: None,
        };
    }

    match strategy {
        SplitStrategy::Headers {
            level,
            max_sections,
        } => by_headers(content, level, max_sections),
        SplitStrategy::Lines { lines_per_file } => Segments {
            sections: by_lines(content, lines_per_file),
            total_found: None,
        },
        SplitStrategy::Size { max_size_kb } => Segments {
            sections: by_size(content, max_size_kb),
            total_found: None,
        },
    }
}

fn by_headers(content: &str, level: usize, max_sections: usize) -> Segments {
    let boundary = Regex::new(&format!(r"^#{{{level}}}\s+(.+)$"))
        .expect("header boundary pattern is valid");

    let mut sections: Vec<Section> = Vec::new();
    let mut title = String::new();
    let mut body = String::new();

    for line in content.split('\n') {
        if let Some(caps) = boundary.captures(line) {
            // Flush the previous section; blank preamble is discarded.
            if !body.trim().is_empty() {
                sections.push(Section {
                    title: std::mem::take(&mut title),
                    content: std::mem::take(&mut body),
                    level,
                });
            }
            title = caps[1].trim().to_string();
            body.clear();
            body.push_str(line);
            body.push('\n');
        } else {
            body.push_str(line);
            body.push('\n');
        }
    }

    if !body.trim().is_empty() {
        sections.push(Section {
            title,
            content: body,
            level,
        });
    }

    let total = sections.len();
    if total > max_sections {
        sections.truncate(max_sections);
        return Segments {
            sections,
            total_found: Some(total),
        };
    }
    Segments {
        sections,
        total_found: None,
    }
}

fn by_lines(content: &str, lines_per_file: usize) -> Vec<Section> {
    let lines: Vec<&str> = content.split('\n').collect();
    lines
        .chunks(lines_per_file.max(1))
        .enumerate()
        .map(|(i, chunk)| {
            let title = chunk.iter().find(|line| line.starts_with('#')).map_or_else(
                || format!("Section {}", i + 1),
                |line| line.trim_matches('#').trim().to_string(),
            );
            let mut body = String::new();
            for line in chunk {
                body.push_str(line);
                body.push('\n');
            }
            Section {
                title,
                content: body,
                level: 1,
            }
        })
        .collect()
}

fn by_size(content: &str, max_size_kb: usize) -> Vec<Section> {
    let max_bytes = max_size_kb.saturating_mul(1024);

    let mut sections: Vec<Section> = Vec::new();
    let mut title: Option<String> = None;
    let mut body = String::new();
    let mut size = 0_usize;
    // Shared across all sections; only incremented when it names one.
    let mut counter = 1_usize;

    for paragraph in content.split("\n\n") {
        let paragraph_bytes = paragraph.len();

        if size + paragraph_bytes > max_bytes && !body.is_empty() {
            let assigned = title.take().unwrap_or_else(|| {
                let fallback = format!("Section {counter}");
                counter += 1;
                fallback
            });
            sections.push(Section {
                title: assigned,
                content: std::mem::take(&mut body),
                level: 1,
            });
            size = 0;
        }

        body.push_str(paragraph);
        body.push_str("\n\n");
        size += paragraph_bytes;

        if title.is_none() && paragraph.starts_with('#') {
            let heading = paragraph.lines().next().unwrap_or_default();
            title = Some(heading.trim_matches('#').trim().to_string());
        }
    }

    if !body.trim().is_empty() {
        let assigned = title.unwrap_or_else(|| format!("Section {counter}"));
        sections.push(Section {
            title: assigned,
            content: body,
            level: 1,
        });
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "intro line\n\n## First\n\nalpha\n\n## Second\n\nbeta\n";

    fn headers(level: usize, max_sections: usize) -> SplitStrategy {
        SplitStrategy::Headers {
            level,
            max_sections,
        }
    }

    #[test]
    fn header_split_keeps_nonblank_preamble() {
        let segments = segment(DOC, headers(2, 10));
        let titles: Vec<&str> = segments
            .sections
            .iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(titles, ["", "First", "Second"]);
        assert!(segments.sections[0].content.contains("intro line"));
    }

    #[test]
    fn header_split_discards_blank_preamble() {
        let segments = segment("\n\n## Only\n\nbody\n", headers(2, 10));
        assert_eq!(segments.sections.len(), 1);
        assert_eq!(segments.sections[0].title, "Only");
    }

    #[test]
    fn header_split_ignores_other_depths() {
        // A document using only `#` headers with level 2 is not split.
        let segments = segment("# One\n\ntext\n\n# Two\n\nmore\n", headers(2, 10));
        assert_eq!(segments.sections.len(), 1);
        assert_eq!(segments.sections[0].title, "");
    }

    #[test]
    fn header_split_requires_whitespace_and_text() {
        let segments = segment("##NoSpace\n##  \n## Real\nbody\n", headers(2, 10));
        let titles: Vec<&str> = segments
            .sections
            .iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(titles, ["", "Real"]);
    }

    // Testable property 4: 15 level-2 headers with max_sections 5 produce
    // exactly the first 5 sections, and the truncation is reported.
    #[test]
    fn header_split_truncates_to_max_sections() {
        let mut doc = String::new();
        for i in 1..=15 {
            doc.push_str(&format!("## Heading {i}\n\ncontent {i}\n\n"));
        }
        let segments = segment(&doc, headers(2, 5));
        assert_eq!(segments.sections.len(), 5);
        assert_eq!(segments.total_found, Some(15));
        for (i, section) in segments.sections.iter().enumerate() {
            assert_eq!(section.title, format!("Heading {}", i + 1));
        }
    }

    // Testable property 2 for the header strategy: concatenated section
    // content reconstructs the document's non-blank lines in order.
    #[test]
    fn header_split_coverage() {
        let segments = segment(DOC, headers(2, 10));
        let rejoined: String = segments.sections.iter().map(|s| s.content.as_str()).collect();
        let original: Vec<&str> = DOC.lines().filter(|l| !l.trim().is_empty()).collect();
        let recovered: Vec<&str> = rejoined.lines().filter(|l| !l.trim().is_empty()).collect();
        assert_eq!(original, recovered);
    }

    #[test]
    fn line_split_chunks_and_titles() {
        let doc = "# Top\na\nb\nc\nd\ne\n";
        let segments = segment(doc, SplitStrategy::Lines { lines_per_file: 3 });
        assert_eq!(segments.sections.len(), 3);
        assert_eq!(segments.sections[0].title, "Top");
        assert_eq!(segments.sections[1].title, "Section 2");
        assert_eq!(segments.sections[0].content, "# Top\na\nb\n");
    }

    #[test]
    fn line_split_coverage() {
        let doc = "alpha\nbeta\ngamma\ndelta\n";
        let segments = segment(doc, SplitStrategy::Lines { lines_per_file: 2 });
        let rejoined: String = segments.sections.iter().map(|s| s.content.as_str()).collect();
        let original: Vec<&str> = doc.lines().filter(|l| !l.trim().is_empty()).collect();
        let recovered: Vec<&str> = rejoined.lines().filter(|l| !l.trim().is_empty()).collect();
        assert_eq!(original, recovered);
    }

    // Testable property 7: with three paragraphs sized so two fit under the
    // ceiling but three do not, the split is exactly 2 + 1.
    #[test]
    fn size_split_boundary() {
        let paragraph = "x".repeat(480);
        let doc = format!("{paragraph}\n\n{paragraph}\n\n{paragraph}");
        let segments = segment(&doc, SplitStrategy::Size { max_size_kb: 1 });
        assert_eq!(segments.sections.len(), 2);
        assert_eq!(
            segments.sections[0].content.matches(&paragraph).count(),
            2
        );
        assert_eq!(
            segments.sections[1].content.matches(&paragraph).count(),
            1
        );
    }

    #[test]
    fn size_split_titles_from_headers_and_counter() {
        let heading = format!("## Guide\n{}", "a".repeat(600));
        let plain = "b".repeat(600);
        let doc = format!("{heading}\n\n{plain}\n\n{plain}");
        let segments = segment(&doc, SplitStrategy::Size { max_size_kb: 1 });
        let titles: Vec<&str> = segments
            .sections
            .iter()
            .map(|s| s.title.as_str())
            .collect();
        // The counter only advances when it actually names a section.
        assert_eq!(titles, ["Guide", "Section 1", "Section 2"]);
    }

    #[test]
    fn size_split_keeps_paragraph_separators() {
        let doc = "one\n\ntwo\n\nthree";
        let segments = segment(doc, SplitStrategy::Size { max_size_kb: 100 });
        assert_eq!(segments.sections.len(), 1);
        assert_eq!(segments.sections[0].content, "one\n\ntwo\n\nthree\n\n");
    }

    #[test]
    fn blank_input_yields_zero_sections_for_every_strategy() {
        for strategy in [
            headers(2, 10),
            SplitStrategy::Lines { lines_per_file: 10 },
            SplitStrategy::Size { max_size_kb: 1 },
        ] {
            assert!(segment("", strategy).sections.is_empty());
            assert!(segment("  \n\n  ", strategy).sections.is_empty());
        }
    }

    #[test]
    fn nonblank_input_yields_at_least_one_section() {
        for strategy in [
            headers(2, 10),
            SplitStrategy::Lines { lines_per_file: 10 },
            SplitStrategy::Size { max_size_kb: 1 },
        ] {
            assert!(!segment("just text\n", strategy).sections.is_empty());
        }
    }
}
