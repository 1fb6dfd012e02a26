//! Benchmarks the three segmentation strategies over a large synthetic
//! document.

#![allow(missing_docs)]

use criterion::{Criterion, criterion_group, criterion_main};
use docstruct::SplitStrategy;
use docstruct::document::section::segment;

/// Builds a ~1 MB markdown document with 200 level-2 sections.
fn large_document() -> String {
    let mut doc = String::with_capacity(1 << 20);
    for i in 1..=200 {
        doc.push_str(&format!("## Heading {i}\n\n"));
        for _ in 0..40 {
            doc.push_str("Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do.\n");
        }
        doc.push('\n');
    }
    doc
}

fn segment_strategies(c: &mut Criterion) {
    let doc = large_document();

    c.bench_function("segment by headers", |b| {
        b.iter(|| {
            segment(
                &doc,
                SplitStrategy::Headers {
                    level: 2,
                    max_sections: usize::MAX,
                },
            )
        });
    });

    c.bench_function("segment by lines", |b| {
        b.iter(|| segment(&doc, SplitStrategy::Lines { lines_per_file: 200 }));
    });

    c.bench_function("segment by size", |b| {
        b.iter(|| segment(&doc, SplitStrategy::Size { max_size_kb: 64 }));
    });
}

criterion_group!(benches, segment_strategies);
criterion_main!(benches);
