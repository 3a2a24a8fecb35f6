//! Benchmarks for geometry and pagination

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pageflow::{geometry, PageGeometryConfig, PaginatedDocument};

fn sample_text(paragraphs: usize) -> String {
    let mut text = String::new();
    for i in 0..paragraphs {
        text.push_str(&format!(
            "Paragraph {} contains enough text to span multiple lines and test the line breaking algorithm. ",
            i
        ));
        if i % 3 == 0 {
            text.push_str("\n\n");
        }
    }
    text
}

fn bench_page_geometry(c: &mut Criterion) {
    let config = PageGeometryConfig::letter().with_header(36.0).with_footer(24.0);
    c.bench_function("page_geometry", |b| {
        b.iter(|| black_box(geometry::layout(black_box(&config))));
    });
}

fn bench_paginate_small(c: &mut Criterion) {
    c.bench_function("paginate_small_document", |b| {
        let mut doc = PaginatedDocument::with_config(PageGeometryConfig::letter());
        doc.replace_text("Hello, World! This is a small document.\n\nIt has a few paragraphs.");

        b.iter(|| {
            doc.invalidate_layout();
            black_box(doc.calculate_layout().page_count);
        });
    });
}

fn bench_paginate_medium(c: &mut Criterion) {
    c.bench_function("paginate_medium_document", |b| {
        // ~10 pages of content
        let mut doc = PaginatedDocument::with_config(PageGeometryConfig::letter());
        doc.replace_text(&sample_text(300));

        b.iter(|| {
            doc.invalidate_layout();
            black_box(doc.calculate_layout().page_count);
        });
    });
}

fn bench_edit_and_repaginate(c: &mut Criterion) {
    c.bench_function("edit_and_repaginate", |b| {
        let mut doc = PaginatedDocument::with_config(PageGeometryConfig::letter());
        doc.replace_text(&sample_text(300));

        b.iter(|| {
            let _ = doc.insert_text(0, black_box("x"));
            black_box(doc.calculate_layout().page_count);
        });
    });
}

fn bench_page_lookup(c: &mut Criterion) {
    c.bench_function("page_index_for_character", |b| {
        let mut doc = PaginatedDocument::with_config(PageGeometryConfig::letter());
        doc.replace_text(&sample_text(300));
        let len = doc.calculate_layout().character_count();

        b.iter(|| {
            for offset in (0..len).step_by(97) {
                black_box(doc.engine().page_index_for_character(offset));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_page_geometry,
    bench_paginate_small,
    bench_paginate_medium,
    bench_edit_and_repaginate,
    bench_page_lookup,
);

criterion_main!(benches);
