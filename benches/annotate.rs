//! Benchmarks for the annotation pipeline.
//!
//! Run with: cargo bench

use std::hint::black_box;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use criterion::{Criterion, criterion_group, criterion_main};

use html_standoff::record::{Options, process_line};
use html_standoff::{Limits, annotate_document, glue, parse_html};

/// A page with mixed block and inline content.
fn sample_page(paragraphs: usize) -> String {
    let mut html = String::from("<html><head><title>Sample page</title></head><body>");
    for i in 0..paragraphs {
        html.push_str(&format!(
            "<div class=\"entry\"><h2>Entry {i}</h2><p>Some <b>bold</b> and <i>ital</i>ic \
             text with a <a href=\"#{i}\">link</a>.<br>Second line.</p>\
             <script>var n = {i};</script></div>"
        ));
    }
    html.push_str("</body></html>");
    html
}

fn bench_parse(c: &mut Criterion) {
    let html = sample_page(200);
    c.bench_function("parse_html", |b| {
        b.iter(|| parse_html(black_box(&html)));
    });
}

fn bench_annotate(c: &mut Criterion) {
    let dom = parse_html(&sample_page(200));
    c.bench_function("annotate_document", |b| {
        b.iter(|| annotate_document(black_box(&dom), Limits::default()).unwrap());
    });

    let doc = annotate_document(&dom, Limits::default()).unwrap();
    c.bench_function("glue", |b| {
        b.iter(|| glue(black_box(&doc.words)));
    });
}

fn bench_record(c: &mut Criterion) {
    let line = format!("{}\thttp://example.com/", STANDARD.encode(sample_page(200)));
    let options = Options::default();
    c.bench_function("process_line", |b| {
        b.iter(|| process_line(black_box(line.as_bytes()), &options).unwrap());
    });
}

criterion_group!(benches, bench_parse, bench_annotate, bench_record);
criterion_main!(benches);
