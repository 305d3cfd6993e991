//! Benchmarks for untable parsing and workbook performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic HTML documents.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use untable::{ParseOptions, Strategy, TableParser};

/// Creates an HTML document with `table_count` tables of `row_count` rows each.
fn create_test_html(table_count: usize, row_count: usize) -> String {
    let mut html = String::from("<html><head><meta charset=\"utf-8\"></head><body>\n");

    for t in 0..table_count {
        html.push_str(&format!("<h2>Report {}</h2>\n<table>\n", t + 1));
        html.push_str("<thead><tr><th>Id</th><th>Name</th><th>Amount</th><th>Note</th></tr></thead>\n<tbody>\n");
        for r in 0..row_count {
            // Every tenth row carries a merged note cell
            if r % 10 == 0 {
                html.push_str(&format!(
                    "<tr><td>{}</td><td>Item {}</td><td>{}.{:02}</td><td rowspan=\"2\">batch</td></tr>\n",
                    r,
                    r,
                    r * 3,
                    r % 100
                ));
            } else if r % 10 == 1 {
                html.push_str(&format!(
                    "<tr><td>{}</td><td>Item {}</td><td>{}</td></tr>\n",
                    r,
                    r,
                    r * 3
                ));
            } else {
                html.push_str(&format!(
                    "<tr><td>{}</td><td>Item {}</td><td>{}</td><td>-</td></tr>\n",
                    r,
                    r,
                    r * 3
                ));
            }
        }
        html.push_str("</tbody>\n</table>\n");
    }

    html.push_str("</body></html>\n");
    html
}

/// Benchmark both strategies over the whole document.
fn bench_extract_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_all");

    for (tables, rows) in [(1, 100), (10, 100), (5, 1000)].iter() {
        let html = create_test_html(*tables, *rows);

        for strategy in [Strategy::Bulk, Strategy::Targeted] {
            let parser = strategy.parser(ParseOptions::default());
            group.bench_function(format!("{:?}_{}x{}", strategy, tables, rows), |b| {
                b.iter(|| parser.parse_all(black_box(&html)).unwrap());
            });
        }
    }

    group.finish();
}

/// Benchmark picking the last table out of a larger document.
fn bench_extract_one(c: &mut Criterion) {
    let html = create_test_html(20, 50);

    c.bench_function("extract_one_last_of_20", |b| {
        b.iter(|| untable::extract_one(black_box(&html), 19).unwrap());
    });
}

/// Benchmark workbook serialization.
fn bench_workbook(c: &mut Criterion) {
    let html = create_test_html(5, 500);
    let tables = untable::extract_all(&html).unwrap();
    let writer = untable::WorkbookWriter::new();

    c.bench_function("workbook_5x500", |b| {
        b.iter(|| writer.to_bytes(black_box(&tables)).unwrap());
    });
}

criterion_group!(benches, bench_extract_all, bench_extract_one, bench_workbook);
criterion_main!(benches);
