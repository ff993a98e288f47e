//! Benchmarks for package assembly.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use xlpack::{
    to_xlsx_bytes, AssemblyOptions, Font, MemoryStorage, PackageWriter, Picture, Style, Workbook,
};

/// `rows` x `cols` grid alternating strings, numbers and a bold header row.
fn grid_workbook(rows: u32, cols: u32) -> Workbook {
    let mut wb = Workbook::new();
    let sheet = wb.add_sheet("Data").expect("Failed to add sheet");

    let header = sheet.add_row();
    for c in 0..cols {
        header
            .add_cell()
            .set_str(format!("Column {c}"))
            .set_style(Style::with_font(Font::bold()));
    }
    for r in 0..rows {
        let row = sheet.add_row();
        for c in 0..cols {
            let cell = row.add_cell();
            if c % 2 == 0 {
                cell.set_str(format!("item-{}", r % 100));
            } else {
                cell.set_float(f64::from(r) * 0.5 + f64::from(c));
            }
        }
    }
    wb
}

/// Many picture cells over a small set of distinct images.
fn picture_workbook(cells: u32, distinct: u32) -> Workbook {
    let mut wb = Workbook::new();
    let sheet = wb.add_sheet("Pictures").expect("Failed to add sheet");
    for i in 0..cells {
        let mut data = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        data.extend_from_slice(&(i % distinct).to_le_bytes());
        sheet
            .add_row()
            .add_cell()
            .set_picture(Picture::new("png", data));
    }
    wb
}

/// Benchmark a small workbook end to end
fn bench_small(c: &mut Criterion) {
    let wb = grid_workbook(10, 5);
    c.bench_function("assemble_small", |b| {
        b.iter(|| to_xlsx_bytes(black_box(&wb), AssemblyOptions::default()).expect("Failed to assemble"))
    });
}

/// Benchmark the large grid (5000 rows x 20 cols), zipped and in memory
fn bench_large(c: &mut Criterion) {
    let wb = grid_workbook(5000, 20);

    let mut group = c.benchmark_group("large_grid");
    group.throughput(Throughput::Elements(5000 * 20));
    group.sample_size(10);

    group.bench_function("zip_5000x20", |b| {
        b.iter(|| to_xlsx_bytes(black_box(&wb), AssemblyOptions::default()).expect("Failed to assemble"))
    });
    group.bench_function("memory_5000x20", |b| {
        b.iter(|| {
            PackageWriter::new(MemoryStorage::new())
                .write(black_box(&wb))
                .expect("Failed to assemble")
        })
    });

    group.finish();
}

/// Compare media deduplication across picture counts
fn bench_pictures(c: &mut Criterion) {
    let mut group = c.benchmark_group("pictures");

    for cells in [100_u32, 1_000] {
        let wb = picture_workbook(cells, 10);
        group.throughput(Throughput::Elements(u64::from(cells)));
        group.bench_with_input(BenchmarkId::new("assemble", cells), &wb, |b, wb| {
            b.iter(|| {
                PackageWriter::new(MemoryStorage::new())
                    .write(black_box(wb))
                    .expect("Failed to assemble")
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_small, bench_large, bench_pictures);

criterion_main!(benches);
