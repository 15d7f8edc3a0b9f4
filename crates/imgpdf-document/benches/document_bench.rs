// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the imgpdf-document crate.
// Benchmarks a three-page image PDF and a thumbnail render on small synthetic
// images written to a temporary directory.

use std::path::PathBuf;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{Rgb, RgbImage};

use imgpdf_core::types::{FitMode, PdfSettings};
use imgpdf_document::{PdfWriter, thumbnail_data_url};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Write `count` 256x192 gradient PNGs and return their paths.
fn synthetic_images(dir: &std::path::Path, count: usize) -> Vec<PathBuf> {
    (0..count)
        .map(|i| {
            let img = RgbImage::from_fn(256, 192, |x, y| {
                Rgb([x as u8, y as u8, (i * 60) as u8])
            });
            let path = dir.join(format!("page-{i}.png"));
            img.save(&path).expect("write fixture image");
            path
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_create_pdf(c: &mut Criterion) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let paths = synthetic_images(dir.path(), 3);
    let writer = PdfWriter::new(PdfSettings {
        fit_mode: FitMode::Fill,
        ..PdfSettings::default()
    });

    c.bench_function("create_from_paths (3 x 256x192)", |b| {
        b.iter(|| {
            let bytes = writer
                .create_from_paths(black_box(&paths))
                .expect("pdf generation");
            black_box(bytes);
        });
    });
}

fn bench_thumbnail(c: &mut Criterion) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let paths = synthetic_images(dir.path(), 1);

    c.bench_function("thumbnail_data_url (96px)", |b| {
        b.iter(|| {
            let url = thumbnail_data_url(black_box(&paths[0]), 96).expect("thumbnail");
            black_box(url);
        });
    });
}

criterion_group!(benches, bench_create_pdf, bench_thumbnail);
criterion_main!(benches);
