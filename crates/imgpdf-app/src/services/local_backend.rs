// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-process image backend backed by `imgpdf-document`.
//
// Decoding and PDF encoding are CPU-bound and touch the filesystem, so every
// call runs on tokio's blocking pool and the async side only awaits the
// join handle.

use std::path::{Path, PathBuf};

use imgpdf_bridge::{BoxFuture, ImageBackend};
use imgpdf_core::error::{ImgPdfError, Result};
use imgpdf_core::types::{GenerationResult, ImageInfo, PdfSettings, ValidationResult};

/// `ImageBackend` that does the work locally.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalBackend;

async fn blocking<T, F>(work: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ImgPdfError::Bridge(format!("backend task failed: {e}")))?
}

impl ImageBackend for LocalBackend {
    fn validate_images<'a>(
        &'a self,
        paths: &'a [PathBuf],
    ) -> BoxFuture<'a, Result<ValidationResult>> {
        let paths = paths.to_vec();
        Box::pin(blocking(move || Ok(imgpdf_document::validate_images(&paths))))
    }

    fn image_info<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, Result<ImageInfo>> {
        let path = path.to_path_buf();
        Box::pin(blocking(move || imgpdf_document::image_info(&path)))
    }

    fn image_thumbnail<'a>(&'a self, path: &'a Path, size: u32) -> BoxFuture<'a, Result<String>> {
        let path = path.to_path_buf();
        Box::pin(blocking(move || imgpdf_document::thumbnail_data_url(&path, size)))
    }

    fn generate_pdf<'a>(
        &'a self,
        image_paths: &'a [PathBuf],
        output_path: &'a Path,
        settings: &'a PdfSettings,
    ) -> BoxFuture<'a, Result<GenerationResult>> {
        let paths = image_paths.to_vec();
        let output = output_path.to_path_buf();
        let settings = settings.clone();
        Box::pin(blocking(move || {
            Ok(imgpdf_document::generate_pdf(&paths, &output, &settings))
        }))
    }
}
