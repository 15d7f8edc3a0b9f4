// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image inspection — dimensions, format and size for the list view, plus small
// PNG thumbnails encoded as data URLs.

use std::io::Cursor;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::ImageFormat;
use imgpdf_core::error::{ImgPdfError, Result};
use imgpdf_core::types::ImageInfo;
use tracing::{debug, instrument};

use crate::validation::validate_image;

/// Read the metadata shown next to each list entry.
///
/// The format is the upper-cased file extension, matching what the picker
/// filtered on rather than what the decoder sniffed.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn image_info(path: &Path) -> Result<ImageInfo> {
    validate_image(path)?;

    let img = open(path)?;
    let size_bytes = std::fs::metadata(path)?.len();
    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("unknown")
        .to_uppercase();

    debug!(width = img.width(), height = img.height(), %format, "image inspected");

    Ok(ImageInfo {
        width: img.width(),
        height: img.height(),
        format,
        size_bytes,
    })
}

/// Render a thumbnail no larger than `size` x `size` and return it as a
/// `data:image/png;base64,...` URL.
#[instrument(skip_all, fields(path = %path.display(), size))]
pub fn thumbnail_data_url(path: &Path, size: u32) -> Result<String> {
    validate_image(path)?;

    let thumb = open(path)?.thumbnail(size.max(1), size.max(1));

    let mut png = Cursor::new(Vec::new());
    thumb
        .write_to(&mut png, ImageFormat::Png)
        .map_err(|e| ImgPdfError::ImageProcessing(format!("thumbnail encoding failed: {e}")))?;

    let bytes = png.into_inner();
    debug!(
        width = thumb.width(),
        height = thumb.height(),
        bytes = bytes.len(),
        "thumbnail rendered"
    );

    Ok(format!("data:image/png;base64,{}", STANDARD.encode(bytes)))
}

fn open(path: &Path) -> Result<image::DynamicImage> {
    image::open(path).map_err(|e| ImgPdfError::ImageRead(format!("{}: {e}", path.display())))
}
