// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — one page per image using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use std::path::{Path, PathBuf};

use imgpdf_core::error::{ImgPdfError, Result};
use imgpdf_core::types::{GenerationResult, PdfSettings};
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument, warn};

use super::layout::place_image;
use crate::validation::validate_image;

/// Placing images at 72 DPI makes one pixel exactly one point, so the scale
/// factors below are plain "points per pixel" ratios.
const PLACEMENT_DPI: f32 = 72.0;

/// Builds image PDFs for a fixed set of page settings.
pub struct PdfWriter {
    settings: PdfSettings,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: Option<String>,
}

impl PdfWriter {
    pub fn new(settings: PdfSettings) -> Self {
        Self {
            settings,
            title: None,
        }
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Page size in points with orientation applied.
    fn page_dimensions(&self) -> Result<(f32, f32)> {
        self.settings.page_dimensions_pt()
    }

    /// Create a PDF with one page per image, in the order given.
    ///
    /// Every image is re-validated and decoded here; the first unreadable
    /// image aborts the whole document.
    #[instrument(skip_all, fields(images = image_paths.len()))]
    pub fn create_from_paths(&self, image_paths: &[PathBuf]) -> Result<Vec<u8>> {
        if image_paths.is_empty() {
            return Err(ImgPdfError::NoImages);
        }

        let (page_w_pt, page_h_pt) = self.page_dimensions()?;
        let page_w = pt_to_mm(page_w_pt);
        let page_h = pt_to_mm(page_h_pt);
        let title = self.title.as_deref().unwrap_or("Images");

        info!(
            page_size = ?self.settings.page_size,
            orientation = ?self.settings.orientation,
            fit = ?self.settings.fit_mode,
            "Creating image PDF"
        );

        let mut doc = PdfDocument::new(title);
        let mut pages: Vec<PdfPage> = Vec::with_capacity(image_paths.len());

        for path in image_paths {
            validate_image(path)?;

            let dynamic_image = ::image::open(path).map_err(|err| {
                ImgPdfError::ImageRead(format!("{}: {err}", path.display()))
            })?;
            let img_width = dynamic_image.width();
            let img_height = dynamic_image.height();

            let raw = RawImage {
                pixels: RawImageData::U8(dynamic_image.to_rgb8().into_raw()),
                width: img_width as usize,
                height: img_height as usize,
                data_format: RawImageFormat::RGB8,
                tag: Vec::new(),
            };
            let xobject_id = doc.add_image(&raw);

            let placement = place_image(
                img_width,
                img_height,
                page_w_pt,
                page_h_pt,
                self.settings.fit_mode,
            );

            let ops = vec![Op::UseXobject {
                id: xobject_id,
                transform: XObjectTransform {
                    translate_x: Some(Pt(placement.x)),
                    translate_y: Some(Pt(placement.y)),
                    scale_x: Some(placement.width / img_width.max(1) as f32),
                    scale_y: Some(placement.height / img_height.max(1) as f32),
                    dpi: Some(PLACEMENT_DPI),
                    rotate: None,
                },
            }];

            debug!(
                path = %path.display(),
                x = placement.x,
                y = placement.y,
                width = placement.width,
                height = placement.height,
                "Image placed on page"
            );

            pages.push(PdfPage::new(page_w, page_h, ops));
        }

        doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            warn!(count = warnings.len(), "printpdf reported warnings while saving");
        }

        Ok(output)
    }

    /// Create the PDF and write it to `output_path`.
    pub fn write_to_file(&self, image_paths: &[PathBuf], output_path: &Path) -> Result<()> {
        let bytes = self.create_from_paths(image_paths)?;
        std::fs::write(output_path, &bytes).map_err(|e| {
            ImgPdfError::PdfGeneration(format!("cannot write {}: {e}", output_path.display()))
        })?;
        info!(bytes = bytes.len(), "Wrote image PDF to {}", output_path.display());
        Ok(())
    }
}

/// Generate a PDF and fold any error into a `GenerationResult`.
pub fn generate_pdf(
    image_paths: &[PathBuf],
    output_path: &Path,
    settings: &PdfSettings,
) -> GenerationResult {
    let mut writer = PdfWriter::new(settings.clone());
    if let Some(stem) = output_path.file_stem().and_then(|s| s.to_str()) {
        writer.set_title(stem);
    }
    match writer.write_to_file(image_paths, output_path) {
        Ok(()) => GenerationResult::succeeded(output_path),
        Err(e) => {
            warn!(error = %e, "PDF generation failed");
            GenerationResult::failed(e.to_string())
        }
    }
}

fn pt_to_mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}
