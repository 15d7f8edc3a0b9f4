// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// imgpdf-document — The local image/PDF service.
//
// Validates candidate image files, reads their metadata, renders list
// thumbnails, and lays out one PDF page per image. Everything here is
// synchronous; callers move it onto a blocking thread.

pub mod image;
pub mod pdf;
pub mod validation;

// Re-export the primary entry points so callers can use `imgpdf_document::PdfWriter` etc.
pub use self::image::inspect::{image_info, thumbnail_data_url};
pub use pdf::writer::{PdfWriter, generate_pdf};
pub use validation::{validate_image, validate_images};
