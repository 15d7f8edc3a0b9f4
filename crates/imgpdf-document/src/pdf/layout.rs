// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page layout — where an image lands on its page for each fit mode.
//
// All values are PDF points with the origin at the bottom-left corner.

use imgpdf_core::types::FitMode;

/// Rectangle an image is drawn into. May extend past the page edges (`Fill`,
/// or `Original` with a large image); the page box clips the overflow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Compute the placement of an `img_width` x `img_height` pixel image on a
/// `page_width` x `page_height` point page. The result is always centred.
pub fn place_image(
    img_width: u32,
    img_height: u32,
    page_width: f32,
    page_height: f32,
    fit_mode: FitMode,
) -> Placement {
    let img_w = img_width.max(1) as f32;
    let img_h = img_height.max(1) as f32;

    let (width, height) = match fit_mode {
        FitMode::Fit => {
            let scale = (page_width / img_w).min(page_height / img_h);
            (img_w * scale, img_h * scale)
        }
        FitMode::Fill => {
            let scale = (page_width / img_w).max(page_height / img_h);
            (img_w * scale, img_h * scale)
        }
        FitMode::Original => (img_w, img_h),
    };

    Placement {
        x: (page_width - width) / 2.0,
        y: (page_height - height) / 2.0,
        width,
        height,
    }
}
