//! Tiling one tall raster of the document across fixed-size PDF pages.
//!
//! The whole document is drawn once as an image, scaled to the printable
//! width. Every page places that same image at the left margin with a
//! decreasing vertical offset, so each page reveals the next slice of it.

use crate::page::clamp_shared_margin;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfImageInput {
    pub canvas_width_px: f64,
    pub canvas_height_px: f64,
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    pub margin_mm: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PdfImagePlan {
    pub safe_margin_mm: f64,
    pub printable_width_mm: f64,
    pub printable_height_mm: f64,
    pub rendered_height_mm: f64,
    /// Vertical image offset for each page, first page first.
    pub offsets_y_mm: Vec<f64>,
}

impl PdfImagePlan {
    pub fn page_count(&self) -> usize {
        self.offsets_y_mm.len()
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

/// Plan the per-page offsets for placing the rasterized document.
///
/// Degenerate input (empty canvas, zero-size page) yields a single page
/// rather than NaN or an endless page run.
pub fn build_pdf_image_plan(input: &PdfImageInput) -> PdfImagePlan {
    let canvas_width = non_negative(input.canvas_width_px);
    let canvas_height = non_negative(input.canvas_height_px);
    let page_width = non_negative(input.page_width_mm);
    let page_height = non_negative(input.page_height_mm);

    let margin = clamp_shared_margin(input.margin_mm, page_width, page_height);
    let printable_width = non_negative(page_width - margin * 2.0);
    let printable_height = non_negative(page_height - margin * 2.0);
    let rendered_height = if canvas_width > 0.0 {
        canvas_height * printable_width / canvas_width
    } else {
        0.0
    };

    let mut offsets = vec![margin];
    if printable_height > 0.0 {
        let mut height_left = rendered_height - printable_height;
        while height_left > 0.0 {
            offsets.push(height_left - rendered_height + margin);
            height_left -= printable_height;
        }
    }

    PdfImagePlan {
        safe_margin_mm: margin,
        printable_width_mm: printable_width,
        printable_height_mm: printable_height,
        rendered_height_mm: rendered_height,
        offsets_y_mm: offsets,
    }
}

/// Receives image placements from [`place_image_plan`]; implemented by a PDF writer.
pub trait PdfImageSink {
    /// Start a new page after the first.
    fn add_page(&mut self);

    /// Draw the document image at `(x, y)` with the given size, all in mm.
    fn place_image(&mut self, x_mm: f64, y_mm: f64, width_mm: f64, height_mm: f64);
}

/// Drive `sink` through every page of `plan`.
pub fn place_image_plan(plan: &PdfImagePlan, sink: &mut impl PdfImageSink) {
    for (index, offset) in plan.offsets_y_mm.iter().enumerate() {
        if index > 0 {
            sink.add_page();
        }
        sink.place_image(
            plan.safe_margin_mm,
            *offset,
            plan.printable_width_mm,
            plan.rendered_height_mm,
        );
    }
}
