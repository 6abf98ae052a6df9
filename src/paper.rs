//! Plain page dimensions for the single-margin preview and canvas export path.

use crate::page::{PagePreset, clamp_shared_margin};
use crate::pdf_plan::PdfImageInput;
use crate::util::mm_to_px;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaperLayout {
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    pub margin_mm: f64,
    pub content_width_mm: f64,
    pub content_height_mm: f64,
    pub page_width_px: f64,
    pub page_height_px: f64,
    pub margin_px: f64,
    pub content_width_px: f64,
}

pub fn build_paper_layout(page: &PagePreset, margin_mm: f64) -> PaperLayout {
    let margin_mm = clamp_shared_margin(margin_mm, page.width_mm, page.height_mm);
    let content_width_mm = (page.width_mm - margin_mm * 2.0).max(0.0);
    let content_height_mm = (page.height_mm - margin_mm * 2.0).max(0.0);
    PaperLayout {
        page_width_mm: page.width_mm,
        page_height_mm: page.height_mm,
        margin_mm,
        content_width_mm,
        content_height_mm,
        page_width_px: mm_to_px(page.width_mm),
        page_height_px: mm_to_px(page.height_mm),
        margin_px: mm_to_px(margin_mm),
        content_width_px: mm_to_px(content_width_mm),
    }
}

impl PaperLayout {
    /// Planner input for a canvas rendered from this layout.
    pub fn image_input(&self, canvas_width_px: f64, canvas_height_px: f64) -> PdfImageInput {
        PdfImageInput {
            canvas_width_px,
            canvas_height_px,
            page_width_mm: self.page_width_mm,
            page_height_mm: self.page_height_mm,
            margin_mm: self.margin_mm,
        }
    }
}
