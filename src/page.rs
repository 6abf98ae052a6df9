//! Physical page sizes and margin limits.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Error;
use crate::util::clamp;

/// Smallest margin any control or import may produce, in mm.
pub const MIN_MARGIN_MM: f64 = 8.0;
/// Space kept between the margin and the page's center line, in mm.
pub const MARGIN_SAFETY_INSET_MM: f64 = 12.0;
pub const DEFAULT_HORIZONTAL_MARGIN_MM: f64 = 18.0;
pub const DEFAULT_VERTICAL_MARGIN_MM: f64 = 20.0;

/// A physical page size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePreset {
    pub key: PagePresetKey,
    pub label: &'static str,
    pub width_mm: f64,
    pub height_mm: f64,
    /// Format name understood by the PDF writer.
    pub pdf_format: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PagePresetKey {
    #[default]
    A4,
    A5,
    B5,
    Letter,
    Legal,
}

impl PagePresetKey {
    pub const ALL: [PagePresetKey; 5] = [
        PagePresetKey::A4,
        PagePresetKey::A5,
        PagePresetKey::B5,
        PagePresetKey::Letter,
        PagePresetKey::Legal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PagePresetKey::A4 => "a4",
            PagePresetKey::A5 => "a5",
            PagePresetKey::B5 => "b5",
            PagePresetKey::Letter => "letter",
            PagePresetKey::Legal => "legal",
        }
    }

    pub fn preset(self) -> PagePreset {
        let (label, width_mm, height_mm, pdf_format) = match self {
            PagePresetKey::A4 => ("A4", 210.0, 297.0, "a4"),
            PagePresetKey::A5 => ("A5", 148.0, 210.0, "a5"),
            PagePresetKey::B5 => ("B5", 176.0, 250.0, "b5"),
            PagePresetKey::Letter => ("US Letter", 215.9, 279.4, "letter"),
            PagePresetKey::Legal => ("US Legal", 215.9, 355.6, "legal"),
        };
        PagePreset {
            key: self,
            label,
            width_mm,
            height_mm,
            pdf_format,
        }
    }

    pub fn from_key(key: &str) -> Option<PagePresetKey> {
        Self::ALL.into_iter().find(|page| page.as_str() == key)
    }
}

impl FromStr for PagePresetKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| Error::UnknownPreset {
            kind: "page preset",
            name: s.to_string(),
        })
    }
}

/// Independent horizontal (left/right) and vertical (top/bottom) margins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMargins {
    pub horizontal_mm: f64,
    pub vertical_mm: f64,
}

impl Default for PageMargins {
    fn default() -> Self {
        Self {
            horizontal_mm: DEFAULT_HORIZONTAL_MARGIN_MM,
            vertical_mm: DEFAULT_VERTICAL_MARGIN_MM,
        }
    }
}

impl PageMargins {
    pub fn uniform(value_mm: f64) -> Self {
        Self {
            horizontal_mm: value_mm,
            vertical_mm: value_mm,
        }
    }

    /// Clamp both axes so the printable area of `page` never collapses.
    pub fn clamped_to(self, page: &PagePreset) -> Self {
        Self {
            horizontal_mm: clamp_horizontal_margin(self.horizontal_mm, page),
            vertical_mm: clamp_vertical_margin(self.vertical_mm, page),
        }
    }
}

fn max_margin(extent_mm: f64) -> f64 {
    MIN_MARGIN_MM.max(extent_mm / 2.0 - MARGIN_SAFETY_INSET_MM)
}

pub fn clamp_horizontal_margin(value_mm: f64, page: &PagePreset) -> f64 {
    clamp(value_mm, MIN_MARGIN_MM, max_margin(page.width_mm))
}

pub fn clamp_vertical_margin(value_mm: f64, page: &PagePreset) -> f64 {
    clamp(value_mm, MIN_MARGIN_MM, max_margin(page.height_mm))
}

/// Clamp a single margin shared by all four sides against the shorter page edge.
pub fn clamp_shared_margin(value_mm: f64, width_mm: f64, height_mm: f64) -> f64 {
    clamp(value_mm, MIN_MARGIN_MM, max_margin(width_mm.min(height_mm)))
}
