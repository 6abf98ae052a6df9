//! Running headers, footers and page numbers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::style::Bounds;

/// Header and footer font size in points.
pub const CHROME_FONT_SIZE_PT: Bounds = Bounds::new(6.0, 16.0, 9.0);

/// One of the six page margin boxes running content can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarginBoxPosition {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl MarginBoxPosition {
    /// In stylesheet order.
    pub const ALL: [MarginBoxPosition; 6] = [
        MarginBoxPosition::TopLeft,
        MarginBoxPosition::TopCenter,
        MarginBoxPosition::TopRight,
        MarginBoxPosition::BottomLeft,
        MarginBoxPosition::BottomCenter,
        MarginBoxPosition::BottomRight,
    ];

    /// The name used both in styleset JSON and as the CSS at-rule name.
    pub fn as_str(self) -> &'static str {
        match self {
            MarginBoxPosition::TopLeft => "top-left",
            MarginBoxPosition::TopCenter => "top-center",
            MarginBoxPosition::TopRight => "top-right",
            MarginBoxPosition::BottomLeft => "bottom-left",
            MarginBoxPosition::BottomCenter => "bottom-center",
            MarginBoxPosition::BottomRight => "bottom-right",
        }
    }

    pub fn is_top(self) -> bool {
        matches!(
            self,
            MarginBoxPosition::TopLeft | MarginBoxPosition::TopCenter | MarginBoxPosition::TopRight
        )
    }

    pub fn text_align(self) -> &'static str {
        match self {
            MarginBoxPosition::TopLeft | MarginBoxPosition::BottomLeft => "left",
            MarginBoxPosition::TopCenter | MarginBoxPosition::BottomCenter => "center",
            MarginBoxPosition::TopRight | MarginBoxPosition::BottomRight => "right",
        }
    }

    pub fn from_key(key: &str) -> Option<MarginBoxPosition> {
        Self::ALL.into_iter().find(|pos| pos.as_str() == key)
    }
}

impl fmt::Display for MarginBoxPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarginBoxPosition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| Error::UnknownPreset {
            kind: "margin box position",
            name: s.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageChromeState {
    pub header_enabled: bool,
    pub header_text: String,
    pub header_position: MarginBoxPosition,
    pub header_font_size_pt: f64,
    pub footer_enabled: bool,
    pub footer_text: String,
    pub footer_position: MarginBoxPosition,
    /// Also used by the page-number box.
    pub footer_font_size_pt: f64,
    pub page_numbers_enabled: bool,
    pub page_number_position: MarginBoxPosition,
}

impl Default for PageChromeState {
    fn default() -> Self {
        Self {
            header_enabled: false,
            header_text: String::new(),
            header_position: MarginBoxPosition::TopCenter,
            header_font_size_pt: CHROME_FONT_SIZE_PT.default,
            footer_enabled: false,
            footer_text: String::new(),
            footer_position: MarginBoxPosition::BottomLeft,
            footer_font_size_pt: CHROME_FONT_SIZE_PT.default,
            page_numbers_enabled: true,
            page_number_position: MarginBoxPosition::BottomRight,
        }
    }
}

impl PageChromeState {
    pub fn set_header_font_size(&mut self, pt: f64) {
        self.header_font_size_pt = CHROME_FONT_SIZE_PT.clamp(pt);
    }

    pub fn set_footer_font_size(&mut self, pt: f64) {
        self.footer_font_size_pt = CHROME_FONT_SIZE_PT.clamp(pt);
    }

    pub fn clamped(mut self) -> Self {
        self.set_header_font_size(self.header_font_size_pt);
        self.set_footer_font_size(self.footer_font_size_pt);
        self
    }

    /// Header text, when the header is on and has something to show.
    pub fn active_header(&self) -> Option<&str> {
        active_text(self.header_enabled, &self.header_text)
    }

    pub fn active_footer(&self) -> Option<&str> {
        active_text(self.footer_enabled, &self.footer_text)
    }
}

/// Blank text leaves the box free; otherwise the text is shown as typed.
fn active_text(enabled: bool, text: &str) -> Option<&str> {
    (enabled && !text.trim().is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_sizes_clamp() {
        let mut chrome = PageChromeState::default();
        chrome.set_header_font_size(40.0);
        chrome.set_footer_font_size(1.0);
        assert_eq!(chrome.header_font_size_pt, 16.0);
        assert_eq!(chrome.footer_font_size_pt, 6.0);
    }

    #[test]
    fn blank_text_is_inactive() {
        let chrome = PageChromeState {
            header_enabled: true,
            header_text: "   ".to_string(),
            footer_enabled: false,
            footer_text: "Confidential".to_string(),
            ..PageChromeState::default()
        };
        assert_eq!(chrome.active_header(), None);
        assert_eq!(chrome.active_footer(), None);
    }

    #[test]
    fn active_text_keeps_spacing() {
        let chrome = PageChromeState {
            footer_enabled: true,
            footer_text: "  Draft ".to_string(),
            ..PageChromeState::default()
        };
        assert_eq!(chrome.active_footer(), Some("  Draft "));
    }

    #[test]
    fn positions_match_serde_names() {
        for pos in MarginBoxPosition::ALL {
            assert_eq!(serde_json::to_string(&pos).unwrap(), format!("\"{}\"", pos));
        }
        assert_eq!(MarginBoxPosition::from_key("middle"), None);
    }
}
