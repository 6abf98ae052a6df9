use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::chrome::MarginBoxPosition;
use crate::color::HexColor;
use crate::error::{Error, Result};
use crate::page::{PageMargins, PagePresetKey};
use crate::session::EditorSession;
use crate::style::{FontPresetKey, StyleUpdate};
use crate::theme::ThemePresetKey;

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Session defaults read from TOML. Every key is optional.
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub page: PageConfig,
    pub theme: ThemeConfig,
    pub style: StyleConfig,
    pub chrome: ChromeConfig,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PageConfig {
    pub preset: Option<PagePresetKey>,
    pub horizontal_margin_mm: Option<f64>,
    pub vertical_margin_mm: Option<f64>,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ThemeConfig {
    pub preset: Option<ThemePresetKey>,
}

/// Overrides applied after the theme, so palette keys here make the theme custom.
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct StyleConfig {
    pub body_font: Option<FontPresetKey>,
    pub heading_font: Option<FontPresetKey>,
    pub body_font_size: Option<f64>,
    pub heading_base_size: Option<f64>,
    pub line_height: Option<f64>,
    pub paragraph_spacing: Option<f64>,
    pub letter_spacing: Option<f64>,
    pub background: Option<HexColor>,
    pub text: Option<HexColor>,
    pub accent: Option<HexColor>,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ChromeConfig {
    pub header_enabled: Option<bool>,
    pub header_text: Option<String>,
    pub header_position: Option<MarginBoxPosition>,
    pub header_font_size_pt: Option<f64>,
    pub footer_enabled: Option<bool>,
    pub footer_text: Option<String>,
    pub footer_position: Option<MarginBoxPosition>,
    pub footer_font_size_pt: Option<f64>,
    pub page_numbers_enabled: Option<bool>,
    pub page_number_position: Option<MarginBoxPosition>,
}

impl StyleConfig {
    fn updates(&self) -> Vec<StyleUpdate> {
        let mut updates = Vec::new();
        if let Some(font) = self.body_font {
            updates.push(StyleUpdate::BodyFont(font));
        }
        if let Some(font) = self.heading_font {
            updates.push(StyleUpdate::HeadingFont(font));
        }
        if let Some(v) = self.body_font_size {
            updates.push(StyleUpdate::BodyFontSize(v));
        }
        if let Some(v) = self.heading_base_size {
            updates.push(StyleUpdate::HeadingBaseSize(v));
        }
        if let Some(v) = self.line_height {
            updates.push(StyleUpdate::LineHeight(v));
        }
        if let Some(v) = self.paragraph_spacing {
            updates.push(StyleUpdate::ParagraphSpacing(v));
        }
        if let Some(v) = self.letter_spacing {
            updates.push(StyleUpdate::LetterSpacing(v));
        }
        if let Some(c) = &self.background {
            updates.push(StyleUpdate::Background(c.clone()));
        }
        if let Some(c) = &self.text {
            updates.push(StyleUpdate::Text(c.clone()));
        }
        if let Some(c) = &self.accent {
            updates.push(StyleUpdate::Accent(c.clone()));
        }
        updates
    }
}

impl Config {
    /// The defaults compiled into the binary.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, or return compiled defaults if it is
    /// missing or invalid.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
                warn!("ignoring invalid config {}: {}", path.display(), e);
                Self::compiled_default()
            }),
            Err(_) => Self::compiled_default(),
        }
    }

    /// Load config from a TOML file, reporting any problem.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Build a session, routing every value through the session's setters.
    pub fn to_session(&self) -> EditorSession {
        let mut session = EditorSession::new();

        if let Some(preset) = self.theme.preset {
            session.apply_theme(preset);
        }
        for update in self.style.updates() {
            session.set_style(update);
        }

        if let Some(page) = self.page.preset {
            session.set_page(page);
        }
        let defaults = session.margins();
        session.set_margins(PageMargins {
            horizontal_mm: self.page.horizontal_margin_mm.unwrap_or(defaults.horizontal_mm),
            vertical_mm: self.page.vertical_margin_mm.unwrap_or(defaults.vertical_mm),
        });

        let chrome_config = &self.chrome;
        session.update_chrome(|chrome| {
            if let Some(v) = chrome_config.header_enabled {
                chrome.header_enabled = v;
            }
            if let Some(v) = &chrome_config.header_text {
                chrome.header_text = v.clone();
            }
            if let Some(v) = chrome_config.header_position {
                chrome.header_position = v;
            }
            if let Some(v) = chrome_config.header_font_size_pt {
                chrome.set_header_font_size(v);
            }
            if let Some(v) = chrome_config.footer_enabled {
                chrome.footer_enabled = v;
            }
            if let Some(v) = &chrome_config.footer_text {
                chrome.footer_text = v.clone();
            }
            if let Some(v) = chrome_config.footer_position {
                chrome.footer_position = v;
            }
            if let Some(v) = chrome_config.footer_font_size_pt {
                chrome.set_footer_font_size(v);
            }
            if let Some(v) = chrome_config.page_numbers_enabled {
                chrome.page_numbers_enabled = v;
            }
            if let Some(v) = chrome_config.page_number_position {
                chrome.page_number_position = v;
            }
        });

        session
    }
}
