//! Typography and palette state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::color::HexColor;
use crate::error::Error;
use crate::theme::ThemePresetKey;
use crate::util::clamp;

/// Legal range and default for a numeric setting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64, default: f64) -> Self {
        Self { min, max, default }
    }

    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        clamp(value, self.min, self.max)
    }
}

/// Body font size in px.
pub const BODY_FONT_SIZE: Bounds = Bounds::new(13.0, 24.0, 17.0);
/// Heading base size in px; h3 renders at exactly this size.
pub const HEADING_BASE_SIZE: Bounds = Bounds::new(16.0, 36.0, 24.0);
/// Unitless line-height multiplier.
pub const LINE_HEIGHT: Bounds = Bounds::new(1.25, 2.0, 1.65);
/// Block spacing in rem.
pub const PARAGRAPH_SPACING: Bounds = Bounds::new(0.4, 2.0, 1.0);
/// Letter spacing in em.
pub const LETTER_SPACING: Bounds = Bounds::new(-0.05, 0.12, 0.0);

/// Selectable font families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontPresetKey {
    System,
    Inter,
    SourceSerif,
    Merriweather,
    IbmPlexSans,
    JetbrainsMono,
}

impl FontPresetKey {
    pub const ALL: [FontPresetKey; 6] = [
        FontPresetKey::System,
        FontPresetKey::Inter,
        FontPresetKey::SourceSerif,
        FontPresetKey::Merriweather,
        FontPresetKey::IbmPlexSans,
        FontPresetKey::JetbrainsMono,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FontPresetKey::System => "system",
            FontPresetKey::Inter => "inter",
            FontPresetKey::SourceSerif => "sourceSerif",
            FontPresetKey::Merriweather => "merriweather",
            FontPresetKey::IbmPlexSans => "ibmPlexSans",
            FontPresetKey::JetbrainsMono => "jetbrainsMono",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FontPresetKey::System => "System UI",
            FontPresetKey::Inter => "Inter",
            FontPresetKey::SourceSerif => "Source Serif",
            FontPresetKey::Merriweather => "Merriweather",
            FontPresetKey::IbmPlexSans => "IBM Plex Sans",
            FontPresetKey::JetbrainsMono => "JetBrains Mono",
        }
    }

    /// CSS `font-family` value.
    pub fn stack(self) -> &'static str {
        match self {
            FontPresetKey::System => {
                "system-ui, -apple-system, \"Segoe UI\", Roboto, \"Helvetica Neue\", Arial, sans-serif"
            }
            FontPresetKey::Inter => "\"Inter\", \"Helvetica Neue\", Arial, sans-serif",
            FontPresetKey::SourceSerif => "\"Source Serif 4\", \"Source Serif Pro\", Georgia, serif",
            FontPresetKey::Merriweather => "\"Merriweather\", Georgia, \"Times New Roman\", serif",
            FontPresetKey::IbmPlexSans => "\"IBM Plex Sans\", \"Helvetica Neue\", Arial, sans-serif",
            FontPresetKey::JetbrainsMono => {
                "\"JetBrains Mono\", \"SFMono-Regular\", Menlo, Consolas, monospace"
            }
        }
    }

    pub fn from_key(key: &str) -> Option<FontPresetKey> {
        Self::ALL.into_iter().find(|font| font.as_str() == key)
    }
}

impl FromStr for FontPresetKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| Error::UnknownPreset {
            kind: "font preset",
            name: s.to_string(),
        })
    }
}

/// Typography and palette for the rendered document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleState {
    pub body_font: FontPresetKey,
    pub heading_font: FontPresetKey,
    pub body_font_size: f64,
    pub heading_base_size: f64,
    pub line_height: f64,
    pub paragraph_spacing: f64,
    pub letter_spacing: f64,
    pub background: HexColor,
    pub text: HexColor,
    pub accent: HexColor,
}

impl Default for StyleState {
    fn default() -> Self {
        let palette = ThemePresetKey::Paper.palette();
        Self {
            body_font: FontPresetKey::SourceSerif,
            heading_font: FontPresetKey::Inter,
            body_font_size: BODY_FONT_SIZE.default,
            heading_base_size: HEADING_BASE_SIZE.default,
            line_height: LINE_HEIGHT.default,
            paragraph_spacing: PARAGRAPH_SPACING.default,
            letter_spacing: LETTER_SPACING.default,
            background: palette.background,
            text: palette.text,
            accent: palette.accent,
        }
    }
}

impl StyleState {
    /// Apply a single field update. Numeric values are clamped into range.
    ///
    /// This does not touch the theme selection; go through
    /// [`EditorSession::set_style`](crate::session::EditorSession::set_style)
    /// to keep it synchronized.
    pub fn apply(&mut self, update: StyleUpdate) {
        match update {
            StyleUpdate::BodyFont(font) => self.body_font = font,
            StyleUpdate::HeadingFont(font) => self.heading_font = font,
            StyleUpdate::BodyFontSize(v) => self.body_font_size = BODY_FONT_SIZE.clamp(v),
            StyleUpdate::HeadingBaseSize(v) => self.heading_base_size = HEADING_BASE_SIZE.clamp(v),
            StyleUpdate::LineHeight(v) => self.line_height = LINE_HEIGHT.clamp(v),
            StyleUpdate::ParagraphSpacing(v) => self.paragraph_spacing = PARAGRAPH_SPACING.clamp(v),
            StyleUpdate::LetterSpacing(v) => self.letter_spacing = LETTER_SPACING.clamp(v),
            StyleUpdate::Background(c) => self.background = c,
            StyleUpdate::Text(c) => self.text = c,
            StyleUpdate::Accent(c) => self.accent = c,
        }
    }

    /// Bring every numeric field back within its bounds.
    pub fn clamped(mut self) -> Self {
        self.body_font_size = BODY_FONT_SIZE.clamp(self.body_font_size);
        self.heading_base_size = HEADING_BASE_SIZE.clamp(self.heading_base_size);
        self.line_height = LINE_HEIGHT.clamp(self.line_height);
        self.paragraph_spacing = PARAGRAPH_SPACING.clamp(self.paragraph_spacing);
        self.letter_spacing = LETTER_SPACING.clamp(self.letter_spacing);
        self
    }
}

/// Names of the fields of [`StyleState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKey {
    BodyFont,
    HeadingFont,
    BodyFontSize,
    HeadingBaseSize,
    LineHeight,
    ParagraphSpacing,
    LetterSpacing,
    Background,
    Text,
    Accent,
}

impl StyleKey {
    pub const ALL: [StyleKey; 10] = [
        StyleKey::BodyFont,
        StyleKey::HeadingFont,
        StyleKey::BodyFontSize,
        StyleKey::HeadingBaseSize,
        StyleKey::LineHeight,
        StyleKey::ParagraphSpacing,
        StyleKey::LetterSpacing,
        StyleKey::Background,
        StyleKey::Text,
        StyleKey::Accent,
    ];

    /// The field's name in styleset JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            StyleKey::BodyFont => "bodyFont",
            StyleKey::HeadingFont => "headingFont",
            StyleKey::BodyFontSize => "bodyFontSize",
            StyleKey::HeadingBaseSize => "headingBaseSize",
            StyleKey::LineHeight => "lineHeight",
            StyleKey::ParagraphSpacing => "paragraphSpacing",
            StyleKey::LetterSpacing => "letterSpacing",
            StyleKey::Background => "background",
            StyleKey::Text => "text",
            StyleKey::Accent => "accent",
        }
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StyleKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| Error::UnknownStyleKey(s.to_string()))
    }
}

/// A typed write to one field of [`StyleState`].
#[derive(Debug, Clone, PartialEq)]
pub enum StyleUpdate {
    BodyFont(FontPresetKey),
    HeadingFont(FontPresetKey),
    BodyFontSize(f64),
    HeadingBaseSize(f64),
    LineHeight(f64),
    ParagraphSpacing(f64),
    LetterSpacing(f64),
    Background(HexColor),
    Text(HexColor),
    Accent(HexColor),
}

impl StyleUpdate {
    pub fn key(&self) -> StyleKey {
        match self {
            StyleUpdate::BodyFont(_) => StyleKey::BodyFont,
            StyleUpdate::HeadingFont(_) => StyleKey::HeadingFont,
            StyleUpdate::BodyFontSize(_) => StyleKey::BodyFontSize,
            StyleUpdate::HeadingBaseSize(_) => StyleKey::HeadingBaseSize,
            StyleUpdate::LineHeight(_) => StyleKey::LineHeight,
            StyleUpdate::ParagraphSpacing(_) => StyleKey::ParagraphSpacing,
            StyleUpdate::LetterSpacing(_) => StyleKey::LetterSpacing,
            StyleUpdate::Background(_) => StyleKey::Background,
            StyleUpdate::Text(_) => StyleKey::Text,
            StyleUpdate::Accent(_) => StyleKey::Accent,
        }
    }

    /// Build an update from an untyped `key=value` pair.
    pub fn parse(key: StyleKey, value: &str) -> Result<StyleUpdate, Error> {
        let value = value.trim();
        let invalid = || Error::InvalidStyleValue {
            key: key.as_str(),
            value: value.to_string(),
        };
        let number = || value.parse::<f64>().ok().filter(|v| v.is_finite()).ok_or_else(invalid);
        let font = || FontPresetKey::from_key(value).ok_or_else(invalid);
        let color = || HexColor::parse(value).ok_or_else(invalid);

        Ok(match key {
            StyleKey::BodyFont => StyleUpdate::BodyFont(font()?),
            StyleKey::HeadingFont => StyleUpdate::HeadingFont(font()?),
            StyleKey::BodyFontSize => StyleUpdate::BodyFontSize(number()?),
            StyleKey::HeadingBaseSize => StyleUpdate::HeadingBaseSize(number()?),
            StyleKey::LineHeight => StyleUpdate::LineHeight(number()?),
            StyleKey::ParagraphSpacing => StyleUpdate::ParagraphSpacing(number()?),
            StyleKey::LetterSpacing => StyleUpdate::LetterSpacing(number()?),
            StyleKey::Background => StyleUpdate::Background(color()?),
            StyleKey::Text => StyleUpdate::Text(color()?),
            StyleKey::Accent => StyleUpdate::Accent(color()?),
        })
    }
}
