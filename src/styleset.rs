//! Versioned styleset files.
//!
//! Import is strict at the top level (the text must be a JSON object carrying
//! `"version": 1`) and lenient below it: every field is read on its own,
//! checked against its legal domain, and replaced by its default when absent,
//! mistyped or out of range. Old or hand-edited files therefore degrade one
//! field at a time instead of being rejected.

use log::debug;
use serde_json::{Map, Value, json};

use crate::chrome::{CHROME_FONT_SIZE_PT, MarginBoxPosition, PageChromeState};
use crate::color::HexColor;
use crate::error::StylesetError;
use crate::page::{PageMargins, PagePresetKey};
use crate::style::{
    BODY_FONT_SIZE, Bounds, FontPresetKey, HEADING_BASE_SIZE, LETTER_SPACING, LINE_HEIGHT,
    PARAGRAPH_SPACING, StyleState,
};
use crate::theme::ThemeSelection;

pub const STYLESET_VERSION: u64 = 1;

/// Everything needed to reproduce a document's look.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StylesetState {
    pub theme: ThemeSelection,
    pub page: PagePresetKey,
    pub margins: PageMargins,
    pub style: StyleState,
    pub chrome: PageChromeState,
}

impl StylesetState {
    pub fn to_json(&self) -> String {
        serialize_styleset(self)
    }

    pub fn from_json(text: &str) -> Result<StylesetState, StylesetError> {
        parse_styleset(text)
    }
}

/// Encode a styleset as pretty-printed JSON.
pub fn serialize_styleset(styleset: &StylesetState) -> String {
    let document = json!({
        "version": STYLESET_VERSION,
        "themePreset": styleset.theme.as_str(),
        "pagePreset": styleset.page.as_str(),
        "horizontalMarginMm": styleset.margins.horizontal_mm,
        "verticalMarginMm": styleset.margins.vertical_mm,
        "style": styleset.style,
        "pageChrome": styleset.chrome,
    });
    format!("{:#}", document)
}

/// Decode a styleset from untrusted JSON text.
///
/// Fails only when the text is not a JSON object or its version is not
/// [`STYLESET_VERSION`].
pub fn parse_styleset(text: &str) -> Result<StylesetState, StylesetError> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Object(root) = value else {
        return Err(StylesetError::NotAnObject);
    };

    match root.get("version") {
        // 1.0 is still version 1
        Some(version) if version.as_f64() == Some(STYLESET_VERSION as f64) => {}
        Some(version) => return Err(StylesetError::UnsupportedVersion(version.to_string())),
        None => return Err(StylesetError::UnsupportedVersion("missing".to_string())),
    }

    let top = Fields::new("styleset", Some(&root));
    let page = top.enumerated("pagePreset", PagePresetKey::from_key, PagePresetKey::default());
    let style = read_style(&top.nested("style"));
    let chrome = read_chrome(&top.nested("pageChrome"));
    let margins = read_margins(&top).clamped_to(&page.preset());
    let theme = top
        .enumerated("themePreset", ThemeSelection::from_key, ThemeSelection::default())
        .reconcile(&style);

    Ok(StylesetState {
        theme,
        page,
        margins,
        style,
        chrome,
    })
}

fn read_style(fields: &Fields) -> StyleState {
    let defaults = StyleState::default();
    StyleState {
        body_font: fields.enumerated("bodyFont", FontPresetKey::from_key, defaults.body_font),
        heading_font: fields.enumerated("headingFont", FontPresetKey::from_key, defaults.heading_font),
        body_font_size: fields.number("bodyFontSize", BODY_FONT_SIZE),
        heading_base_size: fields.number("headingBaseSize", HEADING_BASE_SIZE),
        line_height: fields.number("lineHeight", LINE_HEIGHT),
        paragraph_spacing: fields.number("paragraphSpacing", PARAGRAPH_SPACING),
        letter_spacing: fields.number("letterSpacing", LETTER_SPACING),
        background: fields.color("background", defaults.background),
        text: fields.color("text", defaults.text),
        accent: fields.color("accent", defaults.accent),
    }
}

fn read_chrome(fields: &Fields) -> PageChromeState {
    let defaults = PageChromeState::default();
    let position = |key, default| fields.enumerated(key, MarginBoxPosition::from_key, default);
    PageChromeState {
        header_enabled: fields.boolean("headerEnabled", defaults.header_enabled),
        header_text: fields.string("headerText", defaults.header_text),
        header_position: position("headerPosition", defaults.header_position),
        header_font_size_pt: fields.number("headerFontSizePt", CHROME_FONT_SIZE_PT),
        footer_enabled: fields.boolean("footerEnabled", defaults.footer_enabled),
        footer_text: fields.string("footerText", defaults.footer_text),
        footer_position: position("footerPosition", defaults.footer_position),
        footer_font_size_pt: fields.number("footerFontSizePt", CHROME_FONT_SIZE_PT),
        page_numbers_enabled: fields.boolean("pageNumbersEnabled", defaults.page_numbers_enabled),
        page_number_position: position("pageNumberPosition", defaults.page_number_position),
    }
}

/// Per-axis margins, falling back to a single shared `marginMm` from older files.
/// Values are only checked for shape here; the caller clamps them to the page.
fn read_margins(fields: &Fields) -> PageMargins {
    let defaults = PageMargins::default();
    let has_axes = fields.get("horizontalMarginMm").is_some() || fields.get("verticalMarginMm").is_some();
    if !has_axes {
        if let Some(shared) = fields.get("marginMm") {
            return match margin_value(shared) {
                Some(mm) => PageMargins::uniform(mm),
                None => fields.fallback("marginMm", Some(shared), defaults),
            };
        }
    }
    PageMargins {
        horizontal_mm: fields.margin("horizontalMarginMm", defaults.horizontal_mm),
        vertical_mm: fields.margin("verticalMarginMm", defaults.vertical_mm),
    }
}

fn margin_value(value: &Value) -> Option<f64> {
    value.as_f64().filter(|mm| mm.is_finite() && *mm >= 0.0)
}

/// A JSON object section read field by field with defaults.
struct Fields<'a> {
    section: &'static str,
    map: Option<&'a Map<String, Value>>,
}

impl<'a> Fields<'a> {
    fn new(section: &'static str, map: Option<&'a Map<String, Value>>) -> Self {
        Self { section, map }
    }

    /// A child object; anything that is not an object reads as empty.
    fn nested(&self, key: &'static str) -> Fields<'a> {
        let value = self.get(key);
        let map = value.and_then(Value::as_object);
        if value.is_some() && map.is_none() {
            debug!("styleset: {}.{} is not an object, using defaults", self.section, key);
        }
        Fields::new(key, map)
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.and_then(|map| map.get(key))
    }

    fn fallback<T>(&self, key: &str, found: Option<&Value>, default: T) -> T {
        if let Some(found) = found {
            debug!("styleset: {}.{} = {} is invalid, using default", self.section, key, found);
        }
        default
    }

    fn number(&self, key: &str, bounds: Bounds) -> f64 {
        let found = self.get(key);
        match found.and_then(Value::as_f64) {
            Some(v) if bounds.contains(v) => v,
            _ => self.fallback(key, found, bounds.default),
        }
    }

    fn margin(&self, key: &str, default: f64) -> f64 {
        let found = self.get(key);
        match found.and_then(margin_value) {
            Some(mm) => mm,
            None => self.fallback(key, found, default),
        }
    }

    fn boolean(&self, key: &str, default: bool) -> bool {
        let found = self.get(key);
        match found.and_then(Value::as_bool) {
            Some(b) => b,
            None => self.fallback(key, found, default),
        }
    }

    fn string(&self, key: &str, default: String) -> String {
        let found = self.get(key);
        match found.and_then(Value::as_str) {
            Some(s) => s.to_string(),
            None => self.fallback(key, found, default),
        }
    }

    fn color(&self, key: &str, default: HexColor) -> HexColor {
        let found = self.get(key);
        match found.and_then(Value::as_str).and_then(HexColor::parse) {
            Some(color) => color,
            None => self.fallback(key, found, default),
        }
    }

    fn enumerated<T>(&self, key: &str, from_key: impl Fn(&str) -> Option<T>, default: T) -> T {
        let found = self.get(key);
        match found.and_then(Value::as_str).and_then(from_key) {
            Some(v) => v,
            None => self.fallback(key, found, default),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleUpdate;
    use crate::theme::{ThemePresetKey, apply_theme_preset};

    fn custom_styleset() -> StylesetState {
        let mut style = apply_theme_preset(&StyleState::default(), ThemePresetKey::Sepia);
        style.apply(StyleUpdate::BodyFontSize(15.5));
        style.apply(StyleUpdate::LineHeight(1.4));
        style.apply(StyleUpdate::HeadingFont(FontPresetKey::Merriweather));
        StylesetState {
            theme: ThemeSelection::Preset(ThemePresetKey::Sepia),
            page: PagePresetKey::Letter,
            margins: PageMargins {
                horizontal_mm: 22.5,
                vertical_mm: 30.0,
            },
            style,
            chrome: PageChromeState {
                header_enabled: true,
                header_text: "Quarterly \"draft\" report".to_string(),
                header_position: MarginBoxPosition::TopLeft,
                header_font_size_pt: 11.0,
                footer_enabled: true,
                footer_text: "ACME Corp".to_string(),
                footer_position: MarginBoxPosition::BottomCenter,
                footer_font_size_pt: 8.0,
                page_numbers_enabled: true,
                page_number_position: MarginBoxPosition::BottomCenter,
            },
        }
    }

    #[test]
    fn round_trip() {
        for styleset in [StylesetState::default(), custom_styleset()] {
            let json = serialize_styleset(&styleset);
            assert_eq!(parse_styleset(&json).unwrap(), styleset);
        }
    }

    #[test]
    fn serialized_shape() {
        let json: Value = serde_json::from_str(&serialize_styleset(&custom_styleset())).unwrap();
        assert_eq!(json["version"], 1);
        assert_eq!(json["themePreset"], "sepia");
        assert_eq!(json["pagePreset"], "letter");
        assert_eq!(json["horizontalMarginMm"], 22.5);
        assert_eq!(json["style"]["bodyFontSize"], 15.5);
        assert_eq!(json["style"]["headingFont"], "merriweather");
        assert_eq!(json["pageChrome"]["footerPosition"], "bottom-center");
    }

    #[test]
    fn rejects_unsupported_version() {
        assert!(matches!(
            parse_styleset(r#"{"version":2}"#),
            Err(StylesetError::UnsupportedVersion(_))
        ));
        assert!(matches!(
            parse_styleset(r#"{"version":"1"}"#),
            Err(StylesetError::UnsupportedVersion(_))
        ));
        assert!(matches!(
            parse_styleset(r#"{"themePreset":"paper"}"#),
            Err(StylesetError::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn float_version_one_is_accepted() {
        let styleset = parse_styleset(r#"{"version":1.0,"pagePreset":"legal"}"#).unwrap();
        assert_eq!(styleset.page, PagePresetKey::Legal);
        assert!(matches!(
            parse_styleset(r#"{"version":1.5}"#),
            Err(StylesetError::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(parse_styleset("{version: 1"), Err(StylesetError::InvalidJson(_))));
        assert!(matches!(parse_styleset("[1]"), Err(StylesetError::NotAnObject)));
    }

    #[test]
    fn out_of_range_number_uses_default() {
        let parsed = parse_styleset(r#"{"version":1,"style":{"bodyFontSize":999,"lineHeight":1.8}}"#).unwrap();
        assert_eq!(parsed.style.body_font_size, BODY_FONT_SIZE.default);
        assert_eq!(parsed.style.line_height, 1.8);
    }

    #[test]
    fn bad_fields_default_individually() {
        let parsed = parse_styleset(
            r##"{
                "version": 1,
                "themePreset": "neon",
                "pagePreset": "a5",
                "style": {"bodyFont": "comicSans", "accent": "#ABCDEF", "text": "black", "letterSpacing": "wide"},
                "pageChrome": {"headerEnabled": "yes", "footerEnabled": true, "footerText": 42,
                               "pageNumberPosition": "top-right", "headerFontSizePt": 40}
            }"##,
        )
        .unwrap();
        let style_defaults = StyleState::default();
        let chrome_defaults = PageChromeState::default();

        assert_eq!(parsed.page, PagePresetKey::A5);
        assert_eq!(parsed.style.body_font, style_defaults.body_font);
        assert_eq!(parsed.style.accent.as_str(), "#abcdef");
        assert_eq!(parsed.style.text, style_defaults.text);
        assert_eq!(parsed.style.letter_spacing, LETTER_SPACING.default);
        assert!(!parsed.chrome.header_enabled);
        assert!(parsed.chrome.footer_enabled);
        assert_eq!(parsed.chrome.footer_text, chrome_defaults.footer_text);
        assert_eq!(parsed.chrome.page_number_position, MarginBoxPosition::TopRight);
        assert_eq!(parsed.chrome.header_font_size_pt, CHROME_FONT_SIZE_PT.default);
        // The accent no longer matches the default preset
        assert_eq!(parsed.theme, ThemeSelection::Custom);
    }

    #[test]
    fn non_object_sections_read_as_defaults() {
        let parsed = parse_styleset(r#"{"version":1,"style":"bold","pageChrome":null}"#).unwrap();
        assert_eq!(parsed.style, StyleState::default());
        assert_eq!(parsed.chrome, PageChromeState::default());
        assert_eq!(parsed.theme, ThemeSelection::default());
    }

    #[test]
    fn margins_clamp_to_selected_page() {
        let parsed = parse_styleset(
            r#"{"version":1,"pagePreset":"a5","horizontalMarginMm":500,"verticalMarginMm":3}"#,
        )
        .unwrap();
        assert_eq!(parsed.margins.horizontal_mm, 62.0);
        assert_eq!(parsed.margins.vertical_mm, 8.0);
    }

    #[test]
    fn shared_margin_from_older_files() {
        let parsed = parse_styleset(r#"{"version":1,"marginMm":14}"#).unwrap();
        assert_eq!(parsed.margins, PageMargins::uniform(14.0));

        let parsed = parse_styleset(r#"{"version":1,"marginMm":"wide"}"#).unwrap();
        assert_eq!(parsed.margins, PageMargins::default());

        // Per-axis fields win when present
        let parsed = parse_styleset(r#"{"version":1,"marginMm":14,"verticalMarginMm":25}"#).unwrap();
        assert_eq!(parsed.margins.horizontal_mm, PageMargins::default().horizontal_mm);
        assert_eq!(parsed.margins.vertical_mm, 25.0);
    }

    #[test]
    fn custom_theme_is_kept() {
        let mut styleset = StylesetState::default();
        styleset.theme = ThemeSelection::Custom;
        let parsed = parse_styleset(&serialize_styleset(&styleset)).unwrap();
        assert_eq!(parsed.theme, ThemeSelection::Custom);
    }
}
