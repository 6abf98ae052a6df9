//! Theme presets and the palette/theme coupling.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use std::str::FromStr;

use crate::color::HexColor;
use crate::error::Error;
use crate::style::{StyleKey, StyleState};

/// The three palette fields a theme controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub background: HexColor,
    pub text: HexColor,
    pub accent: HexColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ThemePresetKey {
    Paper,
    Sepia,
    Slate,
    Forest,
    Midnight,
}

impl ThemePresetKey {
    pub const ALL: [ThemePresetKey; 5] = [
        ThemePresetKey::Paper,
        ThemePresetKey::Sepia,
        ThemePresetKey::Slate,
        ThemePresetKey::Forest,
        ThemePresetKey::Midnight,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ThemePresetKey::Paper => "paper",
            ThemePresetKey::Sepia => "sepia",
            ThemePresetKey::Slate => "slate",
            ThemePresetKey::Forest => "forest",
            ThemePresetKey::Midnight => "midnight",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemePresetKey::Paper => "Paper",
            ThemePresetKey::Sepia => "Sepia",
            ThemePresetKey::Slate => "Slate",
            ThemePresetKey::Forest => "Forest",
            ThemePresetKey::Midnight => "Midnight",
        }
    }

    /// Background, text and accent colors, in that order.
    fn colors(self) -> [&'static str; 3] {
        match self {
            ThemePresetKey::Paper => ["#ffffff", "#1f2328", "#0b62d6"],
            ThemePresetKey::Sepia => ["#f6efe2", "#3b2f22", "#9a4d1c"],
            ThemePresetKey::Slate => ["#f2f4f7", "#22303c", "#4a6fa5"],
            ThemePresetKey::Forest => ["#f3f7f1", "#1f2d24", "#2f7d4f"],
            ThemePresetKey::Midnight => ["#14171c", "#e3e6ea", "#7aa7ff"],
        }
    }

    pub fn palette(self) -> Palette {
        let [background, text, accent] = self.colors();
        Palette {
            background: HexColor::from_preset(background),
            text: HexColor::from_preset(text),
            accent: HexColor::from_preset(accent),
        }
    }

    pub fn from_key(key: &str) -> Option<ThemePresetKey> {
        Self::ALL.into_iter().find(|theme| theme.as_str() == key)
    }
}

impl FromStr for ThemePresetKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| Error::UnknownPreset {
            kind: "theme preset",
            name: s.to_string(),
        })
    }
}

/// Either a named preset or a hand-edited palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeSelection {
    Preset(ThemePresetKey),
    Custom,
}

impl ThemeSelection {
    pub const CUSTOM: &'static str = "custom";

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeSelection::Preset(key) => key.as_str(),
            ThemeSelection::Custom => Self::CUSTOM,
        }
    }

    pub fn from_key(key: &str) -> Option<ThemeSelection> {
        if key == Self::CUSTOM {
            return Some(ThemeSelection::Custom);
        }
        ThemePresetKey::from_key(key).map(ThemeSelection::Preset)
    }

    /// The selection that is consistent with `style`'s palette: `self` when it
    /// is custom or its preset matches exactly, otherwise custom.
    pub fn reconcile(self, style: &StyleState) -> ThemeSelection {
        match self {
            ThemeSelection::Preset(key) if palette_of(style) == key.palette() => self,
            _ => ThemeSelection::Custom,
        }
    }
}

impl Default for ThemeSelection {
    fn default() -> Self {
        ThemeSelection::Preset(ThemePresetKey::Paper)
    }
}

impl fmt::Display for ThemeSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ThemeSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ThemeSelection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ThemeSelection::from_key(&s)
            .ok_or_else(|| de::Error::custom(format!("unknown theme: {}", s)))
    }
}

fn palette_of(style: &StyleState) -> Palette {
    Palette {
        background: style.background.clone(),
        text: style.text.clone(),
        accent: style.accent.clone(),
    }
}

/// Overwrite the palette of `style` with `preset`'s colors. Typography is left alone.
pub fn apply_theme_preset(style: &StyleState, preset: ThemePresetKey) -> StyleState {
    let palette = preset.palette();
    StyleState {
        background: palette.background,
        text: palette.text,
        accent: palette.accent,
        ..style.clone()
    }
}

/// Whether editing `key` changes the palette, and so must flip the theme to custom.
pub fn is_palette_style_key(key: StyleKey) -> bool {
    matches!(key, StyleKey::Background | StyleKey::Text | StyleKey::Accent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{FontPresetKey, StyleUpdate};

    #[test]
    fn preset_overwrites_only_palette() {
        let mut style = StyleState::default();
        style.apply(StyleUpdate::BodyFontSize(21.0));
        style.apply(StyleUpdate::HeadingFont(FontPresetKey::Merriweather));
        style.apply(StyleUpdate::LetterSpacing(0.04));

        for preset in ThemePresetKey::ALL {
            let themed = apply_theme_preset(&style, preset);
            let palette = preset.palette();
            assert_eq!(themed.background, palette.background);
            assert_eq!(themed.text, palette.text);
            assert_eq!(themed.accent, palette.accent);

            let restored = StyleState {
                background: style.background.clone(),
                text: style.text.clone(),
                accent: style.accent.clone(),
                ..themed
            };
            assert_eq!(restored, style);
        }
    }

    #[test]
    fn palette_keys() {
        let palette: Vec<_> = StyleKey::ALL
            .into_iter()
            .filter(|key| is_palette_style_key(*key))
            .collect();
        assert_eq!(palette, [StyleKey::Background, StyleKey::Text, StyleKey::Accent]);
    }

    #[test]
    fn preset_colors_are_valid_hex() {
        for preset in ThemePresetKey::ALL {
            for color in preset.colors() {
                assert!(HexColor::parse(color).is_some(), "{} in {}", color, preset.as_str());
            }
        }
    }

    #[test]
    fn selection_names() {
        assert_eq!(ThemeSelection::from_key("custom"), Some(ThemeSelection::Custom));
        assert_eq!(
            ThemeSelection::from_key("sepia"),
            Some(ThemeSelection::Preset(ThemePresetKey::Sepia))
        );
        assert_eq!(ThemeSelection::from_key("neon"), None);
    }

    #[test]
    fn reconcile_detects_drift() {
        let style = apply_theme_preset(&StyleState::default(), ThemePresetKey::Forest);
        let forest = ThemeSelection::Preset(ThemePresetKey::Forest);
        assert_eq!(forest.reconcile(&style), forest);
        assert_eq!(
            ThemeSelection::Preset(ThemePresetKey::Sepia).reconcile(&style),
            ThemeSelection::Custom
        );
    }
}
