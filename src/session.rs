//! Live editor settings, kept consistent across every write path.

use log::debug;

use crate::chrome::PageChromeState;
use crate::css::{PagedCssInput, build_paged_document_css};
use crate::error::Result;
use crate::page::{PageMargins, PagePreset, PagePresetKey};
use crate::style::{StyleKey, StyleState, StyleUpdate};
use crate::styleset::StylesetState;
use crate::theme::{ThemePresetKey, ThemeSelection, apply_theme_preset, is_palette_style_key};

/// The configuration a user edits in one session.
///
/// Fields are private so the theme selection can never drift from the
/// palette: every palette write goes through [`set_style`](Self::set_style)
/// or [`apply_theme`](Self::apply_theme).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditorSession {
    theme: ThemeSelection,
    page: PagePresetKey,
    margins: PageMargins,
    style: StyleState,
    chrome: PageChromeState,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn theme(&self) -> ThemeSelection {
        self.theme
    }

    pub fn page(&self) -> PagePresetKey {
        self.page
    }

    pub fn page_preset(&self) -> PagePreset {
        self.page.preset()
    }

    pub fn margins(&self) -> PageMargins {
        self.margins
    }

    pub fn style(&self) -> &StyleState {
        &self.style
    }

    pub fn chrome(&self) -> &PageChromeState {
        &self.chrome
    }

    /// Edit chrome in place; font sizes are re-clamped afterwards.
    pub fn update_chrome(&mut self, edit: impl FnOnce(&mut PageChromeState)) {
        edit(&mut self.chrome);
        self.chrome = std::mem::take(&mut self.chrome).clamped();
    }

    pub fn apply_theme(&mut self, preset: ThemePresetKey) {
        self.style = apply_theme_preset(&self.style, preset);
        self.theme = ThemeSelection::Preset(preset);
    }

    pub fn set_style(&mut self, update: StyleUpdate) {
        if is_palette_style_key(update.key()) {
            self.theme = ThemeSelection::Custom;
        }
        self.style.apply(update);
    }

    /// Set a style field from an untyped key and value, as a form control would.
    pub fn set_style_field(&mut self, key: &str, value: &str) -> Result<()> {
        let key: StyleKey = key.parse()?;
        let update = StyleUpdate::parse(key, value)?;
        debug!("style update: {:?}", update);
        self.set_style(update);
        Ok(())
    }

    /// Switch page size; margins are re-clamped to the new page.
    pub fn set_page(&mut self, page: PagePresetKey) {
        self.page = page;
        self.margins = self.margins.clamped_to(&page.preset());
    }

    pub fn set_margins(&mut self, margins: PageMargins) {
        self.margins = margins.clamped_to(&self.page.preset());
    }

    pub fn to_styleset(&self) -> StylesetState {
        StylesetState {
            theme: self.theme,
            page: self.page,
            margins: self.margins,
            style: self.style.clone(),
            chrome: self.chrome.clone(),
        }
    }

    /// Replace every setting with an imported styleset.
    pub fn apply_styleset(&mut self, styleset: StylesetState) {
        self.page = styleset.page;
        self.margins = styleset.margins.clamped_to(&styleset.page.preset());
        self.theme = styleset.theme.reconcile(&styleset.style);
        self.style = styleset.style.clamped();
        self.chrome = styleset.chrome.clamped();
    }

    /// The paged-media stylesheet for the current settings.
    pub fn paged_css(&self) -> String {
        let page = self.page.preset();
        build_paged_document_css(&PagedCssInput {
            style: &self.style,
            page: &page,
            margins: self.margins,
            chrome: &self.chrome,
        })
    }
}

impl From<StylesetState> for EditorSession {
    fn from(styleset: StylesetState) -> Self {
        let mut session = EditorSession::default();
        session.apply_styleset(styleset);
        session
    }
}
