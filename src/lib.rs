mod chrome;
mod color;
mod config;
mod css;
mod error;
mod markdown;
mod page;
mod paper;
mod pdf_plan;
mod preview;
mod session;
mod style;
mod styleset;
mod theme;
mod toolbar;
mod util;

pub use chrome::{CHROME_FONT_SIZE_PT, MarginBoxPosition, PageChromeState};
pub use color::HexColor;
pub use config::{ChromeConfig, Config, PageConfig, StyleConfig, ThemeConfig};
pub use css::{
    DOCUMENT_CLASS, MarginBox, MarginSource, PagedCssInput, SIGNATURE_LINE_CLASS,
    build_paged_document_css, css_string, margin_box_content, resolve_margin_boxes,
};
pub use error::{CollaboratorError, Error, Result, StylesetError};
pub use markdown::{
    document_title, prepare_markdown_for_render, render_html, render_html_document,
    signature_placeholder,
};
pub use page::{
    MIN_MARGIN_MM, PageMargins, PagePreset, PagePresetKey, clamp_horizontal_margin,
    clamp_shared_margin, clamp_vertical_margin,
};
pub use paper::{PaperLayout, build_paper_layout};
pub use pdf_plan::{PdfImageInput, PdfImagePlan, PdfImageSink, build_pdf_image_plan, place_image_plan};
pub use preview::{Paginator, PreviewCoordinator, PreviewStatus, RenderHandle, RenderTicket};
pub use session::EditorSession;
pub use style::{Bounds, FontPresetKey, StyleKey, StyleState, StyleUpdate};
pub use styleset::{STYLESET_VERSION, StylesetState, parse_styleset, serialize_styleset};
pub use theme::{Palette, ThemePresetKey, ThemeSelection, apply_theme_preset, is_palette_style_key};
pub use toolbar::{MarkdownEdit, Selection, ToolbarAction};
pub use util::{clamp, word_count};

/// Stylesheet for a styleset, as handed to the paginator.
pub fn styleset_to_css(styleset: &StylesetState) -> String {
    let page = styleset.page.preset();
    build_paged_document_css(&PagedCssInput {
        style: &styleset.style,
        page: &page,
        margins: styleset.margins,
        chrome: &styleset.chrome,
    })
}

/// Convert markdown to a standalone, print-ready HTML document.
pub fn markdown_to_html_document(markdown: &str, styleset: &StylesetState) -> String {
    render_html_document(markdown, &styleset_to_css(styleset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_document_carries_page_rule() {
        let mut styleset = StylesetState::default();
        styleset.page = PagePresetKey::A5;
        let doc = markdown_to_html_document("# Memo\n\nSigned: ________", &styleset);
        assert!(doc.contains("size: 148mm 210mm;"));
        assert!(doc.contains("<article class=\"md-document\">"));
        assert!(doc.contains("width: 8ch"));
    }

    #[test]
    fn session_and_styleset_css_agree() {
        let mut session = EditorSession::new();
        session.apply_theme(ThemePresetKey::Sepia);
        assert_eq!(session.paged_css(), styleset_to_css(&session.to_styleset()));
    }
}
