//! Paged-media stylesheet generation.
//!
//! The output is handed to the external paginator together with the rendered
//! markdown. It carries the `@page` box (size, margins, six margin boxes for
//! running content) and the document typography derived from [`StyleState`].

use log::debug;

use crate::chrome::{MarginBoxPosition, PageChromeState};
use crate::page::{PageMargins, PagePreset};
use crate::style::{FontPresetKey, StyleState};
use crate::util::fmt_num;

/// Class of the element wrapping the rendered markdown.
pub const DOCUMENT_CLASS: &str = "md-document";
/// Class of the inline element standing in for a signature line.
pub const SIGNATURE_LINE_CLASS: &str = "signature-line";
/// Placed between sources that share a margin box.
pub const MARGIN_BOX_SEPARATOR: &str = " · ";

/// Heading sizes as multiples of the heading base size, h1 through h6.
pub const HEADING_SCALE: [f64; 6] = [1.625, 1.25, 1.0, 0.82, 0.68, 0.58];
const HEADING_MARGIN_TOP: f64 = 1.45;
const HEADING_MARGIN_BOTTOM: f64 = 0.6;

pub struct PagedCssInput<'a> {
    pub style: &'a StyleState,
    pub page: &'a PagePreset,
    pub margins: PageMargins,
    pub chrome: &'a PageChromeState,
}

/// Something that can occupy a page margin box.
#[derive(Debug, Clone, PartialEq)]
pub enum MarginSource<'a> {
    Header(&'a str),
    Footer(&'a str),
    PageNumber,
}

/// Resolved contents of one margin box.
#[derive(Debug, Clone, PartialEq)]
pub struct MarginBox<'a> {
    pub position: MarginBoxPosition,
    /// Header, footer, page number; in that order when more than one lands here.
    pub sources: Vec<MarginSource<'a>>,
    /// Size of the first source, when the box is occupied.
    pub font_size_pt: Option<f64>,
}

/// Route the active running sources into the six margin boxes.
pub fn resolve_margin_boxes(chrome: &PageChromeState) -> Vec<MarginBox<'_>> {
    let mut routed: Vec<(MarginBoxPosition, MarginSource, f64)> = Vec::with_capacity(3);
    if let Some(text) = chrome.active_header() {
        routed.push((chrome.header_position, MarginSource::Header(text), chrome.header_font_size_pt));
    }
    if let Some(text) = chrome.active_footer() {
        routed.push((chrome.footer_position, MarginSource::Footer(text), chrome.footer_font_size_pt));
    }
    if chrome.page_numbers_enabled {
        routed.push((chrome.page_number_position, MarginSource::PageNumber, chrome.footer_font_size_pt));
    }

    MarginBoxPosition::ALL
        .into_iter()
        .map(|position| {
            let here: Vec<_> = routed.iter().filter(|(pos, ..)| *pos == position).collect();
            MarginBox {
                position,
                font_size_pt: here.first().map(|(_, _, size)| *size),
                sources: here.into_iter().map(|(_, source, _)| source.clone()).collect(),
            }
        })
        .collect()
}

/// The CSS `content` value for a margin box.
pub fn margin_box_content(sources: &[MarginSource]) -> String {
    if sources.is_empty() {
        return "none".to_string();
    }
    let separator = css_string(MARGIN_BOX_SEPARATOR);
    sources
        .iter()
        .map(|source| match source {
            MarginSource::Header(text) | MarginSource::Footer(text) => css_string(text),
            MarginSource::PageNumber => "\"Page \" counter(page)".to_string(),
        })
        .collect::<Vec<_>>()
        .join(&format!(" {} ", separator))
}

/// Quote `text` as a CSS string literal.
pub fn css_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\A "),
            c if c.is_control() => out.push_str(&format!("\\{:X} ", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Build the complete stylesheet for the paginator.
pub fn build_paged_document_css(input: &PagedCssInput) -> String {
    let PagedCssInput {
        style,
        page,
        margins,
        chrome,
    } = input;
    let margins = margins.clamped_to(page);
    debug!(
        "paged css: {} {}x{}mm, margins {}mm/{}mm",
        page.label, page.width_mm, page.height_mm, margins.vertical_mm, margins.horizontal_mm
    );

    let mut out = String::new();
    emit_page_rule(page, margins, style, chrome, &mut out);
    emit_document_rules(style, &mut out);
    out
}

fn emit_page_rule(
    page: &PagePreset,
    margins: PageMargins,
    style: &StyleState,
    chrome: &PageChromeState,
    out: &mut String,
) {
    out.push_str("@page {\n");
    out.push_str(&format!(
        "  size: {}mm {}mm;\n",
        fmt_num(page.width_mm),
        fmt_num(page.height_mm)
    ));
    out.push_str(&format!(
        "  margin: {}mm {}mm;\n",
        fmt_num(margins.vertical_mm),
        fmt_num(margins.horizontal_mm)
    ));

    for margin_box in resolve_margin_boxes(chrome) {
        out.push('\n');
        emit_margin_box(&margin_box, style, out);
    }
    out.push_str("}\n\n");
}

fn emit_margin_box(margin_box: &MarginBox, style: &StyleState, out: &mut String) {
    let position = margin_box.position;
    out.push_str(&format!("  @{} {{\n", position));
    out.push_str(&format!("    content: {};\n", margin_box_content(&margin_box.sources)));
    if let Some(size) = margin_box.font_size_pt {
        out.push_str(&format!("    font-family: {};\n", style.body_font.stack()));
        out.push_str(&format!("    font-size: {}pt;\n", fmt_num(size)));
        out.push_str("    color: var(--md-muted);\n");
        out.push_str(&format!("    text-align: {};\n", position.text_align()));
        let align = if position.is_top() { "bottom" } else { "top" };
        out.push_str(&format!("    vertical-align: {};\n", align));
    }
    out.push_str("  }\n");
}

fn emit_document_rules(style: &StyleState, out: &mut String) {
    let doc = format!(".{}", DOCUMENT_CLASS);
    let spacing = style.paragraph_spacing;
    let rem = |factor: f64| format!("{}rem", fmt_num(factor * spacing));

    out.push_str(":root {\n");
    out.push_str(&format!("  --md-background: {};\n", style.background));
    out.push_str(&format!("  --md-text: {};\n", style.text));
    out.push_str(&format!("  --md-accent: {};\n", style.accent));
    out.push_str("  --md-muted: color-mix(in srgb, var(--md-text) 62%, var(--md-background));\n");
    out.push_str("  --md-code-background: color-mix(in srgb, var(--md-text) 6%, var(--md-background));\n");
    out.push_str("  --md-border: color-mix(in srgb, var(--md-text) 18%, var(--md-background));\n");
    out.push_str("}\n\n");

    out.push_str("html,\nbody {\n");
    out.push_str("  margin: 0;\n");
    out.push_str("  background: var(--md-background);\n");
    out.push_str("  -webkit-print-color-adjust: exact;\n");
    out.push_str("  print-color-adjust: exact;\n");
    out.push_str("}\n\n");

    out.push_str(&format!("{} {{\n", doc));
    out.push_str(&format!("  font-family: {};\n", style.body_font.stack()));
    out.push_str(&format!("  font-size: {}px;\n", fmt_num(style.body_font_size)));
    out.push_str(&format!("  line-height: {};\n", fmt_num(style.line_height)));
    out.push_str(&format!("  letter-spacing: {}em;\n", fmt_num(style.letter_spacing)));
    out.push_str("  color: var(--md-text);\n");
    out.push_str("  background: var(--md-background);\n");
    out.push_str("  overflow-wrap: break-word;\n");
    out.push_str("}\n\n");

    let headings = (1..=6)
        .map(|level| format!("{} h{}", doc, level))
        .collect::<Vec<_>>()
        .join(",\n");
    out.push_str(&format!("{} {{\n", headings));
    out.push_str(&format!("  font-family: {};\n", style.heading_font.stack()));
    out.push_str("  line-height: 1.25;\n");
    out.push_str(&format!(
        "  margin: {} 0 {};\n",
        rem(HEADING_MARGIN_TOP),
        rem(HEADING_MARGIN_BOTTOM)
    ));
    out.push_str("  break-after: avoid;\n");
    out.push_str("  page-break-after: avoid;\n");
    out.push_str("  break-inside: avoid;\n");
    out.push_str("}\n\n");

    for (level, scale) in HEADING_SCALE.iter().enumerate() {
        out.push_str(&format!(
            "{} h{} {{ font-size: {}px; }}\n",
            doc,
            level + 1,
            fmt_num(scale * style.heading_base_size)
        ));
    }
    out.push('\n');

    let blocks = ["p", "ul", "ol", "blockquote", "pre", "table", "figure"]
        .iter()
        .map(|tag| format!("{} {}", doc, tag))
        .collect::<Vec<_>>()
        .join(",\n");
    out.push_str(&format!("{} {{\n  margin: 0 0 {};\n}}\n\n", blocks, rem(1.0)));
    out.push_str(&format!("{} > :first-child {{\n  margin-top: 0;\n}}\n\n", doc));

    out.push_str(&format!("{} a {{\n  color: var(--md-accent);\n}}\n\n", doc));

    out.push_str(&format!("{} blockquote {{\n", doc));
    out.push_str("  margin-left: 0;\n");
    out.push_str("  padding: 0 0 0 1em;\n");
    out.push_str("  border-left: 3px solid var(--md-accent);\n");
    out.push_str("  color: var(--md-muted);\n");
    out.push_str("}\n\n");

    out.push_str(&format!("{doc} code,\n{doc} pre {{\n"));
    out.push_str(&format!("  font-family: {};\n", FontPresetKey::JetbrainsMono.stack()));
    out.push_str("  font-size: 0.9em;\n");
    out.push_str("  background: var(--md-code-background);\n");
    out.push_str("  border-radius: 3px;\n");
    out.push_str("}\n\n");
    out.push_str(&format!("{} code {{\n  padding: 0.1em 0.3em;\n}}\n\n", doc));
    out.push_str(&format!("{} pre {{\n", doc));
    out.push_str("  padding: 0.75em 1em;\n");
    out.push_str("  white-space: pre-wrap;\n");
    out.push_str("  break-inside: avoid;\n");
    out.push_str("}\n\n");
    out.push_str(&format!(
        "{} pre code {{\n  padding: 0;\n  background: none;\n  font-size: inherit;\n}}\n\n",
        doc
    ));

    out.push_str(&format!("{} table {{\n  border-collapse: collapse;\n  width: 100%;\n}}\n\n", doc));
    out.push_str(&format!("{doc} th,\n{doc} td {{\n"));
    out.push_str("  border: 1px solid var(--md-border);\n");
    out.push_str("  padding: 0.35em 0.6em;\n");
    out.push_str("  text-align: left;\n");
    out.push_str("}\n\n");
    out.push_str(&format!("{} th {{\n  background: var(--md-code-background);\n}}\n\n", doc));

    out.push_str(&format!("{doc} tr,\n{doc} img,\n{doc} figure {{\n"));
    out.push_str("  break-inside: avoid;\n");
    out.push_str("  page-break-inside: avoid;\n");
    out.push_str("}\n\n");
    out.push_str(&format!("{} img {{\n  max-width: 100%;\n}}\n\n", doc));

    out.push_str(&format!("{} hr {{\n", doc));
    out.push_str("  border: 0;\n");
    out.push_str("  border-top: 1px solid var(--md-border);\n");
    out.push_str(&format!("  margin: {} 0;\n", rem(1.5)));
    out.push_str("}\n\n");

    out.push_str(&format!("{} .{} {{\n", doc, SIGNATURE_LINE_CLASS));
    out.push_str("  display: inline-block;\n");
    out.push_str("  height: 1em;\n");
    out.push_str("  border-bottom: 1px solid currentColor;\n");
    out.push_str("  vertical-align: baseline;\n");
    out.push_str("}\n");
}
