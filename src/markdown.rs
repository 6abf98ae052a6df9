use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html};

use crate::css::{DOCUMENT_CLASS, SIGNATURE_LINE_CLASS};

/// Shortest underscore run treated as a signature line.
pub const MIN_SIGNATURE_RUN: usize = 4;

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);
    options
}

/// Byte ranges of fenced code blocks, fences included.
fn fenced_code_ranges(markdown: &str) -> Vec<Range<usize>> {
    Parser::new_ext(markdown, options())
        .into_offset_iter()
        .filter_map(|(event, range)| match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(_))) => Some(range),
            _ => None,
        })
        .collect()
}

pub fn signature_placeholder(run_len: usize) -> String {
    format!(
        "<span class=\"{}\" style=\"width: {}ch\"></span>",
        SIGNATURE_LINE_CLASS,
        run_len.max(MIN_SIGNATURE_RUN)
    )
}

fn replace_underscore_runs(segment: &str, out: &mut String) {
    let bytes = segment.as_bytes();
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'_' {
            i += 1;
            continue;
        }
        let run_start = i;
        while i < bytes.len() && bytes[i] == b'_' {
            i += 1;
        }
        if i - run_start >= MIN_SIGNATURE_RUN {
            out.push_str(&segment[copied..run_start]);
            out.push_str(&signature_placeholder(i - run_start));
            copied = i;
        }
    }
    out.push_str(&segment[copied..]);
}

/// Replace runs of four or more underscores outside fenced code with
/// fixed-width signature-line placeholders.
pub fn prepare_markdown_for_render(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len());
    let mut cursor = 0;
    for range in fenced_code_ranges(markdown) {
        if range.start < cursor {
            continue;
        }
        replace_underscore_runs(&markdown[cursor..range.start], &mut out);
        out.push_str(&markdown[range.clone()]);
        cursor = range.end;
    }
    replace_underscore_runs(&markdown[cursor..], &mut out);
    out
}

/// Render markdown to an HTML fragment, after the signature-line pass.
pub fn render_html(markdown: &str) -> String {
    let prepared = prepare_markdown_for_render(markdown);
    let mut out = String::with_capacity(prepared.len() * 3 / 2);
    html::push_html(&mut out, Parser::new_ext(&prepared, options()));
    out
}

/// Text of the first heading, used as the document title.
pub fn document_title(markdown: &str) -> Option<String> {
    let mut title: Option<String> = None;
    for event in Parser::new_ext(markdown, options()) {
        match event {
            Event::Start(Tag::Heading { .. }) => title = Some(String::new()),
            Event::Text(text) | Event::Code(text) => {
                if let Some(title) = title.as_mut() {
                    title.push_str(&text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if title.as_ref().is_some_and(|t| !t.trim().is_empty()) {
                    return title.map(|t| t.trim().to_string());
                }
                title = None;
            }
            _ => {}
        }
    }
    None
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

/// A standalone, print-ready HTML document with `css` inlined.
pub fn render_html_document(markdown: &str, css: &str) -> String {
    let title = document_title(markdown).unwrap_or_else(|| "Document".to_string());
    let body = render_html(markdown);

    let mut out = String::with_capacity(body.len() + css.len() + 256);
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape_html(&title)));
    out.push_str("<style>\n");
    out.push_str(css);
    out.push_str("</style>\n</head>\n<body>\n");
    out.push_str(&format!("<article class=\"{}\">\n", DOCUMENT_CLASS));
    out.push_str(&body);
    out.push_str("</article>\n</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolbar::{Selection, ToolbarAction};

    #[test]
    fn replaces_signature_runs() {
        assert_eq!(
            prepare_markdown_for_render("Sign: ______"),
            "Sign: <span class=\"signature-line\" style=\"width: 6ch\"></span>"
        );
    }

    #[test]
    fn short_runs_are_left_alone() {
        assert_eq!(prepare_markdown_for_render("snake_case and __bold__ ___"), "snake_case and __bold__ ___");
    }

    #[test]
    fn minimum_run_is_four() {
        assert_eq!(
            prepare_markdown_for_render("____"),
            "<span class=\"signature-line\" style=\"width: 4ch\"></span>"
        );
    }

    #[test]
    fn fenced_code_is_untouched() {
        let md = "Name: ________\n\n```\nlet ________ = 1;\n```\n\nDate: ____\n";
        let prepared = prepare_markdown_for_render(md);
        assert!(prepared.contains("let ________ = 1;"));
        assert!(prepared.starts_with("Name: <span class=\"signature-line\" style=\"width: 8ch\"></span>\n"));
        assert!(prepared.ends_with("Date: <span class=\"signature-line\" style=\"width: 4ch\"></span>\n"));
    }

    #[test]
    fn tilde_fences_and_unclosed_fences() {
        let prepared = prepare_markdown_for_render("~~~py\nx = '____'\n~~~\n");
        assert!(prepared.contains("x = '____'"));

        let prepared = prepare_markdown_for_render("```\n______\n");
        assert_eq!(prepared, "```\n______\n");
    }

    #[test]
    fn multibyte_text_around_runs() {
        assert_eq!(
            prepare_markdown_for_render("Für ____ ✓"),
            "Für <span class=\"signature-line\" style=\"width: 4ch\"></span> ✓"
        );
    }

    #[test]
    fn html_fragment() {
        let html = render_html("# Hi\n\n| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.starts_with("<h1>Hi</h1>\n"));
        assert!(html.contains("<table>"));
    }

    #[test]
    fn leading_rule_keeps_following_content() {
        let rule = ToolbarAction::Rule.apply("", Selection::collapsed(0)).text;
        let html = render_html(&format!("{}\n\nIntro paragraph\n\n---\n\nBody", rule));
        assert!(html.starts_with("<hr />\n"));
        assert!(html.contains("<p>Intro paragraph</p>"));
        assert!(html.contains("<p>Body</p>"));
        assert_eq!(document_title("---\n\n# Title\n"), Some("Title".to_string()));
    }

    #[test]
    fn title_from_first_heading() {
        assert_eq!(document_title("intro\n\n## The `Plan`\n\n# Later"), Some("The Plan".to_string()));
        assert_eq!(document_title("no headings"), None);
    }

    #[test]
    fn standalone_document() {
        let doc = render_html_document("# A & B\n\nSign ____", "@page { size: 210mm 297mm; }\n");
        assert!(doc.contains("<title>A &amp; B</title>"));
        assert!(doc.contains("<style>\n@page { size: 210mm 297mm; }\n</style>"));
        assert!(doc.contains("<article class=\"md-document\">\n<h1>A &amp; B</h1>"));
        assert!(doc.contains("<span class=\"signature-line\" style=\"width: 4ch\"></span>"));
    }
}
