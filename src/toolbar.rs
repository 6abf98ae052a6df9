//! Selection-aware markdown edits behind the editor toolbar.
//!
//! Offsets are byte offsets into the text. Out-of-range or reversed
//! selections are normalized, and offsets inside a multi-byte character snap
//! back to its start.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

pub const CODE_BLOCK_LANGUAGE: &str = "text";
pub const LINK_URL_PLACEHOLDER: &str = "https://example.com";
pub const TABLE_TEMPLATE: &str = "| Column | Value |\n| --- | --- |\n| Item | Detail |";
pub const RULE_TEMPLATE: &str = "---";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn collapsed(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Text after an edit, with the selection the editor should restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownEdit {
    pub text: String,
    pub selection: Selection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolbarAction {
    Bold,
    Italic,
    Link,
    Heading,
    Quote,
    BulletList,
    NumberedList,
    CodeBlock,
    Table,
    Rule,
}

impl ToolbarAction {
    pub const ALL: [ToolbarAction; 10] = [
        ToolbarAction::Bold,
        ToolbarAction::Italic,
        ToolbarAction::Link,
        ToolbarAction::Heading,
        ToolbarAction::Quote,
        ToolbarAction::BulletList,
        ToolbarAction::NumberedList,
        ToolbarAction::CodeBlock,
        ToolbarAction::Table,
        ToolbarAction::Rule,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolbarAction::Bold => "bold",
            ToolbarAction::Italic => "italic",
            ToolbarAction::Link => "link",
            ToolbarAction::Heading => "heading",
            ToolbarAction::Quote => "quote",
            ToolbarAction::BulletList => "bullet-list",
            ToolbarAction::NumberedList => "numbered-list",
            ToolbarAction::CodeBlock => "code-block",
            ToolbarAction::Table => "table",
            ToolbarAction::Rule => "rule",
        }
    }

    pub fn apply(self, text: &str, selection: Selection) -> MarkdownEdit {
        match self {
            ToolbarAction::Bold => wrap_selection(text, selection, "**", "**", "bold text"),
            ToolbarAction::Italic => wrap_selection(text, selection, "*", "*", "italic text"),
            ToolbarAction::Link => wrap_selection(
                text,
                selection,
                "[",
                &format!("]({})", LINK_URL_PLACEHOLDER),
                "link text",
            ),
            ToolbarAction::Heading => prefix_lines(text, selection, "Heading", |_| "## ".to_string()),
            ToolbarAction::Quote => prefix_lines(text, selection, "Quote", |_| "> ".to_string()),
            ToolbarAction::BulletList => {
                prefix_lines(text, selection, "List item", |_| "- ".to_string())
            }
            ToolbarAction::NumberedList => {
                prefix_lines(text, selection, "List item", |index| format!("{}. ", index + 1))
            }
            ToolbarAction::CodeBlock => insert_code_block(text, selection, CODE_BLOCK_LANGUAGE),
            ToolbarAction::Table => insert_block(text, selection, TABLE_TEMPLATE),
            ToolbarAction::Rule => insert_block(text, selection, RULE_TEMPLATE),
        }
    }
}

impl fmt::Display for ToolbarAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolbarAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| Error::UnknownAction(s.to_string()))
    }
}

fn floor_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

fn normalize(text: &str, selection: Selection) -> (usize, usize) {
    let start = floor_boundary(text, selection.start);
    let end = floor_boundary(text, selection.end);
    (start.min(end), start.max(end))
}

fn splice(text: &str, start: usize, end: usize, insert: &str) -> String {
    let mut out = String::with_capacity(text.len() - (end - start) + insert.len());
    out.push_str(&text[..start]);
    out.push_str(insert);
    out.push_str(&text[end..]);
    out
}

/// Surround the selection (or `placeholder`) with `prefix` and `suffix`,
/// selecting only the inner content.
pub fn wrap_selection(
    text: &str,
    selection: Selection,
    prefix: &str,
    suffix: &str,
    placeholder: &str,
) -> MarkdownEdit {
    let (start, end) = normalize(text, selection);
    let inner = if start == end { placeholder } else { &text[start..end] };
    let replacement = format!("{}{}{}", prefix, inner, suffix);
    let inner_start = start + prefix.len();
    MarkdownEdit {
        text: splice(text, start, end, &replacement),
        selection: Selection::new(inner_start, inner_start + inner.len()),
    }
}

/// Prefix every line of the selection (or `placeholder`), selecting the whole block.
/// `prefix` receives the zero-based line index.
pub fn prefix_lines(
    text: &str,
    selection: Selection,
    placeholder: &str,
    prefix: impl Fn(usize) -> String,
) -> MarkdownEdit {
    let (start, end) = normalize(text, selection);
    let source = if start == end { placeholder } else { &text[start..end] };
    let block = source
        .split('\n')
        .enumerate()
        .map(|(index, line)| format!("{}{}", prefix(index), line))
        .collect::<Vec<_>>()
        .join("\n");
    MarkdownEdit {
        text: splice(text, start, end, &block),
        selection: Selection::new(start, start + block.len()),
    }
}

/// Fence the selection (or a placeholder snippet), selecting the code only.
pub fn insert_code_block(text: &str, selection: Selection, language: &str) -> MarkdownEdit {
    wrap_selection(text, selection, &format!("```{}\n", language), "\n```", "code")
}

/// Replace the selection with `block` on its own line(s), leaving a collapsed
/// cursor just after the inserted text.
pub fn insert_block(text: &str, selection: Selection, block: &str) -> MarkdownEdit {
    let (start, end) = normalize(text, selection);
    let before = &text[..start];
    let after = &text[end..];

    let mut insert = String::with_capacity(block.len() + 2);
    if !before.is_empty() && !before.ends_with('\n') {
        insert.push('\n');
    }
    insert.push_str(block);
    if !after.is_empty() && !after.starts_with('\n') {
        insert.push('\n');
    }

    MarkdownEdit {
        text: splice(text, start, end, &insert),
        selection: Selection::collapsed(start + insert.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(action: ToolbarAction, text: &str, start: usize, end: usize) -> MarkdownEdit {
        action.apply(text, Selection::new(start, end))
    }

    fn selected(edit: &MarkdownEdit) -> &str {
        &edit.text[edit.selection.start..edit.selection.end]
    }

    #[test]
    fn bold_selects_inner_word() {
        let edit = apply(ToolbarAction::Bold, "Hello world", 6, 11);
        assert_eq!(edit.text, "Hello **world**");
        assert_eq!(edit.selection, Selection::new(8, 13));
        assert_eq!(selected(&edit), "world");
    }

    #[test]
    fn empty_selection_uses_placeholder() {
        let edit = apply(ToolbarAction::Italic, "Hi ", 3, 3);
        assert_eq!(edit.text, "Hi *italic text*");
        assert_eq!(selected(&edit), "italic text");
    }

    #[test]
    fn link_wraps_with_url() {
        let edit = apply(ToolbarAction::Link, "see docs", 4, 8);
        assert_eq!(edit.text, "see [docs](https://example.com)");
        assert_eq!(selected(&edit), "docs");
    }

    #[test]
    fn numbered_list_counts_from_one() {
        let edit = apply(ToolbarAction::NumberedList, "First\nSecond", 0, 12);
        assert_eq!(edit.text, "1. First\n2. Second");
        assert_eq!(edit.selection, Selection::new(0, 18));
    }

    #[test]
    fn bullets_and_quotes_prefix_every_line() {
        let edit = apply(ToolbarAction::BulletList, "x\na\nb\ny", 2, 5);
        assert_eq!(edit.text, "x\n- a\n- b\ny");
        assert_eq!(selected(&edit), "- a\n- b");

        let edit = apply(ToolbarAction::Quote, "", 0, 0);
        assert_eq!(edit.text, "> Quote");
        assert_eq!(edit.selection, Selection::new(0, 7));
    }

    #[test]
    fn heading_prefix() {
        let edit = apply(ToolbarAction::Heading, "Title", 0, 5);
        assert_eq!(edit.text, "## Title");
    }

    #[test]
    fn code_block_selects_content_only() {
        let edit = apply(ToolbarAction::CodeBlock, "let x = 1;", 0, 10);
        assert_eq!(edit.text, "```text\nlet x = 1;\n```");
        assert_eq!(selected(&edit), "let x = 1;");

        let edit = apply(ToolbarAction::CodeBlock, "", 0, 0);
        assert_eq!(selected(&edit), "code");
    }

    #[test]
    fn table_adds_newlines_only_when_needed() {
        let edit = apply(ToolbarAction::Table, "Intro", 5, 5);
        assert_eq!(edit.text, format!("Intro\n{}", TABLE_TEMPLATE));
        assert_eq!(edit.selection, Selection::collapsed(edit.text.len()));

        let edit = apply(ToolbarAction::Table, "Intro\n", 6, 6);
        assert_eq!(edit.text, format!("Intro\n{}", TABLE_TEMPLATE));

        let edit = apply(ToolbarAction::Rule, "ab", 1, 1);
        assert_eq!(edit.text, "a\n---\nb");
        assert_eq!(edit.selection, Selection::collapsed(6));

        let edit = apply(ToolbarAction::Rule, "a\n\nb", 2, 2);
        assert_eq!(edit.text, "a\n---\nb");
        assert_eq!(edit.selection, Selection::collapsed(5));
    }

    #[test]
    fn selection_is_normalized() {
        let edit = apply(ToolbarAction::Bold, "Hello world", 11, 6);
        assert_eq!(edit.text, "Hello **world**");

        let edit = apply(ToolbarAction::Bold, "abc", 1, 99);
        assert_eq!(edit.text, "a**bc**");

        // Offset 2 falls inside "é"
        let edit = apply(ToolbarAction::Bold, "né!", 2, 4);
        assert_eq!(edit.text, "n**é!**");
    }

    #[test]
    fn action_names() {
        for action in ToolbarAction::ALL {
            assert_eq!(action.as_str().parse::<ToolbarAction>().unwrap(), action);
        }
        assert!("underline".parse::<ToolbarAction>().is_err());
    }
}
