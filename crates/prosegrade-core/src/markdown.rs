//! Markdown preprocessing for `.md` inputs.
//!
//! Uses pulldown-cmark for proper CommonMark parsing rather than regex
//! stripping. Unlike a plain prose extractor, heading text is kept as its
//! own paragraph so the tokenizer classifies it as a header sentence —
//! several tests count headers separately from complete sentences.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Convert markdown to tokenizer-ready text.
///
/// Removes code blocks, inline code, HTML, frontmatter, and table
/// structure. Keeps link text, emphasis text, list items, blockquotes,
/// and heading text (isolated on its own paragraph).
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn to_prose(text: &str) -> String {
    let text = strip_frontmatter(text);

    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(&text, options);

    let mut result = String::with_capacity(text.len() / 2);
    let mut skip_depth: usize = 0;
    let mut in_heading = false;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(_) | Tag::Table(_)) => {
                skip_depth += 1;
            }
            Event::End(TagEnd::CodeBlock | TagEnd::Table) => {
                skip_depth = skip_depth.saturating_sub(1);
            }

            // Headings become standalone paragraphs (no terminator), so
            // the tokenizer sees them as header sentences.
            Event::Start(Tag::Heading { .. }) => {
                in_heading = true;
                push_paragraph_break(&mut result);
            }
            Event::End(TagEnd::Heading(_)) => {
                in_heading = false;
                push_paragraph_break(&mut result);
            }

            Event::Text(t) if skip_depth == 0 => {
                result.push_str(&t);
            }
            Event::SoftBreak | Event::HardBreak if skip_depth == 0 && !in_heading => {
                result.push(' ');
            }

            // Paragraph boundaries stay paragraph boundaries
            Event::End(TagEnd::Paragraph | TagEnd::Item) if skip_depth == 0 => {
                push_paragraph_break(&mut result);
            }

            // Skip inline code text
            Event::Code(_) => {}

            _ => {}
        }
    }

    result.trim().to_string()
}

/// Append a blank-line paragraph separator, collapsing repeats.
fn push_paragraph_break(out: &mut String) {
    if !out.is_empty() && !out.ends_with("\n\n") {
        while out.ends_with(' ') || out.ends_with('\n') {
            out.pop();
        }
        out.push_str("\n\n");
    }
}

/// Strip YAML frontmatter delimited by `---` lines.
fn strip_frontmatter(text: &str) -> String {
    let trimmed = text.trim_start();
    if !trimmed.starts_with("---") {
        return text.to_string();
    }

    let after_opening = &trimmed[3..];
    let Some(close_pos) = after_opening.find("\n---") else {
        return text.to_string();
    };

    let remainder = &after_opening[close_pos + 4..];
    remainder
        .strip_prefix('\n')
        .unwrap_or(remainder)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_code_blocks() {
        let input = "Some text.\n\n```rust\nlet x = 1;\n```\n\nMore text.";
        let result = to_prose(input);
        assert!(!result.contains("let x"));
        assert!(result.contains("Some text."));
        assert!(result.contains("More text."));
    }

    #[test]
    fn removes_frontmatter() {
        let input = "---\nstatus: accepted\ndate: 2026-02-07\n---\n\nSome text.";
        let result = to_prose(input);
        assert!(!result.contains("status"));
        assert!(result.contains("Some text."));
    }

    #[test]
    fn headings_become_standalone_paragraphs() {
        let input = "# Annual Report\n\nRevenue grew. Costs fell.";
        let result = to_prose(input);
        assert!(result.starts_with("Annual Report\n\n"));
        assert!(result.contains("Revenue grew."));
    }

    #[test]
    fn preserves_link_text() {
        let input = "Check [this link](https://example.com) for details.";
        let result = to_prose(input);
        assert!(result.contains("this link"));
        assert!(!result.contains("https://example.com"));
    }

    #[test]
    fn removes_inline_code() {
        let input = "Use `foo()` to do things.";
        let result = to_prose(input);
        assert!(!result.contains("foo()"));
        assert!(result.contains("to do things."));
    }

    #[test]
    fn removes_table_contents() {
        let input = "Text before.\n\n| A | B |\n|---|---|\n| 1 | 2 |\n\nText after.";
        let result = to_prose(input);
        assert!(result.contains("Text before."));
        assert!(result.contains("Text after."));
    }

    #[test]
    fn empty_input_returns_empty() {
        assert!(to_prose("").is_empty());
    }
}
