//! Markdown-to-prose conversion.
//!
//! Markdown sources are reduced to their paragraph text before scoring.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Reduce markdown to plain prose suitable for scoring.
///
/// Code (fenced, indented and inline), headings, tables, images, HTML and
/// YAML frontmatter are dropped. Link text, emphasis text, blockquotes and
/// list items are kept. Each paragraph or list item that does not already
/// end in `.`, `!` or `?` gets a closing period, so bullet lists split into
/// separate sentences instead of fusing into one.
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn strip_to_prose(text: &str) -> String {
    let body = strip_frontmatter(text);

    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;

    let mut prose = String::with_capacity(body.len() / 2);
    let mut skip_depth: usize = 0;

    for event in Parser::new_ext(body, options) {
        match event {
            Event::Start(
                Tag::CodeBlock(_) | Tag::Heading { .. } | Tag::Table(_) | Tag::Image { .. },
            ) => skip_depth += 1,
            Event::End(
                TagEnd::CodeBlock | TagEnd::Heading(_) | TagEnd::Table | TagEnd::Image,
            ) => skip_depth = skip_depth.saturating_sub(1),

            Event::Text(t) if skip_depth == 0 => prose.push_str(&t),
            Event::SoftBreak | Event::HardBreak if skip_depth == 0 => prose.push(' '),

            // A nested list ends the text of the item that contains it.
            Event::Start(Tag::List(_)) | Event::End(TagEnd::Paragraph | TagEnd::Item)
                if skip_depth == 0 =>
            {
                close_block(&mut prose);
            }

            _ => {}
        }
    }

    prose.trim_end().to_string()
}

/// End the current block with a terminator (if it lacks one) and a space.
fn close_block(prose: &mut String) {
    let trimmed_len = prose.trim_end().len();
    prose.truncate(trimmed_len);
    if prose.is_empty() {
        return;
    }
    if !prose.ends_with(['.', '!', '?']) {
        prose.push('.');
    }
    prose.push(' ');
}

/// Drop a leading `---`-delimited YAML frontmatter block.
fn strip_frontmatter(text: &str) -> &str {
    let trimmed = text.trim_start();
    let Some(after_opening) = trimmed.strip_prefix("---") else {
        return text;
    };
    let Some(close_pos) = after_opening.find("\n---") else {
        return text;
    };
    let remainder = &after_opening[close_pos + 4..];
    remainder.strip_prefix('\n').unwrap_or(remainder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_blocks_are_dropped() {
        let input = "Some text.\n\n```rust\nlet x = 1;\n```\n\nMore text.";
        assert_eq!(strip_to_prose(input), "Some text. More text.");
    }

    #[test]
    fn frontmatter_is_dropped() {
        let input = "---\nstatus: draft\ndate: 2026-02-07\n---\n\nSome text.";
        assert_eq!(strip_to_prose(input), "Some text.");
    }

    #[test]
    fn headings_are_dropped() {
        let input = "# Header\n\nSome text.\n\n## Subheader\n\nMore text.";
        assert_eq!(strip_to_prose(input), "Some text. More text.");
    }

    #[test]
    fn link_text_is_kept() {
        let result = strip_to_prose("Check [this link](https://example.com) for details.");
        assert_eq!(result, "Check this link for details.");
    }

    #[test]
    fn inline_code_is_dropped() {
        let result = strip_to_prose("Use `foo()` to do things.");
        assert!(!result.contains("foo()"));
        assert!(result.starts_with("Use"));
    }

    #[test]
    fn emphasis_markers_are_removed() {
        let result = strip_to_prose("This is **bold** and *italic* text.");
        assert_eq!(result, "This is bold and italic text.");
    }

    #[test]
    fn tables_are_dropped() {
        let input = "Text before.\n\n| A | B |\n|---|---|\n| 1 | 2 |\n\nText after.";
        assert_eq!(strip_to_prose(input), "Text before. Text after.");
    }

    #[test]
    fn list_items_become_sentences() {
        let input = "- first point\n- second point!\n- third point";
        assert_eq!(
            strip_to_prose(input),
            "first point. second point! third point."
        );
    }

    #[test]
    fn nested_list_items_stay_separate() {
        let input = "- first point\n  - second point\n- third point\n";
        assert_eq!(
            strip_to_prose(input),
            "first point. second point. third point."
        );
    }

    #[test]
    fn paragraph_before_list_is_closed_once() {
        let input = "Intro here\n\n- item one\n- item two\n";
        assert_eq!(strip_to_prose(input), "Intro here. item one. item two.");
    }

    #[test]
    fn unterminated_paragraph_is_closed() {
        assert_eq!(strip_to_prose("no full stop here"), "no full stop here.");
    }

    #[test]
    fn blockquote_text_is_kept() {
        let input = "> This is a quote.\n\nRegular text.";
        assert_eq!(strip_to_prose(input), "This is a quote. Regular text.");
    }

    #[test]
    fn empty_input_returns_empty() {
        assert!(strip_to_prose("").is_empty());
    }
}
