//! Text shaping for fixed-width documents
//!
//! Sanitizing model output down to printable ASCII, greedy line wrapping and
//! budget truncation.

/// Normalize narrative text for embedding into the report and deck.
///
/// Idempotent: `sanitize(&sanitize(x)) == sanitize(x)`. Newlines are kept as
/// paragraph separators; everything else outside printable ASCII is dropped.
pub fn sanitize(text: &str) -> String {
    let mut ascii = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{00A0}' | '\t' => ascii.push(' '),
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => ascii.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' => ascii.push('"'),
            '\u{2010}'..='\u{2015}' | '\u{2212}' => ascii.push('-'),
            '\u{2026}' => ascii.push_str("..."),
            '\n' => ascii.push('\n'),
            ' '..='~' => ascii.push(ch),
            _ => {}
        }
    }

    // Emphasis markers; `__` pairs go after `*` so "_*_" collapses fully.
    let unmarked = ascii.replace('*', "").replace("__", "");

    let lines: Vec<&str> = unmarked.split('\n').map(strip_heading_marker).collect();
    lines.join("\n").trim().to_string()
}

fn strip_heading_marker(line: &str) -> &str {
    if line.trim_start().starts_with('#') {
        line.trim_start_matches(['#', ' '])
    } else {
        line
    }
}

/// Greedy word wrap. Words longer than `max_chars` are hard-broken; no other
/// word is ever split.
pub fn wrap_text(value: &str, max_chars: usize) -> Vec<String> {
    if max_chars == 0 {
        return vec![value.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();

    for word in value.split_whitespace() {
        let word_len = word.chars().count();
        let current_len = current.chars().count();

        if current_len > 0 && current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
            continue;
        }

        if current_len > 0 {
            lines.push(std::mem::take(&mut current));
        }

        if word_len <= max_chars {
            current.push_str(word);
        } else {
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(max_chars) {
                lines.push(chunk.iter().collect());
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// One laid-out row of paragraph text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParagraphRow {
    Line(String),
    /// A blank source line; rendered as a short vertical gap.
    Gap,
}

/// Split text on newlines and wrap each non-blank paragraph to `max_chars`.
pub fn paragraph_rows(text: &str, max_chars: usize) -> Vec<ParagraphRow> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut rows = Vec::new();
    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            rows.push(ParagraphRow::Gap);
        } else {
            rows.extend(
                wrap_text(paragraph, max_chars)
                    .into_iter()
                    .map(ParagraphRow::Line),
            );
        }
    }
    rows
}

/// Cut `value` to at most `budget` characters and append an ellipsis.
pub fn truncate_with_ellipsis(value: &str, budget: usize) -> String {
    let mut out: String = value.chars().take(budget).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_markup_and_normalizes_punctuation() {
        let raw = "## Initial Access\n**Attackers** used \u{201C}smart\u{201D} lures \u{2014} it\u{2019}s bad\u{2026}";
        assert_eq!(
            sanitize(raw),
            "Initial Access\nAttackers used \"smart\" lures - it's bad..."
        );
    }

    #[test]
    fn sanitize_drops_non_ascii_and_normalizes_spaces() {
        assert_eq!(sanitize("caf\u{00E9}\u{00A0}\t\u{1F6E1} ok \u{4F60}\u{597D}"), "caf   ok");
    }

    #[test]
    fn sanitize_handles_empty_and_blank_input() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize(" \t\u{00A0}\n\n "), "");
        assert_eq!(sanitize("\u{1F525}\u{1F525}"), "");
    }

    #[test]
    fn sanitize_is_idempotent() {
        let samples = [
            "# # nested heading\n  ## another",
            "_*_ a ___ b ____ c",
            "\u{00E9}# tricky\r\nline two\u{200B}",
            "  leading\n\n\ntrailing  \t",
            "**bold** and *italic* and __under__",
            "\u{201C}quoted\u{201D}\u{2013}dash",
        ];
        for sample in samples {
            let once = sanitize(sample);
            assert_eq!(sanitize(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn sanitize_keeps_paragraph_breaks() {
        assert_eq!(sanitize("one\r\n\r\ntwo"), "one\n\ntwo");
    }

    #[test]
    fn test_wrap_text_limits_line_width() {
        let text = "This is a long sentence that should be wrapped across multiple lines for PDF rendering correctness.";
        let lines = wrap_text(text, 24);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|line| line.chars().count() <= 24));
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn wrap_text_hard_breaks_only_oversized_words() {
        let long_word = "x".repeat(120);
        let text = format!("short {} tail", long_word);
        let lines = wrap_text(&text, 95);
        assert_eq!(lines[0], "short");
        assert_eq!(lines[1].len(), 95);
        assert_eq!(lines[2].len(), 25);
        assert_eq!(lines[3], "tail");
    }

    #[test]
    fn paragraph_rows_mark_blank_lines_as_gaps() {
        let rows = paragraph_rows("first\n\nsecond", 95);
        assert_eq!(
            rows,
            vec![
                ParagraphRow::Line("first".to_string()),
                ParagraphRow::Gap,
                ParagraphRow::Line("second".to_string()),
            ]
        );
        assert!(paragraph_rows("", 95).is_empty());
    }

    #[test]
    fn truncate_appends_ellipsis_after_budget() {
        assert_eq!(truncate_with_ellipsis("abcdef", 3), "abc...");
        assert_eq!(truncate_with_ellipsis("ab", 3), "ab...");
    }
}
