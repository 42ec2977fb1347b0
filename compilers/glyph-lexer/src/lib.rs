pub mod fence;
pub mod pattern;
pub mod token;

use glyph_protocol::Span;
use nom::{bytes::complete::take_while1, error::Error};
use tracing::trace;

use crate::pattern::{is_word_char, match_at};
use crate::token::Token;

pub use fence::clean_model_output;
pub use pattern::{Pattern, PATTERNS};

/// Primary entry point: Text -> ordered, contiguous spans.
///
/// The spans cover `buffer` exactly: concatenating their text reproduces
/// the input. Text no pattern recognises comes back as plain spans, and
/// empty input gives no spans at all.
pub fn classify(buffer: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut pos = 0;
    let mut gap_start = 0;

    while pos < buffer.len() {
        let rest = &buffer[pos..];

        if let Some((class, len)) = match_at(rest) {
            if gap_start < pos {
                spans.push(Span::plain(gap_start, pos));
            }
            spans.push(Span::tagged(pos, pos + len, class));
            pos += len;
            gap_start = pos;
            continue;
        }

        // No match: skip an unrecognised word whole so keywords only match
        // at a word start, otherwise skip a single char.
        pos += match take_while1::<_, _, Error<&str>>(is_word_char)(rest) {
            Ok((_, word)) => word.len(),
            Err(_) => rest.chars().next().map_or(rest.len(), char::len_utf8),
        };
    }

    if gap_start < buffer.len() {
        spans.push(Span::plain(gap_start, buffer.len()));
    }

    trace!(bytes = buffer.len(), spans = spans.len(), "classified buffer");
    spans
}

/// Classify `buffer` and pair every span with its text.
pub fn tokens(buffer: &str) -> impl Iterator<Item = Token<'_>> + '_ {
    classify(buffer)
        .into_iter()
        .map(move |span| Token { span, text: span.text(buffer) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{ARROWS, KEYWORDS};
    use glyph_protocol::{LexicalClass, DEFAULT_DIAGRAM, TEMPLATES};
    use proptest::prelude::*;

    // Helper to view spans as (class, text) pairs
    fn pairs(buffer: &str) -> Vec<(Option<LexicalClass>, &str)> {
        tokens(buffer).map(|t| (t.class(), t.text)).collect()
    }

    fn rebuild(buffer: &str) -> String {
        tokens(buffer).map(|t| t.text).collect()
    }

    #[test]
    fn test_arrow_between_nodes() {
        assert_eq!(
            pairs("A-->B"),
            vec![
                (None, "A"),
                (Some(LexicalClass::Arrow), "-->"),
                (None, "B"),
            ]
        );
    }

    #[test]
    fn test_comment_covers_line() {
        assert_eq!(pairs("%% note"), vec![(Some(LexicalClass::Comment), "%% note")]);
    }

    #[test]
    fn test_comment_stops_at_line_end() {
        assert_eq!(
            pairs("%% a\r\ngraph"),
            vec![
                (Some(LexicalClass::Comment), "%% a"),
                (None, "\r\n"),
                (Some(LexicalClass::Keyword), "graph"),
            ]
        );
    }

    #[test]
    fn test_string_shields_arrow() {
        assert_eq!(
            pairs(r#"A["x --> y"]"#),
            vec![
                (None, "A"),
                (Some(LexicalClass::Bracket), "["),
                (Some(LexicalClass::StringLiteral), r#""x --> y""#),
                (Some(LexicalClass::Bracket), "]"),
            ]
        );
    }

    #[test]
    fn test_string_shields_keyword() {
        let spans = classify(r#""end graph""#);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].class, Some(LexicalClass::StringLiteral));
        assert_eq!(spans[0].len(), 11);
    }

    #[test]
    fn test_string_is_non_greedy() {
        assert_eq!(
            pairs(r#""a" --- "b""#),
            vec![
                (Some(LexicalClass::StringLiteral), r#""a""#),
                (None, " "),
                (Some(LexicalClass::Arrow), "---"),
                (None, " "),
                (Some(LexicalClass::StringLiteral), r#""b""#),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(classify("").is_empty());
    }

    #[test]
    fn test_unterminated_quote() {
        let buffer = r#"A["open"#;
        assert_eq!(
            pairs(buffer),
            vec![
                (None, "A"),
                (Some(LexicalClass::Bracket), "["),
                (None, r#""open"#),
            ]
        );
        assert_eq!(rebuild(buffer), buffer);
    }

    #[test]
    fn test_string_does_not_cross_lines() {
        let buffer = "\"open\nB\"";
        assert!(classify(buffer)
            .iter()
            .all(|s| s.class != Some(LexicalClass::StringLiteral)));
        assert_eq!(rebuild(buffer), buffer);
    }

    #[test]
    fn test_longest_connector_wins() {
        assert_eq!(pairs("-->"), vec![(Some(LexicalClass::Arrow), "-->")]);
        assert_eq!(pairs("John-->>Alice")[1], (Some(LexicalClass::Arrow), "-->>"));
        assert_eq!(pairs("A-.->B")[1], (Some(LexicalClass::Arrow), "-.->"));
    }

    #[test]
    fn test_declaration_order_beats_length() {
        // `||` (empty edge label) is declared before the `||--o{` connector,
        // so the label wins even though the connector is longer.
        assert_eq!(
            pairs("CUSTOMER ||--o{ ORDER"),
            vec![
                (None, "CUSTOMER "),
                (Some(LexicalClass::EdgeLabel), "||"),
                (Some(LexicalClass::Arrow), "--"),
                (None, "o"),
                (Some(LexicalClass::Bracket), "{"),
                (None, " ORDER"),
            ]
        );

        // Arrow is declared before bracket, so `}|..|{` is one connector.
        assert_eq!(
            pairs("A }|..|{ B")[1],
            (Some(LexicalClass::Arrow), "}|..|{")
        );
    }

    #[test]
    fn test_edge_label() {
        assert_eq!(
            pairs(r#"C -->|"One"| D"#),
            vec![
                (None, "C "),
                (Some(LexicalClass::Arrow), "-->"),
                (Some(LexicalClass::EdgeLabel), r#"|"One"|"#),
                (None, " D"),
            ]
        );
    }

    #[test]
    fn test_keywords_need_whole_words() {
        assert_eq!(
            pairs("graph TD"),
            vec![
                (Some(LexicalClass::Keyword), "graph"),
                (None, " "),
                (Some(LexicalClass::Keyword), "TD"),
            ]
        );
        assert_eq!(pairs("endpoint"), vec![(None, "endpoint")]);
        assert_eq!(pairs("x_end"), vec![(None, "x_end")]);
        assert_eq!(pairs("Graph"), vec![(None, "Graph")]);
        assert_eq!(
            pairs("end-node"),
            vec![(Some(LexicalClass::Keyword), "end"), (None, "-node")]
        );
    }

    #[test]
    fn test_keyword_after_non_ascii() {
        assert_eq!(
            pairs("é end"),
            vec![(None, "é "), (Some(LexicalClass::Keyword), "end")]
        );
    }

    #[test]
    fn test_multibyte_text_is_kept_whole() {
        let buffer = "A[\"café ☕\"] --> 🎄";
        assert_eq!(rebuild(buffer), buffer);
        assert_eq!(pairs(buffer)[2], (Some(LexicalClass::StringLiteral), "\"café ☕\""));
    }

    #[test]
    fn test_no_two_plain_spans_touch() {
        let spans = classify("a b c < d & e");
        assert_eq!(spans.len(), 1);
        assert!(spans[0].is_plain());
    }

    #[test]
    fn test_arrow_table_is_longest_first() {
        for (i, earlier) in ARROWS.iter().enumerate() {
            for later in &ARROWS[i + 1..] {
                assert!(
                    !later.starts_with(earlier),
                    "`{}` would truncate `{}`",
                    earlier,
                    later
                );
            }
        }
    }

    #[test]
    fn test_keywords_are_words() {
        for kw in KEYWORDS {
            assert!(kw.chars().all(pattern::is_word_char), "{}", kw);
        }
    }

    #[test]
    fn test_table_follows_class_order() {
        let classes: Vec<_> = PATTERNS.iter().map(|p| p.class).collect();
        assert_eq!(classes, LexicalClass::ALL.to_vec());
    }

    #[test]
    fn test_bundled_documents_round_trip() {
        for doc in TEMPLATES.iter().map(|t| t.code).chain([DEFAULT_DIAGRAM]) {
            assert_eq!(rebuild(doc), doc);
        }
    }

    #[test]
    fn test_default_diagram_highlights() {
        let found: Vec<_> = tokens(DEFAULT_DIAGRAM)
            .filter(|t| !t.is_plain())
            .take(6)
            .map(|t| (t.class(), t.text))
            .collect();
        assert_eq!(
            found,
            vec![
                (Some(LexicalClass::Keyword), "graph"),
                (Some(LexicalClass::Keyword), "TD"),
                (Some(LexicalClass::Bracket), "["),
                (Some(LexicalClass::StringLiteral), "\"Christmas\""),
                (Some(LexicalClass::Bracket), "]"),
                (Some(LexicalClass::Arrow), "-->"),
            ]
        );
    }

    proptest! {
        #[test]
        fn test_spans_cover_buffer(buffer in "\\PC*") {
            let spans = classify(&buffer);
            let mut expected_start = 0;
            for span in &spans {
                prop_assert_eq!(span.start, expected_start);
                prop_assert!(span.end > span.start);
                expected_start = span.end;
            }
            prop_assert_eq!(expected_start, buffer.len());
            prop_assert_eq!(rebuild(&buffer), buffer);
        }

        #[test]
        fn test_diagram_like_input_covers_buffer(
            buffer in "[A-Za-z0-9 %|\"<>=.\\-\\[\\](){}\n\r]{0,80}"
        ) {
            let spans = classify(&buffer);
            let rebuilt: String = spans.iter().map(|s| s.text(&buffer)).collect();
            prop_assert_eq!(rebuilt, buffer.clone());

            for pair in spans.windows(2) {
                prop_assert_eq!(pair[0].end, pair[1].start);
                prop_assert!(!(pair[0].is_plain() && pair[1].is_plain()));
            }
        }

        #[test]
        fn test_classify_is_idempotent(buffer in "[A-Za-z %|\"<>\\-\\[\\]\n]{0,60}") {
            prop_assert_eq!(classify(&buffer), classify(&buffer));
        }
    }
}
