use std::fmt::Write as _;

use glyph_protocol::Span;
use v_htmlescape::escape;

/// Prefix of the class attribute carried by every tagged span.
pub const TOKEN_CLASS_PREFIX: &str = "tok-";

/// Render classified spans of `buffer` as markup for the display layer.
///
/// Every span is escaped whatever its class. The result always ends with
/// one `\n` past the buffer's own content so a trailing empty line still
/// has height.
pub fn render(buffer: &str, spans: &[Span]) -> String {
    let mut out = String::with_capacity(buffer.len() + buffer.len() / 2 + 1);

    for span in spans {
        let text = escape(span.text(buffer));
        // Writing into a String cannot fail.
        let _ = match span.class {
            Some(class) => write!(
                out,
                "<span class=\"{}{}\">{}</span>",
                TOKEN_CLASS_PREFIX,
                class.css_name(),
                text
            ),
            None => write!(out, "{}", text),
        };
    }

    out.push('\n');
    out
}

/// Classify and render in one pass.
pub fn highlight(buffer: &str) -> String {
    render(buffer, &glyph_lexer::classify(buffer))
}
