use glyph_protocol::{LexicalClass, Span};

/// A span paired with the text it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub span: Span,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub fn class(&self) -> Option<LexicalClass> {
        self.span.class
    }

    pub fn is_plain(&self) -> bool {
        self.span.is_plain()
    }
}
