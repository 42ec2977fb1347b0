use glyph_protocol::LexicalClass;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::markup::TOKEN_CLASS_PREFIX;
use crate::metrics::LayerMetrics;

pub const EDITOR_CLASS: &str = "glyph-editor";
pub const LAYER_CLASS: &str = "glyph-layer";
pub const HIGHLIGHT_CLASS: &str = "glyph-highlight";
pub const INPUT_CLASS: &str = "glyph-input";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    #[error("invalid colour for {slot}: {value:?}")]
    InvalidColor { slot: &'static str, value: String },
}

/// Colours for the editor surface and each lexical class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background: String,
    pub foreground: String,
    pub caret: String,
    pub comment: String,
    pub string: String,
    pub label: String,
    pub keyword: String,
    pub arrow: String,
    pub bracket: String,
}

impl Default for Theme {
    /// Dark slate palette.
    fn default() -> Self {
        Self {
            background: "#0f172a".to_string(),
            foreground: "#f1f5f9".to_string(),
            caret: "#f1f5f9".to_string(),
            comment: "#64748b".to_string(),
            string: "#86efac".to_string(),
            label: "#fcd34d".to_string(),
            keyword: "#c084fc".to_string(),
            arrow: "#f472b6".to_string(),
            bracket: "#94a3b8".to_string(),
        }
    }
}

impl Theme {
    pub fn color(&self, class: LexicalClass) -> &str {
        match class {
            LexicalClass::Comment => &self.comment,
            LexicalClass::StringLiteral => &self.string,
            LexicalClass::EdgeLabel => &self.label,
            LexicalClass::Keyword => &self.keyword,
            LexicalClass::Arrow => &self.arrow,
            LexicalClass::Bracket => &self.bracket,
        }
    }

    /// Colours end up inside a stylesheet, so only plain colour syntax is accepted.
    pub fn validate(&self) -> Result<(), ThemeError> {
        let slots = [
            ("background", &self.background),
            ("foreground", &self.foreground),
            ("caret", &self.caret),
        ];
        let classes = LexicalClass::ALL.map(|class| (class.css_name(), self.color(class)));

        for (slot, value) in slots.iter().map(|(s, v)| (*s, v.as_str())).chain(classes) {
            let ok = !value.trim().is_empty()
                && value
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '#' | '(' | ')' | ',' | '.' | '%' | ' ' | '-'));
            if !ok {
                return Err(ThemeError::InvalidColor { slot, value: value.to_string() });
            }
        }
        Ok(())
    }

    /// Stylesheet for the editor container, both layers and every token class.
    pub fn stylesheet(&self, metrics: &LayerMetrics) -> String {
        let mut css = format!(
            ".{EDITOR_CLASS} {{ position: relative; overflow: hidden; background: {}; }}\n\
             .{LAYER_CLASS} {{ position: absolute; inset: 0; overflow: auto; {} }}\n\
             .{HIGHLIGHT_CLASS} {{ pointer-events: none; color: {}; }}\n\
             .{INPUT_CLASS} {{ background: transparent; color: transparent; caret-color: {}; resize: none; outline: none; }}\n",
            self.background,
            metrics.layer_css(),
            self.foreground,
            self.caret,
        );
        for class in LexicalClass::ALL {
            css.push_str(&format!(
                ".{}{} {{ color: {}; }}\n",
                TOKEN_CLASS_PREFIX,
                class.css_name(),
                self.color(class)
            ));
        }
        css
    }
}
