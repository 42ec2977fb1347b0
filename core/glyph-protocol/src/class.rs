#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The category a highlighted span belongs to.
///
/// Declaration order is the tie-break priority used by the classifier:
/// when two patterns match at the same position, the one declared first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum LexicalClass {
    Comment = 0,
    StringLiteral = 1,
    EdgeLabel = 2,
    Keyword = 3,
    Arrow = 4,
    Bracket = 5,
}

impl LexicalClass {
    /// Every class, in priority order.
    pub const ALL: [LexicalClass; 6] = [
        LexicalClass::Comment,
        LexicalClass::StringLiteral,
        LexicalClass::EdgeLabel,
        LexicalClass::Keyword,
        LexicalClass::Arrow,
        LexicalClass::Bracket,
    ];

    /// Short stable name used in markup (`tok-<name>`) and in themes.
    pub const fn css_name(self) -> &'static str {
        match self {
            LexicalClass::Comment => "comment",
            LexicalClass::StringLiteral => "string",
            LexicalClass::EdgeLabel => "label",
            LexicalClass::Keyword => "keyword",
            LexicalClass::Arrow => "arrow",
            LexicalClass::Bracket => "bracket",
        }
    }

    pub fn from_css_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.css_name() == name)
    }

    /// Position in the priority order (0 = highest).
    pub const fn priority(self) -> u8 {
        self as u8
    }
}

impl core::fmt::Display for LexicalClass {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.css_name())
    }
}
