use glyph_protocol::LexicalClass;
use nom::{
    bytes::complete::{tag, take_till, take_while1},
    character::complete::{char, one_of},
    combinator::{recognize, verify},
    error::{Error, ErrorKind},
    sequence::{delimited, pair},
    IResult,
};

/// A recognition rule: consumes a prefix of the input and returns the matched text.
pub type Matcher = fn(&str) -> IResult<&str, &str>;

/// One entry of the classification table.
#[derive(Clone, Copy)]
pub struct Pattern {
    pub class: LexicalClass,
    pub matcher: Matcher,
}

impl core::fmt::Debug for Pattern {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Pattern").field("class", &self.class).finish()
    }
}

/// The classification table, in priority order.
///
/// At any position the first pattern that matches wins, regardless of how
/// long a later pattern's match would have been.
pub static PATTERNS: [Pattern; 6] = [
    Pattern { class: LexicalClass::Comment, matcher: comment },
    Pattern { class: LexicalClass::StringLiteral, matcher: string_literal },
    Pattern { class: LexicalClass::EdgeLabel, matcher: edge_label },
    Pattern { class: LexicalClass::Keyword, matcher: keyword },
    Pattern { class: LexicalClass::Arrow, matcher: arrow },
    Pattern { class: LexicalClass::Bracket, matcher: bracket },
];

/// Case-sensitive reserved words, matched on whole words only.
pub const KEYWORDS: &[&str] = &[
    // flowchart
    "graph", "flowchart", "subgraph", "end", "direction",
    "TB", "TD", "BT", "RL", "LR",
    "click", "style", "linkStyle", "classDef", "class",
    // sequence
    "sequenceDiagram", "participant", "actor", "activate", "deactivate",
    "loop", "alt", "else", "opt", "par", "and", "critical", "break", "rect",
    "note", "Note", "over",
    // other diagram headers
    "classDiagram", "stateDiagram", "state", "erDiagram",
    "gantt", "title", "section", "dateFormat", "axisFormat", "excludes",
    "pie", "journey", "gitGraph", "commit", "branch", "checkout", "merge",
    "mindmap", "timeline",
];

/// Connector glyphs. Longer glyphs come first so a shorter prefix never
/// truncates them.
pub const ARROWS: &[&str] = &[
    // entity relationship cardinalities
    "||--o{", "||--|{", "}|..|{", "}o--o{",
    "<-->", "-.->", "-->>", "--|>", "<|--", "..|>", "<|..",
    "-->", "---", "==>", "===", "->>", "-.-", "..>", "<--",
    "->", "--", "..",
];

/// Structural single characters.
pub const BRACKETS: &str = "[](){}>";

pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_line_end(c: char) -> bool {
    c == '\n' || c == '\r'
}

/// `%%` through the end of the line, terminator excluded.
fn comment(input: &str) -> IResult<&str, &str> {
    recognize(pair(tag("%%"), take_till(is_line_end)))(input)
}

/// A double-quoted run closed on the same line by the first `"`.
fn string_literal(input: &str) -> IResult<&str, &str> {
    recognize(delimited(
        char('"'),
        take_till(|c| c == '"' || is_line_end(c)),
        char('"'),
    ))(input)
}

/// Text between two pipes on the same line; `||` is an empty label.
fn edge_label(input: &str) -> IResult<&str, &str> {
    recognize(delimited(
        char('|'),
        take_till(|c| c == '|' || is_line_end(c)),
        char('|'),
    ))(input)
}

fn keyword(input: &str) -> IResult<&str, &str> {
    verify(take_while1(is_word_char), |word: &str| KEYWORDS.contains(&word))(input)
}

fn arrow(input: &str) -> IResult<&str, &str> {
    for glyph in ARROWS {
        if let Ok(found) = tag::<_, _, Error<&str>>(*glyph)(input) {
            return Ok(found);
        }
    }
    Err(nom::Err::Error(Error::new(input, ErrorKind::Tag)))
}

fn bracket(input: &str) -> IResult<&str, &str> {
    recognize(one_of(BRACKETS))(input)
}

/// Try every pattern in priority order at the start of `input`.
///
/// Returns the winning class and the byte length of its match. Empty
/// matches count as no match so the caller always advances.
pub fn match_at(input: &str) -> Option<(LexicalClass, usize)> {
    PATTERNS.iter().find_map(|pattern| match (pattern.matcher)(input) {
        Ok((_, matched)) if !matched.is_empty() => Some((pattern.class, matched.len())),
        _ => None,
    })
}
