//! Cleanup for source text returned by a language model.
//!
//! Models tend to wrap diagrams in markdown fences even when asked not to.

use nom::{
    bytes::complete::{tag, take_until},
    character::complete::char,
    combinator::opt,
    error::Error,
    sequence::pair,
};

const TAGGED_FENCE: &str = "```mermaid";
const BARE_FENCE: &str = "```";

/// Strip every ```` ```mermaid ```` opener, then every bare ```` ``` ````
/// (each with at most one following newline), then trim the result.
pub fn clean_model_output(text: &str) -> String {
    let untagged = strip_fences(text, TAGGED_FENCE);
    strip_fences(&untagged, BARE_FENCE).trim().to_string()
}

fn strip_fences(text: &str, fence: &'static str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Ok((at_fence, before)) = take_until::<_, _, Error<&str>>(fence)(rest) {
        out.push_str(before);
        match pair(tag::<_, _, Error<&str>>(fence), opt(char('\n')))(at_fence) {
            Ok((after, _)) => rest = after,
            Err(_) => break,
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tagged_fence() {
        let raw = "```mermaid\ngraph TD\n    A --> B\n```";
        assert_eq!(clean_model_output(raw), "graph TD\n    A --> B");
    }

    #[test]
    fn strips_bare_fence_and_surrounding_space() {
        let raw = "\n\n```\nsequenceDiagram\n    A->>B: hi\n```\n\n";
        assert_eq!(clean_model_output(raw), "sequenceDiagram\n    A->>B: hi");
    }

    #[test]
    fn strips_every_fence_not_just_the_first() {
        let raw = "```mermaid\ngraph LR\n```\n```mermaid\nA --> B\n```";
        assert_eq!(clean_model_output(raw), "graph LR\nA --> B");
    }

    #[test]
    fn plain_source_is_only_trimmed() {
        assert_eq!(clean_model_output("  graph TD\n  A  "), "graph TD\n  A");
        assert_eq!(clean_model_output(""), "");
    }

    #[test]
    fn inline_backticks_are_kept() {
        assert_eq!(clean_model_output("A[\"`md`\"]"), "A[\"`md`\"]");
    }
}
