use crate::class::LexicalClass;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A contiguous slice of the buffer, optionally tagged with a class.
///
/// Offsets are byte offsets and always fall on UTF-8 char boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub class: Option<LexicalClass>,
}

impl Span {
    pub const fn new(start: usize, end: usize, class: Option<LexicalClass>) -> Self {
        Self { start, end, class }
    }

    pub const fn plain(start: usize, end: usize) -> Self {
        Self::new(start, end, None)
    }

    pub const fn tagged(start: usize, end: usize, class: LexicalClass) -> Self {
        Self::new(start, end, Some(class))
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn is_plain(&self) -> bool {
        self.class.is_none()
    }

    /// The text this span covers. `buffer` must be the buffer it was produced from.
    pub fn text<'a>(&self, buffer: &'a str) -> &'a str {
        &buffer[self.start..self.end]
    }
}

/// Pixel scroll position of a scrollable layer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScrollOffset {
    pub top: f64,
    pub left: f64,
}

impl ScrollOffset {
    pub const ORIGIN: ScrollOffset = ScrollOffset { top: 0.0, left: 0.0 };

    pub const fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }
}
