use glyph_protocol::ScrollOffset;
use tracing::debug;

use crate::markup::highlight;
use crate::metrics::{LayerMetrics, MetricsError};

/// Rows the line-number gutter shows even for short documents.
pub const GUTTER_MIN_LINES: usize = 30;

/// Copy the input layer's scroll position onto the display layer.
///
/// The copy only ever runs input -> display.
pub fn sync_scroll(source: ScrollOffset) -> ScrollOffset {
    ScrollOffset::new(source.top, source.left)
}

/// Number of gutter rows for `buffer`: its line count, but at least `minimum`.
pub fn gutter_lines(buffer: &str, minimum: usize) -> usize {
    buffer.split('\n').count().max(minimum)
}

/// Everything the display layer needs after one event.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayFrame {
    pub markup: String,
    pub scroll: ScrollOffset,
    pub gutter_lines: usize,
}

impl OverlayFrame {
    fn blank() -> Self {
        Self {
            markup: highlight(""),
            scroll: ScrollOffset::ORIGIN,
            gutter_lines: GUTTER_MIN_LINES,
        }
    }
}

/// A read-only highlighted layer stacked behind a transparent input layer.
///
/// One set of metrics styles both layers. Every text event rebuilds the
/// frame from scratch; nothing from the previous frame is merged in.
#[derive(Debug, Clone)]
pub struct Overlay {
    metrics: LayerMetrics,
    frame: OverlayFrame,
    revision: u64,
}

impl Overlay {
    pub fn new(metrics: LayerMetrics) -> Result<Self, MetricsError> {
        if let Err(err) = metrics.validate() {
            debug!(%err, "rejected overlay metrics");
            return Err(err);
        }
        Ok(Self {
            metrics,
            frame: OverlayFrame::blank(),
            revision: 0,
        })
    }

    pub fn metrics(&self) -> &LayerMetrics {
        &self.metrics
    }

    /// Declarations applied to both layers.
    pub fn layer_css(&self) -> String {
        self.metrics.layer_css()
    }

    pub fn frame(&self) -> &OverlayFrame {
        &self.frame
    }

    /// How many text events have produced a frame so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Text changed: re-highlight the whole buffer and re-sync scroll.
    pub fn on_input(&mut self, buffer: &str, scroll: ScrollOffset) -> &OverlayFrame {
        self.frame = OverlayFrame {
            markup: highlight(buffer),
            scroll: sync_scroll(scroll),
            gutter_lines: gutter_lines(buffer, GUTTER_MIN_LINES),
        };
        self.revision += 1;
        debug!(
            revision = self.revision,
            bytes = buffer.len(),
            markup = self.frame.markup.len(),
            "overlay frame rebuilt"
        );
        &self.frame
    }

    /// Input layer scrolled: only the display layer's offset changes.
    pub fn on_scroll(&mut self, scroll: ScrollOffset) -> ScrollOffset {
        self.frame.scroll = sync_scroll(scroll);
        self.frame.scroll
    }
}
