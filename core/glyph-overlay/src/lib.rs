pub mod markup;
pub mod metrics;
pub mod overlay;
pub mod theme;

pub use markup::{highlight, render, TOKEN_CLASS_PREFIX};
pub use metrics::{LayerMetrics, MetricsError};
pub use overlay::{gutter_lines, sync_scroll, Overlay, OverlayFrame, GUTTER_MIN_LINES};
pub use theme::{Theme, ThemeError};
