use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("tab size must be at least 1")]
    ZeroTabSize,
    #[error("invalid font family {0:?}")]
    InvalidFontFamily(String),
}

/// Text layout shared by the display layer and the input layer.
///
/// Both layers are styled from the same `LayerMetrics`; any difference in
/// these values makes the styled text drift away from the caret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayerMetrics {
    pub font_family: String,
    pub font_size_px: f64,
    pub line_height_px: f64,
    pub letter_spacing_px: f64,
    pub padding_px: f64,
    pub tab_size: u32,
    pub wrap: bool,
}

impl Default for LayerMetrics {
    fn default() -> Self {
        Self {
            font_family: "ui-monospace, SFMono-Regular, Menlo, Consolas, monospace".to_string(),
            font_size_px: 14.0,
            line_height_px: 24.0,
            letter_spacing_px: 0.0,
            padding_px: 16.0,
            tab_size: 4,
            wrap: false,
        }
    }
}

impl LayerMetrics {
    pub fn validate(&self) -> Result<(), MetricsError> {
        positive("font size", self.font_size_px)?;
        positive("line height", self.line_height_px)?;
        finite("letter spacing", self.letter_spacing_px)?;
        finite("padding", self.padding_px)?;
        if self.padding_px < 0.0 {
            return Err(MetricsError::Negative { field: "padding", value: self.padding_px });
        }
        if self.tab_size == 0 {
            return Err(MetricsError::ZeroTabSize);
        }

        let family = self.font_family.trim();
        if family.is_empty() || family.contains(|c: char| matches!(c, ';' | '{' | '}' | '<' | '>')) {
            return Err(MetricsError::InvalidFontFamily(self.font_family.clone()));
        }
        Ok(())
    }

    /// CSS declarations applied verbatim to both layers.
    pub fn layer_css(&self) -> String {
        let (white_space, overflow_wrap) = if self.wrap {
            ("pre-wrap", "break-word")
        } else {
            ("pre", "normal")
        };

        format!(
            "font-family: {}; font-size: {}px; line-height: {}px; letter-spacing: {}px; \
             padding: {}px; tab-size: {}; white-space: {}; overflow-wrap: {}; \
             margin: 0; border: 0; box-sizing: border-box;",
            self.font_family.trim(),
            self.font_size_px,
            self.line_height_px,
            self.letter_spacing_px,
            self.padding_px,
            self.tab_size,
            white_space,
            overflow_wrap,
        )
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), MetricsError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(MetricsError::NotFinite { field, value })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), MetricsError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(MetricsError::NotPositive { field, value })
    }
}
