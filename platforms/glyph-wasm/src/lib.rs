use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, HtmlTextAreaElement};
use glyph_protocol::{ScrollOffset, DEFAULT_DIAGRAM, TEMPLATES};
use glyph_overlay::{gutter_lines, render, LayerMetrics, Overlay, Theme, GUTTER_MIN_LINES};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// One classified span as seen from JavaScript.
#[derive(Debug, Serialize, PartialEq)]
pub struct SpanDebug {
    pub start: usize,
    pub end: usize,
    pub class: Option<&'static str>,
    pub text: String,
}

/// The structured response for a full highlight pass.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightReport {
    pub spans: Vec<SpanDebug>,
    pub markup: String,
    pub gutter_lines: usize,
}

/// Text -> Spans -> Markup, without touching any JS value.
pub fn build_report(source: &str) -> HighlightReport {
    let spans = glyph_lexer::classify(source);
    let markup = render(source, &spans);

    HighlightReport {
        spans: spans
            .iter()
            .map(|span| SpanDebug {
                start: span.start,
                end: span.end,
                class: span.class.map(|c| c.css_name()),
                text: span.text(source).to_string(),
            })
            .collect(),
        markup,
        gutter_lines: gutter_lines(source, GUTTER_MIN_LINES),
    }
}

fn from_js_or_default<T: DeserializeOwned + Default>(value: JsValue) -> Result<T, JsError> {
    if value.is_undefined() || value.is_null() {
        Ok(T::default())
    } else {
        Ok(serde_wasm_bindgen::from_value(value)?)
    }
}

/// The highlighter instance living in the browser.
#[wasm_bindgen]
pub struct GlyphEngine {
    overlay: Overlay,
    theme: Theme,
}

#[wasm_bindgen]
impl GlyphEngine {
    /// Both arguments are optional plain objects; missing fields keep their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(metrics: JsValue, theme: JsValue) -> Result<GlyphEngine, JsError> {
        let metrics: LayerMetrics = from_js_or_default(metrics)?;
        let theme: Theme = from_js_or_default(theme)?;
        theme.validate()?;

        Ok(Self {
            overlay: Overlay::new(metrics)?,
            theme,
        })
    }

    pub fn highlight(&self, source: &str) -> String {
        glyph_overlay::highlight(source)
    }

    /// Spans, markup and gutter size in one object.
    pub fn analyze(&self, source: &str) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&build_report(source))?)
    }

    /// Text changed: returns the new markup for the display layer.
    #[wasm_bindgen(js_name = onInput)]
    pub fn on_input(&mut self, source: &str, top: f64, left: f64) -> String {
        self.overlay
            .on_input(source, ScrollOffset::new(top, left))
            .markup
            .clone()
    }

    /// Input layer scrolled: returns `{ top, left }` for the display layer.
    #[wasm_bindgen(js_name = onScroll)]
    pub fn on_scroll(&mut self, top: f64, left: f64) -> Result<JsValue, JsError> {
        let synced = self.overlay.on_scroll(ScrollOffset::new(top, left));
        Ok(serde_wasm_bindgen::to_value(&synced)?)
    }

    #[wasm_bindgen(js_name = gutterLines)]
    pub fn gutter_lines(&self) -> usize {
        self.overlay.frame().gutter_lines
    }

    #[wasm_bindgen(js_name = layerCss)]
    pub fn layer_css(&self) -> String {
        self.overlay.layer_css()
    }

    pub fn stylesheet(&self) -> String {
        self.theme.stylesheet(self.overlay.metrics())
    }
}

/// Drives a `<textarea>` (input layer) and the element stacked behind it
/// (display layer).
#[wasm_bindgen]
pub struct OverlayBinding {
    input: HtmlTextAreaElement,
    display: HtmlElement,
    engine: GlyphEngine,
}

#[wasm_bindgen]
impl OverlayBinding {
    #[wasm_bindgen(constructor)]
    pub fn new(input: HtmlTextAreaElement, display: HtmlElement, engine: GlyphEngine) -> OverlayBinding {
        let mut binding = Self { input, display, engine };
        binding.refresh();
        binding
    }

    /// Call from the textarea's `input` event.
    pub fn refresh(&mut self) {
        let source = self.input.value();
        let scroll = self.input_scroll();
        let markup = self.engine.on_input(&source, scroll.top, scroll.left);
        self.display.set_inner_html(&markup);
        self.apply_scroll(scroll);
        debug!(bytes = source.len(), "display layer refreshed");
    }

    /// Call from the textarea's `scroll` event.
    #[wasm_bindgen(js_name = syncScroll)]
    pub fn sync_scroll(&mut self) {
        let scroll = self.input_scroll();
        let synced = self.engine.overlay.on_scroll(scroll);
        self.apply_scroll(synced);
    }

    #[wasm_bindgen(js_name = gutterLines)]
    pub fn gutter_lines(&self) -> usize {
        self.engine.gutter_lines()
    }

    fn input_scroll(&self) -> ScrollOffset {
        ScrollOffset::new(
            f64::from(self.input.scroll_top()),
            f64::from(self.input.scroll_left()),
        )
    }

    fn apply_scroll(&self, offset: ScrollOffset) {
        self.display.set_scroll_top(offset.top.round() as i32);
        self.display.set_scroll_left(offset.left.round() as i32);
    }
}

#[wasm_bindgen(js_name = cleanModelOutput)]
pub fn clean_model_output(text: &str) -> String {
    glyph_lexer::clean_model_output(text)
}

#[wasm_bindgen]
pub fn templates() -> Result<JsValue, JsError> {
    Ok(serde_wasm_bindgen::to_value(&TEMPLATES)?)
}

#[wasm_bindgen(js_name = defaultDiagram)]
pub fn default_diagram() -> String {
    DEFAULT_DIAGRAM.to_string()
}
