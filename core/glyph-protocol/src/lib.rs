#![no_std] // Shared by the wasm build and the native tools

pub mod class;
pub mod span;
pub mod templates;

// Re-export core types for convenience
pub use class::LexicalClass;
pub use span::{ScrollOffset, Span};
pub use templates::{template, DiagramTemplate, DEFAULT_DIAGRAM, TEMPLATES};
