//! Markdown rendering of resolved declarations.

mod core;
mod items;
/// HTML-to-Markdown conversion for engine-supplied fragments.
pub mod markup;
mod state;

pub use self::core::{RenderedDocument, Renderer};
