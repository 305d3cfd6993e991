//! Rendering module for previewing and serializing extracted tables.

mod json;
mod markdown;
mod options;
mod text;

pub use json::{to_json, JsonFormat};
pub use markdown::to_markdown;
pub use options::RenderOptions;
pub use text::to_text;
