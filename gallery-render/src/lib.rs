//! # gallery-render
//!
//! Template rendering library for the example gallery generator.
//!
//! This crate renders the gallery index and example pages as
//! reStructuredText using Askama, and writes them to disk.

pub mod output;
pub mod templates;

pub use output::{GalleryReport, GalleryWriter, RenderError};
pub use templates::{
    group_by_category, indent_block, CategoryGroup, ExampleTemplate, IndexTemplate, PageRenderer,
};
