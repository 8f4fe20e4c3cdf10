//! Changelog assembly, rendering and writing.

pub mod document;
pub mod template;
pub mod writer;

pub use document::{AssembleOptions, ChangelogDocument};
pub use template::Renderer;
pub use writer::write_changelog;
