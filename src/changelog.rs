//! Changelog computation: sections per version boundary and their rendering.

/// Changelog assembly over one range or all version tags.
pub mod assembler;

/// Single section construction for a revision range.
pub mod builder;

/// JSON and markdown output.
pub mod render;

/// Section and changelog data model.
pub mod types;
