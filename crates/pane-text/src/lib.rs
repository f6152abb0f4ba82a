//! Pane Text - Text Measuring and Drawing
//!
//! This crate provides the text collaborator of the layout engine:
//! - Font loading and matching (fontdb)
//! - Text shaping (rustybuzz - HarfBuzz port) with faces parsed once per font
//! - Glyph rasterization onto a `Canvas` (ttf-parser outlines, tiny-skia coverage)
//! - A `Typeface` trait so layout code can measure and draw without caring
//!   where glyphs come from

pub mod font;
pub mod render;

pub use font::{
    system_default_font, Font, FontDatabase, FontQuery, FontStyle, FontWeight, OutlineFont, Typeface,
};
pub use render::{GlyphRasterizer, PlacedGlyph};

/// Text rendering error types
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Failed to parse font: {0}")]
    FontParsing(String),
}

pub type Result<T> = std::result::Result<T, TextError>;
