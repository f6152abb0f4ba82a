//! Glyph rendering module

mod rasterizer;

pub use rasterizer::{GlyphRasterizer, PlacedGlyph};
