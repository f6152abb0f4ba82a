//! Outline (TrueType/OpenType) typeface

use std::fmt;
use std::path::Path;

use pane_render::{Canvas, Color};

use super::Typeface;
use crate::render::{GlyphRasterizer, PlacedGlyph};
use crate::{Result, TextError};

/// A scalable font backed by raw font file bytes.
///
/// The faces are parsed once on load. Font bytes stay alive for the rest of
/// the process, so load a font once and share it through [`super::Font`].
#[derive(Clone)]
pub struct OutlineFont {
    name: String,
    index: u32,
    /// Shaping tables (rustybuzz)
    shaper: rustybuzz::Face<'static>,
    /// Metrics and glyph outlines (ttf-parser)
    outlines: ttf_parser::Face<'static>,
}

impl OutlineFont {
    /// Load face 0 of a font file
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)
            .map_err(|e| TextError::FontNotFound(format!("{}: {}", path.display(), e)))?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_data(data, 0, name)
    }

    /// Load face `index` from font bytes
    pub fn from_data(data: Vec<u8>, index: u32, name: impl Into<String>) -> Result<Self> {
        // Validate before leaking so rejected bytes are freed
        ttf_parser::Face::parse(&data, index).map_err(|e| TextError::FontParsing(e.to_string()))?;
        let data: &'static [u8] = Box::leak(data.into_boxed_slice());

        let outlines = ttf_parser::Face::parse(data, index).map_err(|e| TextError::FontParsing(e.to_string()))?;
        let shaper = rustybuzz::Face::from_slice(data, index)
            .ok_or_else(|| TextError::FontParsing("no shaping tables".into()))?;
        Ok(Self {
            name: name.into(),
            index,
            shaper,
            outlines,
        })
    }

    fn scale(&self, size: f32) -> f32 {
        match self.outlines.units_per_em() {
            0 => 0.0,
            upem => size / upem as f32,
        }
    }

    /// Pixel distance from the top of a line to its baseline
    pub fn baseline(&self, size: f32) -> f32 {
        self.outlines.ascender() as f32 * self.scale(size)
    }

    /// Pixel height of a line (ascender to descender)
    pub fn line_height(&self, size: f32) -> u32 {
        let extent = self.outlines.ascender() as f32 - self.outlines.descender() as f32;
        (extent * self.scale(size)).ceil().max(0.0) as u32
    }

    fn shape(&self, text: &str) -> rustybuzz::GlyphBuffer {
        let mut buffer = rustybuzz::UnicodeBuffer::new();
        buffer.push_str(text);
        rustybuzz::shape(&self.shaper, &[], buffer)
    }

    /// Sum of shaped advances in pixels
    pub fn advance(&self, text: &str, size: f32) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        let scale = self.scale(size);
        self.shape(text)
            .glyph_positions()
            .iter()
            .map(|p| p.x_advance as f32 * scale)
            .sum()
    }

    /// Shaped glyphs with pen positions in pixels, and the total advance
    pub fn place_glyphs(&self, text: &str, size: f32) -> (Vec<PlacedGlyph>, f32) {
        let scale = self.scale(size);
        let shaped = self.shape(text);
        let (mut x, mut y) = (0.0, 0.0);
        let glyphs = shaped
            .glyph_infos()
            .iter()
            .zip(shaped.glyph_positions())
            .map(|(info, pos)| {
                let glyph = PlacedGlyph {
                    id: info.glyph_id as u16,
                    x: x + pos.x_offset as f32 * scale,
                    y: y + pos.y_offset as f32 * scale,
                };
                x += pos.x_advance as f32 * scale;
                y += pos.y_advance as f32 * scale;
                glyph
            })
            .collect();
        (glyphs, x)
    }
}

impl fmt::Debug for OutlineFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutlineFont")
            .field("name", &self.name)
            .field("index", &self.index)
            .field("units_per_em", &self.outlines.units_per_em())
            .finish()
    }
}

impl Typeface for OutlineFont {
    fn name(&self) -> &str {
        &self.name
    }

    fn measure(&self, text: &str, size: f32) -> (u32, u32) {
        let width = self.advance(text, size).ceil().max(0.0) as u32;
        (width, self.line_height(size))
    }

    fn draw(&self, canvas: &mut Canvas, x: i32, y: i32, text: &str, size: f32, color: Color) {
        let (glyphs, advance) = self.place_glyphs(text, size);
        let width = advance.ceil().max(0.0) as u32;
        let height = self.line_height(size);
        let mask = GlyphRasterizer::new().rasterize(
            &self.outlines,
            &glyphs,
            self.scale(size),
            (width, height),
            self.baseline(size),
        );
        canvas.blend_coverage(x, y, &mask, color);
    }
}
