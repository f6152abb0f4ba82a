//! Glyph rasterization

use pane_render::AlphaMask;
use ttf_parser::{Face, GlyphId, OutlineBuilder};

/// A shaped glyph and its pen position in pixels (y up, as in font space)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    pub id: u16,
    pub x: f32,
    pub y: f32,
}

/// Rasterizes placed glyphs into coverage masks using tiny-skia
#[derive(Debug, Clone)]
pub struct GlyphRasterizer {
    /// Anti-aliased edges
    pub anti_alias: bool,
}

impl GlyphRasterizer {
    /// Create a new rasterizer
    pub fn new() -> Self {
        Self { anti_alias: true }
    }

    /// Rasterize glyph outlines into a mask of `size`.
    ///
    /// Outlines are in font units and scaled by `scale`; `baseline` is the
    /// y of the baseline in mask pixels.
    pub fn rasterize(
        &self,
        face: &Face,
        glyphs: &[PlacedGlyph],
        scale: f32,
        (width, height): (u32, u32),
        baseline: f32,
    ) -> AlphaMask {
        let empty = AlphaMask::new(width, height);
        let Some(mut mask) = tiny_skia::Mask::new(width, height) else {
            return empty;
        };

        let mut builder = PathBuilder::new(scale);
        for glyph in glyphs {
            builder.origin_x = glyph.x;
            builder.origin_y = baseline - glyph.y;
            // Glyphs without outlines (spaces) are skipped
            let _ = face.outline_glyph(GlyphId(glyph.id), &mut builder);
        }

        let Some(path) = builder.finish() else {
            return empty;
        };
        mask.fill_path(
            &path,
            tiny_skia::FillRule::Winding,
            self.anti_alias,
            tiny_skia::Transform::identity(),
        );

        AlphaMask::from_data(width, height, mask.data().to_vec()).unwrap_or(empty)
    }
}

impl Default for GlyphRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Path builder that converts ttf-parser outlines to tiny-skia paths
struct PathBuilder {
    builder: tiny_skia::PathBuilder,
    scale: f32,
    origin_x: f32,
    origin_y: f32,
}

impl PathBuilder {
    fn new(scale: f32) -> Self {
        Self {
            builder: tiny_skia::PathBuilder::new(),
            scale,
            origin_x: 0.0,
            origin_y: 0.0,
        }
    }

    fn transform_x(&self, x: f32) -> f32 {
        self.origin_x + x * self.scale
    }

    fn transform_y(&self, y: f32) -> f32 {
        self.origin_y - y * self.scale // Flip Y axis
    }

    fn finish(self) -> Option<tiny_skia::Path> {
        self.builder.finish()
    }
}

impl OutlineBuilder for PathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(self.transform_x(x), self.transform_y(y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(self.transform_x(x), self.transform_y(y));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder.quad_to(
            self.transform_x(x1),
            self.transform_y(y1),
            self.transform_x(x),
            self.transform_y(y),
        );
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(
            self.transform_x(x1),
            self.transform_y(y1),
            self.transform_x(x2),
            self.transform_y(y2),
            self.transform_x(x),
            self.transform_y(y),
        );
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
