//! Canvas - RGBA pixel buffer
//!
//! Zero-sized canvases are valid: layout arithmetic can legitimately produce
//! empty rows or columns, and every operation treats them as no-ops.

use std::path::Path;

use image::{imageops, Rgba, RgbaImage};

use crate::paint::{ellipse_path, path_mask, pie_slice_path, rect_path};
use crate::{AlphaMask, Color, RenderError, Result};

/// Resampling filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    /// Nearest neighbor (fast, blocky)
    Nearest,
    /// Bilinear
    Triangle,
    /// Lanczos with window 3 (default, highest quality)
    #[default]
    Lanczos3,
}

impl From<Filter> for imageops::FilterType {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::Nearest => imageops::FilterType::Nearest,
            Filter::Triangle => imageops::FilterType::Triangle,
            Filter::Lanczos3 => imageops::FilterType::Lanczos3,
        }
    }
}

/// Pixel canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    image: RgbaImage,
}

/// Intersection of a source placed at (x, y) with a destination
struct Overlap {
    src_x: u32,
    src_y: u32,
    dst_x: u32,
    dst_y: u32,
    width: u32,
    height: u32,
}

fn overlap(dst: (u32, u32), src: (u32, u32), x: i32, y: i32) -> Option<Overlap> {
    let (x, y) = (x as i64, y as i64);
    let left = x.max(0);
    let top = y.max(0);
    let right = (x + src.0 as i64).min(dst.0 as i64);
    let bottom = (y + src.1 as i64).min(dst.1 as i64);
    if right <= left || bottom <= top {
        return None;
    }
    Some(Overlap {
        src_x: (left - x) as u32,
        src_y: (top - y) as u32,
        dst_x: left as u32,
        dst_y: top as u32,
        width: (right - left) as u32,
        height: (bottom - top) as u32,
    })
}

/// `src * m + dst * (1 - m)` on one channel, `m` in 0..=255
#[inline]
fn mix(src: u8, dst: u8, m: u8) -> u8 {
    let m = m as u32;
    ((src as u32 * m + dst as u32 * (255 - m) + 127) / 255) as u8
}

#[inline]
fn mix_pixel(src: [u8; 4], dst: [u8; 4], m: u8) -> [u8; 4] {
    [
        mix(src[0], dst[0], m),
        mix(src[1], dst[1], m),
        mix(src[2], dst[2], m),
        mix(src[3], dst[3], m),
    ]
}

/// Porter-Duff source-over on straight alpha
#[inline]
fn over(src: [u8; 4], dst: [u8; 4]) -> [u8; 4] {
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let oa = sa + da * (1.0 - sa);
    if oa <= 0.0 {
        return [0, 0, 0, 0];
    }
    let channel = |s: u8, d: u8| -> u8 {
        let v = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / oa;
        v.round().clamp(0.0, 255.0) as u8
    };
    [
        channel(src[0], dst[0]),
        channel(src[1], dst[1]),
        channel(src[2], dst[2]),
        (oa * 255.0).round().clamp(0.0, 255.0) as u8,
    ]
}

impl Canvas {
    /// Create a canvas filled with `fill`
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba(fill.to_array())),
        }
    }

    /// Create a 0x0 canvas
    pub fn empty() -> Self {
        Self::new(0, 0, Color::TRANSPARENT)
    }

    /// Create from raw RGBA bytes
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        RgbaImage::from_raw(width, height, data).map(|image| Self { image })
    }

    /// Wrap an existing RGBA image
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Decode PNG bytes
    pub fn decode(data: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(data)
            .map_err(|e| RenderError::Decode(e.to_string()))?;
        Ok(Self { image: image.to_rgba8() })
    }

    /// Load an image file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let image = image::open(path.as_ref())
            .map_err(|e| RenderError::Decode(format!("{}: {}", path.as_ref().display(), e)))?;
        Ok(Self { image: image.to_rgba8() })
    }

    /// Write the canvas as PNG
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.image
            .save_with_format(path.as_ref(), image::ImageFormat::Png)
            .map_err(|e| RenderError::Encode(e.to_string()))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// (width, height)
    pub fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Get pixel color, `None` outside the canvas
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.image.get_pixel_checked(x, y).map(|p| Color::from_array(p.0))
    }

    /// Set a pixel color, ignored outside the canvas
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if let Some(p) = self.image.get_pixel_mut_checked(x, y) {
            *p = Rgba(color.to_array());
        }
    }

    /// Replace every pixel with `color`
    pub fn clear(&mut self, color: Color) {
        for p in self.image.pixels_mut() {
            *p = Rgba(color.to_array());
        }
    }

    /// Fill a rectangle, replacing pixels (clipped to the canvas)
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) {
        let Some(o) = overlap(self.size(), (w, h), x, y) else {
            return;
        };
        for dy in 0..o.height {
            for dx in 0..o.width {
                self.image.put_pixel(o.dst_x + dx, o.dst_y + dy, Rgba(color.to_array()));
            }
        }
    }

    /// Fill an ellipse inscribed in the box (x, y, w, h)
    pub fn fill_ellipse(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        if let Some(path) = ellipse_path(x, y, w, h) {
            let mask = path_mask(self.width(), self.height(), &path, true);
            self.blend_coverage(0, 0, &mask, color);
        }
    }

    /// Fill a pie slice of the ellipse inscribed in (x, y, w, h).
    ///
    /// Angles are degrees clockwise from 3 o'clock.
    #[allow(clippy::too_many_arguments)]
    pub fn fill_pie_slice(&mut self, x: f32, y: f32, w: f32, h: f32, start: f32, end: f32, color: Color) {
        if let Some(path) = pie_slice_path(x, y, w, h, start, end) {
            let mask = path_mask(self.width(), self.height(), &path, true);
            self.blend_coverage(0, 0, &mask, color);
        }
    }

    /// Fill the rectangle between fractional edges with coverage blending
    pub fn fill_rect_edges(&mut self, left: f32, top: f32, right: f32, bottom: f32, color: Color) {
        if let Some(path) = rect_path(left, top, right, bottom) {
            let mask = path_mask(self.width(), self.height(), &path, false);
            self.blend_coverage(0, 0, &mask, color);
        }
    }

    /// Paint a solid color through a coverage mask placed at (x, y)
    pub fn blend_coverage(&mut self, x: i32, y: i32, mask: &AlphaMask, color: Color) {
        let Some(o) = overlap(self.size(), (mask.width(), mask.height()), x, y) else {
            return;
        };
        let src = color.to_array();
        for dy in 0..o.height {
            for dx in 0..o.width {
                let m = mask.get(o.src_x + dx, o.src_y + dy);
                if m == 0 {
                    continue;
                }
                let dst = self.image.get_pixel_mut(o.dst_x + dx, o.dst_y + dy);
                dst.0 = mix_pixel(src, dst.0, m);
            }
        }
    }

    /// Paste `src` at (x, y) using its own alpha channel as the mask.
    ///
    /// Every channel, alpha included, is mixed as `src * a + dst * (1 - a)`.
    pub fn paste(&mut self, src: &Canvas, x: i32, y: i32) {
        let Some(o) = overlap(self.size(), src.size(), x, y) else {
            return;
        };
        for dy in 0..o.height {
            for dx in 0..o.width {
                let s = src.image.get_pixel(o.src_x + dx, o.src_y + dy).0;
                let dst = self.image.get_pixel_mut(o.dst_x + dx, o.dst_y + dy);
                dst.0 = mix_pixel(s, dst.0, s[3]);
            }
        }
    }

    /// Paste `src` at (x, y) through an explicit mask aligned with `src`
    pub fn paste_masked(&mut self, src: &Canvas, x: i32, y: i32, mask: &AlphaMask) {
        let Some(o) = overlap(self.size(), src.size(), x, y) else {
            return;
        };
        for dy in 0..o.height {
            for dx in 0..o.width {
                let m = mask.get(o.src_x + dx, o.src_y + dy);
                let s = src.image.get_pixel(o.src_x + dx, o.src_y + dy).0;
                let dst = self.image.get_pixel_mut(o.dst_x + dx, o.dst_y + dy);
                dst.0 = mix_pixel(s, dst.0, m);
            }
        }
    }

    /// Copy `src` at (x, y), replacing pixels without any masking
    pub fn copy_from(&mut self, src: &Canvas, x: i32, y: i32) {
        let Some(o) = overlap(self.size(), src.size(), x, y) else {
            return;
        };
        for dy in 0..o.height {
            for dx in 0..o.width {
                let s = *src.image.get_pixel(o.src_x + dx, o.src_y + dy);
                self.image.put_pixel(o.dst_x + dx, o.dst_y + dy, s);
            }
        }
    }

    /// Composite `src` over this canvas at the origin (source-over)
    pub fn alpha_composite(&mut self, src: &Canvas) {
        let Some(o) = overlap(self.size(), src.size(), 0, 0) else {
            return;
        };
        for dy in 0..o.height {
            for dx in 0..o.width {
                let s = src.image.get_pixel(dx, dy).0;
                let dst = self.image.get_pixel_mut(dx, dy);
                dst.0 = over(s, dst.0);
            }
        }
    }

    /// Resample to exactly (w, h) with Lanczos3
    pub fn resize(&self, w: u32, h: u32) -> Canvas {
        self.resize_with(w, h, Filter::Lanczos3)
    }

    /// Resample to exactly (w, h)
    pub fn resize_with(&self, w: u32, h: u32, filter: Filter) -> Canvas {
        if w == 0 || h == 0 || self.is_empty() {
            return Canvas::new(w, h, Color::TRANSPARENT);
        }
        if (w, h) == self.size() {
            return self.clone();
        }
        Canvas {
            image: imageops::resize(&self.image, w, h, filter.into()),
        }
    }

    /// Center-crop and/or center-pad to exactly (w, h), padding with `fill`
    pub fn crop_or_expand(&self, w: u32, h: u32, fill: Color) -> Canvas {
        let mut out = Canvas::new(w, h, fill);
        let x = (w as i64 - self.width() as i64) / 2;
        let y = (h as i64 - self.height() as i64) / 2;
        out.copy_from(self, x as i32, y as i32);
        out
    }

    /// Sub-rectangle, clamped to the canvas
    pub fn crop(&self, x: u32, y: u32, w: u32, h: u32) -> Canvas {
        Canvas {
            image: imageops::crop_imm(&self.image, x, y, w, h).to_image(),
        }
    }

    pub fn flip_horizontal(&self) -> Canvas {
        Canvas { image: imageops::flip_horizontal(&self.image) }
    }

    pub fn flip_vertical(&self) -> Canvas {
        Canvas { image: imageops::flip_vertical(&self.image) }
    }

    pub fn rotate_180(&self) -> Canvas {
        Canvas { image: imageops::rotate180(&self.image) }
    }

    /// Get pixel data as raw bytes (RGBA)
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Borrow the underlying image
    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

impl From<RgbaImage> for Canvas {
    fn from(image: RgbaImage) -> Self {
        Canvas::from_image(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_fills() {
        let canvas = Canvas::new(4, 3, Color::RED);
        assert_eq!(canvas.size(), (4, 3));
        assert_eq!(canvas.get_pixel(3, 2), Some(Color::RED));
        assert_eq!(canvas.get_pixel(4, 0), None);
    }

    #[test]
    fn test_paste_uses_source_alpha() {
        let mut dst = Canvas::new(4, 4, Color::WHITE);
        let mut src = Canvas::new(2, 2, Color::BLACK);
        src.set_pixel(1, 1, Color::TRANSPARENT);
        dst.paste(&src, 1, 1);
        assert_eq!(dst.get_pixel(1, 1), Some(Color::BLACK));
        assert_eq!(dst.get_pixel(2, 2), Some(Color::WHITE));
        assert_eq!(dst.get_pixel(0, 0), Some(Color::WHITE));
    }

    #[test]
    fn test_paste_clips_negative_offsets() {
        let mut dst = Canvas::new(3, 3, Color::WHITE);
        let src = Canvas::new(2, 2, Color::BLUE);
        dst.paste(&src, -1, -1);
        assert_eq!(dst.get_pixel(0, 0), Some(Color::BLUE));
        assert_eq!(dst.get_pixel(1, 1), Some(Color::WHITE));
    }

    #[test]
    fn test_copy_from_replaces_transparent() {
        let mut dst = Canvas::new(2, 2, Color::WHITE);
        let src = Canvas::new(1, 1, Color::TRANSPARENT);
        dst.copy_from(&src, 0, 0);
        assert_eq!(dst.get_pixel(0, 0), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_alpha_composite_over() {
        let mut dst = Canvas::new(1, 1, Color::WHITE);
        dst.alpha_composite(&Canvas::new(1, 1, Color::TRANSPARENT));
        assert_eq!(dst.get_pixel(0, 0), Some(Color::WHITE));
        dst.alpha_composite(&Canvas::new(1, 1, Color::RED));
        assert_eq!(dst.get_pixel(0, 0), Some(Color::RED));

        let mut clear = Canvas::new(1, 1, Color::TRANSPARENT);
        clear.alpha_composite(&Canvas::new(1, 1, Color::rgba(0, 0, 255, 128)));
        assert_eq!(clear.get_pixel(0, 0), Some(Color::rgba(0, 0, 255, 128)));
    }

    #[test]
    fn test_crop_or_expand_centers() {
        let src = Canvas::new(2, 2, Color::RED);
        let padded = src.crop_or_expand(4, 4, Color::WHITE);
        assert_eq!(padded.get_pixel(0, 0), Some(Color::WHITE));
        assert_eq!(padded.get_pixel(1, 1), Some(Color::RED));
        assert_eq!(padded.get_pixel(3, 3), Some(Color::WHITE));

        let cropped = Canvas::new(10, 10, Color::GREEN).crop_or_expand(4, 6, Color::WHITE);
        assert_eq!(cropped.size(), (4, 6));
        assert_eq!(cropped.get_pixel(0, 0), Some(Color::GREEN));
    }

    #[test]
    fn test_resize_exact() {
        let src = Canvas::new(10, 20, Color::BLUE);
        let out = src.resize(5, 7);
        assert_eq!(out.size(), (5, 7));
        assert_eq!(src.resize(0, 7).size(), (0, 7));
        assert_eq!(Canvas::empty().resize(3, 3).size(), (3, 3));
    }

    #[test]
    fn test_flips() {
        let mut src = Canvas::new(2, 2, Color::WHITE);
        src.set_pixel(0, 0, Color::RED);
        assert_eq!(src.flip_horizontal().get_pixel(1, 0), Some(Color::RED));
        assert_eq!(src.flip_vertical().get_pixel(0, 1), Some(Color::RED));
        assert_eq!(src.rotate_180().get_pixel(1, 1), Some(Color::RED));
    }

    #[test]
    fn test_fill_ellipse_center() {
        let mut canvas = Canvas::new(20, 20, Color::TRANSPARENT);
        canvas.fill_ellipse(0.0, 0.0, 20.0, 20.0, Color::RED);
        assert_eq!(canvas.get_pixel(10, 10), Some(Color::RED));
        assert_eq!(canvas.get_pixel(0, 0), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_zero_sized_operations_are_noops() {
        let mut canvas = Canvas::empty();
        canvas.fill_rect(0, 0, 10, 10, Color::RED);
        canvas.fill_ellipse(0.0, 0.0, 10.0, 10.0, Color::RED);
        canvas.paste(&Canvas::new(2, 2, Color::RED), 0, 0);
        assert!(canvas.is_empty());
    }
}
