//! Resize helpers shared by the layout nodes
//!
//! `stretch_*` resample, keeping the aspect ratio unless both sides are
//! given. `expand_*` only ever pad, centered, and leave larger images alone.

use pane_render::{Canvas, Color};

fn scaled(value: u32, numerator: u32, denominator: u32) -> u32 {
    if denominator == 0 {
        return 0;
    }
    (value as f64 * numerator as f64 / denominator as f64).round() as u32
}

/// Resample to `width`, keeping the aspect ratio
pub fn stretch_width(image: &Canvas, width: u32) -> Canvas {
    let height = scaled(image.height(), width, image.width());
    image.resize(width, height)
}

/// Resample to `height`, keeping the aspect ratio
pub fn stretch_height(image: &Canvas, height: u32) -> Canvas {
    let width = scaled(image.width(), height, image.height());
    image.resize(width, height)
}

/// Pad to at least `width`, centered
pub fn expand_width(image: &Canvas, width: u32, fill: Color) -> Canvas {
    expand_wh(image, (width, 0), fill)
}

/// Pad to at least `height`, centered
pub fn expand_height(image: &Canvas, height: u32, fill: Color) -> Canvas {
    expand_wh(image, (0, height), fill)
}

/// Pad to at least `(width, height)`, centered
pub fn expand_wh(image: &Canvas, (width, height): (u32, u32), fill: Color) -> Canvas {
    let target = (image.width().max(width), image.height().max(height));
    if target == image.size() {
        return image.clone();
    }
    image.crop_or_expand(target.0, target.1, fill)
}

/// Scale to cover `(width, height)`, then center-crop to exactly that size
pub fn crop_wh(image: &Canvas, (width, height): (u32, u32)) -> Canvas {
    if image.is_empty() {
        return Canvas::new(width, height, Color::TRANSPARENT);
    }
    let (w, h) = image.size();
    let scale = (width as f64 / w as f64).max(height as f64 / h as f64);
    let cover_w = ((w as f64 * scale).ceil() as u32).max(width);
    let cover_h = ((h as f64 * scale).ceil() as u32).max(height);
    image
        .resize(cover_w, cover_h)
        .crop_or_expand(width, height, Color::TRANSPARENT)
}

/// Downscale to fit within `(max_width, max_height)`, keeping the aspect ratio
pub fn stretch_if_exceeds(image: &Canvas, (max_width, max_height): (u32, u32)) -> Canvas {
    let (w, h) = image.size();
    if w <= max_width && h <= max_height {
        return image.clone();
    }
    let scale = (max_width as f64 / w as f64).min(max_height as f64 / h as f64);
    let width = ((w as f64 * scale) as u32).min(max_width);
    let height = ((h as f64 * scale) as u32).min(max_height);
    image.resize(width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stretch_keeps_aspect() {
        let img = Canvas::new(40, 20, Color::RED);
        assert_eq!(stretch_width(&img, 20).size(), (20, 10));
        assert_eq!(stretch_height(&img, 40).size(), (80, 40));
    }

    #[test]
    fn test_stretch_empty_image() {
        let img = Canvas::new(0, 0, Color::RED);
        assert_eq!(stretch_height(&img, 10).size(), (0, 10));
    }

    #[test]
    fn test_expand_only_pads() {
        let img = Canvas::new(10, 10, Color::RED);
        let padded = expand_width(&img, 20, Color::BLUE);
        assert_eq!(padded.size(), (20, 10));
        assert_eq!(padded.get_pixel(0, 0), Some(Color::BLUE));
        assert_eq!(padded.get_pixel(10, 5), Some(Color::RED));

        assert_eq!(expand_width(&img, 5, Color::BLUE), img);
        assert_eq!(expand_wh(&img, (12, 14), Color::BLUE).size(), (12, 14));
    }

    #[test]
    fn test_crop_wh_covers_target() {
        let img = Canvas::new(100, 50, Color::GREEN);
        let cropped = crop_wh(&img, (30, 30));
        assert_eq!(cropped.size(), (30, 30));
        assert_eq!(cropped.get_pixel(0, 0).map(|c| c.a), Some(255));
        assert_eq!(cropped.get_pixel(29, 29).map(|c| c.a), Some(255));
    }

    #[test]
    fn test_stretch_if_exceeds() {
        let img = Canvas::new(200, 50, Color::RED);
        assert_eq!(stretch_if_exceeds(&img, (100, 100)).size(), (100, 25));
        assert_eq!(stretch_if_exceeds(&img, (300, 100)), img);
    }
}
