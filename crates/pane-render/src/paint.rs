//! Shape rasterization through tiny-skia masks

use crate::AlphaMask;
use tiny_skia::{FillRule, Mask, Path, PathBuilder, Rect, Transform};

/// Segments used to approximate a full circle for pie slices
const ARC_SEGMENTS: u32 = 96;

/// Axis-aligned rectangle path from edges
pub(crate) fn rect_path(left: f32, top: f32, right: f32, bottom: f32) -> Option<Path> {
    if right <= left || bottom <= top {
        return None;
    }
    let rect = Rect::from_ltrb(left, top, right, bottom)?;
    Some(PathBuilder::from_rect(rect))
}

/// Ellipse inscribed in the box at (x, y) of size w x h
pub(crate) fn ellipse_path(x: f32, y: f32, w: f32, h: f32) -> Option<Path> {
    if w <= 0.0 || h <= 0.0 {
        return None;
    }
    let rect = Rect::from_xywh(x, y, w, h)?;
    PathBuilder::from_oval(rect)
}

/// Pie slice of the ellipse inscribed in (x, y, w, h).
///
/// Angles are in degrees, measured clockwise from 3 o'clock. An end angle
/// below the start wraps around once.
pub(crate) fn pie_slice_path(x: f32, y: f32, w: f32, h: f32, start: f32, end: f32) -> Option<Path> {
    if w <= 0.0 || h <= 0.0 {
        return None;
    }
    let mut end = end;
    while end < start {
        end += 360.0;
    }
    let sweep = (end - start).min(360.0);
    if sweep >= 360.0 {
        return ellipse_path(x, y, w, h);
    }

    let (rx, ry) = (w / 2.0, h / 2.0);
    let (cx, cy) = (x + rx, y + ry);
    let segments = ((ARC_SEGMENTS as f32 * sweep / 360.0).ceil() as u32).max(1);

    let mut pb = PathBuilder::new();
    pb.move_to(cx, cy);
    for i in 0..=segments {
        let angle = (start + sweep * i as f32 / segments as f32).to_radians();
        pb.line_to(cx + rx * angle.cos(), cy + ry * angle.sin());
    }
    pb.close();
    pb.finish()
}

/// Rasterize `path` into `mask`, keeping the maximum coverage per pixel
pub(crate) fn fill_mask(mask: &mut AlphaMask, path: &Path, anti_alias: bool) {
    let Some(mut coverage) = Mask::new(mask.width(), mask.height()) else {
        return;
    };
    coverage.fill_path(path, FillRule::Winding, anti_alias, Transform::identity());
    for (dst, src) in mask.data_mut().iter_mut().zip(coverage.data()) {
        *dst = (*dst).max(*src);
    }
}

/// Rasterize a path into a fresh mask of the given size
pub(crate) fn path_mask(width: u32, height: u32, path: &Path, anti_alias: bool) -> AlphaMask {
    let mut mask = AlphaMask::new(width, height);
    fill_mask(&mut mask, path, anti_alias);
    mask
}
