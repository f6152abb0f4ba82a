//! Decorations around a single piece of content

use pane_render::{AlphaMask, Canvas, Color};

use crate::content::render_or_blank;
use crate::value::{resolve_opt, Value};
use crate::{resize, Content, Context, Key, Paint, Result};

/// Pads content with a solid border on all four sides
#[derive(Debug, Clone, Default)]
pub struct AddBorder {
    pub content: Content,
    pub border_width: Option<Value<u32>>,
    pub border_color: Option<Value<Color>>,
}

impl AddBorder {
    pub fn new(content: impl Into<Content>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn border_width(mut self, width: u32) -> Self {
        self.border_width = Some(width.into());
        self
    }

    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = Some(color.into());
        self
    }

    pub fn render(&self, ctx: &Context) -> Result<Canvas> {
        let content = render_or_blank(&self.content, ctx)?;
        let (w, h) = content.size();

        let border_width = ctx
            .lookup(&self.border_width, &Key::BorderWidth)?
            .unwrap_or_else(|| ((w as f64 * h as f64).sqrt() / 20.0) as u32);
        let border_color = match ctx.lookup(&self.border_color, &Key::BorderColor)? {
            Some(color) => color,
            None => ctx
                .get_as::<Color>(&Key::Bg)
                .map(Color::invert)
                .unwrap_or(Color::TRANSPARENT),
        };

        let mut out = Canvas::new(w + border_width * 2, h + border_width * 2, border_color);
        out.copy_from(&content, border_width as i32, border_width as i32);
        Ok(out)
    }
}

/// Content cropped to a square and masked by its inscribed circle
#[derive(Debug, Clone, Default)]
pub struct AvatarCircle {
    pub content: Content,
    /// Side length; defaults to the content's smaller dimension
    pub size: Option<Value<u32>>,
    pub bg: Option<Value<Color>>,
}

impl AvatarCircle {
    pub fn new(content: impl Into<Content>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn bg(mut self, bg: Color) -> Self {
        self.bg = Some(bg.into());
        self
    }

    pub fn render(&self, ctx: &Context) -> Result<Canvas> {
        let bg = ctx.lookup(&self.bg, &Key::Bg)?.unwrap_or(Color::TRANSPARENT);
        let content = render_or_blank(&self.content, &ctx.with(Key::Bg, bg))?;
        let size = resolve_opt(&self.size, ctx)?.unwrap_or_else(|| content.width().min(content.height()));

        let square = resize::crop_wh(&content, (size, size));
        let mut out = Canvas::new(size, size, bg);
        out.paste_masked(&square, 0, 0, &AlphaMask::ellipse(size, size));
        Ok(out)
    }
}

/// Foreground composited over a color or image background
#[derive(Debug, Clone, Default)]
pub struct CompositeBg {
    pub content: Content,
    pub bg: Option<Value<Paint>>,
}

impl CompositeBg {
    pub fn new(content: impl Into<Content>) -> Self {
        Self {
            content: content.into(),
            bg: None,
        }
    }

    pub fn bg(mut self, bg: impl Into<Paint>) -> Self {
        self.bg = Some(Value::Literal(bg.into()));
        self
    }

    pub fn render(&self, ctx: &Context) -> Result<Canvas> {
        let content = render_or_blank(&self.content, ctx)?;
        let (w, h) = content.size();

        let paint = match resolve_opt(&self.bg, ctx)? {
            Some(paint) => paint,
            None => Paint::Color(ctx.get_as(&Key::Bg).unwrap_or(Color::WHITE)),
        };
        let mut out = match paint {
            Paint::Color(color) => Canvas::new(w, h, color),
            Paint::Content(bg) => render_or_blank(&bg, ctx)?.crop_or_expand(w, h, Color::TRANSPARENT),
        };
        out.alpha_composite(&content);
        Ok(out)
    }
}

/// Two contents side by side in a two-colored capsule
#[derive(Debug, Clone, Default)]
pub struct Pill {
    pub content_a: Content,
    pub content_b: Content,
    pub color_border: Option<Value<Color>>,
    pub color_a: Option<Value<Color>>,
    pub color_b: Option<Value<Color>>,
    /// Defaults to a sixth of the content height
    pub border_width: Option<Value<u32>>,
    /// Defaults to the border width
    pub border_inner: Option<Value<u32>>,
    pub align_y: Option<Value<f32>>,
}

impl Pill {
    pub fn new(content_a: impl Into<Content>, content_b: impl Into<Content>) -> Self {
        Self {
            content_a: content_a.into(),
            content_b: content_b.into(),
            ..Default::default()
        }
    }

    pub fn color_border(mut self, color: Color) -> Self {
        self.color_border = Some(color.into());
        self
    }

    pub fn color_a(mut self, color: Color) -> Self {
        self.color_a = Some(color.into());
        self
    }

    pub fn color_b(mut self, color: Color) -> Self {
        self.color_b = Some(color.into());
        self
    }

    pub fn border_width(mut self, width: u32) -> Self {
        self.border_width = Some(width.into());
        self
    }

    pub fn border_inner(mut self, width: u32) -> Self {
        self.border_inner = Some(width.into());
        self
    }

    pub fn align_y(mut self, align: f32) -> Self {
        self.align_y = Some(align.into());
        self
    }

    pub fn render(&self, ctx: &Context) -> Result<Canvas> {
        let a = render_or_blank(&self.content_a, ctx)?;
        let b = render_or_blank(&self.content_b, ctx)?;
        let inner = a.height().max(b.height());

        let bw = resolve_opt(&self.border_width, ctx)?.unwrap_or(inner / 6);
        let bi = resolve_opt(&self.border_inner, ctx)?.unwrap_or(bw);
        let color_a = resolve_opt(&self.color_a, ctx)?.unwrap_or(Color::RED);
        let color_b = resolve_opt(&self.color_b, ctx)?.unwrap_or(Color::WHITE);
        let color_border = resolve_opt(&self.color_border, ctx)?.unwrap_or(Color::RED);
        let align = ctx.lookup(&self.align_y, &Key::AlignY)?.unwrap_or(1.0);

        let h = inner + 2 * bw + 2 * bi;
        let w = a.width() + b.width() + 2 * bw + inner + 2 * bi;
        let (wf, hf, bwf) = (w as f32, h as f32, bw as f32);
        let half = hf / 2.0;
        let split = half + (a.width() + bi) as f32;

        let mut out = Canvas::new(w, h, Color::TRANSPARENT);
        // Caps
        out.fill_pie_slice(0.0, 0.0, hf, hf, 90.0, 270.0, color_border);
        out.fill_pie_slice(bwf, bwf, hf - 2.0 * bwf, hf - 2.0 * bwf, 90.0, 270.0, color_a);
        out.fill_pie_slice(wf - hf, 0.0, hf, hf, -90.0, 90.0, color_border);
        out.fill_pie_slice(wf - hf + bwf, bwf, hf - 2.0 * bwf, hf - 2.0 * bwf, -90.0, 90.0, color_b);
        // Body
        out.fill_rect_edges(half, 0.0, wf - half, hf, color_border);
        out.fill_rect_edges(half, bwf, split, hf - bwf, color_a);
        out.fill_rect_edges(split, bwf, wf - half, hf - bwf, color_b);

        let left_a = (h / 2) as i32;
        let left_b = left_a + (a.width() + 2 * bi) as i32;
        out.paste(&a, left_a, top_in(bw + bi, inner, a.height(), align));
        out.paste(&b, left_b, top_in(bw + bi, inner, b.height(), align));
        Ok(out)
    }
}

fn top_in(offset: u32, extent: u32, size: u32, align: f32) -> i32 {
    offset as i32 + ((extent - size) as f32 * align) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, color: Color) -> Canvas {
        Canvas::new(w, h, color)
    }

    #[test]
    fn test_add_border_default_width() {
        let out = AddBorder::new(solid(100, 25, Color::RED)).render(&Context::new()).unwrap();
        // floor(sqrt(2500) / 20) = 2
        assert_eq!(out.size(), (104, 29));
        assert_eq!(out.get_pixel(0, 0), Some(Color::TRANSPARENT));
        assert_eq!(out.get_pixel(2, 2), Some(Color::RED));
    }

    #[test]
    fn test_add_border_inverts_context_bg() {
        let ctx = Context::new().with(Key::Bg, Color::WHITE);
        let out = AddBorder::new(solid(10, 10, Color::RED)).border_width(3).render(&ctx).unwrap();
        assert_eq!(out.size(), (16, 16));
        assert_eq!(out.get_pixel(0, 0), Some(Color::BLACK));

        let ctx = ctx.with(Key::BorderColor, Color::BLUE);
        let out = AddBorder::new(solid(10, 10, Color::RED)).border_width(1).render(&ctx).unwrap();
        assert_eq!(out.get_pixel(0, 0), Some(Color::BLUE));
    }

    #[test]
    fn test_add_border_copies_without_mask() {
        let out = AddBorder::new(solid(4, 4, Color::TRANSPARENT))
            .border_width(1)
            .border_color(Color::RED)
            .render(&Context::new())
            .unwrap();
        assert_eq!(out.get_pixel(2, 2), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_avatar_circle() {
        let out = AvatarCircle::new(solid(300, 200, Color::GREEN)).size(100).render(&Context::new()).unwrap();
        assert_eq!(out.size(), (100, 100));
        assert_eq!(out.get_pixel(50, 50).map(|c| c.a), Some(255));
        assert_eq!(out.get_pixel(1, 1).map(|c| c.a), Some(0));
    }

    #[test]
    fn test_avatar_default_size_and_bg() {
        let out = AvatarCircle::new(solid(30, 20, Color::GREEN))
            .bg(Color::WHITE)
            .render(&Context::new())
            .unwrap();
        assert_eq!(out.size(), (20, 20));
        assert_eq!(out.get_pixel(0, 0), Some(Color::WHITE));
    }

    #[test]
    fn test_avatar_passes_bg_down() {
        let shows_bg = Content::deferred(|ctx| solid(8, 8, ctx.get_as(&Key::Bg).unwrap_or(Color::BLACK)).into());
        let out = AvatarCircle::new(shows_bg).bg(Color::BLUE).render(&Context::new()).unwrap();
        assert_eq!(out.get_pixel(4, 4), Some(Color::BLUE));
    }

    #[test]
    fn test_composite_color_bg() {
        let mut fg = solid(4, 4, Color::TRANSPARENT);
        fg.set_pixel(1, 1, Color::RED);
        let out = CompositeBg::new(fg.clone()).render(&Context::new()).unwrap();
        assert_eq!(out.get_pixel(0, 0), Some(Color::WHITE));
        assert_eq!(out.get_pixel(1, 1), Some(Color::RED));

        let out = CompositeBg::new(fg).bg(Color::BLUE).render(&Context::new()).unwrap();
        assert_eq!(out.get_pixel(0, 0), Some(Color::BLUE));
    }

    #[test]
    fn test_composite_content_bg_fits_foreground() {
        let fg = solid(10, 10, Color::TRANSPARENT);
        let bg: Content = solid(30, 30, Color::GREEN).into();
        let out = CompositeBg::new(fg).bg(bg).render(&Context::new()).unwrap();
        assert_eq!(out.size(), (10, 10));
        assert_eq!(out.get_pixel(5, 5), Some(Color::GREEN));

        let small: Content = solid(2, 2, Color::GREEN).into();
        let out = CompositeBg::new(solid(10, 10, Color::TRANSPARENT)).bg(small).render(&Context::new()).unwrap();
        assert_eq!(out.get_pixel(0, 0), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_pill_geometry() {
        let pill = Pill::new(solid(10, 12, Color::BLACK), solid(20, 6, Color::BLACK));
        let out = pill.render(&Context::new()).unwrap();
        // H = 12, bw = bi = 2
        assert_eq!(out.size(), (10 + 20 + 4 + 12 + 4, 12 + 4 + 4));
        // Content A at (h / 2, bw + bi)
        assert_eq!(out.get_pixel(10, 4), Some(Color::BLACK));
        // Content B bottom-aligned by default
        let left_b = 10 + 10 + 4;
        assert_eq!(out.get_pixel(left_b + 1, 4 + 12 - 1), Some(Color::BLACK));
        assert_ne!(out.get_pixel(left_b + 1, 4 + 2), Some(Color::BLACK));
    }

    #[test]
    fn test_pill_colors() {
        let pill = Pill::new(solid(10, 12, Color::TRANSPARENT), solid(10, 12, Color::TRANSPARENT))
            .color_a(Color::GREEN)
            .color_b(Color::BLUE);
        let out = pill.render(&Context::new()).unwrap();
        let (w, h) = out.size();
        assert_eq!(out.get_pixel(w / 2, 0), Some(Color::RED));
        assert_eq!(out.get_pixel(h / 2 + 2, h / 2), Some(Color::GREEN));
        assert_eq!(out.get_pixel(w - h / 2 - 2, h / 2), Some(Color::BLUE));
        assert_eq!(out.get_pixel(0, 0).map(|c| c.a), Some(0));
    }
}
