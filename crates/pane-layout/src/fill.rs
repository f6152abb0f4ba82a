//! Filled boxes: solid colors, gradients and progress bars

use pane_render::{Canvas, Color};

use crate::content::render_content;
use crate::value::{resolve_opt, Value};
use crate::{resize, Content, Context, Key, LayoutError, Rendered, Result};

/// Default gradient edge when neither the node nor the context sets one
pub const DEFAULT_GRADIENT_SIZE: u32 = 512;

/// A solid color or renderable content used as a fill
#[derive(Debug, Clone)]
pub enum Paint {
    Color(Color),
    Content(Content),
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Color(color)
    }
}

impl From<Content> for Paint {
    fn from(content: Content) -> Self {
        Paint::Content(content)
    }
}

impl From<Canvas> for Paint {
    fn from(canvas: Canvas) -> Self {
        Paint::Content(Content::Image(canvas))
    }
}

/// How image fills are fitted into their target area
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResizeMethod {
    /// Scale to cover, then center-crop
    #[default]
    CropWh,
    /// Resample to the exact size
    Stretch,
}

impl ResizeMethod {
    pub fn apply(self, image: &Canvas, (width, height): (u32, u32)) -> Canvas {
        match self {
            ResizeMethod::CropWh => resize::crop_wh(image, (width, height)),
            ResizeMethod::Stretch => image.resize(width, height),
        }
    }
}

/// Solid rectangle
#[derive(Debug, Clone)]
pub struct ColorBox {
    pub color: Value<Color>,
    pub width: Value<u32>,
    /// Defaults to the width
    pub height: Option<Value<u32>>,
}

impl ColorBox {
    pub fn new(color: Color, width: u32) -> Self {
        Self {
            color: color.into(),
            width: width.into(),
            height: None,
        }
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height.into());
        self
    }

    pub fn render(&self, ctx: &Context) -> Result<Canvas> {
        let width = self.width.resolve(ctx)?;
        let height = resolve_opt(&self.height, ctx)?.unwrap_or(width);
        Ok(Canvas::new(width, height, self.color.resolve(ctx)?))
    }
}

/// Supported corner combinations
#[derive(Debug, Clone, Copy)]
enum Gradient {
    /// Top-left to bottom-left
    Vertical(Color, Color),
    /// Top-left to top-right
    Horizontal(Color, Color),
    /// Top-left to bottom-right
    Diagonal(Color, Color),
    /// Bottom-left to top-right
    AntiDiagonal(Color, Color),
}

impl Gradient {
    fn color_at(self, x: f32, y: f32) -> Color {
        match self {
            Gradient::Vertical(from, to) => from.lerp(to, y),
            Gradient::Horizontal(from, to) => from.lerp(to, x),
            Gradient::Diagonal(from, to) => from.lerp(to, (x + y) / 2.0),
            Gradient::AntiDiagonal(from, to) => from.lerp(to, (x + 1.0 - y) / 2.0),
        }
    }
}

/// Two-corner gradient.
///
/// Corners are `lu` (top-left), `ru` (top-right), `ll` (bottom-left) and
/// `rl` (bottom-right). Exactly one of `{lu, ll}`, `{lu, ru}`, `{lu, rl}`
/// or `{ll, ru}` must be set.
#[derive(Debug, Clone, Default)]
pub struct GradientBox {
    pub width: Option<Value<u32>>,
    pub height: Option<Value<u32>>,
    pub lu: Option<Value<Color>>,
    pub ru: Option<Value<Color>>,
    pub ll: Option<Value<Color>>,
    pub rl: Option<Value<Color>>,
}

impl GradientBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width.into());
        self.height = Some(height.into());
        self
    }

    pub fn lu(mut self, color: Color) -> Self {
        self.lu = Some(color.into());
        self
    }

    pub fn ru(mut self, color: Color) -> Self {
        self.ru = Some(color.into());
        self
    }

    pub fn ll(mut self, color: Color) -> Self {
        self.ll = Some(color.into());
        self
    }

    pub fn rl(mut self, color: Color) -> Self {
        self.rl = Some(color.into());
        self
    }

    fn gradient(&self, ctx: &Context) -> Result<Gradient> {
        let corners = (
            resolve_opt(&self.lu, ctx)?,
            resolve_opt(&self.ru, ctx)?,
            resolve_opt(&self.ll, ctx)?,
            resolve_opt(&self.rl, ctx)?,
        );
        match corners {
            (Some(lu), None, Some(ll), None) => Ok(Gradient::Vertical(lu, ll)),
            (Some(lu), Some(ru), None, None) => Ok(Gradient::Horizontal(lu, ru)),
            (Some(lu), None, None, Some(rl)) => Ok(Gradient::Diagonal(lu, rl)),
            (None, Some(ru), Some(ll), None) => Ok(Gradient::AntiDiagonal(ll, ru)),
            (lu, ru, ll, rl) => {
                let set: Vec<&str> = [("lu", lu), ("ru", ru), ("ll", ll), ("rl", rl)]
                    .into_iter()
                    .filter_map(|(name, corner)| corner.map(|_| name))
                    .collect();
                let corners = if set.is_empty() { "none".to_string() } else { set.join(",") };
                Err(LayoutError::UnsupportedGradient { corners })
            }
        }
    }

    pub fn render(&self, ctx: &Context) -> Result<Canvas> {
        let width = ctx
            .lookup(&self.width, &Key::ext("grad_width"))?
            .unwrap_or(DEFAULT_GRADIENT_SIZE);
        let height = ctx
            .lookup(&self.height, &Key::ext("grad_height"))?
            .unwrap_or(DEFAULT_GRADIENT_SIZE);
        let gradient = self.gradient(ctx)?;

        let mut out = Canvas::new(width, height, Color::TRANSPARENT);
        for y in 0..height {
            let ny = y as f32 / height as f32;
            for x in 0..width {
                out.set_pixel(x, y, gradient.color_at(x as f32 / width as f32, ny));
            }
        }
        Ok(out)
    }
}

/// Bordered track filled to a fraction of its inner width
#[derive(Debug, Clone)]
pub struct ProgressBar {
    pub width: Value<u32>,
    /// Defaults to a tenth of the width
    pub height: Option<Value<u32>>,
    /// Defaults to a sixth of the height
    pub border_width: Option<Value<u32>>,
    pub bg: Option<Value<Color>>,
    pub border_color: Option<Value<Color>>,
    pub fill: Option<Value<Paint>>,
    /// Fraction in `[0, 1]`; read from the `progress` context key when unset
    pub progress: Option<Value<f32>>,
    pub resize_method: ResizeMethod,
}

impl ProgressBar {
    pub fn new(width: u32) -> Self {
        Self {
            width: width.into(),
            height: None,
            border_width: None,
            bg: None,
            border_color: None,
            fill: None,
            progress: None,
            resize_method: ResizeMethod::default(),
        }
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height.into());
        self
    }

    pub fn border_width(mut self, width: u32) -> Self {
        self.border_width = Some(width.into());
        self
    }

    pub fn bg(mut self, bg: Color) -> Self {
        self.bg = Some(bg.into());
        self
    }

    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = Some(color.into());
        self
    }

    pub fn fill(mut self, fill: impl Into<Paint>) -> Self {
        self.fill = Some(Value::Literal(fill.into()));
        self
    }

    pub fn progress(mut self, progress: f32) -> Self {
        self.progress = Some(progress.into());
        self
    }

    pub fn resize_method(mut self, method: ResizeMethod) -> Self {
        self.resize_method = method;
        self
    }

    pub fn render(&self, ctx: &Context) -> Result<Canvas> {
        let progress = ctx
            .lookup(&self.progress, &Key::ext("progress"))?
            .ok_or(LayoutError::MissingField {
                node: "ProgressBar",
                field: "progress",
            })?
            .clamp(0.0, 1.0);
        let width = self.width.resolve(ctx)?;
        let height = resolve_opt(&self.height, ctx)?.unwrap_or(width / 10);
        let bw = resolve_opt(&self.border_width, ctx)?.unwrap_or(height / 6);
        let bg = ctx.lookup(&self.bg, &Key::Bg)?.unwrap_or(Color::WHITE);
        let border_color = resolve_opt(&self.border_color, ctx)?.unwrap_or(Color::MIKU_DARK);
        let fill = match resolve_opt(&self.fill, ctx)? {
            Some(fill) => fill,
            None => Paint::Color(ctx.get_as(&Key::Fill).unwrap_or(Color::BLUE_LIGHT)),
        };

        let inner_w = width.saturating_sub(2 * bw);
        let inner_h = height.saturating_sub(2 * bw);
        let filled = inner_w as f32 * progress;

        let mut out = Canvas::new(width, height, border_color);
        out.fill_rect(bw as i32, bw as i32, inner_w, inner_h, bg);

        match fill {
            Paint::Color(color) => {
                let (left, top) = (bw as f32, bw as f32);
                out.fill_rect_edges(left, top, left + filled, top + inner_h as f32, color);
            }
            Paint::Content(content) => {
                let area = (filled as u32, inner_h);
                let image = self.render_fill(&content, area, ctx)?;
                if area.0 > 0 && area.1 > 0 {
                    out.paste(&self.resize_method.apply(&image, area), bw as i32, bw as i32);
                }
            }
        }
        Ok(out)
    }

    /// Render a content fill with the fill area exposed to it
    fn render_fill(&self, content: &Content, (w, h): (u32, u32), ctx: &Context) -> Result<Canvas> {
        let fill_ctx = ctx
            .with_ext("grad_width", w)
            .with_ext("grad_height", h)
            .with_ext("progbar_width", w)
            .with_ext("progbar_height", h);
        let content = content.resolve(&fill_ctx)?;
        if let Content::Text(_) = content.as_ref() {
            return Err(LayoutError::UnsupportedFill { found: "text".into() });
        }
        match render_content(&content, &fill_ctx)? {
            Rendered::Image(image) => Ok(image),
            Rendered::List(_) => Err(LayoutError::UnsupportedFill { found: "list".into() }),
            Rendered::Empty => Err(LayoutError::UnsupportedFill { found: "empty".into() }),
        }
    }
}
