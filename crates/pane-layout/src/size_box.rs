//! SizeBox: resize a single child

use pane_render::{Canvas, Color};

use crate::content::render_or_blank;
use crate::resize;
use crate::value::{resolve_opt, Value};
use crate::{Content, Context, Key, Result};

/// Applies the first set resize option to its content.
///
/// Priority: `crop_wh`, `stretch_wh`, `stretch_width`, `stretch_height`,
/// `expand_height`, `expand_width`, `expand_wh`. Expansion pads with
/// `expand_fill`, falling back to the context background.
#[derive(Debug, Clone, Default)]
pub struct SizeBox {
    pub content: Content,
    pub crop_wh: Option<Value<(u32, u32)>>,
    pub stretch_wh: Option<Value<(u32, u32)>>,
    pub stretch_width: Option<Value<u32>>,
    pub stretch_height: Option<Value<u32>>,
    pub expand_height: Option<Value<u32>>,
    pub expand_width: Option<Value<u32>>,
    pub expand_wh: Option<Value<(u32, u32)>>,
    pub expand_fill: Option<Value<Color>>,
}

impl SizeBox {
    pub fn new(content: impl Into<Content>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn crop_wh(mut self, width: u32, height: u32) -> Self {
        self.crop_wh = Some((width, height).into());
        self
    }

    pub fn stretch_wh(mut self, width: u32, height: u32) -> Self {
        self.stretch_wh = Some((width, height).into());
        self
    }

    pub fn stretch_width(mut self, width: u32) -> Self {
        self.stretch_width = Some(width.into());
        self
    }

    pub fn stretch_height(mut self, height: u32) -> Self {
        self.stretch_height = Some(height.into());
        self
    }

    pub fn expand_height(mut self, height: u32) -> Self {
        self.expand_height = Some(height.into());
        self
    }

    pub fn expand_width(mut self, width: u32) -> Self {
        self.expand_width = Some(width.into());
        self
    }

    pub fn expand_wh(mut self, width: u32, height: u32) -> Self {
        self.expand_wh = Some((width, height).into());
        self
    }

    pub fn expand_fill(mut self, fill: Color) -> Self {
        self.expand_fill = Some(fill.into());
        self
    }

    pub fn render(&self, ctx: &Context) -> Result<Canvas> {
        let image = render_or_blank(&self.content, ctx)?;

        if let Some(size) = resolve_opt(&self.crop_wh, ctx)? {
            return Ok(resize::crop_wh(&image, size));
        }
        if let Some((w, h)) = resolve_opt(&self.stretch_wh, ctx)? {
            return Ok(image.resize(w, h));
        }
        if let Some(w) = resolve_opt(&self.stretch_width, ctx)? {
            return Ok(resize::stretch_width(&image, w));
        }
        if let Some(h) = resolve_opt(&self.stretch_height, ctx)? {
            return Ok(resize::stretch_height(&image, h));
        }

        let fill = ctx.lookup(&self.expand_fill, &Key::Bg)?.unwrap_or(Color::TRANSPARENT);
        if let Some(h) = resolve_opt(&self.expand_height, ctx)? {
            return Ok(resize::expand_height(&image, h, fill));
        }
        if let Some(w) = resolve_opt(&self.expand_width, ctx)? {
            return Ok(resize::expand_width(&image, w, fill));
        }
        if let Some(size) = resolve_opt(&self.expand_wh, ctx)? {
            return Ok(resize::expand_wh(&image, size, fill));
        }
        Ok(image)
    }
}
