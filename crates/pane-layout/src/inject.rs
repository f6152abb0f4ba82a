//! Nodes that only change the context seen by their content

use pane_render::Canvas;
use pane_text::Font;

use crate::content::render_or_blank;
use crate::value::{resolve_opt, Value};
use crate::{Attr, Content, Context, Key, Result};

/// Sets the font and font size for everything below it
#[derive(Debug, Clone, Default)]
pub struct SetFont {
    pub content: Content,
    pub font: Option<Value<Font>>,
    pub font_size: Option<Value<f32>>,
}

impl SetFont {
    pub fn new(content: impl Into<Content>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn font(mut self, font: Font) -> Self {
        self.font = Some(font.into());
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size.into());
        self
    }

    pub fn render(&self, ctx: &Context) -> Result<Canvas> {
        let mut child = ctx.clone();
        if let Some(font) = resolve_opt(&self.font, ctx)? {
            child = child.with(Key::Font, font);
        }
        if let Some(size) = resolve_opt(&self.font_size, ctx)? {
            child = child.with(Key::FontSize, size);
        }
        render_or_blank(&self.content, &child)
    }
}

/// Overrides arbitrary context entries for its content
#[derive(Debug, Clone, Default)]
pub struct SetKwargs {
    pub content: Content,
    pub overrides: Vec<(Key, Value<Attr>)>,
}

impl SetKwargs {
    pub fn new(content: impl Into<Content>) -> Self {
        Self {
            content: content.into(),
            overrides: Vec::new(),
        }
    }

    /// Override `key`; later calls win
    pub fn set(mut self, key: Key, attr: impl Into<Attr>) -> Self {
        self.overrides.push((key, Value::Literal(attr.into())));
        self
    }

    pub fn set_ext(self, name: &str, attr: impl Into<Attr>) -> Self {
        self.set(Key::ext(name), attr)
    }

    /// Override `key` with a value computed from the incoming context
    pub fn set_deferred(mut self, key: Key, value: Value<Attr>) -> Self {
        self.overrides.push((key, value));
        self
    }

    pub fn render(&self, ctx: &Context) -> Result<Canvas> {
        let mut child = ctx.clone();
        for (key, value) in &self.overrides {
            child = child.with(key.clone(), value.resolve(ctx)?);
        }
        render_or_blank(&self.content, &child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pane_render::Color;

    fn echo_key(key: Key) -> Content {
        Content::deferred(move |ctx| {
            let n = ctx.get_as::<f32>(&key).unwrap_or(0.0) as u32;
            Canvas::new(n, 1, Color::RED).into()
        })
    }

    #[test]
    fn test_set_font_size() {
        let node = SetFont::new(echo_key(Key::FontSize)).font_size(24.0);
        assert_eq!(node.render(&Context::new()).unwrap().size(), (24, 1));
    }

    #[test]
    fn test_set_font_keeps_inherited_size() {
        let ctx = Context::new().with(Key::FontSize, 9.0f32);
        let node = SetFont::new(echo_key(Key::FontSize));
        assert_eq!(node.render(&ctx).unwrap().size(), (9, 1));
    }

    #[test]
    fn test_set_kwargs_ext() {
        let node = SetKwargs::new(echo_key(Key::ext("grad_width"))).set_ext("grad_width", 5u32);
        assert_eq!(node.render(&Context::new()).unwrap().size(), (5, 1));
    }

    #[test]
    fn test_set_kwargs_later_wins() {
        let node = SetKwargs::new(echo_key(Key::BorderWidth))
            .set(Key::BorderWidth, 2u32)
            .set(Key::BorderWidth, 4u32);
        assert_eq!(node.render(&Context::new()).unwrap().size(), (4, 1));
    }

    #[test]
    fn test_set_kwargs_deferred_reads_parent() {
        let ctx = Context::new().with(Key::FontSize, 10.0f32);
        let double = Value::computed(|c: &Context| Attr::Number(c.get_as::<f32>(&Key::FontSize).unwrap_or(0.0) * 2.0));
        let node = SetKwargs::new(echo_key(Key::FontSize)).set_deferred(Key::FontSize, double);
        assert_eq!(node.render(&ctx).unwrap().size(), (20, 1));
    }
}
