//! Single-line text

use pane_render::{Canvas, Color};
use pane_text::{system_default_font, Font};

use crate::value::Value;
use crate::{Context, Key, Result};

/// Default font size in pixels
pub const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Font from the node, then the context, then the system default
pub(crate) fn resolve_font(local: &Option<Value<Font>>, ctx: &Context) -> Result<Font> {
    match ctx.lookup(local, &Key::Font)? {
        Some(font) => Ok(font),
        None => Ok(system_default_font()?),
    }
}

/// One line of text on a background
#[derive(Debug, Clone)]
pub struct Text {
    pub content: Value<String>,
    pub font: Option<Value<Font>>,
    pub font_size: Option<Value<f32>>,
    pub bg: Option<Value<Color>>,
    pub fill: Option<Value<Color>>,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self::from_value(Value::Literal(content.into()))
    }

    /// Text computed from the context at render time
    pub fn deferred(f: impl Fn(&Context) -> String + Send + Sync + 'static) -> Self {
        Self::from_value(Value::computed(f))
    }

    pub fn from_value(content: Value<String>) -> Self {
        Self {
            content,
            font: None,
            font_size: None,
            bg: None,
            fill: None,
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

    pub fn bg(mut self, bg: Color) -> Self {
        self.bg = Some(bg.into());
        self
    }

    pub fn fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill.into());
        self
    }

    pub fn render(&self, ctx: &Context) -> Result<Canvas> {
        let font = resolve_font(&self.font, ctx)?;
        let size = ctx.lookup(&self.font_size, &Key::FontSize)?.unwrap_or(DEFAULT_FONT_SIZE);
        let bg = ctx.lookup(&self.bg, &Key::Bg)?.unwrap_or(Color::TRANSPARENT);
        let fill = ctx.lookup(&self.fill, &Key::Fill)?.unwrap_or(Color::BLACK);
        let content = self.content.resolve(ctx)?;

        Ok(font.render_line(&content, size, fill, bg))
    }
}

impl From<&str> for Text {
    fn from(content: &str) -> Self {
        Text::new(content)
    }
}

impl From<String> for Text {
    fn from(content: String) -> Self {
        Text::new(content)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Fixed-cell typeface for layout tests

    use super::*;
    use pane_text::Typeface;

    /// Every character is `size / 2` wide and `size` tall; spaces paint nothing
    pub struct CellFace;

    impl Typeface for CellFace {
        fn name(&self) -> &str {
            "cell"
        }

        fn measure(&self, text: &str, size: f32) -> (u32, u32) {
            let cell = (size / 2.0) as u32;
            (cell * text.chars().count() as u32, size as u32)
        }

        fn draw(&self, canvas: &mut Canvas, x: i32, y: i32, text: &str, size: f32, color: Color) {
            let cell = (size / 2.0) as u32;
            for (i, c) in text.chars().enumerate() {
                if !c.is_whitespace() {
                    canvas.fill_rect(x + (i as u32 * cell) as i32, y, cell, size as u32, color);
                }
            }
        }
    }

    pub fn cell_font() -> Font {
        Font::new(CellFace)
    }
}

#[cfg(test)]
mod tests {
    use super::testing::cell_font;
    use super::*;

    #[test]
    fn test_text_size_and_colors() {
        let out = Text::new("abc")
            .font(cell_font())
            .font_size(10.0)
            .bg(Color::WHITE)
            .render(&Context::new())
            .unwrap();
        assert_eq!(out.size(), (15, 10));
        assert_eq!(out.get_pixel(0, 0), Some(Color::BLACK));
    }

    #[test]
    fn test_text_inherits_from_context() {
        let ctx = Context::new()
            .with(Key::Font, cell_font())
            .with(Key::FontSize, 20.0f32)
            .with(Key::Fill, Color::RED)
            .with(Key::Bg, Color::BLUE);
        let out = Text::new("a b").render(&ctx).unwrap();
        assert_eq!(out.size(), (30, 20));
        assert_eq!(out.get_pixel(1, 1), Some(Color::RED));
        assert_eq!(out.get_pixel(11, 1), Some(Color::BLUE));
    }

    #[test]
    fn test_text_default_size() {
        let ctx = Context::new().with(Key::Font, cell_font());
        assert_eq!(Text::new("ab").render(&ctx).unwrap().size(), (12, 12));
    }

    #[test]
    fn test_deferred_text() {
        let ctx = Context::new().with(Key::Font, cell_font()).with_ext("name", "four");
        let text = Text::deferred(|ctx| ctx.get_as::<String>(&Key::ext("name")).unwrap_or_default());
        assert_eq!(text.render(&ctx).unwrap().size(), (24, 12));
    }
}
