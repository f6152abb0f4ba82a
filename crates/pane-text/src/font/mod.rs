//! Font loading and matching module

mod database;
mod matching;
mod outline;

use std::fmt;
use std::sync::{Arc, OnceLock};

use pane_render::{Canvas, Color};

pub use database::FontDatabase;
pub use matching::{FontQuery, DEFAULT_FAMILIES};
pub use outline::OutlineFont;

use crate::{Result, TextError};

/// Something that can measure and draw a single line of text.
///
/// Sizes are in pixels. `measure` must agree with what `draw` paints: a
/// canvas of the measured size fully holds the drawn string at (0, 0).
pub trait Typeface: Send + Sync {
    /// Human-readable name (family or file)
    fn name(&self) -> &str;

    /// Pixel extent `(width, height)` of `text` at `size`
    fn measure(&self, text: &str, size: f32) -> (u32, u32);

    /// Draw `text` with its top-left corner at (x, y)
    fn draw(&self, canvas: &mut Canvas, x: i32, y: i32, text: &str, size: f32, color: Color);
}

/// Shared handle to a typeface
#[derive(Clone)]
pub struct Font(Arc<dyn Typeface>);

impl Font {
    pub fn new(face: impl Typeface + 'static) -> Self {
        Self(Arc::new(face))
    }

    pub fn from_arc(face: Arc<dyn Typeface>) -> Self {
        Self(face)
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub fn measure(&self, text: &str, size: f32) -> (u32, u32) {
        self.0.measure(text, size)
    }

    pub fn draw(&self, canvas: &mut Canvas, x: i32, y: i32, text: &str, size: f32, color: Color) {
        self.0.draw(canvas, x, y, text, size, color)
    }

    /// Render `text` onto a fresh canvas of exactly its measured size
    pub fn render_line(&self, text: &str, size: f32, fill: Color, bg: Color) -> Canvas {
        let (w, h) = self.measure(text, size);
        let mut canvas = Canvas::new(w, h, bg);
        self.draw(&mut canvas, 0, 0, text, size, fill);
        canvas
    }

    /// Whether both handles point at the same typeface
    pub fn ptr_eq(&self, other: &Font) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Font").field(&self.name()).finish()
    }
}

/// Font weight (100-900)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const LIGHT: FontWeight = FontWeight(300);
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const BOLD: FontWeight = FontWeight(700);
}

impl From<u16> for FontWeight {
    fn from(value: u16) -> Self {
        FontWeight(value.clamp(100, 900))
    }
}

/// Font style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

impl From<FontStyle> for fontdb::Style {
    fn from(style: FontStyle) -> Self {
        match style {
            FontStyle::Normal => fontdb::Style::Normal,
            FontStyle::Italic => fontdb::Style::Italic,
            FontStyle::Oblique => fontdb::Style::Oblique,
        }
    }
}

static SYSTEM_DEFAULT: OnceLock<Option<Font>> = OnceLock::new();

/// Process-wide fallback font, loaded from system fonts on first use.
///
/// Used when no font is set on a node or in its context.
pub fn system_default_font() -> Result<Font> {
    SYSTEM_DEFAULT
        .get_or_init(|| {
            let db = FontDatabase::with_system_fonts();
            let font = db.load(&FontQuery::default());
            match &font {
                Some(f) => tracing::debug!("Default font: {}", f.name()),
                None => tracing::warn!("No system font matched {:?}", DEFAULT_FAMILIES),
            }
            font
        })
        .clone()
        .ok_or_else(|| TextError::FontNotFound(DEFAULT_FAMILIES.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Blocks;

    impl Typeface for Blocks {
        fn name(&self) -> &str {
            "blocks"
        }

        fn measure(&self, text: &str, size: f32) -> (u32, u32) {
            (text.chars().count() as u32 * size as u32, size as u32)
        }

        fn draw(&self, canvas: &mut Canvas, x: i32, y: i32, text: &str, size: f32, color: Color) {
            let (w, h) = self.measure(text, size);
            canvas.fill_rect(x, y, w, h, color);
        }
    }

    #[test]
    fn test_render_line_uses_measured_size() {
        let font = Font::new(Blocks);
        let line = font.render_line("abc", 4.0, Color::BLACK, Color::WHITE);
        assert_eq!(line.size(), (12, 4));
        assert_eq!(line.get_pixel(11, 3), Some(Color::BLACK));
    }

    #[test]
    fn test_font_handles_share_face() {
        let a = Font::new(Blocks);
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&Font::new(Blocks)));
        assert_eq!(format!("{:?}", a), "Font(\"blocks\")");
    }
}
