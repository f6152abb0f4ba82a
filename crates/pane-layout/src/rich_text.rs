//! Rich text: wrapped lines of mixed text and inline images
//!
//! Content is flattened into a token stream, packed greedily into lines no
//! wider than the target width, and each line is drawn as text strips and
//! images separated by a uniform horizontal spacing.

use std::ops::Range;

use pane_emoji::is_emoji_presentation;
use pane_render::{Canvas, Color};
use pane_text::Font;

use crate::content::render_content;
use crate::text::{resolve_font, DEFAULT_FONT_SIZE};
use crate::value::{resolve_opt, Value};
use crate::{resize, Content, Context, Key, Rendered, Result, GOLDEN_RATIO};

/// One unit of line breaking
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Text(String),
    Image(Canvas),
    /// Explicit line break
    Break,
}

/// Element of a laid-out line: a run of adjacent text tokens or an image
enum Segment<'a> {
    Text(String),
    Image(&'a Canvas),
}

fn segments(tokens: &[Token]) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut run = String::new();
    for token in tokens {
        match token {
            Token::Text(text) => run.push_str(text),
            Token::Image(image) => {
                if !run.is_empty() {
                    out.push(Segment::Text(std::mem::take(&mut run)));
                }
                out.push(Segment::Image(image));
            }
            Token::Break => {}
        }
    }
    if !run.is_empty() {
        out.push(Segment::Text(run));
    }
    out
}

/// Running width of a line being filled.
///
/// Finished segments are summed once; only the trailing text run is
/// re-measured as tokens are appended to it.
#[derive(Debug, Clone, Default)]
struct LineMeasure {
    spacing: u32,
    /// `sum(w + spacing)` over the closed segments
    closed: u32,
    closed_count: usize,
    open: String,
    open_width: u32,
}

impl LineMeasure {
    fn new(spacing: u32) -> Self {
        Self {
            spacing,
            ..Self::default()
        }
    }

    /// `spacing + sum(w + spacing)` over the line's segments, 0 when empty
    fn width(&self) -> u32 {
        if self.closed_count == 0 && self.open.is_empty() {
            return 0;
        }
        let open = if self.open.is_empty() { 0 } else { self.open_width + self.spacing };
        self.spacing + self.closed + open
    }

    /// The line with `token` appended
    fn with<F: Fn(&str) -> u32>(&self, token: &Token, measure: &F) -> Self {
        let mut next = self.clone();
        match token {
            Token::Text(text) if !text.is_empty() => {
                next.open.push_str(text);
                next.open_width = measure(&next.open);
            }
            Token::Image(image) => {
                if !next.open.is_empty() {
                    next.closed += next.open_width + next.spacing;
                    next.closed_count += 1;
                    next.open.clear();
                    next.open_width = 0;
                }
                next.closed += image.width() + next.spacing;
                next.closed_count += 1;
            }
            _ => {}
        }
        next
    }
}

/// Greedy line breaking.
///
/// Returns the token range of every line. Tokens are appended until the
/// line would exceed `width`; the overflowing token then starts the next
/// line. A token that is too wide on its own still gets a line of its own.
/// Every [`Token::Break`] ends the current line, even an empty one, and the
/// last line is always emitted.
pub fn break_lines<F: Fn(&str) -> u32>(tokens: &[Token], width: u32, spacing: u32, measure: F) -> Vec<Range<usize>> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut line = LineMeasure::new(spacing);
    for (idx, token) in tokens.iter().enumerate() {
        if matches!(token, Token::Break) {
            lines.push(start..idx);
            start = idx + 1;
            line = LineMeasure::new(spacing);
            continue;
        }
        let next = line.with(token, &measure);
        if idx > start && next.width() > width {
            lines.push(start..idx);
            start = idx;
            line = LineMeasure::new(spacing).with(token, &measure);
        } else {
            line = next;
        }
    }
    lines.push(start..tokens.len());
    lines
}

/// Wrapped text with inline images
#[derive(Debug, Clone)]
pub struct RichText {
    pub contents: Content,
    pub width: Value<u32>,
    pub font: Option<Value<Font>>,
    pub font_size: Option<Value<f32>>,
    pub bg: Option<Value<Color>>,
    pub fill: Option<Value<Color>>,
    pub align_x: Option<Value<f32>>,
    pub align_y: Option<Value<f32>>,
    /// Keep strings whole, splitting only at newlines
    pub dont_split: bool,
    /// Largest inline image; falls back to the `image_limit` context key,
    /// then to `(width / φ, font_size * 4)`
    pub image_limit: Option<Value<(u32, u32)>>,
    pub horizontal_spacing: Option<Value<u32>>,
    /// Split strings into `word + " "` fragments before tokenizing
    pub auto_split: bool,
}

/// Resolved rendering settings
struct Style {
    font: Font,
    size: f32,
    bg: Color,
    fill: Color,
    align_x: f32,
    align_y: f32,
    spacing: u32,
}

impl RichText {
    pub fn new(contents: impl Into<Content>, width: u32) -> Self {
        Self {
            contents: contents.into(),
            width: Value::Literal(width),
            font: None,
            font_size: None,
            bg: None,
            fill: None,
            align_x: None,
            align_y: None,
            dont_split: false,
            image_limit: None,
            horizontal_spacing: None,
            auto_split: true,
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

    pub fn align_x(mut self, align: f32) -> Self {
        self.align_x = Some(align.into());
        self
    }

    pub fn align_y(mut self, align: f32) -> Self {
        self.align_y = Some(align.into());
        self
    }

    pub fn dont_split(mut self, dont_split: bool) -> Self {
        self.dont_split = dont_split;
        self
    }

    pub fn image_limit(mut self, width: u32, height: u32) -> Self {
        self.image_limit = Some((width, height).into());
        self
    }

    pub fn horizontal_spacing(mut self, spacing: u32) -> Self {
        self.horizontal_spacing = Some(spacing.into());
        self
    }

    pub fn auto_split(mut self, auto_split: bool) -> Self {
        self.auto_split = auto_split;
        self
    }

    fn font_size_in(&self, ctx: &Context) -> Result<f32> {
        Ok(ctx.lookup(&self.font_size, &Key::FontSize)?.unwrap_or(DEFAULT_FONT_SIZE))
    }

    /// Flatten the content into the token stream the line breaker consumes
    pub fn tokenize(&self, ctx: &Context) -> Result<Vec<Token>> {
        let width = self.width.resolve(ctx)?;
        let size = self.font_size_in(ctx)?;
        let limit = ctx
            .lookup(&self.image_limit, &Key::ext("image_limit"))?
            .unwrap_or(((width as f32 / GOLDEN_RATIO) as u32, (size * 4.0) as u32));

        let root = self.contents.resolve(ctx)?;
        let items: Vec<Content> = match root.into_owned() {
            Content::List(items) => items,
            other => vec![other],
        };

        let mut tokens = Vec::new();
        for item in self.split_words(items) {
            let item = item.resolve(ctx)?;
            match item.as_ref() {
                Content::Text(text) => self.push_text(text, size, ctx, &mut tokens),
                other => push_rendered(render_content(other, ctx)?, limit, &mut tokens),
            }
        }
        Ok(tokens)
    }

    fn split_words(&self, items: Vec<Content>) -> Vec<Content> {
        if !self.auto_split {
            return items;
        }
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Content::Text(text) => out.extend(text.split(' ').map(|word| Content::Text(format!("{word} ")))),
                other => out.push(other),
            }
        }
        out
    }

    fn push_text(&self, text: &str, size: f32, ctx: &Context, tokens: &mut Vec<Token>) {
        if self.dont_split {
            for (idx, paragraph) in text.split('\n').enumerate() {
                if idx > 0 {
                    tokens.push(Token::Break);
                }
                if !paragraph.is_empty() {
                    tokens.push(Token::Text(paragraph.to_string()));
                }
            }
            return;
        }
        for c in text.chars() {
            if c == '\n' {
                tokens.push(Token::Break);
            } else if is_emoji_presentation(c) {
                tokens.push(emoji_token(c, size, ctx));
            } else {
                tokens.push(Token::Text(c.to_string()));
            }
        }
    }

    fn style(&self, ctx: &Context) -> Result<Style> {
        let size = self.font_size_in(ctx)?;
        let spacing = match resolve_opt(&self.horizontal_spacing, ctx)? {
            Some(spacing) => spacing,
            None => ctx
                .get_as(&Key::ext("horizontal_spacing"))
                .unwrap_or((size / GOLDEN_RATIO).floor() as u32),
        };
        Ok(Style {
            font: resolve_font(&self.font, ctx)?,
            size,
            bg: ctx.lookup(&self.bg, &Key::Bg)?.unwrap_or(Color::TRANSPARENT),
            fill: ctx.lookup(&self.fill, &Key::Fill)?.unwrap_or(Color::BLACK),
            align_x: ctx.lookup(&self.align_x, &Key::AlignX)?.unwrap_or(0.1),
            align_y: ctx.lookup(&self.align_y, &Key::AlignY)?.unwrap_or(1.0),
            spacing,
        })
    }

    /// Line ranges for the tokens of this node under `ctx`
    pub fn lines(&self, tokens: &[Token], ctx: &Context) -> Result<Vec<Range<usize>>> {
        let width = self.width.resolve(ctx)?;
        let style = self.style(ctx)?;
        Ok(break_lines(tokens, width, style.spacing, |text| style.font.measure(text, style.size).0))
    }

    pub fn render(&self, ctx: &Context) -> Result<Canvas> {
        let width = self.width.resolve(ctx)?;
        let style = self.style(ctx)?;
        let tokens = self.tokenize(ctx)?;
        let lines = break_lines(&tokens, width, style.spacing, |text| style.font.measure(text, style.size).0);
        tracing::trace!("RichText: {} tokens in {} lines", tokens.len(), lines.len());

        let rendered: Vec<Canvas> = lines.into_iter().map(|range| style.render_line(&tokens[range])).collect();

        let out_w = rendered.iter().map(Canvas::width).max().unwrap_or(0);
        let out_h = rendered.iter().map(Canvas::height).sum();
        let mut out = Canvas::new(out_w, out_h, style.bg);
        let mut top = 0i32;
        for line in &rendered {
            let left = ((out_w - line.width()) as f32 * style.align_x) as i32;
            out.paste(line, left, top);
            top += line.height() as i32;
        }
        Ok(out)
    }
}

impl Style {
    fn render_line(&self, tokens: &[Token]) -> Canvas {
        let segments = segments(tokens);
        if segments.is_empty() {
            return Canvas::new(1, self.size as u32, self.bg);
        }

        let parts: Vec<Canvas> = segments
            .into_iter()
            .map(|segment| match segment {
                Segment::Text(text) => self.font.render_line(&text, self.size, self.fill, Color::TRANSPARENT),
                Segment::Image(image) => image.clone(),
            })
            .collect();

        let width = parts.iter().map(Canvas::width).sum::<u32>() + self.spacing * (parts.len() as u32 + 1);
        let height = parts.iter().map(Canvas::height).max().unwrap_or(0);
        let mut line = Canvas::new(width, height, self.bg);
        let mut left = self.spacing as i32;
        for part in &parts {
            let top = ((height - part.height()) as f32 * self.align_y) as i32;
            line.paste(part, left, top);
            left += (part.width() + self.spacing) as i32;
        }
        line
    }
}

/// Image token for an emoji, or the literal character when unavailable
fn emoji_token(c: char, size: f32, ctx: &Context) -> Token {
    let Some(source) = ctx.emoji_source() else {
        return Token::Text(c.to_string());
    };
    match source.fetch(c) {
        Ok(image) => Token::Image(resize::stretch_height(&image, size as u32)),
        Err(e) => {
            tracing::debug!("Emoji {:?} unavailable: {}", c, e);
            Token::Text(c.to_string())
        }
    }
}

fn push_rendered(rendered: Rendered, limit: (u32, u32), tokens: &mut Vec<Token>) {
    match rendered {
        Rendered::Image(image) => tokens.push(Token::Image(resize::stretch_if_exceeds(&image, limit))),
        Rendered::List(items) => {
            for item in items {
                push_rendered(item, limit, tokens);
            }
        }
        Rendered::Empty => {}
    }
}
