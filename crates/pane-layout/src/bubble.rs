//! Nine-slice speech bubble frame

use std::path::Path;

use pane_render::{Canvas, Color};

use crate::content::render_or_blank;
use crate::value::Value;
use crate::{Content, Context, Key, LayoutError, Result, GOLDEN_RATIO};

/// The nine frame pieces.
///
/// `lu`, `up`, `le` and `mi` are required; the others default to mirrors of
/// them. A piece left unset is looked up in the context under its own name
/// (`Key::ext("lu")`, ...) before any mirror is derived.
#[derive(Debug, Clone, Default)]
pub struct BubblePieces {
    pub lu: Option<Canvas>,
    pub up: Option<Canvas>,
    pub ru: Option<Canvas>,
    pub le: Option<Canvas>,
    pub mi: Option<Canvas>,
    pub ri: Option<Canvas>,
    pub ll: Option<Canvas>,
    pub lo: Option<Canvas>,
    pub rl: Option<Canvas>,
}

const PIECE_NAMES: [&str; 9] = ["lu", "up", "ru", "le", "mi", "ri", "ll", "lo", "rl"];

impl BubblePieces {
    /// Load `<name>.png` for every piece present in `dir`
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut pieces = Self::default();
        for name in PIECE_NAMES {
            let path = dir.join(format!("{name}.png"));
            if path.exists() {
                *pieces.slot(name) = Some(Canvas::open(&path)?);
            }
        }
        tracing::debug!("Loaded bubble pieces from {}", dir.display());
        Ok(pieces)
    }

    /// Context pieces for every slot left unset
    pub fn inherit(&self, ctx: &Context) -> Self {
        let mut pieces = self.clone();
        for name in PIECE_NAMES {
            let slot = pieces.slot(name);
            if slot.is_none() {
                *slot = ctx.get_as::<Canvas>(&Key::ext(name));
            }
        }
        pieces
    }

    fn slot(&mut self, name: &str) -> &mut Option<Canvas> {
        match name {
            "lu" => &mut self.lu,
            "up" => &mut self.up,
            "ru" => &mut self.ru,
            "le" => &mut self.le,
            "mi" => &mut self.mi,
            "ri" => &mut self.ri,
            "ll" => &mut self.ll,
            "lo" => &mut self.lo,
            _ => &mut self.rl,
        }
    }
}

fn required<'a>(piece: &'a Option<Canvas>, field: &'static str) -> Result<&'a Canvas> {
    piece.as_ref().ok_or(LayoutError::MissingField { node: "Bubble", field })
}

fn or_derived(piece: &Option<Canvas>, derive: impl FnOnce() -> Canvas) -> Canvas {
    piece.clone().unwrap_or_else(derive)
}

/// Content framed by a nine-slice bubble
#[derive(Debug, Clone, Default)]
pub struct Bubble {
    pub content: Content,
    pub pieces: BubblePieces,
    /// Outer frame thickness; defaults to the content height
    pub border_size: Option<Value<u32>>,
    /// How far the content reaches into the frame; defaults to `border_size / φ`
    pub mid_border_size: Option<Value<u32>>,
}

impl Bubble {
    pub fn new(content: impl Into<Content>, pieces: BubblePieces) -> Self {
        Self {
            content: content.into(),
            pieces,
            ..Default::default()
        }
    }

    /// Bubble with pieces loaded from a directory of PNGs
    pub fn from_dir(content: impl Into<Content>, dir: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(content, BubblePieces::from_dir(dir)?))
    }

    pub fn border_size(mut self, size: u32) -> Self {
        self.border_size = Some(size.into());
        self
    }

    pub fn mid_border_size(mut self, size: u32) -> Self {
        self.mid_border_size = Some(size.into());
        self
    }

    pub fn render(&self, ctx: &Context) -> Result<Canvas> {
        let p = self.pieces.inherit(ctx);
        let lu = required(&p.lu, "lu")?;
        let up = required(&p.up, "up")?;
        let le = required(&p.le, "le")?;
        let mi = required(&p.mi, "mi")?;
        let ru = or_derived(&p.ru, || lu.flip_horizontal());
        let ri = or_derived(&p.ri, || le.flip_horizontal());
        let rl = or_derived(&p.rl, || lu.rotate_180());
        let lo = or_derived(&p.lo, || up.flip_vertical());
        let ll = or_derived(&p.ll, || lu.flip_vertical());

        let image = render_or_blank(&self.content, ctx)?;
        let bs = ctx
            .lookup(&self.border_size, &Key::ext("border_size"))?
            .unwrap_or(image.height());
        let mbs = ctx
            .lookup(&self.mid_border_size, &Key::ext("mid_border_size"))?
            .unwrap_or((bs as f32 / GOLDEN_RATIO) as u32);

        let overlap = 2 * (bs as i64 - mbs as i64);
        let iw = (image.width() as i64 - overlap).max(0) as u32;
        let ih = (image.height() as i64 - overlap).max(0) as u32;
        let (w, h) = (iw + 2 * bs, ih + 2 * bs);

        let mut frame = Canvas::new(w, h, Color::TRANSPARENT);
        let cells: [(&Canvas, (u32, u32), (u32, u32)); 9] = [
            (lu, (bs, bs), (0, 0)),
            (up, (iw, bs), (bs, 0)),
            (&ru, (bs, bs), (bs + iw, 0)),
            (le, (bs, ih), (0, bs)),
            (mi, (iw, ih), (bs, bs)),
            (&ri, (bs, ih), (bs + iw, bs)),
            (&ll, (bs, bs), (0, bs + ih)),
            (&lo, (iw, bs), (bs, bs + ih)),
            (&rl, (bs, bs), (bs + iw, bs + ih)),
        ];
        for (piece, (pw, ph), (x, y)) in cells {
            frame.copy_from(&piece.resize(pw, ph), x as i32, y as i32);
        }

        let mut overlay = Canvas::new(w, h, Color::TRANSPARENT);
        overlay.copy_from(&image, mbs as i32, mbs as i32);
        frame.alpha_composite(&overlay);
        Ok(frame)
    }
}
