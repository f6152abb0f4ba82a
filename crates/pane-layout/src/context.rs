//! Render context
//!
//! Style attributes inherited from parent to child. A context is a
//! persistent map: deriving a child context with [`Context::with`] copies the
//! map only on write and never affects the parent.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use pane_emoji::EmojiSource;
use pane_render::{Canvas, Color};
use pane_text::Font;

use crate::value::{resolve_opt, Value};
use crate::{RankDir, Result};

/// Inherited attribute names
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Bg,
    Fill,
    BorderColor,
    BorderWidth,
    Font,
    FontSize,
    AlignX,
    AlignY,
    OuterBorder,
    RankDir,
    /// Free-form key used by individual nodes (`grad_width`, `progress`, ...)
    Ext(String),
}

impl Key {
    pub fn ext(name: impl Into<String>) -> Self {
        Key::Ext(name.into())
    }
}

/// Attribute value stored in a context
#[derive(Debug, Clone)]
pub enum Attr {
    Color(Color),
    Number(f32),
    Flag(bool),
    Font(Font),
    RankDir(RankDir),
    Text(String),
    /// Width and height in pixels
    Size(u32, u32),
    Image(Canvas),
}

impl From<Color> for Attr {
    fn from(value: Color) -> Self {
        Attr::Color(value)
    }
}

impl From<f32> for Attr {
    fn from(value: f32) -> Self {
        Attr::Number(value)
    }
}

impl From<u32> for Attr {
    fn from(value: u32) -> Self {
        Attr::Number(value as f32)
    }
}

impl From<bool> for Attr {
    fn from(value: bool) -> Self {
        Attr::Flag(value)
    }
}

impl From<Font> for Attr {
    fn from(value: Font) -> Self {
        Attr::Font(value)
    }
}

impl From<RankDir> for Attr {
    fn from(value: RankDir) -> Self {
        Attr::RankDir(value)
    }
}

impl From<&str> for Attr {
    fn from(value: &str) -> Self {
        Attr::Text(value.to_string())
    }
}

impl From<String> for Attr {
    fn from(value: String) -> Self {
        Attr::Text(value)
    }
}

impl From<(u32, u32)> for Attr {
    fn from((w, h): (u32, u32)) -> Self {
        Attr::Size(w, h)
    }
}

impl From<Canvas> for Attr {
    fn from(value: Canvas) -> Self {
        Attr::Image(value)
    }
}

/// Typed extraction from an [`Attr`]. A mismatched variant reads as absent.
pub trait FromAttr: Sized {
    fn from_attr(attr: &Attr) -> Option<Self>;
}

impl FromAttr for Color {
    fn from_attr(attr: &Attr) -> Option<Self> {
        match attr {
            Attr::Color(c) => Some(*c),
            _ => None,
        }
    }
}

impl FromAttr for f32 {
    fn from_attr(attr: &Attr) -> Option<Self> {
        match attr {
            Attr::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl FromAttr for u32 {
    fn from_attr(attr: &Attr) -> Option<Self> {
        match attr {
            Attr::Number(n) => Some(n.max(0.0) as u32),
            _ => None,
        }
    }
}

impl FromAttr for bool {
    fn from_attr(attr: &Attr) -> Option<Self> {
        match attr {
            Attr::Flag(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromAttr for Font {
    fn from_attr(attr: &Attr) -> Option<Self> {
        match attr {
            Attr::Font(f) => Some(f.clone()),
            _ => None,
        }
    }
}

impl FromAttr for RankDir {
    fn from_attr(attr: &Attr) -> Option<Self> {
        match attr {
            Attr::RankDir(d) => Some(*d),
            _ => None,
        }
    }
}

impl FromAttr for String {
    fn from_attr(attr: &Attr) -> Option<Self> {
        match attr {
            Attr::Text(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromAttr for (u32, u32) {
    fn from_attr(attr: &Attr) -> Option<Self> {
        match attr {
            Attr::Size(w, h) => Some((*w, *h)),
            _ => None,
        }
    }
}

impl FromAttr for Canvas {
    fn from_attr(attr: &Attr) -> Option<Self> {
        match attr {
            Attr::Image(c) => Some(c.clone()),
            _ => None,
        }
    }
}

/// Wall-clock source for time-dependent nodes
pub trait Clock: Send + Sync {
    /// Time since the Unix epoch
    fn now(&self) -> Duration;
}

/// The system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default()
    }
}

/// A clock stopped at a fixed instant
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedClock(pub Duration);

impl FixedClock {
    pub fn from_secs_f64(secs: f64) -> Self {
        Self(Duration::from_secs_f64(secs.max(0.0)))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Duration {
        self.0
    }
}

/// Inherited attributes plus the services nodes may need while rendering
#[derive(Clone)]
pub struct Context {
    attrs: Arc<HashMap<Key, Attr>>,
    emoji: Option<Arc<dyn EmojiSource>>,
    clock: Arc<dyn Clock>,
}

impl Context {
    /// Empty context with the system clock and no emoji source
    pub fn new() -> Self {
        Self {
            attrs: Arc::new(HashMap::new()),
            emoji: None,
            clock: Arc::new(SystemClock),
        }
    }

    /// Derive a context with `key` overridden
    pub fn with(&self, key: Key, attr: impl Into<Attr>) -> Self {
        let mut child = self.clone();
        Arc::make_mut(&mut child.attrs).insert(key, attr.into());
        child
    }

    /// Derive a context with an extension key overridden
    pub fn with_ext(&self, name: &str, attr: impl Into<Attr>) -> Self {
        self.with(Key::ext(name), attr)
    }

    /// Derive a context with `key` removed
    pub fn without(&self, key: &Key) -> Self {
        if !self.attrs.contains_key(key) {
            return self.clone();
        }
        let mut child = self.clone();
        Arc::make_mut(&mut child.attrs).remove(key);
        child
    }

    pub fn with_emoji_source(mut self, source: Arc<dyn EmojiSource>) -> Self {
        self.emoji = Some(source);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Raw attribute
    pub fn get(&self, key: &Key) -> Option<&Attr> {
        self.attrs.get(key)
    }

    /// Typed attribute, absent on a missing key or mismatched type
    pub fn get_as<T: FromAttr>(&self, key: &Key) -> Option<T> {
        self.attrs.get(key).and_then(T::from_attr)
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.attrs.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// First present value from the node-local field, then `self[key]`.
    ///
    /// Every node reads inherited attributes through this; callers apply
    /// their documented default with `unwrap_or`.
    pub fn lookup<T: FromAttr + Clone>(&self, local: &Option<Value<T>>, key: &Key) -> Result<Option<T>> {
        if let Some(value) = resolve_opt(local, self)? {
            return Ok(Some(value));
        }
        Ok(self.get_as(key))
    }

    pub fn emoji_source(&self) -> Option<&Arc<dyn EmojiSource>> {
        self.emoji.as_ref()
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Current time from the context clock
    pub fn now(&self) -> Duration {
        self.clock.now()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("attrs", &self.attrs)
            .field("emoji", &self.emoji.is_some())
            .finish()
    }
}
