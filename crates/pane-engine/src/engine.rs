//! Engine - Main entry point

use std::sync::Arc;

use pane_emoji::{EmojiError, OpenMojiSource};
use pane_layout::{Content, Context, Key, LayoutError};
use pane_render::{Canvas, RenderError};
use pane_text::{Font, FontDatabase, FontQuery, TextError};

use crate::Config;

/// The Pane layout engine.
///
/// Holds the initial context built from a [`Config`]; every render starts
/// from it.
pub struct Engine {
    config: Config,
    context: Context,
}

impl Engine {
    /// Create a new engine with the given configuration
    pub fn new(config: Config) -> Result<Self> {
        let mut context = Context::new().with(Key::FontSize, config.font_size);

        if let Some(font) = load_font(&config)? {
            tracing::debug!("Engine font: {}", font.name());
            context = context.with(Key::Font, font);
        }
        if let Some(bg) = config.background {
            context = context.with(Key::Bg, bg);
        }
        if let Some(fill) = config.fill {
            context = context.with(Key::Fill, fill);
        }
        if config.emoji.enabled {
            let source = OpenMojiSource::with_template(
                &config.emoji.url_template,
                config.emoji.timeout,
                &config.emoji.user_agent,
            )?
            .failure_ttl(config.emoji.failure_ttl);
            context = context.with_emoji_source(Arc::new(source));
        }

        tracing::info!("Pane Engine {} initialized", crate::VERSION);
        Ok(Self { config, context })
    }

    /// Render a widget tree starting from the engine's context
    pub fn render(&self, root: &Content) -> Result<Canvas> {
        Ok(pane_layout::render(root, &self.context)?)
    }

    /// Initial context handed to every render
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Get engine configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// An explicit file must load; a family query that matches nothing leaves
/// the font to the system default.
fn load_font(config: &Config) -> Result<Option<Font>> {
    if let Some(path) = &config.font_path {
        return Ok(Some(FontDatabase::load_file(path)?));
    }
    if config.font_families.is_empty() {
        return Ok(None);
    }

    let db = FontDatabase::with_system_fonts();
    let font = db.load(&FontQuery::new(config.font_families.as_slice()));
    if font.is_none() {
        tracing::warn!("No font matched {:?}", config.font_families);
    }
    Ok(font)
}

/// Engine error
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Text error: {0}")]
    Text(#[from] TextError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Emoji error: {0}")]
    Emoji(#[from] EmojiError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
