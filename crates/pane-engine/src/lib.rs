//! Pane Engine
//!
//! Composes raster images (cards, banners, chat bubbles) from a declarative
//! tree of layout widgets.
//!
//! # Example
//! ```rust,ignore
//! use pane_engine::{Engine, Config};
//! use pane_engine::layout::{Row, Text};
//!
//! let engine = Engine::new(Config::default())?;
//! let card = Row::new(vec![Text::new("A").into(), Text::new("B").into()]).width(512);
//! engine.render(&card.into())?.save_png("card.png")?;
//! ```

mod config;
mod engine;
mod logging;

pub use config::{Config, EmojiConfig};
pub use engine::{Engine, EngineError, Result};
pub use logging::init_logging;

// Re-export sub-crates for advanced usage
pub use pane_emoji as emoji;
pub use pane_layout as layout;
pub use pane_render as render;
pub use pane_text as text;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
