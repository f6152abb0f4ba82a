//! Pane Layout - Widget Tree Layout Engine
//!
//! Composes a single raster image from a tree of layout nodes:
//! - Inherited style attributes through a persistent `Context`
//! - Deferred values resolved against the context at render time
//! - Box layout (`Row`, `Column`, `Grid`) with border/gap distribution
//! - Rich text with greedy line breaking over text and inline images
//! - Decorative leaves: borders, circular masks, gradients, 9-slice bubbles
//!
//! ```ignore
//! use pane_layout::*;
//!
//! let card = Row::new(vec![Text::new("A").into(), Text::new("B").into()]).width(512);
//! let image = render(&card.into(), &Context::new())?;
//! ```

pub mod animated;
pub mod bubble;
pub mod content;
pub mod context;
pub mod decor;
mod error;
pub mod fill;
pub mod grid;
pub mod inject;
pub mod linear;
pub mod node;
pub mod resize;
pub mod rich_text;
pub mod size_box;
pub mod text;
pub mod value;

pub use animated::AnimatedFrames;
pub use bubble::{Bubble, BubblePieces};
pub use content::{render, render_content, render_single, Content, Rendered};
pub use context::{Attr, Clock, Context, FixedClock, FromAttr, Key, SystemClock};
pub use decor::{AddBorder, AvatarCircle, CompositeBg, Pill};
pub use error::{LayoutError, Result};
pub use fill::{ColorBox, GradientBox, Paint, ProgressBar, ResizeMethod};
pub use grid::{Grid, GridPlan, RankDir};
pub use inject::{SetFont, SetKwargs};
pub use linear::{distribute, Column, Constraint, Distribution, Row};
pub use node::Node;
pub use rich_text::{break_lines, RichText, Token};
pub use size_box::SizeBox;
pub use text::Text;
pub use value::{Value, MAX_DEFERRED_DEPTH};

/// Golden ratio, used for default spacings and limits
pub const GOLDEN_RATIO: f32 = 1.618;
