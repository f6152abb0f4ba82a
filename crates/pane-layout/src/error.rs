//! Layout error types

use pane_render::RenderError;
use pane_text::TextError;

/// Errors that abort a render call
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("Unsupported widget content: {found}")]
    UnsupportedContent { found: String },

    #[error("Unsupported gradient ({corners})")]
    UnsupportedGradient { corners: String },

    #[error("Unsupported progress bar fill: {found}")]
    UnsupportedFill { found: String },

    #[error("Deferred value did not resolve within {limit} steps")]
    DeferredLoop { limit: usize },

    #[error("{node} requires `{field}`")]
    MissingField { node: &'static str, field: &'static str },

    #[error("Animated frames list is empty")]
    EmptyFrames,

    #[error("Text error: {0}")]
    Text(#[from] TextError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
