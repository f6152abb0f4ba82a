//! Pane Emoji - Emoji Lookup
//!
//! Classifies emoji-presentation characters and resolves them to images:
//! - `is_emoji_presentation` over the Unicode `Emoji_Presentation` property
//! - `EmojiSource` trait for pluggable, best-effort lookups
//! - `OpenMojiSource` fetching color artwork over HTTP with a per-code cache
//! - `StaticEmojiSource` for offline use and tests

mod classify;
mod source;

pub use classify::{emoji_code, is_emoji_presentation};
pub use source::{EmojiSource, OpenMojiSource, StaticEmojiSource, DEFAULT_FAILURE_TTL, OPENMOJI_URL_TEMPLATE};

/// Emoji lookup error types
#[derive(Debug, Clone, thiserror::Error)]
pub enum EmojiError {
    #[error("No artwork for emoji {0}")]
    NotFound(String),

    #[error("Request for emoji {code} failed: {reason}")]
    RequestFailed { code: String, reason: String },

    #[error("HTTP error {status} for emoji {code}")]
    HttpError { code: String, status: u16 },

    #[error("Failed to decode emoji {code}: {reason}")]
    Decode { code: String, reason: String },
}

pub type Result<T> = std::result::Result<T, EmojiError>;
