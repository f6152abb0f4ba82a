//! Engine Configuration

use std::path::PathBuf;
use std::time::Duration;

use pane_emoji::{DEFAULT_FAILURE_TTL, OPENMOJI_URL_TEMPLATE};
use pane_render::Color;

/// Engine configuration options
#[derive(Debug, Clone)]
pub struct Config {
    /// Font families to try, in order
    pub font_families: Vec<String>,

    /// Explicit font file; overrides the family query
    pub font_path: Option<PathBuf>,

    /// Initial font size
    pub font_size: f32,

    /// Initial background color
    pub background: Option<Color>,

    /// Initial text color
    pub fill: Option<Color>,

    /// Emoji artwork lookup
    pub emoji: EmojiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font_families: ["sans-serif", "DejaVu Sans", "Liberation Sans", "Arial"]
                .into_iter()
                .map(String::from)
                .collect(),
            font_path: None,
            font_size: 12.0,
            background: None,
            fill: None,
            emoji: EmojiConfig::default(),
        }
    }
}

impl Config {
    pub fn font_families<S: AsRef<str>>(mut self, families: &[S]) -> Self {
        self.font_families = families.iter().map(|f| f.as_ref().to_string()).collect();
        self
    }

    pub fn font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = Some(path.into());
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn emoji(mut self, emoji: EmojiConfig) -> Self {
        self.emoji = emoji;
        self
    }

    /// Turn off emoji fetching; emoji render as plain text
    pub fn without_emoji(mut self) -> Self {
        self.emoji.enabled = false;
        self
    }
}

/// Emoji fetching options
#[derive(Debug, Clone)]
pub struct EmojiConfig {
    pub enabled: bool,

    /// URL with `{code}` standing for the uppercase hex code point
    pub url_template: String,

    /// Per-request timeout
    pub timeout: Duration,

    /// User agent string
    pub user_agent: String,

    /// How long a failed lookup is remembered before retrying
    pub failure_ttl: Duration,
}

impl Default for EmojiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url_template: OPENMOJI_URL_TEMPLATE.to_string(),
            timeout: Duration::from_secs(10),
            user_agent: format!("Pane-Engine/{}", crate::VERSION),
            failure_ttl: DEFAULT_FAILURE_TTL,
        }
    }
}

impl EmojiConfig {
    pub fn url_template(mut self, template: impl Into<String>) -> Self {
        self.url_template = template.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn failure_ttl(mut self, ttl: Duration) -> Self {
        self.failure_ttl = ttl;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.font_size, 12.0);
        assert_eq!(config.font_families[0], "sans-serif");
        assert!(config.font_path.is_none());
        assert!(config.emoji.enabled);
        assert_eq!(config.emoji.timeout, Duration::from_secs(10));
        assert!(config.emoji.url_template.contains("{code}"));
    }

    #[test]
    fn test_builder() {
        let config = Config::default()
            .font_families(&["Noto Sans"])
            .font_size(20.0)
            .background(Color::WHITE)
            .without_emoji();
        assert_eq!(config.font_families, vec!["Noto Sans".to_string()]);
        assert_eq!(config.font_size, 20.0);
        assert_eq!(config.background, Some(Color::WHITE));
        assert!(config.fill.is_none());
        assert!(!config.emoji.enabled);
    }

    #[test]
    fn test_emoji_builder() {
        let emoji = EmojiConfig::default()
            .url_template("http://localhost/{code}.png")
            .timeout(Duration::from_millis(250))
            .user_agent("test")
            .failure_ttl(Duration::from_secs(1));
        assert_eq!(emoji.url_template, "http://localhost/{code}.png");
        assert_eq!(emoji.timeout, Duration::from_millis(250));
        assert_eq!(emoji.user_agent, "test");
        assert_eq!(emoji.failure_ttl, Duration::from_secs(1));
    }
}
