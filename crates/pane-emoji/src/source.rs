//! Emoji image sources

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use pane_render::Canvas;

use crate::{emoji_code, EmojiError, Result};

/// OpenMoji color artwork, `{code}` is replaced by the uppercase hex code point
pub const OPENMOJI_URL_TEMPLATE: &str =
    "https://openmoji.org/php/download_asset.php?type=emoji&emoji_hexcode={code}&emoji_variant=color";

/// How long a failed fetch is remembered before the server is asked again
pub const DEFAULT_FAILURE_TTL: Duration = Duration::from_secs(300);

/// A best-effort lookup from emoji character to image.
///
/// Callers treat every error as "use the literal character instead".
pub trait EmojiSource: Send + Sync {
    fn fetch(&self, emoji: char) -> Result<Canvas>;
}

/// Fetches emoji artwork over HTTP and caches the outcome per code point.
///
/// Images are kept for the lifetime of the source. Failures are kept for
/// [`failure_ttl`](Self::failure_ttl) and then retried.
pub struct OpenMojiSource {
    client: reqwest::blocking::Client,
    url_template: String,
    failure_ttl: Duration,
    cache: Mutex<HashMap<String, (Result<Canvas>, Instant)>>,
}

impl OpenMojiSource {
    /// Create a source with the default OpenMoji endpoint
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        Self::with_template(OPENMOJI_URL_TEMPLATE, timeout, user_agent)
    }

    /// Create a source with a custom URL template
    pub fn with_template(url_template: &str, timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| EmojiError::RequestFailed {
                code: String::new(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            url_template: url_template.to_string(),
            failure_ttl: DEFAULT_FAILURE_TTL,
            cache: Mutex::new(HashMap::new()),
        })
    }

    /// How long a failed fetch is served from the cache
    pub fn failure_ttl(mut self, ttl: Duration) -> Self {
        self.failure_ttl = ttl;
        self
    }

    /// URL for a code point
    pub fn url_for(&self, code: &str) -> String {
        self.url_template.replace("{code}", code)
    }

    /// Number of cached outcomes (hits and failures)
    pub fn cached(&self) -> usize {
        self.cache.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// Cached outcome for a code point, `None` when absent or expired
    pub fn cached_outcome(&self, code: &str) -> Option<Result<Canvas>> {
        let cache = self.cache.lock().ok()?;
        match cache.get(code)? {
            (Ok(image), _) => Some(Ok(image.clone())),
            (Err(e), at) if at.elapsed() < self.failure_ttl => Some(Err(e.clone())),
            _ => None,
        }
    }

    fn download(&self, code: &str) -> Result<Canvas> {
        let url = self.url_for(code);
        tracing::debug!("Fetching emoji {} from {}", code, url);

        let response = self.client.get(&url).send().map_err(|e| EmojiError::RequestFailed {
            code: code.to_string(),
            reason: e.to_string(),
        })?;

        if !response.status().is_success() {
            return Err(EmojiError::HttpError {
                code: code.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body = response.bytes().map_err(|e| EmojiError::RequestFailed {
            code: code.to_string(),
            reason: e.to_string(),
        })?;

        Canvas::decode(&body).map_err(|e| EmojiError::Decode {
            code: code.to_string(),
            reason: e.to_string(),
        })
    }
}

impl EmojiSource for OpenMojiSource {
    fn fetch(&self, emoji: char) -> Result<Canvas> {
        let code = emoji_code(emoji);

        if let Some(hit) = self.cached_outcome(&code) {
            return hit;
        }

        let outcome = self.download(&code);
        if let Err(e) = &outcome {
            tracing::debug!("Emoji {} unavailable: {}", code, e);
        }
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(code, (outcome.clone(), Instant::now()));
        }
        outcome
    }
}

/// In-memory emoji table
#[derive(Debug, Clone, Default)]
pub struct StaticEmojiSource {
    images: HashMap<char, Canvas>,
}

impl StaticEmojiSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an image for `emoji`
    pub fn with(mut self, emoji: char, image: Canvas) -> Self {
        self.images.insert(emoji, image);
        self
    }

    pub fn insert(&mut self, emoji: char, image: Canvas) {
        self.images.insert(emoji, image);
    }
}

impl EmojiSource for StaticEmojiSource {
    fn fetch(&self, emoji: char) -> Result<Canvas> {
        self.images
            .get(&emoji)
            .cloned()
            .ok_or_else(|| EmojiError::NotFound(emoji_code(emoji)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pane_render::Color;

    #[test]
    fn test_static_source_hit_and_miss() {
        let source = StaticEmojiSource::new().with('😀', Canvas::new(4, 4, Color::RED));
        assert_eq!(source.fetch('😀').unwrap().size(), (4, 4));
        assert!(matches!(source.fetch('🚀'), Err(EmojiError::NotFound(code)) if code == "1F680"));
    }

    #[test]
    fn test_url_template_substitution() {
        let source = OpenMojiSource::new(Duration::from_secs(1), "pane-test").unwrap();
        assert_eq!(
            source.url_for("1F975"),
            "https://openmoji.org/php/download_asset.php?type=emoji&emoji_hexcode=1F975&emoji_variant=color"
        );
    }

    fn unreachable() -> OpenMojiSource {
        // Port 9 (discard) on localhost refuses connections quickly
        OpenMojiSource::with_template("http://127.0.0.1:9/{code}.png", Duration::from_millis(500), "pane-test")
            .unwrap()
    }

    #[test]
    fn test_failures_are_cached() {
        let source = unreachable();
        assert!(source.fetch('😀').is_err());
        assert_eq!(source.cached(), 1);
        assert!(matches!(source.cached_outcome("1F600"), Some(Err(_))));
        assert!(source.fetch('😀').is_err());
        assert_eq!(source.cached(), 1);
    }

    #[test]
    fn test_failures_expire() {
        let source = unreachable().failure_ttl(Duration::ZERO);
        assert!(source.fetch('😀').is_err());
        // Expired failures are not served, so the next fetch asks again
        assert!(source.cached_outcome("1F600").is_none());
        assert!(source.fetch('😀').is_err());
        assert_eq!(source.cached(), 1);
    }
}
