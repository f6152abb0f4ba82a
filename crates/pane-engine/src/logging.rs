//! Logging setup

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `PANE_LOG`, then `RUST_LOG`, then `warn`.
///
/// Calling it again once a subscriber is installed does nothing.
pub fn init_logging() {
    let directives = std::env::var("PANE_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string());

    let installed = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .try_init();
    if installed.is_ok() {
        tracing::debug!("Logging initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice() {
        init_logging();
        init_logging();
    }
}
