//! Logging setup
//!
//! The library only emits `tracing` events. Applications that do not
//! install their own subscriber can call [`init`] once at startup.

use crate::error::{Error, Result};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Install a formatted subscriber
///
/// `RUST_LOG` takes precedence; `level` is used only when it is unset or
/// unparsable. Fails if a global subscriber is already installed.
pub fn init(level: Level) -> Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(directives.as_deref(), level))
        .with_target(false)
        .try_init()
        .map_err(|e| Error::config(format!("Failed to install tracing subscriber: {e}")))
}

fn env_filter(directives: Option<&str>, level: Level) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(level.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;
    use tracing::level_filters::LevelFilter;

    #[test_case(Some("warn"), Level::DEBUG, LevelFilter::WARN ; "env wins over level")]
    #[test_case(Some("front_sync=trace"), Level::INFO, LevelFilter::TRACE ; "env target directive")]
    #[test_case(None, Level::DEBUG, LevelFilter::DEBUG ; "level when env unset")]
    #[test_case(Some("  "), Level::INFO, LevelFilter::INFO ; "level when env blank")]
    fn test_env_filter(directives: Option<&str>, level: Level, expected: LevelFilter) {
        assert_eq!(env_filter(directives, level).max_level_hint(), Some(expected));
    }

    #[test]
    fn test_second_init_fails() {
        let _ = init(Level::DEBUG);
        let err = init(Level::INFO).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
