// src/config.rs

//! Configuration loading utilities.
//!
//! Values come from three layers, later ones winning:
//! the TOML file, a `.env` file in the working directory, and the process
//! environment (`FEED_URL`, `BOT_TOKEN`, `DEST_CHANNEL`, `FOLLOW_LINE`).

use std::path::Path;

use crate::error::Result;
use crate::models::Config;

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file is missing or invalid.
pub fn load_config(path: &Path) -> Config {
    if path.exists() {
        Config::load_or_default(path)
    } else {
        log::info!("No config file at {}; using defaults", path.display());
        Config::default()
    }
}

/// Load configuration with `.env` and environment overrides applied.
pub fn load_with_env(path: &Path) -> Config {
    match dotenvy::dotenv() {
        Ok(env_path) => log::debug!("Loaded environment from {}", env_path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => log::warn!("Ignoring unreadable .env file: {}", e),
    }

    let mut config = load_config(path);
    config.apply_overrides(|key| std::env::var(key).ok().filter(|v| !v.trim().is_empty()));
    config
}

/// Load configuration and validate it.
pub fn load_all(path: &Path) -> Result<Config> {
    let config = load_with_env(path);
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("absent.toml"));
        assert_eq!(config.delivery.delay_ms, 1000);
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[feed\nurl = ").unwrap();

        let config = load_config(&path);
        assert!(config.feed.url.is_empty());
    }

    #[test]
    fn test_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "[feed]\nurl = \"https://rss.example.com/feed.xml\"\n\n[message]\nheader = \"News\"\n",
        )
        .unwrap();

        let config = load_config(&path);
        assert_eq!(config.feed.url, "https://rss.example.com/feed.xml");
        assert_eq!(config.message.header, "News");
    }
}
