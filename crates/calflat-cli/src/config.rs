//! CLI configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/calflat/config.toml` by default. Every field has a default,
//! so a missing file or an empty file both mean "stock settings".

use std::path::PathBuf;

use calflat_core::{DEFAULT_FUTURE_DAYS, DEFAULT_LINK_PATTERNS, DEFAULT_PAST_DAYS};
use serde::{Deserialize, Serialize};

/// Configuration for the calflat CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Reference timezone for local date and time columns (IANA name).
    pub timezone: String,

    /// Expansion window settings.
    #[serde(default)]
    pub window: WindowSettings,

    /// Conference link settings.
    #[serde(default)]
    pub links: LinkSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            timezone: "Asia/Ho_Chi_Minh".to_string(),
            window: WindowSettings::default(),
            links: LinkSettings::default(),
        }
    }
}

/// Expansion window reach, in days around "now".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Days before now.
    pub past_days: i64,

    /// Days after now.
    pub future_days: i64,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            past_days: DEFAULT_PAST_DAYS,
            future_days: DEFAULT_FUTURE_DAYS,
        }
    }
}

/// Conference link detection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkSettings {
    /// Regex patterns tried in order; the first pattern with a match wins.
    pub patterns: Vec<String>,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_LINK_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| format!("failed to read config: {}", e))?;
            toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &PathBuf) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("calflat")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_toml_is_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.timezone, "Asia/Ho_Chi_Minh");
        assert_eq!(config.window.past_days, DEFAULT_PAST_DAYS);
        assert_eq!(config.window.future_days, DEFAULT_FUTURE_DAYS);
        assert_eq!(config.links.patterns.len(), DEFAULT_LINK_PATTERNS.len());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
timezone = "Europe/Paris"

[window]
past_days = 30
"#,
        )
        .unwrap();
        assert_eq!(config.timezone, "Europe/Paris");
        assert_eq!(config.window.past_days, 30);
        assert_eq!(config.window.future_days, DEFAULT_FUTURE_DAYS);
    }

    #[test]
    fn custom_link_patterns_replace_the_stock_set() {
        let config: AppConfig = toml::from_str(
            r#"
[links]
patterns = ["https://meet\\.example\\.com/[a-z]+"]
"#,
        )
        .unwrap();
        assert_eq!(config.links.patterns.len(), 1);
    }

    #[test]
    fn load_from_reads_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timezone = \"UTC\"").unwrap();

        let config = AppConfig::load_from(&file.path().to_path_buf()).unwrap();
        assert_eq!(config.timezone, "UTC");
    }

    #[test]
    fn load_from_missing_file_errors() {
        let result = AppConfig::load_from(&PathBuf::from("/nonexistent/config.toml"));
        assert!(result.unwrap_err().contains("failed to read config"));
    }

    #[test]
    fn load_from_invalid_toml_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timezone = [not toml").unwrap();

        let result = AppConfig::load_from(&file.path().to_path_buf());
        assert!(result.unwrap_err().contains("failed to parse config"));
    }
}
