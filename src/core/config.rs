//! Application configuration management

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::highlight::HighlightOptions;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding saved files; the platform data directory when unset
    pub storage_dir: Option<PathBuf>,
    /// Editor settings
    pub editor: EditorConfig,
    /// UI settings
    pub ui: UiConfig,
    /// Highlighting settings
    pub highlight: HighlightConfig,
}

/// Editor-specific settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Font size in pixels
    pub font_size: f32,
    /// Word wrap
    pub word_wrap: bool,
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Theme (light/dark)
    pub theme: String,
    /// Sidebar width
    pub sidebar_width: f32,
    /// Show highlighted preview rather than raw code
    pub show_preview: bool,
    /// How long notifications stay visible
    pub notification_secs: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub keywords_in_literals: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            word_wrap: false,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            sidebar_width: 320.0,
            show_preview: true,
            notification_secs: 2.0,
        }
    }
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            keywords_in_literals: HighlightOptions::default().keywords_in_literals,
        }
    }
}

impl HighlightConfig {
    pub fn options(&self) -> HighlightOptions {
        HighlightOptions {
            keywords_in_literals: self.keywords_in_literals,
        }
    }
}

impl AppConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "codeshare", "CodeShare")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_json(&content)
    }

    /// Parse configuration, filling missing fields with defaults
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Invalid config file")
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Directory for saved files, if one can be determined
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.storage_dir
            .clone()
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
    }

    pub fn is_dark(&self) -> bool {
        self.ui.theme != "light"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = AppConfig::from_json(r#"{"ui": {"theme": "light"}}"#).unwrap();
        assert_eq!(config.ui.theme, "light");
        assert_eq!(config.ui.notification_secs, 2.0);
        assert!(config.highlight.keywords_in_literals);
        assert!(!config.is_dark());
    }

    #[test]
    fn test_storage_dir_override() {
        let config = AppConfig {
            storage_dir: Some(PathBuf::from("/tmp/codeshare")),
            ..Default::default()
        };
        assert_eq!(config.data_dir(), Some(PathBuf::from("/tmp/codeshare")));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(AppConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_config_is_error() {
        assert!(AppConfig::from_json("{oops").is_err());
    }
}
