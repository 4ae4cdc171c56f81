//! Configuration management
//!
//! Manages tutor configuration: Gemini model assignments and the data
//! directory for the profile and report stores.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Model assignments for different tutor roles
    #[serde(default)]
    pub models: ModelsConfig,
    /// Override for the store data directory (defaults to the platform
    /// data dir)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            models: ModelsConfig::default(),
            data_dir: None,
        }
    }
}

/// Model assignments for different tutor roles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Model for quiz generation and session summaries (reasoning-heavy)
    #[serde(default = "default_quiz_model")]
    pub quiz: String,
    /// Model for grading English answers (reasoning-heavy)
    #[serde(default = "default_quiz_model")]
    pub feedback: String,
    /// Model for grading Maths answers and producing hints (fast)
    #[serde(default = "default_fast_model")]
    pub fast: String,
    /// Model for generating question diagrams
    #[serde(default = "default_image_model")]
    pub image: String,
}

fn default_quiz_model() -> String {
    "gemini-2.5-pro".to_string()
}

fn default_fast_model() -> String {
    "gemini-2.5-flash-lite".to_string()
}

fn default_image_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            quiz: default_quiz_model(),
            feedback: default_quiz_model(),
            fast: default_fast_model(),
            image: default_image_model(),
        }
    }
}

impl ModelsConfig {
    /// Get model for a role name
    pub fn get(&self, role: &str) -> Option<&str> {
        match role.to_lowercase().as_str() {
            "quiz" | "summary" => Some(&self.quiz),
            "feedback" => Some(&self.feedback),
            "fast" | "hint" => Some(&self.fast),
            "image" => Some(&self.image),
            _ => None,
        }
    }

    /// Set model for a role name
    pub fn set(&mut self, role: &str, model: String) -> bool {
        match role.to_lowercase().as_str() {
            "quiz" | "summary" => {
                self.quiz = model;
                true
            }
            "feedback" => {
                self.feedback = model;
                true
            }
            "fast" | "hint" => {
                self.fast = model;
                true
            }
            "image" => {
                self.image = model;
                true
            }
            _ => false,
        }
    }

    /// List all available roles
    pub fn roles() -> &'static [&'static str] {
        &["quiz", "feedback", "fast", "image"]
    }
}

impl Config {
    /// Load configuration from file, creating the default on first run
    pub fn load() -> Result<Self> {
        let config_path = config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            let config: Config = toml::from_str(&contents)
                .context("Failed to parse config file")?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = config_path()?;
        let parent = config_path.parent()
            .context("Config path has no parent")?;

        std::fs::create_dir_all(parent)
            .context("Failed to create config directory")?;

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        std::fs::write(&config_path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Resolve the directory where the stores live
    pub fn store_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => data_dir(),
        }
    }
}

/// Get the configuration file path
pub fn config_path() -> Result<PathBuf> {
    let base = directories::ProjectDirs::from("nz", "ace-tutor", "ace-tutor")
        .context("Failed to get project directories")?;
    Ok(base.config_dir().join("config.toml"))
}

/// Get the data directory path
pub fn data_dir() -> Result<PathBuf> {
    let base = directories::ProjectDirs::from("nz", "ace-tutor", "ace-tutor")
        .context("Failed to get project directories")?;
    Ok(base.data_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_models() {
        let models = ModelsConfig::default();
        assert_eq!(models.quiz, "gemini-2.5-pro");
        assert_eq!(models.fast, "gemini-2.5-flash-lite");
        assert_eq!(models.image, "gemini-2.5-flash-image");
    }

    #[test]
    fn test_model_roles() {
        let mut models = ModelsConfig::default();
        assert!(models.set("hint", "gemini-2.0-flash".to_string()));
        assert_eq!(models.get("fast"), Some("gemini-2.0-flash"));
        assert!(!models.set("vision", "x".to_string()));
        assert!(models.get("vision").is_none());
    }

    #[test]
    fn test_config_toml_round_trip() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(back.models.quiz, config.models.quiz);
        assert!(back.data_dir.is_none());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[models]\nquiz = \"gemini-exp\"\n").unwrap();
        assert_eq!(config.models.quiz, "gemini-exp");
        assert_eq!(config.models.fast, "gemini-2.5-flash-lite");
    }
}
