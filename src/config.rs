//! YAML configuration for Vibe Matcher
//!
//! One file describes the embedder, where the catalog lives, the default result count and the
//! smoke-test cases. Every section is optional; missing fields take their defaults.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//!
//! semantic:
//!   mode: "onnx"
//!   model_path: "./models/all-mpnet-base-v2/onnx/model.onnx"
//!   tokenizer_path: "./models/all-mpnet-base-v2/tokenizer.json"
//!
//! catalog:
//!   path: "assets/catalog.json"
//!
//! matcher:
//!   default_top_n: 3
//!
//! smoke:
//!   threshold: 0.7
//!   cases:
//!     - query: "energetic urban chic"
//!       expected: "Urbanite Tech Runner"
//! ```
//!
//! ## Environment overrides
//!
//! Applied by [`VibeConfig::load`] after the file is read:
//!
//! - `VIBEMATCHER_SEMANTIC_MODE` - `onnx` or `fast`
//! - `VIBEMATCHER_MODEL_PATH` - local ONNX file
//! - `VIBEMATCHER_TOKENIZER_PATH` - local `tokenizer.json`
//! - `VIBEMATCHER_CATALOG` - catalog JSON path

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use semantic::{EmbeddingMode, SemanticConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::smoke::SmokeConfig;

pub const ENV_SEMANTIC_MODE: &str = "VIBEMATCHER_SEMANTIC_MODE";
pub const ENV_MODEL_PATH: &str = "VIBEMATCHER_MODEL_PATH";
pub const ENV_TOKENIZER_PATH: &str = "VIBEMATCHER_TOKENIZER_PATH";
pub const ENV_CATALOG: &str = "VIBEMATCHER_CATALOG";

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct VibeConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub semantic: SemanticConfig,

    #[serde(default)]
    pub catalog: CatalogYamlConfig,

    #[serde(default)]
    pub matcher: MatcherYamlConfig,

    #[serde(default)]
    pub smoke: SmokeConfig,
}

impl VibeConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: VibeConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// File (or defaults when `path` is `None`) plus `VIBEMATCHER_*` environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigLoadError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigLoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mode) = lookup(ENV_SEMANTIC_MODE) {
            self.semantic.mode = mode
                .parse::<EmbeddingMode>()
                .map_err(|e| ConfigLoadError::Validation(format!("{ENV_SEMANTIC_MODE}: {e}")))?;
        }
        if let Some(path) = lookup(ENV_MODEL_PATH) {
            self.semantic.model_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(ENV_TOKENIZER_PATH) {
            self.semantic.tokenizer_path = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup(ENV_CATALOG) {
            self.catalog.path = PathBuf::from(path);
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        if self.semantic.max_sequence_length == 0 {
            return Err(ConfigLoadError::Validation(
                "semantic.max_sequence_length must be >= 1".to_string(),
            ));
        }
        if self.semantic.stub_dimension == 0 {
            return Err(ConfigLoadError::Validation(
                "semantic.stub_dimension must be >= 1".to_string(),
            ));
        }
        if self.catalog.path.as_os_str().is_empty() {
            return Err(ConfigLoadError::Validation(
                "catalog.path must not be empty".to_string(),
            ));
        }
        self.matcher.validate()?;

        if !(-1.0..=1.0).contains(&self.smoke.threshold) {
            return Err(ConfigLoadError::Validation(
                "smoke.threshold must be between -1.0 and 1.0".to_string(),
            ));
        }
        if self.smoke.cases.iter().any(|c| c.query.trim().is_empty()) {
            return Err(ConfigLoadError::Validation(
                "smoke.cases[].query must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for VibeConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            semantic: SemanticConfig::default(),
            catalog: CatalogYamlConfig::default(),
            matcher: MatcherYamlConfig::default(),
            smoke: SmokeConfig::default(),
        }
    }
}

/// Where the catalog JSON lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogYamlConfig {
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

impl Default for CatalogYamlConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

/// Matcher YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatcherYamlConfig {
    /// Result count used when a caller does not ask for one.
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,
}

impl MatcherYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.default_top_n == 0 {
            return Err(ConfigLoadError::Validation(
                "matcher.default_top_n must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for MatcherYamlConfig {
    fn default() -> Self {
        Self {
            default_top_n: default_top_n(),
        }
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("assets/catalog.json")
}

fn default_top_n() -> usize {
    3
}
