//! Configuration loading.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag)
//! 2. `~/.namecast/config.toml` (user)
//! 3. `/etc/namecast/config.toml` (system)

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::classifier::{AmbiguousNames, NgramModel};
use crate::refiner::{Namecast, Refiner};
use crate::session::SessionConfig;
use crate::types::{Question, QuestionCatalog, TargetCategory, Weights};
use crate::{NamecastError, Result};

/// Service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub refinement: RefinementConfig,
    #[serde(default)]
    pub session: SessionSection,
    /// Replaces the standard catalog when non-empty.
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:8750).
    #[serde(default = "default_address")]
    pub address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
        }
    }
}

fn default_address() -> String {
    "127.0.0.1:8750".to_string()
}

/// Classifier and lookup data locations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelConfig {
    /// Fitted n-gram model (JSON). Required to build a refiner.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// CSV file with a `name` column.
    #[serde(default)]
    pub ambiguous_names: Option<PathBuf>,
}

/// Blending configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RefinementConfig {
    #[serde(default = "default_target")]
    pub target: String,
    #[serde(default = "default_complement")]
    pub complement: String,
    #[serde(default = "default_fallback_index")]
    pub fallback_index: usize,
    #[serde(default = "default_name_weight")]
    pub name_weight: f64,
    #[serde(default = "default_questionnaire_weight")]
    pub questionnaire_weight: f64,
}

impl Default for RefinementConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            complement: default_complement(),
            fallback_index: default_fallback_index(),
            name_weight: default_name_weight(),
            questionnaire_weight: default_questionnaire_weight(),
        }
    }
}

fn default_target() -> String {
    "male".to_string()
}

fn default_complement() -> String {
    "female".to_string()
}

fn default_fallback_index() -> usize {
    1
}

fn default_name_weight() -> f64 {
    0.6
}

fn default_questionnaire_weight() -> f64 {
    0.4
}

/// Session store limits.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSection {
    /// Maximum live sessions (default: 10000).
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
    /// Session lifetime in seconds (default: 3600).
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            ttl_secs: default_ttl(),
        }
    }
}

fn default_max_entries() -> u64 {
    10_000
}

fn default_ttl() -> u64 {
    3600
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided)
    /// 2. `~/.namecast/config.toml`
    /// 3. `/etc/namecast/config.toml`
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = Self::resolve_config_path(explicit_path)?;
        Self::load_from_file(&path)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            NamecastError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            NamecastError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    /// Resolve the config file path.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(path.to_path_buf());
            }
            return Err(NamecastError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".namecast").join("config.toml");
            if user_config.exists() {
                return Ok(user_config);
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/namecast/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }

        Err(NamecastError::Configuration(
            "No config file found. Create ~/.namecast/config.toml or /etc/namecast/config.toml"
                .to_string(),
        ))
    }

    /// The configured question catalog, or the standard one.
    pub fn catalog(&self) -> Result<QuestionCatalog> {
        if self.questions.is_empty() {
            Ok(QuestionCatalog::standard())
        } else {
            QuestionCatalog::new(self.questions.clone())
        }
    }

    /// Validated blending weights.
    pub fn weights(&self) -> Result<Weights> {
        Weights::new(
            self.refinement.name_weight,
            self.refinement.questionnaire_weight,
        )
    }

    /// Target category with its complement and fallback index.
    pub fn target(&self) -> TargetCategory {
        TargetCategory::new(&self.refinement.target, &self.refinement.complement)
            .fallback_index(self.refinement.fallback_index)
    }

    /// Session store settings.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::new()
            .max_entries(self.session.max_entries)
            .ttl(Duration::from_secs(self.session.ttl_secs))
    }
}

/// Build a [`Refiner`] from configuration, loading the model from disk.
pub fn build_refiner(config: &Config) -> Result<Refiner> {
    let model_path = config.model.path.as_deref().ok_or_else(|| {
        NamecastError::Configuration("model.path is not set".to_string())
    })?;
    let model = NgramModel::load(model_path)?;
    info!(
        path = ?model_path,
        vocabulary = model.vocabulary_size(),
        "loaded name model"
    );

    let ambiguous = config
        .model
        .ambiguous_names
        .as_deref()
        .map(AmbiguousNames::load_or_empty)
        .unwrap_or_default();

    Namecast::builder()
        .classifier(Arc::new(model))
        .catalog(config.catalog()?)
        .target(config.target())
        .weights(config.weights()?)
        .ambiguous_names(ambiguous)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.server.address, "127.0.0.1:8750");
        assert_eq!(config.refinement.target, "male");
        assert_eq!(config.refinement.fallback_index, 1);
        assert_eq!(config.weights().unwrap(), Weights::default());
        assert_eq!(config.session.ttl_secs, 3600);
        assert_eq!(config.catalog().unwrap(), QuestionCatalog::standard());
    }

    #[test]
    fn parse_minimal_config() {
        let toml = r#"
            [model]
            path = "/opt/namecast/names.json"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.model.path,
            Some(PathBuf::from("/opt/namecast/names.json"))
        );
        // Defaults preserved
        assert_eq!(config.server.address, "127.0.0.1:8750");
        assert_eq!(config.session.max_entries, 10_000);
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
            [server]
            address = "0.0.0.0:9000"

            [model]
            path = "names.json"
            ambiguous_names = "ambiguous.csv"

            [refinement]
            target = "female"
            complement = "male"
            fallback_index = 0
            name_weight = 0.7
            questionnaire_weight = 0.3

            [session]
            max_entries = 50
            ttl_secs = 60
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.address, "0.0.0.0:9000");
        assert_eq!(config.target(), TargetCategory::new("female", "male").fallback_index(0));
        assert_eq!(config.weights().unwrap().name(), 0.7);
        let session = config.session_config();
        assert_eq!(session.max_entries, 50);
        assert_eq!(session.ttl, Duration::from_secs(60));
    }

    #[test]
    fn weights_that_do_not_sum_to_one_are_rejected() {
        let toml = r#"
            [refinement]
            name_weight = 0.7
            questionnaire_weight = 0.4
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.weights().is_err());
    }

    #[test]
    fn question_override_must_have_five_entries() {
        let toml = r#"
            [[questions]]
            id = 1
            text = "I like maps."
            direction = "forward"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.catalog().is_err());
    }

    #[test]
    fn config_not_found_returns_error() {
        let result = Config::load(Some(Path::new("/nonexistent/config.toml")));
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Config file not found"));
    }

    #[test]
    fn build_refiner_requires_model_path() {
        let err = build_refiner(&Config::default()).err().unwrap();
        assert!(err.to_string().contains("model.path"));
    }
}
