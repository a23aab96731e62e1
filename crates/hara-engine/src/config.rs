//! Engine configuration.
//!
//! Layers, lowest precedence first: built-in defaults, an optional config
//! file (TOML, YAML or JSON by extension), then `HARA__`-prefixed environment
//! variables such as `HARA__COMPATIBILITY__ENFORCEMENT=reject`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use hara_types::SituationCategory;

use crate::catalog::SituationCatalog;
use crate::compatibility::{CategoryPairPolicy, CompatibilityEnforcement};
use crate::error::EngineResult;

/// Top-level engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Situation catalog source
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Compatibility checking for combinations
    #[serde(default)]
    pub compatibility: CompatibilityConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the situation catalog comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON catalog file; the embedded catalog when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl CatalogConfig {
    pub fn load(&self) -> EngineResult<SituationCatalog> {
        match &self.path {
            Some(path) => SituationCatalog::from_path(path),
            None => Ok(SituationCatalog::builtin()?),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityConfig {
    #[serde(default)]
    pub enforcement: CompatibilityEnforcement,

    /// Category pairs that cannot occur together, e.g. `["urban", "highway"]`
    #[serde(default)]
    pub incompatible_pairs: Vec<(SituationCategory, SituationCategory)>,
}

impl CompatibilityConfig {
    pub fn policy(&self) -> CategoryPairPolicy {
        CategoryPairPolicy::from_pairs(self.incompatible_pairs.iter().copied())
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl EngineConfig {
    /// Load configuration, reading `path` when given.
    ///
    /// A given path must exist; missing sections fall back to defaults.
    pub fn load(path: Option<&str>) -> EngineResult<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("HARA")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        Ok(builder.build()?.try_deserialize()?)
    }
}
