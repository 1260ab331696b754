//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `RESIFT_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;

use crate::constants::{DEFAULT_TOP_K_FINAL, DEFAULT_TOP_N_RETRIEVE};

/// Pipeline configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `RESIFT_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the bi-encoder model directory (BERT + tokenizer).
    /// `None` selects the deterministic stub backend.
    pub encoder_path: Option<PathBuf>,

    /// Path to the cross-encoder model directory (BERT + tokenizer).
    /// `None` selects the lexical-overlap stub backend.
    pub cross_encoder_path: Option<PathBuf>,

    /// Qdrant endpoint URL. Default: `http://localhost:6334`.
    pub qdrant_url: String,

    /// Collection name for indexed documents. Default: `resift`.
    pub collection: String,

    /// First-stage retrieval breadth (N). Default: `4`.
    pub top_n: usize,

    /// Final result size after re-ranking (K). Default: `2`.
    pub top_k: usize,
}

/// Default Qdrant URL used when `RESIFT_QDRANT_URL` is not set.
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";

impl Default for Config {
    fn default() -> Self {
        Self {
            encoder_path: None,
            cross_encoder_path: None,
            qdrant_url: DEFAULT_QDRANT_URL.to_string(),
            collection: crate::index::DEFAULT_COLLECTION_NAME.to_string(),
            top_n: DEFAULT_TOP_N_RETRIEVE,
            top_k: DEFAULT_TOP_K_FINAL,
        }
    }
}

impl Config {
    const ENV_ENCODER_PATH: &'static str = "RESIFT_ENCODER_PATH";
    const ENV_CROSS_ENCODER_PATH: &'static str = "RESIFT_CROSS_ENCODER_PATH";
    const ENV_QDRANT_URL: &'static str = "RESIFT_QDRANT_URL";
    const ENV_COLLECTION: &'static str = "RESIFT_COLLECTION";
    const ENV_TOP_N: &'static str = "RESIFT_TOP_N";
    const ENV_TOP_K: &'static str = "RESIFT_TOP_K";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let encoder_path = Self::parse_optional_path_from_env(Self::ENV_ENCODER_PATH);
        let cross_encoder_path = Self::parse_optional_path_from_env(Self::ENV_CROSS_ENCODER_PATH);
        let qdrant_url = Self::parse_string_from_env(Self::ENV_QDRANT_URL, defaults.qdrant_url);
        let collection = Self::parse_string_from_env(Self::ENV_COLLECTION, defaults.collection);
        let top_n = Self::parse_usize_from_env(Self::ENV_TOP_N, defaults.top_n)?;
        let top_k = Self::parse_usize_from_env(Self::ENV_TOP_K, defaults.top_k)?;

        let config = Self {
            encoder_path,
            cross_encoder_path,
            qdrant_url,
            collection,
            top_n,
            top_k,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validates paths and basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_n == 0 || self.top_k == 0 || self.top_k > self.top_n {
            return Err(ConfigError::InvalidRetrievalSizes {
                top_n: self.top_n,
                top_k: self.top_k,
            });
        }

        for path in [&self.encoder_path, &self.cross_encoder_path]
            .into_iter()
            .flatten()
        {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        Ok(())
    }

    fn parse_optional_path_from_env(var_name: &'static str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_string_from_env(var_name: &'static str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_usize_from_env(var_name: &'static str, default: usize) -> Result<usize, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value.parse().map_err(|e| ConfigError::InvalidNumber {
                name: var_name,
                value,
                source: e,
            }),
            Err(_) => Ok(default),
        }
    }
}
