use std::path::PathBuf;

use crate::constants::{DEFAULT_EMBEDDING_DIM, DEFAULT_MAX_SEQ_LEN};

#[derive(Debug, Clone)]
pub struct BiEncoderConfig {
    /// Model directory (config.json + model.safetensors + tokenizer.json).
    /// `None` selects the deterministic stub backend.
    pub model_path: Option<PathBuf>,

    /// Output embedding dimension.
    pub embedding_dim: usize,

    /// Maximum input sequence length in tokens.
    pub max_seq_len: usize,
}

impl Default for BiEncoderConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
        }
    }
}

impl BiEncoderConfig {
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: Some(model_path.into()),
            ..Default::default()
        }
    }

    pub fn stub() -> Self {
        Self::default()
    }

    pub fn with_embedding_dim(mut self, embedding_dim: usize) -> Self {
        self.embedding_dim = embedding_dim;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.embedding_dim == 0 {
            return Err("embedding_dim must be non-zero".to_string());
        }

        if self.max_seq_len == 0 {
            return Err("max_seq_len must be non-zero".to_string());
        }

        if let Some(ref path) = self.model_path
            && path.as_os_str().is_empty()
        {
            return Err("model_path cannot be empty when provided".to_string());
        }

        Ok(())
    }
}
