//! Cross-encoder pair scorer.
//!
//! Jointly encodes (query, candidate) pairs and emits one relevance score per
//! pair, higher = more relevant. More accurate than comparing independent
//! embeddings, and priced accordingly: reserve it for the small candidate set
//! the first stage hands over.

pub mod config;
pub mod error;


pub use config::{CrossEncoderConfig, DEFAULT_THRESHOLD, MAX_SEQ_LEN};
pub use error::CrossEncoderError;

use candle_core::Tensor;
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use crate::embedding::bert::BertPairClassifier;
use crate::embedding::device::select_device;
use crate::embedding::utils::load_tokenizer_with_truncation;

pub struct CrossEncoder {
    device: candle_core::Device,
    config: CrossEncoderConfig,
    model: Option<BertPairClassifier>,
    tokenizer: Option<Tokenizer>,
}

impl std::fmt::Debug for CrossEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrossEncoder")
            .field("device", &format!("{:?}", self.device))
            .field("config", &self.config)
            .field("model_loaded", &self.model.is_some())
            .finish()
    }
}

impl CrossEncoder {
    pub fn load(config: CrossEncoderConfig) -> Result<Self, CrossEncoderError> {
        if let Err(msg) = config.validate() {
            return Err(CrossEncoderError::InvalidConfig { reason: msg });
        }

        let device = select_device()?;
        debug!(?device, "Selected compute device for cross-encoder");

        let Some(ref model_path) = config.model_path else {
            warn!("Cross-encoder running in STUB mode (lexical overlap scoring)");
            return Ok(Self {
                device,
                config,
                model: None,
                tokenizer: None,
            });
        };

        if !model_path.exists() {
            return Err(CrossEncoderError::ModelNotFound {
                path: model_path.clone(),
            });
        }

        for required in ["config.json", "model.safetensors"] {
            if !model_path.join(required).exists() {
                return Err(CrossEncoderError::ModelLoadFailed {
                    reason: format!("Missing {} in {}", required, model_path.display()),
                });
            }
        }

        info!(
            model_path = %model_path.display(),
            threshold = config.threshold,
            "Loading cross-encoder model"
        );

        let model = BertPairClassifier::load(model_path, &device).map_err(|e| {
            CrossEncoderError::ModelLoadFailed {
                reason: format!("Failed to load BERT classifier: {}", e),
            }
        })?;

        let tokenizer = load_tokenizer_with_truncation(model_path, MAX_SEQ_LEN).map_err(|e| {
            CrossEncoderError::ModelLoadFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;

        info!(
            threshold = config.threshold,
            "Cross-encoder model loaded"
        );

        Ok(Self {
            device,
            config,
            model: Some(model),
            tokenizer: Some(tokenizer),
        })
    }

    /// Builds a stub scorer (lexical overlap, model-free).
    pub fn stub() -> Result<Self, CrossEncoderError> {
        Self::load(CrossEncoderConfig::stub())
    }

    /// Scores one (query, candidate) pair. Higher = more relevant.
    pub fn score(&self, query: &str, candidate: &str) -> Result<f32, CrossEncoderError> {
        debug!(
            query_len = query.len(),
            candidate_len = candidate.len(),
            model_loaded = self.model.is_some(),
            "Scoring query-candidate pair"
        );

        if let (Some(model), Some(tokenizer)) = (&self.model, &self.tokenizer) {
            let tokens = tokenizer.encode((query, candidate), true).map_err(|e| {
                CrossEncoderError::TokenizationFailed {
                    reason: e.to_string(),
                }
            })?;

            let token_ids = Tensor::new(tokens.get_ids(), &self.device)
                .map_err(CrossEncoderError::from)?
                .unsqueeze(0)
                .map_err(CrossEncoderError::from)?;

            let type_ids = Tensor::new(tokens.get_type_ids(), &self.device)
                .map_err(CrossEncoderError::from)?
                .unsqueeze(0)
                .map_err(CrossEncoderError::from)?;

            // The tokenizer's attention mask handles padding tokens correctly.
            let attention_mask = Tensor::new(tokens.get_attention_mask(), &self.device)
                .map_err(CrossEncoderError::from)?
                .unsqueeze(0)
                .map_err(CrossEncoderError::from)?;

            let logits = model
                .forward(&token_ids, &type_ids, Some(&attention_mask))
                .map_err(|e| CrossEncoderError::InferenceFailed {
                    reason: e.to_string(),
                })?;

            let score = logits
                .flatten_all()
                .map_err(CrossEncoderError::from)?
                .to_vec1::<f32>()
                .map_err(CrossEncoderError::from)?[0];
            return Ok(score);
        }

        let score = self.compute_stub_score(query, candidate);

        debug!(score = score, "Computed score (stub)");

        Ok(score)
    }

    /// Scores a batch of pairs sharing one query, one score per candidate,
    /// same order.
    pub fn score_pairs(
        &self,
        query: &str,
        candidates: &[&str],
    ) -> Result<Vec<f32>, CrossEncoderError> {
        debug!(
            query_len = query.len(),
            num_candidates = candidates.len(),
            "Scoring candidate batch"
        );

        candidates
            .iter()
            .map(|candidate| self.score(query, candidate))
            .collect()
    }

    /// Scores and ranks candidates, returning `(original index, score)` pairs
    /// sorted by score descending. Equal scores keep their input order.
    pub fn rerank(
        &self,
        query: &str,
        candidates: &[&str],
    ) -> Result<Vec<(usize, f32)>, CrossEncoderError> {
        let scores = self.score_pairs(query, candidates)?;

        let mut scored: Vec<(usize, f32)> = scores.into_iter().enumerate().collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        debug!(
            top_score = scored.first().map(|(_, s)| *s),
            "Reranking complete"
        );

        Ok(scored)
    }

    /// Like [`rerank`](Self::rerank), keeping only candidates above the
    /// configured threshold.
    pub fn rerank_above_threshold(
        &self,
        query: &str,
        candidates: &[&str],
    ) -> Result<Vec<(usize, f32)>, CrossEncoderError> {
        let ranked = self.rerank(query, candidates)?;
        let threshold = self.config.threshold;

        let filtered: Vec<_> = ranked
            .into_iter()
            .filter(|(_, score)| *score > threshold)
            .collect();

        debug!(
            threshold = threshold,
            hits = filtered.len(),
            total = candidates.len(),
            "Filtered by threshold"
        );

        Ok(filtered)
    }

    pub fn is_model_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn threshold(&self) -> f32 {
        self.config.threshold
    }

    pub fn config(&self) -> &CrossEncoderConfig {
        &self.config
    }

    pub fn is_relevant(&self, score: f32) -> bool {
        score > self.config.threshold
    }

    fn compute_stub_score(&self, query: &str, candidate: &str) -> f32 {
        use std::collections::HashSet;

        let stop_words: HashSet<&str> = [
            "a", "an", "the", "is", "are", "was", "were", "be", "been", "being", "have", "has",
            "had", "do", "does", "did", "will", "would", "could", "should", "may", "might", "must",
            "shall", "can", "need", "dare", "ought", "used", "to", "of", "in", "for", "on", "with",
            "at", "by", "from", "as", "into", "through", "during", "before", "after", "above",
            "below", "between", "under", "again", "further", "then", "once", "here", "there",
            "when", "where", "why", "how", "all", "each", "few", "more", "most", "other", "some",
            "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very", "just",
            "and", "but", "if", "or", "because", "until", "while", "what", "which", "who", "whom",
            "this", "that", "these", "those", "am", "it", "its",
        ]
        .into_iter()
        .collect();

        let query_lower = query.to_lowercase();
        let query_words: HashSet<&str> = query_lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty() && !stop_words.contains(w))
            .collect();

        let candidate_lower = candidate.to_lowercase();
        let candidate_words: HashSet<&str> = candidate_lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty() && !stop_words.contains(w))
            .collect();

        if query_words.is_empty() {
            let len_ratio = (query.len().min(candidate.len()) as f32)
                / (query.len().max(candidate.len()).max(1) as f32);
            return len_ratio * 0.3;
        }

        let matches = query_words.intersection(&candidate_words).count();
        let recall = matches as f32 / query_words.len() as f32;

        let union = query_words.union(&candidate_words).count();
        let jaccard = if union > 0 {
            matches as f32 / union as f32
        } else {
            0.0
        };

        let base_score = 0.6 * recall + 0.4 * jaccard;

        let normalized = 1.0 / (1.0 + (-8.0 * (base_score - 0.5)).exp());

        normalized.clamp(0.0, 1.0)
    }
}
