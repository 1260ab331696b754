use thiserror::Error;

use crate::embedding::{CrossEncoderError, EmbeddingError};
use crate::index::IndexError;

/// Errors returned by the retrieve-and-rerank pipeline.
///
/// Collaborator failures are wrapped, not translated: the embedding, index,
/// and scoring variants carry the underlying error unchanged.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Caller contract violation (zero sizes, k > n).
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Scoring(#[from] CrossEncoderError),
}
