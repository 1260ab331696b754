//! Embedding + model utilities.
//!
//! - [`encoder`] provides bi-encoder sentence embeddings (first stage).
//! - [`cross`] provides cross-encoder pair scoring (second stage), used by
//!   [`crate::pipeline`].

/// BERT wrappers used by both encoders.
pub mod bert;
/// Cross-encoder pair scorer.
pub mod cross;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
/// Bi-encoder sentence embedder.
pub mod encoder;
mod error;
/// Tokenizer loading helpers.
pub mod utils;

pub use cross::{CrossEncoder, CrossEncoderConfig, CrossEncoderError};
pub use encoder::{BiEncoder, BiEncoderConfig};
pub use error::EmbeddingError;
