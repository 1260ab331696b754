//! Resift library crate (used by the demo binary and integration tests).
//!
//! Two-stage semantic retrieval: a bi-encoder embeds documents into a vector
//! index for fast approximate search, then a cross-encoder re-scores the
//! retrieved candidates for precision.
//!
//! # Public API Surface
//!
//! ## Core Pipeline
//! - [`Pipeline`] - Retrieve-then-rerank orchestration
//! - [`Document`], [`Candidate`], [`ScoredCandidate`] - Pipeline data types
//!
//! ## Embedding & Scoring
//! - [`BiEncoder`], [`BiEncoderConfig`] - Sentence embedding generation
//! - [`CrossEncoder`], [`CrossEncoderConfig`] - Pairwise relevance scoring
//!
//! ## Vector Index
//! - [`VectorIndex`] - Async index abstraction
//! - [`QdrantIndex`] - Qdrant-backed index
//! - [`MemoryIndex`] - In-process brute-force index
//!
//! ## Configuration
//! - [`Config`], [`ConfigError`] - Environment-backed settings
//!
//! Both encoders support a stub mode (deterministic, model-free) so the full
//! pipeline runs in tests and demos without model files on disk.

pub mod config;
pub mod constants;
pub mod embedding;
pub mod index;
pub mod pipeline;

pub use config::{Config, ConfigError};
pub use constants::{
    DEFAULT_EMBEDDING_DIM, DEFAULT_MAX_SEQ_LEN, DEFAULT_RELEVANCE_THRESHOLD,
    DEFAULT_TOP_K_FINAL, DEFAULT_TOP_N_RETRIEVE,
};
pub use embedding::{
    BiEncoder, BiEncoderConfig, CrossEncoder, CrossEncoderConfig, CrossEncoderError,
    EmbeddingError,
};
pub use index::{
    DEFAULT_COLLECTION_NAME, IndexError, IndexPoint, MemoryIndex, QdrantIndex, SearchHit,
    VectorIndex, cosine_similarity,
};
pub use pipeline::{Candidate, Document, Pipeline, PipelineError, ScoredCandidate};
