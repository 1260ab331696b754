//! Cross-cutting, shared constants.
//!
//! Prefer deriving secondary constants from primary ones to avoid drift.

/// Embedding dimension of the default bi-encoder (MiniLM-class models).
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

pub const DEFAULT_VECTOR_SIZE_U64: u64 = DEFAULT_EMBEDDING_DIM as u64;

/// First-stage retrieval breadth: how many candidates vector search hands
/// to the cross-encoder.
pub const DEFAULT_TOP_N_RETRIEVE: usize = 4;

/// Final result size after re-ranking.
pub const DEFAULT_TOP_K_FINAL: usize = 2;

/// Cross-encoder relevance threshold used by the optional filter path.
pub const DEFAULT_RELEVANCE_THRESHOLD: f32 = 0.70;

pub const DEFAULT_MAX_SEQ_LEN: usize = 512;
