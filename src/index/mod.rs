//! Vector index backends.
//!
//! [`VectorIndex`] is the async seam the pipeline talks to; [`QdrantIndex`]
//! backs it with a Qdrant instance and [`MemoryIndex`] with an in-process
//! brute-force scan.

pub mod error;
pub mod memory;
pub mod model;
pub mod qdrant;

#[cfg(test)]
mod tests;

pub use error::IndexError;
pub use memory::{MemoryIndex, cosine_similarity};
pub use model::{IndexPoint, SearchHit};
pub use qdrant::{QdrantIndex, VectorIndex};

pub const DEFAULT_COLLECTION_NAME: &str = "resift";

pub const DEFAULT_VECTOR_SIZE: u64 = crate::constants::DEFAULT_VECTOR_SIZE_U64;
