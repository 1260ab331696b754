//! Two-stage retrieve-then-rerank orchestration.
//!
//! Stage one embeds the query with the [`BiEncoder`] and asks the
//! [`VectorIndex`] for the `n` most similar documents. Stage two scores each
//! (query, candidate) pair with the [`CrossEncoder`] and keeps the top `k`.
//! Re-ranking narrows and reorders the candidate set; it never introduces
//! documents the first stage did not return.

pub mod error;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::PipelineError;
pub use types::{Candidate, Document, ScoredCandidate};

use tracing::{debug, info};

use crate::embedding::{BiEncoder, CrossEncoder};
use crate::index::{IndexPoint, VectorIndex};

/// Retrieve-then-rerank pipeline over a pluggable index backend.
pub struct Pipeline<I: VectorIndex> {
    encoder: BiEncoder,
    index: I,
    scorer: CrossEncoder,
    collection: String,
}

impl<I: VectorIndex> std::fmt::Debug for Pipeline<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("encoder", &self.encoder)
            .field("scorer", &self.scorer)
            .field("collection", &self.collection)
            .finish()
    }
}

impl<I: VectorIndex> Pipeline<I> {
    pub fn new(encoder: BiEncoder, index: I, scorer: CrossEncoder, collection: impl Into<String>) -> Self {
        Self {
            encoder,
            index,
            scorer,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn encoder(&self) -> &BiEncoder {
        &self.encoder
    }

    pub fn scorer(&self) -> &CrossEncoder {
        &self.scorer
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    /// Embeds `docs` in one encoder call and upserts them into the index,
    /// creating the collection if needed.
    pub async fn index_documents(&self, docs: &[Document]) -> Result<(), PipelineError> {
        if docs.is_empty() {
            return Ok(());
        }

        self.index
            .ensure_collection(&self.collection, self.encoder.embedding_dim() as u64)
            .await?;

        let texts: Vec<&str> = docs.iter().map(|d| d.text.as_str()).collect();
        let embeddings = self.encoder.embed_batch(&texts)?;

        let points: Vec<IndexPoint> = docs
            .iter()
            .zip(embeddings)
            .map(|(doc, vector)| IndexPoint::new(doc.id, vector, doc.text.clone()))
            .collect();

        info!(
            collection = %self.collection,
            count = points.len(),
            "Indexed documents"
        );

        self.index.upsert(&self.collection, points).await?;
        Ok(())
    }

    /// First stage only: embeds the query and returns up to `n` candidates
    /// ranked by vector similarity. Fewer than `n` indexed documents yields
    /// all of them; an empty collection yields an empty list.
    pub async fn retrieve(&self, query: &str, n: usize) -> Result<Vec<Candidate>, PipelineError> {
        if n == 0 {
            return Err(PipelineError::InvalidArgument {
                reason: "retrieval breadth n must be at least 1".to_string(),
            });
        }

        let query_vector = self.encoder.embed(query)?;
        let hits = self
            .index
            .search(&self.collection, query_vector, n as u64)
            .await?;

        debug!(
            query_len = query.len(),
            requested = n,
            returned = hits.len(),
            "First-stage retrieval complete"
        );

        Ok(hits
            .into_iter()
            .enumerate()
            .map(|(retrieval_rank, hit)| Candidate {
                text: hit.text,
                retrieval_rank,
                similarity: hit.score,
            })
            .collect())
    }

    /// The full two-stage procedure: retrieve `n` candidates by vector
    /// similarity, re-score them with the cross-encoder in one batched call,
    /// and return the top `k` by score.
    ///
    /// Ties keep first-stage order: the sort is stable, so candidates with
    /// equal cross-encoder scores stay in their vector-similarity order.
    ///
    /// Fails fast with [`PipelineError::InvalidArgument`] when `n` or `k` is
    /// zero or `k > n`. An empty index is not an error; it yields an empty
    /// result.
    pub async fn retrieve_and_rerank(
        &self,
        query: &str,
        n: usize,
        k: usize,
    ) -> Result<Vec<ScoredCandidate>, PipelineError> {
        if k == 0 {
            return Err(PipelineError::InvalidArgument {
                reason: "final size k must be at least 1".to_string(),
            });
        }
        if k > n {
            return Err(PipelineError::InvalidArgument {
                reason: format!("final size k ({k}) must not exceed retrieval breadth n ({n})"),
            });
        }

        let candidates = self.retrieve(query, n).await?;
        if candidates.is_empty() {
            debug!("No candidates retrieved, returning empty result");
            return Ok(vec![]);
        }

        let texts: Vec<&str> = candidates.iter().map(|c| c.text.as_str()).collect();
        let scores = self.scorer.score_pairs(query, &texts)?;

        let mut scored: Vec<ScoredCandidate> = candidates
            .into_iter()
            .zip(scores)
            .map(|(candidate, score)| ScoredCandidate {
                text: candidate.text,
                score,
            })
            .collect();

        // Stable: equal scores preserve retrieval order.
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(k);

        info!(
            query_len = query.len(),
            n = n,
            k = k,
            returned = scored.len(),
            top_score = scored.first().map(|c| c.score),
            "Re-ranking complete"
        );

        Ok(scored)
    }
}
