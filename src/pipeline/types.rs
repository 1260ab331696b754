/// A document to index: stable unique id plus text body. Immutable once
/// indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: u64,
    pub text: String,
}

impl Document {
    pub fn new(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

/// First-stage output: a candidate text with its vector-similarity rank.
///
/// The rank only bounds set membership; final ordering belongs to the
/// cross-encoder stage.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub text: String,
    /// Zero-based position in the vector search results.
    pub retrieval_rank: usize,
    /// Similarity score reported by the index.
    pub similarity: f32,
}

/// Final output entry: candidate text with its cross-encoder score.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub text: String,
    pub score: f32,
}
