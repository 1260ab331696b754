use qdrant_client::qdrant::ScoredPoint;
use qdrant_client::qdrant::point_id::PointIdOptions;

/// A document ready for indexing: stable id, embedding vector, and the
/// original text carried as payload.
#[derive(Debug, Clone)]
pub struct IndexPoint {
    pub id: u64,
    pub vector: Vec<f32>,
    pub text: String,
}

impl IndexPoint {
    pub fn new(id: u64, vector: Vec<f32>, text: impl Into<String>) -> Self {
        Self {
            id,
            vector,
            text: text.into(),
        }
    }
}

/// One first-stage search hit, ranked by vector similarity.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub id: u64,
    /// Similarity score from the index (cosine, higher = closer).
    pub score: f32,
    pub text: String,
}

impl SearchHit {
    /// Converts a Qdrant scored point, dropping points without a numeric id
    /// or text payload.
    pub fn from_scored_point(point: ScoredPoint) -> Option<Self> {
        let id = match point.id.and_then(|pid| pid.point_id_options) {
            Some(PointIdOptions::Num(n)) => n,
            _ => return None,
        };

        let text = point
            .payload
            .get("text")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())?;

        Some(SearchHit {
            id,
            score: point.score,
            text,
        })
    }
}
