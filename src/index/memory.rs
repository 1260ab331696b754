use std::collections::HashMap;

use crate::index::{IndexError, IndexPoint, SearchHit, VectorIndex};

/// In-process brute-force index with cosine similarity.
///
/// Collections are ephemeral: nothing persists past the process. Suited for
/// demos, tests, and corpora small enough that a linear scan beats the cost
/// of running a vector database.
#[derive(Default)]
pub struct MemoryIndex {
    collections: std::sync::RwLock<HashMap<String, MemoryCollection>>,
}

#[derive(Default, Clone)]
struct MemoryCollection {
    vector_size: u64,
    points: HashMap<u64, StoredPoint>,
}

#[derive(Clone)]
struct StoredPoint {
    vector: Vec<f32>,
    text: String,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of points in a collection, if it exists.
    pub fn point_count(&self, collection: &str) -> Option<usize> {
        self.collections
            .read()
            .ok()?
            .get(collection)
            .map(|c| c.points.len())
    }
}

impl VectorIndex for MemoryIndex {
    async fn ensure_collection(&self, name: &str, vector_size: u64) -> Result<(), IndexError> {
        let mut collections =
            self.collections
                .write()
                .map_err(|_| IndexError::CreateCollectionFailed {
                    collection: name.to_string(),
                    message: "lock poisoned".to_string(),
                })?;

        collections
            .entry(name.to_string())
            .or_insert(MemoryCollection {
                vector_size,
                points: HashMap::new(),
            });

        Ok(())
    }

    async fn upsert(&self, collection: &str, points: Vec<IndexPoint>) -> Result<(), IndexError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| IndexError::UpsertFailed {
                collection: collection.to_string(),
                message: "lock poisoned".to_string(),
            })?;

        let coll = collections
            .get_mut(collection)
            .ok_or_else(|| IndexError::CollectionNotFound {
                collection: collection.to_string(),
            })?;

        for point in points {
            if point.vector.len() as u64 != coll.vector_size {
                return Err(IndexError::InvalidDimension {
                    expected: coll.vector_size as usize,
                    actual: point.vector.len(),
                });
            }

            coll.points.insert(
                point.id,
                StoredPoint {
                    vector: point.vector,
                    text: point.text,
                },
            );
        }

        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        query: Vec<f32>,
        limit: u64,
    ) -> Result<Vec<SearchHit>, IndexError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| IndexError::SearchFailed {
                collection: collection.to_string(),
                message: "lock poisoned".to_string(),
            })?;

        let coll = collections
            .get(collection)
            .ok_or_else(|| IndexError::CollectionNotFound {
                collection: collection.to_string(),
            })?;

        let mut hits: Vec<SearchHit> = coll
            .points
            .iter()
            .map(|(&id, p)| SearchHit {
                id,
                score: cosine_similarity(&query, &p.vector),
                text: p.text.clone(),
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.id.cmp(&b.id))
        });

        hits.truncate(limit as usize);
        Ok(hits)
    }

    async fn delete(&self, collection: &str, ids: Vec<u64>) -> Result<(), IndexError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| IndexError::DeleteFailed {
                collection: collection.to_string(),
                message: "lock poisoned".to_string(),
            })?;

        let coll = collections
            .get_mut(collection)
            .ok_or_else(|| IndexError::CollectionNotFound {
                collection: collection.to_string(),
            })?;

        for id in ids {
            coll.points.remove(&id);
        }

        Ok(())
    }
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}
