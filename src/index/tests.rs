use super::*;

fn unit(x: f32, y: f32) -> Vec<f32> {
    let norm = (x * x + y * y).sqrt();
    vec![x / norm, y / norm]
}

#[tokio::test]
async fn test_ensure_collection_idempotent() {
    let index = MemoryIndex::new();

    index.ensure_collection("docs", 2).await.unwrap();
    index
        .upsert("docs", vec![IndexPoint::new(1, unit(1.0, 0.0), "a")])
        .await
        .unwrap();
    index.ensure_collection("docs", 2).await.unwrap();

    assert_eq!(index.point_count("docs"), Some(1));
}

#[tokio::test]
async fn test_upsert_unknown_collection() {
    let index = MemoryIndex::new();

    let result = index
        .upsert("missing", vec![IndexPoint::new(1, unit(1.0, 0.0), "a")])
        .await;

    assert!(matches!(
        result.unwrap_err(),
        IndexError::CollectionNotFound { .. }
    ));
}

#[tokio::test]
async fn test_upsert_dimension_mismatch() {
    let index = MemoryIndex::new();
    index.ensure_collection("docs", 3).await.unwrap();

    let result = index
        .upsert("docs", vec![IndexPoint::new(1, unit(1.0, 0.0), "a")])
        .await;

    assert!(matches!(
        result.unwrap_err(),
        IndexError::InvalidDimension {
            expected: 3,
            actual: 2
        }
    ));
}

#[tokio::test]
async fn test_upsert_replaces_existing_id() {
    let index = MemoryIndex::new();
    index.ensure_collection("docs", 2).await.unwrap();

    index
        .upsert("docs", vec![IndexPoint::new(1, unit(1.0, 0.0), "old")])
        .await
        .unwrap();
    index
        .upsert("docs", vec![IndexPoint::new(1, unit(1.0, 0.0), "new")])
        .await
        .unwrap();

    assert_eq!(index.point_count("docs"), Some(1));

    let hits = index.search("docs", unit(1.0, 0.0), 1).await.unwrap();
    assert_eq!(hits[0].text, "new");
}

#[tokio::test]
async fn test_search_ranks_by_similarity() {
    let index = MemoryIndex::new();
    index.ensure_collection("docs", 2).await.unwrap();

    index
        .upsert(
            "docs",
            vec![
                IndexPoint::new(1, unit(1.0, 0.0), "east"),
                IndexPoint::new(2, unit(0.0, 1.0), "north"),
                IndexPoint::new(3, unit(1.0, 0.2), "mostly east"),
            ],
        )
        .await
        .unwrap();

    let hits = index.search("docs", unit(1.0, 0.0), 2).await.unwrap();

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].text, "east");
    assert_eq!(hits[1].text, "mostly east");
    assert!(hits[0].score >= hits[1].score);
}

#[tokio::test]
async fn test_search_limit_exceeds_points() {
    let index = MemoryIndex::new();
    index.ensure_collection("docs", 2).await.unwrap();

    index
        .upsert("docs", vec![IndexPoint::new(1, unit(1.0, 0.0), "only")])
        .await
        .unwrap();

    let hits = index.search("docs", unit(1.0, 0.0), 10).await.unwrap();

    assert_eq!(hits.len(), 1);
}

#[tokio::test]
async fn test_search_empty_collection() {
    let index = MemoryIndex::new();
    index.ensure_collection("docs", 2).await.unwrap();

    let hits = index.search("docs", unit(1.0, 0.0), 4).await.unwrap();

    assert!(hits.is_empty());
}

#[tokio::test]
async fn test_delete_points() {
    let index = MemoryIndex::new();
    index.ensure_collection("docs", 2).await.unwrap();

    index
        .upsert(
            "docs",
            vec![
                IndexPoint::new(1, unit(1.0, 0.0), "a"),
                IndexPoint::new(2, unit(0.0, 1.0), "b"),
            ],
        )
        .await
        .unwrap();

    index.delete("docs", vec![1]).await.unwrap();

    assert_eq!(index.point_count("docs"), Some(1));
}

#[test]
fn test_cosine_similarity_basic() {
    assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
    assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
    assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
}

#[test]
fn test_cosine_similarity_degenerate() {
    assert_eq!(cosine_similarity(&[], &[]), 0.0);
    assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
    assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
}
