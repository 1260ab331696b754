use super::*;
use crate::embedding::{BiEncoder, CrossEncoder};
use crate::index::{MemoryIndex, VectorIndex};

fn stub_pipeline() -> Pipeline<MemoryIndex> {
    Pipeline::new(
        BiEncoder::stub().unwrap(),
        MemoryIndex::new(),
        CrossEncoder::stub().unwrap(),
        "test",
    )
}

fn sample_docs() -> Vec<Document> {
    vec![
        Document::new(0, "RAG uses retrieval then generation."),
        Document::new(1, "Vector search finds similar chunks quickly."),
        Document::new(
            2,
            "Re-ranking improves precision by scoring query-document pairs with a cross-encoder.",
        ),
        Document::new(3, "The best pasta recipe uses fresh tomatoes and basil."),
    ]
}

#[tokio::test]
async fn test_rejects_zero_n() {
    let pipeline = stub_pipeline();

    let result = pipeline.retrieve_and_rerank("query", 0, 0).await;
    assert!(matches!(
        result.unwrap_err(),
        PipelineError::InvalidArgument { .. }
    ));

    let result = pipeline.retrieve("query", 0).await;
    assert!(matches!(
        result.unwrap_err(),
        PipelineError::InvalidArgument { .. }
    ));
}

#[tokio::test]
async fn test_rejects_zero_k() {
    let pipeline = stub_pipeline();

    let result = pipeline.retrieve_and_rerank("query", 4, 0).await;

    assert!(matches!(
        result.unwrap_err(),
        PipelineError::InvalidArgument { .. }
    ));
}

#[tokio::test]
async fn test_rejects_k_greater_than_n() {
    let pipeline = stub_pipeline();

    let result = pipeline.retrieve_and_rerank("query", 2, 3).await;

    assert!(matches!(
        result.unwrap_err(),
        PipelineError::InvalidArgument { .. }
    ));
}

#[tokio::test]
async fn test_empty_index_yields_empty_result() {
    let pipeline = stub_pipeline();
    pipeline.index_documents(&[]).await.unwrap();

    // No documents were ever indexed; the collection does not even exist yet.
    pipeline
        .index()
        .ensure_collection(pipeline.collection(), pipeline.encoder().embedding_dim() as u64)
        .await
        .unwrap();

    let results = pipeline.retrieve_and_rerank("query", 4, 2).await.unwrap();

    assert!(results.is_empty());
}

#[tokio::test]
async fn test_result_has_exactly_k_entries() {
    let pipeline = stub_pipeline();
    pipeline.index_documents(&sample_docs()).await.unwrap();

    let results = pipeline
        .retrieve_and_rerank("How does re-ranking work in RAG?", 4, 2)
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn test_partial_result_when_fewer_documents() {
    let pipeline = stub_pipeline();
    pipeline
        .index_documents(&sample_docs()[..2])
        .await
        .unwrap();

    // N exceeds the two indexed documents: both come back, no error.
    let candidates = pipeline.retrieve("retrieval", 10).await.unwrap();
    assert_eq!(candidates.len(), 2);

    let results = pipeline.retrieve_and_rerank("retrieval", 10, 5).await.unwrap();
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn test_results_are_subset_of_candidates() {
    let pipeline = stub_pipeline();
    pipeline.index_documents(&sample_docs()).await.unwrap();

    let query = "How does re-ranking work in RAG?";
    let candidates = pipeline.retrieve(query, 4).await.unwrap();
    let results = pipeline.retrieve_and_rerank(query, 4, 2).await.unwrap();

    let candidate_texts: Vec<&str> = candidates.iter().map(|c| c.text.as_str()).collect();
    for result in &results {
        assert!(candidate_texts.contains(&result.text.as_str()));
    }
}

#[tokio::test]
async fn test_scores_non_increasing() {
    let pipeline = stub_pipeline();
    pipeline.index_documents(&sample_docs()).await.unwrap();

    let results = pipeline
        .retrieve_and_rerank("How does re-ranking work in RAG?", 4, 4)
        .await
        .unwrap();

    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[tokio::test]
async fn test_k_equals_n_only_reorders() {
    let pipeline = stub_pipeline();
    pipeline.index_documents(&sample_docs()).await.unwrap();

    let query = "How does re-ranking work in RAG?";
    let candidates = pipeline.retrieve(query, 4).await.unwrap();
    let results = pipeline.retrieve_and_rerank(query, 4, 4).await.unwrap();

    assert_eq!(results.len(), candidates.len());

    let mut candidate_texts: Vec<String> = candidates.into_iter().map(|c| c.text).collect();
    let mut result_texts: Vec<String> = results.into_iter().map(|r| r.text).collect();
    candidate_texts.sort();
    result_texts.sort();
    assert_eq!(candidate_texts, result_texts);
}

#[tokio::test]
async fn test_idempotent_with_stub_backends() {
    let pipeline = stub_pipeline();
    pipeline.index_documents(&sample_docs()).await.unwrap();

    let query = "How does re-ranking work in RAG?";
    let first = pipeline.retrieve_and_rerank(query, 4, 2).await.unwrap();
    let second = pipeline.retrieve_and_rerank(query, 4, 2).await.unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.text, b.text);
        assert_eq!(a.score, b.score);
    }
}

#[tokio::test]
async fn test_retrieval_rank_assignment() {
    let pipeline = stub_pipeline();
    pipeline.index_documents(&sample_docs()).await.unwrap();

    let candidates = pipeline.retrieve("vector search", 4).await.unwrap();

    for (i, candidate) in candidates.iter().enumerate() {
        assert_eq!(candidate.retrieval_rank, i);
    }
    for pair in candidates.windows(2) {
        assert!(pair[0].similarity >= pair[1].similarity);
    }
}

#[tokio::test]
async fn test_reindexing_same_ids_does_not_grow_index() {
    let pipeline = stub_pipeline();

    pipeline.index_documents(&sample_docs()).await.unwrap();
    pipeline.index_documents(&sample_docs()).await.unwrap();

    assert_eq!(pipeline.index().point_count("test"), Some(4));
}
