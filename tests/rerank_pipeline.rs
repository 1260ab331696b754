//! End-to-end pipeline tests over the in-memory index with stub encoders.

use resift::{BiEncoder, CrossEncoder, Document, MemoryIndex, Pipeline, PipelineError};

const DOCS: [&str; 4] = [
    "RAG uses retrieval then generation.",
    "Vector search finds similar chunks quickly.",
    "Re-ranking improves precision by scoring query-document pairs with a cross-encoder.",
    "The best pasta recipe uses fresh tomatoes and basil.",
];

const QUERY: &str = "How does re-ranking work in RAG?";

async fn seeded_pipeline() -> Pipeline<MemoryIndex> {
    let pipeline = Pipeline::new(
        BiEncoder::stub().unwrap(),
        MemoryIndex::new(),
        CrossEncoder::stub().unwrap(),
        "rerank_example",
    );

    let docs: Vec<Document> = DOCS
        .iter()
        .enumerate()
        .map(|(i, text)| Document::new(i as u64, *text))
        .collect();
    pipeline.index_documents(&docs).await.unwrap();

    pipeline
}

#[tokio::test]
async fn full_breadth_returns_every_document() {
    let pipeline = seeded_pipeline().await;

    let candidates = pipeline.retrieve(QUERY, 4).await.unwrap();

    assert_eq!(candidates.len(), 4);

    let mut texts: Vec<&str> = candidates.iter().map(|c| c.text.as_str()).collect();
    texts.sort_unstable();
    let mut expected: Vec<&str> = DOCS.to_vec();
    expected.sort_unstable();
    assert_eq!(texts, expected);
}

#[tokio::test]
async fn rerank_promotes_the_reranking_document() {
    let pipeline = seeded_pipeline().await;

    let results = pipeline.retrieve_and_rerank(QUERY, 4, 2).await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].text, DOCS[2]);
}

#[tokio::test]
async fn rerank_excludes_the_off_topic_document() {
    let pipeline = seeded_pipeline().await;

    let results = pipeline.retrieve_and_rerank(QUERY, 4, 2).await.unwrap();

    assert!(results.iter().all(|r| r.text != DOCS[3]));
}

#[tokio::test]
async fn rerank_scores_are_non_increasing() {
    let pipeline = seeded_pipeline().await;

    let results = pipeline.retrieve_and_rerank(QUERY, 4, 4).await.unwrap();

    assert_eq!(results.len(), 4);
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[tokio::test]
async fn rerank_output_is_subset_of_first_stage() {
    let pipeline = seeded_pipeline().await;

    let candidates = pipeline.retrieve(QUERY, 3).await.unwrap();
    let results = pipeline.retrieve_and_rerank(QUERY, 3, 2).await.unwrap();

    let candidate_texts: Vec<&str> = candidates.iter().map(|c| c.text.as_str()).collect();
    for result in &results {
        assert!(candidate_texts.contains(&result.text.as_str()));
    }
}

#[tokio::test]
async fn identical_invocations_yield_identical_output() {
    let pipeline = seeded_pipeline().await;

    let first = pipeline.retrieve_and_rerank(QUERY, 4, 2).await.unwrap();
    let second = pipeline.retrieve_and_rerank(QUERY, 4, 2).await.unwrap();

    let a: Vec<(&str, f32)> = first.iter().map(|r| (r.text.as_str(), r.score)).collect();
    let b: Vec<(&str, f32)> = second.iter().map(|r| (r.text.as_str(), r.score)).collect();
    assert_eq!(a, b);
}

#[tokio::test]
async fn invalid_sizes_fail_fast() {
    let pipeline = seeded_pipeline().await;

    for (n, k) in [(0, 0), (4, 0), (2, 3)] {
        let result = pipeline.retrieve_and_rerank(QUERY, n, k).await;
        assert!(
            matches!(result, Err(PipelineError::InvalidArgument { .. })),
            "expected InvalidArgument for n={n}, k={k}"
        );
    }
}
