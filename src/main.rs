//! Demo binary: index a tiny corpus in memory, then retrieve-and-rerank.
//!
//! Runs entirely with stub encoders unless `RESIFT_ENCODER_PATH` /
//! `RESIFT_CROSS_ENCODER_PATH` point at model directories.
//!
//! Usage: `resift ["your query"]`

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use resift::{
    BiEncoder, BiEncoderConfig, Config, CrossEncoder, CrossEncoderConfig, Document, MemoryIndex,
    Pipeline,
};

const DEMO_DOCS: [&str; 4] = [
    "RAG uses retrieval then generation.",
    "Vector search finds similar chunks quickly.",
    "Re-ranking improves precision by scoring query-document pairs with a cross-encoder.",
    "The best pasta recipe uses fresh tomatoes and basil.",
];

const DEMO_QUERY: &str = "How does re-ranking work in RAG?";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;

    let encoder = match &config.encoder_path {
        Some(path) => BiEncoder::load(BiEncoderConfig::new(path))?,
        None => BiEncoder::stub()?,
    };
    let scorer = match &config.cross_encoder_path {
        Some(path) => CrossEncoder::load(CrossEncoderConfig::new(path))?,
        None => CrossEncoder::stub()?,
    };

    let pipeline = Pipeline::new(encoder, MemoryIndex::new(), scorer, config.collection.clone());

    let docs: Vec<Document> = DEMO_DOCS
        .iter()
        .enumerate()
        .map(|(i, text)| Document::new(i as u64, *text))
        .collect();
    pipeline.index_documents(&docs).await?;

    let query = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEMO_QUERY.to_string());

    let candidates = pipeline.retrieve(&query, config.top_n).await?;
    let results = pipeline
        .retrieve_and_rerank(&query, config.top_n, config.top_k)
        .await?;

    println!("Query: {query}");
    println!("\nAfter vector search ({}):", candidates.len());
    for candidate in &candidates {
        println!(
            "  [{}] (sim {:.4}) {}",
            candidate.retrieval_rank, candidate.similarity, candidate.text
        );
    }
    println!("\nAfter re-rank (top {}):", results.len());
    for result in &results {
        println!("  (score {:.4}) {}", result.score, result.text);
    }

    Ok(())
}
