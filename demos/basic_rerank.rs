//! Basic retrieve-then-rerank flow with stub encoders.
//!
//! Run with: `cargo run --example basic_rerank`

use anyhow::Result;
use resift::{BiEncoder, CrossEncoder, Document, MemoryIndex, Pipeline};

#[tokio::main]
async fn main() -> Result<()> {
    let pipeline = Pipeline::new(
        BiEncoder::stub()?,
        MemoryIndex::new(),
        CrossEncoder::stub()?,
        "demo",
    );

    pipeline
        .index_documents(&[
            Document::new(0, "Rust guarantees memory safety without garbage collection."),
            Document::new(1, "The borrow checker enforces aliasing rules at compile time."),
            Document::new(2, "Basil grows best in warm weather with plenty of sun."),
        ])
        .await?;

    let results = pipeline
        .retrieve_and_rerank("How does Rust ensure memory safety?", 3, 2)
        .await?;

    for result in results {
        println!("{:.4}  {}", result.score, result.text);
    }

    Ok(())
}
