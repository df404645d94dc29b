//! Pipeline orchestration.
//!
//! Coordinates the full run: per-slot issue loading → aggregation →
//! splitting → embedding/indexing → retrieval QA. Everything is sequential
//! and best-effort: a failed repository contributes zero documents, an
//! empty corpus or a failed index build ends the run early, and the two
//! query calls at the end fail independently of each other.

use anyhow::Result;

use crate::chunk;
use crate::config::{Config, MAX_REPO_SLOTS};
use crate::connector_github::{GithubIssues, IssueSource};
use crate::embedding::{EmbeddingProvider, VoyageProvider};
use crate::index;
use crate::llm::{CompletionProvider, OpenAiCompletions};
use crate::models::Document;
use crate::qa::RetrievalQa;

/// The built-in example question answered by `rqa run`.
pub const EXAMPLE_QUERY: &str = "What are the most common issues in this repository?";

/// Observable summary of one pipeline run.
///
/// Progress is printed as the run goes; this is the compact result for
/// callers that need to look at the outcome programmatically.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Documents aggregated across all repository slots.
    pub documents: usize,
    /// Texts fed to the index (chunks, or whole documents on fallback).
    pub chunks: usize,
    pub index_built: bool,
    pub answer: Option<String>,
    pub top_match: Option<String>,
}

/// Run the pipeline with the concrete GitHub/Voyage/OpenAI providers.
pub async fn run(config: &Config, query: &str) -> Result<RunReport> {
    let source = GithubIssues::new(config.github_token.clone());
    let embedder = VoyageProvider::new(config.embedding.clone());
    let llm = OpenAiCompletions::new(config.completion.clone());
    run_with(config, &source, &embedder, &llm, query).await
}

/// Run the pipeline against any implementations of the capability seams.
pub async fn run_with(
    config: &Config,
    source: &dyn IssueSource,
    embedder: &dyn EmbeddingProvider,
    llm: &dyn CompletionProvider,
    query: &str,
) -> Result<RunReport> {
    let mut report = RunReport::default();
    let mut all_documents: Vec<Document> = Vec::new();

    // Load issues from up to three repositories, strictly in slot order.
    for i in 1..=MAX_REPO_SLOTS {
        let Some(slot) = &config.slots[i - 1] else {
            println!("Repository {} not configured, skipping.", i);
            continue;
        };

        println!("Loading issues from repository {}: {}", i, slot.full_name());
        match source.fetch_issues(slot).await {
            Ok(documents) => {
                println!(
                    "Loaded {} issues from {}",
                    documents.len(),
                    slot.full_name()
                );
                for (n, doc) in documents.iter().enumerate() {
                    println!(
                        "Issue {} content length: {} characters",
                        n + 1,
                        doc.content_len()
                    );
                }
                println!(
                    "Loaded {} documents from repository {}",
                    documents.len(),
                    i
                );
                all_documents.extend(documents);
            }
            Err(e) => {
                // This slot contributes zero documents; the rest still run.
                eprintln!("Error loading issues from {}: {}", slot.full_name(), e);
            }
        }
    }

    report.documents = all_documents.len();
    if all_documents.is_empty() {
        println!("No documents loaded. Check the repository configuration.");
        return Ok(report);
    }

    println!("Total documents loaded: {}", all_documents.len());
    for (n, doc) in all_documents.iter().enumerate() {
        println!("Document {} content: {}...", n + 1, preview(&doc.body, 100));
    }

    // Split into overlapping chunks; fall back to the unsplit documents
    // when splitting yields nothing at all.
    let chunks = chunk::split_documents(&all_documents, &config.chunking);
    println!("Total splits after text splitting: {}", chunks.len());

    let texts: Vec<String> = if chunks.is_empty() {
        println!("No text splits generated. Using original documents.");
        all_documents.iter().map(|d| d.body.clone()).collect()
    } else {
        chunks.into_iter().map(|c| c.text).collect()
    };
    report.chunks = texts.len();

    let index = match index::build_index(embedder, &config.embedding, texts).await {
        Ok(index) => {
            println!(
                "Vector index created with {}: {} entries, {} dimensions",
                embedder.model_name(),
                index.len(),
                index.dims()
            );
            index
        }
        Err(e) => {
            eprintln!("Failed to create vector store: {}", e);
            return Ok(report);
        }
    };
    report.index_built = true;

    let qa = RetrievalQa::new(&index, embedder, llm, config.retrieval.top_k);

    println!("Query: {}", query);
    match qa.answer(query).await {
        Ok(answer) => {
            println!("Response: {}", answer);
            report.answer = Some(answer);
        }
        Err(e) => eprintln!("Error during query: {}", e),
    }

    // Standalone top-1 similarity search, independent of the QA call.
    match qa.retrieve(query, 1).await {
        Ok(hits) => match hits.into_iter().next() {
            Some(hit) => {
                println!("Top retrieved document: {}", hit.text);
                report.top_match = Some(hit.text);
            }
            None => println!("No relevant documents found."),
        },
        Err(e) => eprintln!("Error during document retrieval: {}", e),
    }

    Ok(report)
}

fn preview(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
