//! "Stuff"-style retrieval question answering.
//!
//! Retrieves the top-matching chunks for a question, concatenates them all
//! into a single prompt, and asks the generation model once. No chains, no
//! iterative refinement: one retrieval, one completion.

use anyhow::Result;

use crate::embedding::EmbeddingProvider;
use crate::index::VectorIndex;
use crate::llm::CompletionProvider;
use crate::models::SearchHit;

/// Retrieval-augmented answering over a built [`VectorIndex`].
pub struct RetrievalQa<'a> {
    index: &'a VectorIndex,
    embedder: &'a dyn EmbeddingProvider,
    llm: &'a dyn CompletionProvider,
    top_k: usize,
}

impl<'a> RetrievalQa<'a> {
    pub fn new(
        index: &'a VectorIndex,
        embedder: &'a dyn EmbeddingProvider,
        llm: &'a dyn CompletionProvider,
        top_k: usize,
    ) -> Self {
        Self {
            index,
            embedder,
            llm,
            top_k,
        }
    }

    /// Embed the question and return its `k` nearest chunks.
    pub async fn retrieve(&self, question: &str, k: usize) -> Result<Vec<SearchHit>> {
        let vectors = self.embedder.embed(&[question.to_string()]).await?;
        let query_vector = vectors
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("Empty embedding response for query"))?;
        Ok(self.index.search(&query_vector, k))
    }

    /// Answer the question with retrieved context stuffed into one prompt.
    pub async fn answer(&self, question: &str) -> Result<String> {
        let hits = self.retrieve(question, self.top_k).await?;
        let contexts: Vec<&str> = hits.iter().map(|h| h.text.as_str()).collect();
        let prompt = stuff_prompt(&contexts, question);
        self.llm.complete(&prompt).await
    }
}

/// Build the single generation prompt from all retrieved contexts.
pub fn stuff_prompt(contexts: &[&str], question: &str) -> String {
    format!(
        "Use the following pieces of context to answer the question at the end. \
         If you don't know the answer, just say that you don't know, don't try \
         to make up an answer.\n\n{}\n\nQuestion: {}\nHelpful Answer:",
        contexts.join("\n\n"),
        question
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stuff_prompt_contains_contexts_in_order() {
        let prompt = stuff_prompt(
            &["first chunk", "second chunk"],
            "What breaks most often?",
        );

        let first = prompt.find("first chunk").unwrap();
        let second = prompt.find("second chunk").unwrap();
        assert!(first < second);
        assert!(prompt.contains("Question: What breaks most often?"));
        assert!(prompt.ends_with("Helpful Answer:"));
    }

    #[test]
    fn test_stuff_prompt_with_no_context() {
        let prompt = stuff_prompt(&[], "Anything?");
        assert!(prompt.contains("Question: Anything?"));
    }
}
