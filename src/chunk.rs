//! Recursive text splitter with sliding overlap.
//!
//! Splits document body text into [`Chunk`]s of at most `chunk_size`
//! characters. Splitting prefers paragraph boundaries (`\n\n`), then line
//! boundaries, then word boundaries; text with no usable separator falls
//! back to a hard character window. Consecutive chunks of the same document
//! carry `chunk_overlap` characters of shared context.
//!
//! Each chunk receives a UUID plus a SHA-256 hash of its text.

use std::collections::VecDeque;

use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::ChunkingConfig;
use crate::models::{Chunk, Document};

/// Separator hierarchy: paragraph, line, word.
const SEPARATORS: &[&str] = &["\n\n", "\n", " "];

/// Split every document in the corpus, preserving corpus order.
///
/// Whitespace-only documents contribute no chunks, so the result can be
/// empty for a non-empty corpus; callers decide what to do in that case.
pub fn split_documents(documents: &[Document], config: &ChunkingConfig) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    for (document_index, doc) in documents.iter().enumerate() {
        let texts = split_text(&doc.body, config.chunk_size, config.chunk_overlap);
        for (chunk_index, text) in texts.iter().enumerate() {
            chunks.push(make_chunk(document_index, chunk_index, text));
        }
    }
    chunks
}

/// Split one text into chunks of at most `chunk_size` characters.
///
/// Chunks are trimmed; whitespace-only results are dropped. A text that
/// already fits within `chunk_size` comes back as a single unchanged chunk.
pub fn split_text(text: &str, chunk_size: usize, chunk_overlap: usize) -> Vec<String> {
    let pieces = split_pieces(text, chunk_size, chunk_overlap, SEPARATORS);
    merge_pieces(pieces, chunk_size, chunk_overlap)
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect()
}

/// Break text into fragments no longer than `chunk_size`, keeping each
/// separator attached to the fragment it terminates so that concatenation
/// reconstructs the original text.
fn split_pieces(
    text: &str,
    chunk_size: usize,
    chunk_overlap: usize,
    separators: &[&str],
) -> Vec<String> {
    if text.chars().count() <= chunk_size {
        return vec![text.to_string()];
    }

    match separators.split_first() {
        Some((sep, rest)) => {
            if text.contains(sep) {
                let mut pieces = Vec::new();
                for part in text.split_inclusive(sep) {
                    if part.chars().count() <= chunk_size {
                        pieces.push(part.to_string());
                    } else {
                        pieces.extend(split_pieces(part, chunk_size, chunk_overlap, rest));
                    }
                }
                pieces
            } else {
                split_pieces(text, chunk_size, chunk_overlap, rest)
            }
        }
        // No separator applies: slide a hard character window. The window
        // step already bakes in the overlap, so merging leaves these as-is.
        None => hard_split(text, chunk_size, chunk_overlap),
    }
}

/// Fixed-size character windows advancing by `chunk_size - chunk_overlap`.
fn hard_split(text: &str, chunk_size: usize, chunk_overlap: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let step = chunk_size.saturating_sub(chunk_overlap).max(1);

    let mut pieces = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let end = (start + chunk_size).min(chars.len());
        pieces.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start += step;
    }
    pieces
}

/// Greedily pack fragments into chunks of at most `chunk_size` characters.
///
/// When a chunk is flushed, the tail fragments whose combined length is at
/// most `chunk_overlap` are retained as the head of the next chunk.
fn merge_pieces(pieces: Vec<String>, chunk_size: usize, chunk_overlap: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut window: VecDeque<(String, usize)> = VecDeque::new();
    let mut window_len = 0usize;

    for piece in pieces {
        let piece_len = piece.chars().count();

        if window_len + piece_len > chunk_size && !window.is_empty() {
            chunks.push(concat_window(&window));
            while window_len > chunk_overlap
                || (window_len + piece_len > chunk_size && window_len > 0)
            {
                let (_, front_len) = window.pop_front().expect("window not empty");
                window_len -= front_len;
            }
        }

        window_len += piece_len;
        window.push_back((piece, piece_len));
    }

    if !window.is_empty() {
        chunks.push(concat_window(&window));
    }
    chunks
}

fn concat_window(window: &VecDeque<(String, usize)>) -> String {
    window.iter().map(|(piece, _)| piece.as_str()).collect()
}

fn make_chunk(document_index: usize, chunk_index: usize, text: &str) -> Chunk {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let hash = format!("{:x}", hasher.finalize());

    Chunk {
        id: Uuid::new_v4().to_string(),
        document_index,
        chunk_index,
        text: text.to_string(),
        hash,
    }
}
