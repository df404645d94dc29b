//! # Repo QA
//!
//! Retrieval-augmented question answering over GitHub repository issues.
//!
//! Repo QA pulls all issues (open and closed) from up to three configured
//! repositories, splits their bodies into overlapping chunks, embeds the
//! chunks with the Voyage AI API, builds an in-memory cosine-similarity
//! index, and answers a question by stuffing the top-matching chunks into
//! a single OpenAI completion prompt. The index lives for one run; nothing
//! is persisted.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌─────────────┐   ┌─────────────┐   ┌──────────┐
//! │ GitHub issues│──▶│   Splitter   │──▶│ Embed+Index │──▶│ Retrieval │
//! │  (≤3 repos)  │   │ 100/20 chars│   │  (in-memory)│   │    QA     │
//! └──────────────┘   └─────────────┘   └─────────────┘   └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! export GITHUB_OWNER_1=rust-lang GITHUB_REPO_1=rust
//! export GITHUB_TOKEN=... VOYAGE_API_KEY=... OPENAI_API_KEY=...
//! rqa sources                 # check slot and credential status
//! rqa run                     # load, index, and answer the example query
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Environment-driven configuration |
//! | [`models`] | Core data types |
//! | [`connector_github`] | GitHub issues connector |
//! | [`chunk`] | Recursive text splitting with overlap |
//! | [`embedding`] | Embedding provider abstraction |
//! | [`index`] | In-memory vector index |
//! | [`llm`] | Text-generation provider abstraction |
//! | [`qa`] | Stuff-style retrieval QA |
//! | [`pipeline`] | End-to-end run orchestration |

pub mod chunk;
pub mod config;
pub mod connector_github;
pub mod embedding;
pub mod index;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod qa;
pub mod sources;
