//! # Repo QA CLI (`rqa`)
//!
//! The `rqa` binary runs the issue question-answering pipeline. All
//! configuration comes from the process environment; there are no config
//! files and no configuration flags.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `rqa sources` | Show the repository slots and credential status |
//! | `rqa run` | Load issues, build the index, answer the example query |
//!
//! ## Environment
//!
//! ```bash
//! GITHUB_OWNER_1..3 / GITHUB_REPO_1..3    # repository slots
//! GITHUB_BRANCH_1..3                      # optional, defaults to "main"
//! GITHUB_TOKEN                            # optional for public repos
//! VOYAGE_API_KEY                          # embeddings
//! OPENAI_API_KEY                          # generation
//! ```

mod chunk;
mod config;
mod connector_github;
mod embedding;
mod index;
mod llm;
mod models;
mod pipeline;
mod qa;
mod sources;

use clap::{Parser, Subcommand};

/// Repo QA: retrieval-augmented question answering over GitHub issues.
#[derive(Parser)]
#[command(
    name = "rqa",
    about = "Retrieval-augmented question answering over GitHub repository issues",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Show the configured repository slots and credential status.
    ///
    /// Reads the environment and reports which of the three slots are
    /// usable and which API keys are present. No network calls.
    Sources,

    /// Run the full pipeline once.
    ///
    /// Loads issues from every configured repository, splits and embeds
    /// them, builds the in-memory index, and answers the built-in example
    /// question. The index is discarded when the run ends.
    Run {
        /// Ask this question instead of the built-in example query.
        #[arg(long)]
        query: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = config::Config::from_env();

    match cli.command {
        Commands::Sources => {
            sources::list_sources(&config)?;
        }
        Commands::Run { query } => {
            let question = query.as_deref().unwrap_or(pipeline::EXAMPLE_QUERY);
            pipeline::run(&config, question).await?;
        }
    }

    Ok(())
}
