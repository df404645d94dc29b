//! Environment-driven configuration.
//!
//! All settings come from the process environment; there is no config file
//! and no configuration flags. Repository slots follow the
//! `GITHUB_OWNER_<i>` / `GITHUB_REPO_<i>` / `GITHUB_BRANCH_<i>` convention
//! for `i` in 1..=3; a slot missing owner or repo is simply skipped.
//! Credentials are carried as-is with no validation; a missing key shows
//! up as an authentication failure when the corresponding API is called.

/// Number of repository slots read from the environment.
pub const MAX_REPO_SLOTS: usize = 3;

/// One configured repository: `GITHUB_OWNER_<i>` / `GITHUB_REPO_<i>`.
///
/// `branch` is read (default `"main"`) and surfaced in `rqa sources`, but
/// issue listing is branch-independent so the fetch never uses it.
#[derive(Debug, Clone)]
pub struct RepoSlot {
    pub owner: String,
    pub repo: String,
    pub branch: String,
}

impl RepoSlot {
    /// The `"owner/repo"` form used in API paths and log lines.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Slot `i` lives at index `i - 1`; `None` means not configured.
    pub slots: Vec<Option<RepoSlot>>,
    pub github_token: Option<String>,
    pub chunking: ChunkingConfig,
    pub embedding: EmbeddingConfig,
    pub completion: CompletionConfig,
    pub retrieval: RetrievalConfig,
}

/// Fixed splitter geometry, in characters.
#[derive(Debug, Clone)]
pub struct ChunkingConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 100,
            chunk_overlap: 20,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    /// `VOYAGE_API_KEY`. Absent keys fail at request time, not here.
    pub api_key: Option<String>,
    pub model: String,
    pub batch_size: usize,
    pub max_retries: u32,
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_embedding_model(),
            batch_size: default_batch_size(),
            max_retries: default_max_retries(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// `OPENAI_API_KEY`. Absent keys fail at request time, not here.
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_completion_model(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_completion_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    /// Chunks stuffed into the generation prompt.
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

fn default_embedding_model() -> String {
    "voyage-code-2".to_string()
}
fn default_completion_model() -> String {
    "gpt-3.5-turbo-instruct".to_string()
}
fn default_batch_size() -> usize {
    64
}
fn default_max_retries() -> u32 {
    5
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_max_tokens() -> u32 {
    256
}
fn default_completion_timeout_secs() -> u64 {
    60
}
fn default_top_k() -> usize {
    4
}

impl Config {
    /// Read the full configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    ///
    /// `from_env` is a thin wrapper over this; tests supply a map instead
    /// of mutating process-global environment state.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let get_nonempty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let mut slots = Vec::with_capacity(MAX_REPO_SLOTS);
        for i in 1..=MAX_REPO_SLOTS {
            let owner = get_nonempty(&format!("GITHUB_OWNER_{}", i));
            let repo = get_nonempty(&format!("GITHUB_REPO_{}", i));
            let slot = match (owner, repo) {
                (Some(owner), Some(repo)) => Some(RepoSlot {
                    owner,
                    repo,
                    branch: get_nonempty(&format!("GITHUB_BRANCH_{}", i))
                        .unwrap_or_else(|| "main".to_string()),
                }),
                _ => None,
            };
            slots.push(slot);
        }

        let embedding = EmbeddingConfig {
            api_key: get_nonempty("VOYAGE_API_KEY"),
            model: get_nonempty("RQA_EMBEDDING_MODEL").unwrap_or_else(default_embedding_model),
            ..EmbeddingConfig::default()
        };

        let completion = CompletionConfig {
            api_key: get_nonempty("OPENAI_API_KEY"),
            model: get_nonempty("RQA_COMPLETION_MODEL").unwrap_or_else(default_completion_model),
            ..CompletionConfig::default()
        };

        Self {
            slots,
            github_token: get_nonempty("GITHUB_TOKEN"),
            chunking: ChunkingConfig::default(),
            embedding,
            completion,
            retrieval: RetrievalConfig::default(),
        }
    }

    /// Count of repository slots that are actually configured.
    pub fn configured_slots(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_single_slot_with_default_branch() {
        let config = Config::from_lookup(lookup(&[
            ("GITHUB_OWNER_1", "rust-lang"),
            ("GITHUB_REPO_1", "rust"),
        ]));

        assert_eq!(config.configured_slots(), 1);
        let slot = config.slots[0].as_ref().unwrap();
        assert_eq!(slot.full_name(), "rust-lang/rust");
        assert_eq!(slot.branch, "main");
        assert!(config.slots[1].is_none());
        assert!(config.slots[2].is_none());
    }

    #[test]
    fn test_branch_override() {
        let config = Config::from_lookup(lookup(&[
            ("GITHUB_OWNER_2", "tokio-rs"),
            ("GITHUB_REPO_2", "tokio"),
            ("GITHUB_BRANCH_2", "master"),
        ]));

        assert!(config.slots[0].is_none());
        assert_eq!(config.slots[1].as_ref().unwrap().branch, "master");
    }

    #[test]
    fn test_owner_without_repo_is_skipped() {
        let config = Config::from_lookup(lookup(&[("GITHUB_OWNER_1", "rust-lang")]));
        assert_eq!(config.configured_slots(), 0);
    }

    #[test]
    fn test_empty_values_are_treated_as_unset() {
        let config = Config::from_lookup(lookup(&[
            ("GITHUB_OWNER_1", ""),
            ("GITHUB_REPO_1", "rust"),
            ("GITHUB_TOKEN", "  "),
        ]));
        assert_eq!(config.configured_slots(), 0);
        assert!(config.github_token.is_none());
    }

    #[test]
    fn test_credentials_and_model_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("GITHUB_TOKEN", "ghp_abc"),
            ("VOYAGE_API_KEY", "pa-123"),
            ("OPENAI_API_KEY", "sk-456"),
            ("RQA_EMBEDDING_MODEL", "voyage-2"),
        ]));

        assert_eq!(config.github_token.as_deref(), Some("ghp_abc"));
        assert_eq!(config.embedding.api_key.as_deref(), Some("pa-123"));
        assert_eq!(config.embedding.model, "voyage-2");
        assert_eq!(config.completion.api_key.as_deref(), Some("sk-456"));
        assert_eq!(config.completion.model, "gpt-3.5-turbo-instruct");
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.chunking.chunk_size, 100);
        assert_eq!(config.chunking.chunk_overlap, 20);
        assert_eq!(config.embedding.batch_size, 64);
        assert_eq!(config.retrieval.top_k, 4);
    }
}
