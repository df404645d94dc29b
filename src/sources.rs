use anyhow::Result;

use crate::config::{Config, MAX_REPO_SLOTS};

/// Print the repository slots and credential presence.
pub fn list_sources(config: &Config) -> Result<()> {
    println!(
        "{:<6} {:<32} {:<12} STATUS",
        "SLOT", "REPOSITORY", "BRANCH"
    );
    for i in 1..=MAX_REPO_SLOTS {
        match &config.slots[i - 1] {
            Some(slot) => println!(
                "{:<6} {:<32} {:<12} configured",
                i,
                slot.full_name(),
                slot.branch
            ),
            None => println!("{:<6} {:<32} {:<12} NOT CONFIGURED", i, "-", "-"),
        }
    }

    println!();
    println!("Configured repositories: {}", config.configured_slots());
    println!();
    println!("{:<16} {}", "GITHUB_TOKEN", presence(config.github_token.is_some()));
    println!(
        "{:<16} {}",
        "VOYAGE_API_KEY",
        presence(config.embedding.api_key.is_some())
    );
    println!(
        "{:<16} {}",
        "OPENAI_API_KEY",
        presence(config.completion.api_key.is_some())
    );

    Ok(())
}

fn presence(set: bool) -> &'static str {
    if set {
        "set"
    } else {
        "not set"
    }
}
