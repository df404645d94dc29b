//! GitHub issues connector.
//!
//! Fetches every issue of a repository (open and closed) through the REST
//! issues listing and normalizes each one into a [`Document`]. The listing
//! also returns pull requests; they are kept and flagged. Issue listing is
//! branch-independent, so the slot's branch is accepted but never used
//! here; it only shows up in `rqa sources` output.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;

use crate::config::RepoSlot;
use crate::models::Document;

const GITHUB_API_BASE: &str = "https://api.github.com";
const PER_PAGE: usize = 100;
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// A source of issue documents for one repository.
///
/// The pipeline only depends on this seam; the concrete GitHub client
/// below is one implementation, test stubs are another.
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Fetch all issues of the slot's repository, in listing order.
    async fn fetch_issues(&self, slot: &RepoSlot) -> Result<Vec<Document>>;
}

/// Issue source backed by the GitHub REST API.
///
/// The token is optional; unauthenticated requests work for public
/// repositories, subject to much tighter rate limits.
pub struct GithubIssues {
    token: Option<String>,
}

impl GithubIssues {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }
}

/// One entry of the issues listing, as returned by the API.
#[derive(Debug, Deserialize)]
struct IssueRecord {
    number: u64,
    title: Option<String>,
    body: Option<String>,
    state: String,
    html_url: Option<String>,
    user: Option<IssueUser>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    /// Present (with any content) when the entry is a pull request.
    pull_request: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct IssueUser {
    login: String,
}

impl IssueRecord {
    fn into_document(self, slot: &RepoSlot) -> Document {
        Document {
            source: slot.full_name(),
            source_id: self.number.to_string(),
            source_url: self.html_url,
            title: self.title,
            author: self.user.map(|u| u.login),
            created_at: self.created_at,
            updated_at: self.updated_at,
            state: self.state,
            is_pull_request: self.pull_request.is_some(),
            body: self.body.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl IssueSource for GithubIssues {
    async fn fetch_issues(&self, slot: &RepoSlot) -> Result<Vec<Document>> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        let url = format!(
            "{}/repos/{}/{}/issues",
            GITHUB_API_BASE, slot.owner, slot.repo
        );

        let mut documents = Vec::new();
        let mut page = 1usize;

        loop {
            let mut request = client
                .get(&url)
                .header("User-Agent", "repo-qa")
                .header("Accept", "application/vnd.github+json")
                .query(&[
                    ("state", "all".to_string()),
                    ("per_page", PER_PAGE.to_string()),
                    ("page", page.to_string()),
                ]);

            if let Some(token) = &self.token {
                request = request.header("Authorization", format!("Bearer {}", token));
            }

            let response = request
                .send()
                .await
                .with_context(|| format!("Failed to reach GitHub for {}", slot.full_name()))?;

            let status = response.status();
            if !status.is_success() {
                let body_text = response.text().await.unwrap_or_default();
                bail!(
                    "GitHub API error {} for {}: {}",
                    status,
                    slot.full_name(),
                    body_text
                );
            }

            let records: Vec<IssueRecord> = response
                .json()
                .await
                .with_context(|| format!("Invalid issues payload for {}", slot.full_name()))?;

            let count = records.len();
            documents.extend(records.into_iter().map(|r| r.into_document(slot)));

            if count < PER_PAGE {
                break;
            }
            page += 1;
        }

        Ok(documents)
    }
}
