// GitHub API response types.
// Defines structs for deserializing the repository, statistics, and list endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Login shown for contributions whose account no longer exists.
pub const GHOST_LOGIN: &str = "ghost";

/// Minimal user reference embedded in other payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub login: String,
}

/// Repository metadata returned by the existence probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub full_name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub forks_count: u64,
}

/// One entry of `/stats/contributors`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributorStats {
    pub total: u64,
    /// Null when the author's account has been deleted.
    pub author: Option<Account>,
    #[serde(default)]
    pub weeks: Vec<WeeklyBucket>,
}

impl ContributorStats {
    pub fn login(&self) -> &str {
        self.author
            .as_ref()
            .map(|a| a.login.as_str())
            .unwrap_or(GHOST_LOGIN)
    }
}

/// Weekly bucket inside a contributor entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeeklyBucket {
    /// Week start, epoch seconds.
    pub w: i64,
    /// Additions.
    pub a: i64,
    /// Deletions.
    pub d: i64,
    /// Commits.
    pub c: i64,
}

/// One row of `/stats/code_frequency`: `[week, additions, deletions]`.
pub type CodeFrequencyRow = (i64, i64, i64);

/// One entry of `/stats/commit_activity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitActivityEntry {
    /// Commit counts indexed Sunday (0) through Saturday (6).
    pub days: [u32; 7],
    pub total: u32,
    pub week: i64,
}

/// Issue list item; only the retained fields are decoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueItem {
    pub id: u64,
    pub state: String,
    pub created_at: DateTime<Utc>,
}

/// Stargazer list item under the `star+json` media type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarEvent {
    pub starred_at: DateTime<Utc>,
    /// Null when the account has been deleted.
    pub user: Option<Account>,
}

impl StarEvent {
    pub fn login(&self) -> &str {
        self.user
            .as_ref()
            .map(|a| a.login.as_str())
            .unwrap_or(GHOST_LOGIN)
    }
}

/// Public profile from `/users/{login}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub login: String,
    pub name: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    pub created_at: DateTime<Utc>,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}
