//! Serde contracts for the slice of the GitHub REST API the dashboard reads.
//!
//! Only the fields the views actually consume are declared; everything else
//! in the response body is ignored. Nullable API fields are `Option`.

use serde::Deserialize;

/// `/users/{login}`
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub login: String,
    pub id: u64,
    pub avatar_url: String,
    pub html_url: String,
    pub name: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub public_repos: u64,
    pub public_gists: u64,
    pub followers: u64,
    pub following: u64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepoOwner {
    pub login: String,
    pub id: u64,
    pub avatar_url: String,
    pub html_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct License {
    pub key: String,
    pub name: String,
}

/// `/repos/{owner}/{name}` and rows of `/users/{login}/repos`
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub owner: RepoOwner,
    pub html_url: String,
    pub description: Option<String>,
    pub fork: bool,
    pub created_at: String,
    pub updated_at: String,
    pub pushed_at: Option<String>,
    pub homepage: Option<String>,
    pub size: u64,
    pub stargazers_count: u64,
    pub watchers_count: u64,
    pub language: Option<String>,
    pub forks_count: u64,
    pub open_issues_count: u64,
    pub license: Option<License>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub default_branch: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitAuthor {
    pub name: String,
    pub email: String,
    pub date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetail {
    pub author: CommitAuthor,
    pub committer: CommitAuthor,
    pub message: String,
}

/// The `author`/`committer` GitHub account; null when the email is not linked.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitActor {
    pub login: String,
    pub id: u64,
    pub avatar_url: String,
}

/// Rows of `/repos/{owner}/{name}/commits`
#[derive(Debug, Clone, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub commit: CommitDetail,
    pub author: Option<CommitActor>,
    pub committer: Option<CommitActor>,
}

impl Commit {
    pub fn short_sha(&self) -> &str {
        // Falls back to the whole string for short or non-ASCII shas rather
        // than risking a slice panic on a char boundary.
        self.sha.get(..7).unwrap_or(&self.sha)
    }

    /// First line of the commit message.
    pub fn summary(&self) -> &str {
        self.commit.message.lines().next().unwrap_or("")
    }

    /// Display name: the GitHub login when the account is linked, otherwise
    /// the name recorded in the commit itself.
    pub fn author_label(&self) -> &str {
        self.author
            .as_ref()
            .map(|a| a.login.as_str())
            .unwrap_or(self.commit.author.name.as_str())
    }
}

/// One row of `/repos/{owner}/{name}/contents/{path}` (a directory listing).
#[derive(Debug, Clone, Deserialize)]
pub struct ContentEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub path: String,
    pub sha: String,
    pub size: u64,
    pub download_url: Option<String>,
}

impl ContentEntry {
    pub fn is_file(&self) -> bool {
        self.kind == "file"
    }
}

/// Render an ISO-8601 timestamp as e.g. `Mar 4, 2024`. Falls back to the
/// raw string when the API hands back something unparseable.
pub fn format_date(iso: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(iso) {
        Ok(dt) => dt.format("%b %-d, %Y").to_string(),
        Err(_) => iso.to_string(),
    }
}
