//! GitHub REST client.
//!
//! All requests run as tokio tasks; completions are reported back to the
//! event loop over a channel as `FetchOutcome`. The UI thread never blocks
//! on the network. Outcomes carry the generation counter of the screen that
//! requested them so the workbench can drop results that arrive after the
//! user navigated away.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::mpsc::Sender;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use tokio::runtime::Handle;

use crate::models::github::{Commit, ContentEntry, Repository, UserProfile};

const API_BASE_URL: &str = "https://api.github.com";
const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw+json";

/// Shown instead of file content that is not valid UTF-8.
pub const BINARY_PLACEHOLDER: &str = "Unable to display file content";

#[derive(Debug)]
pub enum GithubError {
    Http(reqwest::Error),
    Status { code: u16, url: String },
}

impl fmt::Display for GithubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GithubError::Http(err) => write!(f, "request failed: {err}"),
            GithubError::Status { code: 403, url } => {
                write!(f, "GitHub returned 403 for {url} (rate limited? set GITHUB_TOKEN)")
            }
            GithubError::Status { code, url } => write!(f, "GitHub returned {code} for {url}"),
        }
    }
}

impl std::error::Error for GithubError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GithubError::Http(err) => Some(err),
            GithubError::Status { .. } => None,
        }
    }
}

impl From<reqwest::Error> for GithubError {
    fn from(err: reqwest::Error) -> Self {
        GithubError::Http(err)
    }
}

/// Parsed body of one completed fetch.
#[derive(Debug)]
pub enum FetchPayload {
    User(UserProfile),
    Repositories(Vec<Repository>),
    Repository(Box<Repository>),
    /// One directory level of a repository, keyed by the listed path
    /// (empty string for the repository root).
    Contents {
        path: String,
        entries: Vec<ContentEntry>,
    },
    FileContent {
        path: String,
        text: String,
    },
    Commits(Vec<Commit>),
    Languages(BTreeMap<String, u64>),
}

#[derive(Debug)]
pub struct FetchOutcome {
    pub generation: u64,
    /// Human-readable request label for the status line and the log.
    pub label: &'static str,
    pub result: Result<FetchPayload, GithubError>,
}

pub struct GithubClient {
    http: reqwest::Client,
    runtime: Handle,
    tx: Sender<FetchOutcome>,
}

impl GithubClient {
    pub fn new(runtime: Handle, tx: Sender<FetchOutcome>) -> Result<Self, GithubError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_MEDIA_TYPE));
        if let Ok(token) = std::env::var("GITHUB_TOKEN") {
            if let Ok(mut value) = HeaderValue::from_str(&format!("Bearer {token}")) {
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("hubdash/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self { http, runtime, tx })
    }

    fn spawn<F>(&self, generation: u64, label: &'static str, fut: F)
    where
        F: Future<Output = Result<FetchPayload, GithubError>> + Send + 'static,
    {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = fut.await;
            if let Err(err) = &result {
                tracing::warn!(label, error = %err, "fetch failed");
            }
            // Receiver gone means the app is shutting down.
            let _ = tx.send(FetchOutcome {
                generation,
                label,
                result,
            });
        });
    }

    pub fn fetch_user(&self, generation: u64, login: &str) {
        let http = self.http.clone();
        let url = format!("{API_BASE_URL}/users/{login}");
        self.spawn(generation, "user profile", async move {
            get_json::<UserProfile>(&http, &url)
                .await
                .map(FetchPayload::User)
        });
    }

    pub fn fetch_user_repositories(&self, generation: u64, login: &str) {
        let http = self.http.clone();
        let url = format!("{API_BASE_URL}/users/{login}/repos?sort=updated&per_page=100");
        self.spawn(generation, "repositories", async move {
            get_json::<Vec<Repository>>(&http, &url)
                .await
                .map(FetchPayload::Repositories)
        });
    }

    pub fn fetch_repository(&self, generation: u64, owner: &str, name: &str) {
        let http = self.http.clone();
        let url = format!("{API_BASE_URL}/repos/{owner}/{name}");
        self.spawn(generation, "repository", async move {
            get_json::<Repository>(&http, &url)
                .await
                .map(|repo| FetchPayload::Repository(Box::new(repo)))
        });
    }

    /// Fetch one directory level. `path` is empty for the repository root.
    pub fn fetch_contents(&self, generation: u64, owner: &str, name: &str, path: &str) {
        let http = self.http.clone();
        let url = contents_url(owner, name, path);
        let path = path.to_string();
        self.spawn(generation, "contents", async move {
            get_json::<Vec<ContentEntry>>(&http, &url)
                .await
                .map(|entries| FetchPayload::Contents { path, entries })
        });
    }

    /// Fetch a file's raw content. Non-UTF-8 bodies degrade to a placeholder
    /// string instead of failing the fetch.
    pub fn fetch_file_content(&self, generation: u64, owner: &str, name: &str, path: &str) {
        let http = self.http.clone();
        let url = contents_url(owner, name, path);
        let path = path.to_string();
        self.spawn(generation, "file content", async move {
            let resp = http
                .get(&url)
                .header(ACCEPT, RAW_MEDIA_TYPE)
                .send()
                .await?;
            let status = resp.status();
            if !status.is_success() {
                return Err(GithubError::Status {
                    code: status.as_u16(),
                    url,
                });
            }
            let bytes = resp.bytes().await?;
            let text = String::from_utf8(bytes.to_vec())
                .unwrap_or_else(|_| BINARY_PLACEHOLDER.to_string());
            Ok(FetchPayload::FileContent { path, text })
        });
    }

    pub fn fetch_commits(&self, generation: u64, owner: &str, name: &str, per_page: u32) {
        let http = self.http.clone();
        let url = format!("{API_BASE_URL}/repos/{owner}/{name}/commits?per_page={per_page}");
        self.spawn(generation, "commits", async move {
            get_json::<Vec<Commit>>(&http, &url)
                .await
                .map(FetchPayload::Commits)
        });
    }

    pub fn fetch_languages(&self, generation: u64, owner: &str, name: &str) {
        let http = self.http.clone();
        let url = format!("{API_BASE_URL}/repos/{owner}/{name}/languages");
        self.spawn(generation, "languages", async move {
            get_json::<BTreeMap<String, u64>>(&http, &url)
                .await
                .map(FetchPayload::Languages)
        });
    }
}

async fn get_json<T: DeserializeOwned>(
    http: &reqwest::Client,
    url: &str,
) -> Result<T, GithubError> {
    tracing::debug!(url, "GET");
    let resp = http.get(url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(GithubError::Status {
            code: status.as_u16(),
            url: url.to_string(),
        });
    }
    Ok(resp.json::<T>().await?)
}

fn contents_url(owner: &str, name: &str, path: &str) -> String {
    if path.is_empty() {
        format!("{API_BASE_URL}/repos/{owner}/{name}/contents")
    } else {
        format!("{API_BASE_URL}/repos/{owner}/{name}/contents/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contents_url_root_has_no_trailing_slash() {
        assert_eq!(
            contents_url("octocat", "hello", ""),
            "https://api.github.com/repos/octocat/hello/contents"
        );
        assert_eq!(
            contents_url("octocat", "hello", "src/views"),
            "https://api.github.com/repos/octocat/hello/contents/src/views"
        );
    }

    #[test]
    fn test_status_error_display() {
        let err = GithubError::Status {
            code: 404,
            url: "https://api.github.com/users/nobody".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("404"));
        assert!(text.contains("/users/nobody"));
    }

    #[test]
    fn test_rate_limit_hint_on_403() {
        let err = GithubError::Status {
            code: 403,
            url: "https://api.github.com/users/octocat".to_string(),
        };
        assert!(err.to_string().contains("GITHUB_TOKEN"));
    }
}
