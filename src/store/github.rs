//! GitHub contents API client.
//!
//! Reads and writes go through the REST contents endpoints of a single
//! repository and branch. Every call is one request (two for writes, which
//! first look up the blob SHA of the file being replaced); there are no
//! retries.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::{ContentStore, FileWrite, StoreError};
use crate::config::GitHubConfig;

/// Media type for the REST API.
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// REST API version header value.
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Request body of the create-or-update file endpoint.
#[derive(Debug, Serialize)]
struct PutContentBody<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<String>,
}

/// Content store backed by one GitHub repository branch.
pub struct GitHubContentStore {
    client: Client,
    api_base_url: String,
    owner: String,
    repo: String,
    branch: String,
    token: String,
}

impl GitHubContentStore {
    /// Create a client for the repository described by `config`.
    pub fn new(config: &GitHubConfig) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(|e| StoreError::Unknown(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            branch: config.branch.clone(),
            token: config.token.clone(),
        })
    }

    /// Branch targeted by every call.
    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// URL of the contents endpoint for `path`.
    pub fn contents_url(&self, path: &str) -> Result<String, StoreError> {
        let encoded = encode_path(path)?;
        let base = format!(
            "{}/repos/{}/{}/contents",
            self.api_base_url,
            urlencoding::encode(&self.owner),
            urlencoding::encode(&self.repo)
        );
        if encoded.is_empty() {
            Ok(base)
        } else {
            Ok(format!("{}/{}", base, encoded))
        }
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.token.is_empty() {
            request
        } else {
            request.bearer_auth(&self.token)
        }
    }

    /// SHA of the file currently at `path`, if any.
    async fn existing_sha(&self, path: &str) -> Result<Option<String>, StoreError> {
        match self.get_content(path).await {
            Ok(value) => Ok(value
                .get("sha")
                .and_then(Value::as_str)
                .map(str::to_string)),
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl ContentStore for GitHubContentStore {
    async fn get_content(&self, path: &str) -> Result<Value, StoreError> {
        let url = self.contents_url(path)?;
        tracing::debug!(%url, branch = %self.branch, "Fetching repository content");

        let response = self
            .authorize(self.client.get(&url))
            .query(&[("ref", self.branch.as_str())])
            .send()
            .await?;

        read_json(response).await
    }

    async fn put_file(&self, write: &FileWrite) -> Result<Value, StoreError> {
        let sha = self.existing_sha(&write.path).await?;
        let url = self.contents_url(&write.path)?;
        tracing::debug!(
            %url,
            branch = %self.branch,
            bytes = write.content.len(),
            replace = sha.is_some(),
            "Writing repository file"
        );

        let body = PutContentBody {
            message: &write.message,
            content: write.encoded_content(),
            branch: &self.branch,
            sha,
        };

        let response = self
            .authorize(self.client.put(&url))
            .json(&body)
            .send()
            .await?;

        read_json(response).await
    }
}

/// Percent-encode each segment of a repository path.
///
/// Empty segments (leading, trailing, or doubled slashes) are dropped. `.`
/// and `..` are rejected: URL normalization would resolve them against the
/// endpoint path and leave the repository.
pub fn encode_path(path: &str) -> Result<String, StoreError> {
    let mut segments = Vec::new();
    for segment in path.split('/').filter(|segment| !segment.is_empty()) {
        if segment == "." || segment == ".." {
            return Err(StoreError::InvalidPath(format!(
                "invalid path segment '{}' in '{}'",
                segment, path
            )));
        }
        segments.push(urlencoding::encode(segment).into_owned());
    }
    Ok(segments.join("/"))
}

/// Turn a response into its JSON body or a classified error.
async fn read_json(response: Response) -> Result<Value, StoreError> {
    let status = response.status();

    if status.is_success() {
        return response
            .json::<Value>()
            .await
            .map_err(|e| StoreError::Unknown(format!("invalid response body: {}", e)));
    }

    let exhausted = rate_limit_exhausted(response.headers());
    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP error: {}", status.as_u16()))
    });

    let err = StoreError::from_status(status.as_u16(), exhausted, message);
    tracing::warn!(status = status.as_u16(), error = %err, "Content store request failed");
    Err(err)
}

fn rate_limit_exhausted(headers: &HeaderMap) -> bool {
    let remaining_zero = headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim() == "0")
        .unwrap_or(false);
    remaining_zero || headers.contains_key(reqwest::header::RETRY_AFTER)
}

/// The `message` member of an error body, if present.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
