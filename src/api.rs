// API client module: contains a small blocking HTTP client that talks to
// the GitHub REST API. Every call attaches the token auth headers; a
// non-success status becomes an `ApiError::Status` carrying the code and
// the response text.

use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page size used when paginating following lists.
pub const FOLLOWING_PAGE_SIZE: u32 = 100;
/// Page size used for user search.
pub const SEARCH_PAGE_SIZE: u32 = 30;

/// Error raised by any API call. `Status` is a non-2xx response; the
/// transport variant wraps connection, timeout and decode failures.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("api error: {status} {body}")]
    Status { status: u16, body: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// An account snapshot as returned by the API. Search results omit the
/// profile and count fields, so those all default.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Account {
    pub id: u64,
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// One page of user-search results.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SearchResults {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Vec<Account>,
}

/// The API surface the rest of the crate programs against. `ApiClient`
/// is the production implementation; tests substitute a scripted fake.
pub trait FollowApi {
    /// Resolve the account the token belongs to.
    fn current_user(&self) -> Result<Account, ApiError>;

    /// One page of the accounts `login` follows. An empty page marks the
    /// end of the list.
    fn following(&self, login: &str, page: u32) -> Result<Vec<Account>, ApiError>;

    /// Whether the viewer follows `login`.
    fn is_following(&self, login: &str) -> Result<bool, ApiError>;

    /// Whether `source` follows `target`.
    fn is_user_following(&self, source: &str, target: &str) -> Result<bool, ApiError>;

    /// Follow `login` on behalf of the viewer.
    fn follow(&self, login: &str) -> Result<(), ApiError>;

    /// Unfollow `login` on behalf of the viewer.
    fn unfollow(&self, login: &str) -> Result<(), ApiError>;

    /// Free-text user search. An empty query falls back to `type:user`.
    fn search_users(&self, query: &str, page: u32) -> Result<SearchResults, ApiError>;
}

/// Blocking client holding the base URL and the personal access token.
/// The token is fixed at construction; a new login builds a new client.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    /// Create an ApiClient configured from the environment variable
    /// `GITHUB_API_URL` or fallback to the public API endpoint.
    pub fn from_env(token: &str) -> Result<Self, ApiError> {
        let base_url =
            std::env::var("GITHUB_API_URL").unwrap_or_else(|_| "https://api.github.com".into());
        Self::new(base_url, token)
    }

    pub fn new(base_url: impl Into<String>, token: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("gitflock-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(ApiClient {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Send one request and check the status. Error bodies are usually
    /// JSON with a `message` field; keep that message when present so
    /// the status error reads well.
    fn send(&self, method: Method, path: &str) -> Result<Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let res = self
            .client
            .request(method, &url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, "application/vnd.github.v3+json")
            .header(CONTENT_TYPE, "application/json")
            .send()?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().unwrap_or_default();
            let body = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_owned))
                .unwrap_or(body);
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(res)
    }

    /// Relationship-existence check: the API answers 204 when the
    /// relationship exists and 404 when it does not. Anything else is a
    /// real error and propagates.
    fn relationship(&self, path: &str) -> Result<bool, ApiError> {
        match self.send(Method::GET, path) {
            Ok(_) => Ok(true),
            Err(ApiError::Status { status: 404, .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }
}

impl FollowApi for ApiClient {
    fn current_user(&self) -> Result<Account, ApiError> {
        Ok(self.send(Method::GET, "/user")?.json()?)
    }

    fn following(&self, login: &str, page: u32) -> Result<Vec<Account>, ApiError> {
        let path = format!(
            "/users/{}/following?page={}&per_page={}",
            login, page, FOLLOWING_PAGE_SIZE
        );
        Ok(self.send(Method::GET, &path)?.json()?)
    }

    fn is_following(&self, login: &str) -> Result<bool, ApiError> {
        self.relationship(&format!("/user/following/{}", login))
    }

    fn is_user_following(&self, source: &str, target: &str) -> Result<bool, ApiError> {
        self.relationship(&format!("/users/{}/following/{}", source, target))
    }

    fn follow(&self, login: &str) -> Result<(), ApiError> {
        // 204, empty body
        self.send(Method::PUT, &format!("/user/following/{}", login))?;
        Ok(())
    }

    fn unfollow(&self, login: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, &format!("/user/following/{}", login))?;
        Ok(())
    }

    fn search_users(&self, query: &str, page: u32) -> Result<SearchResults, ApiError> {
        let query = if query.is_empty() { "type:user" } else { query };
        let path = format!(
            "/search/users?q={}&page={}&per_page={}",
            urlencoding::encode(query),
            page,
            SEARCH_PAGE_SIZE
        );
        Ok(self.send(Method::GET, &path)?.json()?)
    }
}
