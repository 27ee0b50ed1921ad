//! GitHub API client
//!
//! Fetches the raw metrics the Score Engine needs: profile, repository star
//! totals, commit search counts and the contribution calendar. Calls are
//! plain sequential requests; the first failure is returned to the caller.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::UserSuggestion;

/// GitHub client errors
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("GitHub resource not found: {0}")]
    NotFound(String),

    #[error("GitHub returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Failed to decode GitHub response: {0}")]
    Decode(String),

    #[error("GraphQL error: {0}")]
    Graphql(String),
}

impl From<reqwest::Error> for GitHubError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}

/// Page size used for repository listing; a shorter page is the last one
pub const REPOS_PER_PAGE: usize = 100;

/// Maximum suggestions returned by user search
pub const SEARCH_RESULT_LIMIT: u32 = 5;

/// Longest login GitHub accepts
pub const MAX_LOGIN_LEN: usize = 39;

const COMMIT_SEARCH_ACCEPT: &str = "application/vnd.github.v3+json";
const ERROR_BODY_LIMIT: usize = 512;

const CONTRIBUTION_CALENDAR_QUERY: &str = r#"
query($username: String!) {
  user(login: $username) {
    contributionsCollection {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            contributionCount
            date
          }
        }
      }
    }
  }
}
"#;

/// Whether `login` uses only characters GitHub allows in usernames.
///
/// Logins are interpolated into request paths, so anything else (".", "/",
/// "?", "%") must never reach the URL.
pub fn is_valid_login(login: &str) -> bool {
    !login.is_empty()
        && login.len() <= MAX_LOGIN_LEN
        && login.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn ensure_valid_login(login: &str) -> Result<(), GitHubError> {
    if is_valid_login(login) {
        Ok(())
    } else {
        Err(GitHubError::NotFound(format!("user {login}")))
    }
}

/// Public profile fields used for scoring and display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    pub avatar_url: Option<String>,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub followers: u64,
    pub public_repos: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
struct RepoSummary {
    #[serde(default)]
    stargazers_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct SearchCount {
    total_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct UserSearchResponse {
    #[serde(default)]
    items: Vec<UserSuggestion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    data: Option<GraphqlData>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Clone, Deserialize)]
struct GraphqlData {
    user: Option<GraphqlUser>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphqlUser {
    contributions_collection: ContributionsCollection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection {
    contribution_calendar: ContributionCalendar,
}

/// Contribution calendar for the trailing year
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    #[serde(default)]
    pub total_contributions: u64,
    pub weeks: Vec<ContributionWeek>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionWeek {
    pub contribution_days: Vec<ContributionDay>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDay {
    pub contribution_count: u64,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct GraphqlError {
    message: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

impl ContributionCalendar {
    /// Number of days with at least one contribution
    pub fn active_days(&self) -> u32 {
        let days = self
            .weeks
            .iter()
            .flat_map(|week| &week.contribution_days)
            .filter(|day| day.contribution_count > 0)
            .count();
        u32::try_from(days).unwrap_or(u32::MAX)
    }
}

impl GraphqlResponse {
    /// Extract the contribution calendar, mapping a missing user to
    /// [`GitHubError::NotFound`].
    pub fn into_calendar(self, login: &str) -> Result<ContributionCalendar, GitHubError> {
        if self
            .errors
            .iter()
            .any(|e| e.kind.as_deref() == Some("NOT_FOUND"))
        {
            return Err(GitHubError::NotFound(format!("user {login}")));
        }

        if !self.errors.is_empty() {
            let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
            return Err(GitHubError::Graphql(messages.join("; ")));
        }

        self.data
            .and_then(|d| d.user)
            .map(|u| u.contributions_collection.contribution_calendar)
            .ok_or_else(|| GitHubError::NotFound(format!("user {login}")))
    }
}

/// Upstream GitHub operations used by the stats service
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Fetch a user's public profile
    async fn get_user(&self, login: &str) -> Result<GitHubUser, GitHubError>;

    /// Sum of stargazers across all of a user's public repositories
    async fn total_stars(&self, login: &str) -> Result<u64, GitHubError>;

    /// Number of commits authored by the user, per commit search
    async fn total_commits(&self, login: &str) -> Result<u64, GitHubError>;

    /// Days with contributions in the user's contribution calendar
    async fn active_days(&self, login: &str) -> Result<u32, GitHubError>;

    /// Logins matching `query`
    async fn search_users(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<UserSuggestion>, GitHubError>;
}

/// Connection settings for [`GitHubClient`]
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// REST base URL; GraphQL lives at `{api_url}/graphql`
    pub api_url: String,
    /// Sent as a bearer token when present
    pub token: Option<String>,
    pub user_agent: String,
    pub timeout: Duration,
    /// Upper bound on repository pages fetched per user
    pub max_repo_pages: u32,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            token: None,
            user_agent: concat!("gitscore/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(15),
            max_repo_pages: 100,
        }
    }
}

/// reqwest-backed GitHub client
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    config: GitHubConfig,
}

impl GitHubClient {
    pub fn new(config: GitHubConfig) -> Result<Self, GitHubError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GitHubError::Http(e.to_string()))?;

        Ok(Self {
            client,
            config: GitHubConfig {
                api_url: config.api_url.trim_end_matches('/').to_string(),
                ..config
            },
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(USER_AGENT, &self.config.user_agent);
        match &self.config.token {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        }
    }

    /// Send a request and decode a successful JSON body
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        resource: &str,
    ) -> Result<T, GitHubError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(GitHubError::NotFound(resource.to_string()));
        }

        if !status.is_success() {
            let mut message = response.text().await.unwrap_or_default();
            if message.len() > ERROR_BODY_LIMIT {
                let cut = (0..=ERROR_BODY_LIMIT)
                    .rev()
                    .find(|i| message.is_char_boundary(*i))
                    .unwrap_or(0);
                message.truncate(cut);
            }
            return Err(GitHubError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }

    async fn repos_page(&self, login: &str, page: u32) -> Result<Vec<RepoSummary>, GitHubError> {
        ensure_valid_login(login)?;
        let request = self
            .client
            .get(self.url(&format!("/users/{login}/repos")))
            .query(&[
                ("per_page", REPOS_PER_PAGE.to_string()),
                ("page", page.to_string()),
            ]);
        self.send_json(request, &format!("repos of {login}")).await
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn get_user(&self, login: &str) -> Result<GitHubUser, GitHubError> {
        ensure_valid_login(login)?;
        debug!("Fetching GitHub profile for {}", login);
        let request = self.client.get(self.url(&format!("/users/{login}")));
        self.send_json(request, &format!("user {login}")).await
    }

    async fn total_stars(&self, login: &str) -> Result<u64, GitHubError> {
        let mut total: u64 = 0;

        for page in 1..=self.config.max_repo_pages {
            let repos = self.repos_page(login, page).await?;
            total = repos
                .iter()
                .fold(total, |acc, r| acc.saturating_add(r.stargazers_count));

            if repos.len() < REPOS_PER_PAGE {
                debug!("Summed stars for {} over {} page(s)", login, page);
                return Ok(total);
            }
        }

        warn!(
            "Stopped star pagination for {} after {} pages",
            login, self.config.max_repo_pages
        );
        Ok(total)
    }

    async fn total_commits(&self, login: &str) -> Result<u64, GitHubError> {
        ensure_valid_login(login)?;
        let request = self
            .client
            .get(self.url("/search/commits"))
            .header(ACCEPT, COMMIT_SEARCH_ACCEPT)
            .query(&[("q", format!("author:{login}"))]);
        let count: SearchCount = self
            .send_json(request, &format!("commits of {login}"))
            .await?;
        Ok(count.total_count)
    }

    async fn active_days(&self, login: &str) -> Result<u32, GitHubError> {
        ensure_valid_login(login)?;
        let body = serde_json::json!({
            "query": CONTRIBUTION_CALENDAR_QUERY,
            "variables": { "username": login },
        });
        let request = self.client.post(self.url("/graphql")).json(&body);
        let response: GraphqlResponse = self
            .send_json(request, &format!("contributions of {login}"))
            .await?;

        Ok(response.into_calendar(login)?.active_days())
    }

    async fn search_users(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<UserSuggestion>, GitHubError> {
        let request = self.client.get(self.url("/search/users")).query(&[
            ("q", format!("{query} in:login")),
            ("per_page", limit.to_string()),
        ]);
        let response: UserSearchResponse = self
            .send_json(request, &format!("user search {query}"))
            .await?;
        Ok(response.items)
    }
}
