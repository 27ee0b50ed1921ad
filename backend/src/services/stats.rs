//! Stats Service
//!
//! Builds the scored profile for a GitHub username: override lookup, upstream
//! metric collection, scoring and rating match.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::info;

use crate::models::{MetricsInput, ScoreComponents, StatsResponse, UserSuggestion};
use crate::services::github::{GitHubApi, GitHubError, SEARCH_RESULT_LIMIT, is_valid_login};
use crate::services::overrides::{find_override, normalize_username};
use crate::services::rating::RatingMatcher;
use crate::services::score::{ScoreError, compute_score, format_one_decimal};

/// Stats service errors
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Invalid username")]
    InvalidUsername,

    #[error("GitHub error: {0}")]
    GitHub(GitHubError),

    #[error("Score error: {0}")]
    Score(#[from] ScoreError),
}

impl From<GitHubError> for StatsError {
    fn from(err: GitHubError) -> Self {
        match err {
            GitHubError::NotFound(resource) => Self::NotFound(resource),
            other => Self::GitHub(other),
        }
    }
}

#[derive(Clone)]
pub struct StatsService {
    github: Arc<dyn GitHubApi>,
    matcher: RatingMatcher,
}

impl StatsService {
    pub fn new(github: Arc<dyn GitHubApi>, matcher: RatingMatcher) -> Self {
        Self { github, matcher }
    }

    /// Scored profile for `username`
    pub async fn get_stats(&self, username: &str) -> Result<StatsResponse, StatsError> {
        let login = normalize_username(username);
        if login.is_empty() {
            return Err(StatsError::InvalidUsername);
        }

        if let Some(profile) = find_override(&login) {
            info!("Serving profile override for {}", login);
            let mut response = profile.to_response();
            response.sofascore_match = self.matcher.match_rating(profile.final_score).await;
            return Ok(response);
        }

        if !is_valid_login(&login) {
            return Err(StatsError::InvalidUsername);
        }

        let user = self.github.get_user(&login).await?;
        let total_stars = self.github.total_stars(&login).await?;
        let total_commits = self.github.total_commits(&login).await?;
        let active_days = self.github.active_days(&login).await?;

        let metrics = MetricsInput {
            followers: user.followers,
            public_repos: user.public_repos,
            total_stars,
            total_commits,
            active_days,
            account_created_at: user.created_at,
        };
        let score = compute_score(&metrics, Utc::now())?;
        let sofascore_match = self.matcher.match_rating(score.final_score).await;

        info!(
            "Scored {}: {} ({} followers, {} stars, {} commits, {} active days)",
            user.login,
            format_one_decimal(score.final_score),
            metrics.followers,
            metrics.total_stars,
            metrics.total_commits,
            metrics.active_days
        );

        Ok(StatsResponse {
            username: user.login,
            avatar_url: user.avatar_url,
            name: user.name,
            bio: user.bio,
            followers: metrics.followers,
            public_repos: metrics.public_repos,
            total_stars: metrics.total_stars,
            total_commits: metrics.total_commits,
            active_days: metrics.active_days,
            years_on_github: format_one_decimal(score.years_on_platform),
            final_score: format_one_decimal(score.final_score),
            sofascore_match,
            breakdown: Some(ScoreComponents::from(&score)),
        })
    }

    /// Login suggestions for autocompletion; a blank query yields no results
    /// without calling GitHub.
    pub async fn search(&self, query: &str) -> Result<Vec<UserSuggestion>, StatsError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let mut users = self.github.search_users(query, SEARCH_RESULT_LIMIT).await?;
        users.truncate(SEARCH_RESULT_LIMIT as usize);
        Ok(users)
    }
}
