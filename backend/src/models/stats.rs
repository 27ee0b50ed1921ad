//! Stats model and related types
//!
//! Wire shapes for the stats, search and image proxy endpoints. Field names
//! mix snake_case and camelCase because the browser client reads them as-is.

use serde::{Deserialize, Serialize};

use crate::models::{ReferenceEntity, ScoreComponents};

/// Response for GET /api/stats/{username}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub username: String,
    pub avatar_url: Option<String>,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub followers: u64,
    pub public_repos: u64,
    #[serde(rename = "totalStars")]
    pub total_stars: u64,
    #[serde(rename = "totalCommits")]
    pub total_commits: u64,
    #[serde(rename = "activeDays")]
    pub active_days: u32,
    /// One-decimal string, e.g. "7.3"
    #[serde(rename = "yearsOnGitHub")]
    pub years_on_github: String,
    /// One-decimal string, e.g. "8.1"
    #[serde(rename = "finalScore")]
    pub final_score: String,
    #[serde(rename = "sofascoreMatch")]
    pub sofascore_match: Option<ReferenceEntity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreComponents>,
}

/// Login suggestion returned by GET /api/search/{query}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSuggestion {
    pub login: String,
    pub avatar_url: Option<String>,
}

/// Query parameters for the image proxy endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ImageProxyQuery {
    #[serde(default)]
    pub url: Option<String>,
}
