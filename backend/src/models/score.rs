//! Score model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw activity metrics for one GitHub account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsInput {
    pub followers: u64,
    pub public_repos: u64,
    pub total_stars: u64,
    pub total_commits: u64,
    /// Days with at least one contribution in the last year
    pub active_days: u32,
    pub account_created_at: DateTime<Utc>,
}

/// Composite score with its six sub-scores, each in [0, 10]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub popularity: f64,
    pub impact: f64,
    pub activity: f64,
    pub tenure: f64,
    pub volume: f64,
    pub consistency: f64,
    /// Weighted sum of the sub-scores, rounded to one decimal
    pub final_score: f64,
    /// Account age in years, rounded to one decimal
    pub years_on_platform: f64,
}

/// Sub-scores exposed in the stats response
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponents {
    pub popularity: f64,
    pub impact: f64,
    pub activity: f64,
    pub tenure: f64,
    pub volume: f64,
    pub consistency: f64,
}

impl From<&ScoreBreakdown> for ScoreComponents {
    fn from(score: &ScoreBreakdown) -> Self {
        Self {
            popularity: score.popularity,
            impact: score.impact,
            activity: score.activity,
            tenure: score.tenure,
            volume: score.volume,
            consistency: score.consistency,
        }
    }
}
