//! Score Engine
//!
//! Turns raw GitHub activity metrics into a 0-10 composite score made of six
//! independently clamped sub-scores.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{MetricsInput, ScoreBreakdown};

/// Score computation errors
#[derive(Debug, Error, PartialEq)]
pub enum ScoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Upper bound of every sub-score and of the composite score
pub const MAX_SCORE: f64 = 10.0;

/// Composite weights; they sum to 1.00
pub const WEIGHT_POPULARITY: f64 = 0.20;
pub const WEIGHT_IMPACT: f64 = 0.20;
pub const WEIGHT_VOLUME: f64 = 0.20;
pub const WEIGHT_ACTIVITY: f64 = 0.10;
pub const WEIGHT_CONSISTENCY: f64 = 0.15;
pub const WEIGHT_TENURE: f64 = 0.15;

/// log10 divisors: the count at which each sub-score saturates is 10^divisor
const FOLLOWERS_LOG_SCALE: f64 = 5.0;
const STARS_LOG_SCALE: f64 = 6.0;
const REPOS_LOG_SCALE: f64 = 3.0;
const COMMITS_LOG_SCALE: f64 = 5.0;

const DAYS_PER_YEAR: f64 = 365.0;
const DAYS_PER_JULIAN_YEAR: f64 = 365.25;
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Compute the score breakdown for a set of metrics as of `now`.
///
/// Fails only when the account creation date lies after `now`.
pub fn compute_score(
    input: &MetricsInput,
    now: DateTime<Utc>,
) -> Result<ScoreBreakdown, ScoreError> {
    if input.account_created_at > now {
        return Err(ScoreError::InvalidInput(format!(
            "account created at {} is after {}",
            input.account_created_at.to_rfc3339(),
            now.to_rfc3339()
        )));
    }

    let years_on_platform = years_between(input.account_created_at, now);

    let popularity = log_score(input.followers, FOLLOWERS_LOG_SCALE);
    let impact = log_score(input.total_stars, STARS_LOG_SCALE);
    let activity = log_score(input.public_repos, REPOS_LOG_SCALE);
    let volume = log_score(input.total_commits, COMMITS_LOG_SCALE);
    let consistency = clamp_score(f64::from(input.active_days) / DAYS_PER_YEAR * MAX_SCORE);
    let tenure = clamp_score(years_on_platform);

    let weighted = popularity * WEIGHT_POPULARITY
        + impact * WEIGHT_IMPACT
        + volume * WEIGHT_VOLUME
        + activity * WEIGHT_ACTIVITY
        + consistency * WEIGHT_CONSISTENCY
        + tenure * WEIGHT_TENURE;

    Ok(ScoreBreakdown {
        popularity,
        impact,
        activity,
        tenure,
        volume,
        consistency,
        final_score: round_one_decimal(clamp_score(weighted)),
        years_on_platform: round_one_decimal(years_on_platform),
    })
}

/// log10(count + 1) scaled so that 10^scale saturates at [`MAX_SCORE`]
fn log_score(count: u64, scale: f64) -> f64 {
    // u64 -> f64 loses precision above 2^53, irrelevant at log scale
    clamp_score(((count as f64) + 1.0).log10() / scale * MAX_SCORE)
}

fn clamp_score(value: f64) -> f64 {
    value.clamp(0.0, MAX_SCORE)
}

fn years_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let elapsed = to.signed_duration_since(from);
    let days = elapsed.num_milliseconds() as f64 / 1000.0 / SECONDS_PER_DAY;
    days / DAYS_PER_JULIAN_YEAR
}

/// Round to one decimal place, using the same rule as [`format_one_decimal`].
pub fn round_one_decimal(value: f64) -> f64 {
    format_one_decimal(value).parse().unwrap_or(value)
}

/// Format with exactly one fractional digit.
///
/// Rounds the exact decimal value of the double, so 2.05 (stored as
/// 2.04999...) becomes "2.0" and 8.05 (stored as 8.05000...07) becomes "8.1".
/// Exact midpoints such as 0.25 round away from zero.
pub fn format_one_decimal(value: f64) -> String {
    if is_exact_midpoint(value) {
        // value * 10 is exact for a midpoint, so f64::round sees the true tie
        format!("{:.1}", (value * 10.0).round() / 10.0)
    } else {
        format!("{:.1}", value)
    }
}

/// A double lies exactly halfway between two one-decimal values only when it
/// is an odd multiple of 0.25.
fn is_exact_midpoint(value: f64) -> bool {
    let quarters = value * 4.0;
    quarters.is_finite() && quarters.fract() == 0.0 && quarters % 2.0 != 0.0
}
