pub mod github;
pub mod image_proxy;
pub mod overrides;
pub mod rating;
pub mod score;
pub mod stats;


pub use github::{GitHubApi, GitHubClient, GitHubConfig, GitHubError, GitHubUser};
pub use image_proxy::{ImageProxyError, ImageProxyService, ProxiedImage};
pub use overrides::{ProfileOverride, find_override, normalize_username};
pub use rating::{RatingMatcher, RatingTable, RatingTableError};
pub use score::{ScoreError, compute_score, format_one_decimal, round_one_decimal};
pub use stats::{StatsError, StatsService};
