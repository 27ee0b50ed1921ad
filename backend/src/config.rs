use std::env;
use std::time::Duration;

use crate::services::github::GitHubConfig;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// GitHub REST base URL
    pub github_api_url: String,
    /// Optional GitHub token; unauthenticated requests hit much lower limits
    pub github_token: Option<String>,
    /// Timeout for each upstream request in seconds (default: 15)
    pub github_timeout_secs: u64,
    /// Maximum repository pages fetched when summing stars (default: 100)
    pub github_max_repo_pages: u32,
    /// Path to the ratings dataset
    pub ratings_path: String,
    /// Fixed seed for rating picks; random when unset
    pub ratings_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            github_api_url: "https://api.github.com".to_string(),
            github_token: None,
            github_timeout_secs: 15,
            github_max_repo_pages: 100,
            ratings_path: "player_ratings.json".to_string(),
            ratings_seed: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = env::var("HOST").unwrap_or(defaults.host);

        let port = parse_var("PORT", defaults.port)?;

        let github_api_url = env::var("GITHUB_API_URL").unwrap_or(defaults.github_api_url);

        let github_token = env::var("GITHUB_TOKEN")
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let github_timeout_secs = parse_var("GITHUB_TIMEOUT_SECS", defaults.github_timeout_secs)?;
        if github_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("GITHUB_TIMEOUT_SECS"));
        }

        let github_max_repo_pages =
            parse_var("GITHUB_MAX_REPO_PAGES", defaults.github_max_repo_pages)?;
        if github_max_repo_pages == 0 {
            return Err(ConfigError::InvalidValue("GITHUB_MAX_REPO_PAGES"));
        }

        let ratings_path = env::var("RATINGS_PATH").unwrap_or(defaults.ratings_path);

        let ratings_seed = match env::var("RATINGS_SEED") {
            Ok(raw) => Some(
                raw.parse()
                    .map_err(|_| ConfigError::InvalidValue("RATINGS_SEED"))?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            host,
            port,
            github_api_url,
            github_token,
            github_timeout_secs,
            github_max_repo_pages,
            ratings_path,
            ratings_seed,
        })
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.github_timeout_secs)
    }

    /// Settings for the GitHub client
    pub fn github(&self) -> GitHubConfig {
        GitHubConfig {
            api_url: self.github_api_url.clone(),
            token: self.github_token.clone(),
            timeout: self.upstream_timeout(),
            max_repo_pages: self.github_max_repo_pages,
            ..GitHubConfig::default()
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue(name)),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
