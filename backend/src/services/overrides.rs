//! Profile overrides
//!
//! A fixed table of celebrity profiles answered without touching GitHub.
//! Keys are normalized identities (trimmed, lowercase).

use crate::models::StatsResponse;

const MESSI_AVATAR: &str = "https://upload.wikimedia.org/wikipedia/commons/b/b4/Lionel-Messi-Argentina-2022-FIFA-World-Cup_%28cropped%29.jpg";
const RONALDO_AVATAR: &str =
    "https://upload.wikimedia.org/wikipedia/commons/8/8c/Cristiano_Ronaldo_2018.jpg";

/// Literal profile and score served for an override key
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileOverride {
    pub key: &'static str,
    pub username: &'static str,
    pub avatar_url: &'static str,
    pub name: &'static str,
    pub bio: &'static str,
    pub followers: u64,
    pub public_repos: u64,
    pub total_stars: u64,
    pub total_commits: u64,
    pub active_days: u32,
    pub years_on_platform: f64,
    pub final_score: f64,
}

const GOAT_FOLLOWERS: u64 = 99_999_999;
const GOAT_REPOS: u64 = 999;

static OVERRIDES: &[ProfileOverride] = &[
    ProfileOverride {
        key: "messi",
        username: "messi",
        avatar_url: MESSI_AVATAR,
        name: "Lionel Messi",
        bio: "O G.O.A.T. 🐐 | 8x Bola de Ouro",
        followers: GOAT_FOLLOWERS,
        public_repos: GOAT_REPOS,
        total_stars: GOAT_FOLLOWERS,
        total_commits: GOAT_FOLLOWERS,
        active_days: 365,
        years_on_platform: 20.0,
        final_score: 10.0,
    },
    ProfileOverride {
        key: "cristiano ronaldo",
        username: "cristiano",
        avatar_url: RONALDO_AVATAR,
        name: "Cristiano Ronaldo",
        bio: "O G.O.A.T. 🤖 | Siuuuu!",
        followers: GOAT_FOLLOWERS,
        public_repos: GOAT_REPOS,
        total_stars: GOAT_FOLLOWERS,
        total_commits: GOAT_FOLLOWERS,
        active_days: 365,
        years_on_platform: 22.0,
        final_score: 10.0,
    },
    ProfileOverride {
        key: "cr7",
        username: "cr7",
        avatar_url: RONALDO_AVATAR,
        name: "Cristiano Ronaldo",
        bio: "O G.O.A.T. 🤖 | Siuuuu!",
        followers: GOAT_FOLLOWERS,
        public_repos: GOAT_REPOS,
        total_stars: GOAT_FOLLOWERS,
        total_commits: GOAT_FOLLOWERS,
        active_days: 365,
        years_on_platform: 22.0,
        final_score: 10.0,
    },
];

/// Normalize a requested username the same way override keys are stored
pub fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}

/// Find the override for a username, if any
pub fn find_override(username: &str) -> Option<&'static ProfileOverride> {
    let normalized = normalize_username(username);
    OVERRIDES.iter().find(|o| o.key == normalized)
}

impl ProfileOverride {
    /// Build the stats response for this profile; the rating match is
    /// resolved by the caller.
    pub fn to_response(&self) -> StatsResponse {
        StatsResponse {
            username: self.username.to_string(),
            avatar_url: Some(self.avatar_url.to_string()),
            name: Some(self.name.to_string()),
            bio: Some(self.bio.to_string()),
            followers: self.followers,
            public_repos: self.public_repos,
            total_stars: self.total_stars,
            total_commits: self.total_commits,
            active_days: self.active_days,
            years_on_github: format!("{:.1}", self.years_on_platform),
            final_score: format!("{:.1}", self.final_score),
            sofascore_match: None,
            breakdown: None,
        }
    }
}
