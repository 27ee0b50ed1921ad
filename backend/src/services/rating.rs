//! Rating Matcher
//!
//! Pairs a composite score with a reference entity from a preloaded table of
//! one-decimal score buckets. The table is built once at startup and shared
//! read-only; lookups pick a bucket entry uniformly at random.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::models::ReferenceEntity;
use crate::services::score::format_one_decimal;

/// Errors raised while loading a rating table
#[derive(Debug, Error)]
pub enum RatingTableError {
    #[error("Failed to read ratings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse ratings file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Immutable mapping from one-decimal score key ("8.1") to reference entities
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingTable {
    buckets: HashMap<String, Vec<ReferenceEntity>>,
}

impl RatingTable {
    pub fn new(buckets: HashMap<String, Vec<ReferenceEntity>>) -> Self {
        Self { buckets }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a table from its JSON form: `{"8.1": [{...}, ...], ...}`
    pub fn from_json(json: &str) -> Result<Self, RatingTableError> {
        let buckets: HashMap<String, Vec<ReferenceEntity>> = serde_json::from_str(json)?;
        Ok(Self::new(buckets))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RatingTableError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load a table from disk, falling back to an empty table when the file
    /// is missing or malformed.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::from_path(path) {
            Ok(table) => {
                info!(
                    "Loaded {} rating buckets from {}",
                    table.bucket_count(),
                    path.display()
                );
                table
            }
            Err(e) => {
                warn!(
                    "Ratings unavailable ({}): {}. Rating matches will be empty.",
                    path.display(),
                    e
                );
                Self::empty()
            }
        }
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn bucket(&self, key: &str) -> Option<&[ReferenceEntity]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    /// Pick a random entity from the bucket matching `score`.
    ///
    /// The bucket key is `score` as rendered by [`format_one_decimal`].
    /// Returns `None` for a missing or empty bucket and for non-finite scores.
    pub fn match_rating<R: Rng + ?Sized>(
        &self,
        score: f64,
        rng: &mut R,
    ) -> Option<&ReferenceEntity> {
        if !score.is_finite() {
            return None;
        }

        let key = format_one_decimal(score);
        self.buckets.get(&key)?.choose(rng)
    }
}

/// Shared matcher holding the rating table and the random source used for
/// picks within a bucket.
#[derive(Debug, Clone)]
pub struct RatingMatcher {
    table: Arc<RatingTable>,
    rng: Arc<Mutex<StdRng>>,
}

impl RatingMatcher {
    /// Create a matcher seeded from OS entropy
    pub fn new(table: Arc<RatingTable>) -> Self {
        Self::with_rng(table, StdRng::from_entropy())
    }

    /// Create a matcher with a fixed seed for reproducible picks
    pub fn with_seed(table: Arc<RatingTable>, seed: u64) -> Self {
        Self::with_rng(table, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(table: Arc<RatingTable>, rng: StdRng) -> Self {
        Self {
            table,
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    pub fn table(&self) -> &RatingTable {
        &self.table
    }

    /// Match a score against the table, cloning the chosen entity
    pub async fn match_rating(&self, score: f64) -> Option<ReferenceEntity> {
        let mut rng = self.rng.lock().await;
        self.table.match_rating(score, &mut *rng).cloned()
    }
}
