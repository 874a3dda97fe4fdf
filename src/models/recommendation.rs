use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

use crate::error::AppError;

/// Recommendation strategy picked by the caller
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Global ranking by average rating, then rating count
    RankBased,
    /// Top predicted ratings from the user's row of the prediction matrix
    UserBasedCf,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::RankBased => "rank_based",
            Algorithm::UserBasedCf => "user_based_cf",
        }
    }

    /// Human readable label used by the HTML form
    pub fn label(&self) -> &'static str {
        match self {
            Algorithm::RankBased => "Rank-Based",
            Algorithm::UserBasedCf => "User-Based Collaborative Filtering",
        }
    }

    pub fn all() -> [Algorithm; 2] {
        [Algorithm::RankBased, Algorithm::UserBasedCf]
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "rank_based" | "rank-based" => Ok(Algorithm::RankBased),
            "user_based_cf" | "user-based-cf" => Ok(Algorithm::UserBasedCf),
            other => Err(AppError::InvalidAlgorithm(other.to_string())),
        }
    }
}

/// Validated parameters for a single recommendation call
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationQuery {
    pub algorithm: Algorithm,
    pub user_id: Option<String>,
    pub num_recommendations: usize,
}

/// JSON body for `POST /api/v1/recommendations`
#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub algorithm: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub num_recommendations: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResponse {
    pub algorithm: Algorithm,
    pub user_id: Option<String>,
    pub recommendations: Vec<String>,
}

/// Shape of the loaded data, for operators
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct DataSummary {
    pub product_count: usize,
    pub user_count: usize,
    pub predicted_product_count: usize,
    pub loaded_at: DateTime<Utc>,
}
