use crate::{
    config::Config,
    data::RecommendationData,
    error::{AppError, AppResult},
    models::{Algorithm, RecommendationQuery},
    services::{rank_based::select_rank_based, user_based::select_user_based},
};

/// Bounds applied to the requested number of recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationLimits {
    pub default_count: usize,
    pub max_count: usize,
}

impl Default for RecommendationLimits {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for RecommendationLimits {
    fn from(config: &Config) -> Self {
        Self {
            default_count: config.default_num_recommendations,
            max_count: config.max_num_recommendations,
        }
    }
}

/// Validates raw presentation-layer parameters into a query
///
/// A blank `user_id` counts as absent. It is only required for
/// collaborative filtering, and is dropped for rank-based requests.
pub fn build_query(
    algorithm: &str,
    user_id: Option<&str>,
    num_recommendations: Option<i64>,
    limits: RecommendationLimits,
) -> AppResult<RecommendationQuery> {
    let algorithm: Algorithm = algorithm.parse()?;

    let num_recommendations = match num_recommendations {
        None => limits.default_count,
        Some(n) if n >= 1 && (n as u64) <= limits.max_count as u64 => n as usize,
        Some(n) => {
            return Err(AppError::InvalidInput(format!(
                "Number of recommendations must be between 1 and {}, got {}",
                limits.max_count, n
            )))
        }
    };

    let user_id = user_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string);

    let user_id = match algorithm {
        Algorithm::RankBased => None,
        Algorithm::UserBasedCf => Some(user_id.ok_or_else(|| {
            AppError::InvalidInput(
                "Please enter a User ID for Collaborative Filtering.".to_string(),
            )
        })?),
    };

    Ok(RecommendationQuery {
        algorithm,
        user_id,
        num_recommendations,
    })
}

/// Runs the selector matching the query's algorithm
pub fn recommend(data: &RecommendationData, query: &RecommendationQuery) -> AppResult<Vec<String>> {
    let n = query.num_recommendations;

    let recommendations = match query.algorithm {
        Algorithm::RankBased => select_rank_based(&data.product_ratings, n),
        Algorithm::UserBasedCf => {
            let user_id = query.user_id.as_deref().ok_or_else(|| {
                AppError::InvalidInput(
                    "Please enter a User ID for Collaborative Filtering.".to_string(),
                )
            })?;

            select_user_based(&data.predictions, user_id, n).map_err(|e| {
                tracing::info!(user_id = %user_id, error = %e, "User-based lookup failed");
                e
            })?
        }
    };

    tracing::info!(
        algorithm = %query.algorithm,
        user_id = ?query.user_id,
        requested = n,
        returned = recommendations.len(),
        "Recommendations computed"
    );

    Ok(recommendations)
}
