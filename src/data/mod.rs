//! Precomputed rating data, loaded once at startup
//!
//! Nothing in this module trains or updates a model. The aggregate rating
//! table and the predicted rating matrix are produced elsewhere and read here
//! as-is. Once built, `RecommendationData` is never mutated. It is shared by
//! every request through an `Arc`.

use chrono::{DateTime, Utc};

use crate::{
    error::LoadError,
    models::{AggregateRatingTable, DataSummary, PredictionMatrix},
};

mod csv_source;

pub use csv_source::{parse_prediction_matrix, parse_product_ratings, CsvDataSource};

/// Trait for rating data sources
///
/// Both artifacts come from the same source so a deployment can never mix
/// tables from two different exports.
#[cfg_attr(test, mockall::automock)]
pub trait DataSource: Send + Sync {
    /// Load the per-product aggregate rating table
    fn load_product_ratings(&self) -> Result<AggregateRatingTable, LoadError>;

    /// Load the user-by-product predicted rating matrix
    fn load_predictions(&self) -> Result<PredictionMatrix, LoadError>;

    /// Source description for logging
    fn describe(&self) -> String;
}

/// Immutable snapshot of everything the selectors read
#[derive(Debug, Clone)]
pub struct RecommendationData {
    pub product_ratings: AggregateRatingTable,
    pub predictions: PredictionMatrix,
    pub loaded_at: DateTime<Utc>,
}

impl RecommendationData {
    pub fn new(product_ratings: AggregateRatingTable, predictions: PredictionMatrix) -> Self {
        Self {
            product_ratings,
            predictions,
            loaded_at: Utc::now(),
        }
    }

    /// Loads both artifacts, failing on the first error
    pub fn load(source: &dyn DataSource) -> Result<Self, LoadError> {
        let description = source.describe();
        tracing::info!(source = %description, "Loading recommendation data");

        let product_ratings = source.load_product_ratings().map_err(|e| {
            tracing::error!(source = %description, error = %e, "Failed to load product ratings");
            e
        })?;

        let predictions = source.load_predictions().map_err(|e| {
            tracing::error!(source = %description, error = %e, "Failed to load prediction matrix");
            e
        })?;

        if predictions.user_count() < predictions.row_count() {
            tracing::warn!(
                rows = predictions.row_count(),
                users = predictions.user_count(),
                "Prediction matrix has duplicated user ids; lookups for them will fail"
            );
        }

        let data = Self::new(product_ratings, predictions);

        tracing::info!(
            products = data.product_ratings.len(),
            users = data.predictions.user_count(),
            predicted_products = data.predictions.column_count(),
            "Recommendation data loaded"
        );

        Ok(data)
    }

    pub fn summary(&self) -> DataSummary {
        DataSummary {
            product_count: self.product_ratings.len(),
            user_count: self.predictions.user_count(),
            predicted_product_count: self.predictions.column_count(),
            loaded_at: self.loaded_at,
        }
    }
}
