mod matrix;
mod rating;
mod recommendation;

pub use matrix::{PredictionMatrix, PredictionRow};
pub use rating::{AggregateRatingTable, ProductRating};
pub use recommendation::{
    Algorithm, DataSummary, RecommendationQuery, RecommendationRequest, RecommendationResponse,
};
