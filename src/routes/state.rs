use std::sync::Arc;

use crate::{data::RecommendationData, services::RecommendationLimits};

/// Shared application state
///
/// The rating data is read-only after startup, so it is shared through an
/// `Arc` without a lock.
#[derive(Clone)]
pub struct AppState {
    pub data: Arc<RecommendationData>,
    pub limits: RecommendationLimits,
}

impl AppState {
    pub fn new(data: RecommendationData, limits: RecommendationLimits) -> Self {
        Self {
            data: Arc::new(data),
            limits,
        }
    }
}
