use axum::{extract::State, Json};

use crate::{models::DataSummary, routes::AppState};

/// Sizes and load time of the rating data being served
pub async fn summary(State(state): State<AppState>) -> Json<DataSummary> {
    Json(state.data.summary())
}
