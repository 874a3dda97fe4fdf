use axum::{extract::State, Extension, Json};

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::{RecommendationRequest, RecommendationResponse},
    routes::AppState,
    services::recommendations,
};

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    tracing::info!(
        request_id = %request_id,
        algorithm = %request.algorithm,
        "Processing recommendation request"
    );

    let query = recommendations::build_query(
        &request.algorithm,
        request.user_id.as_deref(),
        request.num_recommendations,
        state.limits,
    )?;

    let recommendations = recommendations::recommend(&state.data, &query)?;

    Ok(Json(RecommendationResponse {
        algorithm: query.algorithm,
        user_id: query.user_id,
        recommendations,
    }))
}
