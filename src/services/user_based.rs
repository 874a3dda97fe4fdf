use std::{cmp::Ordering, fmt::Display};

use crate::{error::RecommendError, models::PredictionMatrix};

/// Returns the `n` products with the highest predicted rating for a user
///
/// `user_id` is matched against the matrix row keys as a string, with
/// surrounding whitespace removed. `UserNotFound` carries the id exactly as
/// given. Equal predictions keep column order.
/// Missing predictions are never recommended.
pub fn select_user_based(
    matrix: &PredictionMatrix,
    user_id: impl Display,
    n: usize,
) -> Result<Vec<String>, RecommendError> {
    let requested = user_id.to_string();
    let key = requested.trim();

    if !matrix.contains_user(key) {
        return Err(RecommendError::UserNotFound(requested));
    }

    let rows = matrix.rows_for(key);
    let row = match rows.as_slice() {
        [row] => *row,
        _ => {
            return Err(RecommendError::LookupFailure(format!(
                "user id {} matches {} rows",
                key,
                rows.len()
            )))
        }
    };

    if row.ratings.len() != matrix.column_count() {
        return Err(RecommendError::LookupFailure(format!(
            "row for user {} has {} values but the matrix has {} products",
            key,
            row.ratings.len(),
            matrix.column_count()
        )));
    }

    let mut scored: Vec<(usize, f64)> = row
        .ratings
        .iter()
        .enumerate()
        .filter_map(|(column, &rating)| rating.filter(|r| !r.is_nan()).map(|r| (column, r)))
        .collect();
    // NaN is filtered above, so partial_cmp only sees comparable values and
    // keeps -0.0 equal to 0.0
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let products = matrix.products();
    Ok(scored
        .into_iter()
        .take(n)
        .map(|(column, _)| products[column].clone())
        .collect())
}
