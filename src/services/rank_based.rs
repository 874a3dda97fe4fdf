use std::cmp::Ordering;

use crate::models::{AggregateRatingTable, ProductRating};

/// Returns the top `n` product ids by global rating
///
/// Products are ordered by average rating, highest first, then by rating
/// count, highest first. Rows that tie on both keep their table order.
/// `n == 0` yields an empty list.
pub fn select_rank_based(table: &AggregateRatingTable, n: usize) -> Vec<String> {
    if n == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<&ProductRating> = table.rows().iter().collect();
    // Vec::sort_by is stable
    ranked.sort_by(|a, b| compare(b, a));

    ranked
        .into_iter()
        .take(n)
        .map(|row| row.product_id.clone())
        .collect()
}

fn compare(a: &ProductRating, b: &ProductRating) -> Ordering {
    // partial_cmp treats -0.0 and 0.0 as equal; averages are always finite
    a.average_rating
        .partial_cmp(&b.average_rating)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.rating_count.cmp(&b.rating_count))
}
