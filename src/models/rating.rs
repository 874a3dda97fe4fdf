use serde::{Deserialize, Serialize};

/// One row of the per-product aggregate rating table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRating {
    #[serde(alias = "prod_id")]
    pub product_id: String,
    #[serde(alias = "avg_rating")]
    pub average_rating: f64,
    pub rating_count: u64,
}

impl ProductRating {
    pub fn new(product_id: impl Into<String>, average_rating: f64, rating_count: u64) -> Self {
        Self {
            product_id: product_id.into(),
            average_rating,
            rating_count,
        }
    }
}

/// Aggregate rating table in file order
///
/// Duplicate product ids are kept as separate rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateRatingTable {
    rows: Vec<ProductRating>,
}

impl AggregateRatingTable {
    pub fn new(rows: Vec<ProductRating>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ProductRating] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<Vec<ProductRating>> for AggregateRatingTable {
    fn from(rows: Vec<ProductRating>) -> Self {
        Self::new(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_original_column_names() {
        let json = r#"{"prod_id": "B001", "avg_rating": 4.5, "rating_count": 12}"#;
        let row: ProductRating = serde_json::from_str(json).unwrap();
        assert_eq!(row, ProductRating::new("B001", 4.5, 12));
    }

    #[test]
    fn test_table_keeps_duplicates() {
        let table = AggregateRatingTable::from(vec![
            ProductRating::new("P1", 4.0, 1),
            ProductRating::new("P1", 3.0, 2),
        ]);
        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
    }
}
