use std::collections::HashMap;

/// A single user's row of predicted ratings
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRow {
    pub user_id: String,
    /// One cell per product column, `None` where no prediction exists
    pub ratings: Vec<Option<f64>>,
}

impl PredictionRow {
    pub fn new(user_id: impl Into<String>, ratings: Vec<Option<f64>>) -> Self {
        Self {
            user_id: user_id.into(),
            ratings,
        }
    }
}

/// Precomputed user-by-product predicted rating matrix
///
/// Rows are keyed by user id, columns by product id. Column order is the
/// order the products appeared in the source file.
#[derive(Debug, Clone, Default)]
pub struct PredictionMatrix {
    products: Vec<String>,
    rows: Vec<PredictionRow>,
    index: HashMap<String, Vec<usize>>,
}

impl PredictionMatrix {
    pub fn new(products: Vec<String>, rows: Vec<PredictionRow>) -> Self {
        let mut index: HashMap<String, Vec<usize>> = HashMap::with_capacity(rows.len());
        for (position, row) in rows.iter().enumerate() {
            index.entry(row.user_id.clone()).or_default().push(position);
        }

        Self {
            products,
            rows,
            index,
        }
    }

    /// Product ids in column order
    pub fn products(&self) -> &[String] {
        &self.products
    }

    pub fn column_count(&self) -> usize {
        self.products.len()
    }

    pub fn user_count(&self) -> usize {
        self.index.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn contains_user(&self, user_id: &str) -> bool {
        self.index.contains_key(user_id)
    }

    /// All rows stored under `user_id`, in file order
    pub fn rows_for(&self, user_id: &str) -> Vec<&PredictionRow> {
        self.index
            .get(user_id)
            .map(|positions| positions.iter().map(|&p| &self.rows[p]).collect())
            .unwrap_or_default()
    }
}
