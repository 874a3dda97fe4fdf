use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::{
    data::DataSource,
    error::LoadError,
    models::{AggregateRatingTable, PredictionMatrix, PredictionRow, ProductRating},
};

/// Column names accepted for each aggregate table field
const PRODUCT_ID_COLUMNS: [&str; 2] = ["product_id", "prod_id"];
const AVERAGE_RATING_COLUMNS: [&str; 2] = ["average_rating", "avg_rating"];
const RATING_COUNT_COLUMNS: [&str; 1] = ["rating_count"];

/// Reads both rating artifacts from CSV files on disk
#[derive(Debug, Clone)]
pub struct CsvDataSource {
    product_ratings_path: PathBuf,
    predicted_ratings_path: PathBuf,
}

impl CsvDataSource {
    pub fn new(
        product_ratings_path: impl Into<PathBuf>,
        predicted_ratings_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            product_ratings_path: product_ratings_path.into(),
            predicted_ratings_path: predicted_ratings_path.into(),
        }
    }
}

impl DataSource for CsvDataSource {
    fn load_product_ratings(&self) -> Result<AggregateRatingTable, LoadError> {
        let file = open(&self.product_ratings_path)?;
        parse_product_ratings(file, &self.product_ratings_path.display().to_string())
    }

    fn load_predictions(&self) -> Result<PredictionMatrix, LoadError> {
        let file = open(&self.predicted_ratings_path)?;
        parse_prediction_matrix(file, &self.predicted_ratings_path.display().to_string())
    }

    fn describe(&self) -> String {
        format!(
            "csv:{},{}",
            self.product_ratings_path.display(),
            self.predicted_ratings_path.display()
        )
    }
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn read_headers<R: Read>(reader: &mut csv::Reader<R>, path: &str) -> Result<StringRecord, LoadError> {
    reader
        .headers()
        .map(|h| h.clone())
        .map_err(|source| LoadError::Csv {
            path: path.to_string(),
            source,
        })
}

fn record_line(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or_default()
}

/// Parses the aggregate table: `product_id`, `average_rating`, `rating_count`.
///
/// The original column names `prod_id` and `avg_rating` are accepted too.
/// Extra columns are ignored.
pub fn parse_product_ratings<R: Read>(
    input: R,
    path: &str,
) -> Result<AggregateRatingTable, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(input);

    let headers = read_headers(&mut reader, path)?;

    for accepted in [
        &PRODUCT_ID_COLUMNS[..],
        &AVERAGE_RATING_COLUMNS[..],
        &RATING_COUNT_COLUMNS[..],
    ] {
        if !headers.iter().any(|h| accepted.contains(&h)) {
            return Err(LoadError::MissingColumn {
                path: path.to_string(),
                column: accepted[0].to_string(),
            });
        }
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| LoadError::Csv {
            path: path.to_string(),
            source,
        })?;

        let row: ProductRating =
            record
                .deserialize(Some(&headers))
                .map_err(|source| LoadError::Csv {
                    path: path.to_string(),
                    source,
                })?;

        if !row.average_rating.is_finite() {
            return Err(LoadError::InvalidValue {
                path: path.to_string(),
                line: record_line(&record),
                field: "average_rating".to_string(),
                value: row.average_rating.to_string(),
            });
        }

        rows.push(row);
    }

    tracing::debug!(path = %path, rows = rows.len(), "Parsed product ratings");

    Ok(AggregateRatingTable::new(rows))
}

/// Parses the prediction matrix.
///
/// The first column holds the user id whatever its header says. Every other
/// header is a product id. Empty and NaN cells are kept as missing
/// predictions.
pub fn parse_prediction_matrix<R: Read>(
    input: R,
    path: &str,
) -> Result<PredictionMatrix, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(input);

    let headers = read_headers(&mut reader, path)?;
    let products: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

    if products.is_empty() {
        return Err(LoadError::NoProducts {
            path: path.to_string(),
        });
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        // Records narrower or wider than the header are rejected by the reader
        let record = result.map_err(|source| LoadError::Csv {
            path: path.to_string(),
            source,
        })?;

        let mut fields = record.iter();
        let user_id = fields.next().unwrap_or_default().to_string();

        let ratings = fields
            .zip(products.iter())
            .map(|(cell, product)| {
                parse_cell(cell).ok_or_else(|| LoadError::InvalidValue {
                    path: path.to_string(),
                    line: record_line(&record),
                    field: product.clone(),
                    value: cell.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        rows.push(PredictionRow::new(user_id, ratings));
    }

    tracing::debug!(
        path = %path,
        users = rows.len(),
        products = products.len(),
        "Parsed prediction matrix"
    );

    Ok(PredictionMatrix::new(products, rows))
}

/// `Some(None)` for a missing prediction, `None` for garbage
fn parse_cell(cell: &str) -> Option<Option<f64>> {
    if cell.is_empty() {
        return Some(None);
    }

    match cell.parse::<f64>() {
        Ok(value) if value.is_nan() => Some(None),
        Ok(value) if value.is_finite() => Some(Some(value)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_product_ratings() {
        let csv = "product_id,average_rating,rating_count\nP1,4.5,10\nP2,4.5,20\nP3,4.0,100\n";
        let table = parse_product_ratings(csv.as_bytes(), "ratings.csv").unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.rows()[1], ProductRating::new("P2", 4.5, 20));
    }

    #[test]
    fn test_parse_product_ratings_original_names_and_index_column() {
        let csv = ",prod_id,avg_rating,rating_count\n0,B00A,5.0,3\n1,B00B,3.25,40\n";
        let table = parse_product_ratings(csv.as_bytes(), "ratings.csv").unwrap();

        assert_eq!(
            table.rows(),
            &[
                ProductRating::new("B00A", 5.0, 3),
                ProductRating::new("B00B", 3.25, 40),
            ]
        );
    }

    #[test]
    fn test_parse_product_ratings_missing_column() {
        let csv = "product_id,average_rating\nP1,4.5\n";
        let err = parse_product_ratings(csv.as_bytes(), "ratings.csv").unwrap_err();

        assert!(matches!(
            err,
            LoadError::MissingColumn { ref column, .. } if column == "rating_count"
        ));
    }

    #[test]
    fn test_parse_product_ratings_bad_number() {
        let csv = "product_id,average_rating,rating_count\nP1,great,10\n";
        let err = parse_product_ratings(csv.as_bytes(), "ratings.csv").unwrap_err();
        assert!(matches!(err, LoadError::Csv { .. }));
    }

    #[test]
    fn test_parse_product_ratings_rejects_nan_average() {
        let csv = "product_id,average_rating,rating_count\nP1,NaN,10\n";
        let err = parse_product_ratings(csv.as_bytes(), "ratings.csv").unwrap_err();
        assert!(matches!(err, LoadError::InvalidValue { line: 2, .. }));
    }

    #[test]
    fn test_parse_prediction_matrix() {
        let csv = "user_id,P1,P2,P3\n42,3.1,4.9,4.9\n7,,1.0,nan\n";
        let matrix = parse_prediction_matrix(csv.as_bytes(), "pred.csv").unwrap();

        assert_eq!(matrix.products(), &["P1", "P2", "P3"]);
        assert_eq!(matrix.user_count(), 2);
        assert_eq!(
            matrix.rows_for("42")[0].ratings,
            vec![Some(3.1), Some(4.9), Some(4.9)]
        );
        assert_eq!(matrix.rows_for("7")[0].ratings, vec![None, Some(1.0), None]);
    }

    #[test]
    fn test_parse_prediction_matrix_blank_index_header() {
        let csv = ",P1\n 42 ,2.0\n";
        let matrix = parse_prediction_matrix(csv.as_bytes(), "pred.csv").unwrap();
        assert!(matrix.contains_user("42"));
    }

    #[test]
    fn test_parse_prediction_matrix_ragged_row() {
        let csv = "user_id,P1,P2\n42,3.1\n";
        let err = parse_prediction_matrix(csv.as_bytes(), "pred.csv").unwrap_err();
        assert!(matches!(err, LoadError::Csv { .. }));
    }

    #[test]
    fn test_parse_prediction_matrix_bad_cell() {
        let csv = "user_id,P1,P2\n42,3.1,high\n";
        let err = parse_prediction_matrix(csv.as_bytes(), "pred.csv").unwrap_err();

        assert!(matches!(
            err,
            LoadError::InvalidValue { ref field, ref value, line: 2, .. }
                if field == "P2" && value == "high"
        ));
    }

    #[test]
    fn test_parse_prediction_matrix_without_products() {
        let csv = "user_id\n42\n";
        let err = parse_prediction_matrix(csv.as_bytes(), "pred.csv").unwrap_err();
        assert!(matches!(err, LoadError::NoProducts { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = CsvDataSource::new("/nonexistent/ratings.csv", "/nonexistent/pred.csv");
        let err = source.load_product_ratings().unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
