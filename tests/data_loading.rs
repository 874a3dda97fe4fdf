use std::path::PathBuf;

use product_recs::{
    data::{CsvDataSource, RecommendationData},
    error::{LoadError, RecommendError},
    services::{select_rank_based, select_user_based},
};

fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

fn load_bundled() -> RecommendationData {
    let source = CsvDataSource::new(
        data_path("product_avg_ratings.csv"),
        data_path("predicted_ratings_matrix.csv"),
    );
    RecommendationData::load(&source).unwrap()
}

#[test]
fn test_bundled_data_loads() {
    let data = load_bundled();
    assert_eq!(data.product_ratings.len(), 12);
    assert_eq!(data.predictions.user_count(), 4);
    assert_eq!(data.predictions.column_count(), 8);
}

#[test]
fn test_bundled_rank_based() {
    let data = load_bundled();
    assert_eq!(
        select_rank_based(&data.product_ratings, 3),
        vec!["B003ES5ZUU", "B007WTAJTO", "B000N99BBC"]
    );
}

#[test]
fn test_bundled_user_based() {
    let data = load_bundled();

    assert_eq!(
        select_user_based(&data.predictions, "A3OXHLG6DIBRW8", 3).unwrap(),
        vec!["B000N99BBC", "B007WTAJTO", "B001TH7GUU"]
    );
    assert_eq!(
        select_user_based(&data.predictions, 42, 2).unwrap(),
        vec!["B000N99BBC", "B007WTAJTO"]
    );
}

#[test]
fn test_bundled_missing_cell_is_skipped() {
    let data = load_bundled();
    let all = select_user_based(&data.predictions, "A1ODOGXEYECQQ8", 20).unwrap();
    assert_eq!(all.len(), 7);
    assert!(!all.contains(&"B007WTAJTO".to_string()));
}

#[test]
fn test_bundled_unknown_user() {
    let data = load_bundled();
    assert_eq!(
        select_user_based(&data.predictions, "999", 5),
        Err(RecommendError::UserNotFound("999".to_string()))
    );
}

#[test]
fn test_missing_file_fails_load() {
    let source = CsvDataSource::new(
        data_path("product_avg_ratings.csv"),
        data_path("does_not_exist.csv"),
    );
    assert!(matches!(
        RecommendationData::load(&source),
        Err(LoadError::Io { .. })
    ));
}
