pub mod rank_based;
pub mod recommendations;
pub mod user_based;

pub use rank_based::select_rank_based;
pub use recommendations::{build_query, recommend, RecommendationLimits};
pub use user_based::select_user_based;
