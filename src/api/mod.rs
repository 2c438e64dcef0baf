pub use handlers::{
    compute_stats, default_rules, evaluate_trophies, finalize_game, preview_game,
    trophy_catalogue,
};
pub use types::{
    HistoryRequest, PreviewRequest, StatsResponse, TrophiesRequest, TrophiesResponse,
    TrophyDefinition,
};

mod handlers;
mod types;

use axum::{
    routing::{get, post},
    Router,
};

use crate::shared::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/stats", post(compute_stats))
        .route("/trophies", post(evaluate_trophies))
        .route("/trophies/catalogue", get(trophy_catalogue))
        .route("/games/preview", post(preview_game))
        .route("/games/finalize", post(finalize_game))
        .route("/rules/default", get(default_rules))
        .with_state(state)
}
