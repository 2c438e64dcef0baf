use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Utc;
use std::collections::BTreeMap;
use tracing::{info, instrument};
use uuid::Uuid;

use super::types::{
    HistoryRequest, PreviewRequest, StatsResponse, TrophiesRequest, TrophiesResponse,
    TrophyDefinition,
};
use crate::league::{
    day_timeline, game_years, leaderboard, point_history, trophies::CATALOGUE, GameForm,
    GameFormValidator, GameRecord, PlayerId, PlayerStats, RuleSettings, StatsAggregator,
    TrophyEvaluator, ValidatedForm, ValidationMode,
};
use crate::shared::{AppError, AppState};

fn aggregate(history: &HistoryRequest) -> (Vec<GameRecord>, BTreeMap<PlayerId, PlayerStats>) {
    let games = history.period.filter(&history.games);
    let stats = StatsAggregator::new(&history.players).aggregate(&games);
    (games, stats)
}

/// POST /stats
#[instrument(name = "compute_stats", skip_all)]
pub async fn compute_stats(
    payload: Result<Json<HistoryRequest>, JsonRejection>,
) -> Result<Json<StatsResponse>, AppError> {
    let Json(history) = payload?;
    let (games, stats) = aggregate(&history);

    let timeline = day_timeline(&games);
    let point_history = stats
        .keys()
        .map(|id| (id.clone(), point_history(id, &games, &timeline)))
        .collect();
    let response = StatsResponse {
        leaderboard: leaderboard(&stats).into_iter().map(|p| p.id.clone()).collect(),
        years: game_years(&history.games),
        timeline,
        point_history,
        stats,
    };

    info!(
        period = ?history.period,
        games = games.len(),
        players = response.stats.len(),
        "Computed stats"
    );
    Ok(Json(response))
}

/// POST /trophies
#[instrument(name = "evaluate_trophies", skip_all)]
pub async fn evaluate_trophies(
    State(state): State<AppState>,
    payload: Result<Json<TrophiesRequest>, JsonRejection>,
) -> Result<Json<TrophiesResponse>, AppError> {
    let Json(request) = payload?;
    let options = request.options.unwrap_or(state.config.trophy_options);
    let (games, stats) = aggregate(&request.history);

    let trophies = TrophyEvaluator::new(options).evaluate(&games, &stats);

    info!(
        games = games.len(),
        players = trophies.len(),
        award_policy = options.distributional_award.as_ref(),
        "Evaluated trophies"
    );
    Ok(Json(TrophiesResponse { trophies }))
}

/// POST /games/preview
///
/// Settles whatever is complete so far; incomplete hands are skipped.
#[instrument(name = "preview_game", skip_all)]
pub async fn preview_game(
    State(state): State<AppState>,
    payload: Result<Json<PreviewRequest>, JsonRejection>,
) -> Result<Json<ValidatedForm>, AppError> {
    let Json(request) = payload?;
    let rules = request
        .rules
        .unwrap_or_else(|| state.config.default_rules.clone());

    let form = GameFormValidator::new(&rules, ValidationMode::Lenient).validate(&request.hands)?;

    info!(
        settled = form.hands.len(),
        skipped = form.skipped.len(),
        "Previewed game form"
    );
    Ok(Json(form))
}

/// POST /games/finalize
///
/// Returns the record to persist, with a fresh id and creation time.
#[instrument(name = "finalize_game", skip_all)]
pub async fn finalize_game(
    payload: Result<Json<GameForm>, JsonRejection>,
) -> Result<Json<GameRecord>, AppError> {
    let Json(form) = payload?;
    let record = form.finalize(Uuid::new_v4().to_string(), Utc::now())?;

    info!(
        game_id = %record.id,
        date = %record.date,
        hands = record.hands.len(),
        "Finalized game"
    );
    Ok(Json(record))
}

/// GET /trophies/catalogue
pub async fn trophy_catalogue() -> Json<Vec<TrophyDefinition>> {
    Json(
        CATALOGUE
            .iter()
            .map(|rule| TrophyDefinition {
                id: rule.id,
                tier: rule.tier,
                secret: rule.secret,
            })
            .collect(),
    )
}

/// GET /rules/default
pub async fn default_rules(State(state): State<AppState>) -> Json<RuleSettings> {
    Json(state.config.default_rules.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::{get, post},
        Router,
    };
    use tower::ServiceExt; // for `oneshot`

    #[tokio::test]
    async fn test_trophy_catalogue_handler() {
        let app = Router::new()
            .route("/trophies/catalogue", get(trophy_catalogue))
            .with_state(AppState::default());

        let request = Request::builder()
            .method("GET")
            .uri("/trophies/catalogue")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let catalogue: Vec<TrophyDefinition> = serde_json::from_slice(&body).unwrap();
        assert_eq!(catalogue.len(), CATALOGUE.len());
        assert_eq!(catalogue[0].id, crate::league::TrophyId::FirstGame);
    }

    #[tokio::test]
    async fn test_preview_rejects_malformed_json() {
        let app = Router::new()
            .route("/games/preview", post(preview_game))
            .with_state(AppState::default());

        let request = Request::builder()
            .method("POST")
            .uri("/games/preview")
            .header("content-type", "application/json")
            .body(Body::from("{\"hands\": 3}"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
