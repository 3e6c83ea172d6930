use actix_web::{web, HttpResponse, Responder};
use tracing::info;

use crate::api_error::ApiError;
use crate::auth::PlayerIdentity;
use crate::http::AppState;
use crate::models::SubmitScoreRequest;

/// POST /api/score
/// Submit a finished play-through for verification and ranking.
pub async fn submit_score(
    state: web::Data<AppState>,
    player: PlayerIdentity,
    req: web::Json<SubmitScoreRequest>,
) -> Result<impl Responder, ApiError> {
    info!(
        player = %player.as_str(),
        session_id = %req.game_data.session_id,
        game_id = %req.game_data.game_id,
        score = req.game_data.final_score,
        "Received score submission"
    );

    let response = state
        .score_service
        .submit_score(player.as_str(), req.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}
