use actix_web::{web, HttpResponse, Responder};
use tracing::info;

use crate::api_error::ApiError;
use crate::auth::PlayerIdentity;
use crate::http::AppState;
use crate::models::CreateSessionRequest;

/// POST /api/session
/// Issue a fresh play session (id, seed, expiry) for an authenticated player.
pub async fn create_session(
    state: web::Data<AppState>,
    player: PlayerIdentity,
    req: web::Json<CreateSessionRequest>,
) -> Result<impl Responder, ApiError> {
    info!(
        player = %player.as_str(),
        game_id = %req.game_id,
        mode = %req.mode,
        "Received create session request"
    );

    let response = state
        .session_service
        .create_session(player.as_str(), req.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::PLAYER_HEADER;
    use crate::games::GameRegistry;
    use crate::models::CreateSessionResponse;
    use crate::service::{ScoreService, SessionService};
    use crate::store::MemoryStore;
    use actix_web::{test, App};
    use std::sync::Arc;

    fn app_state() -> web::Data<AppState> {
        let store = Arc::new(MemoryStore::new());
        let games = Arc::new(GameRegistry::with_builtin_games());
        web::Data::new(AppState {
            session_service: Arc::new(SessionService::new(store.clone(), games.clone(), 30)),
            score_service: Arc::new(ScoreService::new(store.clone(), games.clone())),
            store,
            games,
        })
    }

    #[actix_web::test]
    async fn create_session_round_trip() {
        let app = test::init_service(
            App::new()
                .app_data(app_state())
                .route("/api/session", web::post().to(create_session)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/session")
            .insert_header((PLAYER_HEADER, "0xAlice"))
            .set_json(serde_json::json!({ "gameId": "pixel-snake", "mode": "ranked" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);

        let body: CreateSessionResponse = test::read_body_json(resp).await;
        assert!(body.seed < crate::engine::SEED_RANGE);
    }

    #[actix_web::test]
    async fn create_session_requires_identity() {
        let app = test::init_service(
            App::new()
                .app_data(app_state())
                .route("/api/session", web::post().to(create_session)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/session")
            .set_json(serde_json::json!({ "gameId": "pixel-snake", "mode": "ranked" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn unknown_game_maps_to_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(app_state())
                .route("/api/session", web::post().to(create_session)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/session")
            .insert_header((PLAYER_HEADER, "0xalice"))
            .set_json(serde_json::json!({ "gameId": "poker", "mode": "ranked" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
