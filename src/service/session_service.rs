use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::Rng;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::api_error::ApiError;
use crate::engine::SEED_RANGE;
use crate::games::GameRegistry;
use crate::models::{
    CreateSessionRequest, CreateSessionResponse, GameMode, Session, TournamentStatus,
};
use crate::store::MemoryStore;

/// Session Manager: issues and tracks play sessions, one per game attempt.
///
/// Lifecycle per session: created -> completed | expired, one-way. There is
/// no resume or cancel; a player who outlives the TTL requests a new
/// session and therefore a new seed.
pub struct SessionService {
    store: Arc<MemoryStore>,
    games: Arc<GameRegistry>,
    session_ttl: Duration,
}

impl SessionService {
    pub fn new(store: Arc<MemoryStore>, games: Arc<GameRegistry>, ttl_minutes: i64) -> Self {
        Self {
            store,
            games,
            session_ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// Create a session bound to a player, game, mode and a fresh seed.
    pub async fn create_session(
        &self,
        player: &str,
        request: CreateSessionRequest,
    ) -> Result<CreateSessionResponse, ApiError> {
        request
            .validate()
            .map_err(|e| ApiError::validation_error(e.to_string()))?;

        if !self.games.contains(&request.game_id) {
            return Err(ApiError::InvalidGame(request.game_id));
        }

        let mode = GameMode::parse(&request.mode)
            .ok_or_else(|| ApiError::InvalidMode(request.mode.clone()))?;

        if mode == GameMode::Tournament {
            let tournament_id = request
                .tournament_id
                .as_deref()
                .ok_or(ApiError::TournamentNotFound)?;
            let tournament = self
                .store
                .get_tournament(tournament_id)
                .await
                .ok_or(ApiError::TournamentNotFound)?;
            if tournament.status != TournamentStatus::Active {
                return Err(ApiError::TournamentNotActive);
            }
        }

        let session_id = Uuid::new_v4();
        let seed: u32 = rand::thread_rng().gen_range(0..SEED_RANGE);
        let now = Utc::now();
        let expires_at = now + self.session_ttl;

        let session = Session {
            id: session_id,
            player: player.to_string(),
            game_id: request.game_id.clone(),
            mode,
            tournament_id: request.tournament_id.clone(),
            seed,
            started_at: now,
            expires_at,
            completed_at: None,
            final_score: None,
            verified: false,
        };
        self.store.insert_session(session).await;

        info!(
            session_id = %session_id,
            player = %player,
            game_id = %request.game_id,
            mode = %mode,
            "Session created"
        );

        Ok(CreateSessionResponse {
            session_id,
            seed,
            expires_at,
        })
    }
}
