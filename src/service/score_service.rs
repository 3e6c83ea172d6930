use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::anticheat::{analyze_gameplay, verify_checksum, AnomalyFlag};
use crate::api_error::ApiError;
use crate::games::GameRegistry;
use crate::models::{LeaderboardEntry, SubmitScoreRequest, SubmitScoreResponse};
use crate::store::{CompleteSessionError, MemoryStore};

/// A submission is rejected outright when analysis raises more flags than
/// this, or pushes confidence past `MAX_ACCEPTED_CONFIDENCE`.
const MAX_ACCEPTED_FLAGS: usize = 2;
const MAX_ACCEPTED_CONFIDENCE: f64 = 0.6;

/// Score Submission Coordinator: validates the session, checks integrity,
/// runs anomaly detection, and updates score records and leaderboards.
///
/// Every failure is terminal for that submission. Flag-history appends made
/// along the way are evidence, not side effects, and are never rolled back.
pub struct ScoreService {
    store: Arc<MemoryStore>,
    games: Arc<GameRegistry>,
}

impl ScoreService {
    pub fn new(store: Arc<MemoryStore>, games: Arc<GameRegistry>) -> Self {
        Self { store, games }
    }

    pub async fn submit_score(
        &self,
        player: &str,
        request: SubmitScoreRequest,
    ) -> Result<SubmitScoreResponse, ApiError> {
        let data = request.game_data;

        // Step 1: the game must be configured.
        if !self.games.contains(&data.game_id) {
            return Err(ApiError::InvalidGame(data.game_id));
        }

        // Steps 2-5: session exists, belongs to this player, is still open.
        let session = self
            .store
            .get_session(data.session_id)
            .await
            .ok_or(ApiError::SessionNotFound)?;

        if session.player != player {
            return Err(ApiError::SessionOwnershipMismatch);
        }
        if session.is_completed() {
            return Err(ApiError::SessionAlreadyCompleted);
        }
        let now = Utc::now();
        if session.is_expired(now) {
            return Err(ApiError::SessionExpired);
        }

        // Step 6: integrity before statistics. A tampered log must not feed
        // the anomaly detector.
        if !verify_checksum(&data.inputs, data.seed, &data.checksum)? {
            self.flag_account(
                player,
                vec![AnomalyFlag::ChecksumMismatch.to_string()],
                &data.game_id,
                data.session_id,
            )
            .await;
            return Err(ApiError::InvalidChecksum);
        }

        // Step 7: statistical analysis against per-game bounds.
        let analysis = analyze_gameplay(
            self.games.as_ref(),
            &data.game_id,
            &data.inputs,
            data.final_score,
            data.duration,
        );
        if analysis.flags.len() > MAX_ACCEPTED_FLAGS || analysis.confidence > MAX_ACCEPTED_CONFIDENCE
        {
            self.flag_account(
                player,
                analysis.flags.iter().map(|f| f.to_string()).collect(),
                &data.game_id,
                data.session_id,
            )
            .await;
            return Err(ApiError::ScoreValidationFailed);
        }

        // The claimed score is trusted once the checks pass; deterministic
        // replay from (seed, inputs) is the intended end-state and this
        // detector its defense-in-depth layer.
        let verified_score = data.final_score;

        // Step 8: completion is a compare-and-set; of two racing
        // submissions only the first to observe an open session wins.
        let session = self
            .store
            .complete_session(data.session_id, verified_score, now)
            .await
            .map_err(|e| match e {
                CompleteSessionError::NotFound => ApiError::SessionNotFound,
                CompleteSessionError::AlreadyCompleted => ApiError::SessionAlreadyCompleted,
            })?;

        info!(
            session_id = %session.id,
            player = %player,
            game_id = %data.game_id,
            score = verified_score,
            mode = %session.mode,
            "Score accepted"
        );

        let flags = (!analysis.flags.is_empty()).then(|| analysis.flags.clone());

        // Step 9: free play never touches rankings.
        if session.mode == crate::models::GameMode::Free {
            return Ok(SubmitScoreResponse {
                success: true,
                verified: true,
                score: verified_score,
                new_best: false,
                rank: None,
                flags,
            });
        }

        // Steps 10-11: fold into the score record; on a new best, rebuild
        // the leaderboard tiers.
        let username = self
            .store
            .username(player)
            .await
            .unwrap_or_else(|| player.chars().take(8).collect());

        let update = self
            .store
            .apply_score(player, &username, &data.game_id, verified_score, now)
            .await;

        let mut rank = None;
        if update.new_best {
            let entry = LeaderboardEntry {
                player_id: player.to_string(),
                username,
                score: verified_score,
                timestamp: now,
            };
            let position = self
                .store
                .update_leaderboard(&data.game_id, entry, now)
                .await;
            if position > 0 {
                rank = Some(position as u32);
            }
            info!(
                player = %player,
                game_id = %data.game_id,
                score = verified_score,
                rank = ?rank,
                "New best score"
            );
        }

        Ok(SubmitScoreResponse {
            success: true,
            verified: true,
            score: verified_score,
            new_best: update.new_best,
            rank,
            flags,
        })
    }

    /// Durably record anomaly evidence against the player. Deliberately not
    /// transactional with the rejection: a flag survives the failed request.
    async fn flag_account(
        &self,
        player: &str,
        reasons: Vec<String>,
        game_id: &str,
        session_id: Uuid,
    ) {
        let history = self
            .store
            .record_flags(player, reasons.clone(), Utc::now())
            .await;
        warn!(
            player = %player,
            game_id = %game_id,
            session_id = %session_id,
            reasons = %reasons.join(", "),
            total_flags = history.count,
            "Account flagged"
        );
    }
}
