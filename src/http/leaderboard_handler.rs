use actix_web::{web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api_error::ApiError;
use crate::games::reward_for_rank;
use crate::http::AppState;
use crate::models::LeaderboardEntry;

#[derive(Debug, Serialize)]
pub struct RankedEntry {
    pub rank: u32,
    #[serde(rename = "playerId")]
    pub player_id: String,
    pub username: String,
    pub score: u64,
    pub timestamp: DateTime<Utc>,
    /// Daily token payout for this rank; only the daily tier pays out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    #[serde(rename = "gameId")]
    pub game_id: String,
    #[serde(rename = "lastUpdated")]
    pub last_updated: Option<DateTime<Utc>>,
    pub daily: Vec<RankedEntry>,
    pub weekly: Vec<RankedEntry>,
    #[serde(rename = "allTime")]
    pub all_time: Vec<RankedEntry>,
}

fn ranked(entries: &[LeaderboardEntry], with_rewards: bool) -> Vec<RankedEntry> {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let rank = (i + 1) as u32;
            RankedEntry {
                rank,
                player_id: e.player_id.clone(),
                username: e.username.clone(),
                score: e.score,
                timestamp: e.timestamp,
                reward: with_rewards.then(|| reward_for_rank(rank)),
            }
        })
        .collect()
}

/// GET /api/leaderboard/{game_id}
/// Read the three leaderboard tiers; daily entries carry their reward tier.
pub async fn get_leaderboard(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let game_id = path.into_inner();

    if !state.games.contains(&game_id) {
        return Err(ApiError::InvalidGame(game_id));
    }

    let board = state.store.get_leaderboard(&game_id).await;
    let response = match board {
        Some(board) => LeaderboardResponse {
            game_id,
            last_updated: Some(board.last_updated),
            daily: ranked(&board.daily, true),
            weekly: ranked(&board.weekly, false),
            all_time: ranked(&board.all_time, false),
        },
        None => LeaderboardResponse {
            game_id,
            last_updated: None,
            daily: Vec::new(),
            weekly: Vec::new(),
            all_time: Vec::new(),
        },
    };

    Ok(HttpResponse::Ok().json(response))
}
