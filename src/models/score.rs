use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

use crate::anticheat::AnomalyFlag;
use crate::models::input::InputEvent;

/// Per-player score document. Mutated only by the submission coordinator,
/// only on accepted non-free submissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub player_id: String,
    pub username: String,
    pub games: HashMap<String, GameScore>,
    pub total_score: u64,
    pub total_games: u64,
}

impl ScoreRecord {
    pub fn new(player_id: &str, username: &str) -> Self {
        Self {
            player_id: player_id.to_string(),
            username: username.to_string(),
            games: HashMap::new(),
            total_score: 0,
            total_games: 0,
        }
    }

    pub fn best_for(&self, game_id: &str) -> u64 {
        self.games.get(game_id).map(|g| g.best_score).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameScore {
    pub best_score: u64,
    pub total_plays: u64,
    pub last_played_at: DateTime<Utc>,
}

/// Per-game leaderboard with independently maintained tiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leaderboard {
    pub game_id: String,
    pub last_updated: DateTime<Utc>,
    pub daily: Vec<LeaderboardEntry>,
    pub weekly: Vec<LeaderboardEntry>,
    pub all_time: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new(game_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            game_id: game_id.to_string(),
            last_updated: now,
            daily: Vec::new(),
            weekly: Vec::new(),
            all_time: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player_id: String,
    pub username: String,
    pub score: u64,
    pub timestamp: DateTime<Utc>,
}

/// Cumulative anomaly evidence against a player. Append-only; rejected
/// submissions still leave their mark here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlagHistory {
    pub count: u64,
    pub reasons: BTreeSet<String>,
    pub last_flagged: Option<DateTime<Utc>>,
}

/// The client-submitted gameplay record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameData {
    #[serde(rename = "sessionId")]
    pub session_id: Uuid,
    #[serde(rename = "gameId")]
    pub game_id: String,
    pub seed: u32,
    pub inputs: Vec<InputEvent>,
    #[serde(rename = "finalScore")]
    pub final_score: u64,
    pub checksum: String,
    /// Offset of the last recorded input, in milliseconds.
    pub duration: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitScoreRequest {
    #[serde(rename = "gameData")]
    pub game_data: GameData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitScoreResponse {
    pub success: bool,
    pub verified: bool,
    pub score: u64,
    #[serde(rename = "newBest")]
    pub new_best: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    /// Informational even on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<Vec<AnomalyFlag>>,
}
