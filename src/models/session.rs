use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// One bounded attempt to play a specific game under a specific seed.
///
/// Mutated exactly twice: once at creation (all fields set) and once at
/// completion (`completed_at`/`final_score`/`verified`). A session with
/// `completed_at` set is terminal; so is one whose `expires_at` has passed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub player: String,
    pub game_id: String,
    pub mode: GameMode,
    pub tournament_id: Option<String>,
    pub seed: u32,
    pub started_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub final_score: Option<u64>,
    pub verified: bool,
}

impl Session {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Free,
    Ranked,
    Tournament,
}

impl GameMode {
    /// Parse the client-supplied mode string; anything outside the three
    /// enumerated values is rejected by the session manager.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "free" => Some(GameMode::Free),
            "ranked" => Some(GameMode::Ranked),
            "tournament" => Some(GameMode::Tournament),
            _ => None,
        }
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameMode::Free => write!(f, "free"),
            GameMode::Ranked => write!(f, "ranked"),
            GameMode::Tournament => write!(f, "tournament"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSessionRequest {
    #[serde(rename = "gameId")]
    #[validate(length(min = 1, max = 64))]
    pub game_id: String,
    pub mode: String,
    #[serde(rename = "tournamentId", default)]
    pub tournament_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    #[serde(rename = "sessionId")]
    pub session_id: Uuid,
    pub seed: u32,
    #[serde(rename = "expiresAt")]
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn mode_parsing_accepts_only_known_modes() {
        assert_eq!(GameMode::parse("free"), Some(GameMode::Free));
        assert_eq!(GameMode::parse("ranked"), Some(GameMode::Ranked));
        assert_eq!(GameMode::parse("tournament"), Some(GameMode::Tournament));
        assert_eq!(GameMode::parse("casual"), None);
        assert_eq!(GameMode::parse("Ranked"), None);
    }

    #[test]
    fn expiry_is_a_passive_timestamp_comparison() {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            player: "0xplayer".into(),
            game_id: "pixel-snake".into(),
            mode: GameMode::Ranked,
            tournament_id: None,
            seed: 7,
            started_at: now,
            expires_at: now + Duration::minutes(30),
            completed_at: None,
            final_score: None,
            verified: false,
        };
        assert!(!session.is_expired(now + Duration::minutes(29)));
        assert!(session.is_expired(now + Duration::minutes(31)));
    }
}
