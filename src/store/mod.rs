#![allow(dead_code)]

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{
    FlagHistory, GameScore, Leaderboard, LeaderboardEntry, ScoreRecord, Session, Tournament,
};

/// Each leaderboard tier keeps at most this many entries.
pub const MAX_LEADERBOARD_ENTRIES: usize = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompleteSessionError {
    #[error("session not found")]
    NotFound,
    #[error("session already completed")]
    AlreadyCompleted,
}

/// Outcome of folding an accepted score into a player's record.
#[derive(Debug, Clone, Copy)]
pub struct ScoreUpdate {
    pub new_best: bool,
    pub previous_best: u64,
}

/// In-process store for the persistent entities: sessions, score records,
/// leaderboards, flag histories, tournaments. Constructor-injected into the
/// services behind an `Arc`; never an ambient global.
///
/// Lock discipline: session completion is a compare-and-set under the
/// sessions write lock, and each leaderboard read-modify-sort-truncate-write
/// happens inside one write-lock scope, so concurrent updates cannot
/// interleave.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
    scores: RwLock<HashMap<String, ScoreRecord>>,
    leaderboards: RwLock<HashMap<String, Leaderboard>>,
    flags: RwLock<HashMap<String, FlagHistory>>,
    tournaments: RwLock<HashMap<String, Tournament>>,
    usernames: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // SESSIONS
    // =========================================================================

    pub async fn insert_session(&self, session: Session) {
        self.sessions.write().await.insert(session.id, session);
    }

    pub async fn get_session(&self, session_id: Uuid) -> Option<Session> {
        self.sessions.read().await.get(&session_id).cloned()
    }

    /// Mark a session completed if and only if it is still open. The write
    /// lock is held across the check and the mutation, so of two racing
    /// submissions exactly one wins; the loser observes `AlreadyCompleted`.
    pub async fn complete_session(
        &self,
        session_id: Uuid,
        final_score: u64,
        now: DateTime<Utc>,
    ) -> Result<Session, CompleteSessionError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&session_id)
            .ok_or(CompleteSessionError::NotFound)?;
        if session.completed_at.is_some() {
            return Err(CompleteSessionError::AlreadyCompleted);
        }
        session.completed_at = Some(now);
        session.final_score = Some(final_score);
        session.verified = true;
        Ok(session.clone())
    }

    // =========================================================================
    // TOURNAMENTS
    // =========================================================================

    pub async fn insert_tournament(&self, tournament: Tournament) {
        self.tournaments
            .write()
            .await
            .insert(tournament.id.clone(), tournament);
    }

    pub async fn get_tournament(&self, tournament_id: &str) -> Option<Tournament> {
        self.tournaments.read().await.get(tournament_id).cloned()
    }

    // =========================================================================
    // FLAG HISTORY
    // =========================================================================

    /// Append anomaly evidence to a player's cumulative history. Append-only;
    /// never cleared, never rolled back when the triggering request fails.
    pub async fn record_flags<I>(&self, player: &str, reasons: I, now: DateTime<Utc>) -> FlagHistory
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = self.flags.write().await;
        let history = flags.entry(player.to_string()).or_default();
        history.count += 1;
        history.reasons.extend(reasons);
        history.last_flagged = Some(now);
        history.clone()
    }

    pub async fn flag_history(&self, player: &str) -> Option<FlagHistory> {
        self.flags.read().await.get(player).cloned()
    }

    // =========================================================================
    // USERNAMES
    // =========================================================================

    pub async fn set_username(&self, player: &str, username: &str) {
        self.usernames
            .write()
            .await
            .insert(player.to_string(), username.to_string());
    }

    pub async fn username(&self, player: &str) -> Option<String> {
        self.usernames.read().await.get(player).cloned()
    }

    // =========================================================================
    // SCORE RECORDS
    // =========================================================================

    /// Fold an accepted score into the player's record. Plays and games
    /// always increment; the best score and the running total move only on
    /// an improvement, and the total grows by the delta so a non-improving
    /// play never inflates it.
    pub async fn apply_score(
        &self,
        player: &str,
        username: &str,
        game_id: &str,
        score: u64,
        now: DateTime<Utc>,
    ) -> ScoreUpdate {
        let mut scores = self.scores.write().await;
        let record = scores
            .entry(player.to_string())
            .or_insert_with(|| ScoreRecord::new(player, username));

        let previous_best = record.best_for(game_id);
        let new_best = score > previous_best || !record.games.contains_key(game_id);

        let game = record
            .games
            .entry(game_id.to_string())
            .or_insert_with(|| GameScore {
                best_score: 0,
                total_plays: 0,
                last_played_at: now,
            });
        if new_best {
            game.best_score = score;
        }
        game.total_plays += 1;
        game.last_played_at = now;

        record.total_games += 1;
        if new_best {
            record.total_score += score - previous_best;
        }

        ScoreUpdate {
            new_best,
            previous_best,
        }
    }

    pub async fn get_score_record(&self, player: &str) -> Option<ScoreRecord> {
        self.scores.read().await.get(player).cloned()
    }

    // =========================================================================
    // LEADERBOARDS
    // =========================================================================

    /// Insert a new best into every tier: drop the player's prior entry,
    /// insert, sort descending, truncate. Returns the player's 1-based rank
    /// in the all-time tier.
    pub async fn update_leaderboard(
        &self,
        game_id: &str,
        entry: LeaderboardEntry,
        now: DateTime<Utc>,
    ) -> usize {
        let mut leaderboards = self.leaderboards.write().await;
        let board = leaderboards
            .entry(game_id.to_string())
            .or_insert_with(|| Leaderboard::new(game_id, now));
        board.last_updated = now;

        for tier in [&mut board.daily, &mut board.weekly, &mut board.all_time] {
            tier.retain(|e| e.player_id != entry.player_id);
            tier.push(entry.clone());
            tier.sort_by(|a, b| b.score.cmp(&a.score));
            tier.truncate(MAX_LEADERBOARD_ENTRIES);
        }

        board
            .all_time
            .iter()
            .position(|e| e.player_id == entry.player_id)
            .map(|p| p + 1)
            .unwrap_or(0)
    }

    pub async fn get_leaderboard(&self, game_id: &str) -> Option<Leaderboard> {
        self.leaderboards.read().await.get(game_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GameMode;
    use chrono::Duration;
    use std::sync::Arc;

    fn open_session(now: DateTime<Utc>) -> Session {
        Session {
            id: Uuid::new_v4(),
            player: "0xplayer".into(),
            game_id: "pixel-snake".into(),
            mode: GameMode::Ranked,
            tournament_id: None,
            seed: 1234,
            started_at: now,
            expires_at: now + Duration::minutes(30),
            completed_at: None,
            final_score: None,
            verified: false,
        }
    }

    fn entry(player: &str, score: u64, now: DateTime<Utc>) -> LeaderboardEntry {
        LeaderboardEntry {
            player_id: player.to_string(),
            username: player.to_string(),
            score,
            timestamp: now,
        }
    }

    #[tokio::test]
    async fn complete_session_is_single_shot() {
        let store = MemoryStore::new();
        let now = Utc::now();
        let session = open_session(now);
        let id = session.id;
        store.insert_session(session).await;

        let first = store.complete_session(id, 500, now).await;
        assert!(first.is_ok());
        assert_eq!(first.unwrap().final_score, Some(500));

        let second = store.complete_session(id, 900, now).await;
        assert_eq!(second.unwrap_err(), CompleteSessionError::AlreadyCompleted);

        // The losing submission must not overwrite the recorded score.
        let stored = store.get_session(id).await.unwrap();
        assert_eq!(stored.final_score, Some(500));
        assert!(stored.verified);
    }

    #[tokio::test]
    async fn concurrent_completions_serialize() {
        let store = Arc::new(MemoryStore::new());
        let now = Utc::now();
        let session = open_session(now);
        let id = session.id;
        store.insert_session(session).await;

        let (a, b) = tokio::join!(
            store.complete_session(id, 100, now),
            store.complete_session(id, 200, now),
        );
        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
    }

    #[tokio::test]
    async fn completing_missing_session_reports_not_found() {
        let store = MemoryStore::new();
        let result = store.complete_session(Uuid::new_v4(), 1, Utc::now()).await;
        assert_eq!(result.unwrap_err(), CompleteSessionError::NotFound);
    }

    #[tokio::test]
    async fn score_record_tracks_best_and_totals() {
        let store = MemoryStore::new();
        let now = Utc::now();

        let first = store.apply_score("0xa", "alice", "chomper", 300, now).await;
        assert!(first.new_best);
        assert_eq!(first.previous_best, 0);

        // A worse play counts a game but moves no scores.
        let worse = store.apply_score("0xa", "alice", "chomper", 100, now).await;
        assert!(!worse.new_best);

        let better = store.apply_score("0xa", "alice", "chomper", 450, now).await;
        assert!(better.new_best);
        assert_eq!(better.previous_best, 300);

        let record = store.get_score_record("0xa").await.unwrap();
        assert_eq!(record.best_for("chomper"), 450);
        assert_eq!(record.games["chomper"].total_plays, 3);
        assert_eq!(record.total_games, 3);
        // 300 + (450 - 300); the worse play contributed nothing.
        assert_eq!(record.total_score, 450);
    }

    #[tokio::test]
    async fn zero_score_first_play_still_counts_as_best() {
        let store = MemoryStore::new();
        let now = Utc::now();
        let update = store.apply_score("0xb", "bob", "chomper", 0, now).await;
        assert!(update.new_best);
        let record = store.get_score_record("0xb").await.unwrap();
        assert_eq!(record.games["chomper"].total_plays, 1);
    }

    #[tokio::test]
    async fn leaderboard_tiers_stay_bounded_sorted_and_deduped() {
        let store = MemoryStore::new();
        let now = Utc::now();

        for i in 0..150u64 {
            let player = format!("0xp{}", i);
            store
                .update_leaderboard("pixel-snake", entry(&player, i * 10, now), now)
                .await;
        }

        let board = store.get_leaderboard("pixel-snake").await.unwrap();
        for tier in [&board.daily, &board.weekly, &board.all_time] {
            assert_eq!(tier.len(), MAX_LEADERBOARD_ENTRIES);
            assert!(tier.windows(2).all(|w| w[0].score >= w[1].score));
            let mut players: Vec<&str> = tier.iter().map(|e| e.player_id.as_str()).collect();
            players.sort_unstable();
            players.dedup();
            assert_eq!(players.len(), tier.len());
        }
        assert_eq!(board.all_time[0].score, 1_490);
    }

    #[tokio::test]
    async fn improving_player_replaces_their_own_entry() {
        let store = MemoryStore::new();
        let now = Utc::now();

        store
            .update_leaderboard("chomper", entry("0xa", 100, now), now)
            .await;
        store
            .update_leaderboard("chomper", entry("0xb", 200, now), now)
            .await;
        let rank = store
            .update_leaderboard("chomper", entry("0xa", 300, now), now)
            .await;

        assert_eq!(rank, 1);
        let board = store.get_leaderboard("chomper").await.unwrap();
        assert_eq!(board.all_time.len(), 2);
        assert_eq!(board.all_time[0].player_id, "0xa");
        assert_eq!(board.all_time[0].score, 300);
    }

    #[tokio::test]
    async fn flag_history_accumulates_and_is_never_cleared() {
        let store = MemoryStore::new();
        let now = Utc::now();

        store
            .record_flags("0xcheat", vec!["checksum_mismatch".to_string()], now)
            .await;
        let history = store
            .record_flags(
                "0xcheat",
                vec![
                    "impossible_score".to_string(),
                    "checksum_mismatch".to_string(),
                ],
                now,
            )
            .await;

        assert_eq!(history.count, 2);
        assert_eq!(history.reasons.len(), 2);
        assert!(history.last_flagged.is_some());
    }
}
