#![allow(dead_code)]

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Per-game reaction-timing thresholds for the anomaly detector.
///
/// Empirically chosen constants; table-driven per game rather than baked
/// into the detector so a title with unusual input cadence can loosen them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingThresholds {
    /// 10th-percentile inter-input delta below this is implausible even
    /// allowing for occasional fast mashing.
    pub p10_floor_ms: f64,
    /// Median reaction below this is not human.
    pub median_floor_ms: f64,
    /// Median bound for the joint low-variance check: consistent *and*
    /// fast together is the bot signature.
    pub consistent_median_ms: f64,
    pub variance_floor: f64,
}

impl Default for TimingThresholds {
    fn default() -> Self {
        Self {
            p10_floor_ms: 15.0,
            median_floor_ms: 30.0,
            consistent_median_ms: 50.0,
            variance_floor: 100.0,
        }
    }
}

/// Static server-side validation bounds for one game. Loaded once at
/// process start; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub id: String,
    pub name: String,
    pub max_theoretical_score: u64,
    pub min_game_duration_ms: u64,
    pub max_inputs_per_second: f64,
    pub points_per_second_limit: f64,
    #[serde(default)]
    pub timing: TimingThresholds,
}

impl GameConfig {
    pub fn new(
        id: &str,
        name: &str,
        max_theoretical_score: u64,
        min_game_duration_ms: u64,
        max_inputs_per_second: f64,
        points_per_second_limit: f64,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            max_theoretical_score,
            min_game_duration_ms,
            max_inputs_per_second,
            points_per_second_limit,
            timing: TimingThresholds::default(),
        }
    }
}

/// Immutable registry of configured games, looked up by game identifier.
#[derive(Debug, Clone)]
pub struct GameRegistry {
    games: HashMap<String, GameConfig>,
}

impl GameRegistry {
    pub fn new(configs: Vec<GameConfig>) -> Self {
        let games = configs.into_iter().map(|c| (c.id.clone(), c)).collect();
        Self { games }
    }

    /// The arcade catalog.
    pub fn with_builtin_games() -> Self {
        Self::new(vec![
            // max score ~30 waves in perfect play
            GameConfig::new("space-rocks", "Space Rocks", 75_000, 5_000, 30.0, 500.0),
            // ~250 aliens max per game
            GameConfig::new("alien-assault", "Alien Assault", 50_000, 10_000, 25.0, 300.0),
            // all bricks + combos
            GameConfig::new("brick-breaker", "Brick Breaker", 30_000, 10_000, 20.0, 200.0),
            // theoretical max length
            GameConfig::new("pixel-snake", "Pixel Snake", 100_000, 5_000, 15.0, 50.0),
            // 11 points to win * 100
            GameConfig::new("paddle-battle", "Paddle Battle", 1_100, 10_000, 20.0, 50.0),
            GameConfig::new("road-hopper", "Road Hopper", 50_000, 5_000, 10.0, 200.0),
            GameConfig::new("block-drop", "Block Drop", 100_000, 10_000, 15.0, 300.0),
            GameConfig::new("chomper", "Chomper", 50_000, 10_000, 10.0, 100.0),
            GameConfig::new("galaxy-fighter", "Galaxy Fighter", 100_000, 5_000, 30.0, 500.0),
            GameConfig::new("tunnel-terror", "Tunnel Terror", 75_000, 10_000, 15.0, 300.0),
            GameConfig::new("barrel-dodge", "Barrel Dodge", 50_000, 10_000, 20.0, 200.0),
            GameConfig::new("bug-blaster", "Bug Blaster", 100_000, 10_000, 30.0, 500.0),
        ])
    }

    pub fn lookup(&self, game_id: &str) -> Option<&GameConfig> {
        self.games.get(game_id)
    }

    pub fn contains(&self, game_id: &str) -> bool {
        self.games.contains_key(game_id)
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

/// Daily leaderboard reward for a 1-based rank, in platform tokens.
pub fn reward_for_rank(rank: u32) -> u64 {
    match rank {
        0 => 0,
        1 => 1_000,
        2..=5 => 500,
        6..=10 => 250,
        11..=50 => 100,
        51..=100 => 50,
        _ => 0,
    }
}
