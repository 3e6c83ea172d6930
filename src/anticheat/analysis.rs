use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::games::GameRegistry;
use crate::models::InputEvent;

/// Deltas at or above this are treated as the player being idle, not a
/// reaction, and are excluded from the distribution.
const IDLE_DELTA_MS: u64 = 1_000;
/// Minimum number of valid deltas before the reaction-time checks run.
const MIN_REACTION_SAMPLES: usize = 20;
/// Minimum sequence length for repetition analysis.
const MIN_PATTERN_SEQUENCE: usize = 20;
const PATTERN_WINDOW: usize = 5;
const REPETITION_THRESHOLD: f64 = 0.8;
/// Flag count at which confidence saturates.
const CONFIDENCE_SATURATION: f64 = 5.0;

/// A named tag raised when one statistical or bounds check fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyFlag {
    UnknownGame,
    ImpossibleScore,
    GameTooShort,
    AbnormalScoreVelocity,
    BotLikeInputFrequency,
    InhumanConsistentSpeed,
    InhumanMedianReaction,
    SuspiciouslyConsistentTiming,
    RepetitiveInputPattern,
    ChecksumMismatch,
}

impl std::fmt::Display for AnomalyFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            AnomalyFlag::UnknownGame => "unknown_game",
            AnomalyFlag::ImpossibleScore => "impossible_score",
            AnomalyFlag::GameTooShort => "game_too_short",
            AnomalyFlag::AbnormalScoreVelocity => "abnormal_score_velocity",
            AnomalyFlag::BotLikeInputFrequency => "bot_like_input_frequency",
            AnomalyFlag::InhumanConsistentSpeed => "inhuman_consistent_speed",
            AnomalyFlag::InhumanMedianReaction => "inhuman_median_reaction",
            AnomalyFlag::SuspiciouslyConsistentTiming => "suspiciously_consistent_timing",
            AnomalyFlag::RepetitiveInputPattern => "repetitive_input_pattern",
            AnomalyFlag::ChecksumMismatch => "checksum_mismatch",
        };
        write!(f, "{}", tag)
    }
}

/// Outcome of one anomaly-detection run. Produced fresh each time; never
/// persisted as its own entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub flags: Vec<AnomalyFlag>,
    /// Aggregate suspicion in [0, 1], derived from flag count.
    pub confidence: f64,
}

impl ValidationResult {
    fn from_flags(flags: Vec<AnomalyFlag>) -> Self {
        let confidence = (flags.len() as f64 / CONFIDENCE_SATURATION).min(1.0);
        Self {
            valid: flags.is_empty(),
            flags,
            confidence,
        }
    }
}

/// Statistical analysis of a submitted input log against per-game bounds.
///
/// Fails closed: an unrecognized game id is maximally suspicious and no
/// further checks run. Each check is independent and may append one flag;
/// the session seed plays no role here (it only matters for replay).
pub fn analyze_gameplay(
    registry: &GameRegistry,
    game_id: &str,
    inputs: &[InputEvent],
    claimed_score: u64,
    duration_ms: u64,
) -> ValidationResult {
    let config = match registry.lookup(game_id) {
        Some(config) => config,
        None => {
            return ValidationResult {
                valid: false,
                flags: vec![AnomalyFlag::UnknownGame],
                confidence: 1.0,
            }
        }
    };

    let mut flags = Vec::new();

    if claimed_score > config.max_theoretical_score {
        flags.push(AnomalyFlag::ImpossibleScore);
    }

    if duration_ms < config.min_game_duration_ms {
        flags.push(AnomalyFlag::GameTooShort);
    }

    let score_velocity = claimed_score as f64 / (duration_ms as f64 / 1000.0);
    if score_velocity > config.points_per_second_limit {
        flags.push(AnomalyFlag::AbnormalScoreVelocity);
    }

    if !inputs.is_empty() {
        let input_frequency = inputs.len() as f64 / duration_ms as f64 * 1000.0;
        if input_frequency > config.max_inputs_per_second {
            flags.push(AnomalyFlag::BotLikeInputFrequency);
        }
    }

    let mut deltas = reaction_deltas(inputs);
    if deltas.len() >= MIN_REACTION_SAMPLES {
        deltas.sort_unstable();
        let p10 = percentile(&deltas, 0.10);
        let p50 = percentile(&deltas, 0.50);
        let var = variance(&deltas);

        // A single fast keypress should not condemn a human player; a
        // distribution skewed fast and uniform should.
        if p10 < config.timing.p10_floor_ms {
            flags.push(AnomalyFlag::InhumanConsistentSpeed);
        }
        if p50 < config.timing.median_floor_ms {
            flags.push(AnomalyFlag::InhumanMedianReaction);
        }
        if var < config.timing.variance_floor && p50 < config.timing.consistent_median_ms {
            flags.push(AnomalyFlag::SuspiciouslyConsistentTiming);
        }
    }

    if repetition_score(inputs) > REPETITION_THRESHOLD {
        flags.push(AnomalyFlag::RepetitiveInputPattern);
    }

    ValidationResult::from_flags(flags)
}

/// Consecutive-input time deltas strictly between 0 and `IDLE_DELTA_MS`.
fn reaction_deltas(inputs: &[InputEvent]) -> Vec<u64> {
    inputs
        .windows(2)
        .filter_map(|w| {
            let delta = w[1].t.saturating_sub(w[0].t);
            (delta > 0 && delta < IDLE_DELTA_MS).then_some(delta)
        })
        .collect()
}

/// Nearest-rank percentile over a sorted slice; `p` in [0, 1].
fn percentile(sorted: &[u64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = (p * (sorted.len() - 1) as f64).round() as usize;
    sorted[idx.min(sorted.len() - 1)] as f64
}

/// Population variance.
fn variance(values: &[u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<u64>() as f64 / n;
    values
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n
}

/// Sliding-window looping-macro detector. Serializes each window of
/// `PATTERN_WINDOW` events to a canonical kind+payload key (offsets are
/// deliberately ignored; a macro replayed with jitter still matches) and
/// reports the share of windows taken by the most common key.
fn repetition_score(inputs: &[InputEvent]) -> f64 {
    if inputs.len() < MIN_PATTERN_SEQUENCE {
        return 0.0;
    }

    let keys: Vec<String> = (0..inputs.len() - PATTERN_WINDOW)
        .map(|i| {
            inputs[i..i + PATTERN_WINDOW]
                .iter()
                .map(window_key)
                .collect::<Vec<_>>()
                .join("|")
        })
        .collect();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for key in &keys {
        *counts.entry(key.as_str()).or_insert(0) += 1;
    }

    let max_repeats = counts.values().copied().max().unwrap_or(0);
    max_repeats as f64 / keys.len() as f64
}

fn window_key(event: &InputEvent) -> String {
    let data = event
        .data
        .as_ref()
        .map(|d| d.to_string())
        .unwrap_or_else(|| "null".to_string());
    format!("{}-{}", event.kind, data)
}
