#![allow(dead_code)]

use rand::Rng;

/// Maximum seed value (exclusive) drawn for a fresh session: 2^31 - 1,
/// matching what the game clients generate.
pub const SEED_RANGE: u32 = 2_147_483_647;

/// Seeded pseudo-random generator (Mulberry32).
///
/// Same seed + same call sequence = same output sequence, bit-exact across
/// processes. The whole anti-cheat design leans on this: a server holding
/// the seed and the input log can in principle recompute the client's
/// entire play-through. One instance per session, never shared.
#[derive(Debug, Clone)]
pub struct SeededRng {
    seed: u32,
    state: u32,
}

impl SeededRng {
    pub fn new(seed: u32) -> Self {
        Self { seed, state: seed }
    }

    /// Construct with a seed drawn from a non-deterministic source; the
    /// seed stays readable so the caller can persist it.
    pub fn from_entropy() -> Self {
        let seed = rand::thread_rng().gen_range(0..SEED_RANGE);
        Self::new(seed)
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Next value in [0, 1). Mulberry32 mixing step; the wrapping u32
    /// arithmetic mirrors the JS reference (Math.imul / `>>>`) exactly.
    pub fn next(&mut self) -> f64 {
        self.state = self.state.wrapping_add(0x6d2b_79f5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        f64::from(t ^ (t >> 14)) / 4_294_967_296.0
    }

    /// Random integer between min and max (inclusive).
    pub fn next_int(&mut self, min: i64, max: i64) -> i64 {
        (self.next() * (max - min + 1) as f64).floor() as i64 + min
    }

    /// Random float between min and max.
    pub fn next_float(&mut self, min: f64, max: f64) -> f64 {
        self.next() * (max - min) + min
    }

    /// Random boolean that is true with the given probability.
    pub fn next_bool(&mut self, probability: f64) -> bool {
        self.next() < probability
    }

    /// Pick a random element. Draws exactly one value even when the slice
    /// is empty, keeping the call sequence aligned with the client.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            self.next();
            return None;
        }
        let idx = self.next_int(0, items.len() as i64 - 1) as usize;
        items.get(idx)
    }

    /// Fisher-Yates shuffle, high index to low.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_int(0, i as i64) as usize;
            items.swap(i, j);
        }
    }

    /// Random angle in radians.
    pub fn next_angle(&mut self) -> f64 {
        self.next() * std::f64::consts::PI * 2.0
    }

    /// Random point uniformly distributed within a circle of the given
    /// radius, centered at the origin.
    pub fn next_point_in_circle(&mut self, radius: f64) -> (f64, f64) {
        let angle = self.next_angle();
        let r = self.next().sqrt() * radius;
        (angle.cos() * r, angle.sin() * r)
    }

    /// Rewind to the original seed for replay from the start of a session.
    pub fn reset(&mut self) {
        self.state = self.seed;
    }
}
