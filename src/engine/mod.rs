// Deterministic gameplay engine pieces shared by client simulation and
// server verification.
pub mod recorder;
pub mod rng;

pub use recorder::InputRecorder;
pub use rng::{SeededRng, SEED_RANGE};
