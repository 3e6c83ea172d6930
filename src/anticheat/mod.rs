// Anti-cheat layer: integrity first, statistics second. A tampered log
// must never reach the anomaly detector.
pub mod analysis;
pub mod checksum;

pub use analysis::{analyze_gameplay, AnomalyFlag, ValidationResult};
pub use checksum::{generate_checksum, verify_checksum};
