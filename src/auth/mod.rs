pub mod identity;

pub use identity::{PlayerIdentity, PLAYER_HEADER};
