// HTTP route handlers.
pub mod health;
pub mod leaderboard_handler;
pub mod score_handler;
pub mod session_handler;

use std::sync::Arc;

use crate::games::GameRegistry;
use crate::service::{ScoreService, SessionService};
use crate::store::MemoryStore;

/// Shared application state injected into every handler.
pub struct AppState {
    pub session_service: Arc<SessionService>,
    pub score_service: Arc<ScoreService>,
    pub store: Arc<MemoryStore>,
    pub games: Arc<GameRegistry>,
}
