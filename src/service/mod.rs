// Service layer: session lifecycle and score submission.
pub mod score_service;
pub mod session_service;

pub use score_service::ScoreService;
pub use session_service::SessionService;
