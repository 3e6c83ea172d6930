// Core models
pub mod input;
pub mod score;
pub mod session;
pub mod tournament;

// Re-export commonly used types
pub use input::*;
pub use score::*;
pub use session::*;
pub use tournament::*;
