pub mod ai;
pub mod app;
pub mod app_state;
pub mod cleanup;
pub mod dice;
pub mod dispatcher;
pub mod error;
pub mod events;
pub mod logging;
pub mod message;
pub mod persona;
pub mod session;
pub mod settings;
pub mod ui;

// Re-export commonly used items for easier access
pub use ai::{Completion, GameAI};
pub use dispatcher::{TurnError, TurnOutcome, error_reply, process_turn, route};
pub use error::{AIError, AppError, GameError};
pub use message::{Message, MessageType};
pub use persona::{Handoff, Persona};
pub use session::SessionState;
