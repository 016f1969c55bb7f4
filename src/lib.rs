pub mod ai;
pub mod app;
pub mod console;
pub mod error;
pub mod judge;
pub mod logging;
pub mod message;
pub mod prompts;
pub mod session;
pub mod settings;
pub mod store;
pub mod tools;
pub mod ui;

// Re-export commonly used items for easier access
pub use ai::SantaAI;
pub use error::{AIError, AppError, StoreError};
pub use message::{Message, MessageType};
pub use session::{SessionManager, SessionState};
pub use store::{ListStore, NameScore};
