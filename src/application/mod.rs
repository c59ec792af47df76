//! Application layer - Use cases and port interfaces

pub mod dispatch;
pub mod logbook;
pub mod ports;
pub mod session;

// Re-export common types
pub use dispatch::DispatchRouter;
pub use logbook::EmergencyLogbook;
pub use session::{
    session_channel, ControlEvent, ListeningSessionManager, SessionBus, SessionEvent,
    SessionOptions, SessionSnapshot,
};
