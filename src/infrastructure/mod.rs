//! Infrastructure layer - Adapter implementations

pub mod config;
pub mod engine;
pub mod handlers;
pub mod output;
pub mod store;

// Re-export common types
pub use config::XdgConfigStore;
pub use engine::{LineSpeechEngine, ScriptedSpeechEngine, ScriptedTurn};
pub use handlers::{
    AppControlHandler, CameraHandler, CommunicationHandler, DeviceHandler, EmergencyHandler,
    NavigationHandler,
};
pub use output::{ConsoleSpeechOutput, EspeakSpeechOutput};
pub use store::{JsonFileStore, MemoryStore};
