//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod handler;
pub mod speech_engine;
pub mod speech_output;
pub mod store;

// Re-export common types
pub use config::ConfigStore;
pub use handler::{DomainHandler, HandlerError};
pub use speech_engine::{SpeechEngine, SpeechEngineError, SpeechEvent};
pub use speech_output::SpeechOutput;
pub use store::{KeyValueStore, StoreError};
