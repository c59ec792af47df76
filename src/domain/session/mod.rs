//! Session lifecycle: state machine and utterance value object

pub mod state;
pub mod utterance;

pub use state::{InvalidStateTransition, ListeningSession, SessionState};
pub use utterance::Utterance;
