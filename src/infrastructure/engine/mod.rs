//! Speech engine adapters

pub mod line;
pub mod scripted;

pub use line::LineSpeechEngine;
pub use scripted::{ScriptedSpeechEngine, ScriptedTurn};
