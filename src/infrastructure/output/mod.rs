//! Speech output adapters

pub mod console;
pub mod espeak;

pub use console::ConsoleSpeechOutput;
pub use espeak::EspeakSpeechOutput;
