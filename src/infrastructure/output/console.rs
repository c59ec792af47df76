//! Console speech output adapter

use colored::Colorize;
use tracing::debug;

use crate::application::ports::SpeechOutput;

/// Prints spoken feedback to stderr instead of synthesizing audio.
pub struct ConsoleSpeechOutput;

impl ConsoleSpeechOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleSpeechOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechOutput for ConsoleSpeechOutput {
    fn speak(&self, text: &str) {
        debug!(%text, "speak");
        eprintln!("{} {}", "»".magenta(), text);
    }
}
