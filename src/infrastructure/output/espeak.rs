//! espeak speech output adapter

use std::process::Stdio;

use tokio::process::Command;
use tracing::warn;

use crate::application::ports::SpeechOutput;

/// Synthesizes speech by shelling out to `espeak`.
///
/// The port is fire-and-forget, so each call spawns a task and failures
/// are logged rather than surfaced.
pub struct EspeakSpeechOutput {
    program: String,
}

impl EspeakSpeechOutput {
    pub fn new() -> Self {
        Self {
            program: "espeak".to_string(),
        }
    }

    /// Use a different binary, e.g. "espeak-ng" or macOS "say"
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for EspeakSpeechOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechOutput for EspeakSpeechOutput {
    fn speak(&self, text: &str) {
        let program = self.program.clone();
        let text = text.to_string();
        tokio::spawn(async move {
            let result = Command::new(&program)
                .arg(&text)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .await;
            match result {
                Ok(status) if !status.success() => {
                    warn!(%program, %status, "speech synthesis exited with failure");
                }
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                    warn!(%program, "not found; install it or use --voice console");
                }
                Err(err) => warn!(%program, %err, "failed to run speech synthesis"),
                Ok(_) => {}
            }
        });
    }
}
