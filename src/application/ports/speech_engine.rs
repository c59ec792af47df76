//! Speech engine port interface

use async_trait::async_trait;
use thiserror::Error;

/// Speech engine errors
#[derive(Debug, Clone, Error)]
pub enum SpeechEngineError {
    #[error("Failed to start speech recognition: {0}")]
    StartFailed(String),

    #[error("Failed to stop speech recognition: {0}")]
    StopFailed(String),

    #[error("No speech input source available")]
    NoInputSource,
}

/// Lifecycle and result events emitted by a speech engine adapter.
///
/// Transcripts in a `Result` are pre-sorted by the adapter, best first.
#[derive(Debug, Clone, PartialEq)]
pub enum SpeechEvent {
    Started,
    Recognized,
    Ended,
    Error(String),
    Result {
        transcripts: Vec<String>,
        confidences: Vec<f32>,
    },
    PartialResult {
        transcripts: Vec<String>,
    },
}

/// Port for continuous speech recognition.
///
/// Adapters push `SpeechEvent`s into the session bus they were constructed
/// with; `start` opens one recognition session, `stop` tears it down.
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    /// Start a recognition session for the given locale.
    async fn start(&self, locale: &str) -> Result<(), SpeechEngineError>;

    /// Stop recognizing. Safe to call when no session is open.
    async fn stop(&self) -> Result<(), SpeechEngineError>;
}

/// Blanket implementation for shared engine handles
#[async_trait]
impl<T: SpeechEngine + ?Sized> SpeechEngine for std::sync::Arc<T> {
    async fn start(&self, locale: &str) -> Result<(), SpeechEngineError> {
        self.as_ref().start(locale).await
    }

    async fn stop(&self) -> Result<(), SpeechEngineError> {
        self.as_ref().stop().await
    }
}
