//! Domain handler port interface

use async_trait::async_trait;
use thiserror::Error;

/// Handler errors. Caught at the dispatch router and converted into a
/// spoken apology; they never reach the session manager.
#[derive(Debug, Clone, Error)]
pub enum HandlerError {
    #[error("Unsupported command: {0}")]
    Unsupported(String),

    #[error("Required capability unavailable: {0}")]
    Unavailable(String),

    #[error("Action failed: {0}")]
    ActionFailed(String),
}

/// Port implemented by each domain's action subsystem.
///
/// `command` is the lowercased, wake-stripped utterance; the handler owns
/// any further keyword parsing. Handlers may call another handler's public
/// operations directly (Emergency drives Device's flashlight and volume).
#[async_trait]
pub trait DomainHandler: Send + Sync {
    async fn handle(&self, command: &str) -> Result<(), HandlerError>;
}
