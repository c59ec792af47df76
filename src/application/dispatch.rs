//! Dispatch router: classified command -> domain handler

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{error, warn};

use crate::application::ports::{DomainHandler, SpeechOutput};
use crate::domain::command::CommandDomain;

/// Routes a classified command to the handler registered for its domain.
///
/// Handler failures stop here: they are logged and converted into a spoken
/// apology so the session manager can always proceed to the next restart.
pub struct DispatchRouter {
    handlers: HashMap<CommandDomain, Arc<dyn DomainHandler>>,
    speech: Arc<dyn SpeechOutput>,
}

impl DispatchRouter {
    pub fn new(speech: Arc<dyn SpeechOutput>) -> Self {
        Self {
            handlers: HashMap::new(),
            speech,
        }
    }

    /// Register the handler for one domain. Unclassified takes no handler;
    /// the router answers it directly.
    pub fn register(&mut self, domain: CommandDomain, handler: Arc<dyn DomainHandler>) {
        self.handlers.insert(domain, handler);
    }

    /// Invoke the handler for `domain` and absorb its outcome.
    pub async fn dispatch(&self, domain: CommandDomain, command: &str) {
        let Some(handler) = self.handlers.get(&domain) else {
            if domain != CommandDomain::Unclassified {
                warn!(%domain, "no handler registered");
            }
            self.speech.speak(&format!(
                "I didn't understand the command: {command}. Please try again."
            ));
            return;
        };

        if let Err(err) = handler.handle(command).await {
            error!(%domain, %err, "handler failed");
            self.speech.speak(&format!(
                "Sorry, there was an error with the {} function. Please try again.",
                domain.label().to_lowercase()
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::HandlerError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSpeech {
        lines: Mutex<Vec<String>>,
    }

    impl RecordingSpeech {
        fn spoken(&self) -> Vec<String> {
            self.lines.lock().unwrap().clone()
        }
    }

    impl SpeechOutput for RecordingSpeech {
        fn speak(&self, text: &str) {
            self.lines.lock().unwrap().push(text.to_string());
        }
    }

    struct OkHandler;

    #[async_trait]
    impl DomainHandler for OkHandler {
        async fn handle(&self, _command: &str) -> Result<(), HandlerError> {
            Ok(())
        }
    }

    struct FailingHandler;

    #[async_trait]
    impl DomainHandler for FailingHandler {
        async fn handle(&self, command: &str) -> Result<(), HandlerError> {
            Err(HandlerError::ActionFailed(command.to_string()))
        }
    }

    #[tokio::test]
    async fn unclassified_gets_didnt_understand_response() {
        let speech = Arc::new(RecordingSpeech::default());
        let router = DispatchRouter::new(speech.clone());

        router
            .dispatch(CommandDomain::Unclassified, "sing me a song")
            .await;

        let spoken = speech.spoken();
        assert_eq!(spoken.len(), 1);
        assert!(spoken[0].contains("didn't understand"));
        assert!(spoken[0].contains("sing me a song"));
    }

    #[tokio::test]
    async fn successful_handler_produces_no_router_speech() {
        let speech = Arc::new(RecordingSpeech::default());
        let mut router = DispatchRouter::new(speech.clone());
        router.register(CommandDomain::Camera, Arc::new(OkHandler));

        router.dispatch(CommandDomain::Camera, "take a photo").await;

        assert!(speech.spoken().is_empty());
    }

    #[tokio::test]
    async fn handler_failure_becomes_spoken_apology() {
        let speech = Arc::new(RecordingSpeech::default());
        let mut router = DispatchRouter::new(speech.clone());
        router.register(CommandDomain::Device, Arc::new(FailingHandler));

        router.dispatch(CommandDomain::Device, "volume up").await;

        let spoken = speech.spoken();
        assert_eq!(spoken.len(), 1);
        assert!(spoken[0].contains("error with the device function"));
    }
}
