//! App control handler: exit and application launching

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::application::ports::{DomainHandler, HandlerError, SpeechOutput};
use crate::application::session::{ControlEvent, SessionBus};
use crate::domain::command::CommandDomain;
use crate::domain::command::{EntityExtractor, KeywordTable};

/// URL schemes for apps that can be launched by name
const APP_SCHEMES: &[(&str, &str)] = &[
    ("whatsapp", "whatsapp://"),
    ("facebook", "fb://"),
    ("instagram", "instagram://"),
    ("twitter", "twitter://"),
    ("youtube", "youtube://"),
    ("gmail", "googlegmail://"),
    ("google maps", "comgooglemaps://"),
    ("maps", "maps://"),
    ("spotify", "spotify://"),
    ("netflix", "nflx://"),
    ("uber", "uber://"),
    ("messenger", "fb-messenger://"),
    ("telegram", "tg://"),
    ("camera", "camera://"),
    ("calculator", "calculator://"),
    ("calendar", "calshow://"),
    ("clock", "clock://"),
    ("weather", "weather://"),
];

/// Exit confirmation and app launching. Exit reaches the session loop as
/// a shutdown control event, so it is honored exactly once per utterance
/// no matter how many exit words the command contains.
pub struct AppControlHandler {
    speech: Arc<dyn SpeechOutput>,
    bus: SessionBus,
    app_extractor: EntityExtractor,
}

impl AppControlHandler {
    pub fn new(speech: Arc<dyn SpeechOutput>, bus: SessionBus, table: &KeywordTable) -> Self {
        let stopwords = table
            .rule(CommandDomain::AppControl)
            .map(|rule| rule.stopwords.clone())
            .unwrap_or_default();
        Self {
            speech,
            bus,
            app_extractor: EntityExtractor::new(&stopwords),
        }
    }

    fn find_scheme(app_name: &str) -> Option<&'static str> {
        // Exact match first, then partial in either direction
        APP_SCHEMES
            .iter()
            .find(|(name, _)| *name == app_name)
            .or_else(|| {
                APP_SCHEMES
                    .iter()
                    .find(|(name, _)| app_name.contains(name) || name.contains(app_name))
            })
            .map(|(_, scheme)| *scheme)
    }

    fn open_app(&self, command: &str) {
        let Some(app) = self.app_extractor.extract(command) else {
            self.speech.speak("Which app would you like to open?");
            return;
        };

        match Self::find_scheme(&app.text) {
            Some(scheme) => {
                self.speech.speak(&format!("Opening {}", app.text));
                info!(app = %app.text, scheme, "launching app");
            }
            None => self.speech.speak(&format!(
                "I couldn't find an app called {}. Please make sure it's installed.",
                app.text
            )),
        }
    }
}

#[async_trait]
impl DomainHandler for AppControlHandler {
    async fn handle(&self, command: &str) -> Result<(), HandlerError> {
        if command.contains("exit") || command.contains("close") || command.contains("quit") {
            self.speech.speak("Goodbye! Voice assistant is closing.");
            self.bus.control(ControlEvent::Shutdown);
        } else if command.contains("open") || command.contains("launch") {
            self.open_app(command);
        } else {
            self.speech
                .speak("I didn't understand that. Try saying 'open app' or 'exit'");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::session::{session_channel, SessionEvent};
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

    fn handler() -> (
        AppControlHandler,
        Arc<RecordingSpeech>,
        tokio::sync::mpsc::UnboundedReceiver<SessionEvent>,
    ) {
        let speech = Arc::new(RecordingSpeech::default());
        let (bus, rx) = session_channel();
        (
            AppControlHandler::new(speech.clone(), bus, &KeywordTable::standard()),
            speech,
            rx,
        )
    }

    #[tokio::test]
    async fn exit_speaks_goodbye_and_requests_shutdown_once() {
        let (h, speech, mut rx) = handler();

        // Several exit words in one utterance still confirm exactly once
        h.handle("exit and close and quit now").await.unwrap();

        let spoken = speech.spoken();
        assert_eq!(spoken.len(), 1);
        assert!(spoken[0].contains("Goodbye"));

        assert!(matches!(
            rx.try_recv().unwrap(),
            SessionEvent::Control(ControlEvent::Shutdown)
        ));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn open_known_app() {
        let (h, speech, _rx) = handler();
        h.handle("open app spotify").await.unwrap();
        assert_eq!(speech.spoken()[0], "Opening spotify");
    }

    #[tokio::test]
    async fn launch_is_an_open_synonym() {
        let (h, speech, _rx) = handler();
        h.handle("launch whatsapp").await.unwrap();
        assert_eq!(speech.spoken()[0], "Opening whatsapp");
    }

    #[tokio::test]
    async fn open_unknown_app_is_a_spoken_miss() {
        let (h, speech, _rx) = handler();
        h.handle("open app frobnicator").await.unwrap();
        assert!(speech.spoken()[0].contains("couldn't find an app called frobnicator"));
    }

    #[tokio::test]
    async fn bare_open_asks_which() {
        let (h, speech, _rx) = handler();
        h.handle("open app").await.unwrap();
        assert_eq!(speech.spoken()[0], "Which app would you like to open?");
    }

    #[test]
    fn partial_scheme_matching() {
        assert_eq!(
            AppControlHandler::find_scheme("google maps"),
            Some("comgooglemaps://")
        );
        assert!(AppControlHandler::find_scheme("the spotify app").is_some());
        assert!(AppControlHandler::find_scheme("frobnicator").is_none());
    }
}
