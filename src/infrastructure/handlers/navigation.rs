//! Navigation handler: directions, settings panels, and system navigation

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::application::ports::{DomainHandler, HandlerError, SpeechOutput};
use crate::domain::command::CommandDomain;
use crate::domain::command::{EntityExtractor, KeywordTable};

/// Speaks directions and settings guidance. The maps leaf is a tracing
/// event carrying the query URL.
pub struct NavigationHandler {
    speech: Arc<dyn SpeechOutput>,
    destination_extractor: EntityExtractor,
}

impl NavigationHandler {
    pub fn new(speech: Arc<dyn SpeechOutput>, table: &KeywordTable) -> Self {
        let stopwords = table
            .rule(CommandDomain::Navigation)
            .map(|rule| rule.stopwords.clone())
            .unwrap_or_default();
        Self {
            speech,
            destination_extractor: EntityExtractor::new(&stopwords),
        }
    }

    fn navigate(&self, command: &str) {
        let Some(destination) = self.destination_extractor.extract(command) else {
            self.speech.speak("Where would you like to navigate to?");
            return;
        };

        self.speech
            .speak(&format!("Getting directions to {}", destination.text));
        info!(
            url = %format!("https://maps.google.com/maps?q={}", destination.text.replace(' ', "+")),
            "opening maps"
        );
    }

    fn open_settings(&self, command: &str) {
        let panel = if command.contains("wifi") || command.contains("wi-fi") {
            "WiFi"
        } else if command.contains("bluetooth") {
            "Bluetooth"
        } else if command.contains("display") || command.contains("brightness") {
            "display"
        } else if command.contains("sound") || command.contains("volume") {
            "sound"
        } else {
            "device"
        };
        self.speech.speak(&format!("Opening {panel} settings"));
        info!(panel, "opening settings");
    }
}

#[async_trait]
impl DomainHandler for NavigationHandler {
    async fn handle(&self, command: &str) -> Result<(), HandlerError> {
        if command.contains("navigate")
            || command.contains("directions")
            || command.contains("map")
            || command.contains("go to")
        {
            self.navigate(command);
        } else if command.contains("settings") {
            self.open_settings(command);
        } else if command.contains("home screen") || command.contains("launcher") {
            self.speech
                .speak("Please press the home button to go to home screen");
        } else if command.contains("back") || command.contains("previous") {
            self.speech.speak("Please use the back button or back gesture");
        } else if command.contains("recent apps") || command.contains("task switcher") {
            self.speech.speak("Please use the recent apps button or gesture");
        } else if command.contains("notifications") {
            self.speech
                .speak("Please swipe down from the top to see notifications");
        } else {
            self.speech.speak(
                "I didn't understand the navigation command. Try saying 'navigate to' or 'go to settings'",
            );
        }
        Ok(())
    }
}
