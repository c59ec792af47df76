//! Communication handler: calls, messages, and contact lookups

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::info;

use crate::application::logbook::{read_list, EmergencyLogbook};
use crate::application::ports::{DomainHandler, HandlerError, KeyValueStore, SpeechOutput};
use crate::domain::command::{is_emergency_number, EntityExtractor, KeywordTable};
use crate::domain::command::CommandDomain;
use crate::domain::records::{CallRecord, Contact, CONTACTS_KEY, RECENT_CALLS_KEY};

/// Standard carrier voicemail number
const VOICEMAIL_NUMBER: &str = "*86";

/// Dials, messages, and searches contacts. The telephony leaves are
/// tracing events; contact data comes from the key-value store.
pub struct CommunicationHandler {
    speech: Arc<dyn SpeechOutput>,
    store: Arc<dyn KeyValueStore>,
    logbook: Arc<EmergencyLogbook>,
    extractor: EntityExtractor,
    search_extractor: EntityExtractor,
    last_dialed: Mutex<Option<String>>,
}

impl CommunicationHandler {
    pub fn new(
        speech: Arc<dyn SpeechOutput>,
        store: Arc<dyn KeyValueStore>,
        logbook: Arc<EmergencyLogbook>,
        table: &KeywordTable,
    ) -> Self {
        let stopwords = table
            .rule(CommandDomain::Communication)
            .map(|rule| rule.stopwords.clone())
            .unwrap_or_default();
        Self {
            speech,
            store,
            logbook,
            extractor: EntityExtractor::new(&stopwords),
            search_extractor: EntityExtractor::new(&[
                "find", "search", "for", "contact", "contacts", "the", "my", "please",
            ]),
            last_dialed: Mutex::new(None),
        }
    }

    pub fn last_dialed(&self) -> Option<String> {
        self.last_dialed.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn dial(&self, number: &str, display_name: Option<&str>) {
        *self.last_dialed.lock().unwrap_or_else(|e| e.into_inner()) = Some(number.to_string());
        let display = display_name.unwrap_or(number);
        self.speech.speak(&format!("Calling {display}"));
        info!(%number, "dialing");
    }

    async fn find_contact(&self, name: &str) -> Result<Option<Contact>, HandlerError> {
        let contacts: Vec<Contact> = read_list(self.store.as_ref(), CONTACTS_KEY)
            .await
            .map_err(|e| HandlerError::ActionFailed(e.to_string()))?;
        let needle = name.to_lowercase();
        Ok(contacts
            .into_iter()
            .find(|c| c.name.to_lowercase().contains(&needle)))
    }

    async fn handle_call(&self, command: &str) -> Result<(), HandlerError> {
        let Some(entity) = self.extractor.extract(command) else {
            self.speech.speak("Who would you like to call?");
            return Ok(());
        };

        if is_emergency_number(&entity.text) {
            self.speech.speak(&format!(
                "Making emergency call to {}. Stay calm.",
                entity.text
            ));
            self.dial(&entity.text, None);
            self.logbook
                .record_call(&entity.text, "emergency")
                .await
                .map_err(|e| HandlerError::ActionFailed(e.to_string()))?;
            return Ok(());
        }

        if entity.is_phone_number() {
            self.dial(&entity.text, None);
            return Ok(());
        }

        match self.find_contact(&entity.text).await? {
            Some(contact) => self.dial(&contact.phone, Some(&contact.name)),
            None => self.speech.speak(&format!(
                "I couldn't find a contact named {}. Please try again or say the phone number.",
                entity.text
            )),
        }
        Ok(())
    }

    async fn handle_message(&self, command: &str) -> Result<(), HandlerError> {
        let Some(entity) = self.extractor.extract(command) else {
            self.speech.speak("Who would you like to send a message to?");
            return Ok(());
        };

        if entity.is_phone_number() {
            self.open_messaging(&entity.text, None);
            return Ok(());
        }

        match self.find_contact(&entity.text).await? {
            Some(contact) => self.open_messaging(&contact.phone, Some(&contact.name)),
            None => self.speech.speak(&format!(
                "I couldn't find a contact named {}. Please try again or say the phone number.",
                entity.text
            )),
        }
        Ok(())
    }

    fn open_messaging(&self, number: &str, display_name: Option<&str>) {
        let display = display_name.unwrap_or(number);
        self.speech
            .speak(&format!("Opening messaging for {display}"));
        info!(%number, "opening messaging");
    }

    async fn redial(&self) -> Result<(), HandlerError> {
        if let Some(number) = self.last_dialed() {
            self.speech.speak("Redialing last number");
            self.dial(&number, None);
            return Ok(());
        }
        let recent: Vec<CallRecord> = read_list(self.store.as_ref(), RECENT_CALLS_KEY)
            .await
            .map_err(|e| HandlerError::ActionFailed(e.to_string()))?;
        match recent.first() {
            Some(record) => {
                let number = record.number.clone();
                self.dial(&number, None);
            }
            None => self.speech.speak("No recent calls found to redial"),
        }
        Ok(())
    }

    async fn recent_calls(&self) -> Result<(), HandlerError> {
        let recent: Vec<CallRecord> = read_list(self.store.as_ref(), RECENT_CALLS_KEY)
            .await
            .map_err(|e| HandlerError::ActionFailed(e.to_string()))?;
        if recent.is_empty() {
            self.speech.speak("No recent calls found");
            return Ok(());
        }

        let count = recent.len().min(5);
        self.speech
            .speak(&format!("Here are your {count} most recent calls:"));
        for (i, record) in recent.iter().take(count).enumerate() {
            self.speech.speak(&format!(
                "{}: {} {}",
                i + 1,
                record.spoken_direction(),
                record.number
            ));
        }
        Ok(())
    }

    async fn search_contact(&self, command: &str) -> Result<(), HandlerError> {
        let Some(entity) = self.search_extractor.extract(command) else {
            self.speech.speak("What contact would you like to find?");
            return Ok(());
        };

        match self.find_contact(&entity.text).await? {
            Some(contact) => self.speech.speak(&format!(
                "Found {}. Phone: {}",
                contact.name, contact.phone
            )),
            None => self
                .speech
                .speak(&format!("No contact found for {}", entity.text)),
        }
        Ok(())
    }
}

#[async_trait]
impl DomainHandler for CommunicationHandler {
    async fn handle(&self, command: &str) -> Result<(), HandlerError> {
        // Specific phrases before the generic "call"/"message" verbs so
        // "call back" and "recent calls" reach their own actions.
        if command.contains("redial") || command.contains("call back") {
            self.redial().await
        } else if command.contains("voicemail") {
            self.speech.speak("Checking voicemail");
            self.dial(VOICEMAIL_NUMBER, Some("voicemail"));
            Ok(())
        } else if command.contains("recent calls") || command.contains("call log") {
            self.recent_calls().await
        } else if command.contains("add contact") {
            self.speech
                .speak("Opening contacts app to add a new contact");
            Ok(())
        } else if command.contains("find contact") || command.contains("contact") {
            self.search_contact(command).await
        } else if command.contains("call") {
            self.handle_call(command).await
        } else if command.contains("message") || command.contains("text") || command.contains("sms")
        {
            self.handle_message(command).await
        } else {
            self.speech.speak(
                "I didn't understand the communication command. Try saying 'call someone', 'send message', or 'recent calls'",
            );
            Ok(())
        }
    }
}
