//! Emergency handler: services calls, SOS mode, and safety guidance

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::application::logbook::EmergencyLogbook;
use crate::application::ports::{DomainHandler, HandlerError, SpeechOutput};
use crate::infrastructure::handlers::device::DeviceHandler;

/// Regional emergency service numbers, keyed by locale region
const EMERGENCY_SERVICES: &[(&str, &str)] = &[
    ("us", "911"),
    ("uk", "999"),
    ("gb", "999"),
    ("eu", "112"),
    ("au", "000"),
    ("in", "112"),
];

const MEDICAL_GUIDANCE: &[&str] = &[
    "If you're conscious and able to speak, stay on the line with emergency services.",
    "Don't move if you suspect spinal injury unless you're in immediate danger.",
    "If bleeding, apply pressure to the wound with clean cloth.",
    "Try to stay calm and breathe normally.",
];

const FIRE_GUIDANCE: &[&str] = &[
    "Get out of the building immediately if safe to do so.",
    "Stay low if there's smoke and crawl if necessary.",
    "Feel doors before opening, and if hot, find another way out.",
    "Once outside, stay out and don't go back inside.",
];

const SAFETY_GUIDANCE: &[&str] = &[
    "Try to get to a safe, well-lit area if possible.",
    "Stay on the line with police and describe your situation.",
    "If you must run, head toward other people or a public place.",
    "Keep this phone with you for emergency services to contact you.",
];

/// Pick the emergency number for a locale like "en-US" or "en-GB".
/// Defaults to 911 when the region is unknown.
pub fn emergency_number_for_locale(locale: &str) -> &'static str {
    let region = locale
        .rsplit(['-', '_'])
        .next()
        .unwrap_or("")
        .to_lowercase();
    EMERGENCY_SERVICES
        .iter()
        .find(|(code, _)| *code == region)
        .map(|(_, number)| *number)
        .unwrap_or("911")
}

/// Handles the highest-priority domain. Every internal failure falls back
/// to a direct services call; this handler never leaves an emergency
/// command unanswered.
pub struct EmergencyHandler {
    speech: Arc<dyn SpeechOutput>,
    logbook: Arc<EmergencyLogbook>,
    device: Arc<DeviceHandler>,
    services_number: String,
}

impl EmergencyHandler {
    pub fn new(
        speech: Arc<dyn SpeechOutput>,
        logbook: Arc<EmergencyLogbook>,
        device: Arc<DeviceHandler>,
        locale: &str,
    ) -> Self {
        Self {
            speech,
            logbook,
            device,
            services_number: emergency_number_for_locale(locale).to_string(),
        }
    }

    async fn call_services(&self) -> Result<(), HandlerError> {
        self.speech.speak(&format!(
            "Calling emergency services at {}. Stay calm, help is on the way.",
            self.services_number
        ));
        info!(number = %self.services_number, "dialing emergency services");
        self.logbook
            .record_call(&self.services_number, "services")
            .await
            .map_err(|e| HandlerError::ActionFailed(e.to_string()))
    }

    async fn call_emergency_contact(&self) -> Result<(), HandlerError> {
        let contacts = self
            .logbook
            .emergency_contacts()
            .await
            .map_err(|e| HandlerError::ActionFailed(e.to_string()))?;

        let Some(contact) = contacts.first() else {
            self.speech.speak(
                "No emergency contacts configured. Calling emergency services instead.",
            );
            return self.call_services().await;
        };

        self.speech
            .speak(&format!("Calling emergency contact {}", contact.name));
        info!(number = %contact.phone, "dialing emergency contact");
        self.logbook
            .record_call(&contact.phone, "emergency_contact")
            .await
            .map_err(|e| HandlerError::ActionFailed(e.to_string()))
    }

    async fn sos_procedures(&self) -> Result<(), HandlerError> {
        self.device.clone().start_sos_signal();
        self.device.set_volume_max();
        self.logbook
            .record_sos()
            .await
            .map_err(|e| HandlerError::ActionFailed(e.to_string()))
    }

    async fn activate_sos(&self) -> Result<(), HandlerError> {
        self.speech.speak(
            "Activating SOS emergency mode. Calling emergency services and notifying contacts.",
        );
        self.call_services().await?;
        self.sos_procedures().await
    }

    fn share_location(&self) {
        self.speech.speak("Getting your location information");
        self.speech.speak(
            "Unable to get precise location. Please describe your location to emergency services.",
        );
    }

    async fn guided_emergency(
        &self,
        announcement: &str,
        guidance: &[&str],
    ) -> Result<(), HandlerError> {
        self.speech.speak(announcement);
        self.call_services().await?;
        for line in guidance {
            self.speech.speak(line);
        }
        Ok(())
    }

    async fn general_emergency(&self) -> Result<(), HandlerError> {
        self.speech
            .speak("Emergency detected. Activating all emergency procedures.");
        self.call_services().await?;
        self.sos_procedures().await
    }

    async fn try_handle(&self, command: &str) -> Result<(), HandlerError> {
        if command.contains("call 911") || command.contains("call emergency") {
            self.call_services().await
        } else if command.contains("emergency") && command.contains("contact") {
            self.call_emergency_contact().await
        } else if command.contains("sos") {
            self.activate_sos().await
        } else if command.contains("location") || command.contains("where am i") {
            self.share_location();
            Ok(())
        } else if command.contains("medical") || command.contains("health") {
            self.guided_emergency(
                "Medical emergency detected. Calling emergency medical services. Stay calm and don't move unless safe to do so.",
                MEDICAL_GUIDANCE,
            )
            .await
        } else if command.contains("fire") {
            self.guided_emergency(
                "Fire emergency detected. Calling fire department. Get to safety immediately and stay low if there's smoke.",
                FIRE_GUIDANCE,
            )
            .await
        } else if command.contains("police") {
            self.guided_emergency(
                "Police emergency detected. Calling police. Try to get to a safe location if possible.",
                SAFETY_GUIDANCE,
            )
            .await
        } else if command.contains("help") {
            self.activate_sos().await
        } else {
            self.general_emergency().await
        }
    }
}

#[async_trait]
impl DomainHandler for EmergencyHandler {
    async fn handle(&self, command: &str) -> Result<(), HandlerError> {
        if let Err(err) = self.try_handle(command).await {
            // Escalation path: an emergency command must end in a services
            // call even when the subsystem itself is failing.
            error!(%err, "emergency handling failed, falling back to direct call");
            self.speech
                .speak("Emergency system error. Calling emergency services directly.");
            info!(number = %self.services_number, "dialing emergency services");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::logbook::read_list;
    use crate::application::ports::KeyValueStore;
    use crate::domain::records::{
        Contact, EmergencyLogEntry, SosLogEntry, EMERGENCY_CONTACTS_KEY, EMERGENCY_LOG_KEY,
        SOS_LOG_KEY,
    };
    use crate::infrastructure::store::MemoryStore;
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

    fn handler(store: Arc<MemoryStore>) -> (EmergencyHandler, Arc<RecordingSpeech>) {
        let speech: Arc<RecordingSpeech> = Arc::new(RecordingSpeech::default());
        let logbook = Arc::new(EmergencyLogbook::new(store, "test-device"));
        let device = Arc::new(DeviceHandler::new(speech.clone()));
        (
            EmergencyHandler::new(speech.clone(), logbook, device, "en-US"),
            speech,
        )
    }

    #[test]
    fn locale_maps_to_regional_number() {
        assert_eq!(emergency_number_for_locale("en-US"), "911");
        assert_eq!(emergency_number_for_locale("en-GB"), "999");
        assert_eq!(emergency_number_for_locale("de_EU"), "112");
        assert_eq!(emergency_number_for_locale("en-AU"), "000");
        assert_eq!(emergency_number_for_locale("xx-YY"), "911");
    }

    #[tokio::test]
    async fn call_911_dials_services_and_logs() {
        let store = Arc::new(MemoryStore::new());
        let (h, speech) = handler(store.clone());

        h.handle("call 911").await.unwrap();

        assert!(speech.spoken()[0].contains("Calling emergency services at 911"));
        let entries: Vec<EmergencyLogEntry> =
            read_list(store.as_ref(), EMERGENCY_LOG_KEY).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, "services");
    }

    #[tokio::test]
    async fn emergency_contact_prefers_configured_contact() {
        let store = Arc::new(MemoryStore::new());
        let contacts = vec![Contact {
            name: "Sister".to_string(),
            phone: "555-0199".to_string(),
        }];
        store
            .set(
                EMERGENCY_CONTACTS_KEY,
                &serde_json::to_string(&contacts).unwrap(),
            )
            .await
            .unwrap();
        let (h, speech) = handler(store.clone());

        h.handle("call my emergency contact").await.unwrap();

        assert_eq!(speech.spoken()[0], "Calling emergency contact Sister");
        let entries: Vec<EmergencyLogEntry> =
            read_list(store.as_ref(), EMERGENCY_LOG_KEY).await.unwrap();
        assert_eq!(entries[0].kind, "emergency_contact");
    }

    #[tokio::test]
    async fn emergency_contact_falls_back_to_services() {
        let store = Arc::new(MemoryStore::new());
        let (h, speech) = handler(store);

        h.handle("emergency contact").await.unwrap();

        let spoken = speech.spoken();
        assert!(spoken[0].contains("No emergency contacts configured"));
        assert!(spoken[1].contains("Calling emergency services at 911"));
    }

    #[tokio::test(start_paused = true)]
    async fn sos_runs_full_procedures() {
        let store = Arc::new(MemoryStore::new());
        let (h, speech) = handler(store.clone());

        h.handle("sos").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(6000)).await;

        let spoken = speech.spoken();
        assert!(spoken[0].contains("Activating SOS emergency mode"));
        assert!(spoken.iter().any(|l| l == "Volume set to maximum"));
        assert!(spoken.iter().any(|l| l == "SOS signal complete"));

        let sos: Vec<SosLogEntry> = read_list(store.as_ref(), SOS_LOG_KEY).await.unwrap();
        assert_eq!(sos.len(), 1);
        let calls: Vec<EmergencyLogEntry> =
            read_list(store.as_ref(), EMERGENCY_LOG_KEY).await.unwrap();
        assert_eq!(calls.len(), 1);
    }

    #[tokio::test]
    async fn help_activates_sos() {
        let store = Arc::new(MemoryStore::new());
        let (h, speech) = handler(store);

        h.handle("help").await.unwrap();
        assert!(speech.spoken()[0].contains("Activating SOS emergency mode"));
    }

    #[tokio::test]
    async fn medical_emergency_speaks_guidance() {
        let store = Arc::new(MemoryStore::new());
        let (h, speech) = handler(store);

        h.handle("medical emergency").await.unwrap();

        let spoken = speech.spoken();
        assert!(spoken[0].contains("Medical emergency detected"));
        assert!(spoken
            .iter()
            .any(|l| l.contains("stay on the line with emergency services")));
    }

    #[tokio::test]
    async fn fire_emergency_speaks_guidance() {
        let store = Arc::new(MemoryStore::new());
        let (h, speech) = handler(store);

        h.handle("fire").await.unwrap();
        assert!(speech.spoken()[0].contains("Fire emergency detected"));
    }

    #[tokio::test]
    async fn unknown_emergency_is_general() {
        let store = Arc::new(MemoryStore::new());
        let (h, speech) = handler(store);

        h.handle("urgent").await.unwrap();
        assert!(speech.spoken()[0].contains("Activating all emergency procedures"));
    }
}
