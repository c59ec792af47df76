//! Device handler: flashlight, volume, and settings commands

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use crate::application::ports::{DomainHandler, HandlerError, SpeechOutput};

static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("number regex"));

/// SOS pattern in milliseconds: 3 short, 3 long, 3 short, alternating
/// torch-on and gap starting with on.
const SOS_PATTERN_MS: &[u64] = &[
    200, 200, 200, 200, 200, 600, // short short short
    600, 200, 600, 200, 600, 600, // long long long
    200, 200, 200, 200, 200, // short short short
];

/// Controls the torch and volume state and answers settings commands with
/// spoken guidance. The hardware leaves are tracing events; state is kept
/// so toggles and SOS signalling behave consistently.
pub struct DeviceHandler {
    speech: Arc<dyn SpeechOutput>,
    flashlight_on: AtomicBool,
    volume: Mutex<f32>,
}

impl DeviceHandler {
    pub fn new(speech: Arc<dyn SpeechOutput>) -> Self {
        Self {
            speech,
            flashlight_on: AtomicBool::new(false),
            volume: Mutex::new(0.5),
        }
    }

    pub fn flashlight_is_on(&self) -> bool {
        self.flashlight_on.load(Ordering::SeqCst)
    }

    pub fn volume(&self) -> f32 {
        *self.volume.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_torch(&self, on: bool) {
        self.flashlight_on.store(on, Ordering::SeqCst);
        debug!(on, "torch switched");
    }

    async fn handle_flashlight(&self, command: &str) {
        if command.contains("off") {
            self.set_torch(false);
            self.speech.speak("Flashlight turned off");
        } else if command.contains("on") {
            self.set_torch(true);
            self.speech.speak("Flashlight turned on");
        } else if command.contains("toggle") {
            let now_on = !self.flashlight_is_on();
            self.set_torch(now_on);
            self.speech
                .speak(if now_on { "Flashlight turned on" } else { "Flashlight turned off" });
        } else {
            self.speech
                .speak("Say 'turn on flashlight' or 'turn off flashlight'");
        }
    }

    fn set_volume_level(&self, level: f32) {
        let level = level.clamp(0.0, 1.0);
        *self.volume.lock().unwrap_or_else(|e| e.into_inner()) = level;
        debug!(level, "volume set");
    }

    /// Public so the emergency handler can drive it directly.
    pub fn set_volume_max(&self) {
        self.set_volume_level(1.0);
        self.speech.speak("Volume set to maximum");
    }

    async fn handle_volume(&self, command: &str) {
        if command.contains("up") || command.contains("increase") || command.contains("higher") {
            let level = (self.volume() + 0.1).min(1.0);
            self.set_volume_level(level);
            self.speech
                .speak(&format!("Volume increased to {}%", (level * 100.0).round()));
        } else if command.contains("down")
            || command.contains("decrease")
            || command.contains("lower")
        {
            let level = (self.volume() - 0.1).max(0.0);
            self.set_volume_level(level);
            self.speech
                .speak(&format!("Volume decreased to {}%", (level * 100.0).round()));
        } else if command.contains("max") {
            self.set_volume_max();
        } else if command.contains("min") || command.contains("mute") {
            self.set_volume_level(0.0);
            self.speech.speak("Volume muted");
        } else if let Some(percent) = parse_percent(command) {
            self.set_volume_level(percent as f32 / 100.0);
            self.speech.speak(&format!("Volume set to {percent}%"));
        } else {
            self.speech.speak(&format!(
                "Current volume is {}%",
                (self.volume() * 100.0).round()
            ));
        }
    }

    async fn handle_silent_mode(&self, command: &str) {
        if command.contains("off") || command.contains("disable") {
            self.set_volume_level(0.5);
            self.speech.speak("Silent mode disabled, volume restored");
        } else if command.contains("on") || command.contains("enable") {
            self.set_volume_level(0.0);
            self.speech.speak("Device is now in silent mode");
        } else {
            self.speech
                .speak("Say 'enable silent mode' or 'disable silent mode'");
        }
    }

    /// Emergency SOS flashlight signal. Fire-and-forget: the pattern runs
    /// on its own timer task and announces completion when done.
    pub fn start_sos_signal(self: Arc<Self>) {
        info!("starting SOS flashlight signal");
        self.speech.speak("Starting emergency SOS flashlight signal");
        tokio::spawn(async move {
            for (step, ms) in SOS_PATTERN_MS.iter().enumerate() {
                self.set_torch(step % 2 == 0);
                tokio::time::sleep(Duration::from_millis(*ms)).await;
            }
            self.set_torch(false);
            self.speech.speak("SOS signal complete");
        });
    }
}

fn parse_percent(command: &str) -> Option<u32> {
    NUMBER.find(command)?.as_str().parse().ok()
}

#[async_trait]
impl DomainHandler for DeviceHandler {
    async fn handle(&self, command: &str) -> Result<(), HandlerError> {
        if command.contains("flashlight") || command.contains("torch") {
            self.handle_flashlight(command).await;
        } else if command.contains("volume") {
            self.handle_volume(command).await;
        } else if command.contains("brightness") {
            self.speech
                .speak("Brightness control requires manual adjustment in device settings");
        } else if command.contains("wifi") || command.contains("wi-fi") {
            self.speech
                .speak("Opening WiFi settings. Please toggle WiFi manually");
        } else if command.contains("bluetooth") {
            self.speech
                .speak("Opening Bluetooth settings. Please toggle Bluetooth manually");
        } else if command.contains("airplane") || command.contains("flight mode") {
            self.speech
                .speak("Opening device settings. Please toggle airplane mode manually");
        } else if command.contains("do not disturb") || command.contains("silent mode") {
            self.handle_silent_mode(command).await;
        } else if command.contains("screen") && (command.contains("on") || command.contains("off"))
        {
            if command.contains("off") {
                self.speech.speak(
                    "Screen lock requires manual action for security. Please use the power button",
                );
            } else {
                self.speech.speak("Screen is already on");
            }
        } else if command.contains("battery") {
            self.speech
                .speak("Battery status requires device integration and is not available here");
        } else if command.contains("device info") {
            self.speech
                .speak("Device information requires device integration and is not available here");
        } else {
            self.speech.speak(
                "I didn't understand the device command. Try saying 'turn on flashlight', 'volume up', or 'silent mode'",
            );
        }
        Ok(())
    }
}
