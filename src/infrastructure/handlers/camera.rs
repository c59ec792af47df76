//! Camera handler: photo, selfie, and video recording commands

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::application::ports::{DomainHandler, HandlerError, SpeechOutput};

/// Owns the recording flag and sub-parses camera commands. The capture
/// leaves are tracing events standing in for the camera hardware.
pub struct CameraHandler {
    speech: Arc<dyn SpeechOutput>,
    recording: AtomicBool,
}

impl CameraHandler {
    pub fn new(speech: Arc<dyn SpeechOutput>) -> Self {
        Self {
            speech,
            recording: AtomicBool::new(false),
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording.load(Ordering::SeqCst)
    }

    fn take_photo(&self) {
        self.speech.speak("Taking photo now");
        info!("photo captured");
        self.speech.speak("Photo taken successfully");
    }

    fn take_selfie(&self) {
        self.speech.speak("Taking selfie with front camera");
        info!(camera = "front", "photo captured");
        self.speech.speak("Selfie taken successfully");
    }

    fn start_recording(&self) {
        if self.is_recording() {
            self.speech.speak("Already recording video");
            return;
        }
        self.recording.store(true, Ordering::SeqCst);
        info!("video recording started");
        self.speech.speak("Starting video recording");
    }

    fn stop_recording(&self) {
        if !self.is_recording() {
            self.speech.speak("Not currently recording");
            return;
        }
        self.recording.store(false, Ordering::SeqCst);
        info!("video recording stopped");
        self.speech.speak("Stopping video recording");
    }
}

#[async_trait]
impl DomainHandler for CameraHandler {
    async fn handle(&self, command: &str) -> Result<(), HandlerError> {
        if command.contains("selfie") || command.contains("front camera") {
            self.take_selfie();
        } else if command.contains("start recording") || command.contains("record video") {
            self.start_recording();
        } else if command.contains("stop recording") || command.contains("stop video") {
            self.stop_recording();
        } else if command.contains("open camera") {
            info!("camera opened");
            self.speech.speak("Opening camera app");
        } else if command.contains("close camera") {
            self.recording.store(false, Ordering::SeqCst);
            self.speech.speak("Closing camera");
        } else if command.contains("photo")
            || command.contains("picture")
            || command.contains("capture")
            || command.contains("snap")
        {
            self.take_photo();
        } else {
            self.speech.speak(
                "I didn't understand the camera command. Try saying 'take photo', 'start recording', or 'open camera'",
            );
        }
        Ok(())
    }
}
