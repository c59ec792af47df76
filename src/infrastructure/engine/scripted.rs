//! Scripted speech engine adapter for tests and demos
//!
//! Plays back a fixed sequence of recognition turns, one per `start`,
//! with optional start-failure injection.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::{SpeechEngine, SpeechEngineError, SpeechEvent};
use crate::application::session::SessionBus;

/// One recognition session's outcome
#[derive(Debug, Clone)]
pub enum ScriptedTurn {
    /// A finalized utterance with a fixed confidence
    Utterance(String),
    /// The engine reports a recognition error
    RecognitionError(String),
    /// The session ends without a result
    Silence,
}

pub struct ScriptedSpeechEngine {
    bus: SessionBus,
    script: Mutex<VecDeque<ScriptedTurn>>,
    start_calls: AtomicUsize,
    fail_next_starts: AtomicUsize,
    stopped: AtomicBool,
}

impl ScriptedSpeechEngine {
    pub fn new(bus: SessionBus, script: Vec<ScriptedTurn>) -> Self {
        Self {
            bus,
            script: Mutex::new(script.into()),
            start_calls: AtomicUsize::new(0),
            fail_next_starts: AtomicUsize::new(0),
            stopped: AtomicBool::new(false),
        }
    }

    /// Make the next `count` start calls fail
    pub fn fail_next_starts(&self, count: usize) {
        self.fail_next_starts.store(count, Ordering::SeqCst);
    }

    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    pub fn was_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechEngine for ScriptedSpeechEngine {
    async fn start(&self, _locale: &str) -> Result<(), SpeechEngineError> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_next_starts.load(Ordering::SeqCst) > 0 {
            self.fail_next_starts.fetch_sub(1, Ordering::SeqCst);
            return Err(SpeechEngineError::StartFailed("scripted failure".to_string()));
        }

        self.bus.speech(SpeechEvent::Started);
        let turn = self
            .script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        match turn {
            Some(ScriptedTurn::Utterance(text)) => {
                self.bus.speech(SpeechEvent::Recognized);
                self.bus.speech(SpeechEvent::Result {
                    transcripts: vec![text],
                    confidences: vec![0.92],
                });
                self.bus.speech(SpeechEvent::Ended);
            }
            Some(ScriptedTurn::RecognitionError(code)) => {
                self.bus.speech(SpeechEvent::Error(code));
            }
            Some(ScriptedTurn::Silence) => {
                self.bus.speech(SpeechEvent::Ended);
            }
            // Script exhausted: stay listening silently
            None => {}
        }
        Ok(())
    }

    async fn stop(&self) -> Result<(), SpeechEngineError> {
        self.stopped.store(true, Ordering::SeqCst);
        Ok(())
    }
}
