//! Line-based speech engine adapter
//!
//! Treats each stdin line as one finalized transcript, which makes the
//! whole pipeline drivable from a terminal without a microphone. Behaves
//! like a one-utterance-per-session recognizer: after a result the
//! session auto-ends and the manager has to start a new one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::application::ports::{SpeechEngine, SpeechEngineError, SpeechEvent};
use crate::application::session::{ControlEvent, SessionBus};

pub struct LineSpeechEngine {
    bus: SessionBus,
    session_open: Arc<AtomicBool>,
}

impl LineSpeechEngine {
    /// Create the adapter and spawn its stdin pump. Lines typed while no
    /// recognition session is open are discarded, mirroring the drop
    /// policy for stale recognitions.
    pub fn spawn(bus: SessionBus) -> Self {
        let session_open = Arc::new(AtomicBool::new(false));
        let pump_open = Arc::clone(&session_open);
        let pump_bus = bus.clone();

        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let line = line.trim().to_string();
                        if line.is_empty() {
                            continue;
                        }
                        if !pump_open.swap(false, Ordering::SeqCst) {
                            debug!(%line, "no recognition session open, input discarded");
                            continue;
                        }
                        pump_bus.speech(SpeechEvent::Recognized);
                        pump_bus.speech(SpeechEvent::Result {
                            transcripts: vec![line],
                            confidences: vec![1.0],
                        });
                        pump_bus.speech(SpeechEvent::Ended);
                    }
                    Ok(None) => {
                        info!("stdin closed, requesting shutdown");
                        pump_bus.control(ControlEvent::Shutdown);
                        break;
                    }
                    Err(err) => {
                        pump_bus.speech(SpeechEvent::Error(err.to_string()));
                        break;
                    }
                }
            }
        });

        Self { bus, session_open }
    }
}

#[async_trait]
impl SpeechEngine for LineSpeechEngine {
    async fn start(&self, locale: &str) -> Result<(), SpeechEngineError> {
        debug!(%locale, "recognition session opened");
        self.session_open.store(true, Ordering::SeqCst);
        self.bus.speech(SpeechEvent::Started);
        Ok(())
    }

    async fn stop(&self) -> Result<(), SpeechEngineError> {
        self.session_open.store(false, Ordering::SeqCst);
        Ok(())
    }
}
