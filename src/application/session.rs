//! Continuous-listening session manager
//!
//! Owns the lifecycle state machine, the restart/backoff policy, and the
//! foreground/background activity gate. All work happens on one event
//! stream, so there is at most one utterance in flight and no locking
//! around the state machine itself.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::application::dispatch::DispatchRouter;
use crate::application::ports::{SpeechEngine, SpeechEvent, SpeechOutput};
use crate::domain::command::{CommandPipeline, LastCommand, PipelineOutcome};
use crate::domain::session::{ListeningSession, SessionState, Utterance};

/// Host-driven control events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// Application went to the background
    Suspend,
    /// Application returned to the foreground
    Resume,
    /// Exit requested (voice command or OS signal)
    Shutdown,
}

/// Everything the session loop reacts to
#[derive(Debug)]
pub enum SessionEvent {
    Speech(SpeechEvent),
    Control(ControlEvent),
    /// A scheduled restart came due; the tag invalidates stale timers
    RestartDue(u64),
}

/// Sender half of the session event stream. Cloned into the speech engine
/// adapter, the signal handler, and the app-control handler.
#[derive(Clone)]
pub struct SessionBus {
    tx: mpsc::UnboundedSender<SessionEvent>,
}

impl SessionBus {
    pub fn speech(&self, event: SpeechEvent) {
        let _ = self.tx.send(SessionEvent::Speech(event));
    }

    pub fn control(&self, event: ControlEvent) {
        let _ = self.tx.send(SessionEvent::Control(event));
    }

    fn restart_due(&self, generation: u64) {
        let _ = self.tx.send(SessionEvent::RestartDue(generation));
    }
}

/// Create the session event stream
pub fn session_channel() -> (SessionBus, mpsc::UnboundedReceiver<SessionEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (SessionBus { tx }, rx)
}

/// Runtime options for the session loop
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Locale handed to the speech engine on every start
    pub locale: String,
    /// Delay before restarting after a recognition end, error, or dispatch
    pub restart_delay: Duration,
    /// Delay before retrying a failed engine start. Retried indefinitely;
    /// there is no ceiling (see DESIGN.md).
    pub retry_delay: Duration,
    /// Spoken once at startup, before the first engine start
    pub welcome_message: Option<String>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            restart_delay: Duration::from_millis(1000),
            retry_delay: Duration::from_millis(2000),
            welcome_message: Some(
                "Voice assistant is ready. Say 'hey assistant' to give me commands.".to_string(),
            ),
        }
    }
}

/// State published for display and diagnostics
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub last_command: Option<LastCommand>,
}

/// At most one pending restart. Scheduling while one is pending is a
/// no-op; cancelling invalidates both the timer task and any tick it
/// already put on the queue.
struct RestartSchedule {
    bus: SessionBus,
    handle: Option<JoinHandle<()>>,
    generation: u64,
}

impl RestartSchedule {
    fn new(bus: SessionBus) -> Self {
        Self {
            bus,
            handle: None,
            generation: 0,
        }
    }

    fn schedule(&mut self, delay: Duration) {
        if self.handle.as_ref().is_some_and(|h| !h.is_finished()) {
            debug!("restart already scheduled");
            return;
        }
        self.generation += 1;
        let generation = self.generation;
        let bus = self.bus.clone();
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            bus.restart_due(generation);
        }));
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.generation += 1;
    }

    /// True when the tick belongs to the currently scheduled restart
    fn acknowledge(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.handle = None;
        true
    }
}

/// The continuous-listening use case.
///
/// Event flow: speech engine events update the state machine; a final
/// result is pushed through the classification pipeline and dispatched;
/// afterwards a restart is scheduled so the engine starts listening again.
pub struct ListeningSessionManager<E: SpeechEngine> {
    engine: E,
    pipeline: CommandPipeline,
    router: DispatchRouter,
    speech: Arc<dyn SpeechOutput>,
    options: SessionOptions,
    session: ListeningSession,
    /// Foregrounded and not shut down. While false, no engine start is
    /// ever issued.
    active: bool,
    last_command: Option<LastCommand>,
    restart: RestartSchedule,
    snapshot: Arc<Mutex<SessionSnapshot>>,
}

impl<E: SpeechEngine> ListeningSessionManager<E> {
    pub fn new(
        engine: E,
        pipeline: CommandPipeline,
        router: DispatchRouter,
        speech: Arc<dyn SpeechOutput>,
        options: SessionOptions,
        bus: SessionBus,
    ) -> Self {
        Self {
            engine,
            pipeline,
            router,
            speech,
            options,
            session: ListeningSession::new(),
            active: true,
            last_command: None,
            restart: RestartSchedule::new(bus),
            snapshot: Arc::new(Mutex::new(SessionSnapshot::default())),
        }
    }

    /// Shared view of the session state for display and tests
    pub fn snapshot_handle(&self) -> Arc<Mutex<SessionSnapshot>> {
        Arc::clone(&self.snapshot)
    }

    /// Run until shutdown. Consumes the manager; the receiver must be the
    /// one paired with the bus this manager was built with.
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<SessionEvent>) {
        if let Some(welcome) = self.options.welcome_message.clone() {
            self.speech.speak(&welcome);
        }
        self.activate().await;
        self.publish_snapshot();

        while let Some(event) = events.recv().await {
            match event {
                SessionEvent::Speech(ev) => self.on_speech_event(ev).await,
                SessionEvent::Control(ControlEvent::Suspend) => self.suspend(),
                SessionEvent::Control(ControlEvent::Resume) => self.resume().await,
                SessionEvent::Control(ControlEvent::Shutdown) => {
                    self.shutdown().await;
                    self.publish_snapshot();
                    break;
                }
                SessionEvent::RestartDue(generation) => self.on_restart_due(generation).await,
            }
            self.publish_snapshot();
        }
        info!("session loop ended");
    }

    /// Start the engine unless a session is already live. On failure,
    /// schedule a retry and keep the loop alive: engine unavailability is
    /// never fatal.
    async fn activate(&mut self) {
        if !self.active {
            debug!("activate skipped, not active");
            return;
        }
        if matches!(
            self.session.state(),
            SessionState::Listening | SessionState::Processing
        ) {
            debug!(state = %self.session.state(), "activate skipped, session live");
            return;
        }

        match self.engine.start(&self.options.locale).await {
            Ok(()) => {
                if let Err(err) = self.session.begin_listening() {
                    warn!(%err, "unexpected transition after engine start");
                }
                info!(locale = %self.options.locale, "listening");
            }
            Err(err) => {
                warn!(%err, "engine start failed, will retry");
                if self.session.state() != SessionState::Restarting {
                    if let Err(err) = self.session.begin_restarting() {
                        warn!(%err, "unexpected transition after start failure");
                    }
                }
                self.restart.schedule(self.options.retry_delay);
            }
        }
    }

    async fn on_speech_event(&mut self, event: SpeechEvent) {
        match event {
            SpeechEvent::Started => debug!("speech started"),
            SpeechEvent::Recognized => debug!("speech recognized"),
            SpeechEvent::PartialResult { transcripts } => {
                debug!(best = transcripts.first().map(String::as_str), "partial result");
            }
            SpeechEvent::Ended => self.on_recognition_over("recognition ended").await,
            SpeechEvent::Error(code) => {
                warn!(%code, "recognition error");
                self.on_recognition_over("recognition error").await;
            }
            SpeechEvent::Result {
                transcripts,
                confidences,
            } => self.on_final_result(transcripts, confidences).await,
        }
    }

    /// SpeechEnded / SpeechError: head back through RESTARTING. Events
    /// arriving in any other state are stale and dropped, which is what
    /// keeps a burst of errors from stacking up duplicate restarts.
    async fn on_recognition_over(&mut self, cause: &str) {
        if self.session.state() != SessionState::Listening {
            debug!(state = %self.session.state(), cause, "ignoring engine event");
            return;
        }
        if let Err(err) = self.session.begin_restarting() {
            warn!(%err, "unexpected transition");
            return;
        }
        if self.active {
            self.restart.schedule(self.options.restart_delay);
        }
    }

    /// Final results are only acted upon while LISTENING; anything else is
    /// a stale recognition and is dropped rather than queued.
    async fn on_final_result(&mut self, transcripts: Vec<String>, confidences: Vec<f32>) {
        if self.session.state() != SessionState::Listening {
            debug!(state = %self.session.state(), "dropping stale result");
            return;
        }
        // Transcripts are pre-sorted by the adapter: first is best.
        let Some(text) = transcripts.into_iter().next() else {
            return;
        };
        let confidence = confidences.first().copied().unwrap_or(0.0);

        if let Err(err) = self.session.begin_processing() {
            warn!(%err, "unexpected transition");
            return;
        }

        let utterance = Utterance::finalized(text, confidence);
        self.process_utterance(utterance).await;

        // Dispatch is over. If the host backgrounded us meanwhile, settle
        // into SUSPENDED; otherwise schedule the next listening window.
        if self.active {
            if let Err(err) = self.session.begin_restarting() {
                warn!(%err, "unexpected transition");
            }
            self.restart.schedule(self.options.restart_delay);
        } else {
            if let Err(err) = self.session.suspend() {
                warn!(%err, "unexpected transition");
            }
            info!("suspended after dispatch");
        }
    }

    async fn process_utterance(&mut self, utterance: Utterance) {
        let outcome = self
            .pipeline
            .process(&utterance.text, self.last_command.is_some());
        match outcome {
            PipelineOutcome::Rejected => {
                debug!(text = %utterance.text, "no wake phrase, dropped");
            }
            PipelineOutcome::Noise => {
                debug!(text = %utterance.text, "noise after wake stripping");
            }
            PipelineOutcome::Command(cmd) => {
                info!(
                    domain = %cmd.domain,
                    command = %cmd.command,
                    confidence = utterance.confidence,
                    "dispatching"
                );
                self.last_command = Some(LastCommand::new(
                    utterance.text.clone(),
                    cmd.domain,
                    cmd.entity.clone(),
                ));
                self.router.dispatch(cmd.domain, &cmd.command).await;
            }
        }
    }

    /// Background: stop issuing starts and cancel any pending restart. An
    /// in-flight dispatch is never interrupted; its completion path sees
    /// the cleared activity flag and settles into SUSPENDED.
    fn suspend(&mut self) {
        self.active = false;
        self.restart.cancel();
        match self.session.state() {
            SessionState::Processing => {
                debug!("suspension deferred until dispatch completes");
            }
            SessionState::Suspended => {}
            _ => {
                if let Err(err) = self.session.suspend() {
                    warn!(%err, "unexpected transition");
                }
                info!("suspended");
            }
        }
    }

    /// Foreground: re-enter the listening loop. Never duplicates a start
    /// while a session is still live.
    async fn resume(&mut self) {
        self.active = true;
        match self.session.state() {
            SessionState::Processing => debug!("resume noted, dispatch in flight"),
            SessionState::Listening => debug!("resume noted, already listening"),
            _ => self.activate().await,
        }
    }

    async fn shutdown(&mut self) {
        self.active = false;
        self.restart.cancel();
        if let Err(err) = self.engine.stop().await {
            warn!(%err, "engine stop failed during shutdown");
        }
        if self.session.state() != SessionState::Suspended {
            if let Err(err) = self.session.suspend() {
                warn!(%err, "unexpected transition");
            }
        }
        info!("shut down");
    }

    async fn on_restart_due(&mut self, generation: u64) {
        if !self.restart.acknowledge(generation) {
            debug!("stale restart tick dropped");
            return;
        }
        self.activate().await;
    }

    fn publish_snapshot(&self) {
        let mut guard = self.snapshot.lock().unwrap_or_else(|e| e.into_inner());
        guard.state = self.session.state();
        guard.last_command = self.last_command.clone();
    }
}
