//! Assistant runner and one-shot classify command

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::application::ports::{ConfigStore, KeyValueStore, SpeechOutput};
use crate::application::{
    session_channel, DispatchRouter, EmergencyLogbook, ListeningSessionManager, SessionOptions,
};
use crate::domain::command::{CommandDomain, CommandPipeline, KeywordTable, PipelineOutcome};
use crate::domain::config::AppConfig;
use crate::infrastructure::{
    AppControlHandler, CameraHandler, CommunicationHandler, ConsoleSpeechOutput, DeviceHandler,
    EmergencyHandler, EspeakSpeechOutput, JsonFileStore, LineSpeechEngine, NavigationHandler,
    XdgConfigStore,
};

use super::presenter::Presenter;
use super::signals;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Load config file and merge with CLI-provided values.
/// Precedence: defaults < file < CLI args.
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(err) => {
            warn!(%err, "could not load config file, using defaults");
            AppConfig::empty()
        }
    };
    AppConfig::defaults().merge(file_config).merge(cli_config)
}

/// Run the assistant until shutdown
pub async fn run_assistant(config: AppConfig, welcome: bool) -> ExitCode {
    let presenter = Presenter::new();
    let locale = config.locale_or_default().to_string();

    let speech: Arc<dyn SpeechOutput> = match config.voice_or_default() {
        "espeak" => Arc::new(EspeakSpeechOutput::new()),
        _ => Arc::new(ConsoleSpeechOutput::new()),
    };

    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new());
    let logbook = Arc::new(EmergencyLogbook::new(
        store.clone(),
        config.device_name_or_default(),
    ));

    let table = KeywordTable::standard();
    let (bus, events) = session_channel();

    // Handler registry. Device is shared: Emergency drives its flashlight
    // and volume during SOS.
    let device = Arc::new(DeviceHandler::new(speech.clone()));
    let mut router = DispatchRouter::new(speech.clone());
    router.register(
        CommandDomain::Emergency,
        Arc::new(EmergencyHandler::new(
            speech.clone(),
            logbook.clone(),
            device.clone(),
            &locale,
        )),
    );
    router.register(CommandDomain::Camera, Arc::new(CameraHandler::new(speech.clone())));
    router.register(CommandDomain::Device, device);
    router.register(
        CommandDomain::Communication,
        Arc::new(CommunicationHandler::new(
            speech.clone(),
            store,
            logbook,
            &table,
        )),
    );
    router.register(
        CommandDomain::Navigation,
        Arc::new(NavigationHandler::new(speech.clone(), &table)),
    );
    router.register(
        CommandDomain::AppControl,
        Arc::new(AppControlHandler::new(speech.clone(), bus.clone(), &table)),
    );

    if let Err(err) = signals::spawn_handlers(&bus) {
        presenter.error(&format!("Failed to setup signal handlers: {}", err));
        return ExitCode::from(EXIT_ERROR);
    }

    let engine = LineSpeechEngine::spawn(bus.clone());
    let options = SessionOptions {
        locale: locale.clone(),
        restart_delay: Duration::from_millis(config.restart_delay_ms_or_default()),
        retry_delay: Duration::from_millis(config.retry_delay_ms_or_default()),
        welcome_message: welcome.then(|| SessionOptions::default().welcome_message).flatten(),
    };
    let manager = ListeningSessionManager::new(
        engine,
        CommandPipeline::new(&table),
        router,
        speech,
        options,
        bus,
    );

    presenter.status(&format!("Listening ({locale})"));
    presenter.info("Type a command per line, e.g.: hey assistant take a photo");
    presenter.info("SIGUSR1 suspends, SIGUSR2 resumes, Ctrl+C exits");

    manager.run(events).await;

    presenter.status("Stopped");
    ExitCode::from(EXIT_SUCCESS)
}

/// Run one utterance through the pipeline and print the verdict
pub fn run_classify(utterance: &str, presenter: &Presenter) -> ExitCode {
    let pipeline = CommandPipeline::default();

    match pipeline.process(utterance, false) {
        PipelineOutcome::Rejected => {
            presenter.warn("Rejected: no wake phrase and no open conversation");
        }
        PipelineOutcome::Noise => {
            presenter.warn("Noise: nothing left after wake-phrase stripping");
        }
        PipelineOutcome::Command(cmd) => {
            presenter.key_value("domain", cmd.domain.as_str());
            presenter.key_value("command", &cmd.command);
            match cmd.entity {
                Some(entity) => {
                    presenter.key_value("entity", &entity.text);
                    presenter.key_value(
                        "entity-kind",
                        if entity.is_phone_number() {
                            "phone-number"
                        } else {
                            "text"
                        },
                    );
                }
                None => presenter.key_value("entity", "(none)"),
            }
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}
