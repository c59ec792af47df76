//! VoiceAssist CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use voice_assist::cli::{
    app::{load_merged_config, run_assistant, run_classify, EXIT_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use voice_assist::domain::config::AppConfig;
use voice_assist::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let presenter = Presenter::new();

    // Handle subcommands
    match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::Classify { utterance }) => {
            return run_classify(&utterance.join(" "), &presenter);
        }
        None => {}
    }

    // Build CLI config from args
    let cli_config = AppConfig {
        locale: cli.locale.clone(),
        voice: cli.voice.map(|v| v.as_str().to_string()),
        restart_delay_ms: None,
        retry_delay_ms: None,
        device_name: None,
    };

    let config = load_merged_config(cli_config).await;

    run_assistant(config, !cli.no_welcome).await
}
