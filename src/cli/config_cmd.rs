//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    validate_config_value(key, value)?;

    let mut config = store.load().await?;

    match key {
        "locale" => config.locale = Some(value.to_string()),
        "voice" => config.voice = Some(value.to_string()),
        "restart_delay_ms" => config.restart_delay_ms = Some(parse_millis(key, value)?),
        "retry_delay_ms" => config.retry_delay_ms = Some(parse_millis(key, value)?),
        "device_name" => config.device_name = Some(value.to_string()),
        _ => unreachable!(), // Already validated
    }

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    let config = store.load().await?;

    let value = match key {
        "locale" => config.locale,
        "voice" => config.voice,
        "restart_delay_ms" => config.restart_delay_ms.map(|v| v.to_string()),
        "retry_delay_ms" => config.retry_delay_ms.map(|v| v.to_string()),
        "device_name" => config.device_name,
        _ => unreachable!(),
    };

    match value {
        Some(v) => presenter.output(&v),
        None => presenter.output("(not set)"),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    let display = |value: Option<String>| value.unwrap_or_else(|| "(not set)".to_string());

    presenter.key_value("locale", &display(config.locale));
    presenter.key_value("voice", &display(config.voice));
    presenter.key_value(
        "restart_delay_ms",
        &display(config.restart_delay_ms.map(|v| v.to_string())),
    );
    presenter.key_value(
        "retry_delay_ms",
        &display(config.retry_delay_ms.map(|v| v.to_string())),
    );
    presenter.key_value("device_name", &display(config.device_name));

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn parse_millis(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse().map_err(|_| ConfigError::ValidationError {
        key: key.to_string(),
        message: "Value must be a number of milliseconds".to_string(),
    })
}

fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "locale" | "device_name" if value.trim().is_empty() => {
            Err(ConfigError::ValidationError {
                key: key.to_string(),
                message: "Value must not be empty".to_string(),
            })
        }
        "voice" if !matches!(value, "console" | "espeak") => Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: "Value must be 'console' or 'espeak'".to_string(),
        }),
        "restart_delay_ms" | "retry_delay_ms" => parse_millis(key, value).map(|_| ()),
        _ => Ok(()),
    }
}
