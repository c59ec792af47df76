//! Application configuration value object

use serde::{Deserialize, Serialize};

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Recognition locale passed to the speech engine
    pub locale: Option<String>,
    /// Speech output adapter: "console" or "espeak"
    pub voice: Option<String>,
    /// Delay before restarting after a recognition end or error
    pub restart_delay_ms: Option<u64>,
    /// Delay before retrying a failed engine start
    pub retry_delay_ms: Option<u64>,
    /// Device name recorded in emergency log entries
    pub device_name: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            locale: Some("en-US".to_string()),
            voice: Some("console".to_string()),
            restart_delay_ms: Some(1000),
            retry_delay_ms: Some(2000),
            device_name: None,
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            locale: other.locale.or(self.locale),
            voice: other.voice.or(self.voice),
            restart_delay_ms: other.restart_delay_ms.or(self.restart_delay_ms),
            retry_delay_ms: other.retry_delay_ms.or(self.retry_delay_ms),
            device_name: other.device_name.or(self.device_name),
        }
    }

    /// Get the locale, or "en-US" if not set
    pub fn locale_or_default(&self) -> &str {
        self.locale.as_deref().unwrap_or("en-US")
    }

    /// Get the voice adapter name, or "console" if not set
    pub fn voice_or_default(&self) -> &str {
        self.voice.as_deref().unwrap_or("console")
    }

    /// Get the restart delay in milliseconds, or 1000 if not set
    pub fn restart_delay_ms_or_default(&self) -> u64 {
        self.restart_delay_ms.unwrap_or(1000)
    }

    /// Get the start-retry delay in milliseconds, or 2000 if not set
    pub fn retry_delay_ms_or_default(&self) -> u64 {
        self.retry_delay_ms.unwrap_or(2000)
    }

    /// Get the device name, or a hostname-shaped fallback
    pub fn device_name_or_default(&self) -> String {
        self.device_name
            .clone()
            .or_else(|| std::env::var("HOSTNAME").ok())
            .unwrap_or_else(|| "unknown-device".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert_eq!(config.locale, Some("en-US".to_string()));
        assert_eq!(config.voice, Some("console".to_string()));
        assert_eq!(config.restart_delay_ms, Some(1000));
        assert_eq!(config.retry_delay_ms, Some(2000));
        assert!(config.device_name.is_none());
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.locale.is_none());
        assert!(config.voice.is_none());
        assert!(config.restart_delay_ms.is_none());
        assert!(config.retry_delay_ms.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            locale: Some("en-US".to_string()),
            voice: Some("console".to_string()),
            restart_delay_ms: Some(1000),
            ..Default::default()
        };

        let other = AppConfig {
            locale: Some("en-GB".to_string()),
            voice: None, // Should not override
            restart_delay_ms: Some(500),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.locale, Some("en-GB".to_string()));
        assert_eq!(merged.voice, Some("console".to_string())); // Kept from base
        assert_eq!(merged.restart_delay_ms, Some(500));
    }

    #[test]
    fn merge_preserves_base_when_other_is_none() {
        let base = AppConfig {
            locale: Some("de-DE".to_string()),
            retry_delay_ms: Some(3000),
            ..Default::default()
        };

        let merged = base.merge(AppConfig::empty());

        assert_eq!(merged.locale, Some("de-DE".to_string()));
        assert_eq!(merged.retry_delay_ms, Some(3000));
    }

    #[test]
    fn accessors_fall_back_to_defaults() {
        let config = AppConfig::empty();
        assert_eq!(config.locale_or_default(), "en-US");
        assert_eq!(config.voice_or_default(), "console");
        assert_eq!(config.restart_delay_ms_or_default(), 1000);
        assert_eq!(config.retry_delay_ms_or_default(), 2000);
    }

    #[test]
    fn accessors_use_configured_values() {
        let config = AppConfig {
            locale: Some("fr-FR".to_string()),
            restart_delay_ms: Some(250),
            ..Default::default()
        };
        assert_eq!(config.locale_or_default(), "fr-FR");
        assert_eq!(config.restart_delay_ms_or_default(), 250);
    }

    #[test]
    fn device_name_prefers_configured_value() {
        let config = AppConfig {
            device_name: Some("kitchen-tablet".to_string()),
            ..Default::default()
        };
        assert_eq!(config.device_name_or_default(), "kitchen-tablet");
    }
}
