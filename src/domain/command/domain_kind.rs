//! Command domain value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidDomainError;

/// Classification priority order. The classifier checks domains in this
/// order and stops at the first trigger match, so an utterance containing
/// triggers from two domains always resolves to the earlier one.
pub const DOMAIN_PRIORITY: &[CommandDomain] = &[
    CommandDomain::Emergency,
    CommandDomain::Camera,
    CommandDomain::Device,
    CommandDomain::Communication,
    CommandDomain::Navigation,
    CommandDomain::AppControl,
];

/// Top-level command categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandDomain {
    Emergency,
    Camera,
    Device,
    Communication,
    Navigation,
    AppControl,
    Unclassified,
}

impl CommandDomain {
    /// Get the human-readable label for this domain
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Emergency => "Emergency",
            Self::Camera => "Camera",
            Self::Device => "Device",
            Self::Communication => "Communication",
            Self::Navigation => "Navigation",
            Self::AppControl => "App Control",
            Self::Unclassified => "Unclassified",
        }
    }

    /// Get the string identifier for this domain
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Emergency => "emergency",
            Self::Camera => "camera",
            Self::Device => "device",
            Self::Communication => "communication",
            Self::Navigation => "navigation",
            Self::AppControl => "app-control",
            Self::Unclassified => "unclassified",
        }
    }
}

impl FromStr for CommandDomain {
    type Err = InvalidDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "emergency" => Ok(Self::Emergency),
            "camera" => Ok(Self::Camera),
            "device" => Ok(Self::Device),
            "communication" => Ok(Self::Communication),
            "navigation" => Ok(Self::Navigation),
            "app-control" | "app_control" => Ok(Self::AppControl),
            "unclassified" => Ok(Self::Unclassified),
            _ => Err(InvalidDomainError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for CommandDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_excludes_unclassified() {
        assert!(!DOMAIN_PRIORITY.contains(&CommandDomain::Unclassified));
        assert_eq!(DOMAIN_PRIORITY.len(), 6);
    }

    #[test]
    fn emergency_is_checked_first() {
        assert_eq!(DOMAIN_PRIORITY[0], CommandDomain::Emergency);
        assert_eq!(
            DOMAIN_PRIORITY.last().copied(),
            Some(CommandDomain::AppControl)
        );
    }

    #[test]
    fn parse_all_domains() {
        assert_eq!(
            "emergency".parse::<CommandDomain>().unwrap(),
            CommandDomain::Emergency
        );
        assert_eq!(
            "camera".parse::<CommandDomain>().unwrap(),
            CommandDomain::Camera
        );
        assert_eq!(
            "app-control".parse::<CommandDomain>().unwrap(),
            CommandDomain::AppControl
        );
    }

    #[test]
    fn parse_case_insensitive() {
        assert_eq!(
            "Emergency".parse::<CommandDomain>().unwrap(),
            CommandDomain::Emergency
        );
        assert_eq!(
            "CAMERA".parse::<CommandDomain>().unwrap(),
            CommandDomain::Camera
        );
    }

    #[test]
    fn parse_invalid() {
        assert!("weather".parse::<CommandDomain>().is_err());
        assert!("".parse::<CommandDomain>().is_err());
    }

    #[test]
    fn display() {
        assert_eq!(CommandDomain::Emergency.to_string(), "emergency");
        assert_eq!(CommandDomain::AppControl.to_string(), "app-control");
    }
}
