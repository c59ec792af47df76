//! Most recent classified command, kept for display and diagnostics

use chrono::{DateTime, Utc};

use super::domain_kind::CommandDomain;
use super::entity::Entity;

/// Overwritten on every new classification, never merged. Its presence is
/// what the wake gate treats as an open conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastCommand {
    pub raw_text: String,
    pub domain: CommandDomain,
    pub entity: Option<Entity>,
    pub timestamp: DateTime<Utc>,
}

impl LastCommand {
    pub fn new(raw_text: impl Into<String>, domain: CommandDomain, entity: Option<Entity>) -> Self {
        Self {
            raw_text: raw_text.into(),
            domain,
            entity,
            timestamp: Utc::now(),
        }
    }
}
