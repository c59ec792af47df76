//! Persisted record shapes: emergency logs, SOS logs, contacts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store key holding the emergency call log
pub const EMERGENCY_LOG_KEY: &str = "emergency_logs";
/// Store key holding the SOS activation log
pub const SOS_LOG_KEY: &str = "sos_logs";
/// Store key holding the user's emergency contacts
pub const EMERGENCY_CONTACTS_KEY: &str = "emergency_contacts";
/// Store key holding the user's contacts
pub const CONTACTS_KEY: &str = "contacts";
/// Store key holding the recent call list
pub const RECENT_CALLS_KEY: &str = "recent_calls";

/// One emergency call, appended to the log and never rewritten
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyLogEntry {
    pub number: String,
    /// What initiated the call: "services", "emergency_contact", "emergency"
    pub kind: String,
    pub timestamp: DateTime<Utc>,
    pub device: String,
}

/// One SOS activation, appended to the log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SosLogEntry {
    pub timestamp: DateTime<Utc>,
    pub device: String,
}

/// A dialable contact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub phone: String,
}

/// One entry of the recent-call list read back for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    pub number: String,
    /// "incoming", "outgoing", or "missed"
    pub direction: String,
}

impl CallRecord {
    /// Spoken prefix for the call direction
    pub fn spoken_direction(&self) -> &'static str {
        match self.direction.as_str() {
            "incoming" => "Incoming call from",
            "outgoing" => "Call to",
            "missed" => "Missed call from",
            _ => "Call with",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emergency_log_entry_round_trips_through_json() {
        let entry = EmergencyLogEntry {
            number: "911".to_string(),
            kind: "services".to_string(),
            timestamp: Utc::now(),
            device: "test-device".to_string(),
        };
        let json = serde_json::to_string(&entry).unwrap();
        let parsed: EmergencyLogEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, parsed);
    }

    #[test]
    fn call_record_spoken_direction() {
        let record = |direction: &str| CallRecord {
            number: "5550100".to_string(),
            direction: direction.to_string(),
        };
        assert_eq!(record("incoming").spoken_direction(), "Incoming call from");
        assert_eq!(record("outgoing").spoken_direction(), "Call to");
        assert_eq!(record("missed").spoken_direction(), "Missed call from");
        assert_eq!(record("unknown").spoken_direction(), "Call with");
    }
}
