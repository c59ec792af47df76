//! Finalized speech-to-text transcript value object

use chrono::{DateTime, Utc};

/// One transcript candidate with its confidence. Immutable; discarded
/// after classification.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub confidence: f32,
    pub is_final: bool,
    pub timestamp: DateTime<Utc>,
}

impl Utterance {
    /// A finalized recognition result
    pub fn finalized(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence,
            is_final: true,
            timestamp: Utc::now(),
        }
    }

    /// An interim hypothesis; logged but never classified
    pub fn partial(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            confidence: 0.0,
            is_final: false,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finalized_is_final() {
        let u = Utterance::finalized("call mom", 0.92);
        assert!(u.is_final);
        assert_eq!(u.text, "call mom");
    }

    #[test]
    fn partial_is_not_final() {
        assert!(!Utterance::partial("call m").is_final);
    }
}
