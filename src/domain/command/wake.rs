//! Wake-word gate

/// Gate verdict for one utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// No wake phrase and no open conversation: dropped silently
    Rejected,
    /// Gated through, but nothing left after stripping the wake phrase
    Noise,
    /// Gated through; carries the lowercased, wake-stripped command text
    Passed(String),
}

/// Decides whether an utterance should be treated as a command.
///
/// An utterance passes when it contains any configured wake phrase, or when
/// a prior command already opened a conversation. The conversation never
/// expires for the life of the session; accepted leniency so follow-ups do
/// not need the wake phrase repeated.
#[derive(Debug, Clone)]
pub struct WakeWordGate {
    phrases: Vec<String>,
}

impl WakeWordGate {
    /// Phrases must be ordered longest first so stripping removes
    /// "hey assistant" before "assistant" alone can match inside it.
    pub fn new<S: AsRef<str>>(phrases: &[S]) -> Self {
        Self {
            phrases: phrases
                .iter()
                .map(|p| p.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Evaluate one raw utterance. Matching is containment on the
    /// lowercased text, not anchored to the start.
    pub fn evaluate(&self, utterance: &str, has_open_conversation: bool) -> GateDecision {
        let lowered = utterance.to_lowercase();
        let has_wake = self.phrases.iter().any(|p| lowered.contains(p));

        if !has_wake && !has_open_conversation {
            return GateDecision::Rejected;
        }

        let mut cleaned = lowered;
        for phrase in &self.phrases {
            cleaned = cleaned.replace(phrase, "");
        }
        let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

        if cleaned.is_empty() {
            GateDecision::Noise
        } else {
            GateDecision::Passed(cleaned)
        }
    }
}
