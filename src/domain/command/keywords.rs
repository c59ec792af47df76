//! Static keyword configuration for wake gating, classification, and
//! entity extraction

use super::domain_kind::CommandDomain;

/// Wake phrases, longest first so stripping removes the full phrase
/// before its shorter suffix gets a chance to match.
const WAKE_PHRASES: &[&str] = &["hey assistant", "voice assistant", "assistant"];

/// Trigger and stopword configuration for one command domain.
///
/// Triggers are checked with a containment test, in order. Stopwords are
/// removed whole-word by the entity extractor to recover the command's
/// argument.
#[derive(Debug, Clone)]
pub struct DomainRule {
    pub domain: CommandDomain,
    pub triggers: Vec<String>,
    pub stopwords: Vec<String>,
}

impl DomainRule {
    fn new(domain: CommandDomain, triggers: &[&str], stopwords: &[&str]) -> Self {
        Self {
            domain,
            triggers: triggers.iter().map(|s| s.to_string()).collect(),
            stopwords: stopwords.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// The full keyword configuration: wake phrases plus one rule per domain,
/// in classifier priority order. Built once at startup, immutable after.
#[derive(Debug, Clone)]
pub struct KeywordTable {
    wake_phrases: Vec<String>,
    rules: Vec<DomainRule>,
}

impl KeywordTable {
    /// The built-in keyword set
    pub fn standard() -> Self {
        let rules = vec![
            DomainRule::new(
                CommandDomain::Emergency,
                &["emergency", "help", "call 911", "call emergency", "urgent"],
                &["call", "please", "the"],
            ),
            DomainRule::new(
                CommandDomain::Camera,
                &["camera", "photo", "picture", "record", "video", "selfie"],
                &["take", "please"],
            ),
            DomainRule::new(
                CommandDomain::Device,
                &["flashlight", "torch", "volume", "brightness", "wifi", "airplane"],
                &["turn", "set", "to", "the", "please"],
            ),
            DomainRule::new(
                CommandDomain::Communication,
                &["call", "text", "message", "sms", "phone", "contact"],
                &[
                    "call", "text", "message", "sms", "send", "to", "the", "a", "an", "my",
                    "please", "can you", "i want to", "i need to", "would you", "could you",
                ],
            ),
            DomainRule::new(
                CommandDomain::Navigation,
                &["navigate", "directions", "map", "location", "gps"],
                &[
                    "navigate", "directions", "to", "go", "take me", "drive", "map", "maps",
                    "the", "please",
                ],
            ),
            DomainRule::new(
                CommandDomain::AppControl,
                &["exit", "close", "quit", "open app", "launch"],
                &["open", "app", "application", "the", "please", "can you", "launch"],
            ),
        ];

        Self {
            wake_phrases: WAKE_PHRASES.iter().map(|s| s.to_string()).collect(),
            rules,
        }
    }

    pub fn wake_phrases(&self) -> &[String] {
        &self.wake_phrases
    }

    /// Rules in classifier priority order
    pub fn rules(&self) -> &[DomainRule] {
        &self.rules
    }

    /// The rule for one domain, if it has one (Unclassified does not)
    pub fn rule(&self, domain: CommandDomain) -> Option<&DomainRule> {
        self.rules.iter().find(|r| r.domain == domain)
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::standard()
    }
}
