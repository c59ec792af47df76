//! Entity extraction: recover a command's argument by stripping keywords

use once_cell::sync::Lazy;
use regex::Regex;

/// Short codes that dial out directly even though they fall below the
/// normal minimum digit count.
const EMERGENCY_SHORT_CODES: &[&str] = &["911", "112", "999", "000"];

/// Lenient phone-number shape: optional leading `+`, digit groups
/// separated by space, dash, or dot.
static PHONE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?\d+(?:[\s.\-]+\d+)*$").expect("phone shape regex"));

/// What kind of argument the extractor recovered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A dialable number; skips any name lookup
    PhoneNumber,
    /// Free text: a contact name, destination, app name, ...
    Text,
}

/// Residual argument text after keyword stripping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    pub kind: EntityKind,
}

impl Entity {
    pub fn is_phone_number(&self) -> bool {
        self.kind == EntityKind::PhoneNumber
    }
}

/// Whether the text is one of the emergency short codes
pub fn is_emergency_number(text: &str) -> bool {
    EMERGENCY_SHORT_CODES.contains(&text.trim())
}

/// Whether the text reads as a phone number: 7 to 15 digits in separated
/// groups, or one of the emergency short codes.
pub fn looks_like_phone_number(text: &str) -> bool {
    let trimmed = text.trim();
    if is_emergency_number(trimmed) {
        return true;
    }
    if !PHONE_SHAPE.is_match(trimmed) {
        return false;
    }
    let digits = trimmed.chars().filter(char::is_ascii_digit).count();
    (7..=15).contains(&digits)
}

/// Strips a fixed stopword set from command text to recover the argument.
///
/// Removal is whole-word and case-insensitive, so a contact literally named
/// after a stopword (a contact named "My") cannot be referenced. Known
/// limitation.
#[derive(Debug, Clone)]
pub struct EntityExtractor {
    patterns: Vec<Regex>,
}

impl EntityExtractor {
    /// Compile the stopword set once; extraction itself allocates only the
    /// rewritten string.
    pub fn new<S: AsRef<str>>(stopwords: &[S]) -> Self {
        let patterns = stopwords
            .iter()
            .map(|word| {
                Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word.as_ref())))
                    .expect("stopword regex")
            })
            .collect();
        Self { patterns }
    }

    /// Remove every stopword occurrence, collapse whitespace, and return
    /// the remainder. `None` when nothing is left.
    pub fn extract(&self, command: &str) -> Option<Entity> {
        let mut cleaned = command.to_string();
        for pattern in &self.patterns {
            cleaned = pattern.replace_all(&cleaned, "").into_owned();
        }
        let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
        if cleaned.is_empty() {
            return None;
        }

        let kind = if looks_like_phone_number(&cleaned) {
            EntityKind::PhoneNumber
        } else {
            EntityKind::Text
        };
        Some(Entity { text: cleaned, kind })
    }
}
