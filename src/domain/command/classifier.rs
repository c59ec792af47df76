//! Ordered keyword classifier

use super::domain_kind::CommandDomain;
use super::keywords::KeywordTable;

/// Maps a cleaned utterance to exactly one domain.
///
/// Domains are evaluated in the registered order and the first trigger
/// containment match wins, which makes the priority list the tie-break
/// contract: "call emergency" is Emergency, not Communication.
#[derive(Debug, Clone)]
pub struct CommandClassifier {
    matchers: Vec<(CommandDomain, Vec<String>)>,
}

impl CommandClassifier {
    pub fn from_table(table: &KeywordTable) -> Self {
        let matchers = table
            .rules()
            .iter()
            .map(|rule| (rule.domain, rule.triggers.clone()))
            .collect();
        Self { matchers }
    }

    /// Classify a lowercased, wake-stripped command. Containment test, not
    /// token match; empty input should be filtered out before this point
    /// but classifies as Unclassified if it slips through.
    pub fn classify(&self, command: &str) -> CommandDomain {
        for (domain, triggers) in &self.matchers {
            if triggers.iter().any(|t| command.contains(t.as_str())) {
                return *domain;
            }
        }
        CommandDomain::Unclassified
    }
}
