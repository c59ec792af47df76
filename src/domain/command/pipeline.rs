//! Classification pipeline: wake gate -> classifier -> entity extractor

use super::classifier::CommandClassifier;
use super::domain_kind::CommandDomain;
use super::entity::{Entity, EntityExtractor};
use super::keywords::KeywordTable;
use super::wake::{GateDecision, WakeWordGate};

/// A gated, classified utterance ready for dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedCommand {
    pub domain: CommandDomain,
    /// Lowercased, wake-stripped command text; handlers sub-parse this
    pub command: String,
    /// Argument recovered with the domain's stopword set
    pub entity: Option<Entity>,
}

/// Result of pushing one utterance through the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Failed the wake gate; drop silently
    Rejected,
    /// Nothing left after wake stripping; treat as noise
    Noise,
    Command(ClassifiedCommand),
}

/// The full classification path for one utterance. Pure and stateless:
/// conversation state (whether a prior command exists) is passed in by
/// the session manager.
#[derive(Debug, Clone)]
pub struct CommandPipeline {
    gate: WakeWordGate,
    classifier: CommandClassifier,
    extractors: Vec<(CommandDomain, EntityExtractor)>,
}

impl CommandPipeline {
    pub fn new(table: &KeywordTable) -> Self {
        let extractors = table
            .rules()
            .iter()
            .map(|rule| (rule.domain, EntityExtractor::new(&rule.stopwords)))
            .collect();
        Self {
            gate: WakeWordGate::new(table.wake_phrases()),
            classifier: CommandClassifier::from_table(table),
            extractors,
        }
    }

    pub fn process(&self, utterance: &str, has_open_conversation: bool) -> PipelineOutcome {
        let command = match self.gate.evaluate(utterance, has_open_conversation) {
            GateDecision::Rejected => return PipelineOutcome::Rejected,
            GateDecision::Noise => return PipelineOutcome::Noise,
            GateDecision::Passed(command) => command,
        };

        let domain = self.classifier.classify(&command);
        let entity = self
            .extractors
            .iter()
            .find(|(d, _)| *d == domain)
            .and_then(|(_, extractor)| extractor.extract(&command));

        PipelineOutcome::Command(ClassifiedCommand {
            domain,
            command,
            entity,
        })
    }
}

impl Default for CommandPipeline {
    fn default() -> Self {
        Self::new(&KeywordTable::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::command::entity::EntityKind;

    fn pipeline() -> CommandPipeline {
        CommandPipeline::default()
    }

    #[test]
    fn rejects_unwoken_utterance_without_conversation() {
        assert_eq!(
            pipeline().process("take a photo", false),
            PipelineOutcome::Rejected
        );
    }

    #[test]
    fn call_911_is_emergency_with_phone_entity() {
        let outcome = pipeline().process("hey assistant call 911", false);
        let PipelineOutcome::Command(cmd) = outcome else {
            panic!("expected command, got {outcome:?}");
        };
        assert_eq!(cmd.domain, CommandDomain::Emergency);
        let entity = cmd.entity.expect("entity");
        assert_eq!(entity.text, "911");
        assert_eq!(entity.kind, EntityKind::PhoneNumber);
    }

    #[test]
    fn take_a_photo_routes_to_camera() {
        let outcome = pipeline().process("hey assistant take a photo", false);
        let PipelineOutcome::Command(cmd) = outcome else {
            panic!("expected command, got {outcome:?}");
        };
        assert_eq!(cmd.domain, CommandDomain::Camera);
        // The camera handler's own parser owns the rest of the stripping.
        assert_eq!(cmd.command, "take a photo");
        assert_eq!(cmd.entity.unwrap().text, "a photo");
    }

    #[test]
    fn unknown_command_is_unclassified_without_entity() {
        let outcome = pipeline().process("hey assistant sing me a song", false);
        let PipelineOutcome::Command(cmd) = outcome else {
            panic!("expected command, got {outcome:?}");
        };
        assert_eq!(cmd.domain, CommandDomain::Unclassified);
        assert_eq!(cmd.entity, None);
    }

    #[test]
    fn followup_without_wake_phrase_uses_open_conversation() {
        let outcome = pipeline().process("turn off the flashlight", true);
        let PipelineOutcome::Command(cmd) = outcome else {
            panic!("expected command, got {outcome:?}");
        };
        assert_eq!(cmd.domain, CommandDomain::Device);
    }

    #[test]
    fn bare_wake_phrase_is_noise() {
        assert_eq!(
            pipeline().process("hey assistant", false),
            PipelineOutcome::Noise
        );
    }
}
