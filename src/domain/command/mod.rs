//! Command classification: wake gating, domain matching, entity extraction

pub mod classifier;
pub mod domain_kind;
pub mod entity;
pub mod keywords;
pub mod last_command;
pub mod pipeline;
pub mod wake;

// Re-export common types
pub use classifier::CommandClassifier;
pub use domain_kind::{CommandDomain, DOMAIN_PRIORITY};
pub use entity::{is_emergency_number, looks_like_phone_number, Entity, EntityExtractor, EntityKind};
pub use keywords::{DomainRule, KeywordTable};
pub use last_command::LastCommand;
pub use pipeline::{ClassifiedCommand, CommandPipeline, PipelineOutcome};
pub use wake::{GateDecision, WakeWordGate};
