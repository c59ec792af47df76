//! VoiceAssist - hands-free voice command assistant
//!
//! This crate provides the core of a continuously-listening voice command
//! interface: utterances are gated behind a wake phrase, classified into a
//! command domain by priority-ordered keyword matching, stripped down to
//! their argument, and dispatched to the matching domain handler.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: The session state machine, wake gate, classifier, entity
//!   extractor, and record shapes
//! - **Application**: The listening session manager, dispatch router,
//!   emergency logbook, and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (speech engines, speech
//!   outputs, key-value stores, domain handlers)
//! - **CLI**: Command-line interface, argument parsing, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
