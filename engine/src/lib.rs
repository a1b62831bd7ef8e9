//! Archway Engine Library
//!
//! Core of the solution-interview artifact engine: the conversation
//! pipeline that interviews a user about an AWS engagement and, once
//! the interview has gathered enough information, generates and
//! persists the deliverable artifact set.

/// Configuration management module
pub mod config;

/// Conversation transcript model
pub mod transcript;

/// Project-context extraction
pub mod extract;

/// Interview readiness evaluation
pub mod readiness;

/// Master prompt and LLM input assembly
pub mod prompt;

/// Model gateway abstraction
pub mod llm;

/// Deliverable artifact generation
pub mod artifacts;

/// Object-store and metadata persistence
pub mod storage;

/// Pipeline orchestrator
pub mod pipeline;

/// Telemetry and Observability
pub mod telemetry;
