//! Model gateway abstraction
//!
//! The pipeline treats text completion as an opaque single-shot service
//! behind the [`ModelGateway`] trait. The concrete HTTP-backed gateway
//! lives in [`http`]; tests substitute scripted implementations.

use crate::transcript::Turn;
use async_trait::async_trait;

pub mod http;

/// Result type for gateway operations
pub type Result<T> = std::result::Result<T, CompletionError>;

/// Errors a completion call can surface
///
/// Any of these is fatal to the request: the orchestrator returns a
/// structured error response and runs no generators and no writes.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// The model endpoint could not be reached or did not answer in time
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// The model endpoint rejected the request payload
    #[error("model rejected input: {0}")]
    ModelRejectedInput(String),

    /// The model answered with no usable text
    #[error("empty completion")]
    EmptyCompletion,
}

impl CompletionError {
    /// Stable machine-readable kind for the error envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            CompletionError::ModelUnavailable(_) => "model_unavailable",
            CompletionError::ModelRejectedInput(_) => "model_rejected_input",
            CompletionError::EmptyCompletion => "empty_completion",
        }
    }
}

/// Single-shot text completion service
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Complete the conversation and return the assistant's reply text.
    ///
    /// `messages` already carries the master prompt as its first turn.
    /// Implementations must map an empty or whitespace-only reply to
    /// [`CompletionError::EmptyCompletion`].
    async fn complete(&self, messages: &[Turn], model_id: &str) -> Result<String>;

    /// Check whether the gateway is currently usable.
    /// Default implementation returns true.
    async fn check_health(&self) -> bool {
        true
    }
}
