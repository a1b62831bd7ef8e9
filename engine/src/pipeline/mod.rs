//! Pipeline orchestrator
//!
//! One request handles exactly one transcript turn and runs the state
//! machine to completion:
//!
//! `parse -> prompt -> complete -> extract -> evaluate -> [generate -> persist] -> respond`
//!
//! Only a completion failure is fatal. Generation and persistence are
//! best-effort and report honestly inside the response envelope; the
//! user always receives the assistant's reply when the model succeeds.
//! All working data is reconstructed from the request, so there is no
//! shared mutable state across requests.

use crate::artifacts;
use crate::config::Config;
use crate::extract::Extractor;
use crate::llm::{CompletionError, ModelGateway};
use crate::prompt;
use crate::readiness::{ReadinessEvaluator, ReadinessVerdict};
use crate::storage::{ObjectStore, ProjectRepository, Sink};
use crate::transcript::{Role, Transcript, Turn};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Default caller identity when the request carries none.
const ANONYMOUS_USER: &str = "anonymous";

/// Explicitly constructed handles the pipeline works against.
///
/// No globals: tests assemble an `Environment` from scripted gateways
/// and throwaway stores.
pub struct Environment {
    pub gateway: Arc<dyn ModelGateway>,
    pub store: Arc<dyn ObjectStore>,
    pub projects: Arc<ProjectRepository>,
    pub config: Config,
}

/// Errors fatal to a request
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The request was structurally invalid
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The completion call failed; no side effects were performed
    #[error(transparent)]
    Model(#[from] CompletionError),
}

/// Inbound conversation request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConverseRequest {
    /// Conversation turns, most recent last
    pub messages: Vec<Turn>,

    /// Model to use; config default when absent
    #[serde(default)]
    pub model_id: Option<String>,

    /// Opaque client-side interview state, passed through untouched
    #[serde(default)]
    pub project_state: Option<serde_json::Value>,

    /// Stable project identifier; generated when absent
    #[serde(default)]
    pub project_id: Option<String>,

    /// Caller identifier; "anonymous" when absent
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Readiness indicator booleans as exposed on the wire
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReadinessCriteria {
    pub project_name: bool,
    pub project_kind: bool,
    pub technical_details: bool,
    pub sufficient_context: bool,
}

impl From<&ReadinessVerdict> for ReadinessCriteria {
    fn from(v: &ReadinessVerdict) -> Self {
        Self {
            project_name: v.has_project_label,
            project_kind: v.has_project_kind,
            technical_details: v.has_technical_details,
            sufficient_context: v.has_sufficient_context,
        }
    }
}

/// One persisted (or failed) document in the response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentEntry {
    pub kind: String,
    pub key: String,
    pub size: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Generation summary, present only when the readiness gate passed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentGeneration {
    pub generated: bool,
    pub folder: String,
    pub documents: Vec<DocumentEntry>,
    pub metadata_recorded: bool,
}

/// Response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConverseResponse {
    /// Assistant reply text
    pub content: String,

    /// Model id actually used (echoed or defaulted)
    pub model_id: String,

    /// Project id actually used (echoed or generated)
    pub project_id: String,

    /// True iff the readiness gate passed and at least one artifact landed
    pub is_complete: bool,

    pub readiness_score: f64,
    pub readiness_criteria: ReadinessCriteria,

    /// Primary service, or null when the conversation named none
    pub specific_service: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_generation: Option<DocumentGeneration>,
}

/// Request orchestrator
pub struct Pipeline {
    env: Environment,
    extractor: Extractor,
    evaluator: ReadinessEvaluator,
    sink: Sink,
}

impl Pipeline {
    pub fn new(env: Environment) -> Result<Self> {
        let sink = Sink::new(Arc::clone(&env.store), Arc::clone(&env.projects));
        Ok(Self {
            extractor: Extractor::new()?,
            evaluator: ReadinessEvaluator::new(),
            sink,
            env,
        })
    }

    /// Run one request through the state machine.
    pub async fn handle(
        &self,
        request: ConverseRequest,
    ) -> std::result::Result<ConverseResponse, PipelineError> {
        // parse
        if request.messages.is_empty() {
            return Err(PipelineError::BadRequest("messages must not be empty".into()));
        }
        if request.messages.last().map(|t| t.role) != Some(Role::User) {
            return Err(PipelineError::BadRequest(
                "last message must be a user turn".into(),
            ));
        }

        let project_id = request
            .project_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let user_id = request
            .user_id
            .clone()
            .unwrap_or_else(|| ANONYMOUS_USER.to_string());
        let model_id = request
            .model_id
            .clone()
            .unwrap_or_else(|| self.env.config.model.default_model_id.clone());

        let transcript = Transcript::new(request.messages);
        debug!(project_id = %project_id, turns = transcript.len(), "request parsed");

        // prompt -> complete
        let messages = prompt::assemble(&transcript);
        let reply = self.env.gateway.complete(&messages, &model_id).await?;

        // extract -> evaluate
        let descriptor = self
            .extractor
            .extract(&transcript, &reply, project_id.clone(), user_id);
        let verdict = self.evaluator.evaluate(&transcript);
        info!(
            project_id = %project_id,
            service = %descriptor.primary_service,
            score = verdict.score,
            ready = verdict.ready,
            "interview evaluated"
        );

        // generate -> persist, gated on readiness
        let document_generation = if verdict.ready {
            let generated = artifacts::generate_all(&descriptor, &reply);
            let index = self.sink.persist(&descriptor, &generated).await;
            Some(DocumentGeneration {
                generated: index.success_count() > 0,
                folder: index.storage_prefix.clone(),
                documents: index
                    .entries
                    .iter()
                    .map(|e| DocumentEntry {
                        kind: e.kind.clone(),
                        key: e.object_key.clone(),
                        size: e.size_bytes,
                        error: e.error.clone(),
                    })
                    .collect(),
                metadata_recorded: index.metadata_recorded,
            })
        } else {
            None
        };

        // respond
        let uploaded = document_generation
            .as_ref()
            .map_or(0, |g| g.documents.iter().filter(|d| d.error.is_none()).count());
        let specific_service = (descriptor.primary_service
            != crate::extract::lexicon::FALLBACK_SERVICE)
            .then(|| descriptor.primary_service.clone());

        Ok(ConverseResponse {
            content: reply,
            model_id,
            project_id,
            is_complete: verdict.ready && uploaded > 0,
            readiness_score: verdict.score,
            readiness_criteria: ReadinessCriteria::from(&verdict),
            specific_service,
            document_generation,
        })
    }
}
