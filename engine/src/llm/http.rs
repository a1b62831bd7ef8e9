//! HTTP-backed model gateway
//!
//! Talks to a messages-style completion endpoint: system text plus
//! alternating user/assistant messages in, a content array of text
//! blocks out. The per-call timeout is fixed at 30 seconds; an elapsed
//! timer surfaces as `ModelUnavailable`.

use super::{CompletionError, ModelGateway};
use crate::config::ModelConfig;
use crate::transcript::{Role, Turn};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tokio::time::timeout;

/// Timeout for each completion call in seconds
const COMPLETION_TIMEOUT_SECS: u64 = 30;

/// Maximum tokens requested per completion
const MAX_TOKENS: u32 = 4096;

pub struct HttpModelGateway {
    config: ModelConfig,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl HttpModelGateway {
    pub fn new(config: ModelConfig, api_key: Option<String>) -> Self {
        Self {
            config,
            api_key,
            client: reqwest::Client::new(),
        }
    }

    async fn call(&self, messages: &[Turn], model_id: &str) -> super::Result<String> {
        let url = format!("{}/messages", self.config.base_url.trim_end_matches('/'));
        tracing::debug!(model = model_id, region = %self.config.region, "dispatching completion");

        let mut system_prompt = String::new();
        let mut api_messages = Vec::new();
        for msg in messages {
            if msg.role == Role::System {
                system_prompt.push_str(&msg.content);
                system_prompt.push('\n');
                continue;
            }
            api_messages.push(json!({
                "role": if msg.role == Role::Assistant { "assistant" } else { "user" },
                "content": msg.content
            }));
        }

        let payload = json!({
            "model": model_id,
            "max_tokens": MAX_TOKENS,
            "system": system_prompt,
            "messages": api_messages,
        });

        let mut request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json");
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key.as_str());
        }

        let response = request
            .json(&payload)
            .send()
            .await
            .map_err(|e| CompletionError::ModelUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            if status.is_client_error() {
                return Err(CompletionError::ModelRejectedInput(format!(
                    "{}: {}",
                    status, text
                )));
            }
            return Err(CompletionError::ModelUnavailable(format!(
                "{}: {}",
                status, text
            )));
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| CompletionError::ModelUnavailable(e.to_string()))?;

        let content_arr = data
            .get("content")
            .and_then(|c| c.as_array())
            .ok_or_else(|| {
                CompletionError::ModelUnavailable("no content array in response".to_string())
            })?;

        let mut full_content = String::new();
        for item in content_arr {
            if let Some(text) = item.get("text").and_then(|t| t.as_str()) {
                full_content.push_str(text);
            }
        }

        if full_content.trim().is_empty() {
            return Err(CompletionError::EmptyCompletion);
        }

        Ok(full_content)
    }
}

#[async_trait]
impl ModelGateway for HttpModelGateway {
    async fn complete(&self, messages: &[Turn], model_id: &str) -> super::Result<String> {
        match timeout(
            Duration::from_secs(COMPLETION_TIMEOUT_SECS),
            self.call(messages, model_id),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(CompletionError::ModelUnavailable(
                "completion timed out".to_string(),
            )),
        }
    }

    async fn check_health(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gateway_for(server: &MockServer) -> HttpModelGateway {
        let config = ModelConfig {
            base_url: server.uri(),
            ..ModelConfig::default()
        };
        HttpModelGateway::new(config, Some("test-key".to_string()))
    }

    fn messages() -> Vec<Turn> {
        vec![Turn::system("interview"), Turn::user("hello")]
    }

    #[tokio::test]
    async fn test_successful_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"type": "text", "text": "What is the project name?"}]
            })))
            .mount(&server)
            .await;

        let reply = gateway_for(&server)
            .complete(&messages(), "model-a")
            .await
            .unwrap();
        assert_eq!(reply, "What is the project name?");
    }

    #[tokio::test]
    async fn test_client_error_maps_to_rejected_input() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad payload"))
            .mount(&server)
            .await;

        let err = gateway_for(&server)
            .complete(&messages(), "model-a")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "model_rejected_input");
    }

    #[tokio::test]
    async fn test_server_error_maps_to_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = gateway_for(&server)
            .complete(&messages(), "model-a")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "model_unavailable");
    }

    #[tokio::test]
    async fn test_blank_text_maps_to_empty_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"type": "text", "text": "   "}]
            })))
            .mount(&server)
            .await;

        let err = gateway_for(&server)
            .complete(&messages(), "model-a")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "empty_completion");
    }

    #[tokio::test]
    async fn test_missing_content_array_maps_to_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"oops": true})))
            .mount(&server)
            .await;

        let err = gateway_for(&server)
            .complete(&messages(), "model-a")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "model_unavailable");
    }
}
