// SPDX-FileCopyrightText: 2026 Mnema Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapters backed by [`OpenAiClient`].
//!
//! Three adapters share one client: embeddings, importance scoring, and
//! text generation. Each maps transport failures into its own error
//! variant so callers can tell which pipeline stage failed.

use async_trait::async_trait;
use mnema_core::traits::adapter::PluginAdapter;
use mnema_core::traits::embedding::EmbeddingAdapter;
use mnema_core::traits::generation::GenerationAdapter;
use mnema_core::traits::importance::ImportanceAdapter;
use mnema_core::types::{
    AdapterType, EmbeddingInput, EmbeddingOutput, GenerationInput, GenerationOutput,
    HealthStatus, ImportanceInput, ImportanceOutput,
};
use mnema_core::MnemaError;

use crate::client::OpenAiClient;
use crate::types::{ChatMessage, ChatRequest, EmbeddingsRequest};

const ADAPTER_VERSION: semver::Version = semver::Version::new(0, 1, 0);

const IMPORTANCE_SYSTEM_PROMPT: &str = "You rate the importance of an agent's memories. \
Reply with a single integer from 1 to 10, where 1 is mundane routine detail \
and 10 is a critical, life-changing event. Reply with the number only.";

/// Embeddings via `POST /embeddings`.
pub struct OpenAiEmbedder {
    client: OpenAiClient,
}

impl OpenAiEmbedder {
    pub fn new(client: OpenAiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PluginAdapter for OpenAiEmbedder {
    fn name(&self) -> &str {
        "openai-embedder"
    }

    fn version(&self) -> semver::Version {
        ADAPTER_VERSION
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Embedding
    }

    async fn health_check(&self) -> Result<HealthStatus, MnemaError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), MnemaError> {
        Ok(())
    }
}

#[async_trait]
impl EmbeddingAdapter for OpenAiEmbedder {
    async fn embed(&self, input: EmbeddingInput) -> Result<EmbeddingOutput, MnemaError> {
        let request = EmbeddingsRequest {
            model: input.model,
            input: input.text,
        };
        let response = self.client.embed(&request).await.map_err(|e| {
            MnemaError::Embedding {
                message: "embeddings request failed".to_string(),
                source: Some(Box::new(e)),
            }
        })?;
        let data = response.data.into_iter().next().ok_or_else(|| {
            MnemaError::Embedding {
                message: "embeddings response contained no vectors".to_string(),
                source: None,
            }
        })?;
        let dimensions = data.embedding.len();
        Ok(EmbeddingOutput {
            embedding: data.embedding,
            dimensions,
        })
    }
}

/// Importance scores via chat completion.
///
/// The model is asked for a bare integer on a 1-10 scale; anything it
/// returns outside that contract is an error rather than a guess.
pub struct OpenAiImportance {
    client: OpenAiClient,
}

impl OpenAiImportance {
    pub fn new(client: OpenAiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PluginAdapter for OpenAiImportance {
    fn name(&self) -> &str {
        "openai-importance"
    }

    fn version(&self) -> semver::Version {
        ADAPTER_VERSION
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Importance
    }

    async fn health_check(&self) -> Result<HealthStatus, MnemaError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), MnemaError> {
        Ok(())
    }
}

#[async_trait]
impl ImportanceAdapter for OpenAiImportance {
    async fn calculate_importance(
        &self,
        input: ImportanceInput,
    ) -> Result<ImportanceOutput, MnemaError> {
        let prompt = input.prompt.unwrap_or_else(|| {
            format!(
                "Rate the importance of this {} memory:\n\n{}",
                input.kind, input.content
            )
        });
        let request = ChatRequest {
            model: input.model,
            messages: vec![
                ChatMessage::system(IMPORTANCE_SYSTEM_PROMPT),
                ChatMessage::user(prompt),
            ],
            temperature: Some(0.0),
            max_tokens: Some(8),
        };
        let response = self.client.chat(&request).await.map_err(|e| {
            MnemaError::Importance {
                message: "importance request failed".to_string(),
                source: Some(Box::new(e)),
            }
        })?;
        let reply = response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();

        let score = parse_score(&reply).ok_or_else(|| MnemaError::Importance {
            message: format!("unusable importance reply: {reply:?}"),
            source: None,
        })?;
        Ok(ImportanceOutput { score })
    }
}

/// First integer in the reply, accepted only on the 1-10 scale.
fn parse_score(reply: &str) -> Option<f64> {
    let digits: String = reply
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    let value: u32 = digits.parse().ok()?;
    if (1..=10).contains(&value) {
        Some(f64::from(value))
    } else {
        None
    }
}

/// Free-form text generation via chat completion.
pub struct OpenAiGenerator {
    client: OpenAiClient,
}

impl OpenAiGenerator {
    pub fn new(client: OpenAiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PluginAdapter for OpenAiGenerator {
    fn name(&self) -> &str {
        "openai-generator"
    }

    fn version(&self) -> semver::Version {
        ADAPTER_VERSION
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Generation
    }

    async fn health_check(&self) -> Result<HealthStatus, MnemaError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), MnemaError> {
        Ok(())
    }
}

#[async_trait]
impl GenerationAdapter for OpenAiGenerator {
    async fn generate(&self, input: GenerationInput) -> Result<GenerationOutput, MnemaError> {
        let request = ChatRequest {
            model: input.model,
            messages: vec![
                ChatMessage::system(input.system),
                ChatMessage::user(input.prompt),
            ],
            temperature: Some(input.temperature),
            max_tokens: Some(input.max_tokens),
        };
        let response = self.client.chat(&request).await.map_err(|e| {
            MnemaError::Generation {
                message: "generation request failed".to_string(),
                source: Some(Box::new(e)),
            }
        })?;
        let text = response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| MnemaError::Generation {
                message: "generation response contained no choices".to_string(),
                source: None,
            })?;
        Ok(GenerationOutput { text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mnema_core::MemoryKind;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client(server: &MockServer) -> OpenAiClient {
        OpenAiClient::new("test-api-key", server.uri()).unwrap()
    }

    fn chat_body(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": content},
                         "finish_reason": "stop"}],
            "model": "gpt-4o-mini"
        })
    }

    fn importance_input(prompt: Option<&str>) -> ImportanceInput {
        ImportanceInput {
            content: "the bridge collapsed".to_string(),
            kind: MemoryKind::ServerMessage,
            prompt: prompt.map(str::to_string),
            model: "gpt-4o-mini".to_string(),
        }
    }

    #[test]
    fn parse_score_accepts_integers_in_range() {
        assert_eq!(parse_score("7"), Some(7.0));
        assert_eq!(parse_score("Importance: 10"), Some(10.0));
        assert_eq!(parse_score("  3/10"), Some(3.0));
    }

    #[test]
    fn parse_score_rejects_out_of_range_and_garbage() {
        assert_eq!(parse_score("0"), None);
        assert_eq!(parse_score("11"), None);
        assert_eq!(parse_score("pretty important"), None);
        assert_eq!(parse_score(""), None);
    }

    #[tokio::test]
    async fn embedder_returns_first_vector() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "object": "list",
            "data": [{"object": "embedding", "index": 0, "embedding": [0.25, 0.75]}],
            "model": "text-embedding-3-small"
        });
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .and(body_partial_json(serde_json::json!({"input": "hello"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let embedder = OpenAiEmbedder::new(client(&server).await);
        let out = embedder
            .embed(EmbeddingInput {
                text: "hello".to_string(),
                model: "text-embedding-3-small".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(out.embedding, vec![0.25, 0.75]);
        assert_eq!(out.dimensions, 2);
    }

    #[tokio::test]
    async fn importance_parses_score_from_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("8")))
            .mount(&server)
            .await;

        let adapter = OpenAiImportance::new(client(&server).await);
        let out = adapter.calculate_importance(importance_input(None)).await.unwrap();
        assert_eq!(out.score, 8.0);
    }

    #[tokio::test]
    async fn importance_rejects_out_of_range_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("42")))
            .mount(&server)
            .await;

        let adapter = OpenAiImportance::new(client(&server).await);
        let err = adapter.calculate_importance(importance_input(None)).await.unwrap_err();
        assert!(matches!(err, MnemaError::Importance { .. }));
    }

    #[tokio::test]
    async fn importance_uses_caller_prompt_when_given() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "messages": [
                    {"role": "system", "content": IMPORTANCE_SYSTEM_PROMPT},
                    {"role": "user", "content": "custom scoring prompt"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("5")))
            .mount(&server)
            .await;

        let adapter = OpenAiImportance::new(client(&server).await);
        let out = adapter
            .calculate_importance(importance_input(Some("custom scoring prompt")))
            .await
            .unwrap();
        assert_eq!(out.score, 5.0);
    }

    #[tokio::test]
    async fn generator_returns_first_choice_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("a compressed gist")))
            .mount(&server)
            .await;

        let generator = OpenAiGenerator::new(client(&server).await);
        let out = generator
            .generate(GenerationInput {
                system: "compress".to_string(),
                prompt: "long text".to_string(),
                temperature: 0.3,
                max_tokens: 100,
                model: "gpt-4o-mini".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(out.text, "a compressed gist");
    }
}
