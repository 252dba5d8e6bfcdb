// SPDX-FileCopyrightText: 2026 Mnema Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock text generator for deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use mnema_core::traits::adapter::PluginAdapter;
use mnema_core::traits::generation::GenerationAdapter;
use mnema_core::types::{AdapterType, GenerationInput, GenerationOutput, HealthStatus};
use mnema_core::MnemaError;

/// A mock generator that returns pre-configured replies.
///
/// Replies are popped from a FIFO queue. When the queue is empty, a
/// default "mock reply" text is returned.
pub struct MockGenerator {
    replies: Arc<Mutex<VecDeque<String>>>,
    fail: bool,
}

impl MockGenerator {
    /// Create a mock generator with an empty reply queue.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            fail: false,
        }
    }

    /// Create a mock generator pre-loaded with the given replies.
    pub fn with_replies(replies: Vec<String>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            fail: false,
        }
    }

    /// Create a mock generator whose every call fails.
    pub fn failing() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            fail: true,
        }
    }

    /// Add a reply to the end of the queue.
    pub async fn add_reply(&self, text: String) {
        self.replies.lock().await.push_back(text);
    }

    async fn next_reply(&self) -> String {
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| "mock reply".to_string())
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockGenerator {
    fn name(&self) -> &str {
        "mock-generator"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
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
impl GenerationAdapter for MockGenerator {
    async fn generate(&self, _input: GenerationInput) -> Result<GenerationOutput, MnemaError> {
        if self.fail {
            return Err(MnemaError::Generation {
                message: "mock generator failure".to_string(),
                source: None,
            });
        }
        Ok(GenerationOutput {
            text: self.next_reply().await,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> GenerationInput {
        GenerationInput {
            system: "system".to_string(),
            prompt: "prompt".to_string(),
            temperature: 0.3,
            max_tokens: 100,
            model: "test-model".to_string(),
        }
    }

    #[tokio::test]
    async fn queued_replies_returned_in_order_then_default() {
        let generator =
            MockGenerator::with_replies(vec!["first".to_string(), "second".to_string()]);
        assert_eq!(generator.generate(input()).await.unwrap().text, "first");
        assert_eq!(generator.generate(input()).await.unwrap().text, "second");
        assert_eq!(generator.generate(input()).await.unwrap().text, "mock reply");
    }

    #[tokio::test]
    async fn failing_generator_reports_generation_error() {
        let generator = MockGenerator::failing();
        let err = generator.generate(input()).await.unwrap_err();
        assert!(matches!(err, MnemaError::Generation { .. }));
    }
}
