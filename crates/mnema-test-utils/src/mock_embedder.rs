// SPDX-FileCopyrightText: 2026 Mnema Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock embedding adapter for deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use mnema_core::traits::adapter::PluginAdapter;
use mnema_core::traits::embedding::EmbeddingAdapter;
use mnema_core::types::{AdapterType, EmbeddingInput, EmbeddingOutput, HealthStatus};
use mnema_core::MnemaError;

/// A mock embedder that returns pre-configured vectors.
///
/// Vectors are popped from a FIFO queue. When the queue is empty, a
/// fixed fallback vector is returned, so every call succeeds unless the
/// adapter was built with [`failing`](MockEmbedder::failing).
pub struct MockEmbedder {
    vectors: Arc<Mutex<VecDeque<Vec<f32>>>>,
    fallback: Vec<f32>,
    fail: bool,
}

impl MockEmbedder {
    /// Create a mock embedder that always returns `fallback`.
    pub fn new(fallback: Vec<f32>) -> Self {
        Self {
            vectors: Arc::new(Mutex::new(VecDeque::new())),
            fallback,
            fail: false,
        }
    }

    /// Create a mock embedder pre-loaded with the given vectors.
    pub fn with_vectors(vectors: Vec<Vec<f32>>, fallback: Vec<f32>) -> Self {
        Self {
            vectors: Arc::new(Mutex::new(VecDeque::from(vectors))),
            fallback,
            fail: false,
        }
    }

    /// Create a mock embedder whose every call fails.
    pub fn failing() -> Self {
        Self {
            vectors: Arc::new(Mutex::new(VecDeque::new())),
            fallback: Vec::new(),
            fail: true,
        }
    }

    /// Add a vector to the end of the queue.
    pub async fn add_vector(&self, vector: Vec<f32>) {
        self.vectors.lock().await.push_back(vector);
    }

    async fn next_vector(&self) -> Vec<f32> {
        self.vectors
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

#[async_trait]
impl PluginAdapter for MockEmbedder {
    fn name(&self) -> &str {
        "mock-embedder"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
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
impl EmbeddingAdapter for MockEmbedder {
    async fn embed(&self, _input: EmbeddingInput) -> Result<EmbeddingOutput, MnemaError> {
        if self.fail {
            return Err(MnemaError::Embedding {
                message: "mock embedder failure".to_string(),
                source: None,
            });
        }
        let embedding = self.next_vector().await;
        let dimensions = embedding.len();
        Ok(EmbeddingOutput {
            embedding,
            dimensions,
        })
    }
}
