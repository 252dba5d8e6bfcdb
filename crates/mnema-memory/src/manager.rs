// SPDX-FileCopyrightText: 2026 Mnema Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pipeline from raw content to a persisted, fully scored memory.
//!
//! `add_memory` runs embed, then importance, then persist. A failure at any
//! stage aborts the whole pipeline, so no partially scored record ever
//! reaches the store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mnema_config::ModelsConfig;
use mnema_core::{
    EmbeddingAdapter, EmbeddingInput, ImportanceAdapter, ImportanceInput, MemoryId, MemoryKind,
    MnemaError,
};
use tracing::debug;

use crate::retrieval::RetrievalWeights;
use crate::stream::{MemoryFilter, MemoryStream};
use crate::types::{DraftMemory, Memory, ScoredMemory};

/// One request to record a memory.
#[derive(Debug, Clone)]
pub struct AddMemory {
    content: String,
    kind: MemoryKind,
    associated_agents: Vec<String>,
    importance_prompt: Option<String>,
    metadata: serde_json::Map<String, serde_json::Value>,
}

impl AddMemory {
    pub fn new(content: impl Into<String>, kind: MemoryKind) -> Self {
        Self {
            content: content.into(),
            kind,
            associated_agents: Vec::new(),
            importance_prompt: None,
            metadata: serde_json::Map::new(),
        }
    }

    pub fn with_agents(mut self, agents: Vec<String>) -> Self {
        self.associated_agents = agents;
        self
    }

    pub fn with_importance_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.importance_prompt = Some(prompt.into());
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Map<String, serde_json::Value>) -> Self {
        self.metadata = metadata;
        self
    }
}

pub struct MemoryManager {
    embedder: Arc<dyn EmbeddingAdapter>,
    importance: Arc<dyn ImportanceAdapter>,
    stream: MemoryStream,
    models: ModelsConfig,
}

impl MemoryManager {
    pub fn new(
        embedder: Arc<dyn EmbeddingAdapter>,
        importance: Arc<dyn ImportanceAdapter>,
        stream: MemoryStream,
        models: ModelsConfig,
    ) -> Self {
        Self {
            embedder,
            importance,
            stream,
            models,
        }
    }

    pub fn stream(&self) -> &MemoryStream {
        &self.stream
    }

    /// Embed, score, and persist one memory, returning the sealed record
    /// so callers see the assigned id and score without a second read.
    pub async fn add_memory(&self, request: AddMemory) -> Result<Memory, MnemaError> {
        let embedding = self
            .embedder
            .embed(EmbeddingInput {
                text: request.content.clone(),
                model: self.models.embedding_model.clone(),
            })
            .await?;

        let draft = DraftMemory::new(request.content, request.kind, embedding.embedding)?
            .with_agents(request.associated_agents)
            .with_metadata(request.metadata);

        let scored = self
            .importance
            .calculate_importance(ImportanceInput {
                content: draft.content().to_string(),
                kind: draft.kind().clone(),
                prompt: request.importance_prompt,
                model: self.models.importance_model.clone(),
            })
            .await?;

        let memory = draft.seal(scored.score);
        debug!(id = %memory.id, kind = %memory.kind, "persisting memory");
        self.stream.add_memory(memory.clone()).await?;
        Ok(memory)
    }

    pub async fn get_memory_by_id(&self, id: &MemoryId) -> Result<Option<Memory>, MnemaError> {
        self.stream.get_memory(id).await
    }

    pub async fn get_memories_by_kind(&self, kind: &MemoryKind) -> Result<Vec<Memory>, MnemaError> {
        self.stream.get_memories_by_kind(kind).await
    }

    pub async fn get_memories_by_agent(&self, agent: &str) -> Result<Vec<Memory>, MnemaError> {
        self.stream.get_memories_by_agent(agent).await
    }

    /// Alias for [`get_memories_by_agent`](Self::get_memories_by_agent),
    /// kept for callers using the historical name.
    pub async fn get_memories_by_associated_agent(
        &self,
        agent: &str,
    ) -> Result<Vec<Memory>, MnemaError> {
        self.stream.get_memories_by_agent(agent).await
    }

    pub async fn all_memories(&self) -> Result<Vec<Memory>, MnemaError> {
        self.stream.all_memories().await
    }

    /// Embed the query text, then retrieve the best matching memories.
    pub async fn retrieve(
        &self,
        query: &str,
        k: Option<usize>,
        weights: Option<RetrievalWeights>,
        now: Option<DateTime<Utc>>,
    ) -> Result<Vec<ScoredMemory>, MnemaError> {
        let embedding = self
            .embedder
            .embed(EmbeddingInput {
                text: query.to_string(),
                model: self.models.embedding_model.clone(),
            })
            .await?;
        self.stream
            .retrieve(&embedding.embedding, k, weights, now)
            .await
    }

    /// As [`retrieve`](Self::retrieve), with a candidate filter.
    pub async fn retrieve_filtered(
        &self,
        query: &str,
        filter: &MemoryFilter,
        k: Option<usize>,
        weights: Option<RetrievalWeights>,
        now: Option<DateTime<Utc>>,
    ) -> Result<Vec<ScoredMemory>, MnemaError> {
        let embedding = self
            .embedder
            .embed(EmbeddingInput {
                text: query.to_string(),
                model: self.models.embedding_model.clone(),
            })
            .await?;
        self.stream
            .retrieve_filtered(&embedding.embedding, filter, k, weights, now)
            .await
    }
}
