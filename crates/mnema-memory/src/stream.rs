// SPDX-FileCopyrightText: 2026 Mnema Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A scored stream of memories over one store.
//!
//! The stream owns retrieval parameters and default weights, usually derived
//! from [`MemoryConfig`]. Per-call weight overrides are validated before any
//! storage work happens.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mnema_config::MemoryConfig;
use mnema_core::{MemoryId, MemoryKind, MnemaError};

use crate::retrieval::{RetrievalParams, RetrievalWeights, rank};
use crate::store::MemoryStore;
use crate::types::{Memory, ScoredMemory};

/// Narrows the candidate set of a retrieval query.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilter {
    pub kind: Option<MemoryKind>,
    pub agent: Option<String>,
}

#[derive(Debug)]
pub struct MemoryStream {
    store: Arc<MemoryStore>,
    params: RetrievalParams,
    default_weights: RetrievalWeights,
    default_k: usize,
}

impl MemoryStream {
    pub fn new(
        store: Arc<MemoryStore>,
        params: RetrievalParams,
        default_weights: RetrievalWeights,
        default_k: usize,
    ) -> Result<Self, MnemaError> {
        default_weights.validate()?;
        Ok(Self {
            store,
            params,
            default_weights,
            default_k,
        })
    }

    /// Build a stream from the memory section of the loaded configuration.
    pub fn from_config(store: Arc<MemoryStore>, config: &MemoryConfig) -> Result<Self, MnemaError> {
        let params = RetrievalParams {
            decay_rate: config.decay_rate,
            importance_scale: config.importance_scale,
        };
        let weights = RetrievalWeights {
            recency: config.recency_weight,
            importance: config.importance_weight,
            relevance: config.relevance_weight,
        };
        Self::new(store, params, weights, config.default_retrieval_k)
    }

    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }

    pub fn default_k(&self) -> usize {
        self.default_k
    }

    pub async fn add_memory(&self, memory: Memory) -> Result<(), MnemaError> {
        self.store.insert(&memory).await
    }

    pub async fn get_memory(&self, id: &MemoryId) -> Result<Option<Memory>, MnemaError> {
        self.store.get_by_id(id).await
    }

    pub async fn get_memories_by_kind(&self, kind: &MemoryKind) -> Result<Vec<Memory>, MnemaError> {
        self.store.get_by_kind(kind).await
    }

    pub async fn get_memories_by_agent(&self, agent: &str) -> Result<Vec<Memory>, MnemaError> {
        self.store.get_by_agent(agent).await
    }

    pub async fn all_memories(&self) -> Result<Vec<Memory>, MnemaError> {
        self.store.scan_all().await
    }

    /// Retrieve the `k` memories best matching a query embedding.
    ///
    /// `weights` overrides the stream defaults for this call only; `now`
    /// pins the recency clock, mainly for tests.
    pub async fn retrieve(
        &self,
        query: &[f32],
        k: Option<usize>,
        weights: Option<RetrievalWeights>,
        now: Option<DateTime<Utc>>,
    ) -> Result<Vec<ScoredMemory>, MnemaError> {
        self.retrieve_filtered(query, &MemoryFilter::default(), k, weights, now)
            .await
    }

    /// Like [`retrieve`](Self::retrieve), with the candidate set narrowed
    /// by kind or associated agent before scoring.
    pub async fn retrieve_filtered(
        &self,
        query: &[f32],
        filter: &MemoryFilter,
        k: Option<usize>,
        weights: Option<RetrievalWeights>,
        now: Option<DateTime<Utc>>,
    ) -> Result<Vec<ScoredMemory>, MnemaError> {
        let weights = weights.unwrap_or(self.default_weights);
        weights.validate()?;
        let k = k.unwrap_or(self.default_k);
        let now = now.unwrap_or_else(Utc::now);

        let candidates = match (&filter.kind, &filter.agent) {
            (Some(kind), None) => self.store.get_by_kind(kind).await?,
            (None, Some(agent)) => self.store.get_by_agent(agent).await?,
            (None, None) => self.store.scan_all().await?,
            (Some(kind), Some(agent)) => {
                let by_agent = self.store.get_by_agent(agent).await?;
                by_agent.into_iter().filter(|m| &m.kind == kind).collect()
            }
        };

        Ok(rank(candidates, query, k, &self.params, &weights, now))
    }
}
