// SPDX-FileCopyrightText: 2026 Mnema Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Memory domain types for the memory stream.
//!
//! Memories are built in two phases: a [`DraftMemory`] carries everything
//! known before importance scoring, and sealing it with a score produces
//! the immutable [`Memory`] that reaches storage. A partially scored
//! memory therefore cannot exist as a `Memory` value at all.

use chrono::{DateTime, Utc};
use mnema_core::{MemoryId, MemoryKind, MnemaError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A fully scored memory record, immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Memory {
    /// Unique identifier, assigned at draft construction, never reused.
    pub id: MemoryId,
    /// The recorded event text. Never empty.
    pub content: String,
    /// What kind of event this memory records.
    pub kind: MemoryKind,
    /// Agent identifiers this memory concerns. Sorted, deduplicated.
    pub associated_agents: Vec<String>,
    /// Open provenance/tag mapping.
    pub metadata: serde_json::Map<String, serde_json::Value>,
    /// Embedding vector. All memories in one stream share a dimension.
    #[serde(skip)]
    pub embedding: Vec<f32>,
    /// Importance on the calculator's scale, assigned exactly once.
    pub importance_score: f64,
    /// Creation timestamp, used for recency decay and time filtering.
    pub created_at: DateTime<Utc>,
}

/// A memory before its importance score has been assigned.
///
/// Produced by the manager after embedding, consumed by [`DraftMemory::seal`].
#[derive(Debug, Clone)]
pub struct DraftMemory {
    id: MemoryId,
    content: String,
    kind: MemoryKind,
    associated_agents: Vec<String>,
    metadata: serde_json::Map<String, serde_json::Value>,
    embedding: Vec<f32>,
    created_at: DateTime<Utc>,
}

impl DraftMemory {
    /// Start a new draft with a fresh id and the current time.
    ///
    /// Fails when `content` is empty.
    pub fn new(
        content: impl Into<String>,
        kind: MemoryKind,
        embedding: Vec<f32>,
    ) -> Result<Self, MnemaError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(MnemaError::Internal(
                "memory content must not be empty".to_string(),
            ));
        }
        Ok(Self {
            id: MemoryId(Uuid::new_v4().to_string()),
            content,
            kind,
            associated_agents: Vec::new(),
            metadata: serde_json::Map::new(),
            embedding,
            created_at: Utc::now(),
        })
    }

    /// Set the associated agent identifiers (deduplicated, sorted).
    pub fn with_agents(mut self, agents: Vec<String>) -> Self {
        let mut agents = agents;
        agents.sort();
        agents.dedup();
        self.associated_agents = agents;
        self
    }

    /// Attach metadata.
    pub fn with_metadata(mut self, metadata: serde_json::Map<String, serde_json::Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Override the creation timestamp. Intended for replay and tests.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// The draft's content, exposed for importance scoring.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The draft's kind, exposed for importance scoring.
    pub fn kind(&self) -> &MemoryKind {
        &self.kind
    }

    /// Seal the draft with its importance score, producing the immutable
    /// [`Memory`]. This is the only way to construct a `Memory`, so every
    /// memory that reaches storage carries both embedding and score.
    pub fn seal(self, importance_score: f64) -> Memory {
        Memory {
            id: self.id,
            content: self.content,
            kind: self.kind,
            associated_agents: self.associated_agents,
            metadata: self.metadata,
            embedding: self.embedding,
            importance_score,
            created_at: self.created_at,
        }
    }
}

/// A memory paired with its combined retrieval score.
#[derive(Debug, Clone)]
pub struct ScoredMemory {
    /// The memory record.
    pub memory: Memory,
    /// Weighted recency + importance + relevance score.
    pub score: f64,
}

/// Convert an f32 vector to bytes for SQLite BLOB storage.
pub fn vec_to_blob(vec: &[f32]) -> Vec<u8> {
    vec.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Convert a SQLite BLOB back to an f32 vector.
pub fn blob_to_vec(blob: &[u8]) -> Vec<f32> {
    blob.chunks_exact(4)
        .map(|chunk| f32::from_le_bytes(chunk.try_into().unwrap()))
        .collect()
}

/// Compute cosine similarity between two vectors.
///
/// Uses the full formula rather than the normalized-dot shortcut since
/// provider embeddings are not guaranteed to be L2-normalized. Returns
/// 0.0 for zero-norm or mismatched-length inputs.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += f64::from(*x) * f64::from(*y);
        norm_a += f64::from(*x) * f64::from(*x);
        norm_b += f64::from(*y) * f64::from(*y);
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_rejects_empty_content() {
        assert!(DraftMemory::new("", MemoryKind::ServerMessage, vec![0.1]).is_err());
        assert!(DraftMemory::new("   ", MemoryKind::ServerMessage, vec![0.1]).is_err());
    }

    #[test]
    fn seal_produces_scored_memory() {
        let draft = DraftMemory::new("saw a fox", MemoryKind::ModelResponse, vec![0.1, 0.2])
            .unwrap()
            .with_agents(vec!["b".into(), "a".into(), "a".into()]);
        let memory = draft.seal(7.0);
        assert_eq!(memory.content, "saw a fox");
        assert_eq!(memory.importance_score, 7.0);
        // Agents are sorted and deduplicated.
        assert_eq!(memory.associated_agents, vec!["a", "b"]);
    }

    #[test]
    fn draft_ids_are_unique() {
        let a = DraftMemory::new("x", MemoryKind::Reflection, vec![]).unwrap();
        let b = DraftMemory::new("x", MemoryKind::Reflection, vec![]).unwrap();
        assert_ne!(a.seal(1.0).id, b.seal(1.0).id);
    }

    #[test]
    fn vec_to_blob_roundtrip() {
        let original = vec![0.1_f32, 0.2, 0.3, -0.5, 1.0];
        let blob = vec_to_blob(&original);
        assert_eq!(blob.len(), original.len() * 4);
        let recovered = blob_to_vec(&blob);
        assert_eq!(original.len(), recovered.len());
        for (a, b) in original.iter().zip(recovered.iter()) {
            assert!((a - b).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn cosine_similarity_identical() {
        let v = vec![3.0_f32, 4.0];
        let sim = cosine_similarity(&v, &v);
        assert!((sim - 1.0).abs() < 1e-9, "got {sim}");
    }

    #[test]
    fn cosine_similarity_orthogonal() {
        let a = vec![1.0_f32, 0.0];
        let b = vec![0.0_f32, 1.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-9);
    }

    #[test]
    fn cosine_similarity_opposite() {
        let a = vec![1.0_f32, 0.0];
        let b = vec![-1.0_f32, 0.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-9);
    }

    #[test]
    fn cosine_similarity_unnormalized_inputs() {
        // Same direction, different magnitudes still score 1.0.
        let a = vec![1.0_f32, 2.0];
        let b = vec![10.0_f32, 20.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn cosine_similarity_degenerate_inputs() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }
}
