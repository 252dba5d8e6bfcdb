// SPDX-FileCopyrightText: 2026 Mnema Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scored retrieval: combined recency, importance, and relevance ranking.
//!
//! Each candidate memory is scored as a weighted sum of three components,
//! each normalized to [0, 1]:
//!
//! - recency:    `decay_rate ^ hours_since(created_at)` — exponential decay,
//!   so old memories approach but never reach zero
//! - importance: `importance_score / importance_scale`, clamped
//! - relevance:  cosine similarity to the query, shifted from [-1, 1]
//!
//! Candidates are scanned linearly; at the target scale (one agent, a
//! bounded memory count) a full scan per query keeps the ranking exact.

use chrono::{DateTime, Utc};
use mnema_core::MnemaError;

use crate::types::{Memory, ScoredMemory, cosine_similarity};

/// Tolerance for the weight sum check.
const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Weights of the three scoring components. Must sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetrievalWeights {
    pub recency: f64,
    pub importance: f64,
    pub relevance: f64,
}

impl Default for RetrievalWeights {
    fn default() -> Self {
        Self {
            recency: 1.0 / 3.0,
            importance: 1.0 / 3.0,
            relevance: 1.0 / 3.0,
        }
    }
}

impl RetrievalWeights {
    /// Validate that the weights sum to 1 within floating tolerance.
    pub fn validate(&self) -> Result<(), MnemaError> {
        let sum = self.recency + self.importance + self.relevance;
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(MnemaError::InvalidWeights { sum });
        }
        Ok(())
    }
}

/// Fixed scoring parameters of one stream.
#[derive(Debug, Clone, Copy)]
pub struct RetrievalParams {
    /// Hourly decay rate, strictly between 0 and 1.
    pub decay_rate: f64,
    /// Maximum possible importance score on the calculator's scale.
    pub importance_scale: f64,
}

impl Default for RetrievalParams {
    fn default() -> Self {
        Self {
            decay_rate: 0.995,
            importance_scale: 10.0,
        }
    }
}

/// Hours between `created_at` and `now`. Clock skew that puts a memory in
/// the future counts as age zero rather than boosting its score.
fn hours_since(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let seconds = (now - created_at).num_milliseconds() as f64 / 1000.0;
    (seconds / 3600.0).max(0.0)
}

/// Score one memory against the query vector.
pub fn score_memory(
    memory: &Memory,
    query: &[f32],
    params: &RetrievalParams,
    weights: &RetrievalWeights,
    now: DateTime<Utc>,
) -> f64 {
    let recency = params.decay_rate.powf(hours_since(memory.created_at, now));
    let importance = (memory.importance_score / params.importance_scale).clamp(0.0, 1.0);
    let relevance = (cosine_similarity(&memory.embedding, query) + 1.0) / 2.0;
    weights.recency * recency + weights.importance * importance + weights.relevance * relevance
}

/// Rank candidates by combined score, descending, and keep the top `k`.
///
/// Ties break toward the more recent memory, then by id so the ordering
/// is fully deterministic.
pub fn rank(
    candidates: Vec<Memory>,
    query: &[f32],
    k: usize,
    params: &RetrievalParams,
    weights: &RetrievalWeights,
    now: DateTime<Utc>,
) -> Vec<ScoredMemory> {
    let mut scored: Vec<ScoredMemory> = candidates
        .into_iter()
        .map(|memory| {
            let score = score_memory(&memory, query, params, weights, now);
            ScoredMemory { memory, score }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.memory.created_at.cmp(&a.memory.created_at))
            .then_with(|| a.memory.id.cmp(&b.memory.id))
    });
    scored.truncate(k);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DraftMemory;
    use chrono::Duration;
    use mnema_core::MemoryKind;

    fn memory_at(content: &str, embedding: Vec<f32>, importance: f64, age_hours: i64) -> Memory {
        DraftMemory::new(content, MemoryKind::ServerMessage, embedding)
            .unwrap()
            .with_created_at(Utc::now() - Duration::hours(age_hours))
            .seal(importance)
    }

    #[test]
    fn default_weights_are_valid() {
        RetrievalWeights::default().validate().unwrap();
    }

    #[test]
    fn weights_not_summing_to_one_are_invalid() {
        let weights = RetrievalWeights {
            recency: 0.5,
            importance: 0.5,
            relevance: 0.5,
        };
        let err = weights.validate().unwrap_err();
        assert!(matches!(err, MnemaError::InvalidWeights { sum } if (sum - 1.5).abs() < 1e-9));
    }

    #[test]
    fn weights_within_tolerance_are_valid() {
        let weights = RetrievalWeights {
            recency: 1.0 / 3.0,
            importance: 1.0 / 3.0,
            relevance: 1.0 - 2.0 / 3.0,
        };
        weights.validate().unwrap();
    }

    #[test]
    fn fresher_memory_scores_at_least_as_high() {
        let now = Utc::now();
        let params = RetrievalParams::default();
        let weights = RetrievalWeights::default();
        let query = vec![1.0_f32, 0.0];

        let fresh = memory_at("fresh", vec![1.0, 0.0], 5.0, 0);
        let stale = memory_at("stale", vec![1.0, 0.0], 5.0, 48);

        let fresh_score = score_memory(&fresh, &query, &params, &weights, now);
        let stale_score = score_memory(&stale, &query, &params, &weights, now);
        assert!(fresh_score > stale_score);
    }

    #[test]
    fn old_memories_never_decay_to_zero() {
        let now = Utc::now();
        let params = RetrievalParams::default();
        let weights = RetrievalWeights {
            recency: 1.0,
            importance: 0.0,
            relevance: 0.0,
        };
        let ancient = memory_at("ancient", vec![1.0], 5.0, 24 * 365);
        let score = score_memory(&ancient, &[1.0], &params, &weights, now);
        assert!(score > 0.0, "exponential decay must never hit zero, got {score}");
    }

    #[test]
    fn future_timestamps_clamp_to_age_zero() {
        let now = Utc::now();
        let params = RetrievalParams::default();
        let weights = RetrievalWeights {
            recency: 1.0,
            importance: 0.0,
            relevance: 0.0,
        };
        let future = memory_at("from the future", vec![1.0], 5.0, -3);
        let score = score_memory(&future, &[1.0], &params, &weights, now);
        assert!((score - 1.0).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn relevance_shifts_cosine_into_unit_range() {
        let now = Utc::now();
        let params = RetrievalParams::default();
        let weights = RetrievalWeights {
            recency: 0.0,
            importance: 0.0,
            relevance: 1.0,
        };
        let opposite = memory_at("opposite", vec![-1.0, 0.0], 5.0, 0);
        let score = score_memory(&opposite, &[1.0, 0.0], &params, &weights, now);
        assert!(score.abs() < 1e-9, "opposite vectors map to 0, got {score}");
    }

    #[test]
    fn rank_orders_descending_and_truncates() {
        let now = Utc::now();
        let params = RetrievalParams::default();
        let weights = RetrievalWeights::default();
        let query = vec![1.0_f32, 0.0];

        let candidates = vec![
            memory_at("low importance, old", vec![1.0, 0.0], 1.0, 100),
            memory_at("high importance, fresh", vec![1.0, 0.0], 9.0, 0),
            memory_at("irrelevant, fresh", vec![0.0, 1.0], 9.0, 0),
        ];

        let ranked = rank(candidates, &query, 2, &params, &weights, now);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].memory.content, "high importance, fresh");
        assert!(ranked[0].score >= ranked[1].score);
    }

    #[test]
    fn rank_tie_breaks_toward_more_recent() {
        let params = RetrievalParams::default();
        // Recency weight zero makes the two memories score identically.
        let weights = RetrievalWeights {
            recency: 0.0,
            importance: 0.5,
            relevance: 0.5,
        };
        let now = Utc::now();
        let older = memory_at("older twin", vec![1.0], 5.0, 10);
        let newer = memory_at("newer twin", vec![1.0], 5.0, 1);

        let ranked = rank(vec![older, newer], &[1.0], 2, &params, &weights, now);
        assert_eq!(ranked[0].memory.content, "newer twin");
    }

    #[test]
    fn rank_of_empty_candidates_is_empty() {
        let ranked = rank(
            vec![],
            &[1.0],
            5,
            &RetrievalParams::default(),
            &RetrievalWeights::default(),
            Utc::now(),
        );
        assert!(ranked.is_empty());
    }
}
