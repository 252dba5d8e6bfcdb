// SPDX-FileCopyrightText: 2026 Mnema Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as decay rates in range and weights summing to 1.

use crate::model::MnemaConfig;

/// Tolerance for the retrieval weight sum check.
const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<String>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &MnemaConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.memory.database_path.trim().is_empty() {
        errors.push("memory.database_path must not be empty".to_string());
    }

    if !(config.memory.decay_rate > 0.0 && config.memory.decay_rate < 1.0) {
        errors.push(format!(
            "memory.decay_rate must be strictly between 0 and 1, got {}",
            config.memory.decay_rate
        ));
    }

    if config.memory.importance_scale <= 0.0 {
        errors.push(format!(
            "memory.importance_scale must be positive, got {}",
            config.memory.importance_scale
        ));
    }

    for (key, value) in [
        ("memory.recency_weight", config.memory.recency_weight),
        ("memory.importance_weight", config.memory.importance_weight),
        ("memory.relevance_weight", config.memory.relevance_weight),
    ] {
        if !(0.0..=1.0).contains(&value) {
            errors.push(format!("{key} must be within [0, 1], got {value}"));
        }
    }

    let weight_sum = config.memory.recency_weight
        + config.memory.importance_weight
        + config.memory.relevance_weight;
    if (weight_sum - 1.0).abs() > WEIGHT_TOLERANCE {
        errors.push(format!(
            "retrieval weights must sum to 1.0, got {weight_sum}"
        ));
    }

    if config.memory.default_retrieval_k == 0 {
        errors.push("memory.default_retrieval_k must be at least 1".to_string());
    }

    for (key, value) in [
        ("models.embedding_model", &config.models.embedding_model),
        ("models.importance_model", &config.models.importance_model),
        ("models.compression_model", &config.models.compression_model),
    ] {
        if value.trim().is_empty() {
            errors.push(format!("{key} must not be empty"));
        }
    }

    if config.eventlog.data_dir.trim().is_empty() {
        errors.push("eventlog.data_dir must not be empty".to_string());
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
