// SPDX-FileCopyrightText: 2026 Mnema Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock importance calculator for deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use mnema_core::traits::adapter::PluginAdapter;
use mnema_core::traits::importance::ImportanceAdapter;
use mnema_core::types::{AdapterType, HealthStatus, ImportanceInput, ImportanceOutput};
use mnema_core::MnemaError;

/// A mock importance calculator that returns pre-configured scores.
///
/// Scores are popped from a FIFO queue; an empty queue falls back to a
/// fixed score of 5.0.
pub struct MockImportance {
    scores: Arc<Mutex<VecDeque<f64>>>,
    fail: bool,
}

impl MockImportance {
    /// Create a mock calculator with an empty score queue.
    pub fn new() -> Self {
        Self {
            scores: Arc::new(Mutex::new(VecDeque::new())),
            fail: false,
        }
    }

    /// Create a mock calculator pre-loaded with the given scores.
    pub fn with_scores(scores: Vec<f64>) -> Self {
        Self {
            scores: Arc::new(Mutex::new(VecDeque::from(scores))),
            fail: false,
        }
    }

    /// Create a mock calculator whose every call fails.
    pub fn failing() -> Self {
        Self {
            scores: Arc::new(Mutex::new(VecDeque::new())),
            fail: true,
        }
    }

    /// Add a score to the end of the queue.
    pub async fn add_score(&self, score: f64) {
        self.scores.lock().await.push_back(score);
    }

    async fn next_score(&self) -> f64 {
        self.scores.lock().await.pop_front().unwrap_or(5.0)
    }
}

impl Default for MockImportance {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockImportance {
    fn name(&self) -> &str {
        "mock-importance"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
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
impl ImportanceAdapter for MockImportance {
    async fn calculate_importance(
        &self,
        _input: ImportanceInput,
    ) -> Result<ImportanceOutput, MnemaError> {
        if self.fail {
            return Err(MnemaError::Importance {
                message: "mock importance failure".to_string(),
                source: None,
            });
        }
        Ok(ImportanceOutput {
            score: self.next_score().await,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mnema_core::MemoryKind;

    fn input() -> ImportanceInput {
        ImportanceInput {
            content: "something happened".to_string(),
            kind: MemoryKind::ServerMessage,
            prompt: None,
            model: "test-model".to_string(),
        }
    }

    #[tokio::test]
    async fn queued_scores_returned_in_order_then_default() {
        let calc = MockImportance::with_scores(vec![8.0, 2.0]);
        assert_eq!(calc.calculate_importance(input()).await.unwrap().score, 8.0);
        assert_eq!(calc.calculate_importance(input()).await.unwrap().score, 2.0);
        assert_eq!(calc.calculate_importance(input()).await.unwrap().score, 5.0);
    }

    #[tokio::test]
    async fn failing_calculator_reports_importance_error() {
        let calc = MockImportance::failing();
        let err = calc.calculate_importance(input()).await.unwrap_err();
        assert!(matches!(err, MnemaError::Importance { .. }));
    }
}
