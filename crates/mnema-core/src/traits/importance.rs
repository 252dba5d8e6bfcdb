// SPDX-FileCopyrightText: 2026 Mnema Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Importance calculator trait for scoring memories.

use async_trait::async_trait;

use crate::error::MnemaError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ImportanceInput, ImportanceOutput};

/// Adapter for estimating how significant a memory is.
///
/// The score is on a fixed, calculator-defined scale (1-10 by default)
/// and is assigned exactly once, after embedding and before persistence.
#[async_trait]
pub trait ImportanceAdapter: PluginAdapter {
    /// Calculates the importance score for a memory.
    ///
    /// Fails with [`MnemaError::Importance`] on provider failure or when
    /// the provider's reply cannot be interpreted as a score.
    async fn calculate_importance(
        &self,
        input: ImportanceInput,
    ) -> Result<ImportanceOutput, MnemaError>;
}
