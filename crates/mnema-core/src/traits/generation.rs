// SPDX-FileCopyrightText: 2026 Mnema Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text-generation adapter trait used by reflection and compression.

use async_trait::async_trait;

use crate::error::MnemaError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{GenerationInput, GenerationOutput};

/// Adapter for free-form text generation.
///
/// Consumed by memory compression; compression callers are required to
/// recover locally from any failure of this adapter, so implementations
/// may surface provider errors directly.
#[async_trait]
pub trait GenerationAdapter: PluginAdapter {
    /// Generates text for the given system instruction and prompt.
    async fn generate(&self, input: GenerationInput) -> Result<GenerationOutput, MnemaError>;
}
