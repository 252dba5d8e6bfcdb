// SPDX-FileCopyrightText: 2026 Mnema Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedding adapter trait for vector embedding generation.

use async_trait::async_trait;

use crate::error::MnemaError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{EmbeddingInput, EmbeddingOutput};

/// Adapter for generating vector embeddings from text.
///
/// Embedding adapters power scored retrieval by converting memory content
/// and queries into fixed-length vector representations. All memories in
/// one stream must share the same dimension.
#[async_trait]
pub trait EmbeddingAdapter: PluginAdapter {
    /// Generates an embedding for the given input.
    ///
    /// Fails with [`MnemaError::Embedding`] on provider or network failure.
    async fn embed(&self, input: EmbeddingInput) -> Result<EmbeddingOutput, MnemaError>;
}
