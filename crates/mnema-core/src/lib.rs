// SPDX-FileCopyrightText: 2026 Mnema Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Mnema memory stream.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Mnema workspace. The embedding,
//! importance, and generation capabilities are external: Mnema consumes
//! them through the adapter traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::MnemaError;
pub use types::{
    AdapterType, EmbeddingInput, EmbeddingOutput, GenerationInput, GenerationOutput, HealthStatus,
    ImportanceInput, ImportanceOutput, MemoryId, MemoryKind,
};

// Re-export all adapter traits at crate root.
pub use traits::{EmbeddingAdapter, GenerationAdapter, ImportanceAdapter, PluginAdapter};
