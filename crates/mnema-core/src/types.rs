// SPDX-FileCopyrightText: 2026 Mnema Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Mnema memory stream.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a memory record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemoryId(pub String);

impl std::fmt::Display for MemoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The kind of event a memory records.
///
/// This is an open enumeration: unknown kinds round-trip through
/// [`MemoryKind::Other`] rather than failing to parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryKind {
    /// A response produced by the agent's model.
    ModelResponse,
    /// A message received from the server or another party.
    ServerMessage,
    /// An internal system event.
    SystemMessage,
    /// A summary produced by periodic reflection.
    Reflection,
    /// Any other kind, preserved verbatim.
    #[serde(untagged)]
    Other(String),
}

impl MemoryKind {
    /// String form used for SQLite storage and summaries.
    pub fn as_str(&self) -> &str {
        match self {
            MemoryKind::ModelResponse => "model_response",
            MemoryKind::ServerMessage => "server_message",
            MemoryKind::SystemMessage => "system_message",
            MemoryKind::Reflection => "reflection",
            MemoryKind::Other(s) => s.as_str(),
        }
    }

    /// Parse from the stored string. Unknown values become [`MemoryKind::Other`].
    pub fn from_str_value(s: &str) -> Self {
        match s {
            "model_response" => MemoryKind::ModelResponse,
            "server_message" => MemoryKind::ServerMessage,
            "system_message" => MemoryKind::SystemMessage,
            "reflection" => MemoryKind::Reflection,
            other => MemoryKind::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for MemoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter in the plugin registry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Embedding,
    Importance,
    Generation,
    Storage,
}

// --- Embedding types ---

/// Input for an embedding adapter.
#[derive(Debug, Clone)]
pub struct EmbeddingInput {
    /// Text to embed.
    pub text: String,
    /// Embedding model identifier.
    pub model: String,
}

/// Output from an embedding adapter.
#[derive(Debug, Clone)]
pub struct EmbeddingOutput {
    /// The embedding vector.
    pub embedding: Vec<f32>,
    /// Vector dimensionality (fixed per provider).
    pub dimensions: usize,
}

// --- Importance types ---

/// Input for an importance calculator.
#[derive(Debug, Clone)]
pub struct ImportanceInput {
    /// The memory content to score.
    pub content: String,
    /// Kind of the memory being scored.
    pub kind: MemoryKind,
    /// Optional caller-supplied scoring prompt overriding the default.
    pub prompt: Option<String>,
    /// Model identifier to score with.
    pub model: String,
}

/// Output from an importance calculator.
#[derive(Debug, Clone)]
pub struct ImportanceOutput {
    /// Score on the calculator's scale (1-10 by default).
    pub score: f64,
}

// --- Generation types ---

/// Input for a text-generation adapter.
#[derive(Debug, Clone)]
pub struct GenerationInput {
    /// System instruction.
    pub system: String,
    /// User prompt.
    pub prompt: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    /// Model identifier.
    pub model: String,
}

/// Output from a text-generation adapter.
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    /// The generated text.
    pub text: String,
}
