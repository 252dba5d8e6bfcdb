// SPDX-FileCopyrightText: 2026 Mnema Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Mnema memory stream.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Mnema configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MnemaConfig {
    /// Agent identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Memory store and retrieval scoring settings.
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Model identifiers used for the external capabilities.
    #[serde(default)]
    pub models: ModelsConfig,

    /// OpenAI-compatible provider settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Raw event log settings.
    #[serde(default)]
    pub eventlog: EventLogConfig,
}

/// Agent identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the agent this stream belongs to.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "mnema".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Memory store and retrieval scoring configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Hourly exponential decay rate for recency scoring. Must be in (0, 1).
    #[serde(default = "default_decay_rate")]
    pub decay_rate: f64,

    /// Maximum possible importance score on the calculator's scale.
    #[serde(default = "default_importance_scale")]
    pub importance_scale: f64,

    /// Default weight of the recency component in scored retrieval.
    #[serde(default = "default_weight")]
    pub recency_weight: f64,

    /// Default weight of the importance component in scored retrieval.
    #[serde(default = "default_weight")]
    pub importance_weight: f64,

    /// Default weight of the relevance component in scored retrieval.
    #[serde(default = "default_weight")]
    pub relevance_weight: f64,

    /// Default number of results returned by scored retrieval.
    #[serde(default = "default_retrieval_k")]
    pub default_retrieval_k: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            decay_rate: default_decay_rate(),
            importance_scale: default_importance_scale(),
            recency_weight: default_weight(),
            importance_weight: default_weight(),
            relevance_weight: default_weight(),
            default_retrieval_k: default_retrieval_k(),
        }
    }
}

fn default_database_path() -> String {
    "data/memories.db".to_string()
}

fn default_decay_rate() -> f64 {
    0.995
}

fn default_importance_scale() -> f64 {
    10.0
}

fn default_weight() -> f64 {
    1.0 / 3.0
}

fn default_retrieval_k() -> usize {
    10
}

/// Model identifiers for the external capabilities.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModelsConfig {
    /// Embedding model identifier.
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Model used for importance scoring.
    #[serde(default = "default_importance_model")]
    pub importance_model: String,

    /// Model used for reflection-content compression.
    #[serde(default = "default_compression_model")]
    pub compression_model: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            embedding_model: default_embedding_model(),
            importance_model: default_importance_model(),
            compression_model: default_compression_model(),
        }
    }
}

fn default_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}

fn default_importance_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_compression_model() -> String {
    "gpt-4o-mini".to_string()
}

/// OpenAI-compatible provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// API key. `None` requires the provider to read it from the environment.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

/// Raw event log configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EventLogConfig {
    /// Directory holding the per-agent `.jsonl` event logs.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for EventLogConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> String {
    "data".to_string()
}
