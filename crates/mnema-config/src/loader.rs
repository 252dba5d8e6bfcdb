// SPDX-FileCopyrightText: 2026 Mnema Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./mnema.toml` > `~/.config/mnema/mnema.toml` >
//! `/etc/mnema/mnema.toml` with environment variable overrides via the
//! `MNEMA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::MnemaConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/mnema/mnema.toml` (system-wide)
/// 3. `~/.config/mnema/mnema.toml` (user XDG config)
/// 4. `./mnema.toml` (local directory)
/// 5. `MNEMA_*` environment variables
pub fn load_config() -> Result<MnemaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MnemaConfig::default()))
        .merge(Toml::file("/etc/mnema/mnema.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("mnema/mnema.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("mnema.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<MnemaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MnemaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<MnemaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MnemaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `MNEMA_MEMORY_DECAY_RATE` must map to
/// `memory.decay_rate`, not `memory.decay.rate`.
fn env_provider() -> Env {
    Env::prefixed("MNEMA_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: MNEMA_MEMORY_DECAY_RATE -> "memory_decay_rate"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("memory_", "memory.", 1)
            .replacen("models_", "models.", 1)
            .replacen("openai_", "openai.", 1)
            .replacen("eventlog_", "eventlog.", 1);
        mapped.into()
    })
}
