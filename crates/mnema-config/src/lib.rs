// SPDX-FileCopyrightText: 2026 Mnema Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Mnema memory stream.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, and environment
//! variable overrides.
//!
//! # Usage
//!
//! ```no_run
//! use mnema_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("decay rate: {}", config.memory.decay_rate);
//! ```

pub mod loader;
pub mod model;
pub mod validation;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{
    AgentConfig, EventLogConfig, MemoryConfig, MnemaConfig, ModelsConfig, OpenAiConfig,
};

use mnema_core::MnemaError;

/// Load configuration from the XDG hierarchy and validate it.
///
/// Loads config from TOML files + env vars via Figment, then runs
/// post-deserialization validation. All validation failures are joined
/// into one [`MnemaError::Config`].
pub fn load_and_validate() -> Result<MnemaConfig, MnemaError> {
    let config = loader::load_config().map_err(|e| MnemaError::Config(e.to_string()))?;
    validation::validate_config(&config).map_err(|errors| MnemaError::Config(errors.join("; ")))?;
    Ok(config)
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<MnemaConfig, MnemaError> {
    let config =
        loader::load_config_from_str(toml_content).map_err(|e| MnemaError::Config(e.to_string()))?;
    validation::validate_config(&config).map_err(|errors| MnemaError::Config(errors.join("; ")))?;
    Ok(config)
}
