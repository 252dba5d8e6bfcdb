// SPDX-FileCopyrightText: 2026 Mnema Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Mnema configuration system.

use mnema_config::loader::load_config_from_path;
use mnema_config::model::MnemaConfig;
use mnema_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_mnema_config() {
    let toml = r#"
[agent]
name = "test-agent"
log_level = "debug"

[memory]
database_path = "/tmp/memories.db"
decay_rate = 0.99
importance_scale = 10.0
recency_weight = 0.2
importance_weight = 0.3
relevance_weight = 0.5
default_retrieval_k = 5

[models]
embedding_model = "text-embedding-3-large"
importance_model = "gpt-4o"
compression_model = "gpt-4o-mini"

[openai]
api_key = "sk-test-123"
base_url = "http://localhost:8080/v1"

[eventlog]
data_dir = "/tmp/events"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "test-agent");
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(config.memory.database_path, "/tmp/memories.db");
    assert_eq!(config.memory.decay_rate, 0.99);
    assert_eq!(config.memory.default_retrieval_k, 5);
    assert_eq!(config.models.embedding_model, "text-embedding-3-large");
    assert_eq!(config.openai.api_key.as_deref(), Some("sk-test-123"));
    assert_eq!(config.openai.base_url, "http://localhost:8080/v1");
    assert_eq!(config.eventlog.data_dir, "/tmp/events");
}

/// Empty TOML produces the compiled defaults.
#[test]
fn empty_toml_produces_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");
    let defaults = MnemaConfig::default();
    assert_eq!(config.agent.name, defaults.agent.name);
    assert_eq!(config.memory.decay_rate, defaults.memory.decay_rate);
    assert_eq!(
        config.models.embedding_model,
        defaults.models.embedding_model
    );
}

/// Partial sections keep defaults for unspecified fields.
#[test]
fn partial_section_keeps_defaults() {
    let toml = r#"
[memory]
decay_rate = 0.9
"#;
    let config = load_config_from_str(toml).unwrap();
    assert_eq!(config.memory.decay_rate, 0.9);
    assert_eq!(config.memory.importance_scale, 10.0);
    assert_eq!(config.memory.database_path, "data/memories.db");
}

/// Unknown field in [memory] is rejected by deny_unknown_fields.
#[test]
fn unknown_field_in_memory_produces_error() {
    let toml = r#"
[memory]
decay_rte = 0.9
"#;
    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("decay_rte"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Unknown top-level section is rejected.
#[test]
fn unknown_section_produces_error() {
    let toml = r#"
[telemetry]
enabled = true
"#;
    assert!(load_config_from_str(toml).is_err());
}

/// Weights not summing to 1 fail validation, not deserialization.
#[test]
fn invalid_weights_fail_validation() {
    let toml = r#"
[memory]
recency_weight = 0.5
importance_weight = 0.5
relevance_weight = 0.5
"#;
    assert!(load_config_from_str(toml).is_ok());
    let err = load_and_validate_str(toml).expect_err("validation should fail");
    assert!(err.to_string().contains("sum to 1.0"), "got: {err}");
}

/// A decay rate of exactly 1 is rejected (no decay means recency never ages).
#[test]
fn decay_rate_of_one_fails_validation() {
    let toml = r#"
[memory]
decay_rate = 1.0
"#;
    let err = load_and_validate_str(toml).expect_err("validation should fail");
    assert!(err.to_string().contains("decay_rate"), "got: {err}");
}

/// Valid custom weights pass validation end to end.
#[test]
fn custom_weights_summing_to_one_pass_validation() {
    let toml = r#"
[memory]
recency_weight = 0.1
importance_weight = 0.8
relevance_weight = 0.1
"#;
    let config = load_and_validate_str(toml).expect("should validate");
    assert_eq!(config.memory.importance_weight, 0.8);
}

/// An env var beats the same key in a TOML file, and a key with an
/// underscore in its name maps to the right section/field split:
/// `MNEMA_MEMORY_DECAY_RATE` must land on `memory.decay_rate`,
/// not `memory.decay.rate`.
#[test]
fn env_var_overrides_toml_file() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "mnema.toml",
            r#"
[memory]
decay_rate = 0.5
importance_scale = 20.0
"#,
        )?;
        jail.set_env("MNEMA_MEMORY_DECAY_RATE", "0.9");

        let config = load_config_from_path(std::path::Path::new("mnema.toml"))
            .expect("config should load");
        assert_eq!(config.memory.decay_rate, 0.9);
        // Keys the env does not touch keep their file values.
        assert_eq!(config.memory.importance_scale, 20.0);
        Ok(())
    });
}

/// Env vars for every section land on the matching dotted key.
#[test]
fn env_vars_map_onto_their_sections() {
    figment::Jail::expect_with(|jail| {
        jail.set_env("MNEMA_AGENT_LOG_LEVEL", "trace");
        jail.set_env("MNEMA_MODELS_EMBEDDING_MODEL", "text-embedding-3-large");
        jail.set_env("MNEMA_OPENAI_API_KEY", "sk-from-env");
        jail.set_env("MNEMA_EVENTLOG_DATA_DIR", "/var/lib/mnema");
        jail.set_env("MNEMA_MEMORY_DEFAULT_RETRIEVAL_K", "3");

        let config = load_config_from_path(std::path::Path::new("mnema.toml"))
            .expect("config should load");
        assert_eq!(config.agent.log_level, "trace");
        assert_eq!(config.models.embedding_model, "text-embedding-3-large");
        assert_eq!(config.openai.api_key.as_deref(), Some("sk-from-env"));
        assert_eq!(config.eventlog.data_dir, "/var/lib/mnema");
        assert_eq!(config.memory.default_retrieval_k, 3);
        Ok(())
    });
}
