// SPDX-FileCopyrightText: 2026 Mnema Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Mnema integration tests.
//!
//! Provides mock provider adapters for fast, deterministic, CI-runnable
//! tests without external services.
//!
//! # Components
//!
//! - [`MockEmbedder`] - Mock embedding adapter with pre-configured vectors
//! - [`MockImportance`] - Mock importance calculator with queued scores
//! - [`MockGenerator`] - Mock text generator with queued replies

pub mod mock_embedder;
pub mod mock_generator;
pub mod mock_importance;

pub use mock_embedder::MockEmbedder;
pub use mock_generator::MockGenerator;
pub use mock_importance::MockImportance;
