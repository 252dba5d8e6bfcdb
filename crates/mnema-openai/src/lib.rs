// SPDX-FileCopyrightText: 2026 Mnema Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI-compatible provider adapters.
//!
//! One [`OpenAiClient`] backs three adapters: [`OpenAiEmbedder`] for
//! embeddings, [`OpenAiImportance`] for 1-10 importance scoring, and
//! [`OpenAiGenerator`] for free-form generation. Any server speaking the
//! OpenAI wire format works via `openai.base_url`.

pub mod adapters;
pub mod client;
pub mod types;

pub use adapters::{OpenAiEmbedder, OpenAiGenerator, OpenAiImportance};
pub use client::OpenAiClient;
