// SPDX-FileCopyrightText: 2026 Mnema Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistent agent memory with scored retrieval.
//!
//! Memories live in SQLite behind a single async connection. Each one
//! carries an embedding and an importance score assigned at creation,
//! and retrieval ranks candidates by a weighted blend of recency,
//! importance, and relevance to a query embedding.
//!
//! The layers, bottom to top:
//!
//! - [`Database`]: connection handling, pragmas, schema migrations
//! - [`MemoryStore`]: row-level reads and writes
//! - [`MemoryStream`]: scored retrieval over one store
//! - [`MemoryManager`]: embed, score, persist pipeline over provider
//!   adapters

pub mod database;
pub mod manager;
pub mod reflection;
pub mod retrieval;
pub mod store;
pub mod stream;
pub mod types;

pub use database::Database;
pub use manager::{AddMemory, MemoryManager};
pub use reflection::{MemoryCompressor, filter_by_time, generate_summary, normalize_content};
pub use retrieval::{RetrievalParams, RetrievalWeights};
pub use store::MemoryStore;
pub use stream::{MemoryFilter, MemoryStream};
pub use types::{DraftMemory, Memory, ScoredMemory, cosine_similarity};
