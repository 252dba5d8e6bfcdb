// SPDX-FileCopyrightText: 2026 Mnema Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite-backed memory store: one row per memory with a BLOB embedding,
//! plus a secondary index table for agent membership.
//!
//! Inserts write the memory row and its agent index rows in a single
//! transaction, so readers never observe a partially indexed memory.

use chrono::{DateTime, Utc};
use mnema_core::{MemoryId, MemoryKind, MnemaError};
use tracing::warn;

use crate::database::{Database, map_tr_err};
use crate::types::{Memory, blob_to_vec, vec_to_blob};

const MEMORY_COLUMNS: &str = "id, content, kind, embedding, importance, metadata, created_at";

/// Raw row as read from SQLite, before fallible decoding.
type RawRow = (String, String, String, Vec<u8>, f64, Option<String>, String);

/// Persistent store for memories.
#[derive(Debug)]
pub struct MemoryStore {
    db: Database,
}

impl MemoryStore {
    /// Create a store over an opened database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insert a memory and its agent index rows atomically.
    ///
    /// Nothing is visible to readers until the transaction commits; a
    /// failed insert leaves no partial record behind.
    pub async fn insert(&self, memory: &Memory) -> Result<(), MnemaError> {
        let id = memory.id.0.clone();
        let content = memory.content.clone();
        let kind = memory.kind.as_str().to_string();
        let embedding_blob = vec_to_blob(&memory.embedding);
        let importance = memory.importance_score;
        let metadata = if memory.metadata.is_empty() {
            None
        } else {
            Some(serde_json::Value::Object(memory.metadata.clone()).to_string())
        };
        let created_at = memory.created_at.to_rfc3339();
        let agents = memory.associated_agents.clone();

        self.db
            .connection()
            .call(move |conn| {
                let tx = conn.transaction()?;
                tx.execute(
                    "INSERT INTO memories (id, content, kind, embedding, importance, metadata, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    rusqlite::params![id, content, kind, embedding_blob, importance, metadata, created_at],
                )?;
                for agent in &agents {
                    tx.execute(
                        "INSERT INTO memory_agents (memory_id, agent_id) VALUES (?1, ?2)",
                        rusqlite::params![id, agent],
                    )?;
                }
                tx.commit()?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }

    /// Exact lookup by id. Absent ids return `None`, not an error; a
    /// present but undecodable record is a [`MnemaError::StorageRead`].
    pub async fn get_by_id(&self, id: &MemoryId) -> Result<Option<Memory>, MnemaError> {
        let id = id.0.clone();
        let row = self
            .db
            .connection()
            .call(move |conn| {
                let sql = format!("SELECT {MEMORY_COLUMNS} FROM memories WHERE id = ?1");
                let mut stmt = conn.prepare(&sql)?;
                let raw = match stmt
                    .query_row(rusqlite::params![id], read_raw_row)
                {
                    Ok(raw) => raw,
                    Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
                    Err(e) => return Err(e.into()),
                };
                let agents = load_agents(conn, &raw.0)?;
                Ok(Some((raw, agents)))
            })
            .await
            .map_err(map_tr_err)?;

        match row {
            None => Ok(None),
            Some((raw, agents)) => decode_row(raw, agents).map(Some).map_err(|reason| {
                MnemaError::StorageRead {
                    message: format!("corrupt memory record: {reason}"),
                }
            }),
        }
    }

    /// All memories of the given kind, ordered by `created_at` ascending
    /// (id breaks exact-timestamp ties deterministically).
    pub async fn get_by_kind(&self, kind: &MemoryKind) -> Result<Vec<Memory>, MnemaError> {
        let kind = kind.as_str().to_string();
        let rows = self
            .db
            .connection()
            .call(move |conn| {
                let sql = format!(
                    "SELECT {MEMORY_COLUMNS} FROM memories WHERE kind = ?1
                     ORDER BY created_at ASC, id ASC"
                );
                collect_rows_with_agents(conn, &sql, rusqlite::params![kind])
            })
            .await
            .map_err(map_tr_err)?;
        decode_rows(rows)
    }

    /// All memories whose associated agents contain `agent_id`, ordered by
    /// `created_at` ascending.
    pub async fn get_by_agent(&self, agent_id: &str) -> Result<Vec<Memory>, MnemaError> {
        let agent_id = agent_id.to_string();
        let rows = self
            .db
            .connection()
            .call(move |conn| {
                let sql = format!(
                    "SELECT {} FROM memories m
                     JOIN memory_agents ma ON ma.memory_id = m.id
                     WHERE ma.agent_id = ?1
                     ORDER BY m.created_at ASC, m.id ASC",
                    MEMORY_COLUMNS
                        .split(", ")
                        .map(|c| format!("m.{c}"))
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                collect_rows_with_agents(conn, &sql, rusqlite::params![agent_id])
            })
            .await
            .map_err(map_tr_err)?;
        decode_rows(rows)
    }

    /// The full corpus, ordered by `created_at` ascending. Used as the
    /// candidate set for scored retrieval.
    pub async fn scan_all(&self) -> Result<Vec<Memory>, MnemaError> {
        let rows = self
            .db
            .connection()
            .call(move |conn| {
                let sql = format!(
                    "SELECT {MEMORY_COLUMNS} FROM memories ORDER BY created_at ASC, id ASC"
                );
                collect_rows_with_agents(conn, &sql, [])
            })
            .await
            .map_err(map_tr_err)?;
        decode_rows(rows)
    }

    /// Number of stored memories.
    pub async fn count(&self) -> Result<usize, MnemaError> {
        self.db
            .connection()
            .call(|conn| {
                let n: i64 = conn.query_row("SELECT count(*) FROM memories", [], |row| row.get(0))?;
                Ok(n as usize)
            })
            .await
            .map_err(map_tr_err)
    }
}

fn read_raw_row(row: &rusqlite::Row) -> rusqlite::Result<RawRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
    ))
}

/// Load the agent index rows for one memory.
fn load_agents(conn: &rusqlite::Connection, memory_id: &str) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT agent_id FROM memory_agents WHERE memory_id = ?1 ORDER BY agent_id ASC")?;
    let agents = stmt
        .query_map(rusqlite::params![memory_id], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;
    Ok(agents)
}

/// Run a memory query and pair each raw row with its agents.
fn collect_rows_with_agents<P: rusqlite::Params>(
    conn: &rusqlite::Connection,
    sql: &str,
    params: P,
) -> Result<Vec<(RawRow, Vec<String>)>, tokio_rusqlite::Error> {
    let mut stmt = conn.prepare(sql)?;
    let raws = stmt
        .query_map(params, read_raw_row)?
        .collect::<Result<Vec<_>, _>>()?;
    let mut rows = Vec::with_capacity(raws.len());
    for raw in raws {
        let agents = load_agents(conn, &raw.0)?;
        rows.push((raw, agents));
    }
    Ok(rows)
}

/// Decode raw rows, skipping corrupt records with a warning.
///
/// The scan only fails when rows exist but none are readable.
fn decode_rows(rows: Vec<(RawRow, Vec<String>)>) -> Result<Vec<Memory>, MnemaError> {
    let total = rows.len();
    let mut memories = Vec::with_capacity(total);
    for (raw, agents) in rows {
        let id = raw.0.clone();
        match decode_row(raw, agents) {
            Ok(memory) => memories.push(memory),
            Err(reason) => warn!(id = %id, reason = %reason, "skipping corrupt memory record"),
        }
    }
    if total > 0 && memories.is_empty() {
        return Err(MnemaError::StorageRead {
            message: format!("all {total} scanned memory records are corrupt"),
        });
    }
    Ok(memories)
}

/// Decode one raw row into a [`Memory`], or describe why it is corrupt.
fn decode_row(raw: RawRow, agents: Vec<String>) -> Result<Memory, String> {
    let (id, content, kind, embedding_blob, importance, metadata, created_at) = raw;

    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| format!("bad created_at `{created_at}`: {e}"))?
        .with_timezone(&Utc);

    let metadata = match metadata {
        None => serde_json::Map::new(),
        Some(text) => match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(serde_json::Value::Object(map)) => map,
            Ok(_) => return Err("metadata is not a JSON object".to_string()),
            Err(e) => return Err(format!("bad metadata JSON: {e}")),
        },
    };

    if !embedding_blob.len().is_multiple_of(4) {
        return Err(format!(
            "embedding blob length {} is not a multiple of 4",
            embedding_blob.len()
        ));
    }

    Ok(Memory {
        id: MemoryId(id),
        content,
        kind: MemoryKind::from_str_value(&kind),
        associated_agents: agents,
        metadata,
        embedding: blob_to_vec(&embedding_blob),
        importance_score: importance,
        created_at,
    })
}
