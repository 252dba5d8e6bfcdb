// SPDX-FileCopyrightText: 2026 Mnema Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and
//! embedded migrations.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread: `Database` wraps one connection, and the store calls through
//! `connection().call()`. Do NOT create additional connections for writes.

use std::path::Path;

use mnema_core::MnemaError;
use tokio_rusqlite::Connection;
use tracing::debug;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Convert tokio-rusqlite errors into [`MnemaError::StorageWrite`].
pub fn map_tr_err(e: tokio_rusqlite::Error) -> MnemaError {
    MnemaError::StorageWrite {
        source: Box::new(e),
    }
}

/// Handle to the memory database.
///
/// Opened once at process start, bound to one file (or to memory for
/// tests). Every write commits before the call returns.
pub struct Database {
    conn: Connection,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // `tokio_rusqlite::Connection` is not `Debug`.
        f.debug_struct("Database").finish_non_exhaustive()
    }
}

impl Database {
    /// Open (creating if needed) the database at `path`, apply PRAGMAs,
    /// and run any pending migrations.
    pub async fn open(path: &str) -> Result<Self, MnemaError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| MnemaError::StorageWrite {
                source: Box::new(e),
            })?;
        }

        let conn = Connection::open(path).await.map_err(map_tr_err)?;
        Self::initialize(&conn).await?;
        debug!(path, "memory database opened");
        Ok(Self { conn })
    }

    /// Open an in-memory database with the full schema. For tests.
    pub async fn open_in_memory() -> Result<Self, MnemaError> {
        let conn = Connection::open_in_memory().await.map_err(map_tr_err)?;
        Self::initialize(&conn).await?;
        Ok(Self { conn })
    }

    async fn initialize(conn: &Connection) -> Result<(), MnemaError> {
        conn.call(|conn| {
            conn.execute_batch(
                "PRAGMA journal_mode = WAL;
                 PRAGMA synchronous = NORMAL;
                 PRAGMA foreign_keys = ON;",
            )?;
            embedded::migrations::runner()
                .run(conn)
                .map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
    }

    /// The underlying single-writer connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
