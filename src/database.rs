// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Media index database
//!
//! The messaging client keeps media payloads on disk and references them by
//! content hash. This module exposes that index to the gateway through the
//! [`MediaStore`] trait, with a SQLite-backed implementation.
//!
//! ## Schema
//!
//! ```text
//! media(key, type, path, name, size, data)
//!        \__ primary key (key, type)
//! ```

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

use crate::error::{GatewayError, Result};
use crate::models::{MediaRecord, MediaType};

/// Lookup of media records by category and content hash.
///
/// Implementations must be safe for concurrent reads.
pub trait MediaStore: Send + Sync {
    /// Returns [`GatewayError::MediaNotFound`] when no record matches.
    fn get_media(&self, category: MediaType, key: &str) -> Result<MediaRecord>;
}

/// SQLite-backed media index
pub struct MediaDatabase {
    conn: Mutex<Connection>,
}

impl MediaDatabase {
    /// Open or create the index at the given path
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS media (
                key TEXT NOT NULL,
                type TEXT NOT NULL,
                path TEXT NOT NULL DEFAULT '',
                name TEXT NOT NULL DEFAULT '',
                size INTEGER NOT NULL DEFAULT 0,
                data BLOB,
                PRIMARY KEY (key, type)
            );",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| GatewayError::DatabaseError("connection lock poisoned".to_string()))
    }

    /// Insert or replace a record
    pub fn insert(&self, record: &MediaRecord) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO media (key, type, path, name, size, data)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.key,
                record.media_type.as_str(),
                record.path,
                record.name,
                record.size,
                record.data,
            ],
        )?;
        Ok(())
    }

    /// Number of indexed records
    pub fn count(&self) -> Result<i64> {
        let conn = self.lock()?;
        let n = conn.query_row("SELECT COUNT(*) FROM media", [], |row| row.get(0))?;
        Ok(n)
    }
}

impl MediaStore for MediaDatabase {
    fn get_media(&self, category: MediaType, key: &str) -> Result<MediaRecord> {
        let conn = self.lock()?;
        let record = conn
            .query_row(
                "SELECT key, path, name, size, data FROM media WHERE key = ?1 AND type = ?2",
                params![key, category.as_str()],
                |row| {
                    Ok(MediaRecord {
                        key: row.get(0)?,
                        media_type: category,
                        path: row.get(1)?,
                        name: row.get(2)?,
                        size: row.get(3)?,
                        data: row.get(4)?,
                    })
                },
            )
            .optional()?;

        match record {
            // Only voice carries an inline payload
            Some(mut record) => {
                if category != MediaType::Voice {
                    record.data = None;
                }
                Ok(record)
            }
            None => Err(GatewayError::MediaNotFound {
                category,
                key: key.to_string(),
            }),
        }
    }
}
