use anyhow::{Context, Result};
use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension};
use serde_json::Value;
use std::sync::Mutex;

use super::{CatalogStore, Document};

/// SQLite-backed document store. Each row is one JSON document.
pub struct SqliteCatalog {
    conn: Mutex<Connection>,
}

impl SqliteCatalog {
    /// Open or create the documents table at `path`.
    /// Use `":memory:"` for tests.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path).context("failed to open catalog database")?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                id         TEXT NOT NULL,
                data       TEXT NOT NULL,
                PRIMARY KEY (collection, id)
            )",
        )
        .context("failed to create documents table")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn in_memory() -> Result<Self> {
        Self::open(":memory:")
    }

    /// Store a document (upsert). Used for fixtures and local seeding.
    pub fn insert(&self, collection: &str, id: &str, doc: &Value) -> Result<()> {
        let json = serde_json::to_string(doc)?;
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO documents (collection, id, data) VALUES (?1, ?2, ?3)
             ON CONFLICT(collection, id) DO UPDATE SET data = excluded.data",
            [collection, id, &json],
        )?;
        Ok(())
    }

    /// Store a raw document body without checking that it is valid JSON.
    /// `list` reports such rows per document; `get` fails on them.
    pub fn insert_raw(&self, collection: &str, id: &str, data: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO documents (collection, id, data) VALUES (?1, ?2, ?3)
             ON CONFLICT(collection, id) DO UPDATE SET data = excluded.data",
            [collection, id, data],
        )?;
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for SqliteCatalog {
    async fn list(&self, collection: &str) -> Result<Vec<Document>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT id, data FROM documents WHERE collection = ?1 ORDER BY id ASC")?;
        let rows = stmt
            .query_map([collection], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows
            .into_iter()
            .map(|(id, json)| Document {
                body: serde_json::from_str(&json).map_err(|e| e.to_string()),
                id,
            })
            .collect())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        let conn = self.conn.lock().unwrap();
        let json: Option<String> = conn
            .query_row(
                "SELECT data FROM documents WHERE collection = ?1 AND id = ?2",
                [collection, id],
                |row| row.get(0),
            )
            .optional()?;
        match json {
            Some(json) => Ok(Some(serde_json::from_str(&json).with_context(|| {
                format!("corrupt document {collection}/{id}")
            })?)),
            None => Ok(None),
        }
    }
}
