//! SQLite-backed `CatRepository`
//!
//! One connection guarded by a mutex. The table is created on open if it
//! does not exist yet. Timestamps are stored as RFC 3339 text.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::errors::{StoreError, StoreResult};
use super::CatRepository;
use crate::entity::{AggregateField, Cat, CatField};

const SELECT_COLUMNS: &str = "SELECT id, name, age, version, created_on, updated_on FROM cat";

/// Row as read from SQLite, before range and timestamp checks
struct CatRow {
    id: i64,
    name: String,
    age: i64,
    version: i64,
    created_on: Option<String>,
    updated_on: Option<String>,
}

impl CatRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            age: row.get(2)?,
            version: row.get(3)?,
            created_on: row.get(4)?,
            updated_on: row.get(5)?,
        })
    }

    fn into_cat(self) -> StoreResult<Cat> {
        let age = u32::try_from(self.age)
            .map_err(|_| StoreError::Corrupt(format!("id {}: age = {}", self.id, self.age)))?;
        let version = u32::try_from(self.version).map_err(|_| {
            StoreError::Corrupt(format!("id {}: version = {}", self.id, self.version))
        })?;

        Ok(Cat {
            id: Some(self.id),
            name: self.name,
            age,
            version,
            created_on: decode_timestamp(self.id, self.created_on)?,
            updated_on: decode_timestamp(self.id, self.updated_on)?,
        })
    }
}

fn decode_timestamp(id: i64, raw: Option<String>) -> StoreResult<Option<DateTime<Utc>>> {
    raw.map(|text| {
        DateTime::parse_from_rfc3339(&text)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|e| StoreError::Corrupt(format!("id {}: timestamp '{}': {}", id, text, e)))
    })
    .transpose()
}

fn encode_timestamp(ts: Option<DateTime<Utc>>) -> Option<String> {
    ts.map(|t| t.to_rfc3339())
}

/// Cat store on a SQLite database
pub struct SqliteCatRepository {
    path: Option<PathBuf>,
    conn: Mutex<Connection>,
}

impl SqliteCatRepository {
    /// Open (or create) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(&path)?;
        Self::with_connection(Some(path), conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::with_connection(None, Connection::open_in_memory()?)
    }

    fn with_connection(path: Option<PathBuf>, conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS cat (
              id INTEGER PRIMARY KEY AUTOINCREMENT,
              name TEXT NOT NULL,
              age INTEGER NOT NULL,
              version INTEGER NOT NULL,
              created_on TEXT,
              updated_on TEXT
            );
            "#,
        )?;
        Ok(Self {
            path,
            conn: Mutex::new(conn),
        })
    }

    /// Database file, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn query_cats(&self, sql: &str, params: impl rusqlite::Params) -> StoreResult<Vec<Cat>> {
        let conn = self.conn.lock()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, CatRow::read)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(CatRow::into_cat).collect()
    }
}

impl CatRepository for SqliteCatRepository {
    fn kind(&self) -> &'static str {
        "sqlite"
    }

    fn insert(&self, cat: &Cat) -> StoreResult<Cat> {
        let conn = self.conn.lock()?;
        conn.execute(
            "INSERT INTO cat (name, age, version, created_on, updated_on) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                cat.name,
                cat.age,
                cat.version,
                encode_timestamp(cat.created_on),
                encode_timestamp(cat.updated_on),
            ],
        )?;

        let mut stored = cat.clone();
        stored.id = Some(conn.last_insert_rowid());
        Ok(stored)
    }

    fn find_by_id(&self, id: i64) -> StoreResult<Option<Cat>> {
        let row = {
            let conn = self.conn.lock()?;
            conn.query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                params![id],
                CatRow::read,
            )
            .optional()?
        };
        row.map(CatRow::into_cat).transpose()
    }

    fn find_all(&self) -> StoreResult<Vec<Cat>> {
        self.query_cats(&format!("{} ORDER BY id ASC", SELECT_COLUMNS), [])
    }

    fn count(&self) -> StoreResult<usize> {
        let conn = self.conn.lock()?;
        let rows: i64 = conn.query_row("SELECT COUNT(*) FROM cat", [], |row| row.get(0))?;
        usize::try_from(rows).map_err(|_| StoreError::Corrupt(format!("row count {}", rows)))
    }

    fn update(&self, cat: &Cat) -> StoreResult<Cat> {
        let id = cat.id.ok_or(StoreError::MissingId)?;
        let conn = self.conn.lock()?;
        let changed = conn.execute(
            "UPDATE cat SET name = ?1, age = ?2, version = ?3, created_on = ?4, updated_on = ?5 WHERE id = ?6",
            params![
                cat.name,
                cat.age,
                cat.version,
                encode_timestamp(cat.created_on),
                encode_timestamp(cat.updated_on),
                id,
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(cat.clone())
    }

    fn delete_by_id(&self, id: i64) -> StoreResult<bool> {
        let conn = self.conn.lock()?;
        let removed = conn.execute("DELETE FROM cat WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }

    fn exists_by_id(&self, id: i64) -> StoreResult<bool> {
        let conn = self.conn.lock()?;
        let found = conn
            .query_row("SELECT 1 FROM cat WHERE id = ?1", params![id], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }

    fn find_ordered_by(&self, field: CatField, limit: usize) -> StoreResult<Vec<Cat>> {
        // The column comes from the static field table, never from caller text.
        let sql = format!(
            "{} ORDER BY {} ASC, id ASC LIMIT ?1",
            SELECT_COLUMNS,
            field.column()
        );
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.query_cats(&sql, params![limit])
    }

    fn sum_of(&self, field: AggregateField) -> StoreResult<i64> {
        let conn = self.conn.lock()?;
        let total: i64 = conn.query_row(
            &format!("SELECT COALESCE(SUM({}), 0) FROM cat", field.column()),
            [],
            |row| row.get(0),
        )?;
        Ok(total)
    }
}
