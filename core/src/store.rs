//! SQLite persistence layer — the remote-store boundary.
//!
//! RULE: Only store.rs talks to the database.
//! Engine components call store methods — they never execute SQL directly.
//!
//! Error mapping follows the interaction taxonomy: read-side failures are
//! shape errors (the caller cannot distinguish a missing table from a
//! malformed one), write-side failures are persistence errors.

use crate::{
    error::{EngineError, EngineResult},
    types::{Period, WideRow, CHANNEL_COUNT},
};
use rusqlite::{params, Connection};

pub struct ScenarioStore {
    conn: Connection,
}

impl ScenarioStore {
    /// Open (or create) the allocation database at `path`.
    pub fn open(path: &str) -> EngineResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )
        .map_err(|e| EngineError::persistence(format!("cannot open {path}: {e}")))?;
        // WAL mode only for real files (shared-memory and :memory: ignore it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> EngineResult<Self> {
        let conn = Connection::open(":memory:")
            .map_err(|e| EngineError::persistence(format!("cannot open :memory:: {e}")))?;
        Ok(Self { conn })
    }

    /// Apply the schema migration.
    pub fn migrate(&self) -> EngineResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_allocations.sql"))
            .map_err(|e| EngineError::persistence(format!("migration failed: {e}")))?;
        Ok(())
    }

    /// Read the full wide table in insertion order.
    pub fn wide_rows(&self) -> EngineResult<Vec<WideRow>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT month, search_engine, social_media, video, email, roi
                 FROM budget_allocations ORDER BY id ASC",
            )
            .map_err(|e| EngineError::data_shape(e.to_string()))?;

        let raw: Vec<(String, [f64; CHANNEL_COUNT], f64)> = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    [row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?],
                    row.get(5)?,
                ))
            })
            .map_err(|e| EngineError::data_shape(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| EngineError::data_shape(e.to_string()))?;

        raw.into_iter()
            .map(|(label, budgets, outcome)| {
                let period = Period::parse(&label)
                    .ok_or_else(|| EngineError::data_shape(format!("unknown period label '{label}'")))?;
                Ok(WideRow { period, budgets, outcome })
            })
            .collect()
    }

    /// Append exactly one wide row. Not idempotent — every call inserts.
    pub fn append_row(&self, row: &WideRow) -> EngineResult<()> {
        self.conn
            .execute(
                "INSERT INTO budget_allocations
                 (month, search_engine, social_media, video, email, roi, recorded_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    row.period.label(),
                    row.budgets[0],
                    row.budgets[1],
                    row.budgets[2],
                    row.budgets[3],
                    row.outcome,
                    chrono::Utc::now().to_rfc3339(),
                ],
            )
            .map_err(|e| EngineError::persistence(e.to_string()))?;
        Ok(())
    }

    pub fn is_empty(&self) -> EngineResult<bool> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM budget_allocations", [], |row| row.get(0))
            .map_err(|e| EngineError::data_shape(e.to_string()))?;
        Ok(count == 0)
    }

    /// Populate an empty store with seed history. No-op if rows exist.
    pub fn seed_history(&self, rows: &[WideRow]) -> EngineResult<()> {
        if !self.is_empty()? {
            return Ok(());
        }
        for row in rows {
            self.append_row(row)?;
        }
        log::info!("store: seeded {} historical rows", rows.len());
        Ok(())
    }
}
