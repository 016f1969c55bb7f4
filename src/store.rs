use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::{Connection, params};

use crate::error::StoreError;

// One row of the shared list. `name` deliberately conflates everyone sharing
// a first name; that is the whole premise of the modernized list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameScore {
    pub name: String,
    pub nice_meter: i64,
    pub updates: i64,
}

impl NameScore {
    pub fn is_nice(&self) -> bool {
        self.nice_meter > 0
    }
}

// Handle to the naughty_nice table. Cloning shares the same underlying
// connection; the store is the single source of truth, there is no in-memory
// copy of any row.
#[derive(Clone)]
pub struct ListStore {
    conn: Connection,
}

impl ListStore {
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).await?;
        let store = Self { conn };
        store.setup().await?;
        Ok(store)
    }

    pub async fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().await?;
        let store = Self { conn };
        store.setup().await?;
        Ok(store)
    }

    // Idempotent, run on every startup.
    async fn setup(&self) -> Result<(), StoreError> {
        self.conn
            .call(|conn| {
                conn.execute(
                    "CREATE TABLE IF NOT EXISTS naughty_nice (
                        name TEXT PRIMARY KEY,
                        nice_meter INT,
                        updates INT DEFAULT 1
                    )",
                    [],
                )?;
                Ok(())
            })
            .await?;
        Ok(())
    }

    pub async fn lookup(&self, name: &str) -> Result<Option<NameScore>, StoreError> {
        let name = name.to_string();
        let row = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT name, nice_meter, updates FROM naughty_nice WHERE name = ?1",
                )?;
                let mut rows = stmt.query_map(params![name], |row| {
                    Ok(NameScore {
                        name: row.get(0)?,
                        nice_meter: row.get(1)?,
                        updates: row.get(2)?,
                    })
                })?;
                match rows.next() {
                    Some(row) => Ok(Some(row?)),
                    None => Ok(None),
                }
            })
            .await?;
        Ok(row)
    }

    // Insert-or-accumulate in one statement. The judged delta arrives as a
    // float but the column is INT, so it is rounded at this boundary. The
    // first insert leaves `updates` at its column default of 1; every merge
    // after that increments it. Runs in a transaction that rolls back on
    // error; the error is returned to the caller, not swallowed.
    pub async fn upsert(&self, name: &str, delta: f64) -> Result<NameScore, StoreError> {
        let name = name.to_string();
        let delta = delta.round() as i64;
        let row = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                let row = tx.query_row(
                    "INSERT INTO naughty_nice (name, nice_meter) VALUES (?1, ?2)
                     ON CONFLICT(name) DO UPDATE SET
                        nice_meter = nice_meter + excluded.nice_meter,
                        updates = updates + 1
                     RETURNING name, nice_meter, updates",
                    params![name, delta],
                    |row| {
                        Ok(NameScore {
                            name: row.get(0)?,
                            nice_meter: row.get(1)?,
                            updates: row.get(2)?,
                        })
                    },
                )?;
                tx.commit()?;
                Ok(row)
            })
            .await?;
        debug!("Upsert result: {:?}", row);
        Ok(row)
    }

    pub async fn top_nice(&self, limit: i64) -> Result<Vec<NameScore>, StoreError> {
        self.top(
            "SELECT name, nice_meter, updates FROM naughty_nice
             WHERE nice_meter > 0 ORDER BY nice_meter DESC LIMIT ?1",
            limit,
        )
        .await
    }

    pub async fn top_naughty(&self, limit: i64) -> Result<Vec<NameScore>, StoreError> {
        self.top(
            "SELECT name, nice_meter, updates FROM naughty_nice
             WHERE nice_meter < 0 ORDER BY nice_meter ASC LIMIT ?1",
            limit,
        )
        .await
    }

    async fn top(&self, sql: &'static str, limit: i64) -> Result<Vec<NameScore>, StoreError> {
        let rows = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(sql)?;
                let rows = stmt.query_map(params![limit], |row| {
                    Ok(NameScore {
                        name: row.get(0)?,
                        nice_meter: row.get(1)?,
                        updates: row.get(2)?,
                    })
                })?;
                let mut out = Vec::new();
                for row in rows {
                    out.push(row?);
                }
                Ok(out)
            })
            .await?;
        Ok(rows)
    }
}
