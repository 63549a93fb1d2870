//! SQLite-backed user store.
//! Used by: handlers::users, state.

use std::sync::Mutex;

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub struct UserStore {
    conn: Mutex<Connection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
}

impl UserStore {
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL
            )",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::open(":memory:")
    }

    pub fn insert(&self, name: &str) -> Result<i64> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| crate::error::Error::Lock(e.to_string()))?;
        conn.execute("INSERT INTO users (name) VALUES (?1)", [name])?;
        Ok(conn.last_insert_rowid())
    }

    /// Full user collection, ordered by id ascending. Empty table yields
    /// an empty vector.
    pub fn all_users(&self) -> Result<Vec<User>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| crate::error::Error::Lock(e.to_string()))?;
        let mut stmt = conn.prepare("SELECT id, name FROM users ORDER BY id ASC")?;
        let users = stmt
            .query_map([], |row| {
                Ok(User {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(users)
    }

    /// Inserts demo rows into an empty database so a fresh checkout serves
    /// something. No-op when any user already exists.
    pub fn seed_defaults(&self) -> Result<()> {
        if !self.all_users()?.is_empty() {
            return Ok(());
        }
        for name in ["Ada Lovelace", "Grace Hopper"] {
            self.insert(name)?;
        }
        tracing::info!("seeded demo users into empty database");
        Ok(())
    }
}
