//! SQLite-backed persistence for repository snapshots and the session user.
//!
//! The repository never saves itself; hosts call [`StateDb::save_snapshot`]
//! after a mutating operation completes.

use rusqlite::{params, Connection};
use std::path::Path;

use super::data_dir;
use crate::error::{DatabaseError, Result};
use crate::repository::{RepositorySnapshot, SNAPSHOT_VERSION};
use crate::session::User;

const SNAPSHOT_KEY: &str = "state.snapshot";
const SESSION_USER_KEY: &str = "session.user";

/// SQLite key-value store for client state.
pub struct StateDb {
    conn: Connection,
}

impl StateDb {
    /// Open the database at `~/.config/habitual/habitual.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("habitual.db");
        Self::open_at(&path)
    }

    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key        TEXT PRIMARY KEY,
                value      TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
            );",
        )
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value, updated_at)
             VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn kv_delete(&self, key: &str) -> Result<(), rusqlite::Error> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    pub fn save_snapshot(&self, snapshot: &RepositorySnapshot) -> Result<()> {
        let json = serde_json::to_string(snapshot)?;
        self.kv_set(SNAPSHOT_KEY, &json)?;
        Ok(())
    }

    /// The last saved snapshot, if any.
    ///
    /// Snapshots written by a newer format version are rejected rather than
    /// decoded into fields they may not match.
    pub fn load_snapshot(&self) -> Result<Option<RepositorySnapshot>> {
        let Some(json) = self.kv_get(SNAPSHOT_KEY)? else {
            return Ok(None);
        };
        let snapshot: RepositorySnapshot = serde_json::from_str(&json)
            .map_err(|e| DatabaseError::CorruptSnapshot(e.to_string()))?;
        if snapshot.version != SNAPSHOT_VERSION {
            tracing::warn!(
                found = snapshot.version,
                expected = SNAPSHOT_VERSION,
                "snapshot version mismatch"
            );
            return Err(DatabaseError::CorruptSnapshot(format!(
                "unsupported snapshot version {} (expected {SNAPSHOT_VERSION})",
                snapshot.version
            ))
            .into());
        }
        Ok(Some(snapshot))
    }

    pub fn session_user(&self) -> Result<Option<User>> {
        match self.kv_get(SESSION_USER_KEY)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub fn set_session_user(&self, user: Option<&User>) -> Result<()> {
        match user {
            Some(user) => self.kv_set(SESSION_USER_KEY, &serde_json::to_string(user)?)?,
            None => self.kv_delete(SESSION_USER_KEY)?,
        }
        Ok(())
    }
}
