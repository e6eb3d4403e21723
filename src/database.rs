use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("database lock poisoned")]
    Lock,
    #[error("could not resolve data directory")]
    DataDir,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Local SQLite database. A single `local_store` key/value table serves as the
/// durable namespace for all persisted application state; each record is a
/// JSON-serialized snapshot keyed by a fixed string.
pub struct Database {
    pub conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) the database in the platform data directory.
    pub fn new() -> Result<Self, DbError> {
        let dir = data_dir()?;
        std::fs::create_dir_all(&dir)?;
        let conn = Connection::open(dir.join("board.db"))?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.create_store_table()?;
        Ok(db)
    }

    /// In-memory database for tests.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.create_store_table()?;
        Ok(db)
    }

    fn create_store_table(&self) -> Result<(), DbError> {
        let conn = self.conn.lock().map_err(|_| DbError::Lock)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS local_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Read a value from the store, `None` if the key was never written.
    pub fn get_value(&self, key: &str) -> Result<Option<String>, DbError> {
        let conn = self.conn.lock().map_err(|_| DbError::Lock)?;
        let mut stmt = conn.prepare("SELECT value FROM local_store WHERE key = ?1")?;
        let mut rows = stmt.query([key])?;

        if let Some(row) = rows.next()? {
            Ok(Some(row.get(0)?))
        } else {
            Ok(None)
        }
    }

    /// Write a value, replacing any previous one under the same key.
    pub fn set_value(&self, key: &str, value: &str) -> Result<(), DbError> {
        let conn = self.conn.lock().map_err(|_| DbError::Lock)?;
        let now = chrono::Utc::now().timestamp_millis();
        conn.execute(
            "INSERT OR REPLACE INTO local_store (key, value, updated_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![key, value, now],
        )?;
        Ok(())
    }

    /// Remove a key. No-op if absent.
    pub fn delete_value(&self, key: &str) -> Result<(), DbError> {
        let conn = self.conn.lock().map_err(|_| DbError::Lock)?;
        conn.execute("DELETE FROM local_store WHERE key = ?1", [key])?;
        Ok(())
    }

    /// Load application settings from their individual store keys.
    pub fn get_settings(&self) -> Result<Settings, DbError> {
        let mut settings = Settings::default();
        if let Some(theme) = self.get_value(KEY_THEME)? {
            settings.theme = theme;
        }
        if let Some(language) = self.get_value(KEY_LANGUAGE)? {
            settings.language = language;
        }
        if let Some(key) = self.get_value(KEY_AI_API_KEY)? {
            settings.api_key = key;
        }
        if let Some(base_url) = self.get_value(KEY_AI_BASE_URL)? {
            settings.base_url = base_url;
        }
        if let Some(model) = self.get_value(KEY_AI_MODEL)? {
            settings.model = model;
        }
        Ok(settings)
    }

    /// Persist settings. Theme and language live under their own keys so each
    /// preference round-trips independently.
    pub fn save_settings(&self, settings: &Settings) -> Result<(), DbError> {
        self.set_value(KEY_THEME, &settings.theme)?;
        self.set_value(KEY_LANGUAGE, &settings.language)?;
        self.set_value(KEY_AI_API_KEY, &settings.api_key)?;
        self.set_value(KEY_AI_BASE_URL, &settings.base_url)?;
        self.set_value(KEY_AI_MODEL, &settings.model)?;
        Ok(())
    }
}

const KEY_THEME: &str = "digihart.theme";
const KEY_LANGUAGE: &str = "digihart.language";
const KEY_AI_API_KEY: &str = "digihart.ai.api_key";
const KEY_AI_BASE_URL: &str = "digihart.ai.base_url";
const KEY_AI_MODEL: &str = "digihart.ai.model";

/// User-adjustable application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub theme: String,
    pub language: String,
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            language: "nl".to_string(),
            api_key: String::new(),
            base_url: crate::ai::DEFAULT_BASE_URL.to_string(),
            model: crate::ai::DEFAULT_MODEL.to_string(),
        }
    }
}

fn data_dir() -> Result<PathBuf, DbError> {
    dirs::data_dir()
        .map(|d| d.join("digihart-board"))
        .ok_or(DbError::DataDir)
}
