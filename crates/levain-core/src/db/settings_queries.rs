//! Persistent key/value settings.

use rusqlite::{params, OptionalExtension};

use crate::error::{BakeryError, DatabaseResultExt, Result};

/// Room temperature assumed when nothing is stored, in degrees Celsius.
pub const DEFAULT_ROOM_TEMPERATURE: i32 = 20;

const ROOM_TEMPERATURE_KEY: &str = "room_temperature";
const SELECT_SETTING_SQL: &str = "SELECT value FROM settings WHERE key = ?1";
const UPSERT_SETTING_SQL: &str =
    "INSERT INTO settings (key, value) VALUES (?1, ?2) ON CONFLICT(key) DO UPDATE SET value = excluded.value";

impl super::Database {
    fn setting(&self, key: &str) -> Result<Option<String>> {
        self.connection
            .query_row(SELECT_SETTING_SQL, params![key], |row| row.get(0))
            .optional()
            .db_context("Failed to read setting")
    }

    fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.connection
            .execute(UPSERT_SETTING_SQL, params![key, value])
            .db_context("Failed to store setting")?;
        Ok(())
    }

    /// The stored room temperature, or [`DEFAULT_ROOM_TEMPERATURE`].
    pub fn room_temperature(&self) -> Result<i32> {
        match self.setting(ROOM_TEMPERATURE_KEY)? {
            Some(value) => value.parse().map_err(|_| BakeryError::Configuration {
                message: format!("Stored room temperature '{value}' is not a number"),
            }),
            None => Ok(DEFAULT_ROOM_TEMPERATURE),
        }
    }

    /// Stores the room temperature.
    pub fn set_room_temperature(&mut self, temperature: i32) -> Result<()> {
        self.set_setting(ROOM_TEMPERATURE_KEY, &temperature.to_string())
    }
}
