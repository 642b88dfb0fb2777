//! SQLite-backed key-value store with typed accessors.
//!
//! Every entity is one whole-value JSON document under a fixed key;
//! writes replace the document. The raw key strings stay private --
//! callers go through the per-entity accessors, which also supply the
//! defaults for unset keys.
//!
//! There is no cross-key transaction: updates are read-modify-write
//! sequences, and two writers racing on the same key lose one update.
//! That hazard is inherited from the original design and accepted.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::data_dir;
use crate::block::{BlockStats, BlockedSite, InterceptConfig};
use crate::error::{CoreError, Result, StoreError};
use crate::study::{Flashcard, Scoreboard};

const KEY_BLOCKED_SITES: &str = "blockedSites";
const KEY_BLOCK_STATS: &str = "blockStats";
const KEY_FLASHCARDS: &str = "flashcards";
const KEY_SCORE: &str = "score";
const KEY_STREAK: &str = "streak";
const KEY_BEST_STREAK: &str = "bestStreak";
const KEY_TOTAL_CORRECT: &str = "totalCorrect";
const KEY_TOTAL_ANSWERED: &str = "totalAnswered";
const KEY_DARK_MODE: &str = "isDarkMode";
const KEY_INTERCEPT_CONFIG: &str = "interceptConfig";
const KEY_COUNT: &str = "count";
const KEY_USERNAME: &str = "username";

/// Shared key-value store for all user data.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open the store at `~/.config/koala/koala.db`, creating the
    /// schema if needed.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be resolved or
    /// the database cannot be opened.
    pub fn open() -> Result<Self> {
        let path = data_dir()
            .map_err(|e| CoreError::Custom(e.to_string()))?
            .join("koala.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open the store at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: PathBuf::from(path),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store (tests, throwaway sessions).
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Seed defaults for keys that have never been written, mirroring
    /// the original install handler. Existing values are left alone so
    /// re-running never wipes user data.
    pub fn ensure_defaults(&self) -> Result<(), StoreError> {
        if self.get_raw(KEY_INTERCEPT_CONFIG)?.is_none() {
            self.set_json(KEY_INTERCEPT_CONFIG, &InterceptConfig::default())?;
        }
        if self.get_raw(KEY_BLOCKED_SITES)?.is_none() {
            self.set_json::<Vec<BlockedSite>>(KEY_BLOCKED_SITES, &Vec::new())?;
        }
        if self.get_raw(KEY_BLOCK_STATS)?.is_none() {
            self.set_json(KEY_BLOCK_STATS, &BlockStats::default())?;
        }
        if self.get_raw(KEY_COUNT)?.is_none() {
            self.set_json(KEY_COUNT, &0u64)?;
        }
        Ok(())
    }

    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.get_raw(key)? {
            Some(raw) => {
                let value =
                    serde_json::from_str(&raw).map_err(|e| StoreError::CorruptValue {
                        key: key.to_string(),
                        message: e.to_string(),
                    })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|e| StoreError::CorruptValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.set_raw(key, &raw)
    }

    // Block list

    pub fn blocked_sites(&self) -> Result<Vec<BlockedSite>, StoreError> {
        Ok(self.get_json(KEY_BLOCKED_SITES)?.unwrap_or_default())
    }

    pub fn set_blocked_sites(&self, sites: &[BlockedSite]) -> Result<(), StoreError> {
        self.set_json(KEY_BLOCKED_SITES, &sites)
    }

    pub fn block_stats(&self) -> Result<BlockStats, StoreError> {
        Ok(self.get_json(KEY_BLOCK_STATS)?.unwrap_or_default())
    }

    pub fn set_block_stats(&self, stats: &BlockStats) -> Result<(), StoreError> {
        self.set_json(KEY_BLOCK_STATS, stats)
    }

    pub fn intercept_config(&self) -> Result<InterceptConfig, StoreError> {
        Ok(self.get_json(KEY_INTERCEPT_CONFIG)?.unwrap_or_default())
    }

    pub fn set_intercept_config(&self, config: &InterceptConfig) -> Result<(), StoreError> {
        self.set_json(KEY_INTERCEPT_CONFIG, config)
    }

    // Flashcards

    pub fn flashcards(&self) -> Result<Vec<Flashcard>, StoreError> {
        Ok(self.get_json(KEY_FLASHCARDS)?.unwrap_or_default())
    }

    pub fn set_flashcards(&self, cards: &[Flashcard]) -> Result<(), StoreError> {
        self.set_json(KEY_FLASHCARDS, &cards)
    }

    // Study counters

    pub fn scoreboard(&self) -> Result<Scoreboard, StoreError> {
        Ok(Scoreboard {
            score: self.get_json(KEY_SCORE)?.unwrap_or(0),
            streak: self.get_json(KEY_STREAK)?.unwrap_or(0),
            best_streak: self.get_json(KEY_BEST_STREAK)?.unwrap_or(0),
            total_correct: self.get_json(KEY_TOTAL_CORRECT)?.unwrap_or(0),
            total_answered: self.get_json(KEY_TOTAL_ANSWERED)?.unwrap_or(0),
        })
    }

    pub fn set_scoreboard(&self, board: &Scoreboard) -> Result<(), StoreError> {
        self.set_json(KEY_SCORE, &board.score)?;
        self.set_json(KEY_STREAK, &board.streak)?;
        self.set_json(KEY_BEST_STREAK, &board.best_streak)?;
        self.set_json(KEY_TOTAL_CORRECT, &board.total_correct)?;
        self.set_json(KEY_TOTAL_ANSWERED, &board.total_answered)
    }

    pub fn score(&self) -> Result<i64, StoreError> {
        Ok(self.get_json(KEY_SCORE)?.unwrap_or(0))
    }

    /// Reset the score alone; streak history and totals stay.
    pub fn reset_score(&self) -> Result<(), StoreError> {
        self.set_json(KEY_SCORE, &0i64)
    }

    // Appearance

    pub fn dark_mode(&self) -> Result<bool, StoreError> {
        Ok(self.get_json(KEY_DARK_MODE)?.unwrap_or(false))
    }

    pub fn set_dark_mode(&self, dark: bool) -> Result<(), StoreError> {
        self.set_json(KEY_DARK_MODE, &dark)
    }

    // Demo counter

    pub fn count(&self) -> Result<u64, StoreError> {
        Ok(self.get_json(KEY_COUNT)?.unwrap_or(0))
    }

    pub fn increment_count(&self) -> Result<u64, StoreError> {
        let next = self.count()? + 1;
        self.set_json(KEY_COUNT, &next)?;
        Ok(next)
    }

    pub fn reset_count(&self) -> Result<(), StoreError> {
        self.set_json(KEY_COUNT, &0u64)
    }

    // Identity

    pub fn username(&self) -> Result<String, StoreError> {
        Ok(self
            .get_json(KEY_USERNAME)?
            .unwrap_or_else(|| "Anonymous".to_string()))
    }

    pub fn set_username(&self, username: &str) -> Result<(), StoreError> {
        self.set_json(KEY_USERNAME, &username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_keys_return_defaults() {
        let store = Store::open_memory().unwrap();
        assert!(store.blocked_sites().unwrap().is_empty());
        assert_eq!(store.block_stats().unwrap(), BlockStats::default());
        assert!(store.flashcards().unwrap().is_empty());
        assert_eq!(store.scoreboard().unwrap(), Scoreboard::default());
        assert!(!store.dark_mode().unwrap());
        assert!(store.intercept_config().unwrap().enabled);
        assert_eq!(store.count().unwrap(), 0);
        assert_eq!(store.username().unwrap(), "Anonymous");
    }

    #[test]
    fn scoreboard_roundtrip() {
        let store = Store::open_memory().unwrap();
        let mut board = Scoreboard::default();
        board.update(true);
        board.update(false);
        store.set_scoreboard(&board).unwrap();
        assert_eq!(store.scoreboard().unwrap(), board);
    }

    #[test]
    fn reset_score_leaves_streak_history() {
        let store = Store::open_memory().unwrap();
        let mut board = Scoreboard::default();
        for _ in 0..3 {
            board.update(true);
        }
        store.set_scoreboard(&board).unwrap();
        store.reset_score().unwrap();

        let after = store.scoreboard().unwrap();
        assert_eq!(after.score, 0);
        assert_eq!(after.best_streak, 3);
        assert_eq!(after.total_answered, 3);
    }

    #[test]
    fn ensure_defaults_does_not_clobber() {
        let store = Store::open_memory().unwrap();
        store
            .set_intercept_config(&InterceptConfig { enabled: false })
            .unwrap();
        store.ensure_defaults().unwrap();
        assert!(!store.intercept_config().unwrap().enabled);
    }

    #[test]
    fn counter_increments_and_resets() {
        let store = Store::open_memory().unwrap();
        assert_eq!(store.increment_count().unwrap(), 1);
        assert_eq!(store.increment_count().unwrap(), 2);
        store.reset_count().unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn whole_value_replacement() {
        let store = Store::open_memory().unwrap();
        let mut list = crate::block::BlockList::default();
        list.add("facebook.com").unwrap();
        list.add("reddit.com").unwrap();
        store.set_blocked_sites(list.sites()).unwrap();

        let mut shorter = crate::block::BlockList::new(store.blocked_sites().unwrap());
        let id = shorter.sites()[0].id;
        shorter.remove(id);
        store.set_blocked_sites(shorter.sites()).unwrap();

        assert_eq!(store.blocked_sites().unwrap().len(), 1);
    }

    #[test]
    fn on_disk_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("koala.db");
        {
            let store = Store::open_at(&path).unwrap();
            store.set_username("koala-fan").unwrap();
        }
        let store = Store::open_at(&path).unwrap();
        assert_eq!(store.username().unwrap(), "koala-fan");
    }
}
