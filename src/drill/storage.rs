//! Persistent performance store
//!
//! One JSON document maps each glyph to its [`PerformanceEntry`]:
//! ```json
//! {
//!   "人": { "correct": 1, "incorrect": 0, "last_repeated": "2026-03-14 09:00:00" }
//! }
//! ```
//! Every update rewrites the whole document (write to `.tmp`, then rename)
//! before returning, so a completed trial survives an interrupted session.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use thiserror::Error;

use super::models::{now_local, PerformanceEntry};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Performance data at {path:?} is unreadable: {source}. Fix or move the file aside to start fresh")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Default file name, shared with earlier versions of the drill
pub const DEFAULT_STORE_FILE: &str = "performance_data.json";

pub type PerformanceMap = BTreeMap<String, PerformanceEntry>;

/// Storage manager for per-glyph performance
#[derive(Debug)]
pub struct PerformanceStore {
    path: PathBuf,
    entries: PerformanceMap,
}

impl PerformanceStore {
    /// Open the store at `path`. A missing file gives an empty store; a
    /// malformed one is an error and is left untouched.
    pub fn open(path: PathBuf) -> Result<Self> {
        let entries = Self::load(&path)?;
        log::debug!("Opened performance store {:?} with {} glyphs", path, entries.len());
        Ok(Self { path, entries })
    }

    /// Read a persisted map without opening a store
    pub fn load(path: &Path) -> Result<PerformanceMap> {
        let content = match fs::read(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(PerformanceMap::new()),
            Err(e) => return Err(e.into()),
        };

        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(PerformanceMap::new());
        }

        serde_json::from_slice(&content).map_err(|source| StorageError::Corrupt {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record one trial for `glyph` at the current local time
    pub fn record(&mut self, glyph: &str, success: bool) -> Result<PerformanceEntry> {
        self.record_at(glyph, success, now_local())
    }

    /// Record one trial with an explicit timestamp, then persist
    pub fn record_at(
        &mut self,
        glyph: &str,
        success: bool,
        at: NaiveDateTime,
    ) -> Result<PerformanceEntry> {
        let entry = self
            .entries
            .entry(glyph.to_string())
            .or_insert_with(|| PerformanceEntry::new(at));
        entry.observe(success, at);
        let updated = entry.clone();

        self.save()?;
        log::debug!(
            "Recorded {} for '{}' ({} correct, {} incorrect)",
            if success { "success" } else { "failure" },
            glyph,
            updated.correct,
            updated.incorrect
        );
        Ok(updated)
    }

    pub fn get(&self, glyph: &str) -> Option<&PerformanceEntry> {
        self.entries.get(glyph)
    }

    /// All entries ordered by glyph
    pub fn entries(&self) -> impl Iterator<Item = (&str, &PerformanceEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialized form of the whole store
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    /// Persist the whole map using atomic write (write and sync .tmp, then rename)
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        let mut file = File::create(&tmp_path)?;
        file.write_all(self.to_json()?.as_bytes())?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_store() -> (PerformanceStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = PerformanceStore::open(temp_dir.path().join(DEFAULT_STORE_FILE)).unwrap();
        (store, temp_dir)
    }

    fn at(minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(20, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_missing_file_is_empty() {
        let (store, _temp) = create_test_store();
        assert!(store.is_empty());
        assert!(store.get("人").is_none());
    }

    #[test]
    fn test_record_success_then_failure() {
        let (mut store, _temp) = create_test_store();

        store.record_at("人", true, at(1)).unwrap();
        store.record_at("人", false, at(2)).unwrap();

        let entry = store.get("人").unwrap();
        assert_eq!(entry.correct, 1);
        assert_eq!(entry.incorrect, 1);
        assert_eq!(entry.last_repeated, at(2));
    }

    #[test]
    fn test_record_persists_immediately() {
        let (mut store, temp) = create_test_store();
        store.record_at("好", true, at(5)).unwrap();

        let reopened = PerformanceStore::open(temp.path().join(DEFAULT_STORE_FILE)).unwrap();
        assert_eq!(reopened.get("好"), store.get("好"));
        assert!(!temp.path().join("performance_data.json.tmp").exists());
    }

    #[test]
    fn test_variants_tracked_separately() {
        let (mut store, _temp) = create_test_store();
        store.record_at("门", true, at(1)).unwrap();
        store.record_at("門", false, at(2)).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("门").unwrap().correct, 1);
        assert_eq!(store.get("門").unwrap().incorrect, 1);
    }

    #[test]
    fn test_save_load_roundtrip_is_stable() {
        let (mut store, temp) = create_test_store();
        store.record_at("人", true, at(1)).unwrap();
        store.record_at("大", false, at(2)).unwrap();
        store.record_at("小", true, at(3)).unwrap();

        let path = temp.path().join(DEFAULT_STORE_FILE);
        let first = fs::read_to_string(&path).unwrap();

        let reopened = PerformanceStore::open(path.clone()).unwrap();
        reopened.save().unwrap();
        let second = fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_reads_legacy_layout() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("progress.json");
        fs::write(
            &path,
            r#"{"人": {"correct": 2, "incorrect": 1, "last_repeated": "2024-01-05 08:30:00"}}"#,
        )
        .unwrap();

        let store = PerformanceStore::open(path).unwrap();
        let entry = store.get("人").unwrap();
        assert_eq!(entry.correct, 2);
        assert_eq!(entry.last_repeated.to_string(), "2024-01-05 08:30:00");
    }

    #[test]
    fn test_corrupt_file_is_rejected_and_kept() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_STORE_FILE);
        fs::write(&path, "{ not json").unwrap();

        let err = PerformanceStore::open(path.clone()).unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_non_utf8_file_is_corrupt() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_STORE_FILE);
        fs::write(&path, [0xff, 0xfe, 0x7b]).unwrap();

        let err = PerformanceStore::open(path.clone()).unwrap_err();
        match &err {
            StorageError::Corrupt { path: reported, .. } => assert_eq!(reported, &path),
            other => panic!("expected Corrupt, got {:?}", other),
        }
        assert!(err.to_string().contains(DEFAULT_STORE_FILE));
        assert_eq!(fs::read(&path).unwrap(), vec![0xff, 0xfe, 0x7b]);
    }

    #[test]
    fn test_save_replaces_stale_tmp_file() {
        let (mut store, temp) = create_test_store();
        let tmp_path = temp.path().join("performance_data.json.tmp");
        fs::write(&tmp_path, "leftover from an interrupted write").unwrap();

        store.record_at("人", true, at(1)).unwrap();

        assert!(!tmp_path.exists());
        let saved = fs::read_to_string(temp.path().join(DEFAULT_STORE_FILE)).unwrap();
        assert_eq!(saved, store.to_json().unwrap());
    }

    #[test]
    fn test_creates_parent_directory() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("data").join(DEFAULT_STORE_FILE);
        let mut store = PerformanceStore::open(path.clone()).unwrap();

        store.record_at("人", true, at(1)).unwrap();
        assert!(path.exists());
    }
}
