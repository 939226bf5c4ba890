use crate::index::store::{SnapshotRecord, TokenIndex};
use crate::utils::app_data::get_snapshot_root;
use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Snapshot file extension
pub const SNAPSHOT_EXT: &str = ".json";

/// Timestamps are `YYYYMMDDHHMMSS` in UTC
const TIMESTAMP_LEN: usize = 14;

/// Valid snapshot filenames have exactly this length
const SNAPSHOT_NAME_LEN: usize = TIMESTAMP_LEN + SNAPSHOT_EXT.len();

/// Source of snapshot timestamps. Injected so tests can pin the clock.
pub trait Clock {
    /// Current time as a 14-digit `YYYYMMDDHHMMSS` string
    fn timestamp(&self) -> String;
}

/// Wall-clock UTC time
pub struct SystemClock;

impl Clock for SystemClock {
    fn timestamp(&self) -> String {
        Utc::now().format("%Y%m%d%H%M%S").to_string()
    }
}

/// Versioned, timestamped persistence for [`TokenIndex`].
///
/// Layout: `<root>/<version>/<timestamp>.json`, one immutable file per
/// snapshot. Timestamps are fixed-width and left-padded, so lexicographic
/// filename order equals chronological order and the newest snapshot is
/// simply the maximum valid filename. Existing snapshots are never
/// overwritten or deleted.
pub struct SnapshotStore {
    root: PathBuf,
    clock: Box<dyn Clock>,
}

impl SnapshotStore {
    /// Store rooted at the platform data directory
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(get_snapshot_root()?))
    }

    pub fn new(root: PathBuf) -> Self {
        Self::with_clock(root, Box::new(SystemClock))
    }

    pub fn with_clock(root: PathBuf, clock: Box<dyn Clock>) -> Self {
        Self { root, clock }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load the newest snapshot for `version`.
    ///
    /// A missing version directory or the absence of any valid snapshot
    /// filename is not an error: the result is an empty index with no
    /// timestamp. Filenames that do not match the fixed shape are ignored.
    pub fn load(&self, version: &str) -> Result<(TokenIndex, Option<String>)> {
        let dir = self.root.join(version);
        if !dir.exists() {
            return Ok((TokenIndex::new(), None));
        }

        let mut names: Vec<String> = fs::read_dir(&dir)
            .with_context(|| format!("Failed to list snapshots in {}", dir.display()))?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| is_snapshot_name(name))
            .collect();

        names.sort();
        let Some(latest) = names.pop() else {
            return Ok((TokenIndex::new(), None));
        };

        let path = dir.join(&latest);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        let records: Vec<SnapshotRecord> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse snapshot {}", path.display()))?;

        let timestamp = latest[..TIMESTAMP_LEN].to_string();
        Ok((TokenIndex::from_records(records), Some(timestamp)))
    }

    /// Persist a new snapshot of `index` under `version` and return its
    /// timestamp.
    ///
    /// The file is created with `create_new`, so a second save within the
    /// same wall-clock second fails loudly instead of overwriting the
    /// earlier snapshot. Storage failures propagate to the caller.
    pub fn save(&self, version: &str, index: &TokenIndex) -> Result<String> {
        let dir = self.root.join(version);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create snapshot dir {}", dir.display()))?;

        let timestamp = self.clock.timestamp();
        let path = dir.join(format!("{timestamp}{SNAPSHOT_EXT}"));
        let json = serde_json::to_string(&index.to_records())
            .context("Failed to serialize snapshot")?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .with_context(|| format!("Failed to create snapshot {}", path.display()))?;
        file.write_all(json.as_bytes())
            .with_context(|| format!("Failed to write snapshot {}", path.display()))?;

        Ok(timestamp)
    }

    /// Versions present under the storage root, with their valid snapshot
    /// counts, sorted by name
    pub fn versions(&self) -> Result<Vec<(String, usize)>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut versions = Vec::new();
        for entry in fs::read_dir(&self.root)
            .with_context(|| format!("Failed to list {}", self.root.display()))?
        {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            let count = fs::read_dir(entry.path())?
                .filter_map(|e| e.ok())
                .filter_map(|e| e.file_name().into_string().ok())
                .filter(|n| is_snapshot_name(n))
                .count();
            versions.push((name, count));
        }

        versions.sort();
        Ok(versions)
    }
}

/// Check the fixed filename shape: 14 digits + extension, exact total length
fn is_snapshot_name(name: &str) -> bool {
    name.len() == SNAPSHOT_NAME_LEN
        && name.ends_with(SNAPSHOT_EXT)
        && name[..TIMESTAMP_LEN].bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::tokenizer::Extraction;
    use std::cell::Cell;

    struct FixedClock(&'static str);

    impl Clock for FixedClock {
        fn timestamp(&self) -> String {
            self.0.to_string()
        }
    }

    struct StepClock(Cell<u64>);

    impl Clock for StepClock {
        fn timestamp(&self) -> String {
            let tick = self.0.get();
            self.0.set(tick + 1);
            format!("202401010000{tick:02}")
        }
    }

    fn sample_index() -> TokenIndex {
        let mut index = TokenIndex::new();
        index.ingest(
            Path::new("src/A.java"),
            &Extraction {
                type_names: vec!["Foo".into()],
                tokens: vec!["widget".into(), "total;".into()],
            },
        );
        index
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::with_clock(
            dir.path().to_path_buf(),
            Box::new(FixedClock("20240101000000")),
        );

        let saved = sample_index();
        let timestamp = store.save("v1", &saved).unwrap();
        assert_eq!(timestamp, "20240101000000");

        let (loaded, loaded_ts) = store.load("v1").unwrap();
        assert_eq!(loaded_ts.as_deref(), Some("20240101000000"));
        assert_eq!(loaded.len(), saved.len());
        for token in saved.keys() {
            assert_eq!(loaded.lookup(token), saved.lookup(token));
        }
    }

    #[test]
    fn test_missing_version_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().to_path_buf());

        let (index, timestamp) = store.load("nonexistent").unwrap();
        assert!(index.is_empty());
        assert!(timestamp.is_none());
    }

    #[test]
    fn test_newest_snapshot_selected() {
        let dir = tempfile::tempdir().unwrap();
        let version_dir = dir.path().join("v1");
        fs::create_dir_all(&version_dir).unwrap();

        let old = vec![SnapshotRecord {
            token: "OldToken".into(),
            files: vec![PathBuf::from("Old.java")],
        }];
        let new = vec![SnapshotRecord {
            token: "NewToken".into(),
            files: vec![PathBuf::from("New.java")],
        }];
        fs::write(
            version_dir.join("20230101000000.json"),
            serde_json::to_string(&old).unwrap(),
        )
        .unwrap();
        fs::write(
            version_dir.join("20240101000000.json"),
            serde_json::to_string(&new).unwrap(),
        )
        .unwrap();

        let store = SnapshotStore::new(dir.path().to_path_buf());
        let (index, timestamp) = store.load("v1").unwrap();

        assert_eq!(timestamp.as_deref(), Some("20240101000000"));
        assert_eq!(index.lookup("NewToken"), [PathBuf::from("New.java")]);
        assert!(index.lookup("OldToken").is_empty());
    }

    #[test]
    fn test_malformed_filenames_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let version_dir = dir.path().join("v1");
        fs::create_dir_all(&version_dir).unwrap();

        fs::write(version_dir.join("junk.json"), "[]").unwrap();
        fs::write(version_dir.join("2024.json"), "[]").unwrap();
        fs::write(version_dir.join("99999999999999.json.bak"), "[]").unwrap();
        // Right length, but not all digits
        fs::write(version_dir.join("2024010100000x.json"), "[]").unwrap();

        let store = SnapshotStore::new(dir.path().to_path_buf());
        let (index, timestamp) = store.load("v1").unwrap();
        assert!(index.is_empty());
        assert!(timestamp.is_none());
    }

    #[test]
    fn test_same_second_save_collides() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::with_clock(
            dir.path().to_path_buf(),
            Box::new(FixedClock("20240101000000")),
        );

        store.save("v1", &sample_index()).unwrap();
        assert!(store.save("v1", &sample_index()).is_err());
    }

    #[test]
    fn test_saves_accumulate() {
        let dir = tempfile::tempdir().unwrap();
        let store =
            SnapshotStore::with_clock(dir.path().to_path_buf(), Box::new(StepClock(Cell::new(0))));

        store.save("v1", &sample_index()).unwrap();
        store.save("v1", &sample_index()).unwrap();

        let count = fs::read_dir(dir.path().join("v1")).unwrap().count();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_versions_listing() {
        let dir = tempfile::tempdir().unwrap();
        let store =
            SnapshotStore::with_clock(dir.path().to_path_buf(), Box::new(StepClock(Cell::new(0))));

        store.save("v1", &sample_index()).unwrap();
        store.save("v1", &sample_index()).unwrap();
        store.save("v2", &sample_index()).unwrap();

        let versions = store.versions().unwrap();
        assert_eq!(versions, vec![("v1".to_string(), 2), ("v2".to_string(), 1)]);
    }

    #[test]
    fn test_snapshot_name_shape() {
        assert!(is_snapshot_name("20240101000000.json"));
        assert!(!is_snapshot_name("20240101000000.pkl"));
        assert!(!is_snapshot_name("202401010000001.json"));
        assert!(!is_snapshot_name("2024010100000.json"));
        assert!(!is_snapshot_name("2024010100000x.json"));
    }
}
