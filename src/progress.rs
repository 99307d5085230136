//! Player progression persistence
//!
//! Stores the highest level reached and per-level best scores as
//! pretty-printed JSON under the user's home directory. Loading tolerates a
//! missing file (fresh profile) and refuses files written by a newer
//! version. Before each write the previous file is kept as a timestamped
//! backup so a crash mid-write cannot eat the profile.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub const CURRENT_PROGRESS_VERSION: u32 = 1;
const PROGRESS_FILE: &str = "progress.json";
const BACKUPS_TO_KEEP: usize = 3;

/// The on-disk profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub version: u32,
    pub timestamp: SystemTime,
    /// Highest level the player may start (1-based)
    pub unlocked_level: u32,
    /// Best total score per completed level
    pub best_scores: HashMap<u32, u32>,
}

impl Profile {
    pub fn new() -> Self {
        Profile {
            version: CURRENT_PROGRESS_VERSION,
            timestamp: SystemTime::now(),
            unlocked_level: 1,
            best_scores: HashMap::new(),
        }
    }

    /// Records a completed level: unlocks the next one and keeps the better
    /// score. Returns true when anything changed (and a save is warranted).
    pub fn record_completion(&mut self, level: u32, total_score: u32, max_levels: u32) -> bool {
        let mut changed = false;

        let next = (level + 1).min(max_levels);
        if next > self.unlocked_level {
            self.unlocked_level = next;
            changed = true;
        }

        let best = self.best_scores.entry(level).or_insert(0);
        if total_score > *best {
            *best = total_score;
            changed = true;
        }

        changed
    }

    pub fn best_score(&self, level: u32) -> Option<u32> {
        self.best_scores.get(&level).copied()
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub enum ProgressError {
    IoError(std::io::Error),
    SerializationError(serde_json::Error),
    UnsupportedVersion(u32),
}

impl std::fmt::Display for ProgressError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgressError::IoError(e) => write!(f, "IO error: {}", e),
            ProgressError::SerializationError(e) => write!(f, "Serialization error: {}", e),
            ProgressError::UnsupportedVersion(v) => write!(f, "Unsupported progress version: {}", v),
        }
    }
}

impl std::error::Error for ProgressError {}

impl From<std::io::Error> for ProgressError {
    fn from(err: std::io::Error) -> Self {
        ProgressError::IoError(err)
    }
}

impl From<serde_json::Error> for ProgressError {
    fn from(err: serde_json::Error) -> Self {
        ProgressError::SerializationError(err)
    }
}

/// Reads and writes profiles in a fixed directory.
pub struct ProgressStore {
    directory: PathBuf,
}

impl ProgressStore {
    /// Creates a store rooted at `directory`, creating it if needed.
    pub fn new(directory: impl AsRef<Path>) -> Result<Self, ProgressError> {
        let directory = directory.as_ref().to_path_buf();
        if !directory.exists() {
            fs::create_dir_all(&directory)?;
        }
        Ok(ProgressStore { directory })
    }

    /// The default location: `~/.skyreach`, falling back to `./saves` when
    /// no home directory can be resolved.
    pub fn default_directory() -> PathBuf {
        dirs::home_dir()
            .map(|home| home.join(".skyreach"))
            .unwrap_or_else(|| PathBuf::from("./saves"))
    }

    fn profile_path(&self) -> PathBuf {
        self.directory.join(PROGRESS_FILE)
    }

    /// Loads the profile, or a fresh one when none exists yet.
    pub fn load(&self) -> Result<Profile, ProgressError> {
        let path = self.profile_path();
        if !path.exists() {
            return Ok(Profile::new());
        }

        let json = fs::read_to_string(&path)?;
        let profile: Profile = serde_json::from_str(&json)?;

        if profile.version > CURRENT_PROGRESS_VERSION {
            return Err(ProgressError::UnsupportedVersion(profile.version));
        }

        Ok(profile)
    }

    /// Writes the profile, rotating the previous file into a backup first.
    pub fn save(&self, profile: &Profile) -> Result<(), ProgressError> {
        let path = self.profile_path();

        if path.exists() {
            let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
            let backup = self.directory.join(format!("progress_{}.json.bak", stamp));
            fs::copy(&path, backup)?;
            self.prune_backups()?;
        }

        let mut stamped = profile.clone();
        stamped.timestamp = SystemTime::now();

        let json = serde_json::to_string_pretty(&stamped)?;
        fs::write(&path, json)?;

        Ok(())
    }

    /// Deletes all but the newest `BACKUPS_TO_KEEP` backup files.
    fn prune_backups(&self) -> Result<(), ProgressError> {
        let mut backups: Vec<_> = fs::read_dir(&self.directory)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .map(|name| name.starts_with("progress_") && name.ends_with(".bak"))
                    .unwrap_or(false)
            })
            .collect();

        backups.sort_by_key(|entry| {
            entry
                .metadata()
                .and_then(|m| m.modified())
                .ok()
                .map(std::cmp::Reverse)
        });

        for entry in backups.iter().skip(BACKUPS_TO_KEEP) {
            fs::remove_file(entry.path())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_fresh_profile_when_no_file() {
        let dir = tempdir().unwrap();
        let store = ProgressStore::new(dir.path()).unwrap();

        let profile = store.load().unwrap();
        assert_eq!(profile.unlocked_level, 1);
        assert!(profile.best_scores.is_empty());
    }

    #[test]
    fn test_round_trip_through_disk() {
        let dir = tempdir().unwrap();
        let store = ProgressStore::new(dir.path()).unwrap();

        let mut profile = Profile::new();
        profile.record_completion(1, 850, 100);
        profile.record_completion(2, 1200, 100);
        store.save(&profile).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.unlocked_level, 3);
        assert_eq!(loaded.best_score(1), Some(850));
        assert_eq!(loaded.best_score(2), Some(1200));
        assert_eq!(loaded.best_score(3), None);
    }

    #[test]
    fn test_newer_version_is_rejected() {
        let dir = tempdir().unwrap();
        let store = ProgressStore::new(dir.path()).unwrap();

        let mut profile = Profile::new();
        profile.version = CURRENT_PROGRESS_VERSION + 1;
        let json = serde_json::to_string(&profile).unwrap();
        fs::write(dir.path().join(PROGRESS_FILE), json).unwrap();

        match store.load() {
            Err(ProgressError::UnsupportedVersion(v)) => {
                assert_eq!(v, CURRENT_PROGRESS_VERSION + 1)
            }
            other => panic!("expected version error, got {:?}", other.map(|p| p.version)),
        }
    }

    #[test]
    fn test_record_completion_keeps_best_score() {
        let mut profile = Profile::new();

        assert!(profile.record_completion(5, 900, 100));
        assert_eq!(profile.unlocked_level, 6);

        // A worse run changes nothing
        assert!(!profile.record_completion(5, 400, 100));
        assert_eq!(profile.best_score(5), Some(900));

        // A better one only bumps the score; level 6 is already unlocked
        assert!(profile.record_completion(5, 1000, 100));
        assert_eq!(profile.unlocked_level, 6);
        assert_eq!(profile.best_score(5), Some(1000));
    }

    #[test]
    fn test_unlock_caps_at_max_level() {
        let mut profile = Profile::new();
        profile.unlocked_level = 100;

        profile.record_completion(100, 5000, 100);
        assert_eq!(profile.unlocked_level, 100);
    }

    #[test]
    fn test_save_rotates_backup() {
        let dir = tempdir().unwrap();
        let store = ProgressStore::new(dir.path()).unwrap();

        store.save(&Profile::new()).unwrap();
        store.save(&Profile::new()).unwrap();

        let backups = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_str().unwrap_or("").ends_with(".bak"))
            .count();
        assert_eq!(backups, 1);
    }
}
