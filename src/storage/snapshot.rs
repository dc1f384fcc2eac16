//! Snapshot persistence for the playlist.
//!
//! The whole collection is written after every mutation as a single JSON
//! document: `{ "songs": [...], "total": N }`. Field names are fixed for
//! compatibility with existing snapshot files. Writes go to a temp file that
//! is renamed over the target, so a crash mid-write never corrupts the
//! previous snapshot.

use crate::core::{PlaylistError, Result, SongView};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
struct SnapshotFile<'a> {
    songs: &'a [SongView],
    total: usize,
}

/// One replayable entry read back from a snapshot. Only name and artist
/// survive a restart; IDs are re-derived on load.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoredSong {
    pub name: String,
    #[serde(default)]
    pub artist: String,
}

#[derive(Debug, Deserialize)]
struct StoredSnapshot {
    #[serde(default)]
    songs: Vec<StoredSong>,
}

pub struct SnapshotManager {
    snapshot_path: PathBuf,
}

impl SnapshotManager {
    pub fn new<P: AsRef<Path>>(snapshot_path: P) -> Self {
        Self {
            snapshot_path: snapshot_path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.snapshot_path
    }

    pub fn exists(&self) -> bool {
        self.snapshot_path.exists()
    }

    /// Persists the full current enumeration. Atomic: temp file then rename.
    pub fn save(&self, songs: &[SongView], total: usize) -> Result<()> {
        if let Some(parent) = self.snapshot_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                PlaylistError::Snapshot(format!("Failed to create snapshot directory: {}", e))
            })?;
        }
        let temp_path = self.snapshot_path.with_extension("tmp");
        let temp_file = File::create(&temp_path)
            .map_err(|e| PlaylistError::Snapshot(format!("Failed to create temp file: {}", e)))?;
        let mut writer = BufWriter::new(temp_file);
        let document = SnapshotFile { songs, total };
        let serialized = serde_json::to_vec_pretty(&document)
            .map_err(|e| PlaylistError::Snapshot(format!("Failed to serialize snapshot: {}", e)))?;
        writer
            .write_all(&serialized)
            .map_err(|e| PlaylistError::Snapshot(format!("Failed to write snapshot: {}", e)))?;
        writer
            .flush()
            .map_err(|e| PlaylistError::Snapshot(format!("Failed to flush snapshot: {}", e)))?;
        writer
            .get_mut()
            .sync_all()
            .map_err(|e| PlaylistError::Snapshot(format!("Failed to sync snapshot: {}", e)))?;
        fs::rename(&temp_path, &self.snapshot_path)
            .map_err(|e| PlaylistError::Snapshot(format!("Failed to rename snapshot: {}", e)))?;
        Ok(())
    }

    /// Reads the stored entries in playback order. `None` means no snapshot
    /// file; a corrupt file is an error the caller downgrades to an empty
    /// collection.
    pub fn load(&self) -> Result<Option<Vec<StoredSong>>> {
        if !self.snapshot_path.exists() {
            return Ok(None);
        }
        let data = fs::read(&self.snapshot_path)
            .map_err(|e| PlaylistError::Snapshot(format!("Failed to read snapshot: {}", e)))?;
        let stored: StoredSnapshot = serde_json::from_slice(&data).map_err(|e| {
            PlaylistError::Snapshot(format!("Failed to deserialize snapshot: {}", e))
        })?;
        Ok(Some(stored.songs))
    }

    pub fn delete(&self) -> Result<()> {
        if self.snapshot_path.exists() {
            fs::remove_file(&self.snapshot_path).map_err(|e| {
                PlaylistError::Snapshot(format!("Failed to delete snapshot: {}", e))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playlist::Playlist;
    use tempfile::TempDir;

    #[test]
    fn test_load_without_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let manager = SnapshotManager::new(temp_dir.path().join("playlist.json"));
        assert!(manager.load().unwrap().is_none());
        assert!(!manager.exists());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let manager = SnapshotManager::new(temp_dir.path().join("playlist.json"));

        let mut playlist = Playlist::new();
        playlist.push_back("A", "X");
        playlist.push_back("B", "");
        manager.save(&playlist.songs(), playlist.len()).unwrap();

        let stored = manager.load().unwrap().unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].name, "A");
        assert_eq!(stored[0].artist, "X");
        assert_eq!(stored[1].name, "B");
        assert_eq!(stored[1].artist, "");
    }

    #[test]
    fn test_snapshot_keeps_field_names() {
        let temp_dir = TempDir::new().unwrap();
        let manager = SnapshotManager::new(temp_dir.path().join("playlist.json"));

        let mut playlist = Playlist::new();
        playlist.push_back("A", "X");
        manager.save(&playlist.songs(), playlist.len()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(manager.path()).unwrap()).unwrap();
        assert_eq!(raw["total"], 1);
        assert_eq!(raw["songs"][0]["name"], "A");
        assert_eq!(raw["songs"][0]["artist"], "X");
        assert_eq!(raw["songs"][0]["duration"], "0:00");
    }

    #[test]
    fn test_corrupt_snapshot_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("playlist.json");
        std::fs::write(&path, b"not json at all").unwrap();
        let manager = SnapshotManager::new(&path);
        assert!(manager.load().is_err());
    }

    #[test]
    fn test_save_replaces_previous_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let manager = SnapshotManager::new(temp_dir.path().join("playlist.json"));

        let mut playlist = Playlist::new();
        playlist.push_back("A", "");
        manager.save(&playlist.songs(), playlist.len()).unwrap();
        playlist.push_back("B", "");
        manager.save(&playlist.songs(), playlist.len()).unwrap();

        let stored = manager.load().unwrap().unwrap();
        assert_eq!(stored.len(), 2);
    }
}
