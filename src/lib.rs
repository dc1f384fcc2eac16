// ============================================================================
// Playlistd Library
// ============================================================================

pub mod config;
pub mod core;
pub mod playlist;
pub mod storage;
pub mod web;

// Re-export main types for convenience
pub use config::ServerConfig;
pub use core::{PlaylistError, Result, Song, SongView};
pub use playlist::{Playlist, PlaylistInfo};
pub use storage::SnapshotManager;
pub use web::{AppState, SharedPlaylist, build_router};

use tracing::{info, warn};

/// Rebuilds the playlist from the snapshot on disk.
///
/// Stored entries are replayed as sequential end-inserts, so order and
/// content survive a restart while IDs restart at 1. A missing snapshot
/// yields an empty playlist; an unreadable one is logged and degraded to
/// empty rather than failing startup.
///
/// # Examples
///
/// ```
/// use playlistd::{restore_playlist, SnapshotManager};
///
/// let dir = tempfile::tempdir().unwrap();
/// let snapshots = SnapshotManager::new(dir.path().join("playlist.json"));
///
/// let mut playlist = restore_playlist(&snapshots);
/// assert!(playlist.is_empty());
///
/// playlist.push_back("Blue in Green", "Miles Davis");
/// snapshots.save(&playlist.songs(), playlist.len()).unwrap();
///
/// let restored = restore_playlist(&snapshots);
/// assert_eq!(restored.len(), 1);
/// ```
pub fn restore_playlist(snapshots: &SnapshotManager) -> Playlist {
    let mut playlist = Playlist::new();
    match snapshots.load() {
        Ok(Some(stored)) => {
            for song in &stored {
                playlist.push_back(&song.name, &song.artist);
            }
            info!(count = playlist.len(), "restored playlist from snapshot");
        }
        Ok(None) => {
            info!("no snapshot found, starting with an empty playlist");
        }
        Err(err) => {
            warn!(error = %err, "snapshot unreadable, starting with an empty playlist");
        }
    }
    playlist
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_restore_replays_order_with_fresh_ids() {
        let temp_dir = TempDir::new().unwrap();
        let snapshots = SnapshotManager::new(temp_dir.path().join("playlist.json"));

        let mut playlist = Playlist::new();
        playlist.push_back("A", "X");
        playlist.push_back("B", "Y");
        playlist.remove_by_id(1);
        playlist.push_back("C", "Z");
        snapshots.save(&playlist.songs(), playlist.len()).unwrap();

        let restored = restore_playlist(&snapshots);
        let names: Vec<_> = restored.iter().map(|s| s.name.clone()).collect();
        assert_eq!(names, vec!["B", "C"]);
        // IDs are re-derived starting at 1, not preserved
        let ids: Vec<_> = restored.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_restore_degrades_corrupt_snapshot_to_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("playlist.json");
        std::fs::write(&path, b"{ truncated").unwrap();

        let restored = restore_playlist(&SnapshotManager::new(&path));
        assert!(restored.is_empty());
    }
}
