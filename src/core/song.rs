use serde::{Deserialize, Serialize};

/// Default duration stamped on every new song; the current API never sets it.
pub const DEFAULT_DURATION: &str = "0:00";

/// One playlist entry. IDs are assigned by the playlist, strictly increasing,
/// and never reused after a removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: u64,
    pub name: String,
    pub artist: String,
    pub duration: String,
}

impl Song {
    pub fn new(id: u64, name: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            artist: artist.into(),
            duration: DEFAULT_DURATION.to_string(),
        }
    }
}

/// Render-ready projection of a song with its neighbor flags.
///
/// `has_next` is false only for the last element, `has_prev` only for the
/// first. Field names are part of the wire and snapshot formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongView {
    pub id: u64,
    pub name: String,
    pub artist: String,
    pub duration: String,
    pub has_next: bool,
    pub has_prev: bool,
}

impl SongView {
    pub fn new(song: &Song, has_prev: bool, has_next: bool) -> Self {
        Self {
            id: song.id,
            name: song.name.clone(),
            artist: song.artist.clone(),
            duration: song.duration.clone(),
            has_next,
            has_prev,
        }
    }
}
