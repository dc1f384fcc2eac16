//! HTTP adapter over the playlist.
//!
//! Handlers translate JSON requests into collection calls and serialize the
//! results back; all playlist access goes through one mutex so requests are
//! handled one at a time (the collection has no internal locking). Every
//! successful mutation is followed by a synchronous snapshot save.

use crate::core::{PlaylistError, SongView};
use crate::playlist::{Playlist, PlaylistInfo};
use crate::storage::SnapshotManager;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::error;

pub type SharedPlaylist = Arc<Mutex<Playlist>>;

#[derive(Clone)]
pub struct AppState {
    playlist: SharedPlaylist,
    snapshots: Arc<SnapshotManager>,
}

impl AppState {
    pub fn new(playlist: SharedPlaylist, snapshots: Arc<SnapshotManager>) -> Self {
        Self {
            playlist,
            snapshots,
        }
    }
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({
                "success": false,
                "message": self.message
            })),
        )
            .into_response()
    }
}

impl From<PlaylistError> for ApiError {
    fn from(err: PlaylistError) -> Self {
        match err {
            PlaylistError::InvalidPosition { .. } => ApiError::bad_request(err.to_string()),
            other => ApiError::internal(other.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddSongRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub position: Option<i64>,
}

#[derive(Debug, Serialize)]
struct SongListResponse {
    success: bool,
    data: Vec<SongView>,
    count: usize,
}

#[derive(Debug, Serialize)]
struct SongCreatedResponse {
    success: bool,
    message: &'static str,
    data: SongView,
    playlist: Vec<SongView>,
}

#[derive(Debug, Serialize)]
struct SongResponse {
    success: bool,
    data: SongView,
}

#[derive(Debug, Serialize)]
struct SongDeletedResponse {
    success: bool,
    message: &'static str,
    playlist: Vec<SongView>,
}

#[derive(Debug, Serialize)]
struct InfoResponse {
    success: bool,
    data: PlaylistInfo,
}

#[derive(Debug, Serialize)]
struct HomeResponse {
    success: bool,
    message: &'static str,
    version: &'static str,
    endpoints: &'static [&'static str],
    count: usize,
}

const ENDPOINTS: &[&str] = &[
    "GET /api/songs - list all songs",
    "POST /api/songs - add a song",
    "GET /api/songs/:id - get one song",
    "DELETE /api/songs/:id - remove a song",
    "GET /api/info - playlist summary",
];

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/api/songs", get(list_songs).post(add_song))
        .route("/api/songs/:id", get(get_song).delete(delete_song))
        .route("/api/info", get(playlist_info))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Saves the current enumeration. A failed save is logged and the in-memory
/// mutation stands; the snapshot catches up on the next successful write.
fn persist(snapshots: &SnapshotManager, playlist: &Playlist) {
    if let Err(err) = snapshots.save(&playlist.songs(), playlist.len()) {
        error!(error = %err, "snapshot save failed after mutation");
    }
}

async fn home(State(state): State<AppState>) -> Json<HomeResponse> {
    let playlist = state.playlist.lock().await;
    Json(HomeResponse {
        success: true,
        message: "Playlist service API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: ENDPOINTS,
        count: playlist.len(),
    })
}

async fn list_songs(State(state): State<AppState>) -> Json<SongListResponse> {
    let playlist = state.playlist.lock().await;
    Json(SongListResponse {
        success: true,
        data: playlist.songs(),
        count: playlist.len(),
    })
}

async fn add_song(
    State(state): State<AppState>,
    Json(payload): Json<AddSongRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // Blank names are rejected, but accepted names are stored verbatim.
    let name = match payload.name {
        Some(name) if !name.trim().is_empty() => name,
        _ => return Err(ApiError::bad_request("Song name is required")),
    };
    let artist = payload.artist.unwrap_or_default();

    let mut playlist = state.playlist.lock().await;
    let song = match payload.mode.as_deref() {
        Some("start") => playlist.push_front(&name, &artist),
        Some("position") => playlist.insert_at(&name, &artist, payload.position.unwrap_or(0))?,
        // "end" and anything unrecognized append, matching prior behavior
        _ => playlist.push_back(&name, &artist),
    };
    persist(&state.snapshots, &playlist);

    let views = playlist.songs();
    let view = views
        .iter()
        .find(|view| view.id == song.id)
        .cloned()
        .ok_or_else(|| ApiError::internal("inserted song missing from enumeration"))?;

    Ok((
        StatusCode::CREATED,
        Json(SongCreatedResponse {
            success: true,
            message: "Song added successfully",
            data: view,
            playlist: views,
        }),
    ))
}

async fn get_song(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<SongResponse>, ApiError> {
    let playlist = state.playlist.lock().await;
    let views = playlist.songs();
    views
        .into_iter()
        .find(|view| view.id == id)
        .map(|view| {
            Json(SongResponse {
                success: true,
                data: view,
            })
        })
        .ok_or_else(|| ApiError::not_found("Song not found"))
}

async fn delete_song(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<SongDeletedResponse>, ApiError> {
    let mut playlist = state.playlist.lock().await;
    if !playlist.remove_by_id(id) {
        return Err(ApiError::not_found("Song not found"));
    }
    persist(&state.snapshots, &playlist);
    Ok(Json(SongDeletedResponse {
        success: true,
        message: "Song removed successfully",
        playlist: playlist.songs(),
    }))
}

async fn playlist_info(State(state): State<AppState>) -> Json<InfoResponse> {
    let playlist = state.playlist.lock().await;
    Json(InfoResponse {
        success: true,
        data: playlist.info(),
    })
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use crate::core::PlaylistError;
    use axum::http::StatusCode;

    #[test]
    fn invalid_position_maps_to_bad_request() {
        let err = ApiError::from(PlaylistError::InvalidPosition {
            position: 7,
            size: 2,
        });
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message.contains("Invalid position"));
    }

    #[test]
    fn snapshot_failure_maps_to_internal() {
        let err = ApiError::from(PlaylistError::Snapshot("disk full".to_string()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
