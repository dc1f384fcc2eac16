pub mod error;
pub mod song;

pub use error::{PlaylistError, Result};
pub use song::{Song, SongView, DEFAULT_DURATION};
