use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlaylistError {
    #[error("Invalid position {position} for playlist of size {size}")]
    InvalidPosition { position: i64, size: usize },

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("Lock error: {0}")]
    Lock(String),
}

pub type Result<T> = std::result::Result<T, PlaylistError>;

impl<T> From<std::sync::PoisonError<T>> for PlaylistError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::Lock(err.to_string())
    }
}
