pub mod snapshot;

pub use snapshot::{SnapshotManager, StoredSong};
