//! Wishlist persistence and membership operations.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use playdex_catalog::{GameId, GameSummary};

/// Errors from wishlist persistence.
#[derive(Debug, thiserror::Error)]
pub enum WishlistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config directory not available")]
    NoConfigDir,
}

/// On-disk snapshot shape. No versioning or migration; if the game record
/// shape changes, old snapshots fail to load.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    items: Vec<GameSummary>,
}

/// The wishlist: an ordered list of game records, deduplicated by id.
#[derive(Debug)]
pub struct WishlistStore {
    path: PathBuf,
    items: Vec<GameSummary>,
}

impl WishlistStore {
    /// Creates an empty store backed by `path`. Nothing is read until
    /// [`load`](Self::load).
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            items: Vec::new(),
        }
    }

    /// Restores the wishlist from its snapshot file. A missing file is an
    /// empty wishlist, not an error.
    pub fn load(&mut self) -> Result<(), WishlistError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no wishlist snapshot, starting empty");
            self.items.clear();
            return Ok(());
        }
        let data = std::fs::read(&self.path)?;
        let snapshot: Snapshot = serde_json::from_slice(&data)?;
        self.items = snapshot.items;
        Ok(())
    }

    /// Writes the current wishlist as a snapshot, creating parent
    /// directories as needed.
    pub fn save(&self) -> Result<(), WishlistError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let snapshot = Snapshot {
            items: self.items.clone(),
        };
        let data = serde_json::to_vec_pretty(&snapshot)?;
        std::fs::write(&self.path, data)?;
        debug!(path = %self.path.display(), count = self.items.len(), "wishlist saved");
        Ok(())
    }

    /// Appends a game unless one with the same id is already present.
    /// Returns whether the game was added.
    pub fn add(&mut self, game: GameSummary) -> bool {
        if self.contains(game.id) {
            return false;
        }
        self.items.push(game);
        true
    }

    /// Removes the game with `id`, returning whether it was present.
    pub fn remove(&mut self, id: GameId) -> bool {
        let before = self.items.len();
        self.items.retain(|g| g.id != id);
        self.items.len() != before
    }

    /// Whether the game with `id` is wishlisted.
    pub fn contains(&self, id: GameId) -> bool {
        self.items.iter().any(|g| g.id == id)
    }

    /// The wishlisted games in insertion order.
    pub fn items(&self) -> &[GameSummary] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The snapshot file backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Default snapshot location: `<config dir>/playdex/wishlist.json`.
pub fn default_path() -> Result<PathBuf, WishlistError> {
    let base = config_dir().ok_or(WishlistError::NoConfigDir)?;
    Ok(base.join("playdex").join("wishlist.json"))
}

/// Returns the platform-specific config directory.
fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var("HOME")
                    .ok()
                    .map(|h| PathBuf::from(h).join(".config"))
            })
    }

    #[cfg(target_os = "windows")]
    {
        std::env::var("APPDATA").ok().map(PathBuf::from)
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    {
        std::env::var("HOME")
            .ok()
            .map(|h| PathBuf::from(h).join(".config"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(id: GameId, name: &str) -> GameSummary {
        serde_json::from_value(serde_json::json!({ "id": id, "name": name })).unwrap()
    }

    fn store_in_tempdir() -> (tempfile::TempDir, WishlistStore) {
        let tmp = tempfile::tempdir().unwrap();
        let store = WishlistStore::open(tmp.path().join("wishlist.json"));
        (tmp, store)
    }

    #[test]
    fn add_deduplicates_by_id() {
        let (_tmp, mut store) = store_in_tempdir();
        assert!(store.add(game(1, "Hades")));
        assert!(!store.add(game(1, "Hades again")));
        assert_eq!(store.len(), 1);
        assert_eq!(store.items()[0].name, "Hades");
    }

    #[test]
    fn remove_reports_membership() {
        let (_tmp, mut store) = store_in_tempdir();
        store.add(game(1, "A"));
        assert!(store.remove(1));
        assert!(!store.remove(1));
        assert!(store.is_empty());
    }

    #[test]
    fn contains_tracks_ids() {
        let (_tmp, mut store) = store_in_tempdir();
        store.add(game(7, "G"));
        assert!(store.contains(7));
        assert!(!store.contains(8));
    }

    #[test]
    fn insertion_order_is_preserved() {
        let (_tmp, mut store) = store_in_tempdir();
        store.add(game(3, "C"));
        store.add(game(1, "A"));
        store.add(game(2, "B"));
        let names: Vec<_> = store.items().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn snapshot_survives_save_and_load() {
        let (_tmp, mut store) = store_in_tempdir();
        store.add(game(1, "Hades"));
        store.add(game(2, "Celeste"));
        store.save().unwrap();

        let mut restored = WishlistStore::open(store.path());
        restored.load().unwrap();
        assert_eq!(restored.items(), store.items());
    }

    #[test]
    fn load_of_missing_file_is_empty() {
        let (_tmp, mut store) = store_in_tempdir();
        store.load().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn load_replaces_in_memory_state() {
        let (_tmp, mut store) = store_in_tempdir();
        store.add(game(1, "Saved"));
        store.save().unwrap();

        store.add(game(2, "Unsaved"));
        store.load().unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.contains(1));
    }

    #[test]
    fn save_creates_parent_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = WishlistStore::open(tmp.path().join("nested").join("wishlist.json"));
        store.add(game(1, "A"));
        store.save().unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn malformed_snapshot_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("wishlist.json");
        std::fs::write(&path, b"not json").unwrap();

        let mut store = WishlistStore::open(&path);
        assert!(matches!(store.load(), Err(WishlistError::Json(_))));
    }
}
