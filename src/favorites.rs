//! Favorites persistence - one fixed key-value slot on disk

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Persistence boundary for the favorite set. Injected into the effect
/// handler at construction so tests can substitute a double.
pub trait FavoritesStore: Send + Sync {
    /// Load the persisted set; an absent store yields the empty set.
    fn load(&self) -> Result<HashSet<u32>, String>;

    /// Write the full set, replacing whatever was stored before.
    fn save(&self, ids: &HashSet<u32>) -> Result<(), String>;
}

/// File-backed store: a JSON array of ids at one fixed path.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Per-user data dir, falling back to the working directory.
    pub fn default_path() -> PathBuf {
        dirs_next::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pokegrid")
            .join("favorites.json")
    }
}

impl FavoritesStore for FileStore {
    fn load(&self) -> Result<HashSet<u32>, String> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(HashSet::new()),
            Err(err) => return Err(format!("Failed to read favorites: {}", err)),
        };
        let ids: Vec<u32> = serde_json::from_str(&json)
            .map_err(|err| format!("Favorites file corrupted: {}", err))?;
        Ok(ids.into_iter().collect())
    }

    fn save(&self, ids: &HashSet<u32>) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| format!("Failed to create favorites directory: {}", err))?;
        }
        let mut sorted: Vec<u32> = ids.iter().copied().collect();
        sorted.sort_unstable();
        let json = serde_json::to_string_pretty(&sorted)
            .map_err(|err| format!("Failed to serialize favorites: {}", err))?;
        fs::write(&self.path, json).map_err(|err| format!("Failed to write favorites: {}", err))
    }
}
