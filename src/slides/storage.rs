//! Storage operations for slide collections
//!
//! The whole library lives in one JSON file:
//! ```text
//! {data_dir}/recall/
//! └── collections.json   # { "version": 1, "collections": [ ... ] }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::library::Library;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, StorageError>;

const DATA_FILE_NAME: &str = "collections.json";

/// Reads and writes a `Library` at a fixed path
pub struct LibraryStorage {
    path: PathBuf,
}

impl LibraryStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default data file location (e.g., ~/.local/share/recall/collections.json)
    pub fn default_path() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("recall").join(DATA_FILE_NAME))
            .ok_or(StorageError::DataDirNotFound)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the library, or an empty one if nothing has been saved yet
    pub fn load(&self) -> Result<Library> {
        if !self.path.exists() {
            log::info!("No data file at {:?}, starting with an empty library", self.path);
            return Ok(Library::new());
        }

        let content = fs::read_to_string(&self.path)?;
        let library: Library = serde_json::from_str(&content)?;
        log::info!(
            "Loaded {} collections ({} slides) from {:?}",
            library.len(),
            library.slide_count(),
            self.path
        );
        Ok(library)
    }

    /// Write the library, replacing the previous file in one rename
    pub fn save(&self, library: &Library) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, serde_json::to_string_pretty(library)?)?;
        fs::rename(&tmp_path, &self.path)?;

        log::info!("Saved {} collections to {:?}", library.len(), self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};
    use crate::slides::models::{Collection, Slide};
    use crate::slides::scheduler::{apply_review, Difficulty};
    use chrono::Duration;
    use tempfile::TempDir;

    fn create_test_storage() -> (LibraryStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = LibraryStorage::new(temp_dir.path().join("nested").join(DATA_FILE_NAME));
        (storage, temp_dir)
    }

    #[test]
    fn test_load_missing_file() {
        let (storage, _temp) = create_test_storage();
        let library = storage.load().unwrap();
        assert!(library.is_empty());
    }

    #[test]
    fn test_save_and_load_preserves_everything() {
        let (storage, _temp) = create_test_storage();
        let clock = ManualClock::at_epoch();

        let mut library = Library::new();
        let vocab = library.add_collection(Collection::new("Vocabulary"));
        vocab.add_slide(Slide::new("What is this?", "A slide", &clock));
        vocab.add_slide(Slide::new("Knock knock", "Who's there?", &clock));
        vocab.add_slide(Slide::new("Third", "Last", &clock));
        let first = vocab.slides()[0].id;
        vocab.review(first, Difficulty::Easy, &clock).unwrap();
        library.add_collection(Collection::new("Empty"));

        storage.save(&library).unwrap();
        let loaded = storage.load().unwrap();

        assert_eq!(loaded, library);
        let prompts: Vec<&str> = loaded.collections()[0]
            .slides()
            .iter()
            .map(|s| s.prompt.as_str())
            .collect();
        assert_eq!(prompts, ["What is this?", "Knock knock", "Third"]);

        let reviewed = &loaded.collections()[0].slides()[0];
        assert_eq!(reviewed.previous_interval(), Duration::seconds(5));
        assert_eq!(reviewed.current_interval(), Duration::seconds(10));
        assert_eq!(reviewed.due_at(), clock.now() + Duration::seconds(10));
    }

    #[test]
    fn test_save_overwrites_and_leaves_no_temp_file() {
        let (storage, _temp) = create_test_storage();
        let clock = ManualClock::at_epoch();

        let mut library = Library::new();
        storage.save(&library).unwrap();

        let c = library.add_collection(Collection::new("Jokes"));
        let mut slide = Slide::new("Knock knock", "Who's there?", &clock);
        apply_review(&mut slide, Difficulty::Hard, &clock);
        c.add_slide(slide);
        storage.save(&library).unwrap();

        assert_eq!(storage.load().unwrap().slide_count(), 1);
        assert!(!storage.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let (storage, _temp) = create_test_storage();
        fs::create_dir_all(storage.path().parent().unwrap()).unwrap();
        fs::write(storage.path(), "not json").unwrap();

        assert!(matches!(storage.load(), Err(StorageError::Json(_))));
    }
}
