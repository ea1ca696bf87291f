use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use uuid::Uuid;

use recall_lib::slides::{Collection, Library, LibraryStorage, Slide};
use recall_lib::{Config, SystemClock};

/// Shared application state for CLI commands
pub struct App {
    pub config: Config,
    pub storage: LibraryStorage,
    pub library: Library,
    pub clock: SystemClock,
}

impl App {
    /// Open the library named by `data_file`, the config, or the default location
    pub fn open(config: Config, data_file: Option<PathBuf>) -> Result<Self> {
        let path = match data_file.or_else(|| config.data_file.clone()) {
            Some(path) => path,
            None => LibraryStorage::default_path().context("Failed to get data directory")?,
        };

        let storage = LibraryStorage::new(path);
        let library = storage
            .load()
            .with_context(|| format!("Failed to load {}", storage.path().display()))?;

        Ok(Self {
            config,
            storage,
            library,
            clock: SystemClock,
        })
    }

    pub fn save(&self) -> Result<()> {
        self.storage
            .save(&self.library)
            .with_context(|| format!("Failed to save {}", self.storage.path().display()))
    }

    /// Find a collection by name (case-insensitive prefix match)
    pub fn find_collection(&self, name: &str) -> Result<Uuid> {
        let collections = self.library.collections();
        let name_lower = name.to_lowercase();

        // Exact match first; with duplicate names the earliest wins
        if let Some(c) = collections.iter().find(|c| c.name.to_lowercase() == name_lower) {
            return Ok(c.id);
        }

        let matches: Vec<&Collection> = collections
            .iter()
            .filter(|c| c.name.to_lowercase().starts_with(&name_lower))
            .collect();

        match matches.len() {
            0 => bail!(
                "No collection matching '{}'. Available collections:\n{}",
                name,
                list_names(collections)
            ),
            1 => Ok(matches[0].id),
            _ => bail!(
                "Ambiguous collection name '{}'. Matches:\n{}",
                name,
                matches
                    .iter()
                    .map(|c| format!("  - {}", c.name))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
        }
    }

    pub fn collection(&self, id: Uuid) -> Result<&Collection> {
        Ok(self.library.get(id)?)
    }

    pub fn collection_mut(&mut self, id: Uuid) -> Result<&mut Collection> {
        Ok(self.library.get_mut(id)?)
    }

    /// Build a slide using the configured starting interval
    pub fn new_slide(&self, prompt: String, answer: String) -> Slide {
        Slide::with_interval(prompt, answer, self.config.initial_interval(), &self.clock)
    }
}

fn list_names(collections: &[Collection]) -> String {
    if collections.is_empty() {
        return "  (none)".to_string();
    }
    collections
        .iter()
        .map(|c| format!("  - {}", c.name))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Find a slide by 1-based position or by id prefix
pub fn find_slide(collection: &Collection, query: &str) -> Result<Uuid> {
    let slides = collection.slides();

    if let Ok(index) = query.parse::<usize>() {
        return match index.checked_sub(1).and_then(|i| slides.get(i)) {
            Some(slide) => Ok(slide.id),
            None => bail!(
                "No slide #{} in '{}' ({} slides)",
                index,
                collection.name,
                slides.len()
            ),
        };
    }

    let query_lower = query.to_lowercase();
    let matches: Vec<&Slide> = slides
        .iter()
        .filter(|s| s.id.to_string().starts_with(&query_lower))
        .collect();

    match matches.len() {
        0 => bail!("No slide matching '{}' in '{}'", query, collection.name),
        1 => Ok(matches[0].id),
        _ => bail!("Ambiguous slide id '{}' ({} matches)", query, matches.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_app() -> (App, TempDir) {
        let temp = TempDir::new().unwrap();
        let app = App::open(Config::default(), Some(temp.path().join("collections.json"))).unwrap();
        (app, temp)
    }

    #[test]
    fn test_find_collection() {
        let (mut app, _temp) = create_test_app();
        let vocab = app.library.add_collection(Collection::new("Vocabulary")).id;
        let verbs = app.library.add_collection(Collection::new("Verbs")).id;

        assert_eq!(app.find_collection("vocabulary").unwrap(), vocab);
        assert_eq!(app.find_collection("voc").unwrap(), vocab);
        assert_eq!(app.find_collection("VERBS").unwrap(), verbs);
        assert!(app.find_collection("v").is_err());
        assert!(app.find_collection("jokes").is_err());
    }

    #[test]
    fn test_find_slide() {
        let (app, _temp) = create_test_app();
        let mut c = Collection::new("Jokes");
        c.add_slide(app.new_slide("Knock knock".into(), "Who's there?".into()));
        c.add_slide(app.new_slide("Why?".into(), "Because".into()));
        let second = c.slides()[1].id;

        assert_eq!(find_slide(&c, "2").unwrap(), second);
        assert_eq!(find_slide(&c, &second.to_string()[..13]).unwrap(), second);
        assert!(find_slide(&c, "0").is_err());
        assert!(find_slide(&c, "3").is_err());
    }

    #[test]
    fn test_save_round_trip() {
        let (mut app, temp) = create_test_app();
        app.library.add_collection(Collection::new("Vocabulary"));
        app.save().unwrap();

        let reopened = App::open(Config::default(), Some(temp.path().join("collections.json"))).unwrap();
        assert_eq!(reopened.library, app.library);
    }
}
