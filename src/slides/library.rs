//! The full set of collections a learner owns

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{Result, SlideError};
use super::models::Collection;

/// Current on-disk format version
pub const LIBRARY_VERSION: u32 = 1;

fn default_version() -> u32 {
    LIBRARY_VERSION
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Library {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    collections: Vec<Collection>,
}

impl Default for Library {
    fn default() -> Self {
        Self::new()
    }
}

impl Library {
    pub fn new() -> Self {
        Self {
            version: LIBRARY_VERSION,
            collections: Vec::new(),
        }
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    pub fn add_collection(&mut self, collection: Collection) -> &mut Collection {
        self.collections.push(collection);
        let last = self.collections.len() - 1;
        &mut self.collections[last]
    }

    pub fn remove_collection(&mut self, collection_id: Uuid) -> Result<Collection> {
        let pos = self
            .collections
            .iter()
            .position(|c| c.id == collection_id)
            .ok_or(SlideError::CollectionNotFound(collection_id))?;
        Ok(self.collections.remove(pos))
    }

    pub fn get(&self, collection_id: Uuid) -> Result<&Collection> {
        self.collections
            .iter()
            .find(|c| c.id == collection_id)
            .ok_or(SlideError::CollectionNotFound(collection_id))
    }

    pub fn get_mut(&mut self, collection_id: Uuid) -> Result<&mut Collection> {
        self.collections
            .iter_mut()
            .find(|c| c.id == collection_id)
            .ok_or(SlideError::CollectionNotFound(collection_id))
    }

    /// Total number of slides across all collections
    pub fn slide_count(&self) -> usize {
        self.collections.iter().map(Collection::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove_collections() {
        let mut library = Library::new();
        let vocab = library.add_collection(Collection::new("Vocabulary")).id;
        let jokes = library.add_collection(Collection::new("Jokes")).id;
        assert_eq!(library.len(), 2);

        let removed = library.remove_collection(vocab).unwrap();
        assert_eq!(removed.name, "Vocabulary");
        assert_eq!(library.collections()[0].id, jokes);

        assert_eq!(
            library.remove_collection(vocab),
            Err(SlideError::CollectionNotFound(vocab))
        );
    }

    #[test]
    fn test_names_need_not_be_unique() {
        let mut library = Library::new();
        let a = library.add_collection(Collection::new("Same")).id;
        let b = library.add_collection(Collection::new("Same")).id;

        assert_ne!(a, b);
        library.get_mut(b).unwrap().rename("Different");
        assert_eq!(library.get(a).unwrap().name, "Same");
        assert_eq!(library.get(b).unwrap().name, "Different");
    }

    #[test]
    fn test_missing_fields_default() {
        let library: Library = serde_json::from_str("{}").unwrap();
        assert_eq!(library.version, LIBRARY_VERSION);
        assert!(library.is_empty());
        assert_eq!(library.slide_count(), 0);
    }
}
