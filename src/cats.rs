// 🐈 Cat Registry - In-memory cat sightings
//
// Records keep insertion order. Ids are assigned as (max existing id) + 1,
// so deleting the current maximum lets the next create reuse that id,
// while lower freed ids are never handed out again.

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};

// ============================================================================
// CAT RECORD
// ============================================================================

/// One cat sighting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatRecord {
    /// Assigned by the registry, never changes
    pub id: u64,
    pub name: String,
    pub description: String,
    pub location: String,
}

impl CatRecord {
    fn seed(id: u64, name: &str, description: &str, location: &str) -> Self {
        CatRecord {
            id,
            name: name.to_string(),
            description: description.to_string(),
            location: location.to_string(),
        }
    }
}

/// Creation payload
///
/// Every field is optional so a body with a missing field still reaches
/// validation in [`CatRegistry::create`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCat {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl NewCat {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        NewCat {
            name: Some(name.into()),
            description: Some(description.into()),
            location: Some(location.into()),
        }
    }
}

/// Returned by [`CatRegistry::delete`], which never fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deleted {
    /// false when no record had this id
    pub removed: bool,
}

// ============================================================================
// CAT REGISTRY
// ============================================================================

/// Owns every cat record for the lifetime of the process.
///
/// The registry itself is plain data with `&mut self` mutations; callers
/// that share it across threads wrap it in a single lock.
#[derive(Debug, Clone)]
pub struct CatRegistry {
    cats: Vec<CatRecord>,
}

impl CatRegistry {
    /// Create new registry with the example sightings (ids 1-5)
    pub fn new() -> Self {
        let mut registry = CatRegistry::empty();
        registry.register_default_cats();
        registry
    }

    /// Registry with no records
    pub fn empty() -> Self {
        CatRegistry { cats: Vec::new() }
    }

    fn register_default_cats(&mut self) {
        self.cats.extend([
            CatRecord::seed(1, "Whiskers", "Siamese grey", "Stockwell"),
            CatRecord::seed(2, "Tiger", "Ginger tabby with a torn left ear", "Brixton"),
            CatRecord::seed(3, "Shadow", "Black shorthair, sleeps on car bonnets", "Camden"),
            CatRecord::seed(4, "Mittens", "Tuxedo with white paws", "Hackney"),
            CatRecord::seed(5, "Luna", "Tortoiseshell, very shy", "Peckham"),
        ]);
    }

    /// Names of all cats, in insertion order
    pub fn list_names(&self) -> Vec<String> {
        self.cats.iter().map(|cat| cat.name.clone()).collect()
    }

    /// Full records, in insertion order
    pub fn list_detailed(&self) -> Vec<CatRecord> {
        self.cats.clone()
    }

    pub fn get(&self, id: u64) -> Result<CatRecord> {
        self.cats
            .iter()
            .find(|cat| cat.id == id)
            .cloned()
            .ok_or(RegistryError::NotFound { id })
    }

    /// Validate and append a new cat, assigning the next id
    pub fn create(&mut self, new_cat: NewCat) -> Result<CatRecord> {
        let (name, description, location) =
            match (new_cat.name, new_cat.description, new_cat.location) {
                (Some(name), Some(description), Some(location))
                    if !name.is_empty() && !description.is_empty() && !location.is_empty() =>
                {
                    (name, description, location)
                }
                _ => return Err(RegistryError::Validation),
            };

        let cat = CatRecord {
            id: self.next_id(),
            name,
            description,
            location,
        };
        tracing::info!(id = cat.id, name = %cat.name, "cat created");

        self.cats.push(cat.clone());
        Ok(cat)
    }

    /// Replace the description only. The new value is taken as-is.
    pub fn update(&mut self, id: u64, description: impl Into<String>) -> Result<CatRecord> {
        let cat = self
            .cats
            .iter_mut()
            .find(|cat| cat.id == id)
            .ok_or(RegistryError::NotFound { id })?;

        cat.description = description.into();
        tracing::info!(id, "cat description updated");

        Ok(cat.clone())
    }

    /// Remove the cat with this id, if any. Absent ids are not an error.
    pub fn delete(&mut self, id: u64) -> Deleted {
        let before = self.cats.len();
        self.cats.retain(|cat| cat.id != id);
        let removed = self.cats.len() != before;

        if removed {
            tracing::info!(id, "cat deleted");
        }

        Deleted { removed }
    }

    pub fn len(&self) -> usize {
        self.cats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cats.is_empty()
    }

    fn next_id(&self) -> u64 {
        self.cats.iter().map(|cat| cat.id).max().unwrap_or(0) + 1
    }
}

impl Default for CatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn whiskers() -> CatRecord {
        CatRecord {
            id: 1,
            name: "Whiskers".to_string(),
            description: "Siamese grey".to_string(),
            location: "Stockwell".to_string(),
        }
    }

    #[test]
    fn test_registry_initialization() {
        let registry = CatRegistry::new();

        assert_eq!(registry.len(), 5);
        let ids: Vec<u64> = registry.list_detailed().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_get_existing_and_missing() {
        let registry = CatRegistry::new();

        assert_eq!(registry.get(1), Ok(whiskers()));
        assert_eq!(registry.get(999), Err(RegistryError::NotFound { id: 999 }));
    }

    #[test]
    fn test_list_names_in_insertion_order() {
        let mut registry = CatRegistry::new();
        registry.create(NewCat::new("Snowball", "White Persian", "Notting Hill")).unwrap();

        let names = registry.list_names();
        assert_eq!(names.len(), registry.len());
        assert_eq!(names, vec!["Whiskers", "Tiger", "Shadow", "Mittens", "Luna", "Snowball"]);
    }

    #[test]
    fn test_create_assigns_max_plus_one() {
        let mut registry = CatRegistry::new();

        let snowball = registry
            .create(NewCat::new("Snowball", "White Persian", "Notting Hill"))
            .unwrap();

        assert_eq!(snowball.id, 6);
        assert_eq!(snowball.name, "Snowball");
        assert_eq!(snowball.description, "White Persian");
        assert_eq!(snowball.location, "Notting Hill");
        assert_eq!(registry.get(6), Ok(snowball));
    }

    #[test]
    fn test_create_in_empty_registry_starts_at_one() {
        let mut registry = CatRegistry::empty();
        assert!(registry.is_empty());

        let cat = registry.create(NewCat::new("First", "Calico", "Soho")).unwrap();
        assert_eq!(cat.id, 1);
    }

    #[test]
    fn test_create_ids_unique_in_listing() {
        let mut registry = CatRegistry::new();
        for i in 0..10 {
            registry
                .create(NewCat::new(format!("Cat {}", i), "Stray", "Lambeth"))
                .unwrap();
        }

        let ids: Vec<u64> = registry.list_detailed().iter().map(|c| c.id).collect();
        let unique: HashSet<u64> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
        assert!(ids.iter().all(|id| *id > 0));
    }

    #[test]
    fn test_create_rejects_missing_or_empty_fields() {
        let mut registry = CatRegistry::new();
        let invalid = vec![
            NewCat::new("NoDesc", "", ""),
            NewCat::new("", "Grey", "Soho"),
            NewCat::new("Pip", "Grey", ""),
            NewCat {
                name: Some("Pip".to_string()),
                description: Some("Grey".to_string()),
                location: None,
            },
            NewCat::default(),
        ];

        for new_cat in invalid {
            assert_eq!(registry.create(new_cat), Err(RegistryError::Validation));
            assert_eq!(registry.len(), 5);
        }
    }

    #[test]
    fn test_deleted_max_id_is_reused() {
        let mut registry = CatRegistry::new();

        registry.delete(5);
        let cat = registry.create(NewCat::new("Pip", "Grey", "Soho")).unwrap();
        assert_eq!(cat.id, 5);
    }

    #[test]
    fn test_deleted_lower_id_is_not_reused() {
        let mut registry = CatRegistry::new();

        registry.delete(2);
        let cat = registry.create(NewCat::new("Pip", "Grey", "Soho")).unwrap();
        assert_eq!(cat.id, 6);
    }

    #[test]
    fn test_update_changes_only_description() {
        let mut registry = CatRegistry::new();

        let updated = registry.update(1, "Updated Description").unwrap();
        assert_eq!(
            updated,
            CatRecord {
                description: "Updated Description".to_string(),
                ..whiskers()
            }
        );
        assert_eq!(registry.get(1), Ok(updated));
    }

    #[test]
    fn test_update_accepts_empty_description() {
        let mut registry = CatRegistry::new();

        let updated = registry.update(1, "").unwrap();
        assert_eq!(updated.description, "");
        assert_eq!(updated.name, "Whiskers");
        assert_eq!(updated.location, "Stockwell");
    }

    #[test]
    fn test_update_missing_cat_fails() {
        let mut registry = CatRegistry::new();
        let before = registry.list_detailed();

        assert_eq!(
            registry.update(999, "Anything"),
            Err(RegistryError::NotFound { id: 999 })
        );
        assert_eq!(registry.list_detailed(), before);
    }

    #[test]
    fn test_delete_then_get_fails() {
        let mut registry = CatRegistry::new();

        let deleted = registry.delete(1);
        assert!(deleted.removed);
        assert_eq!(registry.get(1), Err(RegistryError::NotFound { id: 1 }));
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut registry = CatRegistry::new();

        let first = registry.delete(3);
        let second = registry.delete(3);
        assert!(first.removed);
        assert!(!second.removed);

        let never = registry.delete(999);
        assert!(!never.removed);
        assert_eq!(registry.get(999), Err(RegistryError::NotFound { id: 999 }));
        assert_eq!(registry.len(), 4);
    }
}
