//! Campaign registry: the named campaigns and the transient selection.
//!
//! Owns the in-memory collection and the store handle, so every mutation
//! persists the whole document immediately. The "current campaign" pointer
//! is UI state and is never written to disk.

use thiserror::Error;

use crate::model::{Campaign, CampaignCollection};
use crate::store::{CampaignStore, StoreError};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("campaign name cannot be empty")]
    EmptyName,

    #[error("campaign '{0}' already exists")]
    Duplicate(String),

    #[error("campaign '{0}' not found")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct CampaignRegistry {
    store: CampaignStore,
    collection: CampaignCollection,
    current: Option<String>,
}

impl CampaignRegistry {
    /// Wrap a loaded collection. Callers that failed to load pass an empty
    /// collection and surface the error themselves.
    pub fn new(store: CampaignStore, collection: CampaignCollection) -> Self {
        Self {
            store,
            collection,
            current: None,
        }
    }

    pub fn store(&self) -> &CampaignStore {
        &self.store
    }

    pub fn collection(&self) -> &CampaignCollection {
        &self.collection
    }

    /// Campaign names in insertion order, for the selector.
    pub fn names(&self) -> Vec<&str> {
        self.collection.names()
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    /// Create a campaign with an empty trackers map and persist.
    pub async fn create(&mut self, name: &str) -> Result<(), RegistryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.collection.contains(name) {
            return Err(RegistryError::Duplicate(name.to_string()));
        }
        self.collection.insert(Campaign::named(name));
        self.persist().await
    }

    /// Point the selection at `name`. Not-found leaves the previous
    /// selection intact.
    pub fn select(&mut self, name: &str) -> Result<(), RegistryError> {
        if !self.collection.contains(name) {
            return Err(RegistryError::NotFound(name.to_string()));
        }
        self.current = Some(name.to_string());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.current = None;
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn current(&self) -> Option<&Campaign> {
        self.current
            .as_deref()
            .and_then(|name| self.collection.get(name))
    }

    pub fn current_mut(&mut self) -> Option<&mut Campaign> {
        let name = self.current.as_deref()?;
        self.collection.get_mut(name)
    }

    /// Delete a campaign (and all its tracker data) and persist. Clears
    /// the selection if it pointed at the deleted campaign.
    pub async fn delete(&mut self, name: &str) -> Result<(), RegistryError> {
        if self.collection.remove(name).is_none() {
            return Err(RegistryError::NotFound(name.to_string()));
        }
        if self.current.as_deref() == Some(name) {
            self.current = None;
        }
        self.persist().await
    }

    /// Write the whole collection through the store. Used after every
    /// tracker mutation: single-entry edits rewrite the full document.
    pub async fn persist(&mut self) -> Result<(), RegistryError> {
        self.store.save(&mut self.collection).await?;
        Ok(())
    }

    /// Swap in a freshly imported collection. The selection resets; views
    /// rebuild from scratch.
    pub fn replace_all(&mut self, collection: CampaignCollection) {
        self.collection = collection;
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn registry_in(dir: &TempDir) -> CampaignRegistry {
        let store = CampaignStore::new(dir.path().join("campaigns.json"));
        CampaignRegistry::new(store, CampaignCollection::new())
    }

    #[tokio::test]
    async fn test_create_select_and_read_back() {
        let dir = TempDir::new().expect("temp dir");
        let mut registry = registry_in(&dir);

        registry.create("Homebrook").await.expect("create");
        registry.select("Homebrook").expect("select");

        assert_eq!(registry.current_name(), Some("Homebrook"));
        assert_eq!(registry.current().unwrap().name, "Homebrook");
    }

    #[tokio::test]
    async fn test_create_rejects_empty_and_duplicate_names() {
        let dir = TempDir::new().expect("temp dir");
        let mut registry = registry_in(&dir);

        assert!(matches!(
            registry.create("   ").await,
            Err(RegistryError::EmptyName)
        ));

        registry.create("Homebrook").await.expect("create");
        assert!(matches!(
            registry.create("Homebrook").await,
            Err(RegistryError::Duplicate(_))
        ));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_select_not_found_keeps_previous_selection() {
        let dir = TempDir::new().expect("temp dir");
        let mut registry = registry_in(&dir);

        registry.create("Homebrook").await.expect("create");
        registry.select("Homebrook").expect("select");

        assert!(matches!(
            registry.select("Nowhere"),
            Err(RegistryError::NotFound(_))
        ));
        assert_eq!(registry.current_name(), Some("Homebrook"));
    }

    #[tokio::test]
    async fn test_delete_selected_campaign_clears_selection() {
        let dir = TempDir::new().expect("temp dir");
        let mut registry = registry_in(&dir);

        registry.create("Homebrook").await.expect("create");
        registry.create("Saltmarsh").await.expect("create");
        registry.select("Homebrook").expect("select");

        registry.delete("Homebrook").await.expect("delete");
        assert_eq!(registry.current_name(), None);
        assert_eq!(registry.names(), vec!["Saltmarsh"]);
    }

    #[tokio::test]
    async fn test_delete_other_campaign_keeps_selection() {
        let dir = TempDir::new().expect("temp dir");
        let mut registry = registry_in(&dir);

        registry.create("Homebrook").await.expect("create");
        registry.create("Saltmarsh").await.expect("create");
        registry.select("Homebrook").expect("select");

        registry.delete("Saltmarsh").await.expect("delete");
        assert_eq!(registry.current_name(), Some("Homebrook"));
    }

    #[tokio::test]
    async fn test_mutations_persist_through_the_store() {
        let dir = TempDir::new().expect("temp dir");
        let store = CampaignStore::new(dir.path().join("campaigns.json"));

        {
            let mut registry = CampaignRegistry::new(store.clone(), CampaignCollection::new());
            registry.create("Homebrook").await.expect("create");
        }

        let reloaded = store.load().await.expect("load");
        assert_eq!(reloaded.names(), vec!["Homebrook"]);
    }

    #[tokio::test]
    async fn test_replace_all_resets_selection() {
        let dir = TempDir::new().expect("temp dir");
        let mut registry = registry_in(&dir);

        registry.create("Homebrook").await.expect("create");
        registry.select("Homebrook").expect("select");

        registry.replace_all(CampaignCollection::new());
        assert_eq!(registry.current_name(), None);
        assert!(registry.is_empty());
    }
}
