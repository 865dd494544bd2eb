//! Storage gateway for the campaign document.
//!
//! One JSON file holds every campaign. Loading tolerates a missing file;
//! import validates the shape of the incoming document before anything is
//! overwritten. Callers are expected to turn errors into user-visible
//! notifications and keep running; nothing here is fatal.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;

use crate::model::{CampaignCollection, SCHEMA_VERSION};

/// File name used for exports.
pub const EXPORT_FILE_NAME: &str = "ttrpg_campaigns.json";

/// Environment variable overriding the data file location.
pub const DATA_FILE_ENV: &str = "TRACKER_DATA_FILE";

/// Errors from load/save/export operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from import validation. Import rejects before persisting, so a
/// failed import never touches stored state.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("could not read the file: {0}")]
    Io(#[from] std::io::Error),

    #[error("the file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("the file does not contain a JSON object")]
    NotAnObject,

    #[error("the file does not look like a campaign export")]
    UnrecognizedShape,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The one persisted document, addressed by file path.
#[derive(Debug, Clone)]
pub struct CampaignStore {
    path: PathBuf,
}

impl CampaignStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default data file: `$TRACKER_DATA_FILE` when set, otherwise
    /// `<platform data dir>/ttrpg-tracker/campaigns.json`.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var(DATA_FILE_ENV) {
            if !path.is_empty() {
                return PathBuf::from(path);
            }
        }
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ttrpg-tracker")
            .join("campaigns.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted document. A missing file is an empty collection;
    /// unreadable or unparsable content is an error for the caller to
    /// surface (and degrade to an empty collection).
    pub async fn load(&self) -> Result<CampaignCollection, StoreError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(CampaignCollection::new()),
            Err(e) => return Err(e.into()),
        };

        let mut collection: CampaignCollection = serde_json::from_str(&raw)?;

        match &collection.version {
            Some(version) => log::info!("loaded campaign data, schema version {version}"),
            None if !collection.is_empty() => log::warn!(
                "campaign data predates schema versioning; re-export it to pick up the current tag"
            ),
            None => {}
        }

        collection.normalize_names();
        Ok(collection)
    }

    /// Stamp the schema version and write the whole document. On failure
    /// the in-memory collection is untouched and the caller reports it.
    pub async fn save(&self, collection: &mut CampaignCollection) -> Result<(), StoreError> {
        collection.version = Some(SCHEMA_VERSION.to_string());
        let content = serde_json::to_string_pretty(collection)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        fs::write(&self.path, content).await?;
        Ok(())
    }

    /// Write an export file into `dir` and return its path.
    pub async fn export(
        collection: &CampaignCollection,
        dir: impl AsRef<Path>,
    ) -> Result<PathBuf, StoreError> {
        let path = dir.as_ref().join(EXPORT_FILE_NAME);
        let content = serde_json::to_string_pretty(collection)?;
        fs::write(&path, content).await?;
        Ok(path)
    }

    /// Parse and validate import content without touching storage.
    ///
    /// Accepted shapes: an empty object, an object carrying `_version`, or
    /// an object with at least one member that has a string `campaignName`
    /// and an object `trackers`.
    pub fn import_str(contents: &str) -> Result<CampaignCollection, ImportError> {
        let value: serde_json::Value = serde_json::from_str(contents)?;
        let object = value.as_object().ok_or(ImportError::NotAnObject)?;

        let looks_like_export = object.is_empty()
            || object.contains_key("_version")
            || object.values().any(|candidate| {
                candidate
                    .get("campaignName")
                    .map(serde_json::Value::is_string)
                    .unwrap_or(false)
                    && candidate
                        .get("trackers")
                        .map(serde_json::Value::is_object)
                        .unwrap_or(false)
            });
        if !looks_like_export {
            return Err(ImportError::UnrecognizedShape);
        }

        let mut collection: CampaignCollection = serde_json::from_value(value)?;
        collection.normalize_names();
        Ok(collection)
    }

    /// Import from a file: validate, then overwrite the persisted document.
    /// The returned collection replaces all in-memory state.
    pub async fn import_file(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<CampaignCollection, ImportError> {
        let raw = fs::read_to_string(path).await?;
        let mut collection = Self::import_str(&raw)?;
        self.save(&mut collection).await?;
        Ok(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Campaign;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> CampaignStore {
        CampaignStore::new(dir.path().join("campaigns.json"))
    }

    #[tokio::test]
    async fn test_missing_file_loads_as_empty() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);
        let collection = store.load().await.expect("load should succeed");
        assert!(collection.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);

        let mut collection = CampaignCollection::new();
        collection.insert(Campaign::named("Homebrook"));
        store.save(&mut collection).await.expect("save");

        assert_eq!(collection.version.as_deref(), Some(SCHEMA_VERSION));

        let loaded = store.load().await.expect("load");
        assert_eq!(loaded, collection);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error_not_a_panic() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);
        std::fs::write(store.path(), "not json{").expect("write fixture");

        let result = store.load().await;
        assert!(matches!(result, Err(StoreError::Json(_))));
    }

    #[tokio::test]
    async fn test_export_uses_fixed_file_name() {
        let dir = TempDir::new().expect("temp dir");
        let mut collection = CampaignCollection::new();
        collection.insert(Campaign::named("Homebrook"));

        let path = CampaignStore::export(&collection, dir.path())
            .await
            .expect("export");
        assert!(path.ends_with(EXPORT_FILE_NAME));
        assert!(path.exists());
    }

    #[test]
    fn test_import_accepts_empty_object() {
        let collection = CampaignStore::import_str("{}").expect("empty object is valid");
        assert!(collection.is_empty());
    }

    #[test]
    fn test_import_accepts_version_only_document() {
        let collection =
            CampaignStore::import_str(r#"{"_version":"1.0.0"}"#).expect("version-only is valid");
        assert!(collection.is_empty());
        assert_eq!(collection.version.as_deref(), Some("1.0.0"));
    }

    #[test]
    fn test_import_rejects_invalid_json() {
        assert!(matches!(
            CampaignStore::import_str("not json{"),
            Err(ImportError::Json(_))
        ));
    }

    #[test]
    fn test_import_rejects_non_objects() {
        assert!(matches!(
            CampaignStore::import_str("[1, 2, 3]"),
            Err(ImportError::NotAnObject)
        ));
    }

    #[test]
    fn test_import_rejects_unrecognized_shape() {
        assert!(matches!(
            CampaignStore::import_str(r#"{"foo": {"bar": 1}}"#),
            Err(ImportError::UnrecognizedShape)
        ));
    }

    #[test]
    fn test_import_accepts_campaign_shaped_members() {
        let raw = r#"{"Homebrook": {"campaignName": "Homebrook", "trackers": {}}}"#;
        let collection = CampaignStore::import_str(raw).expect("campaign shape is valid");
        assert_eq!(collection.names(), vec!["Homebrook"]);
    }

    #[tokio::test]
    async fn test_failed_import_leaves_storage_untouched() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);

        let mut collection = CampaignCollection::new();
        collection.insert(Campaign::named("Homebrook"));
        store.save(&mut collection).await.expect("save");

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "not json{").expect("write fixture");
        assert!(store.import_file(&bad).await.is_err());

        let loaded = store.load().await.expect("load");
        assert_eq!(loaded.names(), vec!["Homebrook"]);
    }

    #[tokio::test]
    async fn test_export_then_import_round_trips() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);

        let mut collection = CampaignCollection::new();
        collection.insert(Campaign::named("Homebrook"));
        collection.insert(Campaign::named("Saltmarsh"));
        store.save(&mut collection).await.expect("save");

        let exported = CampaignStore::export(&collection, dir.path())
            .await
            .expect("export");
        let imported = store.import_file(&exported).await.expect("import");
        assert_eq!(imported, collection);
    }
}
