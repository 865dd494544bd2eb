//! TTRPG campaign data engine.
//!
//! This crate provides:
//! - The campaign document model, persisted as one JSON file
//! - A campaign registry with create/select/delete semantics
//! - A generalized tracker contract, implemented once and configured per
//!   feature area (NPCs, journal, settlements, travel plans, ...)
//!
//! # Quick Start
//!
//! ```ignore
//! use tracker_core::trackers::{self, Npc};
//! use tracker_core::{CampaignRegistry, CampaignStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = CampaignStore::new("campaigns.json");
//!     let collection = store.load().await?;
//!     let mut registry = CampaignRegistry::new(store, collection);
//!
//!     registry.create("Homebrook").await?;
//!     registry.select("Homebrook")?;
//!
//!     let campaign = registry.current_mut().expect("just selected");
//!     let mut npcs = trackers::entries::<Npc>(campaign);
//!     npcs.push(Npc { name: "Gribbleton".into(), ..Default::default() });
//!     trackers::save_entries(campaign, &npcs)?;
//!     registry.persist().await?;
//!     Ok(())
//! }
//! ```

pub mod form;
pub mod model;
pub mod registry;
pub mod store;
pub mod trackers;

// Primary public API
pub use form::{FieldKind, FieldSpec, FormSchema, FormValue, FormValues};
pub use model::{Campaign, CampaignCollection, SCHEMA_VERSION};
pub use registry::{CampaignRegistry, RegistryError};
pub use store::{CampaignStore, ImportError, StoreError, EXPORT_FILE_NAME};
pub use trackers::{ops, DetailField, ListRow, SaveOutcome, TrackerKind, TrackerOps};
