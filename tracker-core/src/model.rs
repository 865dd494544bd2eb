//! Campaign document types.
//!
//! The entire application state persists as a single JSON document: a map
//! from campaign name to campaign, plus a `_version` schema tag. Tracker
//! slots stay schemaless at this layer so slots written by other revisions
//! of the tool survive a load/save cycle untouched; typed access goes
//! through [`crate::trackers`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Schema version stamped onto the document on every save.
pub const SCHEMA_VERSION: &str = "1.0.0";

/// The persisted document: every campaign, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignCollection {
    /// Schema tag; absent on pre-versioning documents.
    #[serde(rename = "_version", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Campaigns in insertion order.
    #[serde(flatten)]
    pub campaigns: IndexMap<String, Campaign>,
}

impl CampaignCollection {
    /// Create an empty collection with no version tag.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.campaigns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }

    /// Campaign names in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.campaigns.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.campaigns.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Campaign> {
        self.campaigns.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Campaign> {
        self.campaigns.get_mut(name)
    }

    /// Insert a campaign under its own name.
    pub fn insert(&mut self, campaign: Campaign) {
        self.campaigns.insert(campaign.name.clone(), campaign);
    }

    /// Remove a campaign, preserving the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<Campaign> {
        self.campaigns.shift_remove(name)
    }

    /// Rewrite each campaign's redundant name field from its registry key.
    ///
    /// The key is authoritative; legacy documents omit the field entirely.
    pub fn normalize_names(&mut self) {
        for (key, campaign) in &mut self.campaigns {
            campaign.name = key.clone();
        }
    }
}

/// One campaign: a name plus the free-form trackers map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    /// Redundant with the collection key; the key wins on load.
    #[serde(rename = "campaignName", default)]
    pub name: String,

    /// Tracker slots, keyed by slot name. Lazily created: trackers that
    /// have never been saved simply have no slot here.
    #[serde(default)]
    pub trackers: Map<String, Value>,
}

impl Campaign {
    /// Create a campaign with an empty trackers map.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            trackers: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_collection_serializes_to_empty_object() {
        let collection = CampaignCollection::new();
        let value = serde_json::to_value(&collection).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_version_tag_round_trips() {
        let mut collection = CampaignCollection::new();
        collection.version = Some(SCHEMA_VERSION.to_string());
        collection.insert(Campaign::named("Homebrook"));

        let raw = serde_json::to_string(&collection).unwrap();
        let loaded: CampaignCollection = serde_json::from_str(&raw).unwrap();

        assert_eq!(loaded.version.as_deref(), Some(SCHEMA_VERSION));
        assert_eq!(loaded.names(), vec!["Homebrook"]);
    }

    #[test]
    fn test_unknown_tracker_slots_survive_round_trip() {
        let raw = json!({
            "Homebrook": {
                "campaignName": "Homebrook",
                "trackers": {
                    "somethingNewer": [{"field": 1}]
                }
            }
        })
        .to_string();

        let collection: CampaignCollection = serde_json::from_str(&raw).unwrap();
        let again = serde_json::to_value(&collection).unwrap();
        assert_eq!(
            again["Homebrook"]["trackers"]["somethingNewer"],
            json!([{"field": 1}])
        );
    }

    #[test]
    fn test_normalize_names_prefers_key() {
        let raw = json!({
            "Homebrook": { "trackers": {} }
        })
        .to_string();

        let mut collection: CampaignCollection = serde_json::from_str(&raw).unwrap();
        assert_eq!(collection.get("Homebrook").unwrap().name, "");

        collection.normalize_names();
        assert_eq!(collection.get("Homebrook").unwrap().name, "Homebrook");
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut collection = CampaignCollection::new();
        collection.insert(Campaign::named("Zeta"));
        collection.insert(Campaign::named("Alpha"));
        collection.insert(Campaign::named("Midway"));
        assert_eq!(collection.names(), vec!["Zeta", "Alpha", "Midway"]);

        collection.remove("Alpha");
        assert_eq!(collection.names(), vec!["Zeta", "Midway"]);
    }
}
