//! QA tests for save/load, export, and import of the campaign document.
//!
//! These exercise the storage gateway and registry together against a
//! temporary data file. Run with: `cargo test -p tracker-core --test
//! qa_persistence`

use tempfile::TempDir;
use tracker_core::trackers::{self, JournalEntry, Npc};
use tracker_core::{CampaignCollection, CampaignRegistry, CampaignStore, SCHEMA_VERSION};

fn store_in(dir: &TempDir) -> CampaignStore {
    CampaignStore::new(dir.path().join("campaigns.json"))
}

// =============================================================================
// Save and load
// =============================================================================

#[tokio::test]
async fn test_full_campaign_survives_save_and_load() {
    let dir = TempDir::new().expect("temp dir");
    let store = store_in(&dir);
    let mut registry = CampaignRegistry::new(store.clone(), CampaignCollection::new());

    registry.create("Homebrook").await.expect("create");
    registry.select("Homebrook").expect("select");

    let campaign = registry.current_mut().expect("selected");
    let npcs = vec![Npc {
        name: "Gribbleton".to_string(),
        alignment: "NE".to_string(),
        ..Default::default()
    }];
    trackers::save_entries(campaign, &npcs).expect("save slot");
    registry.persist().await.expect("persist");

    // Fresh load from disk, the way a new process would start.
    let loaded = store.load().await.expect("load");
    assert_eq!(loaded.version.as_deref(), Some(SCHEMA_VERSION));

    let campaign = loaded.get("Homebrook").expect("campaign present");
    let npcs: Vec<Npc> = trackers::entries(campaign);
    assert_eq!(npcs.len(), 1);
    assert_eq!(npcs[0].name, "Gribbleton");
    assert_eq!(npcs[0].alignment, "NE");
}

#[tokio::test]
async fn test_legacy_document_without_version_loads() {
    let dir = TempDir::new().expect("temp dir");
    let store = store_in(&dir);

    let legacy = r#"{"Homebrook": {"campaignName": "Homebrook", "trackers": {"npcs": []}}}"#;
    std::fs::write(store.path(), legacy).expect("write fixture");

    let loaded = store.load().await.expect("legacy load");
    assert_eq!(loaded.version, None);
    assert_eq!(loaded.names(), vec!["Homebrook"]);
}

#[tokio::test]
async fn test_unknown_slots_survive_a_mutation_cycle() {
    let dir = TempDir::new().expect("temp dir");
    let store = store_in(&dir);

    let seeded = r#"{
        "Homebrook": {
            "campaignName": "Homebrook",
            "trackers": { "futureTracker": {"keep": true} }
        }
    }"#;
    std::fs::write(store.path(), seeded).expect("write fixture");

    let collection = store.load().await.expect("load");
    let mut registry = CampaignRegistry::new(store.clone(), collection);
    registry.select("Homebrook").expect("select");

    let campaign = registry.current_mut().expect("selected");
    let npcs = vec![Npc {
        name: "Mirelda".to_string(),
        ..Default::default()
    }];
    trackers::save_entries(campaign, &npcs).expect("save slot");
    registry.persist().await.expect("persist");

    let reloaded = store.load().await.expect("reload");
    let campaign = reloaded.get("Homebrook").expect("campaign");
    assert_eq!(
        campaign.trackers.get("futureTracker"),
        Some(&serde_json::json!({"keep": true}))
    );
}

// =============================================================================
// Export and import
// =============================================================================

#[tokio::test]
async fn test_export_import_round_trip() {
    let dir = TempDir::new().expect("temp dir");
    let store = store_in(&dir);
    let mut registry = CampaignRegistry::new(store.clone(), CampaignCollection::new());

    registry.create("Homebrook").await.expect("create");
    registry.select("Homebrook").expect("select");
    let campaign = registry.current_mut().expect("selected");
    let journal = vec![JournalEntry {
        session_number: Some(1),
        session_title: "The Goblin Ambush".to_string(),
        ..Default::default()
    }];
    trackers::save_entries(campaign, &journal).expect("save slot");
    registry.persist().await.expect("persist");

    let exported = CampaignStore::export(registry.collection(), dir.path())
        .await
        .expect("export");

    // Import into a second store, as if on another machine.
    let other_dir = TempDir::new().expect("temp dir");
    let other_store = store_in(&other_dir);
    let imported = other_store.import_file(&exported).await.expect("import");

    assert_eq!(&imported, registry.collection());
}

#[tokio::test]
async fn test_import_replaces_previous_state_wholesale() {
    let dir = TempDir::new().expect("temp dir");
    let store = store_in(&dir);
    let mut registry = CampaignRegistry::new(store.clone(), CampaignCollection::new());

    registry.create("Old Campaign").await.expect("create");
    registry.select("Old Campaign").expect("select");

    let incoming = dir.path().join("incoming.json");
    std::fs::write(
        &incoming,
        r#"{"New Campaign": {"campaignName": "New Campaign", "trackers": {}}}"#,
    )
    .expect("write fixture");

    let imported = store.import_file(&incoming).await.expect("import");
    registry.replace_all(imported);

    // No incremental merge: the old campaign is gone and nothing is
    // selected anymore.
    assert_eq!(registry.names(), vec!["New Campaign"]);
    assert_eq!(registry.current_name(), None);
}
