//! The tracker contract.
//!
//! Every feature area implements the same pattern: read one named slot out
//! of a campaign's trackers map, show a list (or a single document), and
//! write the slot back on save. The pattern is implemented once here, in
//! [`ListOps`] and [`DocOps`], and configured per feature by a small
//! descriptor: the [`TrackerEntry`] / [`TrackerDoc`] implementations in the
//! sibling modules.
//!
//! Saving a slot only mutates the in-memory campaign; callers persist the
//! whole collection through the registry afterwards, which is the system's
//! entire consistency strategy (single user, no concurrent writers).

pub mod bastion;
pub mod conflict;
pub mod dm_character;
pub mod expectations;
pub mod journal;
pub mod magic_items;
pub mod npc;
pub mod settlement;
pub mod travel;

pub use bastion::{Bastion, Facility};
pub use conflict::Conflict;
pub use dm_character::DmCharacter;
pub use expectations::{GameExpectations, SensitiveElement};
pub use journal::JournalEntry;
pub use magic_items::{MagicItemTier, MagicItemTracker, Rarity};
pub use npc::Npc;
pub use settlement::Settlement;
pub use travel::{TravelPlan, TravelStage};

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::form::{FieldSpec, FormSchema, FormValues};
use crate::model::Campaign;

/// One row in a tracker's list view.
#[derive(Debug, Clone, PartialEq)]
pub struct ListRow {
    /// Leading bold text.
    pub title: String,
    /// Short tag shown beside the title.
    pub tag: String,
    /// Muted second line.
    pub meta: String,
}

/// One labeled field in a read-only detail view.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailField {
    pub label: String,
    pub value: String,
    /// Whether the value should go through the markdown renderer.
    pub markdown: bool,
}

impl DetailField {
    pub fn plain(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            markdown: false,
        }
    }

    pub fn markdown(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            markdown: true,
        }
    }
}

/// Descriptor for a list-shaped tracker.
pub trait TrackerEntry: FormSchema + Serialize + DeserializeOwned {
    /// Slot name inside the campaign's trackers map.
    const SLOT: &'static str;
    /// Display title of the tracker.
    const TITLE: &'static str;
    /// What one entry is called in messages ("NPC", "Session Log", ...).
    const NOUN: &'static str;

    /// Short display title of this entry, for detail headers and delete
    /// confirmations.
    fn title_of(&self) -> String;

    fn summary(&self) -> ListRow;

    fn detail(&self) -> Vec<DetailField>;

    /// Entry indices in display order. Insertion order for every tracker
    /// except the journal.
    fn display_order(entries: &[Self]) -> Vec<usize> {
        (0..entries.len()).collect()
    }

    /// Form values for a brand-new entry. The existing entries are passed
    /// so defaults can depend on them (the journal numbers new sessions).
    fn blank_form(entries: &[Self]) -> FormValues {
        let _ = entries;
        FormValues::blank(Self::form_spec())
    }
}

/// Descriptor for a single-document tracker.
pub trait TrackerDoc: FormSchema + Serialize + DeserializeOwned {
    const SLOT: &'static str;
    const TITLE: &'static str;

    /// Read-only fields for the main view.
    fn overview(&self) -> Vec<DetailField>;
}

/// Read a list slot. An absent or unreadable slot yields an empty list;
/// this never mutates the campaign.
pub fn entries<E: TrackerEntry>(campaign: &Campaign) -> Vec<E> {
    campaign
        .trackers
        .get(E::SLOT)
        .map(|value| serde_json::from_value(value.clone()).unwrap_or_default())
        .unwrap_or_default()
}

/// Write a full list back into its slot. Callers persist the collection
/// afterwards.
pub fn save_entries<E: TrackerEntry>(
    campaign: &mut Campaign,
    entries: &[E],
) -> Result<(), serde_json::Error> {
    let value = serde_json::to_value(entries)?;
    campaign.trackers.insert(E::SLOT.to_string(), value);
    Ok(())
}

/// Read a document slot; absent or unreadable slots yield the default.
pub fn document<D: TrackerDoc>(campaign: &Campaign) -> D {
    campaign
        .trackers
        .get(D::SLOT)
        .map(|value| serde_json::from_value(value.clone()).unwrap_or_default())
        .unwrap_or_default()
}

/// Replace a document slot wholesale.
pub fn save_document<D: TrackerDoc>(
    campaign: &mut Campaign,
    doc: &D,
) -> Result<(), serde_json::Error> {
    let value = serde_json::to_value(doc)?;
    campaign.trackers.insert(D::SLOT.to_string(), value);
    Ok(())
}

// ============================================================================
// Navigation registry
// ============================================================================

/// Every tracker the navigation can mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerKind {
    GameExpectations,
    Npcs,
    Journal,
    TravelPlanner,
    Settlements,
    MagicItems,
    Bastions,
    Conflicts,
    DmCharacters,
}

impl TrackerKind {
    /// Navigation order.
    pub const ALL: [TrackerKind; 9] = [
        TrackerKind::GameExpectations,
        TrackerKind::Npcs,
        TrackerKind::Journal,
        TrackerKind::TravelPlanner,
        TrackerKind::Settlements,
        TrackerKind::MagicItems,
        TrackerKind::Bastions,
        TrackerKind::Conflicts,
        TrackerKind::DmCharacters,
    ];

    pub fn title(self) -> &'static str {
        ops(self).title()
    }
}

/// Result of a successful form save, for status messages.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveOutcome {
    /// True when the save appended a new record.
    pub created: bool,
    /// Display title of the saved record.
    pub title: String,
}

/// The operations the view router needs from any tracker, list-shaped or
/// document-shaped.
pub trait TrackerOps: Sync {
    fn title(&self) -> &'static str;

    /// What one record is called in messages.
    fn noun(&self) -> &'static str;

    /// Document trackers render an overview instead of a list.
    fn is_document(&self) -> bool;

    fn len(&self, campaign: &Campaign) -> usize;

    /// List rows in display order, each paired with the entry index it
    /// addresses (display order and storage order differ for the journal).
    fn rows(&self, campaign: &Campaign) -> Vec<(usize, ListRow)>;

    /// Detail header and fields for one entry; `None` when the index is
    /// stale (entry deleted since the list was rendered).
    fn detail(&self, campaign: &Campaign, index: usize) -> Option<(String, Vec<DetailField>)>;

    /// Read-only fields for a document tracker's main view.
    fn overview(&self, campaign: &Campaign) -> Vec<DetailField>;

    fn form_spec(&self) -> &'static [FieldSpec];

    /// Seed values for the edit form. `None` index means a blank record
    /// for list trackers and the current document for document trackers.
    /// Returns `None` only for a stale entry index.
    fn form_values(&self, campaign: &Campaign, index: Option<usize>) -> Option<FormValues>;

    /// Check required fields; `Err` carries the offending field's key.
    fn validate(&self, values: &FormValues) -> Result<(), &'static FieldSpec>;

    /// Write a submitted form back: re-fetch the slot, replace or append,
    /// save the slot. The caller persists the collection.
    fn save_form(
        &self,
        campaign: &mut Campaign,
        index: Option<usize>,
        values: &FormValues,
    ) -> Result<SaveOutcome, serde_json::Error>;

    /// Delete the entry at `index`; returns its display title, or `None`
    /// when the index was already stale.
    fn delete(&self, campaign: &mut Campaign, index: usize)
        -> Result<Option<String>, serde_json::Error>;
}

fn validate_required(
    spec: &'static [FieldSpec],
    values: &FormValues,
) -> Result<(), &'static FieldSpec> {
    for field in spec {
        if field.required && values.text(field.key).trim().is_empty() {
            return Err(field);
        }
    }
    Ok(())
}

/// Generic list-tracker operations, one instance per entry type.
struct ListOps<E>(PhantomData<fn() -> E>);

impl<E> ListOps<E> {
    const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<E: TrackerEntry> TrackerOps for ListOps<E> {
    fn title(&self) -> &'static str {
        E::TITLE
    }

    fn noun(&self) -> &'static str {
        E::NOUN
    }

    fn is_document(&self) -> bool {
        false
    }

    fn len(&self, campaign: &Campaign) -> usize {
        entries::<E>(campaign).len()
    }

    fn rows(&self, campaign: &Campaign) -> Vec<(usize, ListRow)> {
        let list = entries::<E>(campaign);
        E::display_order(&list)
            .into_iter()
            .map(|index| (index, list[index].summary()))
            .collect()
    }

    fn detail(&self, campaign: &Campaign, index: usize) -> Option<(String, Vec<DetailField>)> {
        let list = entries::<E>(campaign);
        list.get(index)
            .map(|entry| (format!("{}: {}", E::NOUN, entry.title_of()), entry.detail()))
    }

    fn overview(&self, _campaign: &Campaign) -> Vec<DetailField> {
        Vec::new()
    }

    fn form_spec(&self) -> &'static [FieldSpec] {
        E::form_spec()
    }

    fn form_values(&self, campaign: &Campaign, index: Option<usize>) -> Option<FormValues> {
        let list = entries::<E>(campaign);
        match index {
            Some(i) => list.get(i).map(FormSchema::to_form),
            None => Some(E::blank_form(&list)),
        }
    }

    fn validate(&self, values: &FormValues) -> Result<(), &'static FieldSpec> {
        validate_required(E::form_spec(), values)
    }

    fn save_form(
        &self,
        campaign: &mut Campaign,
        index: Option<usize>,
        values: &FormValues,
    ) -> Result<SaveOutcome, serde_json::Error> {
        // Re-fetch rather than trusting the caller's snapshot; an entry
        // deleted while the form was open must not resurrect stale state.
        let mut list = entries::<E>(campaign);
        let record = E::from_form(values);
        let title = record.title_of();

        let created = match index {
            Some(i) if i < list.len() => {
                list[i] = record;
                false
            }
            _ => {
                list.push(record);
                true
            }
        };

        save_entries(campaign, &list)?;
        Ok(SaveOutcome { created, title })
    }

    fn delete(
        &self,
        campaign: &mut Campaign,
        index: usize,
    ) -> Result<Option<String>, serde_json::Error> {
        let mut list = entries::<E>(campaign);
        if index >= list.len() {
            return Ok(None);
        }
        let removed = list.remove(index);
        save_entries(campaign, &list)?;
        Ok(Some(removed.title_of()))
    }
}

/// Generic document-tracker operations.
struct DocOps<D>(PhantomData<fn() -> D>);

impl<D> DocOps<D> {
    const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<D: TrackerDoc> TrackerOps for DocOps<D> {
    fn title(&self) -> &'static str {
        D::TITLE
    }

    fn noun(&self) -> &'static str {
        D::TITLE
    }

    fn is_document(&self) -> bool {
        true
    }

    fn len(&self, _campaign: &Campaign) -> usize {
        1
    }

    fn rows(&self, _campaign: &Campaign) -> Vec<(usize, ListRow)> {
        Vec::new()
    }

    fn detail(&self, _campaign: &Campaign, _index: usize) -> Option<(String, Vec<DetailField>)> {
        None
    }

    fn overview(&self, campaign: &Campaign) -> Vec<DetailField> {
        document::<D>(campaign).overview()
    }

    fn form_spec(&self) -> &'static [FieldSpec] {
        D::form_spec()
    }

    fn form_values(&self, campaign: &Campaign, _index: Option<usize>) -> Option<FormValues> {
        Some(document::<D>(campaign).to_form())
    }

    fn validate(&self, values: &FormValues) -> Result<(), &'static FieldSpec> {
        validate_required(D::form_spec(), values)
    }

    fn save_form(
        &self,
        campaign: &mut Campaign,
        _index: Option<usize>,
        values: &FormValues,
    ) -> Result<SaveOutcome, serde_json::Error> {
        let doc = D::from_form(values);
        save_document(campaign, &doc)?;
        Ok(SaveOutcome {
            created: false,
            title: D::TITLE.to_string(),
        })
    }

    fn delete(
        &self,
        _campaign: &mut Campaign,
        _index: usize,
    ) -> Result<Option<String>, serde_json::Error> {
        Ok(None)
    }
}

/// Resolve a tracker kind to its operations. This is the registry the
/// navigation consults to mount a tracker's views.
pub fn ops(kind: TrackerKind) -> &'static dyn TrackerOps {
    static GAME_EXPECTATIONS: DocOps<GameExpectations> = DocOps::new();
    static NPCS: ListOps<Npc> = ListOps::new();
    static JOURNAL: ListOps<JournalEntry> = ListOps::new();
    static TRAVEL: ListOps<TravelPlan> = ListOps::new();
    static SETTLEMENTS: ListOps<Settlement> = ListOps::new();
    static MAGIC_ITEMS: DocOps<MagicItemTracker> = DocOps::new();
    static BASTIONS: ListOps<Bastion> = ListOps::new();
    static CONFLICTS: ListOps<Conflict> = ListOps::new();
    static DM_CHARACTERS: ListOps<DmCharacter> = ListOps::new();

    match kind {
        TrackerKind::GameExpectations => &GAME_EXPECTATIONS,
        TrackerKind::Npcs => &NPCS,
        TrackerKind::Journal => &JOURNAL,
        TrackerKind::TravelPlanner => &TRAVEL,
        TrackerKind::Settlements => &SETTLEMENTS,
        TrackerKind::MagicItems => &MAGIC_ITEMS,
        TrackerKind::Bastions => &BASTIONS,
        TrackerKind::Conflicts => &CONFLICTS,
        TrackerKind::DmCharacters => &DM_CHARACTERS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn campaign() -> Campaign {
        Campaign::named("Test")
    }

    #[test]
    fn test_absent_slot_reads_as_empty() {
        let campaign = campaign();
        let npcs: Vec<Npc> = entries(&campaign);
        assert!(npcs.is_empty());
    }

    #[test]
    fn test_malformed_slot_reads_as_empty() {
        let mut campaign = campaign();
        campaign
            .trackers
            .insert(Npc::SLOT.to_string(), json!("not an array"));
        let npcs: Vec<Npc> = entries(&campaign);
        assert!(npcs.is_empty());
    }

    #[test]
    fn test_save_entries_round_trips() {
        let mut campaign = campaign();
        let npcs = vec![
            Npc {
                name: "Gribbleton".to_string(),
                alignment: "NE".to_string(),
                ..Default::default()
            },
            Npc {
                name: "Mirelda".to_string(),
                ..Default::default()
            },
        ];
        save_entries(&mut campaign, &npcs).unwrap();
        let again: Vec<Npc> = entries(&campaign);
        assert_eq!(again, npcs);
    }

    #[test]
    fn test_save_form_appends_when_index_is_stale() {
        let mut campaign = campaign();
        let ops = ops(TrackerKind::Npcs);

        let mut values = FormValues::new();
        values.set_text("name", "Gribbleton");
        let outcome = ops.save_form(&mut campaign, Some(7), &values).unwrap();

        assert!(outcome.created);
        assert_eq!(ops.len(&campaign), 1);
    }

    #[test]
    fn test_delete_out_of_range_is_a_noop() {
        let mut campaign = campaign();
        let ops = ops(TrackerKind::Npcs);
        assert_eq!(ops.delete(&mut campaign, 3).unwrap(), None);
        assert_eq!(ops.len(&campaign), 0);
    }

    #[test]
    fn test_validate_reports_missing_required_field() {
        let ops = ops(TrackerKind::Npcs);
        let values = FormValues::blank(ops.form_spec());
        let err = ops.validate(&values).unwrap_err();
        assert_eq!(err.key, "name");

        let mut values = values;
        values.set_text("name", "  Gribbleton ");
        assert!(ops.validate(&values).is_ok());
    }

    #[test]
    fn test_every_kind_resolves_and_titles_are_distinct() {
        let mut titles: Vec<&str> = TrackerKind::ALL.iter().map(|k| k.title()).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), TrackerKind::ALL.len());
    }

    #[test]
    fn test_document_kinds_report_as_documents() {
        assert!(ops(TrackerKind::MagicItems).is_document());
        assert!(ops(TrackerKind::GameExpectations).is_document());
        assert!(!ops(TrackerKind::Npcs).is_document());
    }
}
