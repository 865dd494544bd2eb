//! Magic item tracker: which items have been handed out, by level band and
//! rarity.
//!
//! The slot holds one document with a fixed structure: four level tiers,
//! each with five rarity shelves, each shelf an ordered list of item names.

use serde::{Deserialize, Serialize};

use super::{DetailField, TrackerDoc};
use crate::form::{FieldKind, FieldSpec, FormSchema, FormValues};

pub const TIER_NAMES: [&str; 4] = [
    "Levels 1-4",
    "Levels 5-10",
    "Levels 11-16",
    "Levels 17-20",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    VeryRare,
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::VeryRare,
        Rarity::Legendary,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::VeryRare => "Very Rare",
            Rarity::Legendary => "Legendary",
        }
    }

    fn form_key(self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::VeryRare => "veryRare",
            Rarity::Legendary => "legendary",
        }
    }
}

/// The five rarity shelves of one tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RarityShelves {
    #[serde(rename = "Common")]
    pub common: Vec<String>,
    #[serde(rename = "Uncommon")]
    pub uncommon: Vec<String>,
    #[serde(rename = "Rare")]
    pub rare: Vec<String>,
    #[serde(rename = "Very Rare")]
    pub very_rare: Vec<String>,
    #[serde(rename = "Legendary")]
    pub legendary: Vec<String>,
}

impl RarityShelves {
    pub fn get(&self, rarity: Rarity) -> &Vec<String> {
        match rarity {
            Rarity::Common => &self.common,
            Rarity::Uncommon => &self.uncommon,
            Rarity::Rare => &self.rare,
            Rarity::VeryRare => &self.very_rare,
            Rarity::Legendary => &self.legendary,
        }
    }

    pub fn get_mut(&mut self, rarity: Rarity) -> &mut Vec<String> {
        match rarity {
            Rarity::Common => &mut self.common,
            Rarity::Uncommon => &mut self.uncommon,
            Rarity::Rare => &mut self.rare,
            Rarity::VeryRare => &mut self.very_rare,
            Rarity::Legendary => &mut self.legendary,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagicItemTier {
    pub name: String,
    pub rarities: RarityShelves,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagicItemTracker {
    pub tiers: Vec<MagicItemTier>,
}

impl Default for MagicItemTracker {
    fn default() -> Self {
        Self {
            tiers: TIER_NAMES
                .iter()
                .map(|name| MagicItemTier {
                    name: name.to_string(),
                    rarities: RarityShelves::default(),
                })
                .collect(),
        }
    }
}

// One Lines field per tier/rarity shelf; the form edits the whole document.
const FORM: &[FieldSpec] = &[
    FieldSpec::new("tier0.common", "Common (Levels 1-4)", FieldKind::Lines),
    FieldSpec::new("tier0.uncommon", "Uncommon (Levels 1-4)", FieldKind::Lines),
    FieldSpec::new("tier0.rare", "Rare (Levels 1-4)", FieldKind::Lines),
    FieldSpec::new("tier0.veryRare", "Very Rare (Levels 1-4)", FieldKind::Lines),
    FieldSpec::new("tier0.legendary", "Legendary (Levels 1-4)", FieldKind::Lines),
    FieldSpec::new("tier1.common", "Common (Levels 5-10)", FieldKind::Lines),
    FieldSpec::new("tier1.uncommon", "Uncommon (Levels 5-10)", FieldKind::Lines),
    FieldSpec::new("tier1.rare", "Rare (Levels 5-10)", FieldKind::Lines),
    FieldSpec::new("tier1.veryRare", "Very Rare (Levels 5-10)", FieldKind::Lines),
    FieldSpec::new("tier1.legendary", "Legendary (Levels 5-10)", FieldKind::Lines),
    FieldSpec::new("tier2.common", "Common (Levels 11-16)", FieldKind::Lines),
    FieldSpec::new("tier2.uncommon", "Uncommon (Levels 11-16)", FieldKind::Lines),
    FieldSpec::new("tier2.rare", "Rare (Levels 11-16)", FieldKind::Lines),
    FieldSpec::new("tier2.veryRare", "Very Rare (Levels 11-16)", FieldKind::Lines),
    FieldSpec::new("tier2.legendary", "Legendary (Levels 11-16)", FieldKind::Lines),
    FieldSpec::new("tier3.common", "Common (Levels 17-20)", FieldKind::Lines),
    FieldSpec::new("tier3.uncommon", "Uncommon (Levels 17-20)", FieldKind::Lines),
    FieldSpec::new("tier3.rare", "Rare (Levels 17-20)", FieldKind::Lines),
    FieldSpec::new("tier3.veryRare", "Very Rare (Levels 17-20)", FieldKind::Lines),
    FieldSpec::new("tier3.legendary", "Legendary (Levels 17-20)", FieldKind::Lines),
];

fn shelf_key(tier: usize, rarity: Rarity) -> String {
    format!("tier{}.{}", tier, rarity.form_key())
}

impl FormSchema for MagicItemTracker {
    fn form_spec() -> &'static [FieldSpec] {
        FORM
    }

    fn to_form(&self) -> FormValues {
        let mut values = FormValues::new();
        for (i, tier) in self.tiers.iter().enumerate().take(TIER_NAMES.len()) {
            for rarity in Rarity::ALL {
                values.set_lines(shelf_key(i, rarity), tier.rarities.get(rarity));
            }
        }
        values
    }

    fn from_form(values: &FormValues) -> Self {
        let mut tracker = Self::default();
        for (i, tier) in tracker.tiers.iter_mut().enumerate() {
            for rarity in Rarity::ALL {
                // `lines` drops blank names, so empty rows never persist.
                *tier.rarities.get_mut(rarity) = values.lines(&shelf_key(i, rarity));
            }
        }
        tracker
    }
}

impl TrackerDoc for MagicItemTracker {
    const SLOT: &'static str = "magicItemTrackerData";
    const TITLE: &'static str = "Magic Item Tracker";

    fn overview(&self) -> Vec<DetailField> {
        let mut fields = Vec::new();
        for tier in &self.tiers {
            for rarity in Rarity::ALL {
                let items = tier.rarities.get(rarity);
                let label = format!("{} ({}): {}", rarity.label(), tier.name, items.len());
                fields.push(DetailField::plain(label, items.join("\n")));
            }
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_structure_has_four_tiers() {
        let tracker = MagicItemTracker::default();
        assert_eq!(tracker.tiers.len(), 4);
        assert_eq!(tracker.tiers[0].name, "Levels 1-4");
        assert!(tracker.tiers[3].rarities.legendary.is_empty());
    }

    #[test]
    fn test_wire_rarity_keys_keep_spaces() {
        let mut tracker = MagicItemTracker::default();
        tracker.tiers[1].rarities.very_rare.push("Staff of Power".to_string());
        let value = serde_json::to_value(&tracker).unwrap();
        assert_eq!(
            value["tiers"][1]["rarities"]["Very Rare"],
            serde_json::json!(["Staff of Power"])
        );
    }

    #[test]
    fn test_form_round_trip_drops_blank_names() {
        let mut tracker = MagicItemTracker::default();
        tracker.tiers[0].rarities.common.push("Potion of Healing".to_string());

        let mut values = tracker.to_form();
        values.set_text("tier0.common", "Potion of Healing\n\n  \nDriftglobe");

        let rebuilt = MagicItemTracker::from_form(&values);
        assert_eq!(
            rebuilt.tiers[0].rarities.common,
            vec!["Potion of Healing", "Driftglobe"]
        );
    }

    #[test]
    fn test_overview_counts_items() {
        let mut tracker = MagicItemTracker::default();
        tracker.tiers[0].rarities.common.push("Driftglobe".to_string());
        let fields = tracker.overview();
        assert_eq!(fields.len(), 20);
        assert_eq!(fields[0].label, "Common (Levels 1-4): 1");
    }
}
