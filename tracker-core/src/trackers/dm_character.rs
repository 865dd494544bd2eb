//! DM's character tracker: the table's player characters, from the DM's
//! side of the screen.

use serde::{Deserialize, Serialize};

use super::{DetailField, ListRow, TrackerEntry};
use crate::form::{FieldKind, FieldSpec, FormSchema, FormValues};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DmCharacter {
    pub character_name: String,
    pub player_name: String,
    pub motivations: Vec<String>,
    pub player_expectations: String,
    pub class_name: String,
    pub subclass: String,
    pub level: String,
    pub background: String,
    pub species: String,
    pub alignment: String,
    pub goals: String,
    pub quirks: String,
    pub magic_items: String,
    pub details: String,
    pub family: String,
    pub adventure_ideas: String,
}

const FORM: &[FieldSpec] = &[
    FieldSpec::required("characterName", "Character's Name", FieldKind::Text),
    FieldSpec::new("playerName", "Player's Name", FieldKind::Text),
    FieldSpec::new("motivations", "Player Motivation (one per line)", FieldKind::Lines),
    FieldSpec::new(
        "playerExpectations",
        "Notes on Player Expectations",
        FieldKind::Multiline,
    ),
    FieldSpec::new("className", "Class", FieldKind::Text),
    FieldSpec::new("subclass", "Subclass", FieldKind::Text),
    FieldSpec::new("level", "Level", FieldKind::Number),
    FieldSpec::new("background", "Background", FieldKind::Text),
    FieldSpec::new("species", "Species (Race)", FieldKind::Text),
    FieldSpec::new("alignment", "Alignment", FieldKind::Text),
    FieldSpec::new("goals", "Goals and Ambitions", FieldKind::Multiline),
    FieldSpec::new("quirks", "Quirks and Whims", FieldKind::Multiline),
    FieldSpec::new("magicItems", "Magic Items", FieldKind::Multiline),
    FieldSpec::new("details", "Character Details", FieldKind::Multiline),
    FieldSpec::new("family", "Family, Friends, and Foes", FieldKind::Multiline),
    FieldSpec::new("adventureIdeas", "Adventure Ideas", FieldKind::Multiline),
];

impl FormSchema for DmCharacter {
    fn form_spec() -> &'static [FieldSpec] {
        FORM
    }

    fn to_form(&self) -> FormValues {
        let mut values = FormValues::new();
        values.set_text("characterName", &self.character_name);
        values.set_text("playerName", &self.player_name);
        values.set_lines("motivations", &self.motivations);
        values.set_text("playerExpectations", &self.player_expectations);
        values.set_text("className", &self.class_name);
        values.set_text("subclass", &self.subclass);
        values.set_text("level", &self.level);
        values.set_text("background", &self.background);
        values.set_text("species", &self.species);
        values.set_text("alignment", &self.alignment);
        values.set_text("goals", &self.goals);
        values.set_text("quirks", &self.quirks);
        values.set_text("magicItems", &self.magic_items);
        values.set_text("details", &self.details);
        values.set_text("family", &self.family);
        values.set_text("adventureIdeas", &self.adventure_ideas);
        values
    }

    fn from_form(values: &FormValues) -> Self {
        Self {
            character_name: values.text("characterName").trim().to_string(),
            player_name: values.text("playerName").trim().to_string(),
            motivations: values.lines("motivations"),
            player_expectations: values.text("playerExpectations").trim().to_string(),
            class_name: values.text("className").trim().to_string(),
            subclass: values.text("subclass").trim().to_string(),
            level: values.text("level").trim().to_string(),
            background: values.text("background").trim().to_string(),
            species: values.text("species").trim().to_string(),
            alignment: values.text("alignment").trim().to_string(),
            goals: values.text("goals").trim().to_string(),
            quirks: values.text("quirks").trim().to_string(),
            magic_items: values.text("magicItems").trim().to_string(),
            details: values.text("details").trim().to_string(),
            family: values.text("family").trim().to_string(),
            adventure_ideas: values.text("adventureIdeas").trim().to_string(),
        }
    }
}

impl TrackerEntry for DmCharacter {
    const SLOT: &'static str = "dmCharacters";
    const TITLE: &'static str = "DM's Character Tracker";
    const NOUN: &'static str = "Character";

    fn title_of(&self) -> String {
        if self.character_name.is_empty() {
            "(No Name)".to_string()
        } else {
            self.character_name.clone()
        }
    }

    fn summary(&self) -> ListRow {
        ListRow {
            title: self.title_of(),
            tag: self.player_name.clone(),
            meta: format!("Class: {} Level: {}", self.class_name, self.level),
        }
    }

    fn detail(&self) -> Vec<DetailField> {
        vec![
            DetailField::plain("Character's Name", &self.character_name),
            DetailField::plain("Player's Name", &self.player_name),
            DetailField::plain("Player Motivation", self.motivations.join(", ")),
            DetailField::plain("Notes on Player Expectations", &self.player_expectations),
            DetailField::plain("Class", &self.class_name),
            DetailField::plain("Subclass", &self.subclass),
            DetailField::plain("Level", &self.level),
            DetailField::plain("Background", &self.background),
            DetailField::plain("Species (Race)", &self.species),
            DetailField::plain("Alignment", &self.alignment),
            DetailField::plain("Goals and Ambitions", &self.goals),
            DetailField::plain("Quirks and Whims", &self.quirks),
            DetailField::plain("Magic Items", &self.magic_items),
            DetailField::plain("Character Details", &self.details),
            DetailField::plain("Family, Friends, and Foes", &self.family),
            DetailField::plain("Adventure Ideas", &self.adventure_ideas),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motivations_round_trip_as_lines() {
        let character = DmCharacter {
            character_name: "Seris".to_string(),
            motivations: vec!["Exploration".to_string(), "Loot".to_string()],
            ..Default::default()
        };
        let rebuilt = DmCharacter::from_form(&character.to_form());
        assert_eq!(rebuilt.motivations, vec!["Exploration", "Loot"]);
    }

    #[test]
    fn test_motivations_serialize_as_array() {
        let character = DmCharacter {
            motivations: vec!["Story".to_string()],
            ..Default::default()
        };
        let value = serde_json::to_value(&character).unwrap();
        assert_eq!(value["motivations"], serde_json::json!(["Story"]));
    }
}
