//! NPC tracker: stat-block references and roleplaying notes.

use serde::{Deserialize, Serialize};

use super::{DetailField, ListRow, TrackerEntry};
use crate::form::{FieldKind, FieldSpec, FormSchema, FormValues};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Npc {
    pub name: String,
    pub stat_block: String,
    pub mm_page: String,
    pub alterations: String,
    pub alignment: String,
    pub personality: String,
    pub appearance: String,
    pub secret: String,
}

const FORM: &[FieldSpec] = &[
    FieldSpec::required("name", "NPC Name", FieldKind::Text),
    FieldSpec::new("statBlock", "Stat Block (Source)", FieldKind::Text),
    FieldSpec::new("mmPage", "MM Page", FieldKind::Text),
    FieldSpec::new("alterations", "Stat Block Alterations", FieldKind::Multiline),
    FieldSpec::new("alignment", "Alignment", FieldKind::Text),
    FieldSpec::new("personality", "Personality", FieldKind::Multiline),
    FieldSpec::new("appearance", "Appearance", FieldKind::Multiline),
    FieldSpec::new("secret", "Secret", FieldKind::Multiline),
];

impl FormSchema for Npc {
    fn form_spec() -> &'static [FieldSpec] {
        FORM
    }

    fn to_form(&self) -> FormValues {
        let mut values = FormValues::new();
        values.set_text("name", &self.name);
        values.set_text("statBlock", &self.stat_block);
        values.set_text("mmPage", &self.mm_page);
        values.set_text("alterations", &self.alterations);
        values.set_text("alignment", &self.alignment);
        values.set_text("personality", &self.personality);
        values.set_text("appearance", &self.appearance);
        values.set_text("secret", &self.secret);
        values
    }

    fn from_form(values: &FormValues) -> Self {
        Self {
            name: values.text("name").trim().to_string(),
            stat_block: values.text("statBlock").trim().to_string(),
            mm_page: values.text("mmPage").trim().to_string(),
            alterations: values.text("alterations").trim().to_string(),
            alignment: values.text("alignment").trim().to_string(),
            personality: values.text("personality").trim().to_string(),
            appearance: values.text("appearance").trim().to_string(),
            secret: values.text("secret").trim().to_string(),
        }
    }
}

impl TrackerEntry for Npc {
    const SLOT: &'static str = "npcs";
    const TITLE: &'static str = "NPC Tracker";
    const NOUN: &'static str = "NPC";

    fn title_of(&self) -> String {
        if self.name.is_empty() {
            "(No Name)".to_string()
        } else {
            self.name.clone()
        }
    }

    fn summary(&self) -> ListRow {
        ListRow {
            title: self.title_of(),
            tag: self.stat_block.clone(),
            meta: format!("Alignment: {}", self.alignment),
        }
    }

    fn detail(&self) -> Vec<DetailField> {
        vec![
            DetailField::plain("NPC Name", &self.name),
            DetailField::plain("Stat Block (Source)", &self.stat_block),
            DetailField::plain("MM Page", &self.mm_page),
            DetailField::markdown("Stat Block Alterations", &self.alterations),
            DetailField::plain("Alignment", &self.alignment),
            DetailField::markdown("Personality", &self.personality),
            DetailField::markdown("Appearance", &self.appearance),
            DetailField::markdown("Secret", &self.secret),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let npc = Npc {
            name: "Gribbleton".to_string(),
            stat_block: "Goblin Boss".to_string(),
            mm_page: "166".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&npc).unwrap();
        assert_eq!(value["statBlock"], "Goblin Boss");
        assert_eq!(value["mmPage"], "166");
    }

    #[test]
    fn test_from_form_trims_fields() {
        let mut values = FormValues::new();
        values.set_text("name", "  Gribbleton  ");
        values.set_text("alignment", " NE ");
        let npc = Npc::from_form(&values);
        assert_eq!(npc.name, "Gribbleton");
        assert_eq!(npc.alignment, "NE");
    }

    #[test]
    fn test_partial_record_deserializes_with_defaults() {
        let npc: Npc = serde_json::from_str(r#"{"name":"Mirelda"}"#).unwrap();
        assert_eq!(npc.name, "Mirelda");
        assert_eq!(npc.secret, "");
    }

    #[test]
    fn test_unnamed_npc_gets_placeholder_title() {
        let npc = Npc::default();
        assert_eq!(npc.title_of(), "(No Name)");
    }
}
