//! Settlement tracker.

use serde::{Deserialize, Serialize};

use super::{DetailField, ListRow, TrackerEntry};
use crate::form::{FieldKind, FieldSpec, FormSchema, FormValues};

pub const SETTLEMENT_SIZES: &[&str] = &["Village", "Town", "City"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settlement {
    pub name: String,
    pub size: String,
    pub local_leader: String,
    #[serde(rename = "trait")]
    pub defining_trait: String,
    pub fame: String,
    pub calamity: String,
    pub people: String,
    pub places: String,
    pub gp_value: String,
}

const FORM: &[FieldSpec] = &[
    FieldSpec::required("name", "Name", FieldKind::Text),
    FieldSpec::new("size", "Size", FieldKind::Select(SETTLEMENT_SIZES)),
    FieldSpec::new("localLeader", "Local Leader", FieldKind::Text),
    FieldSpec::new("gpValue", "GP Value of Item for Sale", FieldKind::Text),
    FieldSpec::new("trait", "Defining Trait", FieldKind::Multiline),
    FieldSpec::new("fame", "Claim to Fame", FieldKind::Multiline),
    FieldSpec::new("calamity", "Current Calamity", FieldKind::Multiline),
    FieldSpec::new("people", "Noteworthy People", FieldKind::Multiline),
    FieldSpec::new("places", "Noteworthy Places", FieldKind::Multiline),
];

impl FormSchema for Settlement {
    fn form_spec() -> &'static [FieldSpec] {
        FORM
    }

    fn to_form(&self) -> FormValues {
        let mut values = FormValues::new();
        values.set_text("name", &self.name);
        values.set_text("size", &self.size);
        values.set_text("localLeader", &self.local_leader);
        values.set_text("gpValue", &self.gp_value);
        values.set_text("trait", &self.defining_trait);
        values.set_text("fame", &self.fame);
        values.set_text("calamity", &self.calamity);
        values.set_text("people", &self.people);
        values.set_text("places", &self.places);
        values
    }

    fn from_form(values: &FormValues) -> Self {
        Self {
            name: values.text("name").trim().to_string(),
            size: values.text("size").trim().to_string(),
            local_leader: values.text("localLeader").trim().to_string(),
            gp_value: values.text("gpValue").trim().to_string(),
            defining_trait: values.text("trait").trim().to_string(),
            fame: values.text("fame").trim().to_string(),
            calamity: values.text("calamity").trim().to_string(),
            people: values.text("people").trim().to_string(),
            places: values.text("places").trim().to_string(),
        }
    }
}

impl TrackerEntry for Settlement {
    const SLOT: &'static str = "settlements";
    const TITLE: &'static str = "Settlement Tracker";
    const NOUN: &'static str = "Settlement";

    fn title_of(&self) -> String {
        if self.name.is_empty() {
            "(Unnamed Settlement)".to_string()
        } else {
            self.name.clone()
        }
    }

    fn summary(&self) -> ListRow {
        ListRow {
            title: self.title_of(),
            tag: self.size.clone(),
            meta: format!("Leader: {}", self.local_leader),
        }
    }

    fn detail(&self) -> Vec<DetailField> {
        vec![
            DetailField::plain("Name", &self.name),
            DetailField::plain("Size", &self.size),
            DetailField::plain("Local Leader", &self.local_leader),
            DetailField::plain("GP Value of Item for Sale", &self.gp_value),
            DetailField::plain("Defining Trait", &self.defining_trait),
            DetailField::plain("Claim to Fame", &self.fame),
            DetailField::plain("Current Calamity", &self.calamity),
            DetailField::plain("Noteworthy People", &self.people),
            DetailField::plain("Noteworthy Places", &self.places),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_wire_name() {
        let settlement = Settlement {
            name: "Phandalin".to_string(),
            defining_trait: "Frontier mining town".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&settlement).unwrap();
        assert_eq!(value["trait"], "Frontier mining town");
        assert!(value.get("definingTrait").is_none());
    }

    #[test]
    fn test_blank_form_defaults_to_village() {
        let values = FormValues::blank(Settlement::form_spec());
        assert_eq!(values.text("size"), "Village");
    }
}
