//! Bastion tracker: player strongholds and their special facilities.

use serde::{Deserialize, Serialize};

use super::{DetailField, ListRow, TrackerEntry};
use crate::form::{FieldKind, FieldSpec, FormSchema, FormValues};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Facility {
    pub facility_name: String,
    pub space: String,
    pub order: String,
    pub hirelings: String,
    pub notes: String,
}

const FACILITY_FORM: &[FieldSpec] = &[
    FieldSpec::new("facilityName", "Name/Type", FieldKind::Text),
    FieldSpec::new("space", "Space", FieldKind::Text),
    FieldSpec::new("order", "Order Built", FieldKind::Number),
    FieldSpec::new("hirelings", "Hirelings", FieldKind::Multiline),
    FieldSpec::new("notes", "Notes", FieldKind::Multiline),
];

impl FormSchema for Facility {
    fn form_spec() -> &'static [FieldSpec] {
        FACILITY_FORM
    }

    fn to_form(&self) -> FormValues {
        let mut values = FormValues::new();
        values.set_text("facilityName", &self.facility_name);
        values.set_text("space", &self.space);
        values.set_text("order", &self.order);
        values.set_text("hirelings", &self.hirelings);
        values.set_text("notes", &self.notes);
        values
    }

    fn from_form(values: &FormValues) -> Self {
        Self {
            facility_name: values.text("facilityName").trim().to_string(),
            space: values.text("space").trim().to_string(),
            order: values.text("order").trim().to_string(),
            hirelings: values.text("hirelings").trim().to_string(),
            notes: values.text("notes").trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Bastion {
    pub bastion_name: String,
    pub character_name: String,
    pub level: String,
    pub facilities: Vec<Facility>,
    pub basic_facilities: String,
    pub defenders: String,
}

const FORM: &[FieldSpec] = &[
    FieldSpec::required("bastionName", "Bastion's Name", FieldKind::Text),
    FieldSpec::new("characterName", "Character's Name (Owner)", FieldKind::Text),
    FieldSpec::new("level", "Level", FieldKind::Number),
    FieldSpec::new("facilities", "Special Facilities", FieldKind::Group(FACILITY_FORM)),
    FieldSpec::new(
        "basicFacilities",
        "Basic Facilities (e.g., Walls, Gate)",
        FieldKind::Multiline,
    ),
    FieldSpec::new(
        "defenders",
        "Bastion Defenders (e.g., Guards, Traps)",
        FieldKind::Multiline,
    ),
];

impl FormSchema for Bastion {
    fn form_spec() -> &'static [FieldSpec] {
        FORM
    }

    fn to_form(&self) -> FormValues {
        let mut values = FormValues::new();
        values.set_text("bastionName", &self.bastion_name);
        values.set_text("characterName", &self.character_name);
        values.set_text("level", &self.level);
        values.set_group(
            "facilities",
            self.facilities.iter().map(FormSchema::to_form).collect(),
        );
        values.set_text("basicFacilities", &self.basic_facilities);
        values.set_text("defenders", &self.defenders);
        values
    }

    fn from_form(values: &FormValues) -> Self {
        Self {
            bastion_name: values.text("bastionName").trim().to_string(),
            character_name: values.text("characterName").trim().to_string(),
            level: values.text("level").trim().to_string(),
            facilities: values
                .group("facilities")
                .iter()
                .map(Facility::from_form)
                .collect(),
            basic_facilities: values.text("basicFacilities").trim().to_string(),
            defenders: values.text("defenders").trim().to_string(),
        }
    }
}

impl TrackerEntry for Bastion {
    const SLOT: &'static str = "bastions";
    const TITLE: &'static str = "Bastion Tracker";
    const NOUN: &'static str = "Bastion";

    fn title_of(&self) -> String {
        if self.bastion_name.is_empty() {
            "(Unnamed Bastion)".to_string()
        } else {
            self.bastion_name.clone()
        }
    }

    fn summary(&self) -> ListRow {
        ListRow {
            title: self.title_of(),
            tag: self.character_name.clone(),
            meta: format!(
                "Level: {} | Facilities: {} special",
                self.level,
                self.facilities.len()
            ),
        }
    }

    fn detail(&self) -> Vec<DetailField> {
        let mut fields = vec![
            DetailField::plain("Bastion Name", &self.bastion_name),
            DetailField::plain("Character", &self.character_name),
            DetailField::plain("Level", &self.level),
        ];
        for facility in &self.facilities {
            let name = if facility.facility_name.is_empty() {
                "Unnamed Facility"
            } else {
                &facility.facility_name
            };
            let value = format!(
                "Space: {} | Order: {}\nHirelings: {}\nNotes: {}",
                facility.space, facility.order, facility.hirelings, facility.notes
            );
            fields.push(DetailField::plain(format!("Facility: {name}"), value));
        }
        fields.push(DetailField::plain("Basic Facilities", &self.basic_facilities));
        fields.push(DetailField::plain("Bastion Defenders", &self.defenders));
        fields
    }

    fn blank_form(entries: &[Self]) -> FormValues {
        let _ = entries;
        let mut values = FormValues::blank(Self::form_spec());
        values.set_text("level", "1");
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_form_defaults_level_to_one() {
        let values = Bastion::blank_form(&[]);
        assert_eq!(values.text("level"), "1");
    }

    #[test]
    fn test_facilities_round_trip_through_form() {
        let bastion = Bastion {
            bastion_name: "Ravenwatch Keep".to_string(),
            character_name: "Seris".to_string(),
            level: "9".to_string(),
            facilities: vec![Facility {
                facility_name: "Smithy".to_string(),
                space: "1".to_string(),
                order: "2".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(Bastion::from_form(&bastion.to_form()), bastion);
    }

    #[test]
    fn test_summary_counts_facilities() {
        let bastion = Bastion {
            bastion_name: "Tower".to_string(),
            level: "5".to_string(),
            facilities: vec![Facility::default(); 2],
            ..Default::default()
        };
        assert_eq!(bastion.summary().meta, "Level: 5 | Facilities: 2 special");
    }
}
