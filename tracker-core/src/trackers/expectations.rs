//! Game expectations: the campaign's session-zero sheet.
//!
//! Unlike the list trackers this slot holds one document per campaign;
//! editing replaces the whole sheet.

use serde::{Deserialize, Serialize};

use super::{DetailField, TrackerDoc};
use crate::form::{FieldKind, FieldSpec, FormSchema, FormValues};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SensitiveElement {
    pub desc: String,
    pub hard_limit: bool,
    pub soft_limit: bool,
}

const SENSITIVE_FORM: &[FieldSpec] = &[
    FieldSpec::new("desc", "Element description", FieldKind::Text),
    FieldSpec::new("hardLimit", "Hard Limit", FieldKind::Flag),
    FieldSpec::new("softLimit", "Soft Limit", FieldKind::Flag),
];

impl FormSchema for SensitiveElement {
    fn form_spec() -> &'static [FieldSpec] {
        SENSITIVE_FORM
    }

    fn to_form(&self) -> FormValues {
        let mut values = FormValues::new();
        values.set_text("desc", &self.desc);
        values.set_flag("hardLimit", self.hard_limit);
        values.set_flag("softLimit", self.soft_limit);
        values
    }

    fn from_form(values: &FormValues) -> Self {
        Self {
            desc: values.text("desc").trim().to_string(),
            hard_limit: values.flag("hardLimit"),
            soft_limit: values.flag("softLimit"),
        }
    }
}

impl SensitiveElement {
    /// "desc [Hard, Soft]" as shown in the overview.
    fn display_line(&self) -> String {
        let limits = match (self.hard_limit, self.soft_limit) {
            (true, true) => "[Hard, Soft]",
            (true, false) => "[Hard]",
            (false, true) => "[Soft]",
            (false, false) => "[]",
        };
        format!("{} {}", self.desc, limits)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameExpectations {
    pub dm_name: String,
    pub game_theme: String,
    pub sensitive: Vec<SensitiveElement>,
    pub hopes: String,
    pub concerns: String,
}

const FORM: &[FieldSpec] = &[
    FieldSpec::new("dmName", "DM Name", FieldKind::Text),
    FieldSpec::new("gameTheme", "Game Theme and Flavor", FieldKind::Multiline),
    FieldSpec::new(
        "sensitive",
        "Potentially Sensitive Elements",
        FieldKind::Group(SENSITIVE_FORM),
    ),
    FieldSpec::new("hopes", "Player's Hopes and Expectations", FieldKind::Multiline),
    FieldSpec::new("concerns", "At-the-Table Concerns", FieldKind::Multiline),
];

impl FormSchema for GameExpectations {
    fn form_spec() -> &'static [FieldSpec] {
        FORM
    }

    fn to_form(&self) -> FormValues {
        let mut values = FormValues::new();
        values.set_text("dmName", &self.dm_name);
        values.set_text("gameTheme", &self.game_theme);
        values.set_group(
            "sensitive",
            self.sensitive.iter().map(FormSchema::to_form).collect(),
        );
        values.set_text("hopes", &self.hopes);
        values.set_text("concerns", &self.concerns);
        values
    }

    fn from_form(values: &FormValues) -> Self {
        Self {
            dm_name: values.text("dmName").trim().to_string(),
            game_theme: values.text("gameTheme").trim().to_string(),
            sensitive: values
                .group("sensitive")
                .iter()
                .map(SensitiveElement::from_form)
                .collect(),
            hopes: values.text("hopes").trim().to_string(),
            concerns: values.text("concerns").trim().to_string(),
        }
    }
}

impl TrackerDoc for GameExpectations {
    const SLOT: &'static str = "gameExpectationsData";
    const TITLE: &'static str = "Game Expectations";

    fn overview(&self) -> Vec<DetailField> {
        let sensitive = self
            .sensitive
            .iter()
            .map(SensitiveElement::display_line)
            .collect::<Vec<_>>()
            .join("\n");
        vec![
            DetailField::plain("DM Name", &self.dm_name),
            DetailField::plain("Game Theme and Flavor", &self.game_theme),
            DetailField::plain("Potentially Sensitive Elements", sensitive),
            DetailField::plain("Player's Hopes and Expectations", &self.hopes),
            DetailField::plain("At-the-Table Concerns", &self.concerns),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensitive_elements_round_trip() {
        let sheet = GameExpectations {
            dm_name: "Robin".to_string(),
            sensitive: vec![SensitiveElement {
                desc: "Spiders".to_string(),
                hard_limit: true,
                soft_limit: false,
            }],
            ..Default::default()
        };
        assert_eq!(GameExpectations::from_form(&sheet.to_form()), sheet);
    }

    #[test]
    fn test_limit_display() {
        let both = SensitiveElement {
            desc: "Heights".to_string(),
            hard_limit: true,
            soft_limit: true,
        };
        assert_eq!(both.display_line(), "Heights [Hard, Soft]");

        let soft = SensitiveElement {
            desc: "Storms".to_string(),
            soft_limit: true,
            ..Default::default()
        };
        assert_eq!(soft.display_line(), "Storms [Soft]");
    }

    #[test]
    fn test_wire_names() {
        let element = SensitiveElement {
            desc: "x".to_string(),
            hard_limit: true,
            soft_limit: false,
        };
        let value = serde_json::to_value(&element).unwrap();
        assert_eq!(value["hardLimit"], true);
        assert_eq!(value["softLimit"], false);
    }
}
