//! Campaign conflicts: the party's standing antagonists and situations.

use serde::{Deserialize, Serialize};

use super::{DetailField, ListRow, TrackerEntry};
use crate::form::{FieldKind, FieldSpec, FormSchema, FormValues};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Conflict {
    pub title: String,
    pub antagonist: String,
    pub notes: String,
}

const FORM: &[FieldSpec] = &[
    FieldSpec::required("title", "Conflict Title/Identifier", FieldKind::Text),
    FieldSpec::new(
        "antagonist",
        "Adventurers vs. (Antagonist/Situation)",
        FieldKind::Text,
    ),
    FieldSpec::new("notes", "Notes", FieldKind::Multiline),
];

impl FormSchema for Conflict {
    fn form_spec() -> &'static [FieldSpec] {
        FORM
    }

    fn to_form(&self) -> FormValues {
        let mut values = FormValues::new();
        values.set_text("title", &self.title);
        values.set_text("antagonist", &self.antagonist);
        values.set_text("notes", &self.notes);
        values
    }

    fn from_form(values: &FormValues) -> Self {
        Self {
            title: values.text("title").trim().to_string(),
            antagonist: values.text("antagonist").trim().to_string(),
            notes: values.text("notes").trim().to_string(),
        }
    }
}

impl TrackerEntry for Conflict {
    const SLOT: &'static str = "campaignConflicts";
    const TITLE: &'static str = "Campaign Conflicts";
    const NOUN: &'static str = "Conflict";

    fn title_of(&self) -> String {
        if self.title.is_empty() {
            "(No Title)".to_string()
        } else {
            self.title.clone()
        }
    }

    fn summary(&self) -> ListRow {
        let mut meta: String = self.notes.chars().take(80).collect();
        if self.notes.chars().count() > 80 {
            meta.push_str("...");
        }
        ListRow {
            title: self.title_of(),
            tag: format!("vs. {}", self.antagonist),
            meta,
        }
    }

    fn detail(&self) -> Vec<DetailField> {
        vec![
            DetailField::plain("Conflict Title", &self.title),
            DetailField::plain("Antagonist/Situation", &self.antagonist),
            DetailField::plain("Notes", &self.notes),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_truncates_long_notes() {
        let conflict = Conflict {
            title: "The Cult of the Black Sun".to_string(),
            notes: "x".repeat(200),
            ..Default::default()
        };
        let row = conflict.summary();
        assert_eq!(row.meta.chars().count(), 83);
        assert!(row.meta.ends_with("..."));
    }

    #[test]
    fn test_short_notes_untruncated() {
        let conflict = Conflict {
            notes: "brewing".to_string(),
            ..Default::default()
        };
        assert_eq!(conflict.summary().meta, "brewing");
    }
}
