//! Campaign journal: one entry per play session.
//!
//! The journal is the one tracker with a display order that differs from
//! storage order: newest session first, by session number, falling back to
//! session date; entries without a session number sort last.

use std::cmp::Ordering;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{DetailField, ListRow, TrackerEntry};
use crate::form::{FieldKind, FieldSpec, FormSchema, FormValues};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JournalEntry {
    /// Older exports stored this as a string; decoded leniently.
    #[serde(
        deserialize_with = "lenient_session_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub session_number: Option<u32>,
    /// ISO date string (YYYY-MM-DD), so lexicographic order is date order.
    pub session_date: String,
    pub session_title: String,
    pub earlier_events: String,
    pub planned_summary: String,
    pub notes: String,
}

fn lenient_session_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().map(|n| n as u32),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

const FORM: &[FieldSpec] = &[
    FieldSpec::required("sessionNumber", "Session Number", FieldKind::Number),
    FieldSpec::new("sessionDate", "Session Date", FieldKind::Date),
    FieldSpec::new("sessionTitle", "Session/Adventure Title", FieldKind::Text),
    FieldSpec::new(
        "earlierEvents",
        "Important Events from Earlier Sessions",
        FieldKind::Multiline,
    ),
    FieldSpec::new(
        "plannedSummary",
        "Planned Summary for This Session",
        FieldKind::Multiline,
    ),
    FieldSpec::new("notes", "Additional Notes", FieldKind::Multiline),
];

impl FormSchema for JournalEntry {
    fn form_spec() -> &'static [FieldSpec] {
        FORM
    }

    fn to_form(&self) -> FormValues {
        let mut values = FormValues::new();
        let number = self
            .session_number
            .map(|n| n.to_string())
            .unwrap_or_default();
        values.set_text("sessionNumber", number);
        values.set_text("sessionDate", &self.session_date);
        values.set_text("sessionTitle", &self.session_title);
        values.set_text("earlierEvents", &self.earlier_events);
        values.set_text("plannedSummary", &self.planned_summary);
        values.set_text("notes", &self.notes);
        values
    }

    fn from_form(values: &FormValues) -> Self {
        Self {
            session_number: values.text("sessionNumber").trim().parse().ok(),
            session_date: values.text("sessionDate").trim().to_string(),
            session_title: values.text("sessionTitle").trim().to_string(),
            earlier_events: values.text("earlierEvents").trim().to_string(),
            planned_summary: values.text("plannedSummary").trim().to_string(),
            notes: values.text("notes").trim().to_string(),
        }
    }
}

impl TrackerEntry for JournalEntry {
    const SLOT: &'static str = "campaignJournal";
    const TITLE: &'static str = "Campaign Journal";
    const NOUN: &'static str = "Session Log";

    fn title_of(&self) -> String {
        match self.session_number {
            Some(number) => format!("Session {number}"),
            None if !self.session_title.is_empty() => self.session_title.clone(),
            None => "Session ?".to_string(),
        }
    }

    fn summary(&self) -> ListRow {
        ListRow {
            title: self.title_of(),
            tag: self.session_date.clone(),
            meta: self.session_title.clone(),
        }
    }

    fn detail(&self) -> Vec<DetailField> {
        let number = self
            .session_number
            .map(|n| n.to_string())
            .unwrap_or_default();
        vec![
            DetailField::plain("Session Number", number),
            DetailField::plain("Session Date", &self.session_date),
            DetailField::plain("Session/Adventure Title", &self.session_title),
            DetailField::markdown("Important Events from Earlier Sessions", &self.earlier_events),
            DetailField::markdown("Planned Summary for This Session", &self.planned_summary),
            DetailField::markdown("Additional Notes", &self.notes),
        ]
    }

    fn display_order(entries: &[Self]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..entries.len()).collect();
        order.sort_by(|&a, &b| {
            let (left, right) = (&entries[a], &entries[b]);
            match (left.session_number, right.session_number) {
                (Some(x), Some(y)) => y
                    .cmp(&x)
                    .then_with(|| right.session_date.cmp(&left.session_date)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => right.session_date.cmp(&left.session_date),
            }
        });
        order
    }

    fn blank_form(entries: &[Self]) -> FormValues {
        let mut values = FormValues::blank(Self::form_spec());
        values.set_text("sessionNumber", (entries.len() + 1).to_string());
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(number: Option<u32>, date: &str) -> JournalEntry {
        JournalEntry {
            session_number: number,
            session_date: date.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_sessions_sort_newest_first() {
        let entries = vec![
            session(Some(3), ""),
            session(Some(1), ""),
            session(Some(2), ""),
        ];
        let order = JournalEntry::display_order(&entries);
        let numbers: Vec<u32> = order
            .iter()
            .map(|&i| entries[i].session_number.unwrap())
            .collect();
        assert_eq!(numbers, vec![3, 2, 1]);
    }

    #[test]
    fn test_equal_session_numbers_fall_back_to_date() {
        let entries = vec![
            session(Some(2), "2026-01-04"),
            session(Some(2), "2026-02-11"),
        ];
        let order = JournalEntry::display_order(&entries);
        assert_eq!(order, vec![1, 0]);
    }

    #[test]
    fn test_missing_session_numbers_sort_last() {
        let entries = vec![
            session(None, "2026-03-01"),
            session(Some(1), "2025-01-01"),
            session(None, "2026-04-01"),
        ];
        let order = JournalEntry::display_order(&entries);
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_string_session_numbers_decode() {
        let entry: JournalEntry =
            serde_json::from_str(r#"{"sessionNumber":"12","sessionDate":"2026-05-02"}"#).unwrap();
        assert_eq!(entry.session_number, Some(12));

        let entry: JournalEntry = serde_json::from_str(r#"{"sessionNumber":7}"#).unwrap();
        assert_eq!(entry.session_number, Some(7));

        let entry: JournalEntry = serde_json::from_str(r#"{"sessionNumber":"n/a"}"#).unwrap();
        assert_eq!(entry.session_number, None);
    }

    #[test]
    fn test_blank_form_numbers_the_next_session() {
        let existing = vec![session(Some(1), ""), session(Some(2), "")];
        let values = JournalEntry::blank_form(&existing);
        assert_eq!(values.text("sessionNumber"), "3");
    }
}
