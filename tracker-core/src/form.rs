//! Form schemas and values.
//!
//! Tracker descriptors declare their edit forms as static [`FieldSpec`]
//! tables; the frontend's one generic form engine renders them and hands
//! back [`FormValues`]. Nested record lists (travel stages, bastion
//! facilities, sensitive elements) nest as [`FieldKind::Group`] sub-forms.

use indexmap::IndexMap;

/// How a form field is edited and displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text.
    Text,
    /// Free text, markdown-capable.
    Multiline,
    /// Numeric text (validated leniently; stored as text until applied).
    Number,
    /// ISO date string (YYYY-MM-DD).
    Date,
    /// One of a fixed option list.
    Select(&'static [&'static str]),
    /// Boolean toggle.
    Flag,
    /// A list of short strings, one per line.
    Lines,
    /// A list of nested records edited through a sub-form.
    Group(&'static [FieldSpec]),
}

/// One field in a form schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            required: false,
        }
    }

    pub const fn required(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            required: true,
        }
    }
}

/// A single field's value.
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Text(String),
    Flag(bool),
    Group(Vec<FormValues>),
}

/// Ordered key/value state for one form (or one sub-form row).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues(IndexMap<String, FormValue>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank values for a spec: empty text, first select option, unset
    /// flags, empty groups.
    pub fn blank(spec: &[FieldSpec]) -> Self {
        let mut values = Self::new();
        for field in spec {
            match field.kind {
                FieldKind::Flag => values.set_flag(field.key, false),
                FieldKind::Group(_) => values.set_group(field.key, Vec::new()),
                FieldKind::Select(options) => {
                    values.set_text(field.key, options.first().copied().unwrap_or(""))
                }
                _ => values.set_text(field.key, ""),
            }
        }
        values
    }

    pub fn get(&self, key: &str) -> Option<&FormValue> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut FormValue> {
        self.0.get_mut(key)
    }

    pub fn set_text(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), FormValue::Text(value.into()));
    }

    pub fn set_flag(&mut self, key: impl Into<String>, value: bool) {
        self.0.insert(key.into(), FormValue::Flag(value));
    }

    pub fn set_group(&mut self, key: impl Into<String>, rows: Vec<FormValues>) {
        self.0.insert(key.into(), FormValue::Group(rows));
    }

    /// Store a string list as newline-joined text (the `Lines` encoding).
    pub fn set_lines(&mut self, key: impl Into<String>, items: &[String]) {
        self.set_text(key, items.join("\n"));
    }

    /// Text value of a field; empty string when absent or not text.
    pub fn text(&self, key: &str) -> &str {
        match self.0.get(key) {
            Some(FormValue::Text(value)) => value,
            _ => "",
        }
    }

    pub fn flag(&self, key: &str) -> bool {
        matches!(self.0.get(key), Some(FormValue::Flag(true)))
    }

    pub fn group(&self, key: &str) -> &[FormValues] {
        match self.0.get(key) {
            Some(FormValue::Group(rows)) => rows,
            _ => &[],
        }
    }

    /// Non-empty trimmed lines of a `Lines` field.
    pub fn lines(&self, key: &str) -> Vec<String> {
        self.text(key)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect()
    }
}

/// Conversion between a record and its form representation.
pub trait FormSchema: Clone + Default {
    /// The record's form layout.
    fn form_spec() -> &'static [FieldSpec];

    /// Seed form values from an existing record (copy-on-open).
    fn to_form(&self) -> FormValues;

    /// Build a record from submitted values. Text fields are trimmed here,
    /// matching what the persisted document is allowed to contain.
    fn from_form(values: &FormValues) -> Self;
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEC: &[FieldSpec] = &[
        FieldSpec::required("name", "Name", FieldKind::Text),
        FieldSpec::new("pace", "Pace", FieldKind::Select(&["Fast", "Normal", "Slow"])),
        FieldSpec::new("done", "Done", FieldKind::Flag),
        FieldSpec::new("items", "Items", FieldKind::Lines),
    ];

    #[test]
    fn test_blank_values_follow_field_kinds() {
        let values = FormValues::blank(SPEC);
        assert_eq!(values.text("name"), "");
        assert_eq!(values.text("pace"), "Fast");
        assert!(!values.flag("done"));
        assert!(values.lines("items").is_empty());
    }

    #[test]
    fn test_lines_drops_blank_entries() {
        let mut values = FormValues::new();
        values.set_text("items", "sword\n\n  shield  \n");
        assert_eq!(values.lines("items"), vec!["sword", "shield"]);
    }

    #[test]
    fn test_missing_keys_read_as_empty() {
        let values = FormValues::new();
        assert_eq!(values.text("nope"), "");
        assert!(!values.flag("nope"));
        assert!(values.group("nope").is_empty());
    }
}
