//! Server validation messages re-attached to draft fields.

use crate::shared::field_errors::{split_path, FieldErrors, PathSegment};
use std::collections::HashMap;

/// Where in the draft a message belongs
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorSlot {
    Header(String),
    Section { section: usize, field: String },
    Item { section: usize, item: usize, field: String },
    Doc { section: usize, item: usize, doc: usize, field: String },
    Other(String),
}

impl ErrorSlot {
    pub fn from_path(path: &str) -> Self {
        use PathSegment::{Index, Key};

        let segments = split_path(path);
        match segments.as_slice() {
            [Key(field)] => ErrorSlot::Header(field.clone()),
            [Key(s), Index(section), Key(field)] if s == "sections" => ErrorSlot::Section {
                section: *section,
                field: field.clone(),
            },
            [Key(s), Index(section), Key(i), Index(item), Key(field)]
                if s == "sections" && i == "items" =>
            {
                ErrorSlot::Item {
                    section: *section,
                    item: *item,
                    field: wire_to_draft_field(field).to_string(),
                }
            }
            [Key(s), Index(section), Key(i), Index(item), Key(d), Index(doc), Key(field)]
                if s == "sections" && i == "items" && d == "docs" =>
            {
                ErrorSlot::Doc {
                    section: *section,
                    item: *item,
                    doc: *doc,
                    field: field.clone(),
                }
            }
            _ => ErrorSlot::Other(path.to_string()),
        }
    }
}

/// Wire names differ from draft names for the month vectors
fn wire_to_draft_field(field: &str) -> &str {
    match field {
        "plan_m" | "plan_flags" => "plan",
        "actual_m" | "actual_flags" => "actual",
        other => other,
    }
}

/// Per-field messages for the wizard, plus a free-form list for anything
/// that could not be placed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftErrors {
    slots: HashMap<ErrorSlot, String>,
}

impl DraftErrors {
    pub fn from_field_errors(errors: &FieldErrors) -> Self {
        let slots = errors
            .iter()
            .map(|(path, message)| (ErrorSlot::from_path(path), message.to_string()))
            .collect();
        Self { slots }
    }

    pub fn from_header_checks(errors: &[(&'static str, String)]) -> Self {
        let slots = errors
            .iter()
            .map(|(field, message)| (ErrorSlot::Header(field.to_string()), message.clone()))
            .collect();
        Self { slots }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn header(&self, field: &str) -> Option<&str> {
        self.slots
            .get(&ErrorSlot::Header(field.to_string()))
            .map(String::as_str)
    }

    pub fn section(&self, section: usize, field: &str) -> Option<&str> {
        self.slots
            .get(&ErrorSlot::Section {
                section,
                field: field.to_string(),
            })
            .map(String::as_str)
    }

    pub fn item(&self, section: usize, item: usize, field: &str) -> Option<&str> {
        self.slots
            .get(&ErrorSlot::Item {
                section,
                item,
                field: field.to_string(),
            })
            .map(String::as_str)
    }

    pub fn doc(&self, section: usize, item: usize, doc: usize, field: &str) -> Option<&str> {
        self.slots
            .get(&ErrorSlot::Doc {
                section,
                item,
                doc,
                field: field.to_string(),
            })
            .map(String::as_str)
    }

    /// Messages that have no field slot in the wizard, sorted for display
    pub fn unplaced(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .slots
            .iter()
            .filter_map(|(slot, message)| match slot {
                ErrorSlot::Other(path) => Some(format!("{}: {}", path, message)),
                _ => None,
            })
            .collect();
        out.sort();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_from_path() {
        assert_eq!(ErrorSlot::from_path("year"), ErrorSlot::Header("year".into()));
        assert_eq!(
            ErrorSlot::from_path("sections.1.target_pct"),
            ErrorSlot::Section {
                section: 1,
                field: "target_pct".into()
            }
        );
        assert_eq!(
            ErrorSlot::from_path("sections.0.items.2.plan_m"),
            ErrorSlot::Item {
                section: 0,
                item: 2,
                field: "plan".into()
            }
        );
        assert_eq!(
            ErrorSlot::from_path("sections.0.items.2.docs.3.month"),
            ErrorSlot::Doc {
                section: 0,
                item: 2,
                doc: 3,
                field: "month".into()
            }
        );
        assert_eq!(
            ErrorSlot::from_path("items.0.quantity"),
            ErrorSlot::Other("items.0.quantity".into())
        );
    }

    #[test]
    fn test_draft_errors_lookup() {
        let mut fields = FieldErrors::new();
        fields.insert("entity_code", "Entitas wajib diisi");
        fields.insert("sections.0.items.1.title", "Judul wajib diisi");
        fields.insert("items.0.quantity", "Jumlah wajib diisi");

        let errors = DraftErrors::from_field_errors(&fields);
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.header("entity_code"), Some("Entitas wajib diisi"));
        assert_eq!(errors.item(0, 1, "title"), Some("Judul wajib diisi"));
        assert_eq!(errors.item(0, 0, "title"), None);
        assert_eq!(errors.unplaced(), vec!["items.0.quantity: Jumlah wajib diisi"]);
    }
}
