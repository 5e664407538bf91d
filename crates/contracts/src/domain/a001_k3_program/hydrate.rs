//! Edit-mode hydration from the server's program envelope.
//!
//! The envelope is read as untyped JSON: every field may be missing, `null`
//! or carried in a different scalar shape. Nothing here fails; bad input
//! degrades to empty text, `false` flags and empty lists.

use super::draft::{DocumentRow, ItemDraft, ProgramDraft, SectionDraft};
use super::month_vector::ensure12;
use crate::shared::coerce::{ensure_array, non_empty, value_to_i64, value_to_string};
use serde_json::Value;
use uuid::Uuid;

/// Year used when the envelope carries no usable year
pub const FALLBACK_YEAR: i32 = 2000;

pub fn hydrate(envelope: &Value) -> ProgramDraft {
    // Some endpoints wrap the record as {"program": {...}}
    let program = match envelope.get("program") {
        Some(inner) if inner.is_object() => inner,
        _ => envelope,
    };

    let mut sections: Vec<SectionDraft> = ensure_array(&program["sections"])
        .iter()
        .map(hydrate_section)
        .collect();
    if sections.is_empty() {
        sections.push(SectionDraft::default());
    }

    ProgramDraft {
        id: value_to_i64(&program["id"]),
        uuid: program["uuid"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok()),
        year: value_to_i64(&program["year"])
            .and_then(|y| i32::try_from(y).ok())
            .unwrap_or(FALLBACK_YEAR),
        entity_code: value_to_string(&program["entity_code"]),
        plant_code: value_to_string(&program["plant_code"]),
        target_description: non_empty(&value_to_string(&program["target_description"])),
        sections,
    }
}

fn hydrate_section(raw: &Value) -> SectionDraft {
    let target = value_to_string(&raw["target_pct"]);
    SectionDraft {
        id: value_to_i64(&raw["id"]),
        title: value_to_string(&raw["title"]),
        target_pct: if target.is_empty() {
            "0".to_string()
        } else {
            target
        },
        items: ensure_array(&raw["items"]).iter().map(hydrate_item).collect(),
    }
}

fn hydrate_item(raw: &Value) -> ItemDraft {
    ItemDraft {
        id: value_to_i64(&raw["id"]),
        title: value_to_string(&raw["title"]),
        pic: value_to_string(&raw["pic"]),
        plan: ensure12(first_present(raw, &["plan_flags", "plan_m"])),
        actual: ensure12(first_present(raw, &["actual_flags", "actual_m"])),
        docs: ensure_array(&raw["docs"]).iter().map(hydrate_doc).collect(),
    }
}

fn hydrate_doc(raw: &Value) -> DocumentRow {
    let month = value_to_i64(&raw["month"]).unwrap_or(1).clamp(1, 12) as u8;
    DocumentRow {
        month,
        plan_note: non_empty(&value_to_string(&raw["plan_note"])),
        actual_note: non_empty(&value_to_string(&raw["actual_note"])),
        evidence: non_empty(&value_to_string(&raw["evidence"])),
    }
}

fn first_present<'a>(raw: &'a Value, keys: &[&str]) -> &'a Value {
    keys.iter()
        .map(|k| &raw[*k])
        .find(|v| !v.is_null())
        .unwrap_or(&Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hydrate_plan_flags_json_string() {
        let envelope = json!({
            "id": 5,
            "year": 2026,
            "entity_code": "ENT01",
            "plant_code": "PLT01",
            "sections": [{
                "id": 10,
                "title": "Zero accident",
                "target_pct": 100,
                "items": [{
                    "id": 77,
                    "title": "Inspeksi rutin",
                    "pic": "HSE",
                    "plan_flags": "[1,0,1]",
                    "actual_flags": null
                }]
            }]
        });

        let draft = hydrate(&envelope);
        let item = &draft.sections[0].items[0];
        assert_eq!(
            item.plan.as_array(),
            &[true, false, true, false, false, false, false, false, false, false, false, false]
        );
        assert!(item.actual.all_false());
        assert_eq!(item.id, Some(77));
        assert_eq!(draft.sections[0].target_pct, "100");
        assert_eq!(draft.id, Some(5));
    }

    #[test]
    fn test_hydrate_tolerates_missing_collections() {
        let draft = hydrate(&json!({"year": "2025", "sections": null}));
        assert_eq!(draft.year, 2025);
        assert_eq!(draft.sections.len(), 1);

        let draft = hydrate(&json!({"sections": [{"title": "A", "items": null}]}));
        assert!(draft.sections[0].items.is_empty());
        assert_eq!(draft.year, FALLBACK_YEAR);
    }

    #[test]
    fn test_hydrate_garbage_never_panics() {
        for envelope in [json!(null), json!("x"), json!([1, 2]), json!({"sections": "oops"})] {
            let draft = hydrate(&envelope);
            assert_eq!(draft.sections.len(), 1);
        }
    }

    #[test]
    fn test_hydrate_wrapped_program_and_docs() {
        let envelope = json!({
            "program": {
                "uuid": "6f1c1a52-7d1e-4a77-9c2f-1f0e6f4c2b10",
                "target_description": "  ",
                "sections": [{
                    "items": [{
                        "plan_m": [true, true],
                        "docs": [{"month": "14", "evidence": "https://x.test/a.pdf"}]
                    }]
                }]
            }
        });
        let draft = hydrate(&envelope);
        assert!(draft.uuid.is_some());
        assert_eq!(draft.target_description, None);
        let item = &draft.sections[0].items[0];
        assert_eq!(item.plan.count(), 2);
        assert_eq!(item.docs[0].month, 12);
        assert_eq!(item.docs[0].evidence.as_deref(), Some("https://x.test/a.pdf"));
    }
}
