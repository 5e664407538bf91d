//! Editable K3 program tree: program → sections (sasaran) → items → months/docs.

use super::month_vector::MonthVector;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("section {0} does not exist")]
    SectionOutOfRange(usize),
    #[error("item {1} does not exist in section {0}")]
    ItemOutOfRange(usize, usize),
    #[error("document row {2} does not exist for item {1} in section {0}")]
    DocOutOfRange(usize, usize, usize),
    #[error("sections and items of a saved program cannot be changed here")]
    StructureLocked,
}

/// Monthly evidence attached to one work item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRow {
    /// 1..=12
    pub month: u8,
    pub plan_note: Option<String>,
    pub actual_note: Option<String>,
    pub evidence: Option<String>,
}

impl Default for DocumentRow {
    fn default() -> Self {
        Self {
            month: 1,
            plan_note: None,
            actual_note: None,
            evidence: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ItemDraft {
    /// Server id, only known in edit mode
    pub id: Option<i64>,
    pub title: String,
    pub pic: String,
    pub plan: MonthVector,
    pub actual: MonthVector,
    pub docs: Vec<DocumentRow>,
}

impl ItemDraft {
    /// Share of planned months that were realised, in percent.
    pub fn realization_pct(&self) -> Option<f64> {
        let planned = self.plan.count();
        if planned == 0 {
            return None;
        }
        let done = (0..12)
            .filter(|&i| self.plan.is_set(i) && self.actual.is_set(i))
            .count();
        Some(done as f64 * 100.0 / planned as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionDraft {
    pub id: Option<i64>,
    pub title: String,
    /// Raw input text, coerced to a number on submit
    pub target_pct: String,
    pub items: Vec<ItemDraft>,
}

impl Default for SectionDraft {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            target_pct: "100".to_string(),
            items: vec![ItemDraft::default()],
        }
    }
}

impl SectionDraft {
    /// Average realisation over items that have at least one planned month.
    pub fn realization_pct(&self) -> Option<f64> {
        let values: Vec<f64> = self
            .items
            .iter()
            .filter_map(ItemDraft::realization_pct)
            .collect();
        if values.is_empty() {
            None
        } else {
            Some(values.iter().sum::<f64>() / values.len() as f64)
        }
    }
}

/// Root of the creation/edit wizard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramDraft {
    pub id: Option<i64>,
    pub uuid: Option<Uuid>,
    pub year: i32,
    pub entity_code: String,
    pub plant_code: String,
    pub target_description: Option<String>,
    pub sections: Vec<SectionDraft>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionPatch {
    pub title: Option<String>,
    pub target_pct: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub title: Option<String>,
    pub pic: Option<String>,
    pub plan: Option<MonthVector>,
    pub actual: Option<MonthVector>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocPatch {
    pub month: Option<u8>,
    pub plan_note: Option<Option<String>>,
    pub actual_note: Option<Option<String>>,
    pub evidence: Option<Option<String>>,
}

impl ProgramDraft {
    /// Fresh draft with one blank section, as the wizard shows it on mount.
    pub fn new(year: i32) -> Self {
        Self {
            id: None,
            uuid: None,
            year,
            entity_code: String::new(),
            plant_code: String::new(),
            target_description: None,
            sections: vec![SectionDraft::default()],
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }

    // === Lookup ===

    pub fn section(&self, s: usize) -> Result<&SectionDraft, DraftError> {
        self.sections.get(s).ok_or(DraftError::SectionOutOfRange(s))
    }

    fn section_mut(&mut self, s: usize) -> Result<&mut SectionDraft, DraftError> {
        self.sections
            .get_mut(s)
            .ok_or(DraftError::SectionOutOfRange(s))
    }

    pub fn item(&self, s: usize, i: usize) -> Result<&ItemDraft, DraftError> {
        self.section(s)?
            .items
            .get(i)
            .ok_or(DraftError::ItemOutOfRange(s, i))
    }

    fn item_mut(&mut self, s: usize, i: usize) -> Result<&mut ItemDraft, DraftError> {
        self.section_mut(s)?
            .items
            .get_mut(i)
            .ok_or(DraftError::ItemOutOfRange(s, i))
    }

    fn doc_mut(&mut self, s: usize, i: usize, d: usize) -> Result<&mut DocumentRow, DraftError> {
        self.item_mut(s, i)?
            .docs
            .get_mut(d)
            .ok_or(DraftError::DocOutOfRange(s, i, d))
    }

    // === Structure ===

    pub fn add_section(&mut self) -> usize {
        self.sections.push(SectionDraft::default());
        self.sections.len() - 1
    }

    /// Removing the last section is allowed here; the review UI guards it.
    pub fn remove_section(&mut self, s: usize) -> Result<SectionDraft, DraftError> {
        if s >= self.sections.len() {
            return Err(DraftError::SectionOutOfRange(s));
        }
        Ok(self.sections.remove(s))
    }

    pub fn add_item(&mut self, s: usize) -> Result<usize, DraftError> {
        let section = self.section_mut(s)?;
        section.items.push(ItemDraft::default());
        Ok(section.items.len() - 1)
    }

    pub fn remove_item(&mut self, s: usize, i: usize) -> Result<ItemDraft, DraftError> {
        let section = self.section_mut(s)?;
        if i >= section.items.len() {
            return Err(DraftError::ItemOutOfRange(s, i));
        }
        Ok(section.items.remove(i))
    }

    pub fn add_doc(&mut self, s: usize, i: usize, month: u8) -> Result<usize, DraftError> {
        let item = self.item_mut(s, i)?;
        item.docs.push(DocumentRow {
            month: month.clamp(1, 12),
            ..DocumentRow::default()
        });
        Ok(item.docs.len() - 1)
    }

    pub fn remove_doc(&mut self, s: usize, i: usize, d: usize) -> Result<DocumentRow, DraftError> {
        let item = self.item_mut(s, i)?;
        if d >= item.docs.len() {
            return Err(DraftError::DocOutOfRange(s, i, d));
        }
        Ok(item.docs.remove(d))
    }

    // === Partial updates ===

    pub fn mutate_section(&mut self, s: usize, patch: SectionPatch) -> Result<(), DraftError> {
        let section = self.section_mut(s)?;
        if let Some(title) = patch.title {
            section.title = title;
        }
        if let Some(target_pct) = patch.target_pct {
            section.target_pct = target_pct;
        }
        Ok(())
    }

    pub fn mutate_item(&mut self, s: usize, i: usize, patch: ItemPatch) -> Result<(), DraftError> {
        let item = self.item_mut(s, i)?;
        if let Some(title) = patch.title {
            item.title = title;
        }
        if let Some(pic) = patch.pic {
            item.pic = pic;
        }
        if let Some(plan) = patch.plan {
            item.plan = plan;
        }
        if let Some(actual) = patch.actual {
            item.actual = actual;
        }
        Ok(())
    }

    pub fn mutate_doc(
        &mut self,
        s: usize,
        i: usize,
        d: usize,
        patch: DocPatch,
    ) -> Result<(), DraftError> {
        let doc = self.doc_mut(s, i, d)?;
        if let Some(month) = patch.month {
            doc.month = month.clamp(1, 12);
        }
        if let Some(plan_note) = patch.plan_note {
            doc.plan_note = plan_note;
        }
        if let Some(actual_note) = patch.actual_note {
            doc.actual_note = actual_note;
        }
        if let Some(evidence) = patch.evidence {
            doc.evidence = evidence;
        }
        Ok(())
    }

    // === Month helpers ===

    pub fn toggle_plan(&mut self, s: usize, i: usize, month_index: usize) -> Result<(), DraftError> {
        let item = self.item_mut(s, i)?;
        item.plan = item.plan.toggle(month_index);
        Ok(())
    }

    pub fn toggle_actual(
        &mut self,
        s: usize,
        i: usize,
        month_index: usize,
    ) -> Result<(), DraftError> {
        let item = self.item_mut(s, i)?;
        item.actual = item.actual.toggle(month_index);
        Ok(())
    }

    pub fn quarter_toggle_plan(
        &mut self,
        s: usize,
        i: usize,
        quarter: &[usize],
    ) -> Result<(), DraftError> {
        let item = self.item_mut(s, i)?;
        item.plan = item.plan.set_quarter_toggle(quarter);
        Ok(())
    }

    pub fn set_all_plan(&mut self, s: usize, i: usize, value: bool) -> Result<(), DraftError> {
        let item = self.item_mut(s, i)?;
        item.plan = item.plan.set_range(&super::month_vector::ALL_MONTHS, value);
        Ok(())
    }

    /// Header fields required before the wizard may leave its first step.
    pub fn validate_header(&self) -> Result<(), Vec<(&'static str, String)>> {
        let mut errors = Vec::new();
        if !(2000..=2100).contains(&self.year) {
            errors.push(("year", "Tahun tidak valid".to_string()));
        }
        if self.entity_code.trim().is_empty() {
            errors.push(("entity_code", "Entitas wajib dipilih".to_string()));
        }
        if self.plant_code.trim().is_empty() {
            errors.push(("plant_code", "Plant wajib dipilih".to_string()));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_k3_program::month_vector::Q1;

    fn titled(title: &str) -> ItemDraft {
        ItemDraft {
            title: title.to_string(),
            ..ItemDraft::default()
        }
    }

    fn two_section_draft() -> ProgramDraft {
        let mut draft = ProgramDraft::new(2026);
        draft.sections[0].items = vec![titled("a"), titled("b"), titled("c"), titled("d")];
        draft.add_section();
        draft.sections[1].items = vec![titled("x")];
        draft
    }

    #[test]
    fn test_new_draft_has_one_blank_section() {
        let draft = ProgramDraft::new(2026);
        assert_eq!(draft.sections.len(), 1);
        assert_eq!(draft.sections[0].items.len(), 1);
        assert!(!draft.is_persisted());
    }

    #[test]
    fn test_remove_item_reindexes_and_keeps_siblings() {
        let mut draft = two_section_draft();
        let sibling_before = draft.sections[1].clone();

        let removed = draft.remove_item(0, 1).unwrap();
        assert_eq!(removed.title, "b");

        let titles: Vec<&str> = draft.sections[0]
            .items
            .iter()
            .map(|i| i.title.as_str())
            .collect();
        assert_eq!(titles, vec!["a", "c", "d"]);
        assert_eq!(draft.sections[1], sibling_before);
    }

    #[test]
    fn test_out_of_range_leaves_tree_untouched() {
        let mut draft = two_section_draft();
        let before = draft.clone();
        assert_eq!(draft.remove_item(0, 9), Err(DraftError::ItemOutOfRange(0, 9)));
        assert_eq!(draft.add_item(5), Err(DraftError::SectionOutOfRange(5)));
        assert_eq!(
            draft.remove_doc(0, 0, 0),
            Err(DraftError::DocOutOfRange(0, 0, 0))
        );
        assert_eq!(draft, before);
    }

    #[test]
    fn test_remove_last_section_is_allowed() {
        let mut draft = ProgramDraft::new(2026);
        assert!(draft.remove_section(0).is_ok());
        assert!(draft.sections.is_empty());
    }

    #[test]
    fn test_mutate_item_is_shallow_merge() {
        let mut draft = two_section_draft();
        draft.sections[0].items[2].pic = "HSE".to_string();
        draft
            .mutate_item(
                0,
                2,
                ItemPatch {
                    title: Some("Inspeksi rutin".to_string()),
                    ..ItemPatch::default()
                },
            )
            .unwrap();
        let item = &draft.sections[0].items[2];
        assert_eq!(item.title, "Inspeksi rutin");
        assert_eq!(item.pic, "HSE");
        assert_eq!(draft.sections[0].items[1].title, "b");
    }

    #[test]
    fn test_docs_crud() {
        let mut draft = ProgramDraft::new(2026);
        assert_eq!(draft.add_doc(0, 0, 3).unwrap(), 0);
        assert_eq!(draft.add_doc(0, 0, 3).unwrap(), 1);
        assert_eq!(draft.add_doc(0, 0, 40).unwrap(), 2);
        assert_eq!(draft.sections[0].items[0].docs[2].month, 12);

        draft
            .mutate_doc(
                0,
                0,
                1,
                DocPatch {
                    plan_note: Some(Some("SOP".to_string())),
                    ..DocPatch::default()
                },
            )
            .unwrap();
        assert_eq!(draft.sections[0].items[0].docs[1].plan_note.as_deref(), Some("SOP"));

        draft.remove_doc(0, 0, 0).unwrap();
        assert_eq!(draft.sections[0].items[0].docs.len(), 2);
        assert_eq!(draft.sections[0].items[0].docs[0].plan_note.as_deref(), Some("SOP"));
    }

    #[test]
    fn test_month_helpers() {
        let mut draft = ProgramDraft::new(2026);
        draft.toggle_plan(0, 0, 0).unwrap();
        draft.quarter_toggle_plan(0, 0, &Q1).unwrap();
        assert_eq!(draft.sections[0].items[0].plan.count(), 3);
        draft.quarter_toggle_plan(0, 0, &Q1).unwrap();
        assert!(draft.sections[0].items[0].plan.all_false());
        draft.set_all_plan(0, 0, true).unwrap();
        assert_eq!(draft.sections[0].items[0].plan.count(), 12);
    }

    #[test]
    fn test_realization_pct() {
        let mut item = ItemDraft::default();
        assert_eq!(item.realization_pct(), None);
        item.plan = item.plan.set_range(&[0, 1, 2, 3], true);
        item.actual = item.actual.set_range(&[0, 5], true);
        assert_eq!(item.realization_pct(), Some(25.0));

        let section = SectionDraft {
            items: vec![item, ItemDraft::default()],
            ..SectionDraft::default()
        };
        assert_eq!(section.realization_pct(), Some(25.0));
    }

    #[test]
    fn test_validate_header() {
        let mut draft = ProgramDraft::new(2026);
        let errors = draft.validate_header().unwrap_err();
        assert_eq!(errors.len(), 2);
        draft.entity_code = "ENT01".to_string();
        draft.plant_code = "PLT01".to_string();
        assert!(draft.validate_header().is_ok());
    }
}
