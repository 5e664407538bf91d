//! Wizard state: draft tree + stepper + last known field errors.

use super::draft::{DraftError, ProgramDraft};
use super::errors::DraftErrors;
use super::hydrate::hydrate;
use crate::shared::stepper::{Stepper, CREATE_STEPS, EDIT_STEPS};
use serde_json::Value;

pub const STEP_HEADER: usize = 1;
pub const STEP_TARGETS: usize = 2;
pub const STEP_ITEMS: usize = 3;
pub const STEP_MONTHLY: usize = 4;
pub const STEP_DOCS: usize = 5;
pub const STEP_REVIEW: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardMode {
    /// Whole tree sent in one request at the end
    Create,
    /// Leaves saved incrementally against an existing program
    Edit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    pub mode: WizardMode,
    pub draft: ProgramDraft,
    pub stepper: Stepper,
    pub errors: DraftErrors,
}

impl WizardState {
    pub fn create(year: i32) -> Self {
        Self {
            mode: WizardMode::Create,
            draft: ProgramDraft::new(year),
            stepper: Stepper::new(&CREATE_STEPS),
            errors: DraftErrors::default(),
        }
    }

    pub fn edit(envelope: &Value) -> Self {
        Self {
            mode: WizardMode::Edit,
            draft: hydrate(envelope),
            stepper: Stepper::new(&EDIT_STEPS),
            errors: DraftErrors::default(),
        }
    }

    pub fn step(&self) -> usize {
        self.stepper.current()
    }

    /// Advance one step. Leaving the header step requires a valid header;
    /// on failure the errors are kept and the step does not change.
    pub fn next(&mut self) -> bool {
        if self.stepper.current() == STEP_HEADER {
            if let Err(errors) = self.draft.validate_header() {
                self.errors = DraftErrors::from_header_checks(&errors);
                return false;
            }
            self.errors = DraftErrors::default();
        }
        let before = self.stepper.current();
        self.stepper.next();
        self.stepper.current() != before
    }

    pub fn back(&mut self) {
        self.stepper.back();
    }

    /// Sections, items and planned documents only travel in the create
    /// request; edit mode has no endpoint for them.
    pub fn structure_editable(&self) -> bool {
        self.mode == WizardMode::Create
    }

    /// Apply a structural edit, refused with the tree untouched in edit mode.
    pub fn edit_structure<F>(&mut self, f: F) -> Result<(), DraftError>
    where
        F: FnOnce(&mut ProgramDraft) -> Result<(), DraftError>,
    {
        if !self.structure_editable() {
            return Err(DraftError::StructureLocked);
        }
        f(&mut self.draft)
    }

    pub fn can_remove_section(&self) -> bool {
        self.structure_editable() && self.draft.sections.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_header_gate_on_first_step() {
        let mut wizard = WizardState::create(2026);
        assert!(!wizard.next());
        assert_eq!(wizard.step(), STEP_HEADER);
        assert!(wizard.errors.header("entity_code").is_some());

        wizard.draft.entity_code = "ENT01".into();
        wizard.draft.plant_code = "PLT01".into();
        assert!(wizard.next());
        assert_eq!(wizard.step(), STEP_TARGETS);
        assert!(wizard.errors.is_empty());
    }

    #[test]
    fn test_no_gate_after_first_step() {
        let mut wizard = WizardState::create(2026);
        wizard.draft.entity_code = "ENT01".into();
        wizard.draft.plant_code = "PLT01".into();
        wizard.next();
        wizard.draft.entity_code.clear();
        while wizard.next() {}
        assert_eq!(wizard.step(), STEP_REVIEW);
        wizard.back();
        assert_eq!(wizard.step(), STEP_DOCS);
    }

    #[test]
    fn test_edit_mode_from_envelope() {
        let wizard = WizardState::edit(&json!({
            "id": 1,
            "year": 2026,
            "sections": [{"title": "A"}, {"title": "B"}]
        }));
        assert_eq!(wizard.mode, WizardMode::Edit);
        assert_eq!(wizard.stepper.labels()[3], "Rencana & Realisasi");
        assert!(!wizard.structure_editable());
        assert!(!wizard.can_remove_section());
    }

    #[test]
    fn test_edit_mode_refuses_structural_edits() {
        let mut wizard = WizardState::edit(&json!({
            "id": 1,
            "year": 2026,
            "sections": [{"id": 10, "title": "A", "items": [{"id": 100, "title": "APAR"}]}]
        }));
        let before = wizard.draft.clone();

        let added = wizard.edit_structure(|d| {
            d.add_section();
            Ok(())
        });
        assert_eq!(added, Err(DraftError::StructureLocked));
        assert_eq!(
            wizard.edit_structure(|d| d.add_item(0).map(|_| ())),
            Err(DraftError::StructureLocked)
        );
        assert_eq!(
            wizard.edit_structure(|d| d.remove_item(0, 0).map(|_| ())),
            Err(DraftError::StructureLocked)
        );
        assert_eq!(wizard.draft, before);
    }

    #[test]
    fn test_create_mode_allows_structural_edits() {
        let mut wizard = WizardState::create(2026);
        assert!(!wizard.can_remove_section());
        wizard
            .edit_structure(|d| {
                d.add_section();
                Ok(())
            })
            .unwrap();
        assert_eq!(wizard.draft.sections.len(), 2);
        assert!(wizard.can_remove_section());
    }
}
