//! ViewModel for a periodic inspection checklist

use crate::domain::a002_inspection::api;
use chrono::Utc;
use contracts::domain::a002_inspection::aggregate::InspectionSummary;
use contracts::domain::a002_inspection::{
    Condition, FollowUp, InspectionChecklist, InspectionKind,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy)]
pub struct InspectionChecklistVm {
    pub checklist: RwSignal<InspectionChecklist>,

    // === UI State ===
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub success: RwSignal<Option<String>>,
}

impl InspectionChecklistVm {
    pub fn new(kind: InspectionKind) -> Self {
        Self {
            checklist: RwSignal::new(InspectionChecklist::for_date(
                kind,
                Utc::now().date_naive(),
            )),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
            success: RwSignal::new(None),
        }
    }

    // === Derived signals ===

    pub fn summary(&self) -> Memo<InspectionSummary> {
        let checklist = self.checklist;
        Memo::new(move |_| checklist.with(|c| c.summary()))
    }

    pub fn row_count(&self) -> Memo<usize> {
        let checklist = self.checklist;
        Memo::new(move |_| checklist.with(|c| c.rows.len()))
    }

    pub fn condition(&self, row: usize) -> Signal<Condition> {
        let checklist = self.checklist;
        Signal::derive(move || {
            checklist.with(|c| c.rows.get(row).map(|r| r.condition).unwrap_or_default())
        })
    }

    pub fn follow_up(&self, row: usize) -> Signal<FollowUp> {
        let checklist = self.checklist;
        Signal::derive(move || {
            checklist.with(|c| c.rows.get(row).map(|r| r.follow_up).unwrap_or_default())
        })
    }

    // === Edits ===

    pub fn set_location(&self, location: String) {
        self.checklist.update(|c| c.location = location);
    }

    pub fn set_month(&self, raw: String) {
        if let Ok(month) = raw.parse::<u8>() {
            self.checklist.update(|c| c.month = month.clamp(1, 12));
        }
    }

    pub fn set_condition(&self, row: usize, condition: Condition) {
        self.checklist.update(|c| {
            if let Some(r) = c.rows.get_mut(row) {
                r.set_condition(condition);
            }
        });
    }

    pub fn set_follow_up(&self, row: usize, follow_up: FollowUp) {
        self.checklist.update(|c| {
            if let Some(r) = c.rows.get_mut(row) {
                r.set_follow_up(follow_up);
            }
        });
    }

    pub fn set_note(&self, row: usize, note: String) {
        self.checklist.update(|c| {
            if let Some(r) = c.rows.get_mut(row) {
                r.note = if note.is_empty() { None } else { Some(note) };
            }
        });
    }

    // === Commands ===

    pub fn submit(&self) {
        let checklist = self.checklist.get_untracked();
        if let Err(msg) = checklist.validate() {
            self.error.set(Some(msg));
            return;
        }

        let this = *self;
        this.saving.set(true);
        this.error.set(None);
        this.success.set(None);

        spawn_local(async move {
            match api::submit_checklist(&checklist).await {
                Ok(()) => {
                    this.success
                        .set(Some(format!("Inspeksi {} tersimpan", checklist.kind.label())));
                }
                Err(e) => {
                    log::error!("inspection: submit failed: {}", e);
                    this.error.set(Some(e.to_string()));
                }
            }
            this.saving.set(false);
        });
    }
}
