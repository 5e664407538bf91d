//! ViewModel for the K3 program wizard (create and edit)

use crate::domain::a001_k3_program::api::HttpProgramApi;
use crate::shared::debounce::{KeyedDebouncer, MONTHLY_PATCH_DELAY_MS};
use chrono::{Datelike, Utc};
use contracts::domain::a001_k3_program::api::{
    submit_create, submit_evidence, submit_header, submit_monthly, ProgramApi, SubmitOutcome,
};
use contracts::domain::a001_k3_program::draft::{
    DocPatch, DraftError, ItemPatch, SectionPatch,
};
use contracts::domain::a001_k3_program::month_vector::QUARTERS;
use contracts::domain::a001_k3_program::payload::{EvidenceForm, EvidenceMode};
use contracts::domain::a001_k3_program::{ProgramDraft, WizardMode, WizardState};
use contracts::shared::coerce::non_empty;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;

/// Text fields of the evidence sub-form. The file itself is read from the
/// `<input type="file">` at submit time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvidenceDraft {
    /// (section, item) the form is open for
    pub target: Option<(usize, usize)>,
    pub month: Option<u8>,
    pub mode: EvidenceMode,
    pub link_url: String,
    pub note: String,
}

/// Keep what the user typed; the payload builders trim and drop blanks.
fn raw_opt(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[derive(Clone, Copy)]
pub struct ProgramWizardVm {
    pub state: RwSignal<WizardState>,

    // === Evidence sub-form (edit mode) ===
    pub evidence: RwSignal<EvidenceDraft>,
    pub evidence_file: NodeRef<html::Input>,

    // === UI State ===
    pub loading: RwSignal<bool>,
    pub submitting: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub success: RwSignal<Option<String>>,

    debouncer: KeyedDebouncer,
}

impl ProgramWizardVm {
    pub fn new(id: Option<i64>) -> Self {
        let state = match id {
            Some(_) => WizardState::edit(&Value::Null),
            None => WizardState::create(Utc::now().year()),
        };
        let vm = Self {
            state: RwSignal::new(state),
            evidence: RwSignal::new(EvidenceDraft::default()),
            evidence_file: NodeRef::new(),
            loading: RwSignal::new(false),
            submitting: RwSignal::new(false),
            error: RwSignal::new(None),
            success: RwSignal::new(None),
            debouncer: KeyedDebouncer::new(MONTHLY_PATCH_DELAY_MS),
        };
        if let Some(id) = id {
            vm.load(id);
        }
        vm
    }

    // === Derived signals ===

    // Structural values are memos so views rebuilt from them do not re-render
    // on every keystroke.

    pub fn mode(&self) -> Memo<WizardMode> {
        let state = self.state;
        Memo::new(move |_| state.with(|s| s.mode))
    }

    pub fn step(&self) -> Memo<usize> {
        let state = self.state;
        Memo::new(move |_| state.with(|s| s.step()))
    }

    pub fn is_first_step(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.stepper.is_first()))
    }

    pub fn is_last_step(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.stepper.is_last()))
    }

    pub fn is_busy(&self) -> Signal<bool> {
        let loading = self.loading;
        let submitting = self.submitting;
        Signal::derive(move || loading.get() || submitting.get())
    }

    pub fn section_count(&self) -> Memo<usize> {
        let state = self.state;
        Memo::new(move |_| state.with(|s| s.draft.sections.len()))
    }

    pub fn item_count(&self, s: usize) -> Memo<usize> {
        let state = self.state;
        Memo::new(move |_| {
            state.with(|st| st.draft.section(s).map(|sec| sec.items.len()).unwrap_or(0))
        })
    }

    pub fn doc_count(&self, s: usize, i: usize) -> Memo<usize> {
        let state = self.state;
        Memo::new(move |_| {
            state.with(|st| st.draft.item(s, i).map(|item| item.docs.len()).unwrap_or(0))
        })
    }

    pub fn can_remove_section(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.can_remove_section()))
    }

    /// Read one value out of the draft, reactively
    pub fn read<T, F>(&self, f: F) -> Signal<T>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(&ProgramDraft) -> T + Send + Sync + 'static,
    {
        let state = self.state;
        Signal::derive(move || state.with(|s| f(&s.draft)))
    }

    pub fn header_error(&self, field: &'static str) -> Signal<Option<String>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.errors.header(field).map(str::to_string)))
    }

    pub fn section_error(&self, s: usize, field: &'static str) -> Signal<Option<String>> {
        let state = self.state;
        Signal::derive(move || state.with(|st| st.errors.section(s, field).map(str::to_string)))
    }

    pub fn item_error(&self, s: usize, i: usize, field: &'static str) -> Signal<Option<String>> {
        let state = self.state;
        Signal::derive(move || state.with(|st| st.errors.item(s, i, field).map(str::to_string)))
    }

    pub fn doc_error(
        &self,
        s: usize,
        i: usize,
        d: usize,
        field: &'static str,
    ) -> Signal<Option<String>> {
        let state = self.state;
        Signal::derive(move || {
            state.with(|st| st.errors.doc(s, i, d, field).map(str::to_string))
        })
    }

    // === Data loading ===

    pub fn load(&self, id: i64) {
        let this = *self;
        this.loading.set(true);
        this.error.set(None);

        spawn_local(async move {
            match HttpProgramApi.fetch_program(id).await {
                Ok(envelope) => {
                    let state = WizardState::edit(&envelope);
                    // Wall-clock base keeps seq increasing across page reloads
                    let base = Utc::now().timestamp_millis().max(0) as u64;
                    for item in state.draft.sections.iter().flat_map(|s| s.items.iter()) {
                        if let Some(item_id) = item.id {
                            this.debouncer.seed(item_id, base);
                        }
                    }
                    log::info!(
                        "wizard: loaded program {} ({} items)",
                        id,
                        state.draft.item_count()
                    );
                    this.state.set(state);
                }
                Err(e) => {
                    log::error!("wizard: failed to load program {}: {}", id, e);
                    this.error.set(Some(e.to_string()));
                }
            }
            this.loading.set(false);
        });
    }

    // === Navigation ===

    pub fn next(&self) {
        let mut moved = false;
        self.state.update(|s| moved = s.next());
        if moved {
            self.error.set(None);
        } else if self.state.with_untracked(|s| s.step()) == 1 {
            self.error
                .set(Some("Lengkapi data header terlebih dahulu".to_string()));
        }
    }

    pub fn back(&self) {
        self.state.update(|s| s.back());
        self.error.set(None);
    }

    // === Draft edits ===

    fn edit(&self, f: impl FnOnce(&mut ProgramDraft) -> Result<(), DraftError>) {
        let mut result = Ok(());
        self.state.update(|s| result = f(&mut s.draft));
        if let Err(e) = result {
            log::warn!("wizard: edit ignored: {}", e);
        }
    }

    /// Sections, items and planned documents: create mode only.
    fn edit_structure(&self, f: impl FnOnce(&mut ProgramDraft) -> Result<(), DraftError>) {
        let mut result = Ok(());
        self.state.update(|s| result = s.edit_structure(f));
        if let Err(e) = result {
            log::warn!("wizard: structural edit ignored: {}", e);
        }
    }

    pub fn structure_editable(&self) -> bool {
        self.state.with_untracked(|s| s.structure_editable())
    }

    pub fn set_year(&self, raw: String) {
        // Unparseable input becomes 0 so the header check reports it
        let year = raw.trim().parse().unwrap_or(0);
        self.edit(|d| {
            d.year = year;
            Ok(())
        });
    }

    pub fn set_entity_code(&self, value: String) {
        self.edit(|d| {
            d.entity_code = value;
            Ok(())
        });
    }

    pub fn set_plant_code(&self, value: String) {
        self.edit(|d| {
            d.plant_code = value;
            Ok(())
        });
    }

    pub fn set_target_description(&self, value: String) {
        self.edit(|d| {
            d.target_description = raw_opt(value);
            Ok(())
        });
    }

    pub fn add_section(&self) {
        self.edit_structure(|d| {
            d.add_section();
            Ok(())
        });
    }

    pub fn remove_section(&self, s: usize) {
        if !self.state.with_untracked(|st| st.can_remove_section()) {
            return;
        }
        self.edit_structure(|d| d.remove_section(s).map(|_| ()));
    }

    pub fn set_section_title(&self, s: usize, title: String) {
        self.edit_structure(|d| {
            d.mutate_section(
                s,
                SectionPatch {
                    title: Some(title),
                    ..SectionPatch::default()
                },
            )
        });
    }

    pub fn set_section_target(&self, s: usize, target_pct: String) {
        self.edit_structure(|d| {
            d.mutate_section(
                s,
                SectionPatch {
                    target_pct: Some(target_pct),
                    ..SectionPatch::default()
                },
            )
        });
    }

    pub fn add_item(&self, s: usize) {
        self.edit_structure(|d| d.add_item(s).map(|_| ()));
    }

    pub fn remove_item(&self, s: usize, i: usize) {
        self.edit_structure(|d| d.remove_item(s, i).map(|_| ()));
    }

    pub fn set_item_title(&self, s: usize, i: usize, title: String) {
        self.edit_structure(|d| {
            d.mutate_item(
                s,
                i,
                ItemPatch {
                    title: Some(title),
                    ..ItemPatch::default()
                },
            )
        });
    }

    pub fn set_item_pic(&self, s: usize, i: usize, pic: String) {
        self.edit_structure(|d| {
            d.mutate_item(
                s,
                i,
                ItemPatch {
                    pic: Some(pic),
                    ..ItemPatch::default()
                },
            )
        });
    }

    pub fn add_doc(&self, s: usize, i: usize) {
        self.edit_structure(|d| d.add_doc(s, i, 1).map(|_| ()));
    }

    pub fn remove_doc(&self, s: usize, i: usize, doc: usize) {
        self.edit_structure(|d| d.remove_doc(s, i, doc).map(|_| ()));
    }

    pub fn patch_doc(&self, s: usize, i: usize, doc: usize, patch: DocPatch) {
        self.edit_structure(|d| d.mutate_doc(s, i, doc, patch));
    }

    pub fn set_doc_month(&self, s: usize, i: usize, doc: usize, raw: String) {
        let Ok(month) = raw.parse::<u8>() else {
            return;
        };
        self.patch_doc(
            s,
            i,
            doc,
            DocPatch {
                month: Some(month),
                ..DocPatch::default()
            },
        );
    }

    pub fn set_doc_plan_note(&self, s: usize, i: usize, doc: usize, value: String) {
        self.patch_doc(
            s,
            i,
            doc,
            DocPatch {
                plan_note: Some(raw_opt(value)),
                ..DocPatch::default()
            },
        );
    }

    pub fn set_doc_evidence(&self, s: usize, i: usize, doc: usize, value: String) {
        self.patch_doc(
            s,
            i,
            doc,
            DocPatch {
                evidence: Some(raw_opt(value)),
                ..DocPatch::default()
            },
        );
    }

    // === Month grids ===

    pub fn toggle_plan(&self, s: usize, i: usize, month: usize) {
        self.edit(|d| d.toggle_plan(s, i, month));
        self.schedule_monthly(s, i);
    }

    pub fn toggle_actual(&self, s: usize, i: usize, month: usize) {
        self.edit(|d| d.toggle_actual(s, i, month));
        self.schedule_monthly(s, i);
    }

    pub fn toggle_quarter(&self, s: usize, i: usize, quarter: usize) {
        let Some(months) = QUARTERS.get(quarter) else {
            return;
        };
        self.edit(|d| d.quarter_toggle_plan(s, i, months));
        self.schedule_monthly(s, i);
    }

    pub fn set_all_plan(&self, s: usize, i: usize, value: bool) {
        self.edit(|d| d.set_all_plan(s, i, value));
        self.schedule_monthly(s, i);
    }

    /// Edit mode only: queue a debounced monthly patch for a persisted item.
    fn schedule_monthly(&self, s: usize, i: usize) {
        // Snapshot now: the last toggle in the window is the one that fires,
        // and it must still go out if the tab closes before then
        let item = self.state.with_untracked(|st| {
            if st.mode != WizardMode::Edit {
                return None;
            }
            st.draft.item(s, i).ok().cloned()
        });
        let Some((item_id, item)) = item.and_then(|item| item.id.map(|id| (id, item))) else {
            return;
        };

        let this = *self;
        self.debouncer.schedule(item_id, move |ticket| async move {
            let outcome = submit_monthly(&HttpProgramApi, &item, ticket.seq).await;
            if !this.debouncer.is_latest(&ticket) {
                log::debug!("wizard: monthly result no longer current item={} seq={}", item_id, ticket.seq);
                return;
            }
            match outcome.message() {
                None => this.error.set(None),
                Some(message) => {
                    log::warn!("wizard: monthly patch failed for item {}: {}", item_id, message);
                    this.error.set(Some(message));
                }
            }
        });
    }

    // === Evidence ===

    pub fn open_evidence(&self, s: usize, i: usize) {
        self.evidence.set(EvidenceDraft {
            target: Some((s, i)),
            ..EvidenceDraft::default()
        });
    }

    pub fn close_evidence(&self) {
        self.evidence.set(EvidenceDraft::default());
    }

    pub fn submit_evidence(&self) {
        let Some((s, i)) = self.evidence.with_untracked(|e| e.target) else {
            return;
        };
        let Some(item) = self
            .state
            .with_untracked(|st| st.draft.item(s, i).ok().cloned())
        else {
            return;
        };
        let file = self
            .evidence_file
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        let form = self.evidence.with_untracked(|e| EvidenceForm {
            month: e.month,
            mode: e.mode,
            link_url: e.link_url.clone(),
            file,
            note: e.note.clone(),
        });

        // Shown in the document list once the server accepts it
        let label = match form.mode {
            EvidenceMode::Link => form.link_url.trim().to_string(),
            EvidenceMode::File => form.file.as_ref().map(|f| f.name()).unwrap_or_default(),
        };
        let month = form.month.unwrap_or(1);
        let note = non_empty(&form.note);

        let this = *self;
        this.submitting.set(true);
        this.error.set(None);
        spawn_local(async move {
            let outcome = submit_evidence(&HttpProgramApi, &item, form).await;
            this.submitting.set(false);
            match outcome.message() {
                None => {
                    log::info!("wizard: evidence saved for item {:?}", item.id);
                    this.edit(|d| {
                        let doc = d.add_doc(s, i, month)?;
                        d.mutate_doc(
                            s,
                            i,
                            doc,
                            DocPatch {
                                actual_note: Some(note),
                                evidence: Some(Some(label)),
                                ..DocPatch::default()
                            },
                        )
                    });
                    this.close_evidence();
                    this.success.set(Some("Bukti berhasil diunggah".to_string()));
                }
                Some(message) => this.error.set(Some(message)),
            }
        });
    }

    // === Commands ===

    fn apply_outcome(&self, outcome: SubmitOutcome) -> bool {
        let message = outcome.message();
        match outcome {
            SubmitOutcome::Rejected(errors) => self.state.update(|s| s.errors = errors),
            SubmitOutcome::Created { .. } | SubmitOutcome::Saved => {
                self.state.update(|s| s.errors = Default::default())
            }
            _ => {}
        }
        match message {
            None => {
                self.error.set(None);
                true
            }
            Some(message) => {
                log::warn!("wizard: submission failed: {}", message);
                self.error.set(Some(message));
                false
            }
        }
    }

    /// Create mode: send the whole tree, then hand the new id to the caller.
    pub fn submit_create(&self, on_created: Callback<i64>) {
        let draft = self.state.with_untracked(|s| s.draft.clone());
        let this = *self;
        this.submitting.set(true);
        this.success.set(None);

        spawn_local(async move {
            let outcome = submit_create(&HttpProgramApi, &draft).await;
            this.submitting.set(false);
            let created = match &outcome {
                SubmitOutcome::Created { id } => Some(*id),
                _ => None,
            };
            if this.apply_outcome(outcome) {
                log::info!("wizard: program created {:?}", created);
                this.success.set(Some("Program K3 berhasil dibuat".to_string()));
                if let Some(Some(id)) = created {
                    on_created.run(id);
                }
            }
        });
    }

    /// Edit mode: save header fields of the existing program.
    pub fn save_header(&self) {
        let draft = self.state.with_untracked(|s| s.draft.clone());
        let this = *self;
        this.submitting.set(true);
        this.success.set(None);

        spawn_local(async move {
            let outcome = submit_header(&HttpProgramApi, &draft).await;
            this.submitting.set(false);
            if this.apply_outcome(outcome) {
                this.success.set(Some("Header tersimpan".to_string()));
            }
        });
    }
}
