//! ViewModel for the K3 program details / approval page

use crate::domain::a001_k3_program::api::HttpProgramApi;
use contracts::domain::a001_k3_program::api::{load_program, submit_verify, LoadedProgram};
use contracts::domain::a001_k3_program::approval::{can_edit, can_verify, ApprovalStatus, Stage};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy)]
pub struct ProgramDetailsVm {
    pub id: i64,
    pub program: RwSignal<Option<LoadedProgram>>,
    pub verify_note: RwSignal<String>,

    // === UI State ===
    pub loading: RwSignal<bool>,
    pub verifying: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub success: RwSignal<Option<String>>,
}

impl ProgramDetailsVm {
    pub fn new(id: i64) -> Self {
        let vm = Self {
            id,
            program: RwSignal::new(None),
            verify_note: RwSignal::new(String::new()),
            loading: RwSignal::new(false),
            verifying: RwSignal::new(false),
            error: RwSignal::new(None),
            success: RwSignal::new(None),
        };
        vm.load();
        vm
    }

    // === Derived signals ===

    pub fn stage(&self) -> Signal<Stage> {
        let program = self.program;
        Signal::derive(move || {
            program.with(|p| p.as_ref().map(|p| p.stage).unwrap_or(Stage::Unknown))
        })
    }

    pub fn can_verify(&self) -> Signal<bool> {
        let program = self.program;
        Signal::derive(move || {
            program.with(|p| {
                p.as_ref()
                    .map(|p| can_verify(p.viewer_role, p.stage))
                    .unwrap_or(false)
            })
        })
    }

    pub fn can_edit(&self) -> Signal<bool> {
        let program = self.program;
        Signal::derive(move || {
            program.with(|p| {
                p.as_ref()
                    .map(|p| can_edit(p.viewer_role, p.stage))
                    .unwrap_or(false)
            })
        })
    }

    // === Data loading ===

    pub fn load(&self) {
        let this = *self;
        this.loading.set(true);
        this.error.set(None);

        spawn_local(async move {
            match load_program(&HttpProgramApi, this.id).await {
                Ok(loaded) => {
                    log::info!(
                        "details: program {} stage={:?} role={:?}",
                        this.id,
                        loaded.stage,
                        loaded.viewer_role
                    );
                    this.program.set(Some(loaded));
                }
                Err(e) => {
                    log::error!("details: failed to load program {}: {}", this.id, e);
                    this.error.set(Some(e));
                }
            }
            this.loading.set(false);
        });
    }

    // === Commands ===

    pub fn verify(&self, status: ApprovalStatus) {
        let uuid = self
            .program
            .with_untracked(|p| p.as_ref().and_then(|p| p.draft.uuid));
        let note = self.verify_note.get_untracked();
        let this = *self;
        this.verifying.set(true);
        this.error.set(None);
        this.success.set(None);

        spawn_local(async move {
            let outcome = submit_verify(&HttpProgramApi, uuid, status, &note).await;
            this.verifying.set(false);
            match outcome.message() {
                None => {
                    let text = match status {
                        ApprovalStatus::Approved => "Program disetujui",
                        ApprovalStatus::Rejected => "Program ditolak",
                    };
                    this.success.set(Some(text.to_string()));
                    this.verify_note.set(String::new());
                    // Stage changed on the server
                    this.load();
                }
                Some(message) => {
                    log::warn!("details: verify failed for {}: {}", this.id, message);
                    this.error.set(Some(message));
                }
            }
        });
    }
}
