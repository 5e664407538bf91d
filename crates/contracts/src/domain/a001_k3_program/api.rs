//! Remote program API seam and the submission commands built on it.
//!
//! The frontend implements [`ProgramApi`] over HTTP; tests use an in-memory
//! fake. Submission commands never touch the draft: on failure the wizard
//! keeps its state and only shows the error.

use super::approval::{ApprovalStatus, Role, Stage, VerifyPayload};
use super::draft::{ItemDraft, ProgramDraft};
use super::errors::DraftErrors;
use super::hydrate::hydrate;
use super::payload::{
    build_create_payload, build_evidence_submission, build_header_payload, build_monthly_patch,
    CreateProgramPayload, EvidenceForm, EvidenceSubmission, HeaderPayload, MonthlyPatch,
};
use crate::shared::api_error::ApiError;
use crate::shared::coerce::{non_empty, value_to_i64, value_to_string};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatedProgram {
    pub id: Option<i64>,
}

impl CreatedProgram {
    pub fn from_value(value: &Value) -> Self {
        let id = value_to_i64(&value["id"]).or_else(|| value_to_i64(&value["data"]["id"]));
        Self { id }
    }
}

/// Operations the wizard and the details page call on the server.
#[allow(async_fn_in_trait)]
pub trait ProgramApi {
    /// Platform file handle for evidence uploads
    type Upload;

    async fn fetch_program(&self, id: i64) -> Result<Value, ApiError>;

    async fn create_program(
        &self,
        payload: &CreateProgramPayload,
    ) -> Result<CreatedProgram, ApiError>;

    async fn update_program_header(&self, id: i64, payload: &HeaderPayload)
        -> Result<(), ApiError>;

    async fn patch_item_monthly(&self, item_id: i64, patch: &MonthlyPatch) -> Result<(), ApiError>;

    async fn submit_item_evidence(
        &self,
        submission: &EvidenceSubmission<Self::Upload>,
    ) -> Result<(), ApiError>;

    async fn verify_program(&self, uuid: Uuid, payload: &VerifyPayload) -> Result<(), ApiError>;
}

/// What the UI should do after a submission
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created { id: Option<i64> },
    Saved,
    /// Stopped locally before any request
    Invalid(String),
    /// Server validation messages placed on draft fields
    Rejected(DraftErrors),
    Failed(String),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Created { .. } | SubmitOutcome::Saved)
    }

    /// Single-line message for the error banner, if any
    pub fn message(&self) -> Option<String> {
        match self {
            SubmitOutcome::Created { .. } | SubmitOutcome::Saved => None,
            SubmitOutcome::Invalid(m) | SubmitOutcome::Failed(m) => Some(m.clone()),
            SubmitOutcome::Rejected(errors) => {
                let mut text = "Periksa kembali isian yang ditandai".to_string();
                let unplaced = errors.unplaced();
                if !unplaced.is_empty() {
                    text.push_str(": ");
                    text.push_str(&unplaced.join("; "));
                }
                Some(text)
            }
        }
    }
}

impl From<ApiError> for SubmitOutcome {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Client(m) => SubmitOutcome::Invalid(m),
            ApiError::Validation(fields) => {
                SubmitOutcome::Rejected(DraftErrors::from_field_errors(&fields))
            }
            ApiError::Transport(_) => SubmitOutcome::Failed(err.to_string()),
        }
    }
}

fn saved(result: Result<(), ApiError>) -> SubmitOutcome {
    match result {
        Ok(()) => SubmitOutcome::Saved,
        Err(e) => e.into(),
    }
}

pub async fn submit_create<A: ProgramApi>(api: &A, draft: &ProgramDraft) -> SubmitOutcome {
    if let Err(errors) = draft.validate_header() {
        return SubmitOutcome::Rejected(DraftErrors::from_header_checks(&errors));
    }
    let payload = build_create_payload(draft);
    match api.create_program(&payload).await {
        Ok(created) => SubmitOutcome::Created { id: created.id },
        Err(e) => e.into(),
    }
}

pub async fn submit_header<A: ProgramApi>(api: &A, draft: &ProgramDraft) -> SubmitOutcome {
    let Some(id) = draft.id else {
        return SubmitOutcome::Invalid("Program belum tersimpan".to_string());
    };
    if let Err(errors) = draft.validate_header() {
        return SubmitOutcome::Rejected(DraftErrors::from_header_checks(&errors));
    }
    saved(api.update_program_header(id, &build_header_payload(draft)).await)
}

pub async fn submit_monthly<A: ProgramApi>(api: &A, item: &ItemDraft, seq: u64) -> SubmitOutcome {
    let Some(item_id) = item.id else {
        return SubmitOutcome::Invalid("Program kerja belum tersimpan".to_string());
    };
    saved(api.patch_item_monthly(item_id, &build_monthly_patch(item, seq)).await)
}

pub async fn submit_evidence<A: ProgramApi>(
    api: &A,
    item: &ItemDraft,
    form: EvidenceForm<A::Upload>,
) -> SubmitOutcome {
    let submission = match build_evidence_submission(item, form) {
        Ok(s) => s,
        Err(e) => return e.into(),
    };
    saved(api.submit_item_evidence(&submission).await)
}

pub async fn submit_verify<A: ProgramApi>(
    api: &A,
    uuid: Option<Uuid>,
    status: ApprovalStatus,
    note: &str,
) -> SubmitOutcome {
    let Some(uuid) = uuid else {
        return SubmitOutcome::Invalid("Program tidak memiliki UUID".to_string());
    };
    saved(api.verify_program(uuid, &VerifyPayload::new(status, note)).await)
}

/// Program plus the workflow facts the details page needs
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedProgram {
    pub draft: ProgramDraft,
    pub stage: Stage,
    pub viewer_role: Role,
    pub note_validator: Option<String>,
}

impl LoadedProgram {
    pub fn from_envelope(envelope: &Value) -> Self {
        let program = match envelope.get("program") {
            Some(inner) if inner.is_object() => inner,
            _ => envelope,
        };
        let stage = [&program["stage"], &program["status"], &envelope["stage"]]
            .into_iter()
            .map(value_to_string)
            .find(|s| !s.is_empty())
            .map(|s| Stage::parse(&s))
            .unwrap_or(Stage::Unknown);
        let role = [&envelope["viewer_role"], &envelope["role"], &program["viewer_role"]]
            .into_iter()
            .map(value_to_string)
            .find(|s| !s.is_empty())
            .map(|s| Role::parse(&s))
            .unwrap_or(Role::Viewer);

        Self {
            draft: hydrate(envelope),
            stage,
            viewer_role: role,
            note_validator: non_empty(&value_to_string(&program["note_validator"])),
        }
    }
}

pub async fn load_program<A: ProgramApi>(api: &A, id: i64) -> Result<LoadedProgram, String> {
    api.fetch_program(id)
        .await
        .map(|envelope| LoadedProgram::from_envelope(&envelope))
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_k3_program::payload::EvidenceMode;
    use crate::shared::field_errors::FieldErrors;
    use futures::executor::block_on;
    use serde_json::json;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeApi {
        calls: RefCell<Vec<String>>,
        fail_with: Option<ApiError>,
        envelope: Value,
    }

    impl FakeApi {
        fn result(&self, call: String) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(call);
            match &self.fail_with {
                Some(e) => Err(e.clone()),
                None => Ok(()),
            }
        }
    }

    impl ProgramApi for FakeApi {
        type Upload = String;

        async fn fetch_program(&self, id: i64) -> Result<Value, ApiError> {
            self.result(format!("fetch {}", id))?;
            Ok(self.envelope.clone())
        }

        async fn create_program(
            &self,
            payload: &CreateProgramPayload,
        ) -> Result<CreatedProgram, ApiError> {
            self.result(format!("create {}", payload.sections.len()))?;
            Ok(CreatedProgram { id: Some(101) })
        }

        async fn update_program_header(
            &self,
            id: i64,
            payload: &HeaderPayload,
        ) -> Result<(), ApiError> {
            self.result(format!("header {} {}", id, payload.year))
        }

        async fn patch_item_monthly(
            &self,
            item_id: i64,
            patch: &MonthlyPatch,
        ) -> Result<(), ApiError> {
            self.result(format!("monthly {} seq={}", item_id, patch.seq))
        }

        async fn submit_item_evidence(
            &self,
            submission: &EvidenceSubmission<String>,
        ) -> Result<(), ApiError> {
            self.result(format!(
                "evidence {} {}",
                submission.item_id,
                submission.mode().as_str()
            ))
        }

        async fn verify_program(&self, uuid: Uuid, payload: &VerifyPayload) -> Result<(), ApiError> {
            self.result(format!("verify {} {:?}", uuid, payload.approval_status))
        }
    }

    fn valid_draft() -> ProgramDraft {
        let mut draft = ProgramDraft::new(2026);
        draft.entity_code = "ENT01".into();
        draft.plant_code = "PLT01".into();
        draft
    }

    #[test]
    fn test_submit_create_success() {
        let api = FakeApi::default();
        let outcome = block_on(submit_create(&api, &valid_draft()));
        assert_eq!(outcome, SubmitOutcome::Created { id: Some(101) });
        assert_eq!(api.calls.borrow().as_slice(), ["create 1"]);
    }

    #[test]
    fn test_submit_create_blocked_by_header_check() {
        let api = FakeApi::default();
        let outcome = block_on(submit_create(&api, &ProgramDraft::new(2026)));
        match outcome {
            SubmitOutcome::Rejected(errors) => assert!(errors.header("plant_code").is_some()),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(api.calls.borrow().is_empty());
    }

    #[test]
    fn test_server_validation_lands_on_fields() {
        let mut fields = FieldErrors::new();
        fields.insert("sections.0.items.0.title", "Judul wajib diisi");
        let api = FakeApi {
            fail_with: Some(ApiError::Validation(fields)),
            ..FakeApi::default()
        };
        let draft = valid_draft();
        let before = draft.clone();
        let outcome = block_on(submit_create(&api, &draft));
        match &outcome {
            SubmitOutcome::Rejected(errors) => {
                assert_eq!(errors.item(0, 0, "title"), Some("Judul wajib diisi"))
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(outcome.message().is_some());
        assert_eq!(draft, before);
    }

    #[test]
    fn test_transport_failure_is_reported() {
        let api = FakeApi {
            fail_with: Some(ApiError::transport("HTTP 500")),
            ..FakeApi::default()
        };
        let mut draft = valid_draft();
        draft.id = Some(3);
        let outcome = block_on(submit_header(&api, &draft));
        assert_eq!(
            outcome,
            SubmitOutcome::Failed("Terjadi kesalahan: HTTP 500".to_string())
        );
    }

    #[test]
    fn test_submit_monthly_needs_item_id() {
        let api = FakeApi::default();
        let outcome = block_on(submit_monthly(&api, &ItemDraft::default(), 1));
        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));

        let item = ItemDraft {
            id: Some(8),
            ..ItemDraft::default()
        };
        assert_eq!(block_on(submit_monthly(&api, &item, 5)), SubmitOutcome::Saved);
        assert_eq!(api.calls.borrow().as_slice(), ["monthly 8 seq=5"]);
    }

    #[test]
    fn test_submit_evidence_client_check_skips_request() {
        let api = FakeApi::default();
        let item = ItemDraft {
            id: Some(8),
            ..ItemDraft::default()
        };
        let outcome = block_on(submit_evidence(&api, &item, EvidenceForm::default()));
        assert_eq!(
            outcome,
            SubmitOutcome::Invalid("Pilih bulan terlebih dahulu".to_string())
        );
        assert!(api.calls.borrow().is_empty());

        let form = EvidenceForm {
            month: Some(2),
            mode: EvidenceMode::File,
            file: Some("foto.jpg".to_string()),
            ..EvidenceForm::default()
        };
        assert_eq!(block_on(submit_evidence(&api, &item, form)), SubmitOutcome::Saved);
        assert_eq!(api.calls.borrow().as_slice(), ["evidence 8 file"]);
    }

    #[test]
    fn test_submit_verify() {
        let api = FakeApi::default();
        let outcome = block_on(submit_verify(&api, None, ApprovalStatus::Approved, ""));
        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));

        let uuid = Uuid::new_v4();
        let outcome = block_on(submit_verify(&api, Some(uuid), ApprovalStatus::Approved, "ok"));
        assert!(outcome.is_success());
    }

    #[test]
    fn test_load_program_reads_workflow_facts() {
        let api = FakeApi {
            envelope: json!({
                "viewer_role": "validator",
                "program": {"id": 4, "status": "verification", "sections": []}
            }),
            ..FakeApi::default()
        };
        let loaded = block_on(load_program(&api, 4)).unwrap();
        assert_eq!(loaded.stage, Stage::Verification);
        assert_eq!(loaded.viewer_role, Role::Validator);
        assert_eq!(loaded.draft.id, Some(4));
    }

    #[test]
    fn test_created_program_from_value() {
        assert_eq!(CreatedProgram::from_value(&json!({"id": "12"})).id, Some(12));
        assert_eq!(CreatedProgram::from_value(&json!({"data": {"id": 3}})).id, Some(3));
        assert_eq!(CreatedProgram::from_value(&json!({})).id, None);
    }
}
