//! HTTP client for the K3 program endpoints.

use crate::shared::api_utils::{api_url, expect_ok, transport};
use contracts::domain::a001_k3_program::api::{CreatedProgram, ProgramApi};
use contracts::domain::a001_k3_program::approval::VerifyPayload;
use contracts::domain::a001_k3_program::payload::{
    CreateProgramPayload, EvidenceSubmission, HeaderPayload, MonthlyPatch,
};
use contracts::shared::api_error::ApiError;
use gloo_net::http::Request;
use serde_json::Value;
use uuid::Uuid;
use web_sys::{File, FormData};

const BASE: &str = "/api/k3-programs";

#[derive(Debug, Clone, Copy, Default)]
pub struct HttpProgramApi;

fn form_data(submission: &EvidenceSubmission<File>) -> Result<FormData, ApiError> {
    let form = FormData::new().map_err(|e| ApiError::client(format!("{:?}", e)))?;
    for (name, value) in submission.text_fields() {
        form.append_with_str(name, &value)
            .map_err(|e| ApiError::client(format!("{:?}", e)))?;
    }
    if let Some(file) = submission.file() {
        form.append_with_blob_and_filename("file", file, &file.name())
            .map_err(|e| ApiError::client(format!("{:?}", e)))?;
    }
    Ok(form)
}

impl ProgramApi for HttpProgramApi {
    type Upload = File;

    async fn fetch_program(&self, id: i64) -> Result<Value, ApiError> {
        let response = Request::get(&api_url(&format!("{}/{}", BASE, id)))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(transport)?;
        expect_ok(response)
            .await?
            .json::<Value>()
            .await
            .map_err(transport)
    }

    async fn create_program(
        &self,
        payload: &CreateProgramPayload,
    ) -> Result<CreatedProgram, ApiError> {
        log::info!(
            "create program {} {}/{} with {} sections",
            payload.year,
            payload.entity_code,
            payload.plant_code,
            payload.sections.len()
        );
        let response = Request::post(&api_url(BASE))
            .json(payload)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        let response = expect_ok(response).await?;
        // Some deployments answer 201 with an empty body
        let text = response.text().await.unwrap_or_default();
        let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);
        Ok(CreatedProgram::from_value(&body))
    }

    async fn update_program_header(
        &self,
        id: i64,
        payload: &HeaderPayload,
    ) -> Result<(), ApiError> {
        let response = Request::put(&api_url(&format!("{}/{}/header", BASE, id)))
            .json(payload)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        expect_ok(response).await.map(|_| ())
    }

    async fn patch_item_monthly(&self, item_id: i64, patch: &MonthlyPatch) -> Result<(), ApiError> {
        log::debug!("patch item {} monthly seq={}", item_id, patch.seq);
        let response = Request::patch(&api_url(&format!("{}/items/{}/monthly", BASE, item_id)))
            .json(patch)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        expect_ok(response).await.map(|_| ())
    }

    async fn submit_item_evidence(
        &self,
        submission: &EvidenceSubmission<File>,
    ) -> Result<(), ApiError> {
        let url = api_url(&format!("{}/items/{}/evidence", BASE, submission.item_id));
        // The browser sets the multipart boundary header itself
        let response = Request::post(&url)
            .body(form_data(submission)?)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        expect_ok(response).await.map(|_| ())
    }

    async fn verify_program(&self, uuid: Uuid, payload: &VerifyPayload) -> Result<(), ApiError> {
        let response = Request::post(&api_url(&format!("{}/{}/verify", BASE, uuid)))
            .json(payload)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        expect_ok(response).await.map(|_| ())
    }
}
