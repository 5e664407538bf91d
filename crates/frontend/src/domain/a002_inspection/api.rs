use crate::shared::api_utils::{api_url, expect_ok, transport};
use contracts::domain::a002_inspection::InspectionChecklist;
use contracts::shared::api_error::ApiError;
use gloo_net::http::Request;

/// Submit a filled checklist for its inspection kind
pub async fn submit_checklist(checklist: &InspectionChecklist) -> Result<(), ApiError> {
    let url = api_url(&format!("/api/inspections/{}", checklist.kind.slug()));
    log::info!(
        "inspection {} {}-{:02} at '{}' ({} rows)",
        checklist.kind.slug(),
        checklist.year,
        checklist.month,
        checklist.location,
        checklist.rows.len()
    );
    let response = Request::post(&url)
        .json(checklist)
        .map_err(transport)?
        .send()
        .await
        .map_err(transport)?;
    expect_ok(response).await.map(|_| ())
}
