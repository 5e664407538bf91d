//! Role- and stage-based affordances for the details page.
//!
//! The workflow itself lives on the server; these helpers only decide which
//! buttons to render.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Pic,
    Validator,
    Viewer,
}

impl Role {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" | "superadmin" => Role::Admin,
            "pic" | "user" => Role::Pic,
            "validator" | "verifikator" => Role::Validator,
            _ => Role::Viewer,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Draft,
    Verification,
    Approved,
    Rejected,
    Unknown,
}

impl Stage {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "draft" => Stage::Draft,
            "verification" | "verifikasi" | "pending" | "submitted" => Stage::Verification,
            "approved" | "disetujui" => Stage::Approved,
            "rejected" | "ditolak" => Stage::Rejected,
            _ => Stage::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Stage::Draft => "Draft",
            Stage::Verification => "Menunggu Verifikasi",
            Stage::Approved => "Disetujui",
            Stage::Rejected => "Ditolak",
            Stage::Unknown => "-",
        }
    }
}

pub fn can_verify(role: Role, stage: Stage) -> bool {
    role == Role::Validator && stage == Stage::Verification
}

pub fn can_edit(role: Role, stage: Stage) -> bool {
    matches!(role, Role::Admin | Role::Pic) && matches!(stage, Stage::Draft | Stage::Rejected)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyPayload {
    pub approval_status: ApprovalStatus,
    pub note_validator: Option<String>,
}

impl VerifyPayload {
    pub fn new(approval_status: ApprovalStatus, note: &str) -> Self {
        Self {
            approval_status,
            note_validator: crate::shared::coerce::non_empty(note),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_validator_at_verification_may_verify() {
        for role in [Role::Admin, Role::Pic, Role::Validator, Role::Viewer] {
            for stage in [
                Stage::Draft,
                Stage::Verification,
                Stage::Approved,
                Stage::Rejected,
                Stage::Unknown,
            ] {
                assert_eq!(
                    can_verify(role, stage),
                    role == Role::Validator && stage == Stage::Verification
                );
            }
        }
    }

    #[test]
    fn test_can_edit() {
        assert!(can_edit(Role::Pic, Stage::Rejected));
        assert!(!can_edit(Role::Pic, Stage::Verification));
        assert!(!can_edit(Role::Validator, Stage::Draft));
    }

    #[test]
    fn test_parse_lenient() {
        assert_eq!(Role::parse(" Validator "), Role::Validator);
        assert_eq!(Role::parse("guest"), Role::Viewer);
        assert_eq!(Stage::parse("VERIFIKASI"), Stage::Verification);
        assert_eq!(Stage::parse(""), Stage::Unknown);
    }

    #[test]
    fn test_verify_payload_wire() {
        let body = serde_json::to_value(VerifyPayload::new(ApprovalStatus::Rejected, " ")).unwrap();
        assert_eq!(body["approval_status"], "rejected");
        assert!(body["note_validator"].is_null());
    }
}
