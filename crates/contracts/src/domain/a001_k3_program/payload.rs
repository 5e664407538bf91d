//! Wire bodies sent to the program endpoints, and the builders that map
//! the in-memory draft onto them.

use super::draft::{ItemDraft, ProgramDraft};
use super::month_vector::MonthVector;
use crate::shared::api_error::ApiError;
use crate::shared::coerce::{coerce_f64, non_empty, non_empty_opt};
use serde::{Deserialize, Serialize};
use url::Url;

// ============================================================================
// Create
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProgramPayload {
    pub year: i32,
    pub entity_code: String,
    pub plant_code: String,
    pub target_description: Option<String>,
    pub sections: Vec<SectionPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionPayload {
    pub title: String,
    pub target_pct: f64,
    pub items: Vec<ItemPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPayload {
    pub title: String,
    pub pic: Option<String>,
    pub plan_m: MonthVector,
    pub actual_m: MonthVector,
    pub docs: Vec<DocPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocPayload {
    pub month: u8,
    pub plan_note: Option<String>,
    pub actual_note: Option<String>,
    pub evidence: Option<String>,
}

/// Full create body.
///
/// Realisation is never part of creation: `actual_m` is always sent empty,
/// whatever the draft holds.
pub fn build_create_payload(draft: &ProgramDraft) -> CreateProgramPayload {
    CreateProgramPayload {
        year: draft.year,
        entity_code: draft.entity_code.trim().to_string(),
        plant_code: draft.plant_code.trim().to_string(),
        target_description: non_empty_opt(draft.target_description.as_deref()),
        sections: draft
            .sections
            .iter()
            .map(|section| SectionPayload {
                title: section.title.trim().to_string(),
                target_pct: coerce_f64(&section.target_pct),
                items: section.items.iter().map(item_payload).collect(),
            })
            .collect(),
    }
}

fn item_payload(item: &ItemDraft) -> ItemPayload {
    ItemPayload {
        title: item.title.trim().to_string(),
        pic: non_empty(&item.pic),
        plan_m: item.plan,
        actual_m: MonthVector::empty(),
        docs: item
            .docs
            .iter()
            .map(|doc| DocPayload {
                month: doc.month,
                plan_note: non_empty_opt(doc.plan_note.as_deref()),
                actual_note: non_empty_opt(doc.actual_note.as_deref()),
                evidence: non_empty_opt(doc.evidence.as_deref()),
            })
            .collect(),
    }
}

// ============================================================================
// Edit mode: header, monthly patch
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderPayload {
    pub year: i32,
    pub entity_code: String,
    pub plant_code: String,
    pub target_description: Option<String>,
}

pub fn build_header_payload(draft: &ProgramDraft) -> HeaderPayload {
    HeaderPayload {
        year: draft.year,
        entity_code: draft.entity_code.trim().to_string(),
        plant_code: draft.plant_code.trim().to_string(),
        target_description: non_empty_opt(draft.target_description.as_deref()),
    }
}

/// Body of the per-item monthly update
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPatch {
    pub plan: MonthVector,
    pub actual: MonthVector,
    /// Monotonic per item; the server ignores anything older than what it has
    pub seq: u64,
}

pub fn build_monthly_patch(item: &ItemDraft, seq: u64) -> MonthlyPatch {
    MonthlyPatch {
        plan: item.plan,
        actual: item.actual,
        seq,
    }
}

// ============================================================================
// Evidence
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvidenceMode {
    #[default]
    Link,
    File,
}

impl EvidenceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceMode::Link => "link",
            EvidenceMode::File => "file",
        }
    }
}

/// Raw state of the evidence sub-form. `F` is the platform file handle.
#[derive(Debug, Clone)]
pub struct EvidenceForm<F> {
    pub month: Option<u8>,
    pub mode: EvidenceMode,
    pub link_url: String,
    pub file: Option<F>,
    pub note: String,
}

impl<F> Default for EvidenceForm<F> {
    fn default() -> Self {
        Self {
            month: None,
            mode: EvidenceMode::Link,
            link_url: String::new(),
            file: None,
            note: String::new(),
        }
    }
}

/// Either a link or an uploaded file, never both
#[derive(Debug, Clone, PartialEq)]
pub enum EvidenceSource<F> {
    Link(Url),
    File(F),
}

/// Validated evidence ready to become a multipart request
#[derive(Debug, Clone, PartialEq)]
pub struct EvidenceSubmission<F> {
    pub item_id: i64,
    pub month: u8,
    pub source: EvidenceSource<F>,
    pub note: Option<String>,
}

impl<F> EvidenceSubmission<F> {
    pub fn mode(&self) -> EvidenceMode {
        match self.source {
            EvidenceSource::Link(_) => EvidenceMode::Link,
            EvidenceSource::File(_) => EvidenceMode::File,
        }
    }

    /// Text parts of the multipart body; the file part is added by the caller.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("month", self.month.to_string()),
            ("mode", self.mode().as_str().to_string()),
        ];
        if let EvidenceSource::Link(url) = &self.source {
            fields.push(("link_url", url.to_string()));
        }
        fields.push(("note", self.note.clone().unwrap_or_default()));
        fields
    }

    pub fn file(&self) -> Option<&F> {
        match &self.source {
            EvidenceSource::File(f) => Some(f),
            EvidenceSource::Link(_) => None,
        }
    }
}

pub fn build_evidence_submission<F>(
    item: &ItemDraft,
    form: EvidenceForm<F>,
) -> Result<EvidenceSubmission<F>, ApiError> {
    let item_id = item
        .id
        .ok_or_else(|| ApiError::client("Simpan program terlebih dahulu sebelum menambah bukti"))?;

    let month = match form.month {
        Some(m) if (1..=12).contains(&m) => m,
        _ => return Err(ApiError::client("Pilih bulan terlebih dahulu")),
    };

    let source = match form.mode {
        EvidenceMode::Link => {
            let raw = form.link_url.trim();
            if raw.is_empty() {
                return Err(ApiError::client("Tautan bukti wajib diisi"));
            }
            let url = Url::parse(raw)
                .map_err(|_| ApiError::client("Tautan bukti tidak valid"))?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(ApiError::client("Tautan harus diawali http:// atau https://"));
            }
            EvidenceSource::Link(url)
        }
        EvidenceMode::File => match form.file {
            Some(file) => EvidenceSource::File(file),
            None => return Err(ApiError::client("Pilih berkas bukti terlebih dahulu")),
        },
    };

    Ok(EvidenceSubmission {
        item_id,
        month,
        source,
        note: non_empty(&form.note),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_k3_program::draft::{DocumentRow, ItemPatch};
    use serde_json::json;

    #[test]
    fn test_create_payload_end_to_end() {
        let mut draft = ProgramDraft::new(2026);
        draft.entity_code = "ENT01".into();
        draft.plant_code = "PLT01".into();
        draft.sections[0].target_pct = "100".into();
        draft
            .mutate_item(
                0,
                0,
                ItemPatch {
                    title: Some("Inspeksi rutin".into()),
                    ..ItemPatch::default()
                },
            )
            .unwrap();
        draft.toggle_plan(0, 0, 0).unwrap();
        draft.toggle_plan(0, 0, 2).unwrap();

        let payload = build_create_payload(&draft);
        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            body["sections"][0]["items"][0]["plan_m"],
            json!([true, false, true, false, false, false, false, false, false, false, false, false])
        );
        assert_eq!(
            body["sections"][0]["items"][0]["actual_m"],
            serde_json::to_value([false; 12]).unwrap()
        );
        assert_eq!(body["sections"][0]["target_pct"], json!(100.0));
        assert_eq!(body["target_description"], json!(null));
    }

    #[test]
    fn test_create_payload_always_clears_actual() {
        let mut draft = ProgramDraft::new(2026);
        draft.add_item(0).unwrap();
        draft.add_section();
        for section in draft.sections.iter_mut() {
            for item in section.items.iter_mut() {
                item.actual = MonthVector::from_array([true; 12]);
            }
        }
        let payload = build_create_payload(&draft);
        for section in &payload.sections {
            for item in &section.items {
                assert!(item.actual_m.all_false());
            }
        }
    }

    #[test]
    fn test_create_payload_coercions() {
        let mut draft = ProgramDraft::new(2026);
        draft.target_description = Some("   ".into());
        draft.sections[0].target_pct = "sekitar 80".into();
        draft.sections[0].items[0].docs.push(DocumentRow {
            month: 4,
            plan_note: Some(String::new()),
            actual_note: None,
            evidence: Some(" https://drive.test/x ".into()),
        });

        let payload = build_create_payload(&draft);
        assert_eq!(payload.target_description, None);
        assert_eq!(payload.sections[0].target_pct, 0.0);
        let item = &payload.sections[0].items[0];
        assert_eq!(item.pic, None);
        assert_eq!(item.docs[0].plan_note, None);
        assert_eq!(item.docs[0].evidence.as_deref(), Some("https://drive.test/x"));
    }

    #[test]
    fn test_monthly_patch_carries_both_vectors() {
        let item = ItemDraft {
            id: Some(9),
            plan: MonthVector::empty().toggle(1),
            actual: MonthVector::empty().toggle(1),
            ..ItemDraft::default()
        };
        let patch = build_monthly_patch(&item, 4);
        assert!(patch.plan.is_set(1));
        assert!(patch.actual.is_set(1));
        assert_eq!(serde_json::to_value(patch).unwrap()["seq"], json!(4));
    }

    fn saved_item() -> ItemDraft {
        ItemDraft {
            id: Some(42),
            ..ItemDraft::default()
        }
    }

    #[test]
    fn test_evidence_requires_month() {
        let form: EvidenceForm<()> = EvidenceForm {
            link_url: "https://x.test".into(),
            ..EvidenceForm::default()
        };
        assert_eq!(
            build_evidence_submission(&saved_item(), form).unwrap_err(),
            ApiError::client("Pilih bulan terlebih dahulu")
        );
    }

    #[test]
    fn test_evidence_link() {
        let form: EvidenceForm<()> = EvidenceForm {
            month: Some(3),
            link_url: "https://drive.test/foto".into(),
            note: "  ".into(),
            ..EvidenceForm::default()
        };
        let submission = build_evidence_submission(&saved_item(), form).unwrap();
        assert_eq!(submission.item_id, 42);
        assert_eq!(submission.mode(), EvidenceMode::Link);
        assert!(submission.file().is_none());
        let fields = submission.text_fields();
        assert!(fields.contains(&("mode", "link".to_string())));
        assert!(fields.contains(&("link_url", "https://drive.test/foto".to_string())));
        assert!(fields.contains(&("note", String::new())));

        let bad: EvidenceForm<()> = EvidenceForm {
            month: Some(3),
            link_url: "ftp://drive.test".into(),
            ..EvidenceForm::default()
        };
        assert!(build_evidence_submission(&saved_item(), bad).is_err());
    }

    #[test]
    fn test_evidence_file_mode_ignores_link() {
        let form = EvidenceForm {
            month: Some(12),
            mode: EvidenceMode::File,
            link_url: "https://ignored.test".into(),
            file: Some("laporan.pdf"),
            note: "Foto APAR".into(),
        };
        let submission = build_evidence_submission(&saved_item(), form).unwrap();
        assert_eq!(submission.file(), Some(&"laporan.pdf"));
        assert!(!submission.text_fields().iter().any(|(k, _)| *k == "link_url"));

        let missing: EvidenceForm<&str> = EvidenceForm {
            month: Some(12),
            mode: EvidenceMode::File,
            ..EvidenceForm::default()
        };
        assert!(build_evidence_submission(&saved_item(), missing).is_err());
    }

    #[test]
    fn test_evidence_needs_persisted_item() {
        let form: EvidenceForm<()> = EvidenceForm {
            month: Some(1),
            link_url: "https://x.test".into(),
            ..EvidenceForm::default()
        };
        assert!(matches!(
            build_evidence_submission(&ItemDraft::default(), form),
            Err(ApiError::Client(_))
        ));
    }
}
