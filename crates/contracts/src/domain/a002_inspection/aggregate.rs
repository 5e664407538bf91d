//! Periodic equipment/facility inspection checklist (APAR, gedung, P3K, ...).

use crate::shared::coerce::non_empty;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InspectionKind {
    FireExtinguisher,
    Building,
    FirstAidKit,
    Generator,
    Ppe,
    K3lGeneral,
}

impl InspectionKind {
    pub const ALL: [InspectionKind; 6] = [
        InspectionKind::FireExtinguisher,
        InspectionKind::Building,
        InspectionKind::FirstAidKit,
        InspectionKind::Generator,
        InspectionKind::Ppe,
        InspectionKind::K3lGeneral,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            InspectionKind::FireExtinguisher => "APAR",
            InspectionKind::Building => "Gedung",
            InspectionKind::FirstAidKit => "Kotak P3K",
            InspectionKind::Generator => "Genset",
            InspectionKind::Ppe => "APD",
            InspectionKind::K3lGeneral => "Checklist K3L",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            InspectionKind::FireExtinguisher => "fire-extinguisher",
            InspectionKind::Building => "building",
            InspectionKind::FirstAidKit => "first-aid-kit",
            InspectionKind::Generator => "generator",
            InspectionKind::Ppe => "ppe",
            InspectionKind::K3lGeneral => "k3l",
        }
    }

    /// Default checklist rows for a new inspection
    pub fn default_points(&self) -> &'static [&'static str] {
        match self {
            InspectionKind::FireExtinguisher => &[
                "Tekanan tabung",
                "Segel & pin pengaman",
                "Selang & nozzle",
                "Label & tanggal kedaluwarsa",
                "Akses tidak terhalang",
            ],
            InspectionKind::Building => &[
                "Atap & plafon",
                "Dinding & lantai",
                "Jalur evakuasi",
                "Penerangan darurat",
                "Instalasi listrik",
            ],
            InspectionKind::FirstAidKit => &[
                "Kelengkapan isi",
                "Tanggal kedaluwarsa obat",
                "Kebersihan kotak",
                "Daftar isi tertempel",
            ],
            InspectionKind::Generator => &[
                "Level oli",
                "Level bahan bakar",
                "Aki",
                "Uji jalan tanpa beban",
                "Kebocoran",
            ],
            InspectionKind::Ppe => &[
                "Helm keselamatan",
                "Sepatu keselamatan",
                "Sarung tangan",
                "Kacamata pelindung",
                "Pelindung telinga",
            ],
            InspectionKind::K3lGeneral => &[
                "Housekeeping",
                "Rambu K3",
                "Pengelolaan limbah",
                "Ventilasi",
            ],
        }
    }
}

/// Result of checking one point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Condition {
    #[default]
    Unchecked,
    Good,
    Broken,
}

/// Follow-up for a point found broken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FollowUp {
    #[default]
    None,
    Repair,
    Maintenance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "InspectionRowWire", into = "InspectionRowWire")]
pub struct InspectionRow {
    pub label: String,
    pub condition: Condition,
    pub follow_up: FollowUp,
    pub note: Option<String>,
}

impl InspectionRow {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            condition: Condition::Unchecked,
            follow_up: FollowUp::None,
            note: None,
        }
    }

    /// A point in good condition never carries a follow-up.
    pub fn set_condition(&mut self, condition: Condition) {
        self.condition = condition;
        if condition == Condition::Good {
            self.follow_up = FollowUp::None;
        }
    }

    pub fn set_follow_up(&mut self, follow_up: FollowUp) {
        if self.condition != Condition::Good {
            self.follow_up = follow_up;
        }
    }
}

/// Server row shape: each choice is a pair of flags
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InspectionRowWire {
    #[serde(default)]
    label: String,
    #[serde(default)]
    condition_good: bool,
    #[serde(default)]
    condition_broken: bool,
    #[serde(default)]
    action_repair: bool,
    #[serde(default)]
    action_maintenance: bool,
    #[serde(default)]
    note: Option<String>,
}

impl From<InspectionRowWire> for InspectionRow {
    fn from(w: InspectionRowWire) -> Self {
        // A contradictory pair resolves to the value that demands attention
        let condition = match (w.condition_good, w.condition_broken) {
            (_, true) => Condition::Broken,
            (true, false) => Condition::Good,
            (false, false) => Condition::Unchecked,
        };
        let follow_up = match (w.action_repair, w.action_maintenance) {
            (true, _) => FollowUp::Repair,
            (false, true) => FollowUp::Maintenance,
            (false, false) => FollowUp::None,
        };
        let mut row = InspectionRow {
            label: w.label,
            condition,
            follow_up: FollowUp::None,
            note: w.note.as_deref().and_then(non_empty),
        };
        row.set_follow_up(follow_up);
        row
    }
}

impl From<InspectionRow> for InspectionRowWire {
    fn from(row: InspectionRow) -> Self {
        Self {
            label: row.label,
            condition_good: row.condition == Condition::Good,
            condition_broken: row.condition == Condition::Broken,
            action_repair: row.follow_up == FollowUp::Repair,
            action_maintenance: row.follow_up == FollowUp::Maintenance,
            note: row.note,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionChecklist {
    pub kind: InspectionKind,
    pub year: i32,
    /// 1..=12
    pub month: u8,
    pub location: String,
    pub rows: Vec<InspectionRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InspectionSummary {
    pub total: usize,
    pub good: usize,
    pub broken: usize,
    pub unchecked: usize,
    /// Share of checked points in good condition
    pub good_pct: Option<f64>,
}

impl InspectionChecklist {
    pub fn new(kind: InspectionKind, year: i32, month: u8) -> Self {
        Self {
            kind,
            year,
            month: month.clamp(1, 12),
            location: String::new(),
            rows: kind
                .default_points()
                .iter()
                .map(|label| InspectionRow::new(*label))
                .collect(),
        }
    }

    /// Checklist for the calendar month containing `date`
    pub fn for_date(kind: InspectionKind, date: NaiveDate) -> Self {
        Self::new(kind, date.year(), date.month() as u8)
    }

    pub fn summary(&self) -> InspectionSummary {
        let mut summary = InspectionSummary {
            total: self.rows.len(),
            ..InspectionSummary::default()
        };
        for row in &self.rows {
            match row.condition {
                Condition::Good => summary.good += 1,
                Condition::Broken => summary.broken += 1,
                Condition::Unchecked => summary.unchecked += 1,
            }
        }
        let checked = summary.good + summary.broken;
        if checked > 0 {
            summary.good_pct = Some(summary.good as f64 * 100.0 / checked as f64);
        }
        summary
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.location.trim().is_empty() {
            return Err("Lokasi wajib diisi".into());
        }
        if let Some(row) = self.rows.iter().find(|r| r.condition == Condition::Unchecked) {
            return Err(format!("Kondisi \"{}\" belum dipilih", row.label));
        }
        if let Some(row) = self
            .rows
            .iter()
            .find(|r| r.condition == Condition::Broken && r.follow_up == FollowUp::None)
        {
            return Err(format!("Tindak lanjut \"{}\" belum dipilih", row.label));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_round_trip_keeps_paired_flags() {
        let mut row = InspectionRow::new("Tekanan tabung");
        row.set_condition(Condition::Broken);
        row.set_follow_up(FollowUp::Maintenance);
        let wire = serde_json::to_value(&row).unwrap();
        assert_eq!(wire["condition_good"], json!(false));
        assert_eq!(wire["condition_broken"], json!(true));
        assert_eq!(wire["action_repair"], json!(false));
        assert_eq!(wire["action_maintenance"], json!(true));
    }

    #[test]
    fn test_contradictory_flags_resolve_conservatively() {
        let row: InspectionRow = serde_json::from_value(json!({
            "label": "Selang",
            "condition_good": true,
            "condition_broken": true,
            "action_repair": true,
            "action_maintenance": true
        }))
        .unwrap();
        assert_eq!(row.condition, Condition::Broken);
        assert_eq!(row.follow_up, FollowUp::Repair);
    }

    #[test]
    fn test_good_row_drops_follow_up() {
        let row: InspectionRow = serde_json::from_value(json!({
            "label": "Segel",
            "condition_good": true,
            "action_repair": true
        }))
        .unwrap();
        assert_eq!(row.follow_up, FollowUp::None);

        let mut row = InspectionRow::new("Segel");
        row.set_condition(Condition::Broken);
        row.set_follow_up(FollowUp::Repair);
        row.set_condition(Condition::Good);
        assert_eq!(row.follow_up, FollowUp::None);
    }

    #[test]
    fn test_for_date_uses_calendar_month() {
        let date = NaiveDate::from_ymd_opt(2026, 11, 3).unwrap();
        let checklist = InspectionChecklist::for_date(InspectionKind::Generator, date);
        assert_eq!((checklist.year, checklist.month), (2026, 11));
        assert_eq!(checklist.rows.len(), 5);
    }

    #[test]
    fn test_summary_and_validation() {
        let mut checklist = InspectionChecklist::new(InspectionKind::FirstAidKit, 2026, 5);
        assert_eq!(checklist.summary().unchecked, 4);
        assert!(checklist.validate().is_err());

        checklist.location = "Gudang A".into();
        for row in checklist.rows.iter_mut() {
            row.set_condition(Condition::Good);
        }
        checklist.rows[0].set_condition(Condition::Broken);
        assert!(checklist.validate().unwrap_err().contains("Tindak lanjut"));

        checklist.rows[0].set_follow_up(FollowUp::Repair);
        assert!(checklist.validate().is_ok());
        let summary = checklist.summary();
        assert_eq!(summary.good, 3);
        assert_eq!(summary.broken, 1);
        assert_eq!(summary.good_pct, Some(75.0));
    }
}
