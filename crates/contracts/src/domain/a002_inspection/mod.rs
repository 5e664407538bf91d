//! a002 — periodic inspections (APAR, gedung, P3K, genset, APD, K3L)

pub mod aggregate;

pub use aggregate::{Condition, FollowUp, InspectionChecklist, InspectionKind, InspectionRow};
