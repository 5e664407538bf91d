//! a001 — K3 work program (program kerja K3): creation/edit wizard core.

pub mod api;
pub mod approval;
pub mod draft;
pub mod errors;
pub mod hydrate;
pub mod month_vector;
pub mod payload;
pub mod wizard;

pub use draft::{DocumentRow, ItemDraft, ProgramDraft, SectionDraft};
pub use month_vector::{ensure12, MonthVector};
pub use wizard::{WizardMode, WizardState};
