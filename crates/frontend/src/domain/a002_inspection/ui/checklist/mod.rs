mod page;
pub mod view_model;

pub use page::InspectionChecklistPage;
