mod page;
mod steps;
pub mod view_model;

pub use page::ProgramWizard;
