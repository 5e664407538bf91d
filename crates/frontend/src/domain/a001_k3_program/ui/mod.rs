pub mod details;
pub mod wizard;
