pub mod a001_k3_program;
pub mod a002_inspection;
