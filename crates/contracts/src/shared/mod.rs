pub mod api_error;
pub mod coerce;
pub mod field_errors;
pub mod patch_sequencer;
pub mod stepper;
