pub mod badge;
pub mod card_animated;
pub mod field_error;
pub mod month_grid;
pub mod stepper_bar;
