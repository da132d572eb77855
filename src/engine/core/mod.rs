pub mod app_setup;
pub mod app_state;
