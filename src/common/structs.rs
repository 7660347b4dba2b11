/// Plain message error used at the configuration boundary.
pub mod custom_error;
