/// Errors raised while loading or validating configuration.
pub mod configuration_error;
