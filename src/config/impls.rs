pub mod configuration;
pub mod configuration_error;
pub mod database_config;
