use std::fs::File;
use std::io::Write;
use regex::Regex;
use crate::common::structs::custom_error::CustomError;
use crate::config::enums::configuration_error::ConfigurationError;
use crate::config::structs::configuration::Configuration;
use crate::config::structs::database_config::DatabaseConfig;

pub const ENV_DB_HOST: &str = "DB_HOST";
pub const ENV_DB_PORT: &str = "DB_PORT";
pub const ENV_DB_USER: &str = "DB_USER";
pub const ENV_DB_PASSWORD: &str = "DB_PASSWORD";
pub const ENV_DB_DATABASE: &str = "DB_DATABASE";

const LOG_LEVELS: [&str; 6] = ["off", "trace", "debug", "info", "warn", "error"];

impl Default for Configuration {
    fn default() -> Self {
        Configuration::init()
    }
}

impl Configuration {
    pub fn init() -> Configuration {
        Configuration {
            log_level: String::from("info"),
            database: DatabaseConfig::default(),
        }
    }

    pub fn load(data: &[u8]) -> Result<Configuration, toml::de::Error> {
        toml::from_str(&String::from_utf8_lossy(data))
    }

    pub fn load_file(path: &str) -> Result<Configuration, ConfigurationError> {
        match std::fs::read(path) {
            Err(e) => Err(ConfigurationError::IOError(e)),
            Ok(data) => {
                match Self::load(data.as_slice()) {
                    Ok(cfg) => {
                        Ok(cfg)
                    }
                    Err(e) => Err(ConfigurationError::ParseError(e)),
                }
            }
        }
    }

    pub fn save_file(path: &str, data: String) -> Result<(), ConfigurationError> {
        match File::create(path) {
            Ok(mut file) => {
                match file.write_all(data.as_ref()) {
                    Ok(_) => Ok(()),
                    Err(e) => Err(ConfigurationError::IOError(e))
                }
            }
            Err(e) => Err(ConfigurationError::IOError(e))
        }
    }

    /// Loads `path`, applies the `DB_*` environment overrides and validates.
    /// With `create`, a missing or broken file is replaced by the defaults and
    /// the caller is asked to edit it.
    pub fn load_from_file(path: &str, create: bool) -> Result<Configuration, CustomError> {
        let mut config = match Configuration::load_file(path) {
            Ok(c) => c,
            Err(error) => {
                eprintln!("No config file found or corrupt.");
                eprintln!("[ERROR] {}", error);

                if !create {
                    eprintln!("You can either create your own {} file, or start this app using '--create-config' as parameter.", path);
                    return Err(CustomError::new(&format!("will not create automatically {} file", path)));
                }
                eprintln!("Creating config file..");

                let config_toml = match toml::to_string(&Configuration::init()) {
                    Ok(data) => data,
                    Err(e) => return Err(CustomError::new(&format!("could not serialize default configuration: {}", e))),
                };
                return match Configuration::save_file(path, config_toml) {
                    Ok(_) => {
                        eprintln!("Please edit {} and restart, exiting now...", path);
                        Err(CustomError::new(&format!("created {} file", path)))
                    }
                    Err(e) => {
                        eprintln!("{} file could not be created, check permissions...", path);
                        eprintln!("{e}");
                        Err(CustomError::new(&format!("could not create {} file", path)))
                    }
                };
            }
        };

        if let Err(error) = config.apply_env_overrides() {
            return Err(CustomError::new(&error.to_string()));
        }
        println!("[VALIDATE] Validating configuration...");
        if let Err(error) = config.validate() {
            return Err(CustomError::new(&error.to_string()));
        }
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigurationError> {
        self.apply_env_overrides_with(|key| std::env::var(key).ok())
    }

    /// Applies overrides from any key lookup; unset keys keep the file value.
    pub fn apply_env_overrides_with<F>(&mut self, lookup: F) -> Result<(), ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_DB_HOST) {
            self.database.host = Some(host);
        }
        if let Some(port) = lookup(ENV_DB_PORT) {
            let port = port.trim().parse::<u16>().map_err(|_| {
                ConfigurationError::ValidationError(format!("{} is not a valid port: \"{}\"", ENV_DB_PORT, port))
            })?;
            self.database.port = Some(port);
        }
        if let Some(user) = lookup(ENV_DB_USER) {
            self.database.user = Some(user);
        }
        if let Some(password) = lookup(ENV_DB_PASSWORD) {
            self.database.password = Some(password);
        }
        if let Some(database_name) = lookup(ENV_DB_DATABASE) {
            self.database.database_name = Some(database_name);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigurationError::ValidationError(format!("unknown log level \"{}\"", self.log_level)));
        }
        if self.database.pool_size == 0 {
            return Err(ConfigurationError::ValidationError(String::from("[database] pool_size must be at least 1")));
        }
        if self.database.connect_timeout == 0 {
            return Err(ConfigurationError::ValidationError(String::from("[database] connect_timeout must be at least 1 second")));
        }
        if self.database.sqlite_path.trim().is_empty() {
            return Err(ConfigurationError::ValidationError(String::from("[database] sqlite_path must not be empty")));
        }
        if let Some(database_name) = &self.database.database_name {
            Self::validate_value("[database] database_name", database_name, r"^[A-Za-z0-9_$]{1,64}$")?;
        }
        Ok(())
    }

    pub fn validate_value(name: &str, value: &str, regex: &str) -> Result<(), ConfigurationError> {
        let regex_check = Regex::new(regex).map_err(|e| ConfigurationError::ValidationError(e.to_string()))?;
        if !regex_check.is_match(value) {
            return Err(ConfigurationError::ValidationError(format!(
                "Error checking {} [:] Name: \"{}\" [:] Regex: \"{}\"",
                name, value, regex_check
            )));
        }
        Ok(())
    }
}
