use crate::database::structs::connection_params::ConnectionParams;
use sqlx::mysql::MySqlConnectOptions;

impl ConnectionParams {
    pub fn mysql_options(&self) -> MySqlConnectOptions {
        let mut options = MySqlConnectOptions::new().host(&self.host);
        if let Some(port) = self.port {
            options = options.port(port);
        }
        if let Some(user) = &self.user {
            options = options.username(user);
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        if let Some(database_name) = &self.database_name {
            options = options.database(database_name);
        }
        options
    }

    /// Connection target without the credential, for log lines.
    pub fn redacted(&self) -> String {
        format!(
            "{}@{}:{}/{}",
            self.user.as_deref().unwrap_or(""),
            self.host,
            self.port.unwrap_or(3306),
            self.database_name.as_deref().unwrap_or("")
        )
    }
}
